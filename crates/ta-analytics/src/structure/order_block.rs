//! 오더 블록 감지기.
//!
//! 고거래량 캔들(컨텍스트) 직후의 돌파 캔들(확인)로 매집/분산 구간을
//! 표시합니다. 인접 블록의 병합이나 중복 제거는 하지 않으며, 조건을
//! 만족하는 모든 윈도우가 독립적으로 기록됩니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ta_core::Candle;

/// 스캔 시작 오프셋 기본값.
pub const DEFAULT_LOOKBACK: usize = 20;

/// 컨텍스트 캔들 거래량과 비교할 직전 평균 거래량 윈도우.
pub const DEFAULT_VOLUME_WINDOW: usize = 10;

/// 오더 블록 감지 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderBlockParams {
    /// 스캔 시작 오프셋 (기본: 20).
    pub lookback: usize,
    /// 직전 거래량 평균 윈도우 (기본: 10).
    pub volume_window: usize,
}

impl Default for OrderBlockParams {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            volume_window: DEFAULT_VOLUME_WINDOW,
        }
    }
}

/// 감지된 오더 블록.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBlock {
    /// 컨텍스트 캔들 인덱스
    pub start_index: usize,
    /// 컨텍스트 캔들 고가
    pub high: Decimal,
    /// 컨텍스트 캔들 저가
    pub low: Decimal,
    /// 정규화된 돌파 거리
    pub strength: Decimal,
    /// 컨텍스트 거래량 / 직전 평균 거래량
    pub volume_ratio: Decimal,
}

/// 오더 블록 감지 결과.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBlockFindings {
    /// 강세 블록 (상방 돌파)
    pub bullish: Vec<OrderBlock>,
    /// 약세 블록 (하방 돌파)
    pub bearish: Vec<OrderBlock>,
}

/// 오더 블록 감지기.
#[derive(Debug, Default)]
pub struct OrderBlockDetector;

impl OrderBlockDetector {
    /// 새로운 감지기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 오더 블록을 스캔합니다.
    ///
    /// 인덱스 `lookback`부터 `len - 2`까지, 캔들 i(컨텍스트)와
    /// i+1(확인)의 2캔들 윈도우를 검사합니다.
    ///
    /// 강세 블록 조건:
    /// - 확인 캔들이 양봉
    /// - 확인 종가가 컨텍스트 고가를 상향 돌파
    /// - 컨텍스트 거래량이 직전 `volume_window` 평균을 초과
    ///
    /// 약세 블록은 하방 미러 조건입니다. 시리즈가 `lookback + 1`보다
    /// 짧으면 빈 결과를 반환합니다 (에러 아님).
    pub fn detect(&self, candles: &[Candle], params: &OrderBlockParams) -> OrderBlockFindings {
        let mut findings = OrderBlockFindings::default();

        if candles.len() < params.lookback + 2 {
            return findings;
        }

        for i in params.lookback..candles.len() - 1 {
            let context = &candles[i];
            let confirm = &candles[i + 1];

            let vol_start = i.saturating_sub(params.volume_window);
            if vol_start == i {
                continue;
            }
            let window = &candles[vol_start..i];
            let avg_volume: Decimal = window.iter().map(|c| c.volume).sum::<Decimal>()
                / Decimal::from(window.len());

            if avg_volume <= Decimal::ZERO || context.volume <= avg_volume {
                continue;
            }

            let volume_ratio = context.volume / avg_volume;

            if confirm.is_bullish()
                && confirm.close > context.high
                && context.high > Decimal::ZERO
            {
                findings.bullish.push(OrderBlock {
                    start_index: i,
                    high: context.high,
                    low: context.low,
                    strength: (confirm.close - context.high) / context.high,
                    volume_ratio,
                });
            } else if confirm.is_bearish()
                && confirm.close < context.low
                && context.low > Decimal::ZERO
            {
                findings.bearish.push(OrderBlock {
                    start_index: i,
                    high: context.high,
                    low: context.low,
                    strength: (context.low - confirm.close) / context.low,
                    volume_ratio,
                });
            }
        }

        findings
    }
}

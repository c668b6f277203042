//! 스냅샷 조립.
//!
//! 타임프레임별로 마지막 마감 캔들의 지표 값과 구조 패턴 결과를 하나의
//! Feature Record로 병합합니다. Decimal 기반 파이프라인에는 NaN이 존재하지
//! 않으므로, 정의되지 않는 값은 전 구간에서 `Option::None`으로 유지되고
//! JSON null로 직렬화됩니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use ta_core::{CandleSeries, Timeframe};

use crate::indicators::IndicatorSet;
use crate::structure::{
    FibonacciLevels, OrderBlockFindings, SupportResistanceLevels, WaveAnalysis, WavePattern,
};

/// 마지막 마감 캔들의 구조 플래그.
///
/// 직전 마감 캔들과의 비교이므로 캔들이 3개 미만이면 모두 false입니다.
/// 고가가 같으면 LH, 저가가 같으면 LL로 집계됩니다 (원 구현과 동일한
/// 이분 분기).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StructureFlags {
    /// Higher High
    pub hh: bool,
    /// Higher Low
    pub hl: bool,
    /// Lower High
    pub lh: bool,
    /// Lower Low
    pub ll: bool,
}

impl StructureFlags {
    /// 시리즈의 마지막 마감 캔들에 대한 플래그를 계산합니다.
    pub fn from_series(series: &CandleSeries) -> Self {
        if series.len() < 3 {
            return Self::default();
        }

        let last = &series.as_slice()[series.len() - 2];
        let prev = &series.as_slice()[series.len() - 3];

        Self {
            hh: last.high > prev.high,
            lh: last.high <= prev.high,
            hl: last.low > prev.low,
            ll: last.low <= prev.low,
        }
    }
}

/// MACD 스냅샷 값.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MacdSnapshot {
    /// MACD 라인
    pub val: Option<Decimal>,
    /// 시그널 라인
    pub signal: Option<Decimal>,
    /// 히스토그램
    pub hist: Option<Decimal>,
}

/// 볼린저 밴드 스냅샷 값.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BollingerSnapshot {
    /// 중간 밴드
    pub mid: Option<Decimal>,
    /// 상단 밴드
    pub up: Option<Decimal>,
    /// 하단 밴드
    pub dn: Option<Decimal>,
    /// 밴드 폭
    pub bw: Option<Decimal>,
}

/// 엘리엇 파동 요약.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElliottSummary {
    /// 패턴 분류
    pub pattern: WavePattern,
    /// 신뢰도
    pub confidence: Decimal,
    /// 세그먼트 수
    pub wave_count: usize,
    /// 마지막 세그먼트의 파동 번호
    pub current_wave: Option<u8>,
}

impl From<&WaveAnalysis> for ElliottSummary {
    fn from(analysis: &WaveAnalysis) -> Self {
        Self {
            pattern: analysis.pattern,
            confidence: analysis.confidence,
            wave_count: analysis.wave_count,
            current_wave: analysis.current_wave,
        }
    }
}

/// 타임프레임 하나의 통합 피처 레코드.
///
/// 마지막 마감 캔들 시점의 모든 지표 값과 구조 패턴 결과의 합집합입니다.
/// 해당 인덱스에서 정의되지 않는 지표는 `None`입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// 마지막 마감 캔들 종가
    pub price: Decimal,
    /// EMA 20
    pub ema20: Option<Decimal>,
    /// EMA 50
    pub ema50: Option<Decimal>,
    /// EMA 200
    pub ema200: Option<Decimal>,
    /// RSI 14
    pub rsi14: Option<Decimal>,
    /// MACD
    pub macd: MacdSnapshot,
    /// ATR 14
    pub atr14: Option<Decimal>,
    /// 볼린저 밴드
    pub bb: BollingerSnapshot,
    /// ADX 14
    pub adx14: Option<Decimal>,
    /// +DI
    pub di_plus: Option<Decimal>,
    /// -DI
    pub di_minus: Option<Decimal>,
    /// OBV
    pub obv: Option<Decimal>,
    /// VWAP
    pub vwap: Option<Decimal>,
    /// 구조 플래그
    pub structure: StructureFlags,
    /// 오더 블록
    pub order_blocks: OrderBlockFindings,
    /// 지지/저항 레벨
    pub support_resistance: SupportResistanceLevels,
    /// 피보나치 되돌림 (최근 50캔들 앵커)
    pub fibonacci: Option<FibonacciLevels>,
    /// 엘리엇 파동 요약
    pub elliott_waves: ElliottSummary,
}

impl FeatureRecord {
    /// 마지막 마감 캔들 시점의 지표 값을 읽어 레코드를 조립합니다.
    pub fn assemble(
        series: &CandleSeries,
        indicators: &IndicatorSet,
        order_blocks: OrderBlockFindings,
        support_resistance: SupportResistanceLevels,
        fibonacci: Option<FibonacciLevels>,
        waves: &WaveAnalysis,
    ) -> Self {
        let idx = series.last_closed_index();

        let macd = indicators
            .macd
            .get(idx)
            .map(|point| MacdSnapshot {
                val: Some(point.macd),
                signal: Some(point.signal),
                hist: Some(point.histogram),
            })
            .unwrap_or_default();

        let bb = indicators
            .bollinger
            .get(idx)
            .map(|point| BollingerSnapshot {
                mid: point.mid,
                up: point.upper,
                dn: point.lower,
                bw: point.bandwidth,
            })
            .unwrap_or_default();

        let directional = indicators.directional.get(idx);

        Self {
            price: series.last_closed().close,
            ema20: indicators.ema_short.get(idx).copied(),
            ema50: indicators.ema_mid.get(idx).copied(),
            ema200: indicators.ema_long.get(idx).copied(),
            rsi14: indicators.rsi.get(idx).copied().flatten(),
            macd,
            atr14: indicators.atr.get(idx).copied().flatten(),
            bb,
            adx14: directional.and_then(|d| d.adx),
            di_plus: directional.and_then(|d| d.di_plus),
            di_minus: directional.and_then(|d| d.di_minus),
            obv: indicators.obv.get(idx).copied(),
            vwap: indicators.vwap.get(idx).copied().flatten(),
            structure: StructureFlags::from_series(series),
            order_blocks,
            support_resistance,
            fibonacci,
            elliott_waves: ElliottSummary::from(waves),
        }
    }
}

/// 요청 한 건에 대한 최종 스냅샷.
///
/// 조립 후 변경되지 않는 순수 값 객체이며 요청자가 단독 소유합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// 분석 심볼 (거래소 형식)
    pub symbol: String,
    /// 생성 시각 (ISO-8601 UTC)
    pub generated_at: DateTime<Utc>,
    /// 타임프레임 레이블 → 피처 레코드
    pub features: HashMap<Timeframe, FeatureRecord>,
}

impl Snapshot {
    /// 스냅샷을 보기 좋은 JSON 문자열로 직렬화합니다.
    ///
    /// 파일 기록 등 실제 I/O는 호출자의 몫입니다.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

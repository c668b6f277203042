//! 피보나치 되돌림/확장 계산기.
//!
//! 최근 고가/저가 앵커 사이를 고정 비율로 선형 보간합니다.
//! 앵커 윈도우는 최근 50캔들로 고정입니다 (호출별 설정 불가).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use ta_core::Candle;

/// 고가/저가 앵커 윈도우 (최근 캔들 수).
pub const FIB_WINDOW: usize = 50;

/// 되돌림 비율 (0 = 고가, 1 = 저가).
pub const RETRACEMENT_RATIOS: [Decimal; 7] = [
    dec!(0),
    dec!(0.236),
    dec!(0.382),
    dec!(0.5),
    dec!(0.618),
    dec!(0.786),
    dec!(1.0),
];

/// 확장 비율 (1.0 = 저가, 그 이상은 저가 아래로 투영).
pub const EXTENSION_RATIOS: [Decimal; 5] = [
    dec!(1.0),
    dec!(1.272),
    dec!(1.618),
    dec!(2.0),
    dec!(2.618),
];

/// 단일 피보나치 레벨.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FibLevel {
    /// 비율
    pub ratio: Decimal,
    /// 보간된 가격
    pub price: Decimal,
}

/// 피보나치 되돌림 레벨 세트.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FibonacciLevels {
    /// 되돌림 레벨 (비율 오름차순)
    pub retracements: Vec<FibLevel>,
    /// 앵커 고가 (윈도우 내 최고가)
    pub recent_high: Decimal,
    /// 앵커 저가 (윈도우 내 최저가)
    pub recent_low: Decimal,
}

/// 피보나치 계산기.
#[derive(Debug, Default)]
pub struct FibonacciCalculator;

impl FibonacciCalculator {
    /// 새로운 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 되돌림 레벨을 계산합니다.
    ///
    /// 앵커는 마지막 `FIB_WINDOW` 캔들의 최고가/최저가입니다.
    /// 레벨 가격 = 고가 - (고가 - 저가) × 비율.
    pub fn retracements(&self, candles: &[Candle]) -> Option<FibonacciLevels> {
        let (high, low) = Self::anchor(candles)?;

        let range = high - low;
        let retracements = RETRACEMENT_RATIOS
            .iter()
            .map(|&ratio| FibLevel {
                ratio,
                price: high - range * ratio,
            })
            .collect();

        Some(FibonacciLevels {
            retracements,
            recent_high: high,
            recent_low: low,
        })
    }

    /// 확장 레벨을 계산합니다.
    ///
    /// 같은 고가/저가 앵커에서 저가 너머로 투영합니다
    /// (비율 1.0이 저가). 기본 Feature Record에는 포함되지 않는
    /// 선택 호출입니다.
    pub fn extensions(&self, candles: &[Candle]) -> Option<Vec<FibLevel>> {
        let (high, low) = Self::anchor(candles)?;

        let range = high - low;
        Some(
            EXTENSION_RATIOS
                .iter()
                .map(|&ratio| FibLevel {
                    ratio,
                    price: high - range * ratio,
                })
                .collect(),
        )
    }

    /// 윈도우 내 최고가/최저가 앵커를 구합니다.
    fn anchor(candles: &[Candle]) -> Option<(Decimal, Decimal)> {
        if candles.is_empty() {
            return None;
        }

        let start = candles.len().saturating_sub(FIB_WINDOW);
        let window = &candles[start..];

        let high = window.iter().map(|c| c.high).max()?;
        let low = window.iter().map(|c| c.low).min()?;
        Some((high, low))
    }
}

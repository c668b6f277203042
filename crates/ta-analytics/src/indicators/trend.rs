//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};
use crate::series;

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 span.
    pub span: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { span: 20 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD 결과.
///
/// 세 시리즈 모두 시드된 EMA로 구성되므로 모든 인덱스에서 정의됩니다.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdPoint {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: Decimal,
    /// 시그널 라인 (MACD의 EMA).
    pub signal: Decimal,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Decimal,
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재가 × α) + (이전 EMA × (1 - α)), α = 2 / (span + 1)
    ///
    /// 첫 값을 시드로 사용하며 편향 보정을 하지 않습니다. 따라서 모든
    /// 인덱스에서 값이 정의되고 `result[0] == prices[0]`입니다.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Decimal>> {
        if params.span == 0 {
            return Err(IndicatorError::InvalidParameter(
                "span은 0보다 커야 합니다".to_string(),
            ));
        }

        Ok(series::ema(prices, params.span))
    }

    /// MACD 계산.
    ///
    /// MACD 라인 = 단기 EMA - 장기 EMA
    /// 시그널 라인 = MACD 라인의 EMA
    /// 히스토그램 = MACD 라인 - 시그널 라인
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdPoint>> {
        if params.fast_period == 0 || params.slow_period == 0 || params.signal_period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "MACD 기간은 0보다 커야 합니다".to_string(),
            ));
        }

        let fast_ema = series::ema(prices, params.fast_period);
        let slow_ema = series::ema(prices, params.slow_period);

        let macd_line: Vec<Decimal> = fast_ema
            .iter()
            .zip(&slow_ema)
            .map(|(fast, slow)| fast - slow)
            .collect();

        let signal_line = series::ema(&macd_line, params.signal_period);

        let result = macd_line
            .iter()
            .zip(&signal_line)
            .map(|(&macd, &signal)| MacdPoint {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect();

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_prices() -> Vec<Decimal> {
        vec![
            dec!(100.0),
            dec!(102.0),
            dec!(101.0),
            dec!(103.0),
            dec!(105.0),
            dec!(104.0),
            dec!(106.0),
            dec!(108.0),
            dec!(107.0),
            dec!(109.0),
        ]
    }

    #[test]
    fn test_ema_first_value_is_seed() {
        let trend = TrendIndicators::new();
        let prices = sample_prices();

        let ema = trend.ema(&prices, EmaParams { span: 3 }).unwrap();

        assert_eq!(ema[0], prices[0]);
        assert_eq!(ema.len(), prices.len());
    }

    #[test]
    fn test_ema_zero_span_rejected() {
        let trend = TrendIndicators::new();
        let result = trend.ema(&sample_prices(), EmaParams { span: 0 });
        assert!(matches!(result, Err(IndicatorError::InvalidParameter(_))));
    }

    #[test]
    fn test_macd_rising_market_positive_histogram() {
        let trend = TrendIndicators::new();
        let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + i)).collect();

        let macd = trend.macd(&prices, MacdParams::default()).unwrap();

        assert_eq!(macd.len(), prices.len());
        // 꾸준한 상승장에서 단기 EMA > 장기 EMA
        let last = macd.last().unwrap();
        assert!(last.macd > Decimal::ZERO);
        assert!(last.histogram > Decimal::ZERO);
    }

    #[test]
    fn test_macd_flat_market_is_zero() {
        let trend = TrendIndicators::new();
        let prices = vec![dec!(100); 40];

        let macd = trend.macd(&prices, MacdParams::default()).unwrap();

        for point in macd {
            assert_eq!(point.macd, Decimal::ZERO);
            assert_eq!(point.signal, Decimal::ZERO);
            assert_eq!(point.histogram, Decimal::ZERO);
        }
    }
}

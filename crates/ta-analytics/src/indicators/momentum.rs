//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정하는 지표를 제공합니다.
//! - RSI (Relative Strength Index)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};
use crate::series;

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS))
    /// RS = 상승폭 rolling mean / 하락폭 rolling mean
    ///
    /// 가격 변화량의 단순 rolling mean 방식을 사용합니다. 첫 캔들은 변화량이
    /// 없으므로 값은 인덱스 `period`부터 정의됩니다.
    ///
    /// 분모 가드: 평균 하락폭이 0이고 평균 상승폭이 양수면 100으로 포화,
    /// 상승폭과 하락폭이 모두 0이면 (무변동 구간) `None`입니다.
    pub fn rsi(
        &self,
        prices: &[Decimal],
        params: RsiParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.is_empty() {
            return Ok(Vec::new());
        }

        // 상승/하락 분리 (첫 캔들은 변화량 없음)
        let mut gains: Vec<Option<Decimal>> = Vec::with_capacity(prices.len());
        let mut losses: Vec<Option<Decimal>> = Vec::with_capacity(prices.len());
        gains.push(None);
        losses.push(None);

        for i in 1..prices.len() {
            let delta = prices[i] - prices[i - 1];
            if delta > Decimal::ZERO {
                gains.push(Some(delta));
                losses.push(Some(Decimal::ZERO));
            } else {
                gains.push(Some(Decimal::ZERO));
                losses.push(Some(-delta));
            }
        }

        let avg_gains = series::rolling_mean_opt(&gains, period);
        let avg_losses = series::rolling_mean_opt(&losses, period);

        let mut result = Vec::with_capacity(prices.len());
        for i in 0..prices.len() {
            match (avg_gains[i], avg_losses[i]) {
                (Some(gain), Some(loss)) => {
                    if loss > Decimal::ZERO {
                        let rs = gain / loss;
                        result.push(Some(dec!(100) - (dec!(100) / (Decimal::ONE + rs))));
                    } else if gain > Decimal::ZERO {
                        // 하락 없는 순수 상승 구간: 포화
                        result.push(Some(dec!(100)));
                    } else {
                        // 무변동 구간: 0/0은 정의되지 않음
                        result.push(None);
                    }
                }
                _ => result.push(None),
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rsi_bounds() {
        let momentum = MomentumCalculator::new();
        let prices: Vec<Decimal> = vec![
            dec!(100),
            dec!(102),
            dec!(101),
            dec!(103),
            dec!(105),
            dec!(104),
            dec!(106),
            dec!(108),
        ];

        let rsi = momentum.rsi(&prices, RsiParams { period: 3 }).unwrap();

        for value in rsi.iter().flatten() {
            assert!(*value >= Decimal::ZERO);
            assert!(*value <= dec!(100));
        }
    }

    #[test]
    fn test_rsi_warmup_is_none() {
        let momentum = MomentumCalculator::new();
        let prices: Vec<Decimal> = (0..20).map(|i| Decimal::from(100 + i)).collect();

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();

        // 변화량은 인덱스 1부터, rolling(14)는 그로부터 14개 필요
        for value in rsi.iter().take(14) {
            assert!(value.is_none());
        }
        assert!(rsi[14].is_some());
    }

    #[test]
    fn test_rsi_pure_uptrend_saturates() {
        let momentum = MomentumCalculator::new();
        let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + i)).collect();

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();

        assert_eq!(rsi.last().unwrap(), &Some(dec!(100)));
    }

    #[test]
    fn test_rsi_flat_market_is_none() {
        let momentum = MomentumCalculator::new();
        let prices = vec![dec!(100); 30];

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();

        // 상승도 하락도 없는 구간은 RS가 0/0이므로 None
        assert!(rsi.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_rsi_short_series_is_none_not_error() {
        let momentum = MomentumCalculator::new();
        let prices = vec![dec!(100), dec!(101)];

        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();

        assert_eq!(rsi.len(), 2);
        assert!(rsi.iter().all(|v| v.is_none()));
    }
}

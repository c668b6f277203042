//! 변동성 지표 (Volatility Indicators).
//!
//! 가격 변동성을 측정하는 지표들을 제공합니다.
//! - Bollinger Bands (볼린저 밴드)
//! - ATR (Average True Range, 평균 실제 범위)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};
use crate::series;

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 표준편차 배수 (기본: 2.0).
    pub std_dev_multiplier: Decimal,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: dec!(2.0),
        }
    }
}

/// 볼린저 밴드 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerPoint {
    /// 중간 밴드 (이동평균).
    pub mid: Option<Decimal>,
    /// 상단 밴드 (MA + k × σ).
    pub upper: Option<Decimal>,
    /// 하단 밴드 (MA - k × σ).
    pub lower: Option<Decimal>,
    /// 밴드 폭 ((상단 - 하단) / 중간). 중간 밴드가 0이면 정의되지 않음.
    pub bandwidth: Option<Decimal>,
}

impl BollingerPoint {
    fn undefined() -> Self {
        Self {
            mid: None,
            upper: None,
            lower: None,
            bandwidth: None,
        }
    }
}

/// ATR 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtrParams {
    /// ATR 기간 (기본: 14).
    pub period: usize,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 볼린저 밴드 계산.
    ///
    /// 상단 밴드 = MA + (k × σ)
    /// 중간 밴드 = MA (이동평균)
    /// 하단 밴드 = MA - (k × σ)
    ///
    /// 표준편차는 표본 표준편차(ddof = 1)입니다.
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerParams,
    ) -> IndicatorResult<Vec<BollingerPoint>> {
        if params.period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "볼린저 기간은 2 이상이어야 합니다".to_string(),
            ));
        }

        let mid = series::rolling_mean(prices, params.period);
        let std = series::rolling_std(prices, params.period);

        let result = mid
            .iter()
            .zip(&std)
            .map(|(&mid, &std)| match (mid, std) {
                (Some(ma), Some(sigma)) => {
                    let deviation = params.std_dev_multiplier * sigma;
                    let upper = ma + deviation;
                    let lower = ma - deviation;

                    let bandwidth = if ma != Decimal::ZERO {
                        Some((upper - lower) / ma)
                    } else {
                        None
                    };

                    BollingerPoint {
                        mid: Some(ma),
                        upper: Some(upper),
                        lower: Some(lower),
                        bandwidth,
                    }
                }
                _ => BollingerPoint::undefined(),
            })
            .collect();

        Ok(result)
    }

    /// ATR (Average True Range) 계산.
    ///
    /// True Range = max(고가 - 저가, |고가 - 전일종가|, |저가 - 전일종가|)
    /// ATR = True Range의 rolling mean
    ///
    /// 첫 캔들의 TR은 전일 종가가 없어 정의되지 않으므로
    /// 첫 ATR 값은 인덱스 `period`에 나타납니다.
    pub fn atr(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        params: AtrParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        if params.period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        let tr = series::true_range(high, low, close);
        Ok(series::rolling_mean_opt(&tr, params.period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bollinger_warmup_and_values() {
        let volatility = VolatilityIndicators::new();
        let prices: Vec<Decimal> = (0..25).map(|i| Decimal::from(100 + (i % 5))).collect();

        let bb = volatility
            .bollinger_bands(&prices, BollingerParams::default())
            .unwrap();

        assert_eq!(bb.len(), 25);
        assert!(bb[18].mid.is_none());
        assert!(bb[19].mid.is_some());

        let last = bb.last().unwrap();
        assert!(last.upper.unwrap() >= last.mid.unwrap());
        assert!(last.lower.unwrap() <= last.mid.unwrap());
        assert!(last.bandwidth.unwrap() >= Decimal::ZERO);
    }

    #[test]
    fn test_bollinger_flat_market_zero_bandwidth() {
        let volatility = VolatilityIndicators::new();
        let prices = vec![dec!(100); 5];

        let bb = volatility
            .bollinger_bands(
                &prices,
                BollingerParams {
                    period: 3,
                    std_dev_multiplier: dec!(2.0),
                },
            )
            .unwrap();

        let last = bb.last().unwrap();
        assert_eq!(last.mid, Some(dec!(100)));
        assert_eq!(last.upper, Some(dec!(100)));
        assert_eq!(last.lower, Some(dec!(100)));
        assert_eq!(last.bandwidth, Some(dec!(0)));
    }

    #[test]
    fn test_atr_warmup_starts_one_candle_later() {
        let volatility = VolatilityIndicators::new();
        let high: Vec<Decimal> = (0..10).map(|i| Decimal::from(105 + i)).collect();
        let low: Vec<Decimal> = (0..10).map(|i| Decimal::from(95 + i)).collect();
        let close: Vec<Decimal> = (0..10).map(|i| Decimal::from(100 + i)).collect();

        let atr = volatility
            .atr(&high, &low, &close, AtrParams { period: 3 })
            .unwrap();

        // TR[0]이 정의되지 않으므로 rolling(3)의 첫 값은 인덱스 3
        assert!(atr[2].is_none());
        assert!(atr[3].is_some());
        assert_eq!(atr[3], Some(dec!(10)));
    }

    #[test]
    fn test_atr_flat_market_is_zero() {
        let volatility = VolatilityIndicators::new();
        let high = vec![dec!(100); 5];
        let low = vec![dec!(100); 5];
        let close = vec![dec!(100); 5];

        let atr = volatility
            .atr(&high, &low, &close, AtrParams { period: 2 })
            .unwrap();

        assert_eq!(atr[2], Some(dec!(0)));
        assert_eq!(atr[4], Some(dec!(0)));
    }
}

//! 거래량 기반 지표 (Volume-Based Indicators).
//!
//! ## OBV (On-Balance Volume)
//!
//! 거래량을 이용하여 자금 흐름을 추적하는 누적 지표입니다.
//!
//! ### 계산 방식
//! - 첫 캔들: OBV = 해당 캔들의 거래량 (시드)
//! - 종가 상승: OBV += 거래량
//! - 종가 하락: OBV -= 거래량
//! - 종가 동일: OBV 변화 없음
//!
//! ## VWAP (Volume Weighted Average Price)
//!
//! 세션 누적 방식의 거래량 가중 평균 가격입니다. 일중 리셋을 하지 않으므로
//! 긴 lookback에서는 누적 합이 계속 커진다는 점에 유의해야 합니다.
//!
//! ### 계산 방식
//! - Typical Price (TP) = (High + Low + Close) / 3
//! - VWAP = Σ(TP × Volume) / Σ(Volume)

use rust_decimal::Decimal;

use super::{IndicatorError, IndicatorResult};

/// 거래량 지표 계산기.
#[derive(Debug, Default)]
pub struct VolumeIndicators;

impl VolumeIndicators {
    /// 새로운 거래량 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// OBV (On-Balance Volume) 계산.
    ///
    /// 명시적 누적기를 사용하는 left-fold로, 첫 거래량을 시드로 하여
    /// 모든 인덱스에서 값이 정의됩니다.
    pub fn obv(&self, close: &[Decimal], volume: &[Decimal]) -> IndicatorResult<Vec<Decimal>> {
        if close.len() != volume.len() {
            return Err(IndicatorError::InvalidParameter(
                "종가와 거래량 데이터의 길이가 일치하지 않습니다".to_string(),
            ));
        }

        if close.is_empty() {
            return Ok(Vec::new());
        }

        let mut result = Vec::with_capacity(close.len());
        let mut current_obv = volume[0];
        result.push(current_obv);

        for i in 1..close.len() {
            if close[i] > close[i - 1] {
                current_obv += volume[i];
            } else if close[i] < close[i - 1] {
                current_obv -= volume[i];
            }
            result.push(current_obv);
        }

        Ok(result)
    }

    /// VWAP (Volume Weighted Average Price) 계산.
    ///
    /// 누적 거래량이 0인 구간은 정의되지 않으므로 `None`입니다.
    pub fn vwap(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        volume: &[Decimal],
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let len = high.len();
        if len != low.len() || len != close.len() || len != volume.len() {
            return Err(IndicatorError::InvalidParameter(
                "고가, 저가, 종가, 거래량 데이터의 길이가 일치하지 않습니다".to_string(),
            ));
        }

        let three = Decimal::from(3);
        let mut result = Vec::with_capacity(len);
        let mut cumulative_tp_vol = Decimal::ZERO;
        let mut cumulative_vol = Decimal::ZERO;

        for i in 0..len {
            let tp = (high[i] + low[i] + close[i]) / three;
            cumulative_tp_vol += tp * volume[i];
            cumulative_vol += volume[i];

            if cumulative_vol > Decimal::ZERO {
                result.push(Some(cumulative_tp_vol / cumulative_vol));
            } else {
                result.push(None);
            }
        }

        Ok(result)
    }
}

//! 방향성 지표 (Directional Indicators).
//!
//! 추세의 존재와 강도를 측정하는 ADX / DI± 지표를 제공합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};
use crate::series;

/// ADX / DI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DirectionalParams {
    /// 평활 기간 (기본: 14).
    pub period: usize,
}

impl Default for DirectionalParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// ADX / DI 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DirectionalPoint {
    /// ADX (추세 강도).
    pub adx: Option<Decimal>,
    /// +DI (상승 방향성).
    pub di_plus: Option<Decimal>,
    /// -DI (하락 방향성).
    pub di_minus: Option<Decimal>,
}

/// 방향성 지표 계산기.
#[derive(Debug, Default)]
pub struct DirectionalIndicators;

impl DirectionalIndicators {
    /// 새로운 방향성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// ADX / DI± 계산.
    ///
    /// +DM = 고가 상승폭 (하락폭보다 크고 양수일 때만, 아니면 0)
    /// -DM = 저가 하락폭 (상승폭보다 크고 양수일 때만, 아니면 0)
    /// DI± = 100 × rolling(DM±) / rolling(TR)
    /// DX  = 100 × |DI+ - DI-| / (DI+ + DI-)
    /// ADX = DX의 rolling mean
    ///
    /// 분모가 0인 지점(TR 합 0, DI 합 0)은 `None`입니다.
    pub fn adx(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        params: DirectionalParams,
    ) -> IndicatorResult<Vec<DirectionalPoint>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        let len = high.len().min(low.len()).min(close.len());
        if len == 0 {
            return Ok(Vec::new());
        }

        // 방향성 이동: 한쪽이 강하게 우세하고 양수일 때만 인정
        let mut dm_plus: Vec<Option<Decimal>> = Vec::with_capacity(len);
        let mut dm_minus: Vec<Option<Decimal>> = Vec::with_capacity(len);
        dm_plus.push(None);
        dm_minus.push(None);

        for i in 1..len {
            let up_move = high[i] - high[i - 1];
            let down_move = low[i - 1] - low[i];

            let plus = if up_move > down_move && up_move > Decimal::ZERO {
                up_move
            } else {
                Decimal::ZERO
            };
            let minus = if down_move > up_move && down_move > Decimal::ZERO {
                down_move
            } else {
                Decimal::ZERO
            };

            dm_plus.push(Some(plus));
            dm_minus.push(Some(minus));
        }

        let tr = series::true_range(high, low, close);

        let tr_smooth = series::rolling_mean_opt(&tr, period);
        let dm_plus_smooth = series::rolling_mean_opt(&dm_plus, period);
        let dm_minus_smooth = series::rolling_mean_opt(&dm_minus, period);

        // DI± 및 DX
        let mut di_plus: Vec<Option<Decimal>> = Vec::with_capacity(len);
        let mut di_minus: Vec<Option<Decimal>> = Vec::with_capacity(len);
        let mut dx: Vec<Option<Decimal>> = Vec::with_capacity(len);

        for i in 0..len {
            let (plus, minus) =
                match (tr_smooth[i], dm_plus_smooth[i], dm_minus_smooth[i]) {
                    (Some(tr), Some(dmp), Some(dmm)) if tr > Decimal::ZERO => {
                        (Some(dec!(100) * dmp / tr), Some(dec!(100) * dmm / tr))
                    }
                    _ => (None, None),
                };

            di_plus.push(plus);
            di_minus.push(minus);

            match (plus, minus) {
                (Some(p), Some(m)) if p + m > Decimal::ZERO => {
                    dx.push(Some(dec!(100) * (p - m).abs() / (p + m)));
                }
                _ => dx.push(None),
            }
        }

        let adx = series::rolling_mean_opt(&dx, period);

        let result = (0..len)
            .map(|i| DirectionalPoint {
                adx: adx[i],
                di_plus: di_plus[i],
                di_minus: di_minus[i],
            })
            .collect();

        Ok(result)
    }
}

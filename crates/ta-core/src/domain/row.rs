//! 저장용 지표 행.
//!
//! 피처 싱크가 업서트하는 캔들 단위 행입니다. 워밍업 구간이나 분모 0으로
//! 정의되지 않는 값은 `None`으로 유지되며 JSON/DB의 null로 직렬화됩니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 캔들 하나에 대한 전체 지표 값.
///
/// 시리즈와 1:1 정렬되며, 구조 플래그는 마지막 마감 캔들 행에서만 설정됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorRow {
    /// 캔들 시작 시간
    pub ts: DateTime<Utc>,
    /// EMA 20
    pub ema_20: Option<Decimal>,
    /// EMA 50
    pub ema_50: Option<Decimal>,
    /// EMA 200
    pub ema_200: Option<Decimal>,
    /// RSI 14
    pub rsi_14: Option<Decimal>,
    /// MACD 라인
    pub macd: Option<Decimal>,
    /// MACD 시그널 라인
    pub macd_signal: Option<Decimal>,
    /// MACD 히스토그램
    pub macd_hist: Option<Decimal>,
    /// ATR 14
    pub atr_14: Option<Decimal>,
    /// 볼린저 중간 밴드
    pub bb_mid: Option<Decimal>,
    /// 볼린저 상단 밴드
    pub bb_up: Option<Decimal>,
    /// 볼린저 하단 밴드
    pub bb_dn: Option<Decimal>,
    /// 볼린저 밴드 폭
    pub bb_bw: Option<Decimal>,
    /// ADX 14
    pub adx_14: Option<Decimal>,
    /// +DI
    pub di_plus: Option<Decimal>,
    /// -DI
    pub di_minus: Option<Decimal>,
    /// OBV
    pub obv: Option<Decimal>,
    /// VWAP (세션 누적)
    pub vwap: Option<Decimal>,
    /// Higher High 플래그
    pub structure_hh: bool,
    /// Higher Low 플래그
    pub structure_hl: bool,
    /// Lower High 플래그
    pub structure_lh: bool,
    /// Lower Low 플래그
    pub structure_ll: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_serializes_none_as_null() {
        let row = IndicatorRow::default();
        let json = serde_json::to_value(&row).unwrap();

        assert!(json["ema_20"].is_null());
        assert!(json["vwap"].is_null());
        assert_eq!(json["structure_hh"], serde_json::json!(false));
    }
}

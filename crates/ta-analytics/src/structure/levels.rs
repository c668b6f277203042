//! 피벗 기반 지지/저항 레벨 감지기.
//!
//! 5캔들 피벗(양쪽 2캔들)에서 가격 레벨을 추출합니다. 이미 수락된 동종
//! 레벨의 상대 허용 오차 안에 있는 피벗은 버려집니다. 먼저 발견된 레벨이
//! 이기며, 이후의 근접 피벗은 병합/평균 없이 억제됩니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use ta_core::Candle;

/// 피벗 양쪽에 필요한 캔들 수.
pub const PIVOT_SPAN: usize = 2;

/// 중복 억제 상대 허용 오차 기본값 (2%).
pub const DEFAULT_LEVEL_TOLERANCE: Decimal = dec!(0.02);

/// 지지/저항 감지 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelParams {
    /// 동종 레벨 중복 억제 상대 허용 오차 (기본: 0.02 = 2%).
    pub tolerance: Decimal,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_LEVEL_TOLERANCE,
        }
    }
}

/// 지지/저항 레벨 감지 결과.
///
/// 저항은 오름차순, 지지는 내림차순으로 정렬됩니다. 가격이 저항 아래 /
/// 지지 위에 있다는 관례 하에 리스트 머리가 가장 가까운 레벨입니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupportResistanceLevels {
    /// 지지 레벨 (내림차순)
    pub support: Vec<Decimal>,
    /// 저항 레벨 (오름차순)
    pub resistance: Vec<Decimal>,
}

/// 지지/저항 레벨 감지기.
#[derive(Debug, Default)]
pub struct LevelDetector;

impl LevelDetector {
    /// 새로운 감지기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 피벗을 스캔하여 레벨을 추출합니다.
    ///
    /// 캔들 i는 고가가 앞뒤 2캔들의 고가를 모두 엄격히 초과하면 저항
    /// 피벗이고, 지지는 저가의 미러 조건입니다. 시리즈가 5캔들보다 짧으면
    /// 빈 결과를 반환합니다 (에러 아님).
    pub fn detect(&self, candles: &[Candle], params: &LevelParams) -> SupportResistanceLevels {
        let mut levels = SupportResistanceLevels::default();

        if candles.len() < PIVOT_SPAN * 2 + 1 {
            return levels;
        }

        for i in PIVOT_SPAN..candles.len() - PIVOT_SPAN {
            let high = candles[i].high;
            let low = candles[i].low;

            let is_resistance = (1..=PIVOT_SPAN).all(|offset| {
                high > candles[i - offset].high && high > candles[i + offset].high
            });
            if is_resistance && !Self::near_existing(&levels.resistance, high, params.tolerance) {
                levels.resistance.push(high);
            }

            let is_support = (1..=PIVOT_SPAN)
                .all(|offset| low < candles[i - offset].low && low < candles[i + offset].low);
            if is_support && !Self::near_existing(&levels.support, low, params.tolerance) {
                levels.support.push(low);
            }
        }

        levels.resistance.sort();
        levels.support.sort_by(|a, b| b.cmp(a));

        levels
    }

    /// 후보가 기존 레벨의 허용 오차 안에 있는지 확인합니다.
    fn near_existing(existing: &[Decimal], candidate: Decimal, tolerance: Decimal) -> bool {
        existing.iter().any(|&level| {
            level > Decimal::ZERO && ((candidate - level) / level).abs() < tolerance
        })
    }
}

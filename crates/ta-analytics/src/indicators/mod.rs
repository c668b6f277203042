//! 기술적 지표 모듈.
//!
//! 이 모듈은 캔들 시리즈를 지표 시리즈로 변환하는 계산기를 제공합니다.
//! 모든 지표는 캔들 시리즈와 고정 파라미터의 순수 함수이며, 출력은
//! 입력과 1:1로 정렬됩니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **EMA**: 지수 이동평균 20/50/200
//! - **MACD**: 이동평균 수렴/확산 (12, 26, 9)
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (14)
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **Bollinger Bands**: 볼린저 밴드 (20, 2σ)
//! - **ATR**: 평균 실제 범위 (14)
//!
//! ## 방향성 지표 (Directional Indicators)
//! - **ADX / DI±**: 평균 방향성 지수 (14)
//!
//! ## 거래량 지표 (Volume Indicators)
//! - **OBV**: 누적 거래량 흐름
//! - **VWAP**: 세션 누적 거래량 가중 평균 가격
//!
//! # 널 정책
//!
//! 워밍업 부족과 분모 0은 에러가 아니라 `None`입니다. 에러는 파라미터가
//! 잘못된 경우(기간 0 등)에만 발생합니다.

pub mod direction;
pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

use rust_decimal::Decimal;
use thiserror::Error;

use ta_core::CandleSeries;

pub use direction::{DirectionalIndicators, DirectionalParams, DirectionalPoint};
pub use momentum::{MomentumCalculator, RsiParams};
pub use trend::{EmaParams, MacdParams, MacdPoint, TrendIndicators};
pub use volatility::{AtrParams, BollingerParams, BollingerPoint, VolatilityIndicators};
pub use volume::VolumeIndicators;

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 오류
    #[error("계산 오류: {0}")]
    CalculationError(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 지표 배터리 파라미터.
///
/// 모든 기본값은 원 설계의 문서화된 기본값입니다
/// (EMA 20/50/200, RSI 14, MACD 12/26/9, ATR 14, 볼린저 20/2.0, ADX 14).
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorParams {
    /// 단기 EMA
    pub ema_short: EmaParams,
    /// 중기 EMA
    pub ema_mid: EmaParams,
    /// 장기 EMA
    pub ema_long: EmaParams,
    /// RSI
    pub rsi: RsiParams,
    /// MACD
    pub macd: MacdParams,
    /// ATR
    pub atr: AtrParams,
    /// 볼린저 밴드
    pub bollinger: BollingerParams,
    /// ADX / DI
    pub directional: DirectionalParams,
}

impl IndicatorParams {
    /// 문서화된 기본값 (EMA 20/50/200 포함).
    pub fn standard() -> Self {
        Self {
            ema_short: EmaParams { span: 20 },
            ema_mid: EmaParams { span: 50 },
            ema_long: EmaParams { span: 200 },
            ..Default::default()
        }
    }
}

/// 캔들 시리즈와 1:1 정렬된 전체 지표 출력.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    /// EMA (단기 span)
    pub ema_short: Vec<Decimal>,
    /// EMA (중기 span)
    pub ema_mid: Vec<Decimal>,
    /// EMA (장기 span)
    pub ema_long: Vec<Decimal>,
    /// RSI
    pub rsi: Vec<Option<Decimal>>,
    /// MACD 라인/시그널/히스토그램
    pub macd: Vec<MacdPoint>,
    /// ATR
    pub atr: Vec<Option<Decimal>>,
    /// 볼린저 밴드
    pub bollinger: Vec<BollingerPoint>,
    /// ADX / DI±
    pub directional: Vec<DirectionalPoint>,
    /// OBV
    pub obv: Vec<Decimal>,
    /// VWAP
    pub vwap: Vec<Option<Decimal>>,
}

/// 통합 지표 엔진.
///
/// 모든 기술적 지표 계산을 위한 통합 인터페이스를 제공합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
    direction: DirectionalIndicators,
    volume: VolumeIndicators,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지수 이동평균 (EMA) 계산.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Decimal>> {
        self.trend.ema(prices, params)
    }

    /// MACD 계산.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdPoint>> {
        self.trend.macd(prices, params)
    }

    /// RSI 계산.
    pub fn rsi(
        &self,
        prices: &[Decimal],
        params: RsiParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.rsi(prices, params)
    }

    /// ATR 계산.
    pub fn atr(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        params: AtrParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.volatility.atr(high, low, close, params)
    }

    /// 볼린저 밴드 계산.
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerParams,
    ) -> IndicatorResult<Vec<BollingerPoint>> {
        self.volatility.bollinger_bands(prices, params)
    }

    /// ADX / DI± 계산.
    pub fn adx(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        params: DirectionalParams,
    ) -> IndicatorResult<Vec<DirectionalPoint>> {
        self.direction.adx(high, low, close, params)
    }

    /// OBV 계산.
    pub fn obv(&self, close: &[Decimal], volume: &[Decimal]) -> IndicatorResult<Vec<Decimal>> {
        self.volume.obv(close, volume)
    }

    /// VWAP 계산.
    pub fn vwap(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        volume: &[Decimal],
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.volume.vwap(high, low, close, volume)
    }

    /// 전체 지표 배터리를 한 번에 계산합니다.
    pub fn compute_all(
        &self,
        series: &CandleSeries,
        params: &IndicatorParams,
    ) -> IndicatorResult<IndicatorSet> {
        let highs = series.highs();
        let lows = series.lows();
        let closes = series.closes();
        let volumes = series.volumes();

        Ok(IndicatorSet {
            ema_short: self.ema(&closes, params.ema_short)?,
            ema_mid: self.ema(&closes, params.ema_mid)?,
            ema_long: self.ema(&closes, params.ema_long)?,
            rsi: self.rsi(&closes, params.rsi)?,
            macd: self.macd(&closes, params.macd)?,
            atr: self.atr(&highs, &lows, &closes, params.atr)?,
            bollinger: self.bollinger_bands(&closes, params.bollinger)?,
            directional: self.adx(&highs, &lows, &closes, params.directional)?,
            obv: self.obv(&closes, &volumes)?,
            vwap: self.vwap(&highs, &lows, &closes, &volumes)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use ta_core::Candle;

    fn rising_series(count: usize) -> CandleSeries {
        let candles = (0..count)
            .map(|i| {
                let ts = Utc
                    .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                    .unwrap()
                    + chrono::Duration::minutes(i as i64 * 15);
                let close = Decimal::from(100 + i as i64);
                Candle::new(
                    ts,
                    close - dec!(1),
                    close + dec!(1),
                    close - dec!(2),
                    close,
                    dec!(1000),
                )
            })
            .collect();
        CandleSeries::new(candles).unwrap()
    }

    #[test]
    fn test_compute_all_alignment() {
        let engine = IndicatorEngine::new();
        let series = rising_series(60);

        let set = engine
            .compute_all(&series, &IndicatorParams::standard())
            .unwrap();

        assert_eq!(set.ema_short.len(), 60);
        assert_eq!(set.ema_long.len(), 60);
        assert_eq!(set.rsi.len(), 60);
        assert_eq!(set.macd.len(), 60);
        assert_eq!(set.atr.len(), 60);
        assert_eq!(set.bollinger.len(), 60);
        assert_eq!(set.directional.len(), 60);
        assert_eq!(set.obv.len(), 60);
        assert_eq!(set.vwap.len(), 60);
    }

    #[test]
    fn test_compute_all_short_series_is_null_not_error() {
        let engine = IndicatorEngine::new();
        let series = rising_series(3);

        // 워밍업 부족은 에러가 아니라 None
        let set = engine
            .compute_all(&series, &IndicatorParams::standard())
            .unwrap();

        assert!(set.rsi.iter().all(|v| v.is_none()));
        assert!(set.atr.iter().all(|v| v.is_none()));
        assert!(set.bollinger.iter().all(|b| b.mid.is_none()));
        // EMA는 첫 값을 시드로 하므로 항상 정의됨
        assert_eq!(set.ema_short[0], dec!(100));
    }
}

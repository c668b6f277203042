//! 다중 타임프레임 오케스트레이터.
//!
//! 요청된 타임프레임 목록을 호출자 지정 순서대로 순회하며, 타임프레임마다
//! 지표 배터리 → 구조 감지 → 레코드 조립을 독립적으로 수행합니다.
//! 타임프레임 간 공유 상태는 없으므로 계산은 자연스럽게 병렬화 가능하지만
//! 정확성은 이를 요구하지 않습니다.

use chrono::{DateTime, Utc};

use ta_core::{CandleSeries, IndicatorRow, Timeframe};

use crate::indicators::{IndicatorEngine, IndicatorParams, IndicatorResult};
use crate::snapshot::{FeatureRecord, Snapshot, StructureFlags};
use crate::structure::{
    ElliottWaveAnalyzer, FibonacciCalculator, LevelDetector, LevelParams, OrderBlockDetector,
    OrderBlockParams,
};

/// 파이프라인 전체 파라미터.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisParams {
    /// 지표 배터리 파라미터
    pub indicators: IndicatorParams,
    /// 오더 블록 파라미터
    pub order_blocks: OrderBlockParams,
    /// 지지/저항 파라미터
    pub levels: LevelParams,
}

impl AnalysisParams {
    /// 문서화된 기본값 (EMA 20/50/200 포함).
    pub fn standard() -> Self {
        Self {
            indicators: IndicatorParams::standard(),
            ..Default::default()
        }
    }
}

/// 스냅샷 빌더.
///
/// 상태가 없는 순수 배치 변환기입니다. 요청마다 자신의 캔들 시리즈 위에서
/// 동작하며 계산 외의 부수 효과가 없습니다.
#[derive(Debug)]
pub struct SnapshotBuilder {
    engine: IndicatorEngine,
    order_blocks: OrderBlockDetector,
    levels: LevelDetector,
    fibonacci: FibonacciCalculator,
    elliott: ElliottWaveAnalyzer,
    params: AnalysisParams,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    /// 기본 파라미터로 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::with_params(AnalysisParams::standard())
    }

    /// 지정 파라미터로 빌더를 생성합니다.
    pub fn with_params(params: AnalysisParams) -> Self {
        Self {
            engine: IndicatorEngine::new(),
            order_blocks: OrderBlockDetector::new(),
            levels: LevelDetector::new(),
            fibonacci: FibonacciCalculator::new(),
            elliott: ElliottWaveAnalyzer::new(),
            params,
        }
    }

    /// 타임프레임 하나의 피처 레코드를 계산합니다.
    pub fn feature_record(&self, series: &CandleSeries) -> IndicatorResult<FeatureRecord> {
        let indicators = self.engine.compute_all(series, &self.params.indicators)?;
        let candles = series.as_slice();

        let order_blocks = self.order_blocks.detect(candles, &self.params.order_blocks);
        let support_resistance = self.levels.detect(candles, &self.params.levels);
        let fibonacci = self.fibonacci.retracements(candles);
        let waves = self.elliott.analyze(candles);

        tracing::debug!(
            candles = series.len(),
            bullish_blocks = order_blocks.bullish.len(),
            bearish_blocks = order_blocks.bearish.len(),
            wave_count = waves.wave_count,
            "구조 패턴 감지 완료"
        );

        Ok(FeatureRecord::assemble(
            series,
            &indicators,
            order_blocks,
            support_resistance,
            fibonacci,
            &waves,
        ))
    }

    /// 타임프레임별 시리즈로 결합 스냅샷을 생성합니다.
    ///
    /// `series_by_tf`의 순서가 계산 순서이며, 결과는 타임프레임 레이블을
    /// 키로 하는 맵에 담깁니다.
    pub fn build_snapshot(
        &self,
        symbol: impl Into<String>,
        series_by_tf: &[(Timeframe, CandleSeries)],
    ) -> IndicatorResult<Snapshot> {
        self.build_snapshot_at(symbol, series_by_tf, Utc::now())
    }

    /// 생성 시각을 지정하여 스냅샷을 생성합니다 (테스트 용이성).
    pub fn build_snapshot_at(
        &self,
        symbol: impl Into<String>,
        series_by_tf: &[(Timeframe, CandleSeries)],
        generated_at: DateTime<Utc>,
    ) -> IndicatorResult<Snapshot> {
        let symbol = symbol.into();
        let mut features = std::collections::HashMap::with_capacity(series_by_tf.len());

        for (timeframe, series) in series_by_tf {
            tracing::debug!(%symbol, timeframe = %timeframe, candles = series.len(), "타임프레임 분석");
            let record = self.feature_record(series)?;
            features.insert(*timeframe, record);
        }

        Ok(Snapshot {
            symbol,
            generated_at,
            features,
        })
    }

    /// 피처 싱크 저장용 캔들 단위 지표 행을 계산합니다.
    ///
    /// 구조 플래그는 마지막 마감 캔들 행에만 설정됩니다.
    pub fn compute_rows(&self, series: &CandleSeries) -> IndicatorResult<Vec<IndicatorRow>> {
        let indicators = self.engine.compute_all(series, &self.params.indicators)?;
        let flags = StructureFlags::from_series(series);
        let flag_index = series.last_closed_index();

        let rows = series
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, candle)| {
                let macd = indicators.macd.get(i);
                let bb = indicators.bollinger.get(i);
                let directional = indicators.directional.get(i);
                let on_last_closed = i == flag_index && series.len() >= 3;

                IndicatorRow {
                    ts: candle.ts,
                    ema_20: indicators.ema_short.get(i).copied(),
                    ema_50: indicators.ema_mid.get(i).copied(),
                    ema_200: indicators.ema_long.get(i).copied(),
                    rsi_14: indicators.rsi.get(i).copied().flatten(),
                    macd: macd.map(|m| m.macd),
                    macd_signal: macd.map(|m| m.signal),
                    macd_hist: macd.map(|m| m.histogram),
                    atr_14: indicators.atr.get(i).copied().flatten(),
                    bb_mid: bb.and_then(|b| b.mid),
                    bb_up: bb.and_then(|b| b.upper),
                    bb_dn: bb.and_then(|b| b.lower),
                    bb_bw: bb.and_then(|b| b.bandwidth),
                    adx_14: directional.and_then(|d| d.adx),
                    di_plus: directional.and_then(|d| d.di_plus),
                    di_minus: directional.and_then(|d| d.di_minus),
                    obv: indicators.obv.get(i).copied(),
                    vwap: indicators.vwap.get(i).copied().flatten(),
                    structure_hh: on_last_closed && flags.hh,
                    structure_hl: on_last_closed && flags.hl,
                    structure_lh: on_last_closed && flags.lh,
                    structure_ll: on_last_closed && flags.ll,
                }
            })
            .collect();

        Ok(rows)
    }
}

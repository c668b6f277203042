//! # TA Analytics
//!
//! 지표 및 구조 패턴 계산 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 시리즈 수치 커널 (EMA, rolling 통계, True Range)
//! - 기술적 지표 배터리 (EMA/RSI/MACD/ATR/볼린저/ADX/OBV/VWAP)
//! - 구조 패턴 감지기 (오더 블록, 지지/저항, 피보나치, 엘리엇 파동)
//! - 스냅샷 조립 및 다중 타임프레임 오케스트레이션
//!
//! 데이터는 한 방향으로만 흐릅니다:
//! 캔들 → 지표 시리즈 → 구조 결과 → 타임프레임별 레코드 → 결합 스냅샷.
//!
//! # 사용 예시
//!
//! ```ignore
//! use ta_analytics::SnapshotBuilder;
//! use ta_core::{CandleSeries, Timeframe};
//!
//! let builder = SnapshotBuilder::new();
//! let snapshot = builder.build_snapshot("HYPEUSDT", &[(Timeframe::H1, series)])?;
//! println!("{}", snapshot.to_json_pretty()?);
//! ```

pub mod indicators;
pub mod multi_timeframe;
pub mod series;
pub mod snapshot;
pub mod structure;

// Indicators 모듈 re-exports
pub use indicators::{
    AtrParams,
    // 볼린저 밴드
    BollingerParams,
    BollingerPoint,
    // 방향성 지표
    DirectionalIndicators,
    DirectionalParams,
    DirectionalPoint,
    EmaParams,
    IndicatorEngine,
    IndicatorError,
    IndicatorParams,
    IndicatorResult,
    IndicatorSet,
    MacdParams,
    MacdPoint,
    // 모멘텀 지표
    MomentumCalculator,
    RsiParams,
    // 추세 지표
    TrendIndicators,
    // 변동성 지표
    VolatilityIndicators,
    // 거래량 지표
    VolumeIndicators,
};

// Structure 모듈 re-exports
pub use structure::{
    ElliottWaveAnalyzer, FibLevel, FibonacciCalculator, FibonacciLevels, LevelDetector,
    LevelParams, OrderBlock, OrderBlockDetector, OrderBlockFindings, OrderBlockParams, SwingKind,
    SwingPoint, SupportResistanceLevels, WaveAnalysis, WaveDirection, WavePattern, WaveSegment,
};

// Snapshot re-exports
pub use snapshot::{
    BollingerSnapshot, ElliottSummary, FeatureRecord, MacdSnapshot, Snapshot, StructureFlags,
};

// Orchestrator re-exports
pub use multi_timeframe::{AnalysisParams, SnapshotBuilder};

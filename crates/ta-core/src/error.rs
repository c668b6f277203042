//! 분석 엔진의 에러 타입.
//!
//! 이 모듈은 시리즈 검증 실패와 협력자 경계에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 캔들 시리즈 구조 위반 에러.
///
/// 호출자가 제공한 데이터의 구조적 결함만 해당합니다.
/// 개별 지표의 워밍업 부족은 에러가 아니라 `None` 값으로 처리됩니다.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    /// 빈 시리즈
    #[error("캔들 시리즈가 비어 있습니다")]
    Empty,

    /// 타임스탬프 역전 또는 중복
    #[error("타임스탬프가 단조 증가하지 않습니다: 인덱스 {index}")]
    NonMonotonicTimestamps { index: usize },
}

/// 핵심 분석 에러.
#[derive(Debug, Error)]
pub enum TaError {
    /// 캔들 시리즈 구조 에러
    #[error("시리즈 에러: {0}")]
    Series(#[from] SeriesError),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 캔들 소스 에러
    #[error("캔들 소스 에러: {0}")]
    Source(String),

    /// 피처 싱크 에러
    #[error("피처 싱크 에러: {0}")]
    Sink(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 분석 작업을 위한 Result 타입.
pub type TaResult<T> = Result<T, TaError>;

impl TaError {
    /// 호출자 데이터 결함(재시도 무의미)인지 확인합니다.
    pub fn is_input_error(&self) -> bool {
        matches!(self, TaError::Series(_) | TaError::Config(_))
    }
}

impl From<serde_json::Error> for TaError {
    fn from(err: serde_json::Error) -> Self {
        TaError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TaError {
    fn from(err: config::ConfigError) -> Self {
        TaError::Config(err.to_string())
    }
}

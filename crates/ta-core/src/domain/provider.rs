//! 외부 협력자 추상화.
//!
//! 엔진은 순수 배치 변환이므로 캔들을 어디서 가져오고 결과를 어디에
//! 저장하는지 알지 못합니다. 이 모듈은 그 경계의 trait를 정의합니다:
//! - `CandleSource` - (심볼, 타임프레임, lookback, 카테고리)에 대한 캔들 공급자
//! - `FeatureSink` - 원시 캔들과 계산된 지표 행을 받는 선택적 저장소

use async_trait::async_trait;

use crate::domain::{Candle, IndicatorRow};
use crate::error::TaResult;
use crate::types::{MarketCategory, Symbol, Timeframe};

/// 스냅샷 한 건을 만들기 위한 요청.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// 분석 대상 심볼
    pub symbol: Symbol,
    /// 요청 타임프레임 목록 (호출자 지정 순서 유지)
    pub timeframes: Vec<Timeframe>,
    /// 타임프레임당 조회할 캔들 수
    pub lookback: usize,
    /// 거래소 시장 카테고리 (캔들 소스가 사용)
    pub category: MarketCategory,
}

impl AnalysisRequest {
    /// 새 요청을 생성합니다.
    pub fn new(
        symbol: Symbol,
        timeframes: Vec<Timeframe>,
        lookback: usize,
        category: MarketCategory,
    ) -> Self {
        Self {
            symbol,
            timeframes,
            lookback,
            category,
        }
    }
}

/// 캔들 공급자 trait.
///
/// 시간 오름차순으로 정렬된 캔들 시퀀스를 반환해야 합니다. 인증, 재시도,
/// 타임아웃은 모두 구현체의 책임입니다.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// 지정 조건의 캔들을 조회합니다.
    ///
    /// # Errors
    ///
    /// - `TaError::Source`: 조회 실패 (네트워크, API 에러 등)
    async fn fetch(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        lookback: usize,
        category: MarketCategory,
    ) -> TaResult<Vec<Candle>>;
}

/// 피처 저장소 trait.
///
/// 저장은 선택적이며, 연결 관리/청크 분할/재시도는 구현체의 책임입니다.
#[async_trait]
pub trait FeatureSink: Send + Sync {
    /// 원시 캔들을 저장합니다.
    async fn store_candles(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        candles: &[Candle],
    ) -> TaResult<()>;

    /// 계산된 지표 행을 저장합니다.
    async fn store_rows(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        rows: &[IndicatorRow],
    ) -> TaResult<()>;
}

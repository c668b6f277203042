//! OHLCV 캔들 및 검증된 캔들 시리즈.
//!
//! 이 모듈은 시장 데이터의 기본 단위를 정의합니다:
//! - `Candle` - 단일 OHLCV 관측값
//! - `CandleSeries` - 시간 순 정렬이 보장된 캔들 시퀀스

use crate::error::SeriesError;
use crate::types::{Price, Quantity};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLCV 캔들 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// 캔들 시작 시간
    pub ts: DateTime<Utc>,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량 (기준 자산 단위)
    pub volume: Quantity,
}

impl Candle {
    /// 새 캔들을 생성합니다.
    pub fn new(
        ts: DateTime<Utc>,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Quantity,
    ) -> Self {
        Self {
            ts,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 캔들 몸통 크기(절대값)를 반환합니다.
    pub fn body_size(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가)인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// 대표가(고가+저가+종가 평균)를 반환합니다.
    pub fn typical_price(&self) -> Decimal {
        (self.high + self.low + self.close) / Decimal::from(3)
    }
}

/// 시간 순 정렬이 검증된 캔들 시퀀스.
///
/// 불변식: 비어 있지 않고, 타임스탬프가 엄격히 증가합니다.
/// 생성 시 한 번 검증되며 이후에는 변경되지 않습니다.
///
/// 라이브 조회로 얻은 시리즈의 마지막 캔들은 아직 진행 중인 캔들이므로,
/// 스냅샷은 마지막 *마감* 캔들(길이 ≥ 2이면 끝에서 두 번째)을 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// 캔들 벡터를 검증하여 시리즈를 생성합니다.
    ///
    /// # Errors
    ///
    /// - `SeriesError::Empty`: 캔들이 하나도 없는 경우
    /// - `SeriesError::NonMonotonicTimestamps`: 타임스탬프 역전/중복
    pub fn new(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        if candles.is_empty() {
            return Err(SeriesError::Empty);
        }

        for i in 1..candles.len() {
            if candles[i].ts <= candles[i - 1].ts {
                return Err(SeriesError::NonMonotonicTimestamps { index: i });
            }
        }

        Ok(Self { candles })
    }

    /// 캔들 개수를 반환합니다.
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// 항상 false입니다 (빈 시리즈는 생성되지 않음).
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// 캔들 슬라이스를 반환합니다.
    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    /// 지정 인덱스의 캔들을 반환합니다.
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// 마지막 *마감* 캔들의 인덱스를 반환합니다.
    ///
    /// 길이 ≥ 2이면 끝에서 두 번째, 길이 1이면 유일한 캔들입니다.
    pub fn last_closed_index(&self) -> usize {
        if self.candles.len() >= 2 {
            self.candles.len() - 2
        } else {
            0
        }
    }

    /// 마지막 마감 캔들을 반환합니다.
    pub fn last_closed(&self) -> &Candle {
        &self.candles[self.last_closed_index()]
    }

    /// 시가 컬럼을 반환합니다.
    pub fn opens(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.open).collect()
    }

    /// 고가 컬럼을 반환합니다.
    pub fn highs(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.high).collect()
    }

    /// 저가 컬럼을 반환합니다.
    pub fn lows(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.low).collect()
    }

    /// 종가 컬럼을 반환합니다.
    pub fn closes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// 거래량 컬럼을 반환합니다.
    pub fn volumes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

impl AsRef<[Candle]> for CandleSeries {
    fn as_ref(&self) -> &[Candle] {
        &self.candles
    }
}

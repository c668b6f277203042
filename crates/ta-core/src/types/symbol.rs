//! 심볼 및 시장 카테고리 정의.
//!
//! 이 모듈은 분석 대상 상품 관련 타입을 정의합니다:
//! - `MarketCategory` - 거래소 시장 카테고리 (현물, 선형/인버스 선물)
//! - `Symbol` - 기준/호가 자산 쌍

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 거래소 시장 카테고리.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCategory {
    /// 현물 시장
    Spot,
    /// USDT 무기한 선물 (선형)
    Linear,
    /// 코인 마진 선물 (인버스)
    Inverse,
}

impl Default for MarketCategory {
    fn default() -> Self {
        Self::Spot
    }
}

impl fmt::Display for MarketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketCategory::Spot => write!(f, "spot"),
            MarketCategory::Linear => write!(f, "linear"),
            MarketCategory::Inverse => write!(f, "inverse"),
        }
    }
}

impl FromStr for MarketCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spot" => Ok(Self::Spot),
            "linear" => Ok(Self::Linear),
            "inverse" => Ok(Self::Inverse),
            _ => Err(format!("Unknown market category: {}", s)),
        }
    }
}

/// 분석 대상 상품을 나타내는 심볼.
///
/// 기준 자산과 호가 자산으로 구성됩니다. 예: BTC/USDT, HYPE/USDT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// 기준 자산 (예: BTC, HYPE)
    pub base: String,
    /// 호가 자산 (예: USDT, USD)
    pub quote: String,
}

impl Symbol {
    /// 새 심볼을 생성합니다.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    /// "BASE/QUOTE" 형식 문자열에서 심볼을 파싱합니다.
    pub fn from_pair(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            Some(Self::new(parts[0], parts[1]))
        } else {
            None
        }
    }

    /// 거래소 요청 형식을 반환합니다 (구분자 없이 연결, 예: "HYPEUSDT").
    pub fn to_exchange_string(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

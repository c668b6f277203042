//! 설정 관리.
//!
//! 기본값 → TOML 파일 → `TA__` 접두사 환경 변수 순서로 병합됩니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::{MarketCategory, Timeframe};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 기본 분석 심볼 (거래소 형식, 예: "HYPEUSDT")
    pub symbol: String,
    /// 기본 타임프레임 목록
    pub timeframes: Vec<Timeframe>,
    /// 타임프레임당 조회 캔들 수
    pub lookback: usize,
    /// 거래소 시장 카테고리
    pub category: MarketCategory,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: "HYPEUSDT".to_string(),
            timeframes: vec![
                Timeframe::M15,
                Timeframe::H1,
                Timeframe::H4,
                Timeframe::D1,
            ],
            lookback: 300,
            category: MarketCategory::Spot,
            logging: LoggingConfig::default(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값 + 환경 변수만 사용됩니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("symbol", "HYPEUSDT")?
            .set_default(
                "timeframes",
                vec![
                    "15m".to_string(),
                    "1h".to_string(),
                    "4h".to_string(),
                    "1d".to_string(),
                ],
            )?
            .set_default("lookback", 300)?
            .set_default("category", "spot")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드 (선택)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("TA")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

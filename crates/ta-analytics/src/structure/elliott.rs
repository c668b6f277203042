//! 단순화된 엘리엇 파동 휴리스틱.
//!
//! 이웃 캔들 대비 극값인 스윙 포인트를 추출하고, 연속한 스윙 포인트를
//! 파동 세그먼트로 연결하여 1..5 순환 번호를 부여합니다. 신뢰도 점수는
//! 문서화된 두 가지 검사만 누적합니다:
//! - 3번 파동이 1/3/5 중 가장 길다 (+0.3)
//! - 4번 파동이 1번 파동의 종점을 넘어 되돌리지 않는다 (+0.2)
//!
//! 이는 검증된 엘리엇 파동 문법이 아니라 휴리스틱 채점기이며, 새로운
//! 요구사항 없이 위 두 규칙 이상으로 강화해서는 안 됩니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use ta_core::Candle;

/// 패턴 분류에 필요한 최소 세그먼트 수.
pub const MIN_WAVES_FOR_PATTERN: usize = 5;

/// "3번 파동 최장" 검사 가산점.
pub const WAVE_THREE_BONUS: Decimal = dec!(0.3);

/// "4번 파동 비침범" 검사 가산점.
pub const WAVE_FOUR_BONUS: Decimal = dec!(0.2);

/// 임펄스 분류 임계값 (초과 시 임펄스).
pub const IMPULSE_THRESHOLD: Decimal = dec!(0.3);

/// 스윙 포인트 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingKind {
    /// 스윙 고점
    High,
    /// 스윙 저점
    Low,
}

/// 스윙 포인트 (이웃 대비 국소 극값).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SwingPoint {
    /// 캔들 인덱스
    pub index: usize,
    /// 극값 가격 (고점이면 고가, 저점이면 저가)
    pub price: Decimal,
    /// 종류
    pub kind: SwingKind,
}

/// 파동 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveDirection {
    /// 상승 파동
    Up,
    /// 하락 파동
    Down,
}

/// 파동 세그먼트 (연속한 두 스윙 포인트 사이).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveSegment {
    /// 순환 파동 번호 (1..5)
    pub wave_number: u8,
    /// 시작 캔들 인덱스
    pub start_index: usize,
    /// 종료 캔들 인덱스
    pub end_index: usize,
    /// 시작 가격
    pub start_price: Decimal,
    /// 종료 가격
    pub end_price: Decimal,
    /// 방향
    pub direction: WaveDirection,
    /// 가격 길이 (절대값)
    pub length: Decimal,
    /// 캔들 수 기준 지속 기간
    pub duration: usize,
}

/// 파동 패턴 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WavePattern {
    /// 임펄스 (추진 파동 구조)
    Impulse,
    /// 조정 파동 구조
    Corrective,
    /// 분류 불가 (세그먼트 부족)
    Unknown,
}

/// 파동 분석 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveAnalysis {
    /// 패턴 분류
    pub pattern: WavePattern,
    /// 신뢰도 (0.0 ~ 0.5)
    pub confidence: Decimal,
    /// 전체 세그먼트 수
    pub wave_count: usize,
    /// 마지막 세그먼트의 파동 번호 (세그먼트 없으면 None)
    pub current_wave: Option<u8>,
    /// 파동 세그먼트
    pub segments: Vec<WaveSegment>,
}

impl WaveAnalysis {
    fn unknown(segments: Vec<WaveSegment>) -> Self {
        let current_wave = segments.last().map(|s| s.wave_number);
        Self {
            pattern: WavePattern::Unknown,
            confidence: Decimal::ZERO,
            wave_count: segments.len(),
            current_wave,
            segments,
        }
    }
}

/// 엘리엇 파동 분석기.
#[derive(Debug, Default)]
pub struct ElliottWaveAnalyzer;

impl ElliottWaveAnalyzer {
    /// 새로운 분석기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 스윙 포인트를 추출합니다.
    ///
    /// 양쪽 이웃의 고가가 모두 낮으면 스윙 고점, 저가의 미러 조건이면
    /// 스윙 저점입니다. 같은 종류가 연달아 나오면 먼저 발견된 포인트를
    /// 유지하여 고점/저점이 교대하도록 만듭니다.
    pub fn swing_points(&self, candles: &[Candle]) -> Vec<SwingPoint> {
        let mut swings: Vec<SwingPoint> = Vec::new();

        if candles.len() < 3 {
            return swings;
        }

        for i in 1..candles.len() - 1 {
            let is_high = candles[i].high > candles[i - 1].high
                && candles[i].high > candles[i + 1].high;
            let is_low =
                candles[i].low < candles[i - 1].low && candles[i].low < candles[i + 1].low;

            // 같은 캔들이 고점과 저점 둘 다인 경우는 모호하므로 건너뜀
            let kind = match (is_high, is_low) {
                (true, false) => SwingKind::High,
                (false, true) => SwingKind::Low,
                _ => continue,
            };

            if swings.last().map(|s| s.kind) == Some(kind) {
                continue;
            }

            let price = match kind {
                SwingKind::High => candles[i].high,
                SwingKind::Low => candles[i].low,
            };

            swings.push(SwingPoint {
                index: i,
                price,
                kind,
            });
        }

        swings
    }

    /// 파동 세그먼트를 구성하고 패턴을 분류합니다.
    pub fn analyze(&self, candles: &[Candle]) -> WaveAnalysis {
        let swings = self.swing_points(candles);
        let segments = Self::build_segments(&swings);

        if segments.len() < MIN_WAVES_FOR_PATTERN {
            return WaveAnalysis::unknown(segments);
        }

        // 가장 최근의 완결된 5개 세그먼트를 1..5번 파동으로 검사
        let window = &segments[segments.len() - MIN_WAVES_FOR_PATTERN..];
        let mut confidence = Decimal::ZERO;

        // 검사 1: 3번 파동이 1/3/5 중 최장
        if window[2].length > window[0].length && window[2].length > window[4].length {
            confidence += WAVE_THREE_BONUS;
        }

        // 검사 2: 4번 파동이 1번 파동의 종점을 침범하지 않음
        let wave_four_holds = match window[0].direction {
            WaveDirection::Up => window[3].end_price > window[0].end_price,
            WaveDirection::Down => window[3].end_price < window[0].end_price,
        };
        if wave_four_holds {
            confidence += WAVE_FOUR_BONUS;
        }

        let pattern = if confidence > IMPULSE_THRESHOLD {
            WavePattern::Impulse
        } else {
            WavePattern::Corrective
        };

        let current_wave = segments.last().map(|s| s.wave_number);

        WaveAnalysis {
            pattern,
            confidence,
            wave_count: segments.len(),
            current_wave,
            segments,
        }
    }

    /// 연속한 스윙 포인트 쌍을 세그먼트로 변환합니다.
    fn build_segments(swings: &[SwingPoint]) -> Vec<WaveSegment> {
        swings
            .windows(2)
            .enumerate()
            .map(|(k, pair)| {
                let (start, end) = (&pair[0], &pair[1]);
                let direction = if end.price > start.price {
                    WaveDirection::Up
                } else {
                    WaveDirection::Down
                };

                WaveSegment {
                    wave_number: (k % 5) as u8 + 1,
                    start_index: start.index,
                    end_index: end.index,
                    start_price: start.price,
                    end_price: end.price,
                    direction,
                    length: (end.price - start.price).abs(),
                    duration: end.index - start.index,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn candle(i: usize, high: Decimal, low: Decimal) -> Candle {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::minutes(i as i64 * 15);
        let mid = (high + low) / Decimal::TWO;
        Candle::new(ts, mid, high, low, mid, dec!(1000))
    }

    /// 지그재그 가격 경로로 캔들을 만듭니다. 각 값은 그 지점의 중심가이며
    /// 고가/저가는 ±1입니다.
    fn zigzag(path: &[Decimal]) -> Vec<Candle> {
        path.iter()
            .enumerate()
            .map(|(i, &p)| candle(i, p + dec!(1), p - dec!(1)))
            .collect()
    }

    #[test]
    fn test_swing_points_alternate() {
        let candles = zigzag(&[
            dec!(100),
            dec!(110), // 고점
            dec!(105),
            dec!(95), // 저점
            dec!(100),
            dec!(115), // 고점
            dec!(108),
        ]);
        let analyzer = ElliottWaveAnalyzer::new();

        let swings = analyzer.swing_points(&candles);

        assert_eq!(swings.len(), 3);
        assert_eq!(swings[0].kind, SwingKind::High);
        assert_eq!(swings[1].kind, SwingKind::Low);
        assert_eq!(swings[2].kind, SwingKind::High);
        assert_eq!(swings[0].price, dec!(111));
        assert_eq!(swings[1].price, dec!(94));
    }

    #[test]
    fn test_too_few_swings_is_unknown() {
        let candles = zigzag(&[dec!(100), dec!(110), dec!(105)]);
        let analyzer = ElliottWaveAnalyzer::new();

        let analysis = analyzer.analyze(&candles);

        assert_eq!(analysis.pattern, WavePattern::Unknown);
        assert_eq!(analysis.confidence, Decimal::ZERO);
        assert_eq!(analysis.wave_count, 0);
        assert_eq!(analysis.current_wave, None);
    }

    #[test]
    fn test_impulse_classification() {
        // 상승 임펄스: 초기 저점 이후 긴 3번 파동, 4번 파동이 1번 종점 위에서 마감
        // 스윙: 저점 99 → 고점 121 → 저점 111 → 고점 151 → 저점 134 → 고점 161
        let candles = zigzag(&[
            dec!(105),
            dec!(100), // 초기 저점
            dec!(120), // 파동1 종점
            dec!(112), // 파동2 종점
            dec!(150), // 파동3 종점
            dec!(135), // 파동4 종점
            dec!(160), // 파동5 종점
            dec!(140),
        ]);
        let analyzer = ElliottWaveAnalyzer::new();

        let analysis = analyzer.analyze(&candles);

        assert_eq!(analysis.wave_count, 5);
        assert_eq!(analysis.pattern, WavePattern::Impulse);
        assert_eq!(analysis.confidence, dec!(0.5));
        assert_eq!(analysis.current_wave, Some(5));
    }

    #[test]
    fn test_corrective_when_wave_three_short() {
        // 3번 파동이 짧고 4번 파동이 1번 파동 종점 아래로 침범
        let candles = zigzag(&[
            dec!(105),
            dec!(100),
            dec!(140),
            dec!(110),
            dec!(125),
            dec!(104),
            dec!(130),
            dec!(120),
        ]);
        let analyzer = ElliottWaveAnalyzer::new();

        let analysis = analyzer.analyze(&candles);

        assert_eq!(analysis.pattern, WavePattern::Corrective);
        assert_eq!(analysis.confidence, Decimal::ZERO);
    }

    #[test]
    fn test_wave_numbers_cycle() {
        // 스윙 8개 → 세그먼트 7개, 번호 1..5 후 1..2 반복
        let candles = zigzag(&[
            dec!(100),
            dec!(120),
            dec!(110),
            dec!(130),
            dec!(115),
            dec!(140),
            dec!(125),
            dec!(150),
            dec!(135),
            dec!(160),
            dec!(130),
        ]);
        let analyzer = ElliottWaveAnalyzer::new();

        let analysis = analyzer.analyze(&candles);

        assert_eq!(analysis.wave_count, 8);
        let numbers: Vec<u8> = analysis.segments.iter().map(|s| s.wave_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 1, 2, 3]);
    }
}

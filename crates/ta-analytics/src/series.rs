//! 시리즈 수치 커널.
//!
//! 시간 순으로 정렬된 Decimal 시퀀스에 대한 재사용 가능한 기본 연산을
//! 제공합니다. 모든 커널은 인과적입니다: 인덱스 i의 출력은 인덱스 ≤ i의
//! 입력에만 의존합니다.
//!
//! 워밍업이 부족한 구간은 `None`으로 표현됩니다. 호출자는 이를 "아직 없음"
//! 으로 취급해야 하며 0으로 대체해서는 안 됩니다.

use rust_decimal::Decimal;

/// 지수 이동평균 (EMA) 계산.
///
/// EMA = (현재값 × α) + (이전 EMA × (1 - α)), α = 2 / (span + 1)
///
/// 첫 값을 시드로 사용하므로 모든 인덱스에서 정의됩니다:
/// `ema(values, span)[0] == values[0]`.
pub fn ema(values: &[Decimal], span: usize) -> Vec<Decimal> {
    debug_assert!(span >= 1, "span은 1 이상이어야 합니다");

    if values.is_empty() {
        return Vec::new();
    }

    let alpha = Decimal::TWO / Decimal::from(span + 1);
    let one_minus_alpha = Decimal::ONE - alpha;

    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    result.push(prev);

    for value in values.iter().skip(1) {
        prev = (*value * alpha) + (prev * one_minus_alpha);
        result.push(prev);
    }

    result
}

/// 단순 이동평균 (rolling mean) 계산.
///
/// 인덱스 i < window − 1 구간은 `None`입니다.
pub fn rolling_mean(values: &[Decimal], window: usize) -> Vec<Option<Decimal>> {
    debug_assert!(window >= 1, "window는 1 이상이어야 합니다");

    let window_decimal = Decimal::from(window);
    let mut result = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        if i + 1 < window {
            result.push(None);
        } else {
            let sum: Decimal = values[i + 1 - window..=i].iter().sum();
            result.push(Some(sum / window_decimal));
        }
    }

    result
}

/// 표본 표준편차 (rolling std, ddof = 1) 계산.
///
/// window < 2이면 분모가 0이므로 전 구간 `None`입니다.
pub fn rolling_std(values: &[Decimal], window: usize) -> Vec<Option<Decimal>> {
    if window < 2 {
        return vec![None; values.len()];
    }

    let window_decimal = Decimal::from(window);
    let ddof_decimal = Decimal::from(window - 1);
    let mut result = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        if i + 1 < window {
            result.push(None);
        } else {
            let slice = &values[i + 1 - window..=i];
            let mean: Decimal = slice.iter().sum::<Decimal>() / window_decimal;
            let variance: Decimal = slice
                .iter()
                .map(|&v| {
                    let diff = v - mean;
                    diff * diff
                })
                .sum::<Decimal>()
                / ddof_decimal;
            result.push(Some(sqrt_decimal(variance)));
        }
    }

    result
}

/// 선택적 시리즈에 대한 rolling mean.
///
/// 윈도우 안에 `None`이 하나라도 있으면 결과도 `None`입니다
/// (pandas `rolling().mean()`과 동일한 전파 규칙).
pub fn rolling_mean_opt(values: &[Option<Decimal>], window: usize) -> Vec<Option<Decimal>> {
    debug_assert!(window >= 1, "window는 1 이상이어야 합니다");

    let window_decimal = Decimal::from(window);
    let mut result = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        if i + 1 < window {
            result.push(None);
            continue;
        }

        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_none()) {
            result.push(None);
        } else {
            let sum: Decimal = slice.iter().flatten().sum();
            result.push(Some(sum / window_decimal));
        }
    }

    result
}

/// True Range 계산.
///
/// TR = max(고가 − 저가, |고가 − 전일종가|, |저가 − 전일종가|)
///
/// 첫 캔들은 전일 종가가 없으므로 인덱스 0은 `None`입니다.
/// 따라서 ATR 워밍업은 인덱스 1부터 시작합니다.
pub fn true_range(
    high: &[Decimal],
    low: &[Decimal],
    close: &[Decimal],
) -> Vec<Option<Decimal>> {
    let len = high.len().min(low.len()).min(close.len());
    let mut result = Vec::with_capacity(len);

    if len == 0 {
        return result;
    }

    result.push(None);

    for i in 1..len {
        let hl = high[i] - low[i];
        let hc = (high[i] - close[i - 1]).abs();
        let lc = (low[i] - close[i - 1]).abs();
        result.push(Some(hl.max(hc).max(lc)));
    }

    result
}

/// Newton-Raphson 방법으로 제곱근 근사.
///
/// 0 이하의 입력은 0을 반환합니다.
pub fn sqrt_decimal(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut x = value;
    for _ in 0..16 {
        let next_x = (x + value / x) / Decimal::TWO;
        if (next_x - x).abs() < Decimal::new(1, 12) {
            return next_x;
        }
        x = next_x;
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ema_seeded_with_first_value() {
        let values = vec![dec!(100), dec!(102), dec!(104)];
        let result = ema(&values, 20);

        assert_eq!(result[0], dec!(100));
        assert_eq!(result.len(), 3);
        // span 20 → α = 2/21, 두 번째 값 = 102·α + 100·(1−α)
        assert!(result[1] > dec!(100) && result[1] < dec!(102));
    }

    #[test]
    fn test_ema_constant_series() {
        let values = vec![dec!(50); 10];
        let result = ema(&values, 5);

        for v in result {
            assert_eq!(v, dec!(50));
        }
    }

    #[test]
    fn test_rolling_mean_warmup() {
        let values = vec![dec!(1), dec!(2), dec!(3), dec!(4)];
        let result = rolling_mean(&values, 3);

        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_eq!(result[2], Some(dec!(2)));
        assert_eq!(result[3], Some(dec!(3)));
    }

    #[test]
    fn test_rolling_std_flat_is_zero() {
        let values = vec![dec!(100); 5];
        let result = rolling_std(&values, 3);

        assert_eq!(result[1], None);
        assert_eq!(result[2], Some(dec!(0)));
    }

    #[test]
    fn test_rolling_std_window_one_undefined() {
        let values = vec![dec!(1), dec!(2)];
        assert_eq!(rolling_std(&values, 1), vec![None, None]);
    }

    #[test]
    fn test_rolling_mean_opt_propagates_none() {
        let values = vec![None, Some(dec!(2)), Some(dec!(4)), Some(dec!(6))];
        let result = rolling_mean_opt(&values, 2);

        assert_eq!(result[0], None);
        assert_eq!(result[1], None); // 윈도우에 None 포함
        assert_eq!(result[2], Some(dec!(3)));
        assert_eq!(result[3], Some(dec!(5)));
    }

    #[test]
    fn test_true_range_first_undefined() {
        let high = vec![dec!(105), dec!(110)];
        let low = vec![dec!(95), dec!(100)];
        let close = vec![dec!(100), dec!(108)];

        let tr = true_range(&high, &low, &close);
        assert_eq!(tr[0], None);
        // max(110−100, |110−100|, |100−100|) = 10
        assert_eq!(tr[1], Some(dec!(10)));
    }

    #[test]
    fn test_sqrt_decimal() {
        assert_eq!(sqrt_decimal(dec!(0)), dec!(0));
        assert_eq!(sqrt_decimal(dec!(-4)), dec!(0));

        let root = sqrt_decimal(dec!(2));
        assert!((root * root - dec!(2)).abs() < dec!(0.0000001));

        let exact = sqrt_decimal(dec!(144));
        assert!((exact - dec!(12)).abs() < dec!(0.0000001));
    }
}

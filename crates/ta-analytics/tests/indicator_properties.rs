//! 지표 불변식 프로퍼티 테스트.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ta_analytics::{
    IndicatorEngine, MacdParams, MomentumCalculator, RsiParams, TrendIndicators, VolumeIndicators,
};

/// 1 ~ 100_000 범위의 가격 시퀀스 전략.
fn price_series(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..100_000, 2..max_len)
        .prop_map(|prices| prices.into_iter().map(Decimal::from).collect())
}

proptest! {
    /// RSI는 항상 0 ~ 100 범위다.
    #[test]
    fn rsi_bounded(prices in price_series(60)) {
        let momentum = MomentumCalculator::new();
        let rsi = momentum.rsi(&prices, RsiParams::default()).unwrap();

        for value in rsi.iter().flatten() {
            prop_assert!(*value >= Decimal::ZERO);
            prop_assert!(*value <= dec!(100));
        }
    }

    /// EMA는 첫 값을 시드로 하며, 캔들을 덧붙여도 앞쪽 값이 변하지 않는다.
    #[test]
    fn ema_seed_and_causality(prices in price_series(60), span in 1usize..30) {
        let trend = TrendIndicators::new();
        let params = ta_analytics::EmaParams { span };

        let full = trend.ema(&prices, params).unwrap();
        prop_assert_eq!(full[0], prices[0]);

        let cut = prices.len() / 2;
        if cut >= 1 {
            let prefix = trend.ema(&prices[..cut], params).unwrap();
            for i in 0..cut {
                prop_assert_eq!(full[i], prefix[i]);
            }
        }
    }

    /// MACD 시리즈는 입력과 항상 1:1 정렬된다.
    #[test]
    fn macd_alignment(prices in price_series(80)) {
        let trend = TrendIndicators::new();
        let macd = trend.macd(&prices, MacdParams::default()).unwrap();
        prop_assert_eq!(macd.len(), prices.len());
    }

    /// 순증가 종가에서 OBV는 순증가한다.
    #[test]
    fn obv_monotonic_on_rising_closes(
        start in 1u32..1_000,
        steps in prop::collection::vec(1u32..50, 1..40),
        volumes in prop::collection::vec(1u32..10_000, 41)
    ) {
        let mut closes = vec![Decimal::from(start)];
        for step in &steps {
            let prev = *closes.last().unwrap();
            closes.push(prev + Decimal::from(*step));
        }
        let volumes: Vec<Decimal> = volumes[..closes.len()]
            .iter()
            .map(|&v| Decimal::from(v))
            .collect();

        let indicator = VolumeIndicators::new();
        let obv = indicator.obv(&closes, &volumes).unwrap();

        for i in 1..obv.len() {
            prop_assert!(obv[i] > obv[i - 1]);
        }
    }

    /// VWAP는 윈도우 내 대표가의 최솟값과 최댓값 사이에 있다.
    #[test]
    fn vwap_within_typical_price_range(prices in price_series(50)) {
        let high: Vec<Decimal> = prices.iter().map(|p| p + dec!(1)).collect();
        let low: Vec<Decimal> = prices.iter().map(|p| *p).collect();
        let close = high.clone();
        let volume = vec![dec!(100); prices.len()];

        let engine = IndicatorEngine::new();
        let vwap = engine.vwap(&high, &low, &close, &volume).unwrap();

        // Decimal 나눗셈의 마지막 자리 반올림 여유
        let epsilon = dec!(0.000001);
        for (i, value) in vwap.iter().enumerate() {
            let value = value.unwrap();
            let tps: Vec<Decimal> = (0..=i)
                .map(|j| (high[j] + low[j] + close[j]) / Decimal::from(3))
                .collect();
            let min = *tps.iter().min().unwrap();
            let max = *tps.iter().max().unwrap();
            prop_assert!(value >= min - epsilon && value <= max + epsilon);
        }
    }
}

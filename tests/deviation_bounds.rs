use bkip_study::deviation::{generate, item_rng, Deviation, DeviationModel};
use proptest::prelude::*;
use rand::RngCore;

proptest! {
    #[test]
    fn integer_deviations_stay_in_range(
        profits in prop::collection::vec(0u32..500, 1..60),
        uncertainty in 0.0f64..1.0,
    ) {
        let profits: Vec<f64> = profits.into_iter().map(f64::from).collect();
        let deviations = generate(&profits, uncertainty, DeviationModel::Integer).unwrap();
        prop_assert_eq!(deviations.len(), profits.len());
        for (d, p) in deviations.0.iter().zip(&profits) {
            match d {
                Deviation::Integer(v) => prop_assert!((*v as f64) <= (uncertainty * p).ceil()),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn continuous_deviations_stay_in_range(
        profits in prop::collection::vec(0.0f64..500.0, 1..60),
        uncertainty in 0.0f64..1.0,
    ) {
        let deviations = generate(&profits, uncertainty, DeviationModel::Continuous).unwrap();
        for (d, p) in deviations.0.iter().zip(&profits) {
            let v = d.value();
            prop_assert!(v >= 0.0);
            prop_assert!(v <= uncertainty * p + 0.05 + 1e-9);
            // one decimal at most
            prop_assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-6);
        }
    }

    #[test]
    fn item_deviation_ignores_other_items(
        profits in prop::collection::vec(1u32..500, 2..40),
        replacement in prop::collection::vec(1u32..500, 40),
        index in any::<prop::sample::Index>(),
    ) {
        let profits: Vec<f64> = profits.into_iter().map(f64::from).collect();
        let i = index.index(profits.len());
        let mut shuffled: Vec<f64> = replacement[..profits.len()].iter().copied().map(f64::from).collect();
        shuffled[i] = profits[i];

        for model in [DeviationModel::Integer, DeviationModel::Continuous] {
            let a = generate(&profits, 0.1, model).unwrap();
            let b = generate(&shuffled, 0.1, model).unwrap();
            prop_assert_eq!(a.0[i], b.0[i]);
        }
    }
}

#[test]
fn item_generators_are_fresh() {
    let mut first = item_rng(4, 10);
    let _ = first.next_u64();
    let mut again = item_rng(4, 10);
    let mut reference = item_rng(4, 10);
    assert_eq!(again.next_u64(), reference.next_u64());
}

#[test]
fn end_to_end_seeds() {
    let profits = [10.0, 20.0, 0.0];
    for _ in 0..5 {
        let deviations = generate(&profits, 0.1, DeviationModel::Integer).unwrap();
        assert_eq!(deviations.0[2], Deviation::Integer(0));
        assert!(deviations.0[0].value() <= 1.0);
        assert!(deviations.0[1].value() <= 2.0);
    }

    // item 1 of a three-item vector is seeded with 3, so it matches the
    // draw of any item sharing that seed and profit
    let alone = generate(&[20.0, 20.0, 20.0], 0.1, DeviationModel::Integer).unwrap();
    let shifted = generate(&[5.0, 20.0, 7.0], 0.1, DeviationModel::Integer).unwrap();
    assert_eq!(alone.0[1], shifted.0[1]);
}

use fate_core::{Balance, BalanceSheet, Participant};
use fate_selection::{
    layout_sectors, pick_index, select_at, weighted_random_select, RandomSource, RngSource,
    WeightPolicy,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn draw_always_returns_an_index_in_range(
        weights in prop::collection::vec(0.001f64..1_000.0, 1..=12),
        unit in 0.0f64..1.0,
    ) {
        let total: f64 = weights.iter().sum();
        let index = pick_index(&weights, unit * total);
        prop_assert!(index < weights.len());
    }

    #[test]
    fn draw_is_deterministic_for_a_fixed_value(
        weights in prop::collection::vec(0.001f64..1_000.0, 1..=12),
        unit in 0.0f64..1.0,
    ) {
        let items: Vec<usize> = (0..weights.len()).collect();
        let total: f64 = weights.iter().sum();
        let first = select_at(items.as_slice(), &weights, unit * total).unwrap();
        let second = select_at(items.as_slice(), &weights, unit * total).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sectors_cover_the_whole_wheel(
        weights in prop::collection::vec(0.001f64..1_000.0, 1..=12),
    ) {
        let participants: Vec<Participant> = (0..weights.len())
            .map(|i| Participant::new(format!("p{i}"), format!("P{i}")))
            .collect();
        let sectors = layout_sectors(&participants, &weights).unwrap();

        prop_assert!(sectors[0].start_angle.abs() < 1e-9);
        prop_assert!((sectors[sectors.len() - 1].end_angle - 360.0).abs() < 1e-6);
        for pair in sectors.windows(2) {
            prop_assert!((pair[0].end_angle - pair[1].start_angle).abs() < 1e-9);
        }
    }

    #[test]
    fn weights_are_positive_and_track_net_debt(
        owes in 0.0f64..500.0,
        is_owed in 0.0f64..500.0,
        floor in 0.01f64..10.0,
    ) {
        let sheet = BalanceSheet::new()
            .with("p", Balance::new().with_owes("q", owes).with_is_owed("r", is_owed));
        let policy = WeightPolicy::new(floor).unwrap();
        let weight = policy.weight(&"p".into(), &sheet);

        prop_assert!(weight > 0.0);
        if owes > is_owed {
            prop_assert!((weight - (owes - is_owed)).abs() < 1e-9);
        } else {
            prop_assert_eq!(weight, floor);
        }
    }
}

#[test]
fn empirical_frequency_matches_weights() {
    let items = ["a", "b", "c", "d"];
    let weights = [10.0, 1.0, 1.0, 4.0];
    let total: f64 = weights.iter().sum();
    let trials = 100_000;

    let mut rng = RngSource::seeded(2024);
    let mut counts = [0usize; 4];
    for _ in 0..trials {
        let picked = weighted_random_select(&items, &weights, &mut rng).unwrap();
        let index = items.iter().position(|i| i == picked).unwrap();
        counts[index] += 1;
    }

    for (count, weight) in counts.iter().zip(weights) {
        let observed = *count as f64 / trials as f64;
        let expected = weight / total;
        assert!(
            (observed - expected).abs() < 0.01,
            "observed {observed:.4}, expected {expected:.4}"
        );
    }
}

#[test]
fn same_seed_same_winners() {
    let items = ["a", "b", "c"];
    let weights = [3.0, 2.0, 1.0];

    let run = |seed: u64| {
        let mut rng = RngSource::seeded(seed);
        (0..50)
            .map(|_| *weighted_random_select(&items, &weights, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn unit_source_stays_below_one() {
    let mut rng = RngSource::from_entropy();
    for _ in 0..10_000 {
        let v = rng.next_unit();
        assert!((0.0..1.0).contains(&v));
    }
}

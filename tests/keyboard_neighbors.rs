use rand::rngs::StdRng;
use rand::SeedableRng;

use keyslip::keyboard::{NeighborRatio, NeighborResolver};
use keyslip::layout::LayoutRegistry;
use keyslip::weights::position_weights;
use keyslip::TypoError;

fn even() -> NeighborRatio {
    NeighborRatio::new(1.0, 1.0).unwrap()
}

#[test]
fn position_weights_never_pick_the_first_character() {
    assert_eq!(position_weights(1), vec![0.0]);
    assert_eq!(position_weights(2), vec![0.0, 1.0]);
    assert_eq!(position_weights(3), vec![0.0, 0.33, 0.67]);
    assert_eq!(position_weights(4), vec![0.0, 0.22, 0.33, 0.44]);
}

#[test]
fn position_weights_ramp_towards_the_end_and_sum_to_about_one() {
    for len in 3..40 {
        let weights = position_weights(len);
        assert_eq!(weights.len(), len);
        assert_eq!(weights[0], 0.0);
        assert!(weights.windows(2).skip(1).all(|w| w[0] <= w[1]), "{weights:?}");

        let total: f64 = weights.iter().sum();
        assert!((total - 1.0).abs() < 0.05 * len as f64, "len {len}: {total}");
    }
}

#[test]
fn neighbors_follow_rows_and_columns() {
    let layout = LayoutRegistry::builtin().lookup("english").unwrap();
    let keys = NeighborResolver::new(&layout, even());

    assert_eq!(keys.neighbors('a'), vec!['s', 'q', 'z']);
    assert_eq!(keys.neighbors('g'), vec!['f', 'h', 't', 'b']);
    // Column index 9 does not exist on the home row.
    assert_eq!(keys.neighbors('p'), vec!['o']);
}

#[test]
fn horizontal_neighbors_are_repeated_by_ratio() {
    let layout = LayoutRegistry::builtin().lookup("english").unwrap();
    let keys = NeighborResolver::new(&layout, NeighborRatio::default());

    let neighbors = keys.neighbors('a');
    assert_eq!(neighbors.iter().filter(|c| **c == 's').count(), 9);
    assert_eq!(neighbors.iter().filter(|c| **c == 'q').count(), 1);
    assert_eq!(neighbors.iter().filter(|c| **c == 'z').count(), 1);
}

#[test]
fn characters_outside_the_layout_have_no_neighbors() {
    let layout = LayoutRegistry::builtin().lookup("english").unwrap();
    let keys = NeighborResolver::new(&layout, even());

    assert!(keys.neighbors('.').is_empty());
    assert!(keys.neighbors('7').is_empty());
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(keys.adjacent_char(',', &mut rng), None);
}

#[test]
fn modified_characters_use_the_alternate_grid() {
    let layout = LayoutRegistry::builtin().lookup("polish").unwrap();
    let keys = NeighborResolver::new(&layout, even());

    assert_eq!(keys.neighbors('ą'), vec!['ś', 'q', 'ż']);
    assert_eq!(keys.neighbors('a'), vec!['s', 'q', 'z']);
}

#[test]
fn adjacent_char_keeps_uppercase() {
    let layout = LayoutRegistry::builtin().lookup("english").unwrap();
    let keys = NeighborResolver::new(&layout, even());

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let c = keys.adjacent_char('A', &mut rng).expect("'a' has neighbors");
        assert!(['S', 'Q', 'Z'].contains(&c), "got {c:?}");
    }
}

#[test]
fn negative_or_non_finite_ratios_are_rejected() {
    assert!(matches!(
        NeighborRatio::new(-1.0, 1.0),
        Err(TypoError::InvalidNeighborRatio(_))
    ));
    assert!(NeighborRatio::new(1.0, f64::NAN).is_err());
    assert!(NeighborRatio::new(0.0, 0.0).is_ok());
}

#[test]
fn oversized_ratios_are_rejected() {
    assert!(matches!(
        NeighborRatio::new(1e30, 1.0),
        Err(TypoError::InvalidNeighborRatio(_))
    ));
    assert!(NeighborRatio::new(1.0, NeighborRatio::MAX_WEIGHT + 1.0).is_err());
    assert!(NeighborRatio::new(NeighborRatio::MAX_WEIGHT, 1.0).is_ok());
}

#[test]
fn unvalidated_huge_ratio_still_resolves_neighbors() {
    let layout = LayoutRegistry::builtin().lookup("english").unwrap();
    let ratio = NeighborRatio {
        horizontal: 1e30,
        vertical: 1.0,
    };
    let keys = NeighborResolver::new(&layout, ratio);

    let neighbors = keys.neighbors('p');
    assert_eq!(neighbors.len(), u16::MAX as usize);
    assert!(neighbors.iter().all(|c| *c == 'o'));
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use keyslip::conflict::is_valid_edit;
use keyslip::generator::{GeneratorConfig, TypoGenerator};
use keyslip::layout::LayoutRegistry;
use keyslip::model::{Edit, TypoKind};

use TypoKind::{Delete, Insert, Replace, Transpose};

fn edit(kind: TypoKind, indices: &[usize]) -> Edit {
    Edit {
        kind,
        indices: indices.to_vec(),
        after: String::new(),
    }
}

fn allowed(prev: Edit, kind: TypoKind, indices: &[usize]) -> bool {
    is_valid_edit(&[prev], kind, indices)
}

#[test]
fn after_replace() {
    let prev = || edit(Replace, &[2]);

    assert!(!allowed(prev(), Insert, &[3]));
    assert!(!allowed(prev(), Replace, &[2]));
    assert!(!allowed(prev(), Delete, &[2]));
    assert!(!allowed(prev(), Transpose, &[1, 2]));

    assert!(allowed(prev(), Insert, &[1]));
    assert!(allowed(prev(), Delete, &[3]));
    assert!(allowed(prev(), Transpose, &[3, 4]));
}

#[test]
fn after_delete() {
    let prev = || edit(Delete, &[2]);

    assert!(!allowed(prev(), Transpose, &[1, 2]));

    assert!(allowed(prev(), Transpose, &[2, 3]));
    assert!(allowed(prev(), Delete, &[2]));
    assert!(allowed(prev(), Replace, &[2]));
    assert!(allowed(prev(), Insert, &[2]));
}

#[test]
fn after_insert() {
    let prev = || edit(Insert, &[3]);

    assert!(!allowed(prev(), Replace, &[3]));
    assert!(!allowed(prev(), Replace, &[2]));
    assert!(!allowed(prev(), Delete, &[3]));
    assert!(!allowed(prev(), Delete, &[2]));
    assert!(!allowed(prev(), Insert, &[3]));
    assert!(!allowed(prev(), Insert, &[4]));
    assert!(!allowed(prev(), Transpose, &[3, 4]));
    assert!(!allowed(prev(), Transpose, &[2, 3]));

    assert!(allowed(prev(), Replace, &[4]));
    assert!(allowed(prev(), Delete, &[1]));
    assert!(allowed(prev(), Insert, &[2]));
    assert!(allowed(prev(), Transpose, &[4, 5]));
}

#[test]
fn after_transpose() {
    let prev = || edit(Transpose, &[1, 2]);

    assert!(!allowed(prev(), Transpose, &[1, 2]));
    assert!(!allowed(prev(), Transpose, &[2, 3]));
    assert!(!allowed(prev(), Insert, &[2]));
    assert!(!allowed(prev(), Delete, &[1]));

    assert!(allowed(prev(), Replace, &[1]));
    assert!(allowed(prev(), Transpose, &[3, 4]));
    assert!(allowed(prev(), Delete, &[3]));
}

#[test]
fn every_earlier_edit_is_checked() {
    let history = [edit(Delete, &[5]), edit(Replace, &[2])];

    assert!(!is_valid_edit(&history, Delete, &[2]));
    assert!(is_valid_edit(&history, Delete, &[4]));
}

fn random_edit(rng: &mut impl Rng) -> (TypoKind, Vec<usize>) {
    let kind = TypoKind::ALL[rng.gen_range(0..4)];
    let i = rng.gen_range(0..8);
    let indices = if kind == Transpose { vec![i, i + 1] } else { vec![i] };
    (kind, indices)
}

#[test]
fn accepted_histories_never_contain_a_conflicting_pair() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..200 {
        let mut history: Vec<Edit> = Vec::new();
        for _ in 0..12 {
            let (kind, indices) = random_edit(&mut rng);
            if is_valid_edit(&history, kind, &indices) {
                history.push(edit(kind, &indices));
            }
        }

        for (j, later) in history.iter().enumerate() {
            for earlier in &history[..j] {
                assert!(
                    is_valid_edit(std::slice::from_ref(earlier), later.kind, &later.indices),
                    "{earlier:?} conflicts with {later:?}"
                );
            }
        }
    }
}

#[test]
fn generated_word_histories_replay_without_conflicts() {
    let registry = LayoutRegistry::builtin();
    let generator = TypoGenerator::new(&registry, GeneratorConfig::default()).unwrap();
    let text = "extraordinary misunderstanding characteristically";

    for seed in 0..40 {
        let mut rng = StdRng::seed_from_u64(seed);
        let report = generator.corrupt(text, 1.0, 1000, &mut rng).unwrap();

        for word in &report.words {
            for (k, edit) in word.history.iter().enumerate() {
                assert!(
                    is_valid_edit(&word.history[..k], edit.kind, &edit.indices),
                    "seed {seed}: {:?}",
                    word.history
                );
            }
        }
    }
}

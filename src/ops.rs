//! The four keyboard edit operations.
//!
//! Each takes the current word and returns the new word plus the indices it
//! touched. An attempt that finds nothing to do returns the word unchanged; the
//! caller treats that as a spent try.

use rand::Rng;

use crate::keyboard::NeighborResolver;
use crate::model::{EditResult, TypoKind};
use crate::weights::{pick_weighted, position_weights};

impl TypoKind {
    pub fn apply(
        self,
        word: &str,
        keys: &NeighborResolver<'_>,
        rng: &mut impl Rng,
    ) -> EditResult {
        match self {
            TypoKind::Delete => delete(word, rng),
            TypoKind::Insert => insert(word, keys, rng),
            TypoKind::Replace => replace(word, keys, rng),
            TypoKind::Transpose => transpose(word, keys, rng),
        }
    }
}

fn sample_position(chars: &[char], rng: &mut impl Rng) -> Option<usize> {
    pick_weighted(&position_weights(chars.len()), rng)
}

/// Drop one character.
pub fn delete(word: &str, rng: &mut impl Rng) -> EditResult {
    let mut chars: Vec<char> = word.chars().collect();
    let Some(idx) = sample_position(&chars, rng) else {
        return EditResult::unchanged(word, None);
    };

    chars.remove(idx);
    EditResult {
        word: chars.into_iter().collect(),
        indices: Some(vec![idx]),
    }
}

/// Insert a key adjacent to the sampled character, right after it.
pub fn insert(word: &str, keys: &NeighborResolver<'_>, rng: &mut impl Rng) -> EditResult {
    let mut chars: Vec<char> = word.chars().collect();
    let Some(idx) = sample_position(&chars, rng) else {
        return EditResult::unchanged(word, None);
    };

    if let Some(inserted) = keys.adjacent_char(chars[idx], rng) {
        chars.insert(idx + 1, inserted);
    }

    EditResult {
        word: chars.into_iter().collect(),
        indices: Some(vec![idx + 1]),
    }
}

/// Substitute the sampled character with an adjacent key.
///
/// Doubled letters stay doubled: when the sampled character closes a run of
/// exactly two, both become the replacement, and a following copy of the
/// original character is replaced as well.
pub fn replace(word: &str, keys: &NeighborResolver<'_>, rng: &mut impl Rng) -> EditResult {
    let mut chars: Vec<char> = word.chars().collect();
    let Some(idx) = sample_position(&chars, rng) else {
        return EditResult::unchanged(word, None);
    };

    let Some(replacement) = keys.adjacent_char(chars[idx], rng) else {
        return EditResult::unchanged(word, Some(vec![idx]));
    };

    if let Some(i) = (0..idx).rev().find(|&i| chars[i] != chars[idx]) {
        if idx - i == 2 {
            chars[i + 1] = replacement;
            chars[idx] = replacement;
            return EditResult {
                word: chars.into_iter().collect(),
                indices: Some(vec![idx]),
            };
        }
    }

    if idx + 1 < chars.len() && chars[idx] == chars[idx + 1] {
        chars[idx + 1] = replacement;
    }
    chars[idx] = replacement;

    EditResult {
        word: chars.into_iter().collect(),
        indices: Some(vec![idx]),
    }
}

/// Swap one adjacent pair typed by different hands, or a character with a
/// following space. The first character never moves.
///
/// Indices are relative to the word without its first character.
pub fn transpose(word: &str, keys: &NeighborResolver<'_>, rng: &mut impl Rng) -> EditResult {
    let chars: Vec<char> = word.chars().collect();
    let Some((&first, rest)) = chars.split_first() else {
        return EditResult::unchanged(word, None);
    };
    let mut rest = rest.to_vec();

    let pairs: Vec<(usize, usize)> = (0..rest.len().saturating_sub(1))
        .filter(|&i| {
            let cross_hand = matches!(
                (keys.hand_of(rest[i]), keys.hand_of(rest[i + 1])),
                (Some(a), Some(b)) if a != b
            );
            cross_hand || rest[i + 1] == ' '
        })
        .map(|i| (i, i + 1))
        .collect();

    // The first candidate pair carries no weight, so a lone pair never swaps.
    let Some(pick) = pick_weighted(&position_weights(pairs.len()), rng) else {
        return EditResult::unchanged(word, None);
    };

    let (a, b) = pairs[pick];
    rest.swap(a, b);

    let mut out = String::with_capacity(word.len());
    out.push(first);
    out.extend(rest);
    EditResult {
        word: out,
        indices: Some(vec![a, b]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::NeighborRatio;
    use crate::layout::{HandSplit, KeyGrid, KeyboardLayout};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abc_layout() -> KeyboardLayout {
        KeyboardLayout::new(KeyGrid::from_rows(&["abc"]).unwrap())
            .with_hands(HandSplit::new("a".chars(), "bc".chars()))
    }

    #[test]
    fn transpose_with_single_candidate_pair_is_a_no_op() {
        let layout = abc_layout();
        let keys = NeighborResolver::new(&layout, NeighborRatio::default());
        let mut rng = StdRng::seed_from_u64(1);

        // Remainder "ab" has exactly one cross-hand pair.
        let out = transpose("cab", &keys, &mut rng);
        assert_eq!(out, EditResult::unchanged("cab", None));
    }

    #[test]
    fn transpose_never_moves_first_character() {
        let layout = abc_layout();
        let keys = NeighborResolver::new(&layout, NeighborRatio::default());

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = transpose("cabab", &keys, &mut rng);
            assert!(out.word.starts_with('c'), "{out:?}");
        }
    }
}

use crate::model::{Edit, TypoKind};

fn overlaps(prev: &[usize], next: &[usize]) -> bool {
    prev == next || prev.iter().any(|i| next.contains(i))
}

/// Whether a proposed edit may follow the edits already applied to a word.
///
/// Rejects proposals that would undo, stack on top of, or crowd an earlier edit:
///
/// | earlier     | rejected proposals                                            |
/// |-------------|---------------------------------------------------------------|
/// | replace     | insert right after it; anything sharing an index              |
/// | delete      | transpose whose second index is the deleted index             |
/// | insert      | replace/delete at it or just before it; insert at it or right |
/// |             | after it; transpose sharing an index                          |
/// | transpose   | transpose/insert/delete sharing an index                      |
pub fn is_valid_edit(history: &[Edit], kind: TypoKind, indices: &[usize]) -> bool {
    let Some(&head) = indices.first() else {
        return history.is_empty();
    };

    history.iter().all(|prev| {
        let prev_idx = prev.indices.as_slice();
        let Some(&prev_head) = prev_idx.first() else {
            return true;
        };

        match prev.kind {
            TypoKind::Replace => {
                !(kind == TypoKind::Insert && prev_head + 1 == head)
                    && !overlaps(prev_idx, indices)
            }
            TypoKind::Delete => {
                !(kind == TypoKind::Transpose && indices.get(1) == Some(&prev_head))
            }
            TypoKind::Insert => match kind {
                TypoKind::Replace | TypoKind::Delete => {
                    !(prev_idx == indices || prev_head == head + 1)
                }
                TypoKind::Insert => !(prev_idx == indices || prev_head + 1 == head),
                TypoKind::Transpose => !overlaps(prev_idx, indices),
            },
            TypoKind::Transpose => match kind {
                TypoKind::Transpose | TypoKind::Insert | TypoKind::Delete => {
                    !overlaps(prev_idx, indices)
                }
                TypoKind::Replace => true,
            },
        }
    })
}

use crate::model::{Corruption, TypoKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub word_index: usize,
    pub line: String,
}

fn verb(kind: TypoKind) -> &'static str {
    match kind {
        TypoKind::Delete => "Delete",
        TypoKind::Insert => "Insert",
        TypoKind::Replace => "Replace",
        TypoKind::Transpose => "Transpose",
    }
}

/// One line per accepted edit, in word order then history order.
///
/// Each line shows the word before and after that edit, e.g.
/// `Replace at [1]: "gama" -> "gsma"`.
pub fn edit_trace(report: &Corruption) -> Vec<TraceEvent> {
    let mut events = Vec::new();

    for (word_index, word) in report.words.iter().enumerate() {
        let mut before = word.original.as_str();
        for edit in &word.history {
            events.push(TraceEvent {
                word_index,
                line: format!(
                    "{} at {:?}: {before:?} -> {:?}",
                    verb(edit.kind),
                    edit.indices,
                    edit.after
                ),
            });
            before = edit.after.as_str();
        }
    }

    events
}

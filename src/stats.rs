use crate::model::{Corruption, TypoKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorruptionStats {
    pub words: usize,
    pub target: usize,
    pub typoed: usize,
    pub tries: usize,
    pub deletes: usize,
    pub inserts: usize,
    pub replaces: usize,
    pub transposes: usize,
}

impl CorruptionStats {
    pub fn merge(self, other: CorruptionStats) -> CorruptionStats {
        CorruptionStats {
            words: self.words + other.words,
            target: self.target + other.target,
            typoed: self.typoed + other.typoed,
            tries: self.tries + other.tries,
            deletes: self.deletes + other.deletes,
            inserts: self.inserts + other.inserts,
            replaces: self.replaces + other.replaces,
            transposes: self.transposes + other.transposes,
        }
    }

    pub fn count(&self, kind: TypoKind) -> usize {
        match kind {
            TypoKind::Delete => self.deletes,
            TypoKind::Insert => self.inserts,
            TypoKind::Replace => self.replaces,
            TypoKind::Transpose => self.transposes,
        }
    }
}

pub fn stats(report: &Corruption) -> CorruptionStats {
    let mut out = CorruptionStats {
        words: report.words.len(),
        target: report.target,
        typoed: report.typoed,
        tries: report.tries,
        ..Default::default()
    };

    for edit in report.words.iter().flat_map(|w| &w.history) {
        match edit.kind {
            TypoKind::Delete => out.deletes += 1,
            TypoKind::Insert => out.inserts += 1,
            TypoKind::Replace => out.replaces += 1,
            TypoKind::Transpose => out.transposes += 1,
        }
    }

    out
}

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into sentences for a language.
pub trait SentenceTokenizer {
    fn tokenize(&self, text: &str, language: &str) -> Vec<String>;
}

impl<F> SentenceTokenizer for F
where
    F: Fn(&str, &str) -> Vec<String>,
{
    fn tokenize(&self, text: &str, language: &str) -> Vec<String> {
        self(text, language)
    }
}

/// Rule-based splitter on Unicode (UAX #29) sentence boundaries.
///
/// Language-independent; sentence terminators such as `.`, `?`, `!` and the
/// Devanagari/Bengali danda all end a sentence. Pieces are trimmed and empty
/// pieces dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceTokenizer;

impl SentenceTokenizer for UnicodeSentenceTokenizer {
    fn tokenize(&self, text: &str, _language: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

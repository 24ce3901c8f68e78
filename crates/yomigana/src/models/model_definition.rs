//! Data Model Definition
use serde::{Deserialize, Serialize};

/// One node emitted by the morphological analyzer.
///
/// `surface` is the literal text segment as it appears in the input sentence
/// (kanji, kana, punctuation, or a number); `reading` is the analyzer-supplied
/// phonetic rendering in kana, `None` when the analyzer found none
/// (unknown word, symbol, etc.).
///
/// A token sequence is produced fresh per input line and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
  /// Surface form (original text segment)
  pub surface: String,

  /// Phonetic reading in kana, `None` if the analyzer supplied none
  #[serde(default)]
  pub reading: Option<String>,
}

impl Token {
  /// Constructor for a token with a reading.
  pub fn new(surface: impl Into<String>, reading: impl Into<String>) -> Self {
    Self {
      surface: surface.into(),
      reading: Some(reading.into()),
    }
  }

  /// Constructor for a token the analyzer could not annotate.
  pub fn unannotated(surface: impl Into<String>) -> Self {
    Self {
      surface: surface.into(),
      reading: None,
    }
  }

  /// Returns the reading as `&str`, treating an empty reading as absent.
  ///
  /// The analyzer emits `surface[]` for nodes without a reading; both that
  /// and a genuinely missing reading behave identically downstream.
  pub fn reading_str(&self) -> Option<&str> {
    match self.reading.as_deref() {
      Some("") | None => None,
      Some(r) => Some(r),
    }
  }
}

/// One output unit of the reading aligner.
///
/// Either a bare string (no annotation needed) or a furigana-bracketed span
/// with the kana context preserved around the bracket. Rendered with the
/// bracket convention consumed by the host flashcard renderer:
/// a bracketed group is always preceded by a single space so the renderer can
/// tell where the annotated kanji run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotatedSegment {
  /// Surface text emitted unannotated
  Plain(String),

  /// Furigana-bracketed span: `{prefix} {kanji}[{reading}]{suffix}`
  Furigana {
    /// Kana shared by surface and reading before the bracketed core (may be empty)
    prefix: String,
    /// Kanji core the bracket annotates
    kanji: String,
    /// Reading core placed inside the bracket
    reading: String,
    /// Kana shared by surface and reading after the bracketed core (may be empty)
    suffix: String,
  },
}

impl AnnotatedSegment {
  /// Renders the segment in the host bracket convention.
  pub fn render(&self) -> String {
    match self {
      AnnotatedSegment::Plain(text) => text.clone(),
      AnnotatedSegment::Furigana {
        prefix,
        kanji,
        reading,
        suffix,
      } => format!("{prefix} {kanji}[{reading}]{suffix}"),
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

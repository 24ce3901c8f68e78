//! Reading-normalization core.
//!
//! Converts the analyzer's token stream (surface forms with katakana
//! readings) into one annotated string with inline bracketed furigana,
//! e.g. `買[か]った 千葉[ちば]`.
//!
//! Placement relative to kanji/kana boundaries is decided per token by
//! trimming the kana the surface and the reading share at either edge, with
//! heuristics for numerals and tokens that are already kana. The function is
//! pure and infallible: a token that cannot be annotated degrades to its
//! bare surface, never to an error.

use tracing::debug;

use crate::analyzer::KanaConverter;
use crate::models::{AnnotatedSegment, Token};

/// Kanji numerals that, like digits, never receive furigana.
/// Covers the multipliers too, so compound numbers like 二千三百六十 count.
const KANJI_NUMERALS: &str = "一二三四五六七八九十百千万億";

/// ASCII digit, full-width digit, or kanji numeral.
fn is_numeral_char(c: char) -> bool {
  c.is_ascii_digit() || ('０'..='９').contains(&c) || KANJI_NUMERALS.contains(c)
}

/// Whole surface is a numeral run (e.g. `2000`, `２０００`, `二千三百六十`).
fn is_numeral_surface(surface: &str) -> bool {
  !surface.is_empty() && surface.chars().all(is_numeral_char)
}

/// Fully ASCII-alphanumeric run (a Latin word or halfwidth number).
fn is_alphanumeric_run(text: &str) -> bool {
  !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Converts a token stream into the annotated reading string.
///
/// Tokens are processed in order and rendered segments concatenated; a
/// single space is then inserted before any ASCII-alphanumeric run so word
/// boundaries stay visible when mixed-script text abuts a bracket, and the
/// line-break tag split apart by the analyzer (`< br>`) is reassembled.
///
/// `kana` supplies katakana-to-hiragana normalization; a failing conversion
/// only downgrades the affected token to passthrough.
pub fn align(tokens: &[Token], kana: &mut dyn KanaConverter) -> String {
  let rendered: Vec<String> = tokens.iter().map(|token| annotate(token, kana).render()).collect();

  let mut out = String::new();
  for (i, piece) in rendered.iter().enumerate() {
    out.push_str(piece);
    if let Some(next) = rendered.get(i + 1)
      && is_alphanumeric_run(next)
    {
      out.push(' ');
    }
  }

  out.trim().replace("< br>", "<br>")
}

/// Classifies one token as passthrough or a bracketed furigana span.
fn annotate(token: &Token, kana: &mut dyn KanaConverter) -> AnnotatedSegment {
  let surface = token.surface.as_str();

  // hiragana, punctuation, non-Japanese, or lacking a reading
  let Some(raw_reading) = token.reading_str() else {
    return AnnotatedSegment::Plain(surface.to_string());
  };
  if surface == raw_reading {
    return AnnotatedSegment::Plain(surface.to_string());
  }

  // katakana token: its reading rendered as hiragana round-trips to the
  // surface itself, and a kana-only surface needs no annotation either way
  let reading = match kana.to_hiragana(raw_reading) {
    Ok(hiragana) => hiragana,
    Err(e) => {
      debug!(surface = %surface, error = %e, "kana conversion unavailable, passing token through");
      return AnnotatedSegment::Plain(surface.to_string());
    }
  };
  if reading == surface {
    return AnnotatedSegment::Plain(surface.to_string());
  }

  // numbers read fine without furigana
  if is_numeral_surface(surface) {
    return AnnotatedSegment::Plain(surface.to_string());
  }

  let k: Vec<char> = surface.chars().collect();
  let r: Vec<char> = reading.chars().collect();

  // the analyzer guarantees a reading at least as long as the kanji it
  // annotates; anything shorter is off and passes through untouched
  if r.len() < k.len() {
    debug!(surface = %surface, reading = %reading, "reading shorter than surface, passing token through");
    return AnnotatedSegment::Plain(surface.to_string());
  }

  // longest shared suffix, bounded so the whole surface is never trimmed
  let mut place_r = 0;
  for i in 1..k.len() {
    if k[k.len() - i] != r[r.len() - i] {
      break;
    }
    place_r = i;
  }

  // longest shared prefix, scanned independently over the original pair
  let mut place_l = 0;
  for i in 0..k.len().saturating_sub(1) {
    if k[i] != r[i] {
      break;
    }
    place_l = i + 1;
  }

  let prefix: String = r[..place_l].iter().collect();
  let suffix: String = r[r.len() - place_r..].iter().collect();

  let kanji_end = k.len().saturating_sub(place_r);
  let kanji_core: String = k[place_l.min(kanji_end)..kanji_end].iter().collect();
  let reading_end = r.len().saturating_sub(place_r);
  let reading_core: String = r[place_l.min(reading_end)..reading_end].iter().collect();

  // the two scans ran independently; when their trims collide the core
  // comes out empty and there is nothing left to bracket
  if kanji_core.is_empty() || reading_core.is_empty() {
    debug!(surface = %surface, reading = %reading, "prefix/suffix trims collided, passing token through");
    return AnnotatedSegment::Plain(surface.to_string());
  }

  AnnotatedSegment::Furigana {
    prefix,
    kanji: kanji_core,
    reading: reading_core,
    suffix,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::errors::{YomiganaError, YomiganaResult};
  use std::path::PathBuf;

  /// Pure katakana-to-hiragana fake: shifts the katakana block down onto
  /// the hiragana block, which is exactly what the real converter does for
  /// kana input.
  struct FakeKana;

  impl KanaConverter for FakeKana {
    fn to_hiragana(&mut self, text: &str) -> YomiganaResult<String> {
      Ok(
        text
          .chars()
          .map(|c| match c {
            '\u{30a1}'..='\u{30f6}' => {
              char::from_u32(c as u32 - 0x60).unwrap_or(c)
            }
            other => other,
          })
          .collect(),
      )
    }
  }

  /// Converter whose backing process is gone.
  struct BrokenKana;

  impl KanaConverter for BrokenKana {
    fn to_hiragana(&mut self, _text: &str) -> YomiganaResult<String> {
      Err(YomiganaError::Session(
        crate::errors::SessionError::ProcessExited {
          program: PathBuf::from("kakasi"),
        },
      ))
    }
  }

  // ─── Passthrough classification ───────────────────────────────────────

  #[test]
  fn kana_only_tokens_concatenate_unchanged() {
    let tokens = vec![
      Token::new("カリン", "カリン"),
      Token::new("、", "、"),
      Token::new("です", "です"),
    ];

    assert_eq!(align(&tokens, &mut FakeKana), "カリン、です");
  }

  #[test]
  fn token_without_reading_passes_through() {
    let tokens = vec![Token::unannotated("Anki")];

    assert_eq!(align(&tokens, &mut FakeKana), "Anki");
  }

  #[test]
  fn hiragana_surface_with_katakana_reading_passes_through() {
    // まい[マイ]: the reading round-trips to the surface via hiragana
    let tokens = vec![Token::new("まい", "マイ")];

    assert_eq!(align(&tokens, &mut FakeKana), "まい");
  }

  #[test]
  fn kanji_numeral_run_gets_no_brackets() {
    let tokens = vec![Token::new("二千三百六十", "ニセンサンビャクロクジュウ")];

    assert_eq!(align(&tokens, &mut FakeKana), "二千三百六十");
  }

  #[test]
  fn kanji_numeral_multipliers_get_no_brackets() {
    let tokens = vec![Token::new("二千万", "ニセンマン")];
    assert_eq!(align(&tokens, &mut FakeKana), "二千万");

    let tokens = vec![Token::new("三億", "サンオク")];
    assert_eq!(align(&tokens, &mut FakeKana), "三億");
  }

  #[test]
  fn fullwidth_and_ascii_digits_get_no_brackets() {
    let tokens = vec![Token::new("２０００", "ニセン")];
    assert_eq!(align(&tokens, &mut FakeKana), "２０００");

    let tokens = vec![Token::new("2000", "ニセン")];
    assert_eq!(align(&tokens, &mut FakeKana), "2000");
  }

  // ─── Overlap trimming ─────────────────────────────────────────────────

  #[test]
  fn no_overlap_brackets_whole_surface() {
    let tokens = vec![Token::new("千葉", "チバ")];

    assert_eq!(align(&tokens, &mut FakeKana), "千葉[ちば]");
  }

  #[test]
  fn shared_suffix_stays_outside_bracket() {
    let tokens = vec![Token::new("買った", "カッタ")];

    assert_eq!(align(&tokens, &mut FakeKana), "買[か]った");
  }

  #[test]
  fn shared_prefix_stays_outside_bracket() {
    let tokens = vec![Token::new("お願い", "オネガイ")];

    assert_eq!(align(&tokens, &mut FakeKana), "お 願[ねが]い");
  }

  #[test]
  fn inner_kana_matching_reading_is_kept_in_core() {
    // 刈り取れ: only the final れ is a shared edge; the inner り stays
    // inside the bracketed core
    let tokens = vec![Token::new("刈り取れ", "カリトレ")];

    assert_eq!(align(&tokens, &mut FakeKana), "刈り取[かりと]れ");
  }

  #[test]
  fn full_sentence_aligns_token_by_token() {
    let tokens = vec![
      Token::new("カリン", "カリン"),
      Token::new("、", "、"),
      Token::new("自分", "ジブン"),
      Token::new("で", "デ"),
      Token::new("まい", "マイ"),
      Token::new("た", "タ"),
      Token::new("種", "タネ"),
      Token::new("は", "ハ"),
      Token::new("自分", "ジブン"),
      Token::new("で", "デ"),
      Token::new("刈り取れ", "カリトレ"),
    ];

    assert_eq!(
      align(&tokens, &mut FakeKana),
      "カリン、 自分[じぶん]でまいた 種[たね]は 自分[じぶん]で 刈り取[かりと]れ"
    );
  }

  // ─── Defensive degradation ────────────────────────────────────────────

  #[test]
  fn reading_shorter_than_surface_passes_through() {
    let tokens = vec![Token::new("買った", "カ")];

    assert_eq!(align(&tokens, &mut FakeKana), "買った");
  }

  #[test]
  fn colliding_trims_pass_token_through() {
    // Prefix and suffix scans each claim one of the two surface chars;
    // the bracketed core would be empty
    let tokens = vec![Token::new("ああ", "アああ")];

    let out = align(&tokens, &mut FakeKana);
    assert_eq!(out, "ああ");
    assert!(!out.contains('['));
  }

  #[test]
  fn broken_kana_converter_degrades_to_passthrough() {
    let tokens = vec![Token::new("千葉", "チバ"), Token::new("に", "に")];

    assert_eq!(align(&tokens, &mut BrokenKana), "千葉に");
  }

  #[test]
  fn output_never_contains_empty_bracket_pair() {
    let tokens = vec![
      Token::new("ああ", "アああ"),
      Token::new("千葉", "チバ"),
      Token::unannotated("!"),
      Token::new("買った", "カッタ"),
    ];

    let out = align(&tokens, &mut FakeKana);
    assert!(!out.contains("[]"), "empty bracket pair in {out:?}");
  }

  #[test]
  fn every_surface_char_survives_into_output() {
    let tokens = vec![
      Token::new("お願い", "オネガイ"),
      Token::new("千葉", "チバ"),
      Token::new("買った", "カッタ"),
      Token::unannotated("2000"),
    ];

    let out = align(&tokens, &mut FakeKana);
    for token in &tokens {
      for c in token.surface.chars() {
        assert!(out.contains(c), "lost {c:?} from {:?} in {out:?}", token.surface);
      }
    }
  }

  // ─── Spacing and cleanup ──────────────────────────────────────────────

  #[test]
  fn single_space_before_alphanumeric_run() {
    let tokens = vec![Token::new("千葉", "チバ"), Token::unannotated("ABC")];

    assert_eq!(align(&tokens, &mut FakeKana), "千葉[ちば] ABC");
  }

  #[test]
  fn no_space_before_fullwidth_digits() {
    // Full-width digits are not an ASCII alphanumeric run
    let tokens = vec![Token::new("彼", "カレ"), Token::unannotated("２０００")];

    assert_eq!(align(&tokens, &mut FakeKana), "彼[かれ]２０００");
  }

  #[test]
  fn split_break_tag_is_reassembled() {
    // The analyzer sees the protected <br> tag as three nodes, and the
    // spacing pass wedges a space before the alphanumeric "br"
    let tokens = vec![
      Token::new("千葉", "チバ"),
      Token::unannotated("<"),
      Token::unannotated("br"),
      Token::unannotated(">"),
      Token::new("東京", "トウキョウ"),
    ];

    assert_eq!(align(&tokens, &mut FakeKana), "千葉[ちば]<br> 東京[とうきょう]");
  }

  #[test]
  fn empty_token_list_yields_empty_string() {
    assert_eq!(align(&[], &mut FakeKana), "");
  }
}

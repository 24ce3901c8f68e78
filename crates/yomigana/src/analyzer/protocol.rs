//! Analyzer output line protocol.
//!
//! With the node formats in [`crate::config`], the analyzer answers one query
//! line with one output line of space-separated nodes:
//!
//! ```text
//! 買っ[カッ] た[タ] 千葉[チバ] に[ニ] 行く[イク] <newline>
//! ```
//!
//! Known words carry a katakana reading in brackets, unknown words an empty
//! bracket pair. A node that does not fit the `surface[reading]` shape is
//! recovered as a bare-surface token so one bad node never discards the line.

use tracing::warn;

use crate::models::Token;

/// Parses one analyzer output line into tokens.
///
/// Splits on single spaces and stops at the first empty field (the node
/// format emits a trailing space before the line terminator).
pub fn parse_line(line: &str) -> Vec<Token> {
  line
    .split(' ')
    .take_while(|node| !node.is_empty())
    .map(|node| match parse_node(node) {
      Some(token) => token,
      None => {
        warn!(node = %node, "unexpected analyzer node shape, passing surface through");
        Token::unannotated(node)
      }
    })
    .collect()
}

/// Parses a single `surface[reading]` / `surface[]` node.
///
/// The bracket is located from the right so a literal `[` inside the surface
/// does not confuse the split.
fn parse_node(node: &str) -> Option<Token> {
  let body = node.strip_suffix(']')?;
  let open = body.rfind('[')?;
  let (surface, reading) = (&body[..open], &body[open + 1..]);

  if surface.is_empty() {
    return None;
  }

  if reading.is_empty() {
    Some(Token::unannotated(surface))
  } else {
    Some(Token::new(surface, reading))
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_annotated_nodes() {
    let tokens = parse_line("千葉[チバ] に[ニ] ");

    assert_eq!(
      tokens,
      vec![Token::new("千葉", "チバ"), Token::new("に", "ニ")]
    );
  }

  #[test]
  fn parses_unknown_word_with_empty_reading() {
    let tokens = parse_line("Anki[] ");

    assert_eq!(tokens, vec![Token::unannotated("Anki")]);
  }

  #[test]
  fn stops_at_line_terminator_field() {
    // The trailing space before the newline yields an empty field
    let tokens = parse_line("買っ[カッ] た[タ] ");

    assert_eq!(tokens.len(), 2);
  }

  #[test]
  fn malformed_node_passes_surface_through() {
    // Middle node lacks the bracket structure entirely
    let tokens = parse_line("千葉[チバ] ??? に[ニ] ");

    assert_eq!(
      tokens,
      vec![
        Token::new("千葉", "チバ"),
        Token::unannotated("???"),
        Token::new("に", "ニ"),
      ]
    );
  }

  #[test]
  fn surface_containing_bracket_splits_on_last_bracket() {
    let tokens = parse_line("a[b[シー] ");

    assert_eq!(tokens, vec![Token::new("a[b", "シー")]);
  }

  #[test]
  fn node_with_empty_surface_is_recovered_raw() {
    let tokens = parse_line("[チバ] ");

    assert_eq!(tokens, vec![Token::unannotated("[チバ]")]);
  }

  #[test]
  fn empty_line_yields_no_tokens() {
    assert!(parse_line("").is_empty());
  }
}

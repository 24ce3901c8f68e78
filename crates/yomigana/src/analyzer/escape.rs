//! Pre-analysis text preparation.
//!
//! The external analyzers are line-oriented: embedded newlines would be taken
//! as extra queries, HTML markup would be segmented as text, and the
//! full-width tilde trips up some dictionaries. This module normalizes input
//! text before it is written to an analyzer's stdin.
//!
//! Line-break tags are deliberately protected: `<br>` is replaced by a
//! placeholder before HTML stripping, then restored, so the tag itself flows
//! through the analyzer and survives into the aligned output.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder shielding line-break tags from the HTML stripper.
const NEWLINE_PLACEHOLDER: &str = "---newline---";

static BR_TAG: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"<br( /)?>").expect("valid break-tag pattern"));

static HTML_TAG: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)<[^<>]+>").expect("valid html-tag pattern"));

/// Removes HTML tags and decodes the common character entities.
pub fn strip_html(text: &str) -> String {
  let stripped = HTML_TAG.replace_all(text, "");
  stripped
    .replace("&nbsp;", " ")
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&#39;", "'")
    .replace("&amp;", "&")
}

/// Prepares one line of text for the analyzer.
///
/// - Newlines become spaces (the analyzer protocol is one query per line)
/// - Full-width tilde U+FF5E becomes an ASCII `~`
/// - `<br>` / `<br />` tags are preserved; all other HTML is stripped
pub fn escape_text(text: &str) -> String {
  let text = text.replace('\n', " ");
  let text = text.replace('\u{ff5e}', "~");
  let text = BR_TAG.replace_all(&text, NEWLINE_PLACEHOLDER);
  let text = strip_html(&text);
  text.replace(NEWLINE_PLACEHOLDER, "<br>")
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

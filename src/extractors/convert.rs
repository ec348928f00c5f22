// src/extractors/convert.rs
//! Rewrites the RST markup found in release notes into Markdown.
//!
//! Each rewrite is a single global pass over the output of the one before,
//! so the order of [`rst_to_markdown`]'s passes is significant: roles must
//! be resolved before links, and links before inline literals.

// --- Imports ---
use crate::extractors::rst::{AdornmentRule, HeadingBlocks};
use crate::extractors::section::LevelOrder;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// :ref:`visible text <target>` -> visible text
static REF_WITH_TARGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":ref:`([^<`]+?)\s*<[^>]+>`").expect("Failed to compile REF_WITH_TARGET_RE")
});

// :role:`~pkg.mod.name` -> `name`
static TILDE_ROLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":\w+:`~[\w.]*\.(\w+)`").expect("Failed to compile TILDE_ROLE_RE")
});

// :role:`target` -> `target`
static ROLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":\w+:`([^`]+)`").expect("Failed to compile ROLE_RE")
});

// `text <url>`_ -> [text](url)
static EXTERNAL_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`([^<`]+?)\s*<([^>]+)>`_").expect("Failed to compile EXTERNAL_LINK_RE")
});

// ``code`` -> `code`
static INLINE_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"``(.+?)``").expect("Failed to compile INLINE_LITERAL_RE")
});

/// Converts an extracted RST section to Markdown.
///
/// `order` is the adornment order of the whole document. The section sits one
/// level below the heading that bounded it, so a nested heading underlined
/// with the n-th character of `order` becomes an n-deep ATX heading, and a
/// character the document never used at the top gets one level deeper than
/// everything known.
pub fn rst_to_markdown(text: &str, order: &LevelOrder<char>) -> String {
    let text = rewrite_headings(text, order);
    let text = REF_WITH_TARGET_RE.replace_all(&text, "${1}");
    let text = TILDE_ROLE_RE.replace_all(&text, "`${1}`");
    let text = ROLE_RE.replace_all(&text, "`${1}`");
    let text = EXTERNAL_LINK_RE.replace_all(&text, "[${1}](${2})");
    let text = INLINE_LITERAL_RE.replace_all(&text, "`${1}`");
    text.into_owned()
}

fn rewrite_headings(text: &str, order: &LevelOrder<char>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for block in HeadingBlocks::new(text, AdornmentRule::Any) {
        let depth = order.position(block.underline).unwrap_or(order.len()) + 1;
        out.push_str(&text[last..block.start]);
        out.push_str(&"#".repeat(depth));
        out.push(' ');
        out.push_str(block.title.trim());
        last = block.end;
    }
    out.push_str(&text[last..]);
    out
}

//! Document composition.
//!
//! The composite document is recomputed from the raw buffers on every call;
//! nothing is cached or patched, so the preview is always a pure function of
//! the current markup and style.

use regex::Regex;
use std::sync::LazyLock;

use cardsmith_settings::HeadFallback;

pub const VIEWPORT_META: &str =
    r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#;

// `<head>` or `<head attr...>`, never `<header>`.
static HEAD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head(?:\s[^>]*)?>").expect("valid regex"));

static HEAD_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</head\s*>").expect("valid regex"));

static VIEWPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*\bname\s*=\s*["']?viewport\b"#).expect("valid regex")
});

static HTML_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html(?:\s[^>]*)?>").expect("valid regex"));

/// Compose with the default fallback (markup without a head is returned as is).
pub fn compose(markup: &str, style: &str) -> String {
    compose_with(markup, style, HeadFallback::LeaveUnchanged)
}

/// Merge `style` into `markup`.
///
/// 1. Non-blank style goes in as `<style>…</style>` right before the first
///    `</head>`.
/// 2. Unless the document already declares a viewport, [`VIEWPORT_META`] goes
///    right after the first `<head>`.
///
/// Markup with neither `<html>` nor `<head>` is only wrapped into a full
/// document under [`HeadFallback::SynthesizeDocument`].
pub fn compose_with(markup: &str, style: &str, fallback: HeadFallback) -> String {
    let synthesized;
    let markup = if fallback == HeadFallback::SynthesizeDocument
        && !HEAD_OPEN.is_match(markup)
        && !HTML_OPEN.is_match(markup)
    {
        synthesized = synthesize_document(markup);
        synthesized.as_str()
    } else {
        markup
    };

    let mut document = markup.to_string();

    if !style.trim().is_empty() {
        if let Some(close) = HEAD_CLOSE.find(&document) {
            document.insert_str(close.start(), &format!("<style>{style}</style>"));
        } else {
            tracing::trace!("no </head> in markup, style not injected");
        }
    }

    if !VIEWPORT.is_match(&document) {
        if let Some(open) = HEAD_OPEN.find(&document) {
            document.insert_str(open.end(), VIEWPORT_META);
        }
    }

    document
}

fn synthesize_document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n</head>\n<body>\n{body}\n</body>\n</html>"
    )
}

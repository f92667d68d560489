//! Reply formatting.
//!
//! Replies arrive as plain text with a handful of conventions (newlines,
//! `Confirmation #:` labels, `Availability for ...:` headings and `- ` bullets).
//! [`format_response`] turns them into the small markup subset the transcript
//! renders.

use std::sync::LazyLock;

use regex::Regex;

/// Line break emitted for each `\n`.
pub const LINE_BREAK: &str = "<br>";

/// Bullet glyph substituted for `- `.
pub const BULLET: &str = "\u{2022} ";

const CONFIRMATION_LABEL: &str = "Confirmation #:";

// The heading stops at the same line terminators a browser `.` does.
static AVAILABILITY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Availability for [^\r\u{2028}\u{2029}]*?):").unwrap()
});

/// How user and server text is treated before it reaches the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkupMode {
    /// Text is inserted as-is; HTML-significant characters pass through.
    #[default]
    Trusted,
    /// Text is HTML-escaped before formatting, so only the formatter's own
    /// tags survive.
    Escaped,
}

impl MarkupMode {
    pub fn from_escape_flag(escape: bool) -> Self {
        if escape { Self::Escaped } else { Self::Trusted }
    }

    /// Prepare user-typed text for insertion into the transcript.
    pub fn user_text(self, text: &str) -> String {
        match self {
            Self::Trusted => text.to_string(),
            Self::Escaped => escape_markup(text),
        }
    }

    /// Prepare a server reply for insertion into the transcript.
    pub fn reply_text(self, text: &str) -> String {
        match self {
            Self::Trusted => format_response(text),
            Self::Escaped => format_response(&escape_markup(text)),
        }
    }
}

/// Convert reply text into transcript markup.
///
/// Applied in order: newlines become line breaks, the confirmation label is
/// emphasized, `Availability for <x>:` headings are emphasized with the colon
/// left outside, and `- ` becomes a bullet. No escaping is performed.
pub fn format_response(text: &str) -> String {
    let html = text.replace('\n', LINE_BREAK);
    let html = html.replace(
        CONFIRMATION_LABEL,
        &format!("<strong>{CONFIRMATION_LABEL}</strong>"),
    );
    let html = AVAILABILITY_HEADING.replace_all(&html, "<strong>${1}</strong>:");
    html.replace("- ", BULLET)
}

/// Escape the five HTML-significant characters.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Flatten transcript markup back to text for a terminal.
pub fn markup_to_plain(markup: &str) -> String {
    markup
        .replace(LINE_BREAK, "\n")
        .replace("<strong>", "")
        .replace("</strong>", "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

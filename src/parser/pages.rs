use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HTML_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

const FORM_FEED: char = '\u{c}';

/// Token separating pages in raw extracted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PageMarker {
    /// `\f`, as written by pdftotext.
    #[default]
    FormFeed,
    /// `<br>`, `<br/>` or `<br />`.
    HtmlBreak,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub text: String,
    /// 1-based physical page number.
    pub number: u32,
}

impl Page {
    pub fn as_pair(&self) -> (&str, u32) {
        (&self.text, self.number)
    }
}

/// Split marker-delimited text into numbered pages.
///
/// Empty pages keep their slot so numbering follows the source. A marker at the
/// very end does not open an extra page.
pub fn split_pages(raw: &str, marker: PageMarker) -> Vec<Page> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut parts: Vec<&str> = match marker {
        PageMarker::FormFeed => raw.split(FORM_FEED).collect(),
        PageMarker::HtmlBreak => HTML_BREAK_RE.split(raw).collect(),
    };

    if parts.len() > 1 && parts.last().is_some_and(|p| p.trim().is_empty()) {
        parts.pop();
    }

    parts
        .into_iter()
        .zip(1u32..)
        .map(|(text, number)| Page {
            text: text.to_string(),
            number,
        })
        .collect()
}

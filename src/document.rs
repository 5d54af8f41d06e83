use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Settings;
use crate::parser::pages::{self, Page};
use crate::parser::process_pages;
use crate::parser::sections::Section;

/// Title and author as reported by the source file, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl Metadata {
    pub fn new(title: Option<String>, author: Option<String>) -> Self {
        Metadata { title, author }
    }
}

/// A segmented document. Only built through [`Document::from_pages`] or
/// [`Document::from_raw_text`], so it is never seen without its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    filename: String,
    title: Option<String>,
    author: Option<String>,
    text_content: String,
    sections: Vec<Section>,
}

/// One row of the listing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub filename: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub section_count: usize,
    pub page_span: Option<(u32, u32)>,
    pub word_count: usize,
}

impl Document {
    pub fn from_pages(
        filename: impl Into<String>,
        metadata: Metadata,
        pages: &[Page],
        settings: &Settings,
    ) -> Self {
        let filename = filename.into();
        let title = non_blank(metadata.title).or_else(|| Some(filename.clone()));
        let text_content = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(settings.pages.separator.as_str());
        let sections = process_pages(pages, &settings.segmenter);

        debug!(
            filename = %filename,
            pages = pages.len(),
            sections = sections.len(),
            "document segmented"
        );

        Document {
            filename,
            title,
            author: non_blank(metadata.author),
            text_content,
            sections,
        }
    }

    /// Split `raw` on the configured page marker, then segment.
    pub fn from_raw_text(
        filename: impl Into<String>,
        metadata: Metadata,
        raw: &str,
        settings: &Settings,
    ) -> Self {
        let pages = pages::split_pages(raw, settings.pages.marker);
        Self::from_pages(filename, metadata, &pages, settings)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn sections_on_page(&self, page: u32) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.covers(page))
    }

    /// First section containing `needle`, ignoring case.
    pub fn find_section(&self, needle: &str) -> Option<&Section> {
        let needle = needle.to_lowercase();
        self.sections
            .iter()
            .find(|s| s.content.to_lowercase().contains(&needle))
    }

    /// Lowest start page and highest end page over all sections.
    pub fn page_span(&self) -> Option<(u32, u32)> {
        let start = self.sections.iter().map(|s| s.start_page).min()?;
        let end = self.sections.iter().map(|s| s.end_page).max()?;
        Some((start, end))
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            filename: self.filename.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            section_count: self.sections.len(),
            page_span: self.page_span(),
            word_count: self.sections.iter().map(Section::word_count).sum(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document(filename='{}', title='{}', author='{}', sections={})",
            self.filename,
            self.title.as_deref().unwrap_or(""),
            self.author.as_deref().unwrap_or(""),
            self.sections.len()
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ── Tests ──

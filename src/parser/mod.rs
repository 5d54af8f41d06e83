pub mod lines;
pub mod pages;
pub mod sections;

use serde::{Deserialize, Serialize};

use lines::{BreakRules, DEFAULT_INDENT_WIDTH, DEFAULT_LENGTH_GAP};
use pages::Page;
use sections::Section;

pub const DEFAULT_MIN_WORDS: usize = 20;

/// Tunables for the line classifier and the section filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    pub length_gap: usize,
    pub indent_width: usize,
    /// Sections need strictly more words than this to be kept.
    pub min_words: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig {
            length_gap: DEFAULT_LENGTH_GAP,
            indent_width: DEFAULT_INDENT_WIDTH,
            min_words: DEFAULT_MIN_WORDS,
        }
    }
}

impl SegmenterConfig {
    pub fn rules(&self) -> BreakRules {
        BreakRules {
            length_gap: self.length_gap,
            indent_width: self.indent_width,
        }
    }
}

/// Two-pass pipeline: pages → classified lines → filtered sections.
pub fn process_pages(pages: &[Page], config: &SegmenterConfig) -> Vec<Section> {
    sections::segment(pages.iter().map(Page::as_pair), config)
}

//! Splits extracted page text into page-tracked paragraph sections.

pub mod config;
pub mod document;
pub mod error;
pub mod ingest;
pub mod parser;
pub mod report;

pub use config::Settings;
pub use document::{Document, DocumentSummary, Metadata};
pub use error::{Error, Result};
pub use parser::lines::{is_paragraph_break, BreakRules};
pub use parser::pages::{split_pages, Page, PageMarker};
pub use parser::sections::{segment, Section};
pub use parser::{process_pages, SegmenterConfig};

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::parser::pages::PageMarker;
use crate::parser::SegmenterConfig;

pub const ENV_PREFIX: &str = "PAGESECT";
pub const DEFAULT_PAGE_SEPARATOR: &str = "<br>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Marker that splits raw input into pages.
    pub marker: PageMarker,
    /// Joiner between pages in `text_content`.
    pub separator: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings {
            marker: PageMarker::default(),
            separator: DEFAULT_PAGE_SEPARATOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub segmenter: SegmenterConfig,
    pub pages: PageSettings,
}

impl Settings {
    /// Defaults, then the optional TOML file, then `PAGESECT_*` variables
    /// (`PAGESECT_SEGMENTER__MIN_WORDS=10`).
    pub fn load(file: Option<&Path>) -> Result<Settings> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Command-line values win over anything loaded.
    pub fn apply_overrides(
        &mut self,
        marker: Option<PageMarker>,
        min_words: Option<usize>,
        length_gap: Option<usize>,
    ) {
        if let Some(marker) = marker {
            self.pages.marker = marker;
        }
        if let Some(n) = min_words {
            self.segmenter.min_words = n;
        }
        if let Some(n) = length_gap {
            self.segmenter.length_gap = n;
        }
    }

    /// Same layering from an in-memory TOML string; no environment.
    pub fn from_toml(toml: &str) -> Result<Settings> {
        Ok(Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }
}

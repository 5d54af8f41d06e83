use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::Settings;
use crate::document::{Document, Metadata};
use crate::error::{Error, Result};

/// Batch stats returned after completion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub total: usize,
    pub ok: usize,
    pub conflicts: usize,
    pub errors: usize,
    pub sections: usize,
}

/// Where `segment` sends its documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A single document printed as JSON.
    Stdout,
    /// One `<filename>.json` per input.
    Dir(PathBuf),
}

impl OutputTarget {
    /// Stdout only works for one input; several inputs need a directory.
    pub fn resolve(input_count: usize, out_dir: Option<PathBuf>) -> Result<OutputTarget> {
        match out_dir {
            Some(dir) => Ok(OutputTarget::Dir(dir)),
            None if input_count == 1 => Ok(OutputTarget::Stdout),
            None => Err(Error::MissingOutDir { count: input_count }),
        }
    }
}

/// Document filename for an input path: its final component.
pub fn filename_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidFilename {
            path: path.to_path_buf(),
        })
}

/// Read extracted text and build its document. Invalid UTF-8 is replaced, not rejected.
pub fn load_document(path: &Path, metadata: &Metadata, settings: &Settings) -> Result<Document> {
    let filename = filename_of(path)?;
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let raw = String::from_utf8_lossy(&bytes);
    Ok(Document::from_raw_text(filename, metadata.clone(), &raw, settings))
}

pub fn output_path(out_dir: &Path, filename: &str) -> PathBuf {
    out_dir.join(format!("{}.json", filename))
}

/// Write `doc` as `<out_dir>/<filename>.json`. An existing file is a conflict
/// unless `force` is set.
pub fn write_document(doc: &Document, out_dir: &Path, force: bool) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).map_err(|e| Error::io(out_dir, e))?;
    let path = output_path(out_dir, doc.filename());
    let json = serde_json::to_vec_pretty(doc)?;

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(&path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => Error::Conflict {
            filename: doc.filename().to_string(),
        },
        _ => Error::io(&path, e),
    })?;
    file.write_all(&json).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

pub fn read_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Segment every input in parallel and write one JSON document per input.
/// Per-file failures are logged and counted; the batch keeps going.
pub fn segment_files(
    inputs: &[PathBuf],
    out_dir: &Path,
    force: bool,
    metadata: &Metadata,
    settings: &Settings,
) -> IngestStats {
    let pb = ProgressBar::new(inputs.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut stats = IngestStats {
        total: inputs.len(),
        ..IngestStats::default()
    };

    for chunk in inputs.chunks(500) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| {
                let doc = load_document(path, metadata, settings)?;
                let sections = doc.sections().len();
                write_document(&doc, out_dir, force)?;
                Ok::<_, Error>(sections)
            })
            .collect();

        for (path, result) in chunk.iter().zip(results) {
            match result {
                Ok(sections) => {
                    stats.ok += 1;
                    stats.sections += sections;
                }
                Err(Error::Conflict { filename }) => {
                    warn!("Skipping {}: document '{}' already exists", path.display(), filename);
                    stats.conflicts += 1;
                }
                Err(e) => {
                    warn!("Failed to segment {}: {}", path.display(), e);
                    stats.errors += 1;
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(
        total = stats.total,
        ok = stats.ok,
        conflicts = stats.conflicts,
        errors = stats.errors,
        "batch finished"
    );
    stats
}

// ── Tests ──

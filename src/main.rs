use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

use page_sections::{ingest, report, Metadata, PageMarker, Settings};

#[derive(Parser)]
#[command(name = "page_sections", about = "Split extracted document text into page-tracked sections")]
struct Cli {
    /// TOML settings file (PAGESECT_* variables override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment extracted text files into document JSON
    Segment {
        /// Text files with one page per marker-delimited block
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Document title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        /// Write <dir>/<filename>.json instead of printing to stdout
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Overwrite documents that already exist in --out-dir
        #[arg(long)]
        force: bool,
        #[arg(long, value_enum)]
        marker: Option<PageMarker>,
        /// Sections need more than this many words
        #[arg(long)]
        min_words: Option<usize>,
        /// Line length jump that starts a new section
        #[arg(long)]
        length_gap: Option<usize>,
    },
    /// Summary table of document JSON files
    Inspect {
        #[arg(required = true)]
        docs: Vec<PathBuf>,
    },
    /// Print a document's sections
    Show {
        doc: PathBuf,
        /// Only sections whose page span covers this page
        #[arg(short, long)]
        page: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Segment {
            inputs,
            title,
            author,
            out_dir,
            force,
            marker,
            min_words,
            length_gap,
        } => {
            settings.apply_overrides(marker, min_words, length_gap);
            let metadata = Metadata::new(title, author);

            match ingest::OutputTarget::resolve(inputs.len(), out_dir)? {
                ingest::OutputTarget::Stdout => {
                    let doc = ingest::load_document(&inputs[0], &metadata, &settings)?;
                    info!("{}", doc);
                    println!("{}", serde_json::to_string_pretty(&doc)?);
                }
                ingest::OutputTarget::Dir(dir) => {
                    info!("Segmenting {} files into {}", inputs.len(), dir.display());
                    let stats = ingest::segment_files(&inputs, &dir, force, &metadata, &settings);
                    println!(
                        "Done: {} files ({} ok, {} conflicts, {} errors), {} sections.",
                        stats.total, stats.ok, stats.conflicts, stats.errors, stats.sections
                    );
                }
            }
        }
        Commands::Inspect { docs } => {
            let rows = docs
                .iter()
                .map(|path| ingest::read_document(path).map(|d| d.summary()))
                .collect::<Result<Vec<_>, _>>()?;
            print!("{}", report::render_overview(&rows));
            println!("\n{} documents", rows.len());
        }
        Commands::Show { doc, page } => {
            let doc = ingest::read_document(&doc)?;
            println!("{}\n", doc);
            let text = match page {
                Some(n) => report::render_sections(doc.sections_on_page(n)),
                None => report::render_sections(doc.sections()),
            };
            if text.is_empty() {
                println!("No sections.");
            } else {
                print!("{}", text);
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", report::format_duration(elapsed));
    }

    Ok(())
}

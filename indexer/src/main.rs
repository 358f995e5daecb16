use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use revindex::persist::{load_index, save_index, save_meta, IndexPaths, MetaFile};
use revindex::store::Store;
use revindex::InvertedIndex;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod ingest;
mod report;

use ingest::read_dir_documents;
use report::{report_hits, ConsoleReporter, Reporter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a word index over text files and search phrases in it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from the files in a directory
    #[command(alias = "b")]
    Build {
        /// Directory with the text files to index
        dir: PathBuf,
        /// Output index directory
        #[arg(long, env = "REVINDEX_INDEX", default_value = "./index")]
        index: PathBuf,
        /// Also save the index into this store
        #[arg(long, env = "REVINDEX_STORE")]
        store: Option<PathBuf>,
        /// Empty the store before saving
        #[arg(long, short = 'c', default_value_t = false, requires = "store")]
        clear: bool,
    },
    /// Count phrase hits per document title
    #[command(alias = "f")]
    Find {
        phrase: String,
        /// Index directory to search when no store is given
        #[arg(long, env = "REVINDEX_INDEX", default_value = "./index")]
        index: PathBuf,
        /// Search this store instead of the index directory
        #[arg(long, env = "REVINDEX_STORE")]
        store: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let reporter = ConsoleReporter;

    match cli.command {
        Commands::Build { dir, index, store, clear } => {
            build_index(&dir, &index, store.as_deref(), clear, &reporter)
        }
        Commands::Find { phrase, index, store } => {
            find_phrase(&phrase, &index, store.as_deref(), &reporter)
        }
    }
}

fn build_index(dir: &Path, output: &Path, store: Option<&Path>, clear: bool, reporter: &dyn Reporter) -> Result<()> {
    let docs = read_dir_documents(dir, reporter)?;
    let index = InvertedIndex::build(&docs.texts, docs.titles).context("cannot build index")?;
    tracing::info!(num_docs = index.num_docs(), num_words = index.num_words(), "built index");

    let paths = IndexPaths::new(output);
    save_index(&paths, &index).with_context(|| format!("cannot save index to {}", output.display()))?;
    let meta = MetaFile {
        num_docs: index.num_docs(),
        num_words: index.num_words(),
        created_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
    };
    save_meta(&paths, &meta)?;
    reporter.report(&format!("Saved index of {} documents to {}", index.num_docs(), output.display()));

    if let Some(path) = store {
        let store = Store::open(path).with_context(|| format!("cannot open store {}", path.display()))?;
        if clear {
            reporter.report("Clearing store");
            store.clear()?;
        }
        store.save_index(&index).context("cannot save index to store")?;
        store.flush()?;
        reporter.report(&format!("Saved index to store {}", path.display()));
    }

    tracing::info!(output = %output.display(), "index build complete");
    Ok(())
}

fn find_phrase(phrase: &str, index: &Path, store: Option<&Path>, reporter: &dyn Reporter) -> Result<()> {
    let hits = match store {
        Some(path) => {
            let store = Store::open(path).with_context(|| format!("cannot open store {}", path.display()))?;
            store.find(phrase).context("cannot find phrase in store")?
        }
        None => {
            let idx = load_index(&IndexPaths::new(index))
                .with_context(|| format!("cannot load index from {}", index.display()))?;
            idx.find(phrase)
        }
    };
    report_hits(reporter, &hits);
    Ok(())
}

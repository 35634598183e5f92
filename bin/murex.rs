use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use murex::{
    dump, IndexSettings, IndexSource, Indexer, IndexingMode, MappedIndex, RankingMode, Searcher,
    Stemmer, StemmerKind, Tokenizer,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "murex")]
#[command(about = "In-process inverted-index text search", long_about = None)]
struct Args {
    /// Build an index from a corpus instead of querying one
    #[arg(short = 'i', long = "index")]
    index: bool,

    /// Compress posting lists (delta+varint, format version 2)
    #[arg(short = 'z', long = "zip")]
    zip: bool,

    /// Cap the number of documents ingested
    #[arg(long, env = "MUREX_LIMIT")]
    limit: Option<usize>,

    /// Index file to write (build mode) or read (query mode)
    #[arg(long, env = "MUREX_DUMP", default_value = "index.murex")]
    dump: PathBuf,

    /// Stemmer applied to documents and queries (porter, identity)
    #[arg(long, env = "MUREX_STEMMER", default_value = "porter")]
    stemmer: String,

    /// Rank with set membership only; every hit scores 0
    #[arg(long)]
    boolean: bool,

    /// Corpus file in build mode (JSON lines of {"url", "text"}; stdin when
    /// omitted), query string in query mode
    input: Option<String>,
}

impl Args {
    fn settings(&self) -> IndexSettings {
        let stemmer = match self.stemmer.to_lowercase().as_str() {
            "identity" | "none" => StemmerKind::Identity,
            "porter" => StemmerKind::Porter,
            _ => {
                warn!("Unknown stemmer '{}', using 'porter'", self.stemmer);
                StemmerKind::Porter
            }
        };

        IndexSettings {
            stemmer,
            ranking: if self.boolean {
                RankingMode::Boolean
            } else {
                RankingMode::TfIdf
            },
            compress: self.zip,
            doc_limit: self.limit,
        }
    }
}

/// One corpus line: a url and its already-extracted text
#[derive(Deserialize)]
struct CorpusDoc {
    url: String,
    text: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let settings = args.settings();

    if args.index {
        build_index(&args, &settings)
    } else {
        run_query(&args, &settings)
    }
}

fn build_index(args: &Args, settings: &IndexSettings) -> Result<()> {
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open corpus file {path}"))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let tokenizer = Tokenizer::new(Stemmer::from(settings.stemmer));
    let mut indexer = Indexer::new(tokenizer, IndexingMode::from(settings.ranking));

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.context("cannot read corpus line")?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: CorpusDoc = serde_json::from_str(&line)
            .with_context(|| format!("malformed corpus document on line {}", lineno + 1))?;
        indexer.add_document(&doc.url, &doc.text);

        if settings
            .doc_limit
            .is_some_and(|limit| indexer.num_docs() as usize >= limit)
        {
            info!("document limit reached");
            break;
        }
    }

    info!(docs = indexer.num_docs(), "ingestion finished");
    dump(indexer.index(), &args.dump, settings.compress)?;
    println!(
        "indexed {} documents into {}",
        indexer.num_docs(),
        args.dump.display()
    );
    Ok(())
}

fn run_query(args: &Args, settings: &IndexSettings) -> Result<()> {
    let Some(query) = &args.input else {
        bail!("no query given; pass a query string or use --index to build");
    };

    let mapped = MappedIndex::open(&args.dump)
        .with_context(|| format!("cannot open index {}", args.dump.display()))?;
    let searcher = Searcher::new(
        IndexSource::from(mapped),
        Tokenizer::new(Stemmer::from(settings.stemmer)),
        settings.ranking,
    );

    let results = searcher.find(query);
    if results.is_empty() {
        println!("no results");
        return Ok(());
    }
    for hit in results {
        println!("{}\t{:.6}", hit.url, hit.score);
    }
    Ok(())
}

//! CLI definition and command dispatch for bm25ctf.
//!
//! ## Configuration Precedence
//!
//! Similarity parameters are resolved with the following precedence (highest to lowest):
//! 1. `--k1`, `--b`, `--d` flags
//! 2. Config file (from `--config` or `BM25CTF_CONFIG`)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;

use bm25ctf_core::norms::{byte4_to_int, int_to_byte4, is_approximate};
use bm25ctf_core::{Bm25CtfSimilarity, Explanation, SimilarityConfig};

use crate::input::{resolve_norm, QueryStats};

// ============================================================================
// CLI Definition
// ============================================================================

/// Version string including git commit hash
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// BM25-CTF similarity – score documents and explain their scores
#[derive(Parser, Debug)]
#[command(name = "bm25ctf")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, env = "BM25CTF_VERBOSE")]
    pub verbose: bool,

    /// Path to a similarity config file (.yaml, .yml, .toml or .json)
    #[arg(long, global = true, env = "BM25CTF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Term frequency saturation (overrides the config file)
    #[arg(long, global = true)]
    pub k1: Option<f32>,

    /// Length normalization, 0 to 1 (overrides the config file)
    #[arg(long, global = true)]
    pub b: Option<f32>,

    /// Lower bound of the tf normalization, 0 to 1 (overrides the config file)
    #[arg(long, global = true)]
    pub d: Option<f32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score every document listed in a statistics file
    #[command(after_help = r#"EXAMPLES:
    # Score with default parameters
    bm25ctf score query.yaml

    # Override k1 and emit JSON
    bm25ctf --k1 0.9 score query.json --json
"#)]
    Score {
        /// Query statistics file (.yaml, .yml, .toml or .json)
        stats: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the explanation tree for one document
    #[command(after_help = r#"EXAMPLES:
    # Explain a document of 80 tokens with freq 3
    bm25ctf explain query.yaml --freq 3 --length 80

    # Explain from a stored norm byte, as JSON
    bm25ctf explain query.yaml --freq 3 --norm 54 --json
"#)]
    Explain {
        /// Query statistics file (.yaml, .yml, .toml or .json)
        stats: PathBuf,

        /// Term frequency within the document
        #[arg(long)]
        freq: f32,

        /// Stored norm byte of the document
        #[arg(long, conflicts_with = "length", required_unless_present = "length")]
        norm: Option<u8>,

        /// Field length of the document, encoded to a norm byte
        #[arg(long)]
        length: Option<u32>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Encode lengths to norm bytes or decode norm bytes to lengths
    Norm {
        #[command(subcommand)]
        action: NormAction,
    },
}

/// Norm codec actions
#[derive(Subcommand, Debug)]
pub enum NormAction {
    /// Encode field lengths to norm bytes
    Encode {
        #[arg(required = true)]
        lengths: Vec<u32>,
    },
    /// Decode norm bytes to field lengths
    Decode {
        #[arg(required = true)]
        bytes: Vec<u8>,
    },
}

// ============================================================================
// Entry point
// ============================================================================

/// Parse arguments, set up logging and run the selected command.
///
/// Returns `ExitCode::SUCCESS` on success, or `ExitCode::FAILURE` on error.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Always show warnings (degenerate statistics), debug only with --verbose
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = format!("bm25ctf_core={},bm25ctf_cli={}", log_level, log_level);

    tracing_subscriber::fmt()
        .with_env_filter(&filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Command::Score { stats, json } => {
            resolve_similarity(&cli).and_then(|sim| handle_score(&sim, stats, *json))
        }
        Command::Explain {
            stats,
            freq,
            norm,
            length,
            json,
        } => resolve_similarity(&cli)
            .and_then(|sim| handle_explain(&sim, stats, *freq, *norm, *length, *json)),
        Command::Norm { action } => {
            handle_norm(action);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Builds the similarity from the config file and flag overrides.
fn resolve_similarity(cli: &Cli) -> Result<Bm25CtfSimilarity> {
    let mut config = match &cli.config {
        Some(path) => SimilarityConfig::load(path)?,
        None => SimilarityConfig::default(),
    };
    if let Some(k1) = cli.k1 {
        config.k1 = k1;
    }
    if let Some(b) = cli.b {
        config.b = b;
    }
    if let Some(d) = cli.d {
        config.d = d;
    }

    let similarity =
        Bm25CtfSimilarity::from_config(&config).context("Invalid similarity parameters")?;
    tracing::debug!(%similarity, "Using similarity");
    Ok(similarity)
}

// ============================================================================
// Command handlers
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoredDocument {
    id: String,
    freq: f32,
    norm: u8,
    length: u32,
    score: f32,
}

fn handle_score(similarity: &Bm25CtfSimilarity, path: &Path, json: bool) -> Result<()> {
    let stats = QueryStats::load(path)?;
    let scorer = similarity.scorer(stats.boost, &stats.collection, &stats.terms);

    let scored = stats
        .documents
        .par_iter()
        .enumerate()
        .map(|(i, doc)| {
            let id = doc.id.clone().unwrap_or_else(|| i.to_string());
            let norm = doc
                .encoded_norm()
                .with_context(|| format!("Document {}", id))?;
            Ok(ScoredDocument {
                score: scorer.score(doc.freq, norm),
                length: byte4_to_int(norm),
                freq: doc.freq,
                norm,
                id,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(documents = scored.len(), weight = scorer.weight(), "Scored documents");

    if json {
        println!("{}", serde_json::to_string_pretty(&scored)?);
    } else {
        for doc in &scored {
            println!("{}\t{}", doc.id, doc.score);
        }
    }
    Ok(())
}

fn handle_explain(
    similarity: &Bm25CtfSimilarity,
    path: &Path,
    freq: f32,
    norm: Option<u8>,
    length: Option<u32>,
    json: bool,
) -> Result<()> {
    let stats = QueryStats::load(path)?;
    let norm = resolve_norm(norm, length)?;
    let scorer = similarity.scorer(stats.boost, &stats.collection, &stats.terms);
    let explanation = scorer.explain(Explanation::freq(freq), norm);

    if json {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
    } else {
        print!("{}", explanation);
    }
    Ok(())
}

fn handle_norm(action: &NormAction) {
    match action {
        NormAction::Encode { lengths } => {
            for &length in lengths {
                let byte = int_to_byte4(length);
                println!("{}\t{}\t{}", length, byte, byte4_to_int(byte));
            }
        }
        NormAction::Decode { bytes } => {
            for &byte in bytes {
                let marker = if is_approximate(byte) { "\tapproximate" } else { "" };
                println!("{}\t{}{}", byte, byte4_to_int(byte), marker);
            }
        }
    }
}

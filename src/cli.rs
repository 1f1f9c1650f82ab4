//! CLI argument parsing for seqmine.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Closure rule applied while mining contiguous patterns.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ClosureArg {
    /// Every frequent contiguous pattern
    All,
    /// Only patterns without an equal-support super-pattern
    Closed,
    /// Only patterns without any frequent super-pattern
    Max,
}

/// Output format for mined patterns
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable "<symbols> #SUP:<n>" lines (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "seqmine")]
#[command(version)]
#[command(about = "Contiguous sequential pattern mining over symbol sequences", long_about = None)]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mine contiguous sequential patterns from an SPMF file
    Mine {
        /// The input SPMF sequence file
        #[arg(short = 'i', long = "in")]
        input: PathBuf,

        /// The minimum absolute support
        #[arg(short = 's', long = "minsup")]
        min_sup: u32,

        /// The closure rule to mine under
        #[arg(long, value_enum, default_value = "closed")]
        closure: ClosureArg,

        /// Write patterns here instead of stdout
        #[arg(short = 'o', long = "out")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Extract gap-tolerant representative paths from the transition graph
    Grasp {
        /// The input SPMF sequence file
        #[arg(short = 'i', long = "in")]
        input: PathBuf,

        /// The minimum absolute support
        #[arg(short = 's', long = "minsup")]
        min_sup: u32,

        /// The maximum gap to allow in patterns (1 = contiguous)
        #[arg(short = 'g', long = "maxgap", default_value = "1")]
        max_gap: usize,

        /// Write patterns here instead of stdout
        #[arg(short = 'o', long = "out")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Select the most-covered, least-redundant patterns
    Distinct {
        /// The input SPMF sequence file
        #[arg(short = 'i', long = "in")]
        input: PathBuf,

        /// The minimum absolute support
        #[arg(short = 's', long = "minsup")]
        min_sup: u32,

        /// The maximum allowable redundancy per pattern, between 0 and 1
        #[arg(short = 'r', long = "maxredund", default_value = "0.5")]
        max_redundancy: f64,

        /// Write patterns here instead of stdout
        #[arg(short = 'o', long = "out")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Simplify a sequence database through its transition graph
    Simplify {
        /// The input SPMF sequence file
        #[arg(short = 'i', long = "in")]
        input: PathBuf,

        /// The minimum absolute support for the lossless pass
        #[arg(short = 's', long = "minsup")]
        min_sup: u32,

        /// Lossy reduction goal in [0, 1]; 0 keeps the pass lossless
        #[arg(long, default_value = "0")]
        factor: f64,

        /// Where to write the simplified SPMF file
        #[arg(short = 'o', long = "out")]
        output: PathBuf,
    },

    /// Print statistics about an SPMF sequence file
    Stats {
        /// The input SPMF sequence file
        #[arg(short = 'i', long = "in")]
        input: PathBuf,
    },

    /// Generate a synthetic sequence database
    Generate {
        /// How many sequences to generate
        #[arg(short = 'n', long, default_value = "100")]
        num_sequences: usize,

        /// Length of each sequence
        #[arg(short = 'l', long, default_value = "20")]
        sequence_length: usize,

        /// Symbols are drawn from 0..alphabet
        #[arg(short = 'a', long, default_value = "50")]
        alphabet: u32,

        /// Comma-separated motif to plant in half the sequences
        #[arg(long, value_delimiter = ',')]
        motif: Option<Vec<u32>>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the generated SPMF file
        #[arg(short = 'o', long = "out")]
        output: PathBuf,
    },
}

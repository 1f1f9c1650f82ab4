use anyhow::{Context, Result};
use clap::Parser;
use seqmine::cli::{Cli, ClosureArg, Command, OutputFormat};
use seqmine::json_output::JsonMiningResult;
use seqmine::mine::{ContiguousMiner, DistinctMiner, GraphSimplifier, GraspMiner, SpmParameters};
use seqmine::pattern::SequentialPattern;
use seqmine::stats::SequenceDbStats;
use seqmine::{generate, spmf};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Command::Mine {
            input,
            min_sup,
            closure,
            output,
            format,
        } => {
            let params = SpmParameters::new(spmf::read_sequences(&input)?, min_sup)?;
            let miner = match closure {
                ClosureArg::All => ContiguousMiner::all(),
                ClosureArg::Closed => ContiguousMiner::closed(),
                ClosureArg::Max => ContiguousMiner::max(),
            };
            let algorithm = format!("{closure:?}").to_lowercase();

            let started = Instant::now();
            let patterns = miner.run(&params);
            eprintln!(
                "mined {} patterns in {}ms",
                patterns.len(),
                started.elapsed().as_millis()
            );
            write_patterns(&algorithm, min_sup, patterns, output.as_deref(), format)
        }

        Command::Grasp {
            input,
            min_sup,
            max_gap,
            output,
            format,
        } => {
            let params = SpmParameters::new(spmf::read_sequences(&input)?, min_sup)?
                .with_max_gap(max_gap)?;

            let started = Instant::now();
            let paths = GraspMiner::new(params.min_sup(), params.max_gap()).run_database(&params);
            eprintln!(
                "extracted {} representative paths in {}ms",
                paths.len(),
                started.elapsed().as_millis()
            );
            let patterns = paths.iter().map(|p| p.to_pattern()).collect();
            write_patterns("grasp", min_sup, patterns, output.as_deref(), format)
        }

        Command::Distinct {
            input,
            min_sup,
            max_redundancy,
            output,
            format,
        } => {
            let params = SpmParameters::new(spmf::read_sequences(&input)?, min_sup)?
                .with_max_redundancy(max_redundancy)?;

            let started = Instant::now();
            let patterns = DistinctMiner::new().run(&params);
            eprintln!(
                "selected {} distinct patterns in {}ms",
                patterns.len(),
                started.elapsed().as_millis()
            );
            write_patterns("distinct", min_sup, patterns, output.as_deref(), format)
        }

        Command::Simplify {
            input,
            min_sup,
            factor,
            output,
        } => {
            let db = spmf::read_sequences(&input)?;
            // validate support/shape the same way the miners do
            let params = SpmParameters::new(db, min_sup)?;
            let simplifier = GraphSimplifier::new();
            let simplified = if factor > 0.0 {
                simplifier.lossy(params.sequences(), factor, min_sup)
            } else {
                simplifier.lossless(params.sequences(), min_sup)
            };
            spmf::write_sequences(&output, &simplified)?;
            eprintln!("simplified database written to {}", output.display());
            Ok(())
        }

        Command::Stats { input } => {
            let db = spmf::read_sequences(&input)?;
            println!("{}", SequenceDbStats::calculate(&db));
            Ok(())
        }

        Command::Generate {
            num_sequences,
            sequence_length,
            alphabet,
            motif,
            seed,
            output,
        } => {
            let mut config =
                generate::SyntheticConfig::new(num_sequences, sequence_length, alphabet);
            if let Some(motif) = motif {
                config = config.with_motif(motif);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let db = generate::generate(&config);
            spmf::write_sequences(&output, &db)?;
            eprintln!("generated {} sequences to {}", db.len(), output.display());
            Ok(())
        }
    }
}

/// Write patterns as text or JSON, to a file or stdout.
fn write_patterns(
    algorithm: &str,
    min_sup: u32,
    patterns: Vec<SequentialPattern>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create output file: {}", path.display())
        })?)),
        None => Box::new(std::io::stdout().lock()),
    };

    match format {
        OutputFormat::Text => {
            for pattern in &patterns {
                writeln!(writer, "{pattern}").context("failed to write pattern")?;
            }
        }
        OutputFormat::Json => {
            JsonMiningResult::new(algorithm, min_sup, patterns).write_to(&mut writer)?;
            writeln!(writer).context("failed to write trailing newline")?;
        }
    }
    writer.flush().context("failed to flush pattern output")
}

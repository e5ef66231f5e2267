use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use keyslip::generator::{GeneratorConfig, TypoGenerator, DEFAULT_MAX_TRIES};
use keyslip::keyboard::NeighborRatio;
use keyslip::layout::{LayoutFile, LayoutRegistry};
use keyslip::model::{Corruption, TextCorruption, TypoDistribution};
use keyslip::sentence::UnicodeSentenceTokenizer;
use keyslip::stats::{self, CorruptionStats};
use keyslip::trace::edit_trace;

#[derive(Debug, Args, Clone)]
struct LayoutArgs {
    /// Extra keyboard layout (JSON) to register; may be repeated.
    ///
    /// Fields: language, code, rows, and optionally alt_rows, alt_base, left, right, ignore.
    #[arg(long = "layout", value_name = "PATH")]
    layouts: Vec<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(name = "keyslip")]
#[command(about = "Keyboard-proximity typo injection for text augmentation", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Insert typos into a text
    Corrupt {
        /// Input text file, or '-' for stdin
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Registered language name
        #[arg(long, default_value = "english")]
        language: String,

        /// Fraction of words to corrupt (0.0-1.0)
        #[arg(long, default_value_t = 0.1)]
        typo_rate: f64,

        /// Retry budget per sentence
        #[arg(long, default_value_t = DEFAULT_MAX_TRIES)]
        max_tries: usize,

        /// Optional RNG seed (for reproducible output)
        #[arg(long)]
        seed: Option<u64>,

        /// Edit-kind weights, e.g. delete=0.3,insert=0.1,replace=0.3,transpose=0.3
        #[arg(long, value_delimiter = ',', value_name = "KIND=WEIGHT")]
        distribution: Vec<String>,

        /// Weight of horizontally adjacent keys
        #[arg(long, default_value_t = 9.0)]
        horizontal: f64,

        /// Weight of vertically adjacent keys
        #[arg(long, default_value_t = 1.0)]
        vertical: f64,

        /// Also corrupt words containing number words or digits
        #[arg(long)]
        keep_ignored: bool,

        /// Treat the whole input as one sentence
        #[arg(long)]
        no_sentence_split: bool,

        /// Write a JSON report of every accepted edit
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,

        /// Print one line per accepted edit to stderr
        #[arg(long)]
        trace: bool,

        #[command(flatten)]
        layouts: LayoutArgs,
    },

    /// List supported languages
    Languages {
        #[command(flatten)]
        layouts: LayoutArgs,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == std::ffi::OsStr::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: &PathBuf, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_registry(args: &LayoutArgs) -> Result<LayoutRegistry> {
    let mut registry = LayoutRegistry::builtin();

    for path in &args.layouts {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file: LayoutFile = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse layout JSON {}", path.display()))?;
        let language = file.language.clone();
        file.register_into(&mut registry)
            .with_context(|| format!("failed to register layout {}", path.display()))?;
        info!("registered layout '{language}' from {}", path.display());
    }

    Ok(registry)
}

fn print_trace(reports: &[Corruption]) {
    for (sentence, report) in reports.iter().enumerate() {
        for event in edit_trace(report) {
            eprintln!("[{sentence}:{}] {}", event.word_index, event.line);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Corrupt {
            input,
            output,
            language,
            typo_rate,
            max_tries,
            seed,
            distribution,
            horizontal,
            vertical,
            keep_ignored,
            no_sentence_split,
            report,
            trace,
            layouts,
        } => {
            let registry = load_registry(&layouts)?;
            let distribution = if distribution.is_empty() {
                TypoDistribution::default()
            } else {
                TypoDistribution::parse_pairs(&distribution)?
            };

            let cfg = GeneratorConfig {
                language,
                use_excluding_set: !keep_ignored,
                distribution,
                neighbor_ratio: NeighborRatio::new(horizontal, vertical)?,
            };
            let generator = TypoGenerator::new(&registry, cfg)?;
            let mut rng = rng_from_seed(seed);

            let text = read_input(&input)?;
            let corrupted = if no_sentence_split {
                let single = generator.corrupt(&text, typo_rate, max_tries, &mut rng)?;
                TextCorruption {
                    text: single.text.clone(),
                    sentences: vec![single],
                }
            } else {
                generator.corrupt_sentences(
                    &text,
                    typo_rate,
                    max_tries,
                    &UnicodeSentenceTokenizer,
                    &mut rng,
                )?
            };

            let totals = corrupted
                .sentences
                .iter()
                .map(stats::stats)
                .fold(CorruptionStats::default(), CorruptionStats::merge);
            eprintln!(
                "Corrupted: {}/{} words ({} target), {} deletes, {} inserts, {} replaces, {} transposes, {} tries",
                totals.typoed,
                totals.words,
                totals.target,
                totals.deletes,
                totals.inserts,
                totals.replaces,
                totals.transposes,
                totals.tries
            );
            if totals.typoed < totals.target {
                eprintln!(
                    "Retry budget exhausted: {} of {} planned typos were placed.",
                    totals.typoed, totals.target
                );
            }

            if trace {
                print_trace(&corrupted.sentences);
            }

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&corrupted)
                    .context("failed to serialize report")?;
                write_output(&path, &json)?;
            }

            if let Some(out) = output {
                write_output(&out, &corrupted.text)?;
            } else {
                println!("{}", corrupted.text);
            }
        }
        Command::Languages { layouts } => {
            let registry = load_registry(&layouts)?;
            for (name, code) in registry.supported_languages() {
                println!("{name}\t{code}");
            }
        }
    }

    Ok(())
}

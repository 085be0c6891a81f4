//! nerprep: NER training data from character-offset annotations.
//!
//! nerprep turns annotated resumes (Dataturks JSON lines: raw text plus
//! character ranges and labels) into token-aligned, non-overlapping entity
//! spans, and splits the result reproducibly into train and test sets.
//!
//! # Modules
//!
//! - [`ir`]: Value types (records, tokens, spans, training examples) and I/O
//! - [`tokenize`]: The tokenizer capability and a rule-based tokenizer
//! - [`spans`]: Alignment, trimming and overlap resolution
//! - [`split`]: Seeded train/test splitting
//! - [`pipeline`]: The per-record and per-corpus driver, plus its report
//! - [`tagging`]: BILOU tags for sequence labelers
//! - [`model`]: Trainer/model capabilities and evaluation
//! - [`error`]: Error types for nerprep operations

pub mod error;
pub mod ir;
pub mod model;
pub mod pipeline;
pub mod spans;
pub mod split;
pub mod tagging;
pub mod tokenize;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub use error::NerPrepError;

/// The nerprep CLI application.
#[derive(Parser)]
#[command(name = "nerprep")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Build train/test training sets from an annotation export.
    Prepare(PrepareArgs),
    /// Emit per-token BILOU tags for every record.
    Tags(TagsArgs),
}

/// Arguments for the prepare subcommand.
#[derive(clap::Args)]
struct PrepareArgs {
    /// Dataturks JSON-lines export to read.
    input: PathBuf,

    /// Directory that receives train.json and test.json.
    #[arg(long, short = 'o')]
    out_dir: PathBuf,

    /// Fraction of examples held out for testing (0.0 to 1.0).
    #[arg(long, default_value_t = 0.1, env = "NERPREP_TEST_FRACTION")]
    test_fraction: f64,

    /// Seed for the train/test shuffle.
    #[arg(long, default_value_t = 42, env = "NERPREP_SEED")]
    seed: u64,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,

    /// Fail without writing anything if any annotation data was dropped.
    #[arg(long)]
    strict: bool,
}

/// Arguments for the tags subcommand.
#[derive(clap::Args)]
struct TagsArgs {
    /// Dataturks JSON-lines export to read.
    input: PathBuf,

    /// Write JSON lines here instead of stdout.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

/// Run the nerprep CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), NerPrepError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Prepare(args)) => run_prepare(args),
        Some(Commands::Tags(args)) => run_tags(args),
        None => {
            println!("nerprep {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("NER training data from character-offset annotations.");
            println!();
            println!("Run 'nerprep --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the prepare subcommand.
fn run_prepare(args: PrepareArgs) -> Result<(), NerPrepError> {
    let json_report = match args.report.as_str() {
        "text" => false,
        "json" => true,
        other => {
            return Err(NerPrepError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    };

    let opts = split::SplitOptions {
        test_fraction: args.test_fraction,
        seed: args.seed,
    };
    split::validate_split_options(&opts)?;

    let corpus = ir::io_dataturks::read_dataturks_jsonl(&args.input)?;
    let prepared = pipeline::prepare_corpus(&corpus, &tokenize::RuleTokenizer::new(), &opts)?;

    if json_report {
        let json = serde_json::to_string_pretty(&prepared.report)
            .map_err(NerPrepError::ReportSerialize)?;
        println!("{}", json);
    } else {
        println!(
            "Prepared {} -> {}:",
            args.input.display(),
            args.out_dir.display()
        );
        print!("{}", prepared.report);
    }

    let warning_count = prepared.report.warning_count();
    if args.strict && warning_count > 0 {
        return Err(NerPrepError::StrictFailed {
            warning_count,
            report: Box::new(prepared.report),
        });
    }

    fs::create_dir_all(&args.out_dir)?;
    ir::io_json::write_training_json(&args.out_dir.join("train.json"), &prepared.train)?;
    ir::io_json::write_training_json(&args.out_dir.join("test.json"), &prepared.test)?;

    Ok(())
}

/// Execute the tags subcommand.
fn run_tags(args: TagsArgs) -> Result<(), NerPrepError> {
    let corpus = ir::io_dataturks::read_dataturks_jsonl(&args.input)?;
    let (outcomes, report) = pipeline::process_corpus(&corpus, &tokenize::RuleTokenizer::new());

    let (mut out, target): (Box<dyn Write>, &Path) = match &args.output {
        Some(path) => (Box::new(BufWriter::new(File::create(path)?)), path.as_path()),
        None => (Box::new(io::stdout().lock()), Path::new("<stdout>")),
    };

    for outcome in &outcomes {
        let tagged = tagging::TaggedExample::new(&outcome.tokens, &outcome.example.entities);
        serde_json::to_writer(&mut out, &tagged).map_err(|source| NerPrepError::TagsWrite {
            path: target.to_path_buf(),
            source,
        })?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    // The tags may be going to stdout, so the summary goes to stderr.
    eprint!("{}", report);

    Ok(())
}

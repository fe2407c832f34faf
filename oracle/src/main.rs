//! Expected-outbox oracle for numbered puzzle levels.
//!
//! Prints the outbox a correct solution produces for a level and inbox,
//! checks a player's outbox against it, and replays the level catalog's
//! worked examples.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use oracle::check::{CheckOutcome, check_solution};
use oracle::core::compare::Mismatch;
use oracle::core::error::GenerateError;
use oracle::core::item::{Item, LevelId, format_items, parse_items};
use oracle::exit_codes;
use oracle::io::config::{DEFAULT_CONFIG_PATH, OracleConfig, OutputFormat, write_config};
use oracle::logging;
use oracle::session::Session;
use oracle::verify::{FailureKind, verify_catalog};

#[derive(Parser)]
#[command(
    name = "oracle",
    version,
    about = "Expected-outbox oracle for numbered puzzle levels"
)]
struct Cli {
    /// Config file; a missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Debug-level tracing on stderr when `RUST_LOG` is unset.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file at `--config`.
    Init {
        /// Replace an existing config file.
        #[arg(long)]
        force: bool,
    },
    /// List known levels and whether each has a transform.
    Levels,
    /// Print the expected outbox for an inbox.
    Generate {
        level: LevelId,
        /// Inbox items: integers and single letters, or one JSON array.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        items: Vec<String>,
    },
    /// Compare a player's outbox with the expected one.
    Check {
        level: LevelId,
        /// Inbox items, whitespace/comma separated or a JSON array.
        #[arg(long, allow_hyphen_values = true)]
        inbox: String,
        /// The player's outbox, same format as `--inbox`.
        #[arg(long, allow_hyphen_values = true)]
        outbox: String,
    },
    /// Replay every worked example in the level catalog.
    Verify,
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_codes::INVALID
            } else {
                exit_codes::OK
            };
            err.print().context("print usage")?;
            return Ok(code);
        }
    };
    logging::init(cli.verbose);
    let session = || Session::open(&cli.config);
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Levels => cmd_levels(&session()?),
        Command::Generate { level, items } => cmd_generate(&session()?, level, &items.join(" ")),
        Command::Check {
            level,
            inbox,
            outbox,
        } => cmd_check(&session()?, level, &inbox, &outbox),
        Command::Verify => cmd_verify(&session()?),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to replace it", path.display());
    }
    write_config(path, &OracleConfig::default())?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_levels(session: &Session) -> Result<i32> {
    let mut rows: BTreeMap<LevelId, (bool, Option<&str>)> = BTreeMap::new();
    for level in session.catalog.levels() {
        rows.insert(level.number, (false, Some(level.name.as_str())));
    }
    for (level, entry) in session.registry.levels() {
        rows.entry(level).or_insert((false, None)).0 = entry.is_implemented();
    }
    for (level, (implemented, name)) in rows {
        let status = if implemented {
            "implemented"
        } else {
            "unimplemented"
        };
        println!("{:>3} {:<13} {}", level, status, name.unwrap_or("-"));
    }
    Ok(exit_codes::OK)
}

fn cmd_generate(session: &Session, level: LevelId, items: &str) -> Result<i32> {
    let inbox = parse_items(items).context("parse inbox")?;
    match session.registry.generate(level, &inbox) {
        Ok(outbox) => {
            println!("{}", render(session.config.output, &outbox)?);
            Ok(exit_codes::OK)
        }
        Err(err) => report_generate_error(err),
    }
}

fn cmd_check(session: &Session, level: LevelId, inbox: &str, outbox: &str) -> Result<i32> {
    let inbox = parse_items(inbox).context("parse --inbox")?;
    let outbox = parse_items(outbox).context("parse --outbox")?;
    match check_solution(&session.registry, level, &inbox, &outbox) {
        Ok(CheckOutcome::Match) => {
            println!("match");
            Ok(exit_codes::OK)
        }
        Ok(CheckOutcome::Mismatch { expected, at }) => {
            println!("mismatch: {}", describe_mismatch(&at));
            println!("expected: {}", render(session.config.output, &expected)?);
            Ok(exit_codes::MISMATCH)
        }
        Err(err) => report_generate_error(err),
    }
}

fn cmd_verify(session: &Session) -> Result<i32> {
    let report = verify_catalog(&session.catalog, &session.registry);
    for failure in &report.failures {
        let detail = match &failure.kind {
            FailureKind::Mismatch(at) => describe_mismatch(at),
            FailureKind::MalformedInput(err) => err.to_string(),
        };
        println!(
            "fail: level={} example={} {}",
            failure.level, failure.example, detail
        );
    }
    println!(
        "verify: passed={} failed={} skipped={}",
        report.passed,
        report.failures.len(),
        report.skipped.len()
    );
    if report.is_clean() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::MISMATCH)
    }
}

/// Not-implemented is an expected answer with its own exit code; anything
/// else is an error.
fn report_generate_error(err: GenerateError) -> Result<i32> {
    if err.is_not_implemented() {
        eprintln!("{}", err);
        return Ok(exit_codes::for_generate_error(&err));
    }
    Err(err.into())
}

fn render(format: OutputFormat, items: &[Item]) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(format_items(items)),
        OutputFormat::Json => serde_json::to_string(items).context("serialize outbox"),
    }
}

fn describe_mismatch(at: &Mismatch) -> String {
    let show = |item: Option<Item>| item.map_or_else(|| "<end>".to_string(), |item| item.to_string());
    format!(
        "index {}: expected {}, got {}",
        at.index,
        show(at.expected),
        show(at.actual)
    )
}

//! Surveyor CLI - drives the assessment engine from the command line.
//!
//! Thin binary: argument parsing, tracing setup, and catalog loading live
//! here; all assessment logic is in `surveyor-store` and `surveyor-report`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use surveyor_report::{compliance_stats, export_csv, overall_progress};
use surveyor_store::{FileBackend, SessionStore};
use surveyor_types::{AssessmentConfig, Catalog, SessionId};

const USAGE: &str = "\
Usage: surveyor [--catalog <path>] [--data <dir>] <command>

Commands:
  list                 List all assessments, most recently updated first
  new <config.json>    Start a new assessment from a config file
  load <id>            Make an assessment active
  reset                Close the active assessment without deleting it
  complete <id>        Mark an assessment completed
  delete <id>          Delete an assessment
  progress             Overall progress of the active assessment
  stats                Compliance stats of the active assessment
  export-csv           Write the CSV report for the active assessment to stdout
";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .expect("warn filter is valid");
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct Args {
    catalog: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    command: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        catalog: None,
        data_dir: None,
        command: Vec::new(),
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => {
                let path = args.next().context("--catalog requires a path")?;
                parsed.catalog = Some(PathBuf::from(path));
            }
            "--data" => {
                let path = args.next().context("--data requires a directory")?;
                parsed.data_dir = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                parsed.command = vec!["help".to_string()];
                return Ok(parsed);
            }
            _ => {
                parsed.command.push(arg);
                parsed.command.extend(args.by_ref());
            }
        }
    }
    Ok(parsed)
}

fn data_dir(args: &Args) -> Result<PathBuf> {
    if let Some(dir) = &args.data_dir {
        return Ok(dir.clone());
    }
    let base = dirs::data_dir().context("no data directory available; pass --data <dir>")?;
    Ok(base.join("surveyor"))
}

fn load_catalog(args: &Args) -> Result<Catalog> {
    let path = args
        .catalog
        .clone()
        .or_else(|| std::env::var_os("SURVEYOR_CATALOG").map(PathBuf::from))
        .context("no catalog given; pass --catalog <path> or set SURVEYOR_CATALOG")?;
    let bytes = std::fs::read(&path)
        .with_context(|| format!("failed to read catalog at {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse catalog at {}", path.display()))
}

fn open_store(args: &Args) -> Result<SessionStore<FileBackend>> {
    let dir = data_dir(args)?;
    let backend = FileBackend::open(&dir)
        .with_context(|| format!("failed to open data directory {}", dir.display()))?;
    Ok(SessionStore::open(backend)?)
}

fn main() -> Result<()> {
    init_tracing();
    let args = parse_args()?;

    let command: Vec<&str> = args.command.iter().map(String::as_str).collect();
    match command.as_slice() {
        [] | ["help"] => {
            print!("{USAGE}");
            Ok(())
        }
        ["list"] => cmd_list(&args),
        ["new", config_path] => cmd_new(&args, config_path),
        ["load", id] => cmd_load(&args, id),
        ["reset"] => cmd_reset(&args),
        ["complete", id] => cmd_complete(&args, id),
        ["delete", id] => cmd_delete(&args, id),
        ["progress"] => cmd_progress(&args),
        ["stats"] => cmd_stats(&args),
        ["export-csv"] => cmd_export_csv(&args),
        other => bail!("unknown command {:?}\n\n{USAGE}", other.join(" ")),
    }
}

fn cmd_list(args: &Args) -> Result<()> {
    let store = open_store(args)?;
    let active_id = store.active().map(|s| s.id.clone());
    let sessions = store.list()?;
    if sessions.is_empty() {
        println!("no assessments");
        return Ok(());
    }
    for session in sessions {
        let marker = if Some(&session.id) == active_id.as_ref() {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {}  {:<12}  {}  ({} answers)",
            session.id,
            session.status.as_str(),
            session.config.customer.name,
            session.answers.len(),
        );
    }
    Ok(())
}

fn cmd_new(args: &Args, config_path: &str) -> Result<()> {
    let bytes = std::fs::read(config_path)
        .with_context(|| format!("failed to read config at {config_path}"))?;
    let config: AssessmentConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse config at {config_path}"))?;

    let mut store = open_store(args)?;
    let id = store.start_new(config)?;
    println!("{id}");
    Ok(())
}

fn cmd_load(args: &Args, id: &str) -> Result<()> {
    let mut store = open_store(args)?;
    store.load(&SessionId::new(id))?;
    println!("active: {id}");
    Ok(())
}

fn cmd_reset(args: &Args) -> Result<()> {
    let mut store = open_store(args)?;
    store.reset_active()?;
    Ok(())
}

fn cmd_complete(args: &Args, id: &str) -> Result<()> {
    let mut store = open_store(args)?;
    store.complete(&SessionId::new(id))?;
    println!("completed: {id}");
    Ok(())
}

fn cmd_delete(args: &Args, id: &str) -> Result<()> {
    let mut store = open_store(args)?;
    store.delete(&SessionId::new(id))?;
    println!("deleted: {id}");
    Ok(())
}

fn cmd_progress(args: &Args) -> Result<()> {
    let catalog = load_catalog(args)?;
    let store = open_store(args)?;
    let session = store.active().context("no active assessment")?;

    let overall = overall_progress(&catalog, &session.answers);
    println!(
        "overall: {}/{} ({}%)",
        overall.completed, overall.total, overall.percentage
    );
    for category in catalog.categories() {
        let progress = surveyor_report::category_progress(&catalog, &session.answers, &category.id);
        println!(
            "  {}: {}/{} ({}%)",
            category.title, progress.completed, progress.total, progress.percentage
        );
    }
    Ok(())
}

fn cmd_stats(args: &Args) -> Result<()> {
    let catalog = load_catalog(args)?;
    let store = open_store(args)?;
    let session = store.active().context("no active assessment")?;

    let stats = compliance_stats(&catalog, &session.answers);
    println!("compliance score: {}%", stats.compliance_score);
    println!("applicable: {}  compliant: {}", stats.applicable, stats.compliant);
    println!(
        "risks: high {}  medium {}  low {}  unknown {}  (total {})",
        stats.high, stats.medium, stats.low, stats.unknown, stats.total_risks
    );
    Ok(())
}

fn cmd_export_csv(args: &Args) -> Result<()> {
    let catalog = load_catalog(args)?;
    let store = open_store(args)?;
    let session = store.active().context("no active assessment")?;

    print!("{}", export_csv(&catalog, &session.answers));
    Ok(())
}

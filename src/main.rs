//! Fixgrid - a spreadsheet whose formulas are rewritten to a fixed point

mod config;

use anyhow::{Context, bail};
use fixgrid_core::{Document, Selection};
use fixgrid_core::storage::write_grd_content;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage: fixgrid [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Spreadsheet file to open (.grd)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula and print the result");
    eprintln!("  -s, --set <REF=VALUE>     Set a cell before evaluating (can be repeated)");
    eprintln!("  -a, --apply <RANGE=VALUE> Write one input to every cell of a range (can be repeated)");
    eprintln!("  -o, --output <FILE>       Export to markdown file (non-interactive)");
    eprintln!("  --max-passes <N>          Give up on a formula after N passes");
    eprintln!("  --config <FILE>           Read settings from this TOML file");
    eprintln!("  --no-config               Ignore the user config file");
    eprintln!("  -v, --verbose             Log evaluation steps to stderr");
    eprintln!("  -h, --help                Print help");
}

/// A cell edit from the command line, applied in the order given.
#[derive(Debug)]
enum Edit {
    Set { cell: String, input: String },
    Apply { range: String, input: String },
}

#[derive(Debug, Default)]
struct Args {
    file_path: Option<PathBuf>,
    command: Option<String>,
    edits: Vec<Edit>,
    output_file: Option<PathBuf>,
    max_passes: Option<usize>,
    config_file: Option<PathBuf>,
    no_config: bool,
    verbose: bool,
}

fn usage_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    print_usage();
    std::process::exit(1);
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        let mut value = |flag: &str| -> String {
            i += 1;
            match args.get(i) {
                Some(v) => v.clone(),
                None => usage_error(&format!("{} requires a value", flag)),
            }
        };
        match arg {
            "-h" | "--help" => {
                print_usage();
                return None;
            }
            "-c" | "--command" => parsed.command = Some(value("--command")),
            "-s" | "--set" => {
                let assignment = value("--set");
                let Some((cell, input)) = assignment.split_once('=') else {
                    usage_error(&format!("--set expects REF=VALUE, got: {}", assignment));
                };
                parsed.edits.push(Edit::Set {
                    cell: cell.to_string(),
                    input: input.to_string(),
                });
            }
            "-a" | "--apply" => {
                let assignment = value("--apply");
                let Some((range, input)) = assignment.split_once('=') else {
                    usage_error(&format!("--apply expects RANGE=VALUE, got: {}", assignment));
                };
                parsed.edits.push(Edit::Apply {
                    range: range.to_string(),
                    input: input.to_string(),
                });
            }
            "-o" | "--output" => parsed.output_file = Some(PathBuf::from(value("--output"))),
            "--max-passes" => {
                let raw = value("--max-passes");
                match raw.parse::<usize>() {
                    Ok(n) if n > 0 => parsed.max_passes = Some(n),
                    _ => usage_error(&format!(
                        "--max-passes expects a positive integer, got: {}",
                        raw
                    )),
                }
            }
            "--config" => parsed.config_file = Some(PathBuf::from(value("--config"))),
            "--no-config" => parsed.no_config = true,
            "-v" | "--verbose" => parsed.verbose = true,
            _ if arg.starts_with('-') => usage_error(&format!("Unknown option: {}", arg)),
            _ => {
                if parsed.file_path.is_none() {
                    parsed.file_path = Some(PathBuf::from(arg));
                } else {
                    usage_error(&format!("Unexpected argument: {}", arg));
                }
            }
        }
        i += 1;
    }

    Some(parsed)
}

fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "fixgrid=debug,fixgrid_core=debug,fixgrid_engine=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `true` when a command produced the error marker.
fn run(args: Args) -> anyhow::Result<bool> {
    let (mut config, warnings) = if args.no_config {
        (config::Config::default(), Vec::new())
    } else {
        config::load_config(args.config_file.as_ref())
    };
    for warning in warnings {
        warn!("{}", warning);
    }
    if let Some(max_passes) = args.max_passes {
        config.max_passes = max_passes;
    }

    let mut doc = Document::with_options(config.eval_options(), &config.error_marker);
    if let Some(path) = &args.file_path {
        doc.open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
    }

    for edit in &args.edits {
        match edit {
            Edit::Set { cell, input } => {
                let stored = doc.set_cell_by_name(cell, input)?;
                debug!(cell = cell.as_str(), stored = stored.as_str(), "--set");
            }
            Edit::Apply { range, input } => {
                let selection = Selection::parse(range)?;
                let outcome = doc.apply_to_selection(&selection, input);
                debug!(
                    %selection,
                    written = outcome.written,
                    value = outcome.value.as_str(),
                    "--apply"
                );
                if outcome.relative_refs_warning {
                    warn!(
                        "{}: references were not shifted, every cell got {}",
                        selection, outcome.value
                    );
                }
            }
        }
    }

    let mut failed = false;
    if let Some(command) = &args.command {
        let result = doc.evaluate_input(command);
        failed = result == doc.error_marker;
        println!("{}", result);
    }

    if let Some(output_path) = &args.output_file {
        doc.export_markdown(output_path)
            .with_context(|| format!("failed to export {}", output_path.display()))?;
        println!("Exported to {}", output_path.display());
    } else if args.command.is_none() {
        if args.file_path.is_none() && args.edits.is_empty() {
            bail!("nothing to do: give a FILE, --set, --apply, --command or --output");
        }
        print!("{}", write_grd_content(&doc));
    }

    Ok(failed)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&args) else {
        return ExitCode::SUCCESS;
    };
    init_logging(args.verbose);

    match run(args) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info, warn};

use tablecopy::clipboard::{ClipboardSink, StdoutSink, SystemClipboard};
use tablecopy::command::CopyCommand;
use tablecopy::config::{QuoteType, SettingsFile, SettingsOverrides, SettingsSource};
use tablecopy::copier::{copy_and_clear, CopyOutcome};
use tablecopy::fileio::FileIO;
use tablecopy::selection::{CellPosition, SelectionState};
use tablecopy::serialize::CopyMode;
use tablecopy::util::parse_range;
use tablecopy::Result;

#[derive(Default)]
struct Args {
    file_path: Option<PathBuf>,
    range: Option<String>,
    mode: CopyMode,
    use_csv: Option<bool>,
    quote_strings: Option<bool>,
    quote_type: Option<QuoteType>,
    print: bool,
    settings_path: Option<PathBuf>,
    set: Vec<(String, String)>,
    show_settings: bool,
}

/// Take the value following an option, exiting if it is missing
fn option_value(args: &[String], i: usize, name: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires an argument", name);
            std::process::exit(1);
        }
    }
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--range" => {
                parsed.range = Some(option_value(&args, i, "--range"));
                i += 2;
            }
            "-c" | "--command" => {
                let name = option_value(&args, i, "--command");
                match CopyCommand::parse(&name) {
                    Some(command) => parsed.mode = command.mode(),
                    None => {
                        eprintln!("Unknown command: '{}'. Use copy-table-data or copy-table-data-flipped.", name);
                        std::process::exit(1);
                    }
                }
                i += 2;
            }
            "-t" | "--transpose" => {
                parsed.mode = CopyMode::Transposed;
                i += 1;
            }
            "--csv" => {
                parsed.use_csv = Some(true);
                i += 1;
            }
            "--tsv" => {
                parsed.use_csv = Some(false);
                i += 1;
            }
            "--quote" => {
                parsed.quote_strings = Some(true);
                i += 1;
            }
            "--no-quote" => {
                parsed.quote_strings = Some(false);
                i += 1;
            }
            "--quote-char" => {
                let value = option_value(&args, i, "--quote-char");
                parsed.quote_type = match value.as_str() {
                    "double" | "\"" => Some(QuoteType::Double),
                    "single" | "'" => Some(QuoteType::Single),
                    _ => {
                        eprintln!("Invalid quote character: '{}'. Use single or double.", value);
                        std::process::exit(1);
                    }
                };
                i += 2;
            }
            "-p" | "--print" => {
                parsed.print = true;
                i += 1;
            }
            "--settings" => {
                parsed.settings_path = Some(PathBuf::from(option_value(&args, i, "--settings")));
                i += 2;
            }
            "--set" => {
                let pair = option_value(&args, i, "--set");
                match pair.split_once('=') {
                    Some((key, value)) => parsed.set.push((key.trim().to_string(), value.trim().to_string())),
                    None => {
                        eprintln!("Error: --set expects KEY=VALUE");
                        std::process::exit(1);
                    }
                }
                i += 2;
            }
            "--show-settings" => {
                parsed.show_settings = true;
                i += 1;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                std::process::exit(1);
            }
            _ => {
                parsed.file_path = Some(PathBuf::from(&args[i]));
                i += 1;
            }
        }
    }

    parsed
}

/// Log panics before the default hook prints them
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occurred"
            );
        } else {
            error!("panic occurred");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

fn print_help() {
    eprintln!("tablecopy - Copy a range of table cells as TSV or CSV");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    tablecopy [OPTIONS] FILE");
    eprintln!("    tablecopy --set KEY=VALUE");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -r, --range <A1:C3>      Cells to copy (default: whole table)");
    eprintln!("    -t, --transpose          Copy rows as columns");
    eprintln!("    -c, --command <NAME>     copy-table-data or copy-table-data-flipped");
    eprintln!("    --csv | --tsv            Override the delimiter for this copy");
    eprintln!("    --quote | --no-quote     Override quoting of text columns for this copy");
    eprintln!("    --quote-char <CHAR>      single or double");
    eprintln!("    -p, --print              Write to stdout instead of the clipboard");
    eprintln!("    --settings <PATH>        Settings file (default: ~/.config/tablecopy/settings.toml)");
    eprintln!("    --set <KEY=VALUE>        Save a setting: useCSV, quoteStrings, quoteType, escapeQuotes");
    eprintln!("    --show-settings          Print the saved settings");
    eprintln!("    -h, --help               Print this help message");
    eprintln!();
    eprintln!("COMMANDS:");
    for command in CopyCommand::ALL {
        eprintln!("    {}", command.help_line());
    }
}

fn run(args: Args) -> Result<bool> {
    let store = match args.settings_path {
        Some(path) => SettingsFile::new(path),
        None => SettingsFile::default_location(),
    };

    for (key, value) in &args.set {
        store.set(key, value)?;
    }

    if args.show_settings {
        print!("{}", store.load().to_toml()?);
    }

    let Some(file_path) = args.file_path else {
        if args.set.is_empty() && !args.show_settings {
            print_help();
            return Ok(false);
        }
        return Ok(true);
    };

    let load_result = FileIO::new(file_path).load_table()?;
    for warning in &load_result.warnings {
        warn!("{}", warning);
    }
    let table = load_result.table;

    let (start, end) = match &args.range {
        Some(range) => parse_range(range)?,
        None => (
            CellPosition::new(0, 0),
            CellPosition::new(
                table.row_count().saturating_sub(1),
                table.col_count().saturating_sub(1),
            ),
        ),
    };

    let mut selection = SelectionState::new();
    selection.select_rectangle(&table, start, end);

    let settings = SettingsOverrides {
        inner: store,
        use_csv: args.use_csv,
        quote_strings: args.quote_strings,
        quote_type: args.quote_type,
    };

    let mut sink: Box<dyn ClipboardSink> = if args.print {
        Box::new(StdoutSink)
    } else {
        Box::new(SystemClipboard)
    };

    let outcome = copy_and_clear(&mut selection, &settings, sink.as_mut(), args.mode)?;
    if !args.print {
        eprintln!("{}", outcome.message());
    }

    Ok(outcome != CopyOutcome::NothingSelected)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    install_panic_hook();

    let args = parse_args();
    info!("tablecopy started");

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "copy failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

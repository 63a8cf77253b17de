use clap::{Parser, Subcommand};
use phrase_sheets::cli;
use phrase_sheets::config::ConfigOverrides;
use phrase_sheets::error::SheetsResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phrase-sheets")]
#[command(about = "Move the phrase catalog between its JSON form and an editable workbook.")]
#[command(long_about = "Phrase Sheets - phrase catalog ⇄ spreadsheet bridge

The catalog is a JSON array of groups ({\"function\": ..., \"phrases\": [...]}).
Each group becomes one sheet with the columns english, spanish, domain, syntax.

COMMANDS:
  import   - Replace every sheet of the workbook with the catalog's groups
  export   - Write one JSON file per sheet into a fresh, timestamped folder
  merge    - Combine exported per-group files into one catalog document

CONFIGURATION:
  phrase-sheets.yaml (or --config) may set: source, workbook, output_dir,
  file_prefix. Command-line flags win over the file.

EXAMPLES:
  phrase-sheets import --source https://example.org/core-phrase-list-all.json
  phrase-sheets export --workbook phrases.xlsx --output-dir exports
  phrase-sheets merge exports/core-phrase-list-export-20250101-120000

Set RUST_LOG=phrase_sheets=debug for detailed logs (written to stderr).")]
#[command(version)]
struct Cli {
    /// Configuration file (default: ./phrase-sheets.yaml if present)
    #[arg(short, long, global = true, env = "PHRASE_SHEETS_CONFIG")]
    config: Option<PathBuf>,

    /// Workbook (.xlsx) to import into / export from
    #[arg(short, long, global = true, env = "PHRASE_SHEETS_WORKBOOK")]
    workbook: Option<PathBuf>,

    /// Prefix of exported file names
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Show per-sheet details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Replace the whole workbook with the catalog.

Every existing sheet is deleted (no backup is taken), then one sheet per
catalog group is created in catalog order. Group labels are cleaned of the
characters : \\ / ? * [ ] and made unique with \" (2)\", \" (3)\", ... suffixes.
Malformed groups are skipped with a warning.

The workbook file is only written when the whole import succeeds.")]
    /// Import the catalog into the workbook (replaces all sheets)
    Import {
        /// Catalog URL (http/https) or local JSON file
        #[arg(short, long, env = "PHRASE_SHEETS_SOURCE")]
        source: Option<String>,
    },

    #[command(long_about = "Export every sheet to its own JSON file.

Files are written to a new folder <output-dir>/<prefix>-export-<timestamp>,
named <prefix>-<NN>-<slug>.json in sheet order. Columns are found by header
name (case and spacing ignored), so they may be reordered; a deleted column
exports as empty text. Blank rows are dropped.")]
    /// Export every sheet to a JSON file
    Export {
        /// Root folder for export runs
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Merge exported per-group files into <prefix>-all.json
    Merge {
        /// Folder holding <prefix>-NN-*.json files
        dir: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "phrase_sheets=debug"
    } else {
        "phrase_sheets=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> SheetsResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut overrides = ConfigOverrides {
        config_file: cli.config,
        workbook: cli.workbook,
        file_prefix: cli.prefix,
        ..Default::default()
    };

    match cli.command {
        Commands::Import { source } => {
            overrides.source = source;
            cli::import(&overrides, cli.verbose)
        }

        Commands::Export { output_dir } => {
            overrides.output_dir = output_dir;
            cli::export(&overrides, cli.verbose)
        }

        Commands::Merge { dir } => cli::merge(&dir, &overrides),
    }
}

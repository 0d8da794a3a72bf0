use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use hr_records::cli::{self, CliError, LineEditor, Session};
use hr_records::config::ConfigLoader;
use hr_records::service::HrService;

/// Human resources record manager.
#[derive(Parser)]
#[command(name = "hr-records", about = "Interactive human resources record manager")]
#[command(version)]
struct Args {
    /// Path to a YAML configuration file.
    #[arg(short, long, env = "HR_RECORDS_CONFIG")]
    config: Option<PathBuf>,

    /// Start with a small sample organisation.
    #[arg(long)]
    demo: bool,

    /// Show debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = cli::init_tracing(args.verbose, args.quiet) {
        eprintln!("hr-records: error: {err}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Session aborted");
            eprintln!("hr-records: error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = ConfigLoader::load_or_default(args.config.as_ref())?;
    info!(organization = %config.organization.name, "Configuration loaded");

    let mut service = HrService::new(config);
    if args.demo {
        service.seed_demo()?;
    }

    let editor = LineEditor::new()?;
    let stdout = std::io::stdout();
    Session::new(service, editor, stdout.lock()).run()
}

use chrono::Local;
use clap::Parser;
use ponto::application::{init, Job, RunService};
use ponto::cli::{format_run_summary, Cli, Commands};
use ponto::domain::TimeReference;
use ponto::error::PontoError;
use ponto::infrastructure::{Config, FileSystemSource, ReportWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), PontoError> {
    let job = match cli.command {
        Some(Commands::Init { path }) => {
            init::init(&path)?;
            return Ok(());
        }
        Some(Commands::Report) => Job::Daily,
        Some(Commands::Export) => Job::Export,
        Some(Commands::Run) | None => Job::All,
    };

    let now = Local::now().naive_local();
    let date = TimeReference::parse(&cli.date)?.resolve(now.date())?;

    let config = Config::discover(cli.config.as_deref())?;
    let output_dir = cli.output.unwrap_or_else(|| config.output_path());
    let source = FileSystemSource::new(config.base_dir.clone());
    let service = RunService::new(source, config);

    let summary = service.execute(job, date, now, &ReportWriter::new(output_dir))?;
    print!("{}", format_run_summary(&summary));
    Ok(())
}

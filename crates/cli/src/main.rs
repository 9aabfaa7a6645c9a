use anyhow::Result;
use clap::Parser;
use errbridge_cli::{logging, Config, ErrorReport, Explain};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "errbridge",
    about = "Explain status, errno, HTTP and structured error codes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Explain,

    #[arg(short, long, help = "Output format", default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;
    logging::init(&config.logging)?;

    debug!(command = ?cli.command, "Explaining error");

    let err = cli.command.build_error(&config.translation_config());
    let report = ErrorReport::from_error(&err);

    match cli.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Pretty => print!("{}", report.render_pretty()),
    }

    Ok(())
}

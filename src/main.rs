use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use fxc::ConversionRequest;
use fxc::cli::ui;
use fxc::core::log::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert an amount between currencies using current exchange rates
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Amount to convert, must be greater than zero
    #[arg(long, allow_negative_numbers = true)]
    amount: f64,

    /// Source currency code, e.g. USD
    #[arg(long)]
    from: String,

    /// Target currency code, e.g. EUR
    #[arg(long)]
    to: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,

    /// Path to the file holding EXCHANGE_RATE_API_KEY (defaults to ./.env)
    #[arg(long)]
    env_file: Option<PathBuf>,
}

const USAGE_EXIT: u8 = 1;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            println!("{}", e.render());
            Cli::command().print_help()?;
            return Ok(ExitCode::from(USAGE_EXIT));
        }
    };

    init_logging(cli.verbose);

    let request = match ConversionRequest::new(cli.amount, &cli.from, &cli.to) {
        Ok(request) => request,
        Err(e) => {
            println!("{}", ui::error_line(&e.to_string()));
            Cli::command().print_help()?;
            return Ok(ExitCode::from(USAGE_EXIT));
        }
    };

    match fxc::run(&request, cli.config_path.as_deref(), cli.env_file.as_deref()).await {
        Ok(conversion) => {
            println!("{conversion}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "Conversion failed");
            eprintln!("{}", ui::error_line(&e.to_string()));
            if !cli.verbose {
                eprintln!(
                    "{}",
                    ui::style_text("Run with --verbose for details", ui::StyleType::Subtle)
                );
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

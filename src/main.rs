use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use signup_form::bootstrap::{init_tracing_subscriber, resolve_config, resolve_data_dir, start_app};
use signup_form::commands::{run_reset, run_signup, run_status, run_success};

#[derive(Parser)]
#[command(name = "signup-form")]
#[command(about = "Sign up, inspect and reset the local session", long_about = None)]
struct Cli {
    /// Config file (defaults to <data-dir>/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the session file, config and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the signup form
    Signup {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Opt in to product updates
        #[arg(long)]
        accept_updates: bool,
    },
    /// Show the current session
    Status {
        /// Print the full session snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the page behind the route guard
    Success,
    /// Clear the session
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir)?;
    init_tracing_subscriber(&data_dir)?;
    let config = resolve_config(cli.config.as_deref(), &data_dir)?;
    let app = start_app(&config).await?;

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Signup {
            email,
            password,
            accept_updates,
        } => run_signup(&app, &mut out, email, password, accept_updates).await?,
        Commands::Status { json } => run_status(&app, &mut out, json)?,
        Commands::Success => run_success(&app, &mut out)?,
        Commands::Reset => run_reset(&app, &mut out).await?,
    }

    Ok(())
}

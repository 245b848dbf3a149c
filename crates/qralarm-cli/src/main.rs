use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "qralarm", version, about = "QR Alarm CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Alarm scheduling
    Alarm {
        #[command(subcommand)]
        action: commands::alarm::AlarmAction,
    },
    /// Stop-key token
    Token {
        #[command(subcommand)]
        action: commands::token::TokenAction,
    },
    /// Verify a scanned QR payload against the stored token
    Verify {
        /// Decoded QR payload (compared byte-for-byte)
        payload: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Host the ringer unit: wait for the pending alarm, ring, and read
    /// scanned payloads from stdin until the correct one stops it
    Run,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("qralarm=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Alarm { action } => commands::alarm::run(action),
        Commands::Token { action } => commands::token::run(action),
        Commands::Verify { payload } => commands::verify::run(&payload),
        Commands::Config { action } => commands::config::run(action),
        Commands::Run => commands::run::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

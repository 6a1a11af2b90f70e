use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "deadline-timer", version, about = "Deadline Timer countdown indicator")]
struct Cli {
    /// Log debug output to stderr (overridden by DEADLINE_TIMER_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the countdown label once
    Status(commands::status::StatusArgs),
    /// Print the countdown label every refresh period
    Watch(commands::watch::WatchArgs),
    /// Show or change the begin/end dates
    Dates {
        #[command(subcommand)]
        action: commands::dates::DatesAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("DEADLINE_TIMER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Status(args) => commands::status::run(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Dates { action } => commands::dates::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

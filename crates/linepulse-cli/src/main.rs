use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "linepulse-cli", version, about = "Linepulse CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tracked metrics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Monthly goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Discard all counters and start a fresh period
    Reset,
    /// Replay a recorded session script through the engine
    Replay {
        /// Path to a JSON event script
        script: std::path::PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Reset => commands::reset::run(),
        Commands::Replay { script } => commands::replay::run(&script),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

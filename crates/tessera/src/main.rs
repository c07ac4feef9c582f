mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tessera",
    version,
    about = "Tracks top-level desktop windows and reports them as they appear, move and go away"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// List top-level windows and whether they would be tracked
    List(commands::list::ListArgs),
    /// Track windows and print registry changes until Ctrl+C
    Watch(commands::watch::WatchArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::List(args) => commands::list::execute(&args),
        Commands::Watch(args) => commands::watch::execute(&args),
    }
}

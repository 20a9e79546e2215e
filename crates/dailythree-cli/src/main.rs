use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dailythree_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dailythree", version, about = "Commit to 1-3 tasks a day, focus on one at a time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session over today's tasks
    Shell(commands::shell::ShellArgs),
    /// Send feedback through the default mail client
    Feedback(commands::feedback::FeedbackArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("DAILYTHREE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: logging not initialized: {e}");
    }
}

fn main() {
    let cli = Cli::parse();
    // Logging only reads the config; `shell` and `config` load it themselves.
    init_tracing(&Config::read_or_default());

    let result = match cli.command {
        Commands::Shell(args) => commands::shell::run(args),
        Commands::Feedback(args) => commands::feedback::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "dailythree", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

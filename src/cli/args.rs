use clap::{Parser, Subcommand, ValueEnum};

/// CleanSweep: find and reclaim space held by caches, temp files and logs
#[derive(Parser, Debug)]
#[command(
    name = "cleansweep",
    version,
    about = "Scan and clean caches, temp files, logs and crash dumps",
    long_about = "CleanSweep inventories OS and application junk data (caches, temp files,\n\
                   logs, crash dumps) on Windows, macOS and Linux, and empties it while\n\
                   reporting progress category by category.",
    after_help = "EXAMPLES:\n  \
        cleansweep scan                        Show reclaimable space per category\n  \
        cleansweep scan --format json          Scan report as JSON\n  \
        cleansweep targets                     List every candidate location\n  \
        cleansweep clean                       Clean after confirmation\n  \
        cleansweep clean --yes --format json   Stream clean events as JSON lines\n  \
        cleansweep config show                 Show current configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Build the catalog for another platform (windows, darwin, linux)
    #[arg(long, global = true, value_name = "OS", env = "CLEANSWEEP_PLATFORM")]
    pub platform: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Only print totals and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Also write logs to ~/.cleansweep/logs
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure reclaimable space per category
    Scan,

    /// Empty every category and report progress as it goes
    Clean {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Leave out OS maintenance actions (DNS flush etc.)
        #[arg(long)]
        no_maintenance: bool,
    },

    /// List the catalog of candidate locations
    Targets,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset to default configuration
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Initialize CleanSweep directories and default config
    Init,

    /// Print the config file location
    Path,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

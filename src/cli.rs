use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pillminder")]
#[command(about = "Medication reminders with an optional pill dispenser link", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Write a default configuration file")]
    Init {
        /// Initialize in local directory (./.pillminder) instead of global (~/.pillminder)
        #[arg(short, long)]
        local: bool,
    },

    #[command(about = "Start an interactive reminder session (default)")]
    Session {
        /// Use local configuration (./.pillminder)
        #[arg(short, long)]
        local: bool,

        /// Use global configuration (~/.pillminder)
        #[arg(short, long)]
        global: bool,
    },

    #[command(about = "List known medicines and their dosage ranges")]
    Medicines {
        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Use local configuration (./.pillminder)
        #[arg(short, long)]
        local: bool,

        /// Use global configuration (~/.pillminder)
        #[arg(short, long)]
        global: bool,
    },
}

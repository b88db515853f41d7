use crate::models::policy::Policy;
use clap::{Parser, Subcommand};

/// Command-line interface definition for sessiongen
/// CLI application to seed the activitysessions SQLite table
#[derive(Parser)]
#[command(
    name = "sessiongen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Initialize the activitysessions SQLite table and fill it with synthetic sessions",
    long_about = "Initialize the activitysessions SQLite table and fill it with synthetic sessions.\n\
                  Without a subcommand the schema is applied and the default policy is run."
)]
pub struct Cli {
    /// Override database path (default: ./activitysessions.db)
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<String>,

    /// Override schema file path (default: ./schema.sql)
    #[arg(global = true, long = "schema", value_name = "FILE")]
    pub schema: Option<String>,

    /// YAML configuration file (years, activities, policy parameters)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply the schema file to the database
    Init,

    /// Generate synthetic sessions for every configured day
    Generate {
        /// Row synthesis policy
        #[arg(long, value_enum)]
        policy: Option<Policy>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Skip applying the schema before generating
        #[arg(long = "no-init")]
        no_init: bool,
    },

    /// Run the aggregate report queries and check their results
    Verify {
        /// Year for the monthly breakdown (default: year of the newest row)
        #[arg(long)]
        year: Option<i32>,

        /// Also show per-activity hours for this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration as YAML")]
        print_config: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

//! BankKaro CLI - card catalog and reward calculator diagnostics
//!
//! Drives the request gateway from a terminal so endpoints, filters and
//! failure handling can be checked without the web front end.

use bankkaro_api_client::{CalculatorCategory, CardNetwork};
use bankkaro_telemetry::TelemetryConfig;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::ExitCode;

mod commands;
mod output;
mod session;

use commands::calculate::{self, CalculateArgs};
use commands::cards::{self, CardsArgs};
use commands::{health, questions};
use output::OutputFormat;
use session::Session;

/// Card catalog and reward calculator CLI for BankKaro
#[derive(Parser)]
#[command(name = "bankkaro")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to bankkaro.toml (probed in the working directory if omitted)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cards for a category page
    Cards {
        /// Category page slug, e.g. best-fuel-credit-card
        #[arg(default_value = "")]
        slug: String,

        /// Bank id filter (repeatable)
        #[arg(short, long = "bank")]
        banks: Vec<String>,

        /// Card network filter (repeatable): visa, mastercard, amex, rupay
        #[arg(short, long = "network")]
        networks: Vec<CardNetwork>,

        /// Annual fee bucket
        #[arg(long, default_value = "")]
        annual_fees: String,

        /// Credit score bucket
        #[arg(long, default_value = "")]
        credit_score: String,

        /// Sort order understood by the catalog
        #[arg(long, default_value = "")]
        sort_by: String,

        /// Only lifetime-free cards
        #[arg(long)]
        free: bool,

        /// Keep cards whose name or bank matches this text
        #[arg(short, long)]
        search: Option<String>,

        /// Show at most this many cards
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Estimate rewards for a spending profile
    Calculate {
        /// Question group whose slider defaults seed the profile
        #[arg(long, default_value = "all")]
        category: CalculatorCategory,

        /// Spend override as KEY=VALUE (repeatable)
        #[arg(short, long = "spend", value_parser = calculate::parse_spend)]
        spends: Vec<(String, f64)>,

        /// Score against this card id
        #[arg(long)]
        card: Option<String>,
    },

    /// Check that both endpoints answer with well-formed responses
    Health,

    /// List calculator questions
    Questions {
        /// Only questions in this group
        #[arg(long, default_value = "all")]
        category: CalculatorCategory,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    if let Err(e) = bankkaro_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let result = match cli.command {
        Commands::Questions { category } => questions::run(category, cli.format),

        Commands::Health => match Session::open(cli.config.as_deref()) {
            Ok(session) => health::run(&session, cli.format).await,
            Err(e) => Err(e),
        },

        Commands::Cards {
            slug,
            banks,
            networks,
            annual_fees,
            credit_score,
            sort_by,
            free,
            search,
            limit,
        } => {
            let args = CardsArgs {
                slug,
                banks,
                networks,
                annual_fees,
                credit_score,
                sort_by,
                free_cards: free,
                search,
                limit,
            };
            match Session::open(cli.config.as_deref()) {
                Ok(mut session) => cards::run(&mut session, args, cli.format).await,
                Err(e) => Err(e),
            }
        }

        Commands::Calculate { category, spends, card } => {
            let args = CalculateArgs {
                category,
                spends,
                card,
            };
            match Session::open(cli.config.as_deref()) {
                Ok(mut session) => calculate::run(&mut session, args, cli.format).await,
                Err(e) => Err(e),
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use command::{
    CommandStrategy, ContractInput, ContractStrategy, ExtractInput, ExtractStrategy, FeedbackInput,
    FeedbackStrategy, InfoStrategy, InitStrategy, NotionInput, NotionStrategy, Source,
    VersionStrategy,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "labor")]
#[command(about = "Extract training bookings from German booking emails", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Mail text file (reads stdin when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (defaults to ~/prozess-labor/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference date for dates without a year, YYYY-MM-DD
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl From<SourceArgs> for Source {
    fn from(args: SourceArgs) -> Self {
        Self {
            file: args.file,
            config: args.config,
            today: args.today,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract booking fields from a mail
    Extract {
        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of the report
        #[arg(long)]
        json: bool,
    },
    /// Print the Notion properties for a mail
    Notion {
        #[command(flatten)]
        source: SourceArgs,

        /// Wrap the properties in a page-creation body for this database
        #[arg(long)]
        database_id: Option<String>,

        /// Show a readable preview instead of JSON
        #[arg(long)]
        preview: bool,
    },
    /// Render a contract template for a mail
    Contract {
        #[command(flatten)]
        source: SourceArgs,

        /// Template with {{placeholder}} markers
        #[arg(short, long)]
        template: PathBuf,

        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Prepare a feedback link for the training in a mail
    Feedback {
        #[command(flatten)]
        source: SourceArgs,

        /// Client (defaults to the one found in the mail)
        #[arg(long)]
        client: Option<String>,

        /// Training date, YYYY-MM-DD (defaults to the start date in the mail)
        #[arg(long)]
        date: Option<String>,

        /// Feedback site base URL
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Initialize configuration
    Init {
        /// Where to create the config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show configuration
    Info {
        /// Config file to inspect
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { source, json } => {
            ExtractStrategy
                .execute(ExtractInput {
                    source: source.into(),
                    json,
                })
                .await
        }
        Commands::Notion {
            source,
            database_id,
            preview,
        } => {
            NotionStrategy
                .execute(NotionInput {
                    source: source.into(),
                    database_id,
                    preview,
                })
                .await
        }
        Commands::Contract {
            source,
            template,
            output,
        } => {
            ContractStrategy
                .execute(ContractInput {
                    source: source.into(),
                    template,
                    output,
                })
                .await
        }
        Commands::Feedback {
            source,
            client,
            date,
            base_url,
        } => {
            FeedbackStrategy
                .execute(FeedbackInput {
                    source: source.into(),
                    client,
                    date,
                    base_url,
                })
                .await
        }
        Commands::Init { config } => InitStrategy.execute(config).await,
        Commands::Info { config } => InfoStrategy.execute(config).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}

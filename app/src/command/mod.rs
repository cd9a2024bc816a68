//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use anyhow::Context as _;
use chrono::NaiveDate;
use labor_config::Config;
use labor_extract::ExtractionEngine;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::info;

mod contract;
mod extract;
mod feedback;
mod info;
mod init;
mod notion;
mod version;

pub use contract::{ContractInput, ContractStrategy};
pub use extract::{ExtractInput, ExtractStrategy};
pub use feedback::{FeedbackInput, FeedbackStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use notion::{NotionInput, NotionStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// adding a command only requires implementing this trait.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Where the mail text, the config and "today" come from.
#[derive(Debug, Clone, Default)]
pub struct Source {
    /// Mail text file; stdin when absent.
    pub file: Option<PathBuf>,
    /// Config file; `~/prozess-labor/config.json` when absent.
    pub config: Option<PathBuf>,
    /// Reference date for year-less dates; the local date when absent.
    pub today: Option<NaiveDate>,
}

impl Source {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        Ok(Config::load(self.config.as_deref())?)
    }

    pub fn engine(&self, config: &Config) -> anyhow::Result<ExtractionEngine> {
        let registry = config.registry.clone();
        let settings = config.extraction.clone();
        let engine = match self.today {
            Some(today) => ExtractionEngine::new(registry, settings, today)?,
            None => ExtractionEngine::for_today(registry, settings)?,
        };
        Ok(engine)
    }

    pub async fn read_text(&self) -> anyhow::Result<String> {
        match &self.file {
            Some(path) => read_file(path).await,
            None => {
                info!("Reading mail text from stdin");
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .context("Cannot read mail text from stdin")?;
                Ok(text)
            }
        }
    }
}

pub async fn read_file(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))
}

use labor_export::ContractDraft;
use std::path::PathBuf;
use tracing::{info, warn};

use super::{Source, read_file};

/// Input parameters for the contract command.
#[derive(Debug, Clone)]
pub struct ContractInput {
    pub source: Source,
    /// Text template with `{{placeholder}}` markers.
    pub template: PathBuf,
    /// Write the rendered contract here instead of stdout.
    pub output: Option<PathBuf>,
}

/// Strategy for drafting a commissioning contract from a mail.
#[derive(Debug, Clone, Copy)]
pub struct ContractStrategy;

impl super::CommandStrategy for ContractStrategy {
    type Input = ContractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = input.source.load_config()?;
        let engine = input.source.engine(&config)?;
        let text = input.source.read_text().await?;
        let template = read_file(&input.template).await?;

        let draft = ContractDraft::new(&engine.extract(&text), &config.registry);
        for warning in draft.warnings() {
            warn!("{warning}");
        }
        info!("Suggested file name: {}", draft.file_name());

        let rendered = draft.render(&template);
        match &input.output {
            Some(path) => {
                tokio::fs::write(path, rendered).await?;
                println!("Vertrag geschrieben: {}", path.display());
            }
            None => print!("{rendered}"),
        }

        Ok(())
    }
}

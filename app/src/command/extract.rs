use labor_export::render_report;
use serde_json::json;

use super::Source;

/// Input parameters for the extract command.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    pub source: Source,
    /// Print JSON instead of the grouped report.
    pub json: bool,
}

/// Strategy for extracting a booking from one mail.
///
/// Prints either the grouped report or a JSON object with the found fields
/// under `gefunden` and the missing field names under `nicht_gefunden`.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = input.source.load_config()?;
        let engine = input.source.engine(&config)?;
        let text = input.source.read_text().await?;

        let extraction = engine.extract(&text);

        if input.json {
            let output = json!({
                "gefunden": extraction.to_json(),
                "nicht_gefunden": extraction.not_found(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print!("{}", render_report(&extraction));
        }

        Ok(())
    }
}

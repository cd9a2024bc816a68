use labor_export::NotionPage;

use super::Source;

/// Input parameters for the notion command.
#[derive(Debug, Clone)]
pub struct NotionInput {
    pub source: Source,
    /// Wrap the properties in a `POST /pages` body for this database.
    pub database_id: Option<String>,
    /// Print a readable preview instead of JSON.
    pub preview: bool,
}

/// Strategy for mapping a mail onto the Notion bookings database.
///
/// Only prints the payload; nothing is sent.
#[derive(Debug, Clone, Copy)]
pub struct NotionStrategy;

impl super::CommandStrategy for NotionStrategy {
    type Input = NotionInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = input.source.load_config()?;
        let engine = input.source.engine(&config)?;
        let text = input.source.read_text().await?;

        let page = NotionPage::from_extraction(&engine.extract(&text), &config.notion);

        if input.preview {
            println!("=== Notion Vorschau ===\n");
            for (property, value) in page.preview() {
                println!("  {property}: {value}");
            }
            return Ok(());
        }

        let output = match &input.database_id {
            Some(database_id) => page.payload(database_id),
            None => page.to_json(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);

        Ok(())
    }
}

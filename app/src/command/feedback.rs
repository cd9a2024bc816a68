use chrono::Local;
use labor_export::FeedbackRequest;
use labor_export::feedback::FEEDBACK_URL;
use tracing::info;

use super::Source;

/// Input parameters for the feedback command.
#[derive(Debug, Clone)]
pub struct FeedbackInput {
    pub source: Source,
    /// Client; taken from the mail when absent.
    pub client: Option<String>,
    /// Training date as `YYYY-MM-DD`; taken from the mail when absent.
    pub date: Option<String>,
    /// Feedback site the link points to.
    pub base_url: Option<String>,
}

/// Strategy for preparing a feedback session for the training in a mail.
///
/// Prints the link and where its files belong; the session is not
/// registered anywhere.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackStrategy;

impl super::CommandStrategy for FeedbackStrategy {
    type Input = FeedbackInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = input.source.load_config()?;
        let engine = input.source.engine(&config)?;
        let text = input.source.read_text().await?;
        let today = input.source.today.unwrap_or_else(|| Local::now().date_naive());

        let mut request = FeedbackRequest::from_extraction(&engine.extract(&text));
        if input.client.is_some() {
            request.client = input.client;
        }
        if input.date.is_some() {
            request.date = input.date;
        }

        let session = request.into_session(today)?;
        let base_url = input.base_url.as_deref().unwrap_or(FEEDBACK_URL);
        info!("Prepared feedback session {}", session.id);

        println!("=== Feedback ===\n");
        println!("  Schulung:  {}", session.training);
        println!("  Kunde:     {}", session.client);
        println!("  Trainer:   {}", session.trainer);
        println!("  Datum:     {}", session.date.format("%Y-%m-%d"));
        println!("  ID:        {}", session.id);
        println!("  Läuft ab:  {}", session.expires_at_text());
        println!("\n  Link:      {}", session.link(base_url));
        if let Some(folder) = dirs::home_dir().map(|home| session.folder(&home.join("feedbacks"))) {
            println!("  Ordner:    {}", folder.display());
        }
        if let Some(warning) = &session.warning {
            println!("\n  Warnung: {warning}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandStrategy;
    use chrono::NaiveDate;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn input(dir: &tempfile::TempDir, mail: &str) -> FeedbackInput {
        let path = dir.path().join("mail.txt");
        std::fs::write(&path, mail).expect("mail should be written");
        FeedbackInput {
            source: Source {
                file: Some(path),
                config: Some(dir.path().join("missing.json")),
                today: NaiveDate::from_ymd_opt(2026, 1, 10),
            },
            client: Some("Seminarwerk".to_string()),
            date: None,
            base_url: None,
        }
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_feedback_for_mail() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let mail = "Die Schulung \"Python Grundlagen\" findet am 4. und 5. März statt.\nTrainer: Henrik Olsen\n";

        let result = FeedbackStrategy.execute(input(&dir, mail)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_feedback_without_trainer_fails() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let mail = "Die Schulung \"Python Grundlagen\" findet am 4. und 5. März statt.\n";

        let error = FeedbackStrategy
            .execute(input(&dir, mail))
            .await
            .expect_err("a session needs a trainer");
        assert_eq!(error.to_string(), "Trainer-Name ist leer");
    }
}

use labor_config::Config;
use std::path::PathBuf;
use tracing::info;

/// Strategy for displaying configuration information.
///
/// Outputs the config location, the registry contents and the extraction
/// and Notion settings in effect.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let path = match input {
            Some(path) => path,
            None => Config::default_path()?,
        };
        info!("Reading config from {}", path.display());
        let config = Config::load(Some(path.as_path()))?;
        let registry = &config.registry;

        println!("=== prozess-labor Configuration ===\n");
        println!("File: {}", path.display());
        if !path.exists() {
            println!("  (missing, run 'labor init')");
        }
        println!();

        println!("Company:");
        println!("  Names: {}", list_or_none(&registry.company.names));
        println!("  Domains: {}", list_or_none(&registry.company.domains));
        println!();

        println!("Internal People: {}", registry.internal_people.len());
        for person in &registry.internal_people {
            println!("  {} <{}>", person.display_name(), person.emails.join(", "));
        }
        println!();

        println!("Known Trainers: {}", registry.trainers.len());
        for trainer in &registry.trainers {
            let address = if trainer.street.is_some() && trainer.city.is_some() {
                "address on file"
            } else {
                "no address"
            };
            if trainer.aliases.is_empty() {
                println!("  {} ({address})", trainer.name);
            } else {
                println!(
                    "  {} aka {} ({address})",
                    trainer.name,
                    trainer.aliases.join(", ")
                );
            }
        }
        println!();

        println!("Known Agencies: {}", registry.agencies.len());
        for agency in &registry.agencies {
            println!("  {} [{}]", agency.name, list_or_none(&agency.domains));
        }
        println!();

        let settings = &config.extraction;
        println!("Extraction:");
        println!("  Rolling Window: {} days", settings.rolling_window_days);
        println!("  Max Past Years: {}", settings.max_past_years);
        println!("  Briefing Lead: {} days", settings.briefing_lead_days);
        println!("  Min Title Length: {}", settings.min_title_len);
        println!("  Min Phone Length: {}", settings.min_phone_len);
        println!();

        println!("Notion:");
        println!("  Status: {}", config.notion.status);
        for (group, options) in &config.notion.select_options {
            println!("  {group}: {} mapped options", options.len());
        }

        Ok(())
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

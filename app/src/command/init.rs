use labor_config::Config;
use std::path::PathBuf;

/// Strategy for initializing the configuration.
///
/// Creates the starter config at `~/prozess-labor/config.json`, or at the
/// given path.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let path = Config::create_config(input.as_deref())?;
        println!("Config created at: {}", path.display());
        println!("Edit company, staff, trainers and agencies before the first extraction.");
        Ok(())
    }
}

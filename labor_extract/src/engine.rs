//! Extraction engine for booking emails.
//!
//! The engine compiles every field cascade once and then runs them in a
//! fixed order over each text it is given. It keeps no state between calls
//! apart from the registry and settings it was built with.

use chrono::{Local, NaiveDate};
use labor_core::{BookingExtractor, Extraction, ExtractionSettings, Registry};
use tracing::{debug, trace};

use crate::dates::Calendar;
use crate::fields::{self, FieldExtractor};
use crate::rules::{BuildError, Context};

/// Regex extraction engine.
pub struct ExtractionEngine {
    registry: Registry,
    settings: ExtractionSettings,
    calendar: Calendar,
    extractors: Vec<Box<dyn FieldExtractor>>,
}

impl ExtractionEngine {
    /// Create an engine that resolves year-less dates relative to `today`.
    ///
    /// # Errors
    /// Returns an error if any rule pattern fails to compile.
    pub fn new(
        registry: Registry,
        settings: ExtractionSettings,
        today: NaiveDate,
    ) -> Result<Self, BuildError> {
        let extractors = fields::all()?;
        let calendar = Calendar::new(today, &settings);

        debug!(
            "Extraction engine ready: {} extractors, {} known trainers, today {}",
            extractors.len(),
            registry.trainers.len(),
            today
        );

        Ok(Self {
            registry,
            settings,
            calendar,
            extractors,
        })
    }

    /// Create an engine for the local current date.
    ///
    /// # Errors
    /// Returns an error if any rule pattern fails to compile.
    pub fn for_today(registry: Registry, settings: ExtractionSettings) -> Result<Self, BuildError> {
        Self::new(registry, settings, Local::now().date_naive())
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    #[must_use]
    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Run every extractor over `text`.
    ///
    /// Never fails: each field ends up either found or in the not-found list.
    #[must_use]
    pub fn extract(&self, text: &str) -> Extraction {
        let ctx = Context {
            registry: &self.registry,
            settings: &self.settings,
            calendar: &self.calendar,
        };

        let mut out = Extraction::new();
        for extractor in &self.extractors {
            trace!(extractor = extractor.name(), "running extractor");
            extractor.extract(text, &ctx, &mut out);
        }
        let out = out.finish();

        debug!(
            found = out.found().count(),
            not_found = out.not_found().len(),
            "extraction finished"
        );
        out
    }
}

impl BookingExtractor for ExtractionEngine {
    fn extract(&self, text: &str) -> Extraction {
        Self::extract(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::testing::registry;
    use labor_core::Field;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn engine() -> ExtractionEngine {
        let today = NaiveDate::from_ymd_opt(2026, 1, 10).expect("test date should be valid");
        ExtractionEngine::new(registry(), ExtractionSettings::default(), today)
            .expect("engine should build")
    }

    #[test]
    fn test_empty_text_classifies_everything_as_not_found() {
        let out = engine().extract("");

        assert_eq!(out.found().count(), 0);
        assert_eq!(out.not_found(), &Field::ALL);
    }

    #[test]
    fn test_engine_is_usable_through_the_trait() {
        let engine = engine();
        let extractor: &dyn BookingExtractor = &engine;
        let out = extractor.extract("Trainer: Svend Hansen");

        assert_eq!(out.text(Field::Trainer), Some("Svend Hansen"));
        assert_eq!(out.flag(Field::TrainerBekannt), Some(true));
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let engine = engine();
        let first = engine.extract("Trainer: Svend Hansen");
        let second = engine.extract("");

        assert!(first.is_found(Field::Trainer));
        assert!(!second.is_found(Field::Trainer));
    }
}

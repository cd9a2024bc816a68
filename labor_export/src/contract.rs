//! Drafts of the trainer commissioning contract (Beauftragungsvertrag).
//!
//! A draft is a set of placeholder values derived from one extraction and
//! the trainer registry. Templates reference them as `{{name}}`; anything
//! the mail did not provide is filled with a visible marker and reported as
//! a warning so nobody signs a contract with a gap in it.

use chrono::{Datelike, NaiveDate};
use labor_core::{Extraction, Field, FieldValue, Registry};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::euros;

const MISSING: &str = "[FEHLT]";

const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Placeholder values for one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDraft {
    values: BTreeMap<&'static str, String>,
    warnings: Vec<String>,
    file_name: String,
}

impl ContractDraft {
    #[must_use]
    pub fn new(extraction: &Extraction, registry: &Registry) -> Self {
        let mut values = BTreeMap::new();
        let mut warnings = Vec::new();

        let extracted_trainer = extraction.text(Field::Trainer).unwrap_or_default();
        let trainer = registry.find_trainer(extracted_trainer);
        match trainer {
            Some(trainer) => {
                values.insert("trainer_name", trainer.name.clone());
                values.insert(
                    "trainer_strasse",
                    trainer.street.clone().unwrap_or_else(|| "[TRAINER-STRASSE]".to_string()),
                );
                values.insert(
                    "trainer_plz_ort",
                    format!(
                        "{} {}",
                        trainer.postal_code.as_deref().unwrap_or("[PLZ]"),
                        trainer.city.as_deref().unwrap_or("[ORT]")
                    ),
                );
            }
            None => {
                warnings.push(format!(
                    "Trainer '{extracted_trainer}' ist nicht in der Konfiguration hinterlegt, Vertrag enthält Platzhalter"
                ));
                values.insert("trainer_name", "[TRAINER-NAME]".to_string());
                values.insert("trainer_strasse", "[TRAINER-STRASSE]".to_string());
                values.insert("trainer_plz_ort", "[TRAINER-PLZ-ORT]".to_string());
            }
        }

        let title = extraction.text(Field::Schulungsname).unwrap_or_else(|| {
            warnings.push("Feld 'schulungsname' fehlt in der Extraktion".to_string());
            MISSING
        });
        values.insert("schulungsname", title.to_string());

        let client = extraction
            .text(Field::Kunde)
            .or_else(|| extraction.text(Field::FirmaOrt))
            .unwrap_or_else(|| {
                warnings.push("Feld 'kunde' oder 'firma_ort' fehlt in der Extraktion".to_string());
                MISSING
            });
        values.insert("kunde", client.to_string());

        values.insert(
            "format",
            extraction.text(Field::Format).unwrap_or("Vor Ort").to_string(),
        );

        let start = extraction.text(Field::DatumStart);
        let end = extraction.text(Field::DatumEnde);
        let start_text = long_date(start);
        let end_text = long_date(end);
        values.insert("datum_bereich", format!("{start_text} → {end_text}"));
        values.insert("datum_start_text", start_text);
        values.insert("datum_ende_text", end_text);

        let days = training_days(start, end);
        values.insert(
            "schulungstage",
            if days == 1 {
                "1 Schulungstag".to_string()
            } else {
                format!("{days} Schulungstage")
            },
        );

        let fee = extraction.number(Field::TrainerKosten).map_or_else(
            || {
                warnings.push("Feld 'trainer_kosten' fehlt in der Extraktion".to_string());
                format!("{MISSING}€")
            },
            |fee| format!("{}€", euros(fee)),
        );
        values.insert("trainer_kosten", fee);

        values.insert(
            "vorbereitung",
            extraction
                .number(Field::Vorbereitungspauschale)
                .map_or_else(
                    || "[VORBEREITUNG PRÜFEN]".to_string(),
                    |prep| format!("{}€ Vorbereitung", euros(prep)),
                ),
        );

        values.insert(
            "reisekosten",
            travel_cost_text(extraction.get(Field::Reisekosten)),
        );

        let surname_source = trainer.map_or(extracted_trainer, |t| t.name.as_str());
        let file_name = format!(
            "Beauftragung_{}_{}.docx",
            surname(surname_source),
            start.unwrap_or("DATUM")
        );

        debug!(
            "Contract draft {file_name}: {} values, {} warnings",
            values.len(),
            warnings.len()
        );

        Self {
            values,
            warnings,
            file_name,
        }
    }

    #[must_use]
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.values.get(placeholder).map(String::as_str)
    }

    /// Placeholder names with their values, sorted by name.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// `Beauftragung_<Nachname>_<datum_start>.docx`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Replace every `{{name}}` in `template`.
    ///
    /// Unknown placeholders are left in place so they stay visible in the
    /// rendered contract.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                out.push_str(&rest[open..]);
                return out;
            };

            let name = after_open[..close].trim();
            if let Some(value) = self.get(name) {
                out.push_str(value);
            } else {
                warn!("Unknown contract placeholder '{name}'");
                out.push_str(&rest[open..open + 2 + close + 2]);
            }
            rest = &after_open[close + 2..];
        }

        out.push_str(rest);
        out
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%d.%m.%Y").ok()
}

/// `21.01.2026` → `21. Januar 2026`. Unparseable text passes through.
fn long_date(date: Option<&str>) -> String {
    let Some(date) = date else {
        return MISSING.to_string();
    };
    parse_date(date).map_or_else(
        || date.to_string(),
        |d| format!("{}. {} {}", d.day(), MONTHS[d.month0() as usize], d.year()),
    )
}

/// Inclusive day count, at least one.
fn training_days(start: Option<&str>, end: Option<&str>) -> i64 {
    match (start.and_then(parse_date), end.and_then(parse_date)) {
        (Some(start), Some(end)) => ((end - start).num_days() + 1).max(1),
        _ => 1,
    }
}

fn travel_cost_text(value: Option<&FieldValue>) -> String {
    match value {
        None => "[REISEKOSTEN PRÜFEN]".to_string(),
        Some(FieldValue::Text(text)) => {
            let lower = text.to_lowercase();
            if lower.contains("inkl") {
                "Im Honorar enthalten".to_string()
            } else if ["erstattet", "fahrtkosten", "hotel"]
                .iter()
                .any(|word| lower.contains(word))
            {
                "Fahrtkosten + Hotel werden erstattet".to_string()
            } else if lower.contains("keine") || text.trim() == "0" {
                "Keine Reisekosten".to_string()
            } else {
                text.clone()
            }
        }
        Some(value) => match value.as_number() {
            Some(amount) if amount.abs() >= f64::EPSILON => {
                format!("{}€ Reisekosten", euros(amount))
            }
            Some(_) => "Keine Reisekosten".to_string(),
            None => value.to_string(),
        },
    }
}

/// Last word of a person's name; for a company (`UG`, `GmbH`) the first.
fn surname(name: &str) -> &str {
    let mut words = name.split_whitespace();
    let is_company = name
        .split_whitespace()
        .any(|word| word == "UG" || word == "GmbH");

    let word = if is_company {
        words.next()
    } else {
        words.next_back()
    };
    word.unwrap_or("Unbekannt")
}

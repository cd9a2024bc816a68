//! The fixed set of booking fields and their values.
//!
//! Field names are serialized verbatim (`schulungsname`, `datum_start`, ...)
//! because the Notion mapper, the contract generator and the feedback-link
//! service all look fields up by these exact keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One slot of an extracted booking record.
///
/// Variant order is the extraction order; `Ord` follows it so that maps keyed
/// by `Field` iterate in the same order the engine classifies them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Training title.
    Schulungsname,
    /// First training day, `DD.MM.YYYY`.
    DatumStart,
    /// Last training day, `DD.MM.YYYY`.
    DatumEnde,
    /// Daily time range, `H:MM – H:MM Uhr`.
    Uhrzeit,
    /// Venue or city.
    FirmaOrt,
    /// Venue address.
    Adresse,
    /// `"Vor Ort"` or `"Remote"`.
    Format,
    /// Internal sender as `Name (Rolle)`.
    AbsenderIntern,
    /// Internal sender email.
    AbsenderEmail,
    /// External contact email.
    EmailExtern,
    /// External contact name.
    AnsprechpartnerExtern,
    /// Phone number.
    Telefon,
    /// Maximum participant count.
    Teilnehmeranzahl,
    /// Trainer name, canonical when the trainer is registered.
    Trainer,
    /// Whether the trainer resolved to a registry entry.
    TrainerBekannt,
    /// Trainer address, usually only given for new trainers.
    TrainerAdresse,
    /// Day rate charged to the client.
    Tagessatz,
    /// Fee paid to the trainer.
    TrainerKosten,
    /// Preparation fee.
    Vorbereitungspauschale,
    /// Travel-cost policy: a phrase or a reimbursed amount.
    Reisekosten,
    /// Commissioning agency.
    Auftraggeber,
    /// Client company.
    Kunde,
    /// Briefing call date, a few days before the start.
    BriefingDatum,
}

impl Field {
    /// Every field, in extraction order.
    pub const ALL: [Self; 23] = [
        Self::Schulungsname,
        Self::DatumStart,
        Self::DatumEnde,
        Self::Uhrzeit,
        Self::FirmaOrt,
        Self::Adresse,
        Self::Format,
        Self::AbsenderIntern,
        Self::AbsenderEmail,
        Self::EmailExtern,
        Self::AnsprechpartnerExtern,
        Self::Telefon,
        Self::Teilnehmeranzahl,
        Self::Trainer,
        Self::TrainerBekannt,
        Self::TrainerAdresse,
        Self::Tagessatz,
        Self::TrainerKosten,
        Self::Vorbereitungspauschale,
        Self::Reisekosten,
        Self::Auftraggeber,
        Self::Kunde,
        Self::BriefingDatum,
    ];

    /// Returns the serialized key of this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Schulungsname => "schulungsname",
            Self::DatumStart => "datum_start",
            Self::DatumEnde => "datum_ende",
            Self::Uhrzeit => "uhrzeit",
            Self::FirmaOrt => "firma_ort",
            Self::Adresse => "adresse",
            Self::Format => "format",
            Self::AbsenderIntern => "absender_intern",
            Self::AbsenderEmail => "absender_email",
            Self::EmailExtern => "email_extern",
            Self::AnsprechpartnerExtern => "ansprechpartner_extern",
            Self::Telefon => "telefon",
            Self::Teilnehmeranzahl => "teilnehmeranzahl",
            Self::Trainer => "trainer",
            Self::TrainerBekannt => "trainer_bekannt",
            Self::TrainerAdresse => "trainer_adresse",
            Self::Tagessatz => "tagessatz",
            Self::TrainerKosten => "trainer_kosten",
            Self::Vorbereitungspauschale => "vorbereitungspauschale",
            Self::Reisekosten => "reisekosten",
            Self::Auftraggeber => "auftraggeber",
            Self::Kunde => "kunde",
            Self::BriefingDatum => "briefing_datum",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
            .ok_or("unknown field")
    }
}

/// A found value.
///
/// Serialized untagged so the JSON output carries plain strings, numbers and
/// booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Count(u32),
    Amount(f64),
    Text(String),
}

impl FieldValue {
    /// Whether this value carries no information.
    ///
    /// Blank text and zero numbers classify a field as not found; a `false`
    /// flag is still a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flag(_) => false,
            Self::Count(n) => *n == 0,
            Self::Amount(a) => a.abs() < f64::EPSILON || !a.is_finite(),
            Self::Text(s) => s.trim().is_empty(),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of counts and amounts.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Count(n) => Some(f64::from(*n)),
            Self::Amount(a) => Some(*a),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Count(n) => write!(f, "{n}"),
            Self::Amount(a) => write!(f, "{a}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Count(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Amount(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_round_trips_through_str() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }
        assert!("datum".parse::<Field>().is_err());
    }

    #[test]
    fn test_all_is_sorted_in_declaration_order() {
        let mut sorted = Field::ALL;
        sorted.sort();
        assert_eq!(sorted, Field::ALL);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_field_serializes_as_key() {
        let json = serde_json::to_string(&Field::TrainerKosten).expect("field should serialize");
        assert_eq!(json, "\"trainer_kosten\"");
    }

    #[test]
    fn test_empty_values() {
        assert!(FieldValue::from("  ").is_empty());
        assert!(FieldValue::from(0_u32).is_empty());
        assert!(FieldValue::from(0.0).is_empty());
        assert!(!FieldValue::from(false).is_empty());
        assert!(!FieldValue::from(550.0).is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_untagged_values() {
        let json = serde_json::to_string(&vec![
            FieldValue::from("Vor Ort"),
            FieldValue::from(12_u32),
            FieldValue::from(true),
        ])
        .expect("values should serialize");
        assert_eq!(json, r#"["Vor Ort",12,true]"#);
    }
}

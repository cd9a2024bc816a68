//! Human-readable listing of an extraction.

use labor_core::{Extraction, Field, FieldValue};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

const CATEGORIES: &[(&str, &[Field])] = &[
    (
        "Schulung",
        &[
            Field::Schulungsname,
            Field::DatumStart,
            Field::DatumEnde,
            Field::Uhrzeit,
            Field::Format,
        ],
    ),
    ("Ort", &[Field::FirmaOrt, Field::Adresse]),
    ("Intern (wir)", &[Field::AbsenderIntern, Field::AbsenderEmail]),
    (
        "Extern (Ansprechpartner)",
        &[Field::AnsprechpartnerExtern, Field::EmailExtern, Field::Telefon],
    ),
    ("Auftraggeber/Kunde", &[Field::Auftraggeber, Field::Kunde]),
    ("Teilnehmer", &[Field::Teilnehmeranzahl]),
    (
        "Trainer",
        &[Field::Trainer, Field::TrainerBekannt, Field::TrainerAdresse],
    ),
    (
        "Finanzen",
        &[
            Field::Tagessatz,
            Field::TrainerKosten,
            Field::Vorbereitungspauschale,
            Field::Reisekosten,
        ],
    ),
    ("Termine", &[Field::BriefingDatum]),
];

/// Found fields grouped by topic, then the not-found list.
///
/// Categories without a found field are left out.
#[must_use]
pub fn render_report(extraction: &Extraction) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{heavy}\nEXTRAHIERTE DATEN\n{heavy}");

    for (category, fields) in CATEGORIES {
        let found: Vec<_> = fields
            .iter()
            .filter_map(|field| extraction.get(*field).map(|value| (*field, value)))
            .collect();
        if found.is_empty() {
            continue;
        }

        let _ = writeln!(out, "\n{category}:");
        for (field, value) in found {
            let _ = writeln!(out, "  {}", line(field, value));
        }
    }

    if !extraction.not_found().is_empty() {
        let _ = writeln!(out, "\n{}\nNICHT GEFUNDEN:", "-".repeat(RULE_WIDTH));
        for field in extraction.not_found() {
            let _ = writeln!(out, "  ✗ {field}");
        }
    }

    let _ = writeln!(out, "\n{heavy}");
    out
}

fn line(field: Field, value: &FieldValue) -> String {
    match (field, value) {
        (Field::TrainerBekannt, FieldValue::Flag(true)) => {
            "★ trainer_bekannt: Ja (in der Konfiguration)".to_string()
        }
        (Field::TrainerBekannt, FieldValue::Flag(false)) => {
            "+ trainer_bekannt: Nein (neuer Trainer)".to_string()
        }
        (Field::Adresse, FieldValue::Text(address)) => {
            format!("✓ {field}: {}", address.replace('\n', ", "))
        }
        _ => format!("✓ {field}: {value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_and_not_found() {
        let mut out = Extraction::new();
        out.record(Field::Schulungsname, Some("Power BI".into()));
        out.record(Field::Adresse, Some("Auhofstraße 10\n84048 Mainburg".into()));
        out.record(Field::TrainerBekannt, Some(false.into()));
        out.record(Field::Tagessatz, Some(1200.0_f64.into()));
        let report = render_report(&out.finish());

        assert!(report.contains("Schulung:\n  ✓ schulungsname: Power BI\n"));
        assert!(report.contains("Ort:\n  ✓ adresse: Auhofstraße 10, 84048 Mainburg\n"));
        assert!(report.contains("+ trainer_bekannt: Nein (neuer Trainer)"));
        assert!(report.contains("✓ tagessatz: 1200\n"));
        assert!(!report.contains("Teilnehmer:"));
        assert!(report.contains("NICHT GEFUNDEN:\n  ✗ datum_start\n"));
    }

    #[test]
    fn test_complete_extraction_has_no_missing_section() {
        let mut out = Extraction::new();
        for field in Field::ALL {
            out.record(field, Some(FieldValue::Text("x".to_string())));
        }
        let report = render_report(&out.finish());

        assert!(!report.contains("NICHT GEFUNDEN"));
        assert!(report.contains("Termine:\n  ✓ briefing_datum: x\n"));
    }
}

//! Property payloads for the Notion bookings database.
//!
//! Only the mapping lives here. Sending the page is left to whoever holds
//! the API key; [`NotionPage::payload`] builds the body of a `POST /pages`.

use chrono::NaiveDate;
use labor_core::{Extraction, Field, FieldValue, NotionSettings};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
enum Kind {
    Title,
    Text,
    Number,
    Date,
    /// Single select; the payload names the option group in the settings.
    Select(&'static str),
    MultiSelect(&'static str),
}

struct Column {
    field: Field,
    property: &'static str,
    kind: Kind,
}

const fn column(field: Field, property: &'static str, kind: Kind) -> Column {
    Column {
        field,
        property,
        kind,
    }
}

/// Property names as they appear in the database, trailing spaces included.
const COLUMNS: &[Column] = &[
    column(Field::Schulungsname, "Name", Kind::Title),
    column(Field::DatumStart, "Event time", Kind::Date),
    column(Field::AnsprechpartnerExtern, "Ansprechpartner Kunde ", Kind::Text),
    column(Field::Tagessatz, "Preis - Netto", Kind::Number),
    column(Field::TrainerKosten, "Kosten Trainer", Kind::Number),
    column(Field::Uhrzeit, "Uhrzeit", Kind::Text),
    column(Field::Teilnehmeranzahl, "Teilnehmeranzahl", Kind::Number),
    column(Field::Format, "Remote/vor Ort", Kind::Select("format")),
    column(Field::Auftraggeber, "Akquiriert durch", Kind::Select("auftraggeber")),
    column(Field::Trainer, "Held by", Kind::Select("trainer")),
    column(Field::Reisekosten, "Reisekosten", Kind::MultiSelect("reisekosten")),
    column(Field::Schulungsname, "Schulungsthema", Kind::Select("schulungsthema")),
];

const STATUS_PROPERTY: &str = "Status ";
const COMPANY_PROPERTY: &str = "Firmenname";

/// Selects that only accept existing options. Unknown values fall back.
const STRICT_FALLBACKS: &[(&str, &str)] = &[
    ("format", "vor Ort"),
    ("reisekosten", "Gemäß Trainer RK"),
];

/// The Notion properties of one booking.
#[derive(Debug, Clone, PartialEq)]
pub struct NotionPage {
    properties: Map<String, Value>,
}

impl NotionPage {
    #[must_use]
    pub fn from_extraction(extraction: &Extraction, settings: &NotionSettings) -> Self {
        let mut properties = Map::new();

        properties.insert(
            STATUS_PROPERTY.to_string(),
            json!({ "status": { "name": settings.status } }),
        );

        if let Some(company) = extraction
            .text(Field::Kunde)
            .or_else(|| extraction.text(Field::FirmaOrt))
        {
            properties.insert(COMPANY_PROPERTY.to_string(), rich_text(company));
        }

        for column in COLUMNS {
            let Some(value) = extraction.get(column.field) else {
                continue;
            };
            if let Some(property) = build_property(column.kind, value, extraction, settings) {
                properties.insert(column.property.to_string(), property);
            }
        }

        debug!("Built {} Notion properties", properties.len());
        Self { properties }
    }

    #[must_use]
    pub const fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.properties.clone())
    }

    /// Request body for creating the page in `database_id`.
    #[must_use]
    pub fn payload(&self, database_id: &str) -> Value {
        json!({
            "parent": { "database_id": database_id },
            "properties": self.properties,
        })
    }

    /// `(property, displayed value)` pairs for a terminal preview.
    #[must_use]
    pub fn preview(&self) -> Vec<(String, String)> {
        self.properties
            .iter()
            .map(|(name, property)| (name.clone(), display_property(property)))
            .collect()
    }
}

fn build_property(
    kind: Kind,
    value: &FieldValue,
    extraction: &Extraction,
    settings: &NotionSettings,
) -> Option<Value> {
    match kind {
        Kind::Title => Some(json!({ "title": [{ "text": { "content": value.to_string() } }] })),
        Kind::Text => Some(rich_text(&value.to_string())),
        Kind::Number => value.as_number().map(|n| json!({ "number": n })),
        Kind::Date => {
            let start = iso_date(value.as_text()?)?;
            let end = extraction.text(Field::DatumEnde).and_then(iso_date);
            Some(match end {
                Some(end) if end != start => json!({ "date": { "start": start, "end": end } }),
                _ => json!({ "date": { "start": start } }),
            })
        }
        Kind::Select(group) => {
            let option = select_option(group, value, settings);
            Some(json!({ "select": { "name": option } }))
        }
        Kind::MultiSelect(group) => {
            let option = select_option(group, value, settings);
            Some(json!({ "multi_select": [{ "name": option }] }))
        }
    }
}

fn rich_text(content: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": content } }] })
}

/// `DD.MM.YYYY` to `YYYY-MM-DD`.
fn iso_date(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date, "%d.%m.%Y")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Map an extracted value onto a select option.
///
/// Configured mappings win. Strict selects replace anything unmapped with
/// their fallback; the other selects let Notion create the option.
fn select_option(group: &str, value: &FieldValue, settings: &NotionSettings) -> String {
    let raw = value.to_string();

    if let Some(mapped) = settings
        .select_options
        .get(group)
        .and_then(|options| options.get(&raw))
    {
        return mapped.clone();
    }

    if let Some((_, fallback)) = STRICT_FALLBACKS.iter().find(|(name, _)| *name == group) {
        warn!("'{raw}' is not a Notion option for '{group}', using '{fallback}'");
        return (*fallback).to_string();
    }

    raw
}

fn display_property(property: &Value) -> String {
    let text_at = |pointer: &str| {
        property
            .pointer(pointer)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    text_at("/title/0/text/content")
        .or_else(|| text_at("/rich_text/0/text/content"))
        .or_else(|| property.get("number").map(Value::to_string))
        .or_else(|| {
            let start = text_at("/date/start")?;
            Some(match text_at("/date/end") {
                Some(end) => format!("{start} → {end}"),
                None => start,
            })
        })
        .or_else(|| text_at("/select/name"))
        .or_else(|| text_at("/multi_select/0/name"))
        .or_else(|| text_at("/status/name"))
        .unwrap_or_else(|| property.to_string())
}

//! Tunable knobs shared by the config file and the engines that read them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Heuristics of the extraction engine.
///
/// The defaults are the business rules the office has always worked with;
/// they are configurable because none of them is a law of nature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// A date without a year that lies further than this many days in the
    /// past is assumed to mean next year.
    #[serde(default = "ExtractionSettings::default_rolling_window_days")]
    pub rolling_window_days: i64,
    /// Years of single dates older than `current year - max_past_years` are
    /// treated as typos and replaced by the current year. Ranges keep theirs.
    #[serde(default = "ExtractionSettings::default_max_past_years")]
    pub max_past_years: i32,
    /// Days between the briefing call and the first training day.
    #[serde(default = "ExtractionSettings::default_briefing_lead_days")]
    pub briefing_lead_days: i64,
    /// Shortest accepted training title, in characters.
    #[serde(default = "ExtractionSettings::default_min_title_len")]
    pub min_title_len: usize,
    /// Shortest accepted phone number, in characters after whitespace collapse.
    #[serde(default = "ExtractionSettings::default_min_phone_len")]
    pub min_phone_len: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            rolling_window_days: Self::default_rolling_window_days(),
            max_past_years: Self::default_max_past_years(),
            briefing_lead_days: Self::default_briefing_lead_days(),
            min_title_len: Self::default_min_title_len(),
            min_phone_len: Self::default_min_phone_len(),
        }
    }
}

impl ExtractionSettings {
    const fn default_rolling_window_days() -> i64 {
        30
    }

    const fn default_max_past_years() -> i32 {
        2
    }

    const fn default_briefing_lead_days() -> i64 {
        3
    }

    const fn default_min_title_len() -> usize {
        5
    }

    const fn default_min_phone_len() -> usize {
        8
    }
}

/// Option names of the Notion booking database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotionSettings {
    /// Per extractor field: extracted value → existing select option.
    #[serde(default = "NotionSettings::default_select_options")]
    pub select_options: BTreeMap<String, BTreeMap<String, String>>,
    /// Status given to every new row.
    #[serde(default = "NotionSettings::default_status")]
    pub status: String,
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self {
            select_options: Self::default_select_options(),
            status: Self::default_status(),
        }
    }
}

impl NotionSettings {
    fn default_select_options() -> BTreeMap<String, BTreeMap<String, String>> {
        let pairs = |entries: &[(&str, &str)]| {
            entries
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect::<BTreeMap<_, _>>()
        };

        BTreeMap::from([
            (
                "format".to_string(),
                pairs(&[("Vor Ort", "vor Ort"), ("Remote", "Remote")]),
            ),
            (
                "reisekosten".to_string(),
                pairs(&[("inkl. im Tagessatz", "Im Angebot inkludiert")]),
            ),
        ])
    }

    fn default_status() -> String {
        "Angefragt".to_string()
    }
}

//! Feedback sessions for a finished training.
//!
//! A session bundles the validated training name, client, trainer and date
//! with a short public id. Participants open `<base>/s/<id>`; the link stops
//! accepting answers the evening after the training. Registering the session
//! with the feedback service is not done here.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use labor_core::{Extraction, Field};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Public feedback site.
pub const FEEDBACK_URL: &str = "https://feedback-schulungen.vercel.app";

const ID_LEN: usize = 6;
const ID_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const EXPIRY_HOUR: u32 = 18;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const UNKNOWN_CLIENT: &str = "Unbekannt";

const UMLAUTS: [(char, &str); 7] = [
    ('ä', "ae"),
    ('ö', "oe"),
    ('ü', "ue"),
    ('ß', "ss"),
    ('Ä', "Ae"),
    ('Ö', "Oe"),
    ('Ü', "Ue"),
];

const MONTH_FOLDERS: [&str; 12] = [
    "01-Januar",
    "02-Februar",
    "03-März",
    "04-April",
    "05-Mai",
    "06-Juni",
    "07-Juli",
    "08-August",
    "09-September",
    "10-Oktober",
    "11-November",
    "12-Dezember",
];

pub type Result<T> = std::result::Result<T, FeedbackError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("{0} ist leer")]
    Empty(&'static str),

    #[error("{what} zu kurz (mindestens {min} Zeichen)")]
    TooShort { what: &'static str, min: usize },

    #[error("Ungültiges Datumsformat: '{0}'. Erwartet: YYYY-MM-DD")]
    DateFormat(String),

    #[error("Ungültiges Datum: '{0}'")]
    InvalidDate(String),
}

/// Random six-character id from `[a-z0-9]`.
#[must_use]
pub fn generate_session_id() -> String {
    // the low 62 bits of a v7 uuid are random
    let mut bits = Uuid::now_v7().as_u128() & ((1 << 62) - 1);
    let mut id = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        let index = usize::try_from(bits % 36).unwrap_or_default();
        id.push(char::from(ID_ALPHABET[index]));
        bits /= 36;
    }
    id
}

#[must_use]
pub fn replace_umlauts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match UMLAUTS.iter().find(|(umlaut, _)| *umlaut == c) {
            Some((_, ascii)) => out.push_str(ascii),
            None => out.push(c),
        }
    }
    out
}

/// Folder-safe form of a training name.
///
/// Umlauts are spelled out, spaces and slashes become separators, other
/// punctuation is dropped and separator runs collapse into one `_`.
#[must_use]
pub fn sanitize_folder_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in replace_umlauts(name).chars() {
        if matches!(c, ' ' | '/' | '\\' | '_' | '-') {
            pending_separator = true;
        } else if c.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        }
    }
    out
}

/// Trimmed text with inner whitespace collapsed, at least `min` characters.
fn normalized(raw: &str, what: &'static str, min: usize) -> Result<String> {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(FeedbackError::Empty(what));
    }
    if text.chars().count() < min {
        return Err(FeedbackError::TooShort { what, min });
    }
    Ok(text)
}

pub fn validate_training_name(raw: &str) -> Result<String> {
    normalized(raw, "Schulungsname", 3)
}

pub fn validate_trainer_name(raw: &str) -> Result<String> {
    normalized(raw, "Trainer-Name", 2)
}

pub fn validate_client(raw: &str) -> Result<String> {
    normalized(raw, "Kunde/Firma", 2)
}

/// A validated training date and, for dates behind `today`, a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCheck {
    pub date: NaiveDate,
    pub warning: Option<String>,
}

/// Strict `YYYY-MM-DD`. Past dates are accepted with a warning.
pub fn validate_date(raw: &str, today: NaiveDate) -> Result<DateCheck> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FeedbackError::Empty("Datum"));
    }
    let shaped = raw.len() == 10
        && raw.char_indices().all(|(i, c)| {
            if i == 4 || i == 7 {
                c == '-'
            } else {
                c.is_ascii_digit()
            }
        });
    if !shaped {
        return Err(FeedbackError::DateFormat(raw.to_string()));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| FeedbackError::InvalidDate(raw.to_string()))?;

    let days_past = (today - date).num_days();
    let warning =
        (days_past > 0).then(|| format!("Datum liegt {days_past} Tag(e) in der Vergangenheit"));
    Ok(DateCheck { date, warning })
}

/// 18:00 on the day after the training.
#[must_use]
pub fn expires_at(date: NaiveDate) -> Option<NaiveDateTime> {
    let next_day = date.succ_opt()?;
    Some(next_day.and_time(NaiveTime::from_hms_opt(EXPIRY_HOUR, 0, 0)?))
}

/// Expiry for a raw `YYYY-MM-DD`; unreadable dates expire a week from `now`.
#[must_use]
pub fn expires_at_for(raw: &str, now: NaiveDateTime) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(expires_at)
        .or_else(|| now.checked_add_signed(Duration::days(7)))
        .unwrap_or(now)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

#[must_use]
pub fn feedback_link(base_url: &str, session_id: &str) -> String {
    format!("{}/s/{session_id}", base_url.trim_end_matches('/'))
}

/// Client named after the last ` bei ` of a training name, if any.
///
/// `KI Workshop bei Bosch` belongs to `Bosch`.
#[must_use]
pub fn client_from_title(title: &str) -> Option<&str> {
    title
        .rsplit_once(" bei ")
        .map(|(_, client)| client.trim())
        .filter(|client| !client.is_empty())
}

/// Unvalidated inputs for a feedback session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub training: String,
    pub client: Option<String>,
    pub trainer: String,
    /// `YYYY-MM-DD`; today when absent.
    pub date: Option<String>,
}

impl FeedbackRequest {
    /// Request for the training described by an extraction.
    ///
    /// The client is `kunde`, then `firma_ort`; the date is `datum_start`.
    #[must_use]
    pub fn from_extraction(extraction: &Extraction) -> Self {
        let date = extraction
            .text(Field::DatumStart)
            .and_then(|date| NaiveDate::parse_from_str(date, "%d.%m.%Y").ok())
            .map(|date| date.format("%Y-%m-%d").to_string());
        Self {
            training: extraction
                .text(Field::Schulungsname)
                .unwrap_or_default()
                .to_string(),
            client: extraction
                .text(Field::Kunde)
                .or_else(|| extraction.text(Field::FirmaOrt))
                .map(str::to_string),
            trainer: extraction.text(Field::Trainer).unwrap_or_default().to_string(),
            date,
        }
    }

    /// Validate every input and assign a fresh id.
    pub fn into_session(self, today: NaiveDate) -> Result<FeedbackSession> {
        self.into_session_with_id(generate_session_id(), today)
    }

    pub fn into_session_with_id(self, id: String, today: NaiveDate) -> Result<FeedbackSession> {
        let training = validate_training_name(&self.training)?;
        let client = match self.client.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(client) => client.to_string(),
            None => client_from_title(&training)
                .unwrap_or(UNKNOWN_CLIENT)
                .to_string(),
        };
        let client = validate_client(&client)?;
        let trainer = validate_trainer_name(&self.trainer)?;

        let raw_date = self
            .date
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
        let DateCheck { date, warning } = validate_date(&raw_date, today)?;
        if let Some(warning) = &warning {
            warn!("{warning}");
        }

        let expires_at = expires_at(date).ok_or_else(|| FeedbackError::InvalidDate(raw_date))?;
        debug!("Feedback session {id} for '{training}' on {date}");

        Ok(FeedbackSession {
            id,
            training,
            client,
            trainer,
            date,
            expires_at,
            warning,
        })
    }
}

/// A validated feedback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSession {
    pub id: String,
    pub training: String,
    pub client: String,
    pub trainer: String,
    pub date: NaiveDate,
    pub expires_at: NaiveDateTime,
    pub warning: Option<String>,
}

impl FeedbackSession {
    #[must_use]
    pub fn link(&self, base_url: &str) -> String {
        feedback_link(base_url, &self.id)
    }

    /// `<root>/<YYYY>/<MM-Monat>/<YYYY-MM-DD>_<name>`.
    #[must_use]
    pub fn folder(&self, root: &Path) -> PathBuf {
        let month = usize::try_from(self.date.month0())
            .ok()
            .and_then(|index| MONTH_FOLDERS.get(index))
            .copied()
            .unwrap_or_default();
        root.join(self.date.year().to_string())
            .join(month)
            .join(format!(
                "{}_{}",
                self.date.format("%Y-%m-%d"),
                sanitize_folder_name(&self.training)
            ))
    }

    #[must_use]
    pub fn expires_at_text(&self) -> String {
        self.expires_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Contents of the `info.txt` kept next to the QR code.
    #[must_use]
    pub fn info_text(&self, base_url: &str, created_at: NaiveDateTime) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Schulungsname: {}", self.training);
        let _ = writeln!(out, "Kunde/Firma: {}", self.client);
        let _ = writeln!(out, "Trainer: {}", self.trainer);
        let _ = writeln!(out, "Datum: {}", self.date.format("%Y-%m-%d"));
        let _ = writeln!(out, "Schulung-ID: {}", self.id);
        let _ = writeln!(out, "Feedback-Link: {}", self.link(base_url));
        let _ = writeln!(out, "Erstellt am: {}", created_at.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(out, "Läuft ab: {}", self.expires_at_text());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("test date should be valid")
    }

    fn request(training: &str, client: Option<&str>, date: Option<&str>) -> FeedbackRequest {
        FeedbackRequest {
            training: training.to_string(),
            client: client.map(str::to_string),
            trainer: "  Oumar   Langer ".to_string(),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_session_ids_are_short_and_lowercase() {
        let id = generate_session_id();
        assert_eq!(id.len(), 6);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_sanitize_folder_name() {
        assert_eq!(replace_umlauts("Größe Übung"), "Groesse Uebung");
        assert_eq!(sanitize_folder_name("KI Einführung / Teil 2"), "KI_Einfuehrung_Teil_2");
        assert_eq!(sanitize_folder_name(" -Power BI: Grundlagen!- "), "Power_BI_Grundlagen");
        assert_eq!(sanitize_folder_name("a__b--c"), "a_b_c");
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(validate_trainer_name("  Max   Müller "), Ok("Max Müller".to_string()));
        assert_eq!(validate_training_name(" "), Err(FeedbackError::Empty("Schulungsname")));
        assert_eq!(
            validate_training_name("KI"),
            Err(FeedbackError::TooShort {
                what: "Schulungsname",
                min: 3
            })
        );
        assert!(validate_client("X").is_err());
        assert_eq!(validate_client("3M"), Ok("3M".to_string()));
    }

    #[test]
    fn test_date_validation() {
        let today = date(2026, 1, 20);

        let check = validate_date("2026-01-22", today);
        assert_eq!(
            check,
            Ok(DateCheck {
                date: date(2026, 1, 22),
                warning: None
            })
        );

        let past = validate_date("2026-01-17", today);
        assert_eq!(
            past.map(|c| c.warning),
            Ok(Some("Datum liegt 3 Tag(e) in der Vergangenheit".to_string()))
        );

        assert!(matches!(validate_date("20.01.2026", today), Err(FeedbackError::DateFormat(_))));
        assert!(matches!(validate_date("2026-02-30", today), Err(FeedbackError::InvalidDate(_))));
        assert_eq!(validate_date("", today), Err(FeedbackError::Empty("Datum")));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_expiry_is_next_evening() {
        let now = date(2026, 1, 1)
            .and_hms_opt(9, 30, 0)
            .expect("test time should be valid");

        assert_eq!(expires_at_for("2026-01-31", now), "2026-02-01T18:00:00");
        assert_eq!(expires_at_for("kaputt", now), "2026-01-08T09:30:00");
    }

    #[test]
    fn test_link_and_client_from_title() {
        assert_eq!(
            feedback_link(FEEDBACK_URL, "ab12cd"),
            "https://feedback-schulungen.vercel.app/s/ab12cd"
        );
        assert_eq!(feedback_link("https://example.org/", "x"), "https://example.org/s/x");
        assert_eq!(client_from_title("KI Workshop bei Bosch"), Some("Bosch"));
        assert_eq!(client_from_title("KI Workshop"), None);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_session_from_request() {
        let today = date(2026, 1, 10);
        let session = request("KI Workshop bei Bosch", None, Some("2026-01-20"))
            .into_session_with_id("q7x2ka".to_string(), today)
            .expect("request should be valid");

        assert_eq!(session.client, "Bosch");
        assert_eq!(session.trainer, "Oumar Langer");
        assert_eq!(session.expires_at_text(), "2026-01-21T18:00:00");
        assert_eq!(
            session.folder(Path::new("/feedbacks")),
            PathBuf::from("/feedbacks/2026/01-Januar/2026-01-20_KI_Workshop_bei_Bosch")
        );

        let created = today.and_hms_opt(8, 0, 0).expect("test time should be valid");
        let info = session.info_text(FEEDBACK_URL, created);
        assert!(info.starts_with("Schulungsname: KI Workshop bei Bosch\nKunde/Firma: Bosch\n"));
        assert!(info.contains("Feedback-Link: https://feedback-schulungen.vercel.app/s/q7x2ka\n"));
        assert!(info.ends_with("Läuft ab: 2026-01-21T18:00:00\n"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_missing_client_and_date_defaults() {
        let today = date(2026, 3, 2);
        let session = request("Python Grundlagen", Some("  "), None)
            .into_session(today)
            .expect("request should be valid");

        assert_eq!(session.client, "Unbekannt");
        assert_eq!(session.date, today);
        assert_eq!(session.warning, None);
        assert_eq!(session.id.len(), 6);
    }

    #[test]
    fn test_invalid_request_is_rejected() {
        let today = date(2026, 3, 2);
        let error = request("KI", Some("Bosch"), None)
            .into_session_with_id("a".into(), today)
            .map(|session| session.id)
            .map_err(|e| e.to_string());
        assert_eq!(error, Err("Schulungsname zu kurz (mindestens 3 Zeichen)".to_string()));

        let error = request("Python Grundlagen", Some("Bosch"), Some("2026/03/05"))
            .into_session_with_id("a".into(), today)
            .map(|session| session.id);
        assert_eq!(error, Err(FeedbackError::DateFormat("2026/03/05".to_string())));
    }

    #[test]
    fn test_request_from_extraction() {
        let mut out = Extraction::new();
        out.record(Field::Schulungsname, Some("Power BI für Controller".into()));
        out.record(Field::FirmaOrt, Some("HAIX Schuhe Produktions GmbH".into()));
        out.record(Field::Trainer, Some("Lukas Sontheimer".into()));
        out.record(Field::DatumStart, Some("21.01.2026".into()));
        let request = FeedbackRequest::from_extraction(&out.finish());

        assert_eq!(request.client.as_deref(), Some("HAIX Schuhe Produktions GmbH"));
        assert_eq!(request.date.as_deref(), Some("2026-01-21"));
        assert_eq!(request.trainer, "Lukas Sontheimer");
    }
}

//! Accepted quotes (Angebote) on their way to an invoice.
//!
//! A quote waits for a training date, then for the training to happen, then
//! for the invoice. Only the step from a fixed date to a due invoice happens
//! on its own, once the training date is reached.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Accepted, no training date yet.
    WarteTermin,
    TerminSteht,
    /// The training took place; the invoice is due.
    RechnungFaellig,
    Erledigt,
}

impl QuoteStatus {
    pub const ALL: [Self; 4] = [
        Self::WarteTermin,
        Self::TerminSteht,
        Self::RechnungFaellig,
        Self::Erledigt,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::WarteTermin => "warte_termin",
            Self::TerminSteht => "termin_steht",
            Self::RechnungFaellig => "rechnung_faellig",
            Self::Erledigt => "erledigt",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WarteTermin => "Warte auf Termin",
            Self::TerminSteht => "Termin steht",
            Self::RechnungFaellig => "Rechnung fällig",
            Self::Erledigt => "Erledigt",
        }
    }

    /// Status after `event`, or `None` when the event does not apply.
    #[must_use]
    pub const fn next(self, event: QuoteEvent) -> Option<Self> {
        match (self, event) {
            (Self::WarteTermin | Self::TerminSteht, QuoteEvent::DateSet) => Some(Self::TerminSteht),
            (Self::TerminSteht, QuoteEvent::DateReached) => Some(Self::RechnungFaellig),
            (Self::RechnungFaellig, QuoteEvent::Invoiced) => Some(Self::Erledigt),
            _ => None,
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteEvent {
    /// A training date was agreed or moved.
    DateSet,
    DateReached,
    Invoiced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub client: String,
    pub service: String,
    pub amount: f64,
    pub status: QuoteStatus,
    pub training_date: Option<NaiveDate>,
    /// When to ask the client for a date again.
    pub reminder_date: Option<NaiveDate>,
    pub po_number: Option<String>,
}

impl Quote {
    /// A freshly accepted quote.
    ///
    /// With a known training date it starts at `termin_steht`; without one
    /// it waits and gets a reminder `reminder_weeks` from `today`.
    #[must_use]
    pub fn new(
        client: impl Into<String>,
        service: impl Into<String>,
        amount: f64,
        training_date: Option<NaiveDate>,
        reminder_weeks: i64,
        today: NaiveDate,
    ) -> Self {
        let (status, reminder_date) = match training_date {
            Some(_) => (QuoteStatus::TerminSteht, None),
            None => (
                QuoteStatus::WarteTermin,
                Duration::try_weeks(reminder_weeks).and_then(|w| today.checked_add_signed(w)),
            ),
        };
        Self {
            client: client.into(),
            service: service.into(),
            amount,
            status,
            training_date,
            reminder_date,
            po_number: None,
        }
    }

    fn apply(&mut self, event: QuoteEvent) -> bool {
        match self.status.next(event) {
            Some(next) => {
                debug!("Quote for {}: {} -> {next}", self.client, self.status);
                self.status = next;
                true
            }
            None => {
                warn!(
                    "Quote for {} is {}, ignoring {event:?}",
                    self.client, self.status
                );
                false
            }
        }
    }

    /// Fix the training date; the reminder is no longer needed.
    pub fn schedule(&mut self, date: NaiveDate) -> bool {
        if !self.apply(QuoteEvent::DateSet) {
            return false;
        }
        self.training_date = Some(date);
        self.reminder_date = None;
        true
    }

    pub fn mark_invoiced(&mut self) -> bool {
        self.apply(QuoteEvent::Invoiced)
    }

    /// Move a scheduled quote to `rechnung_faellig` once its date is reached.
    pub fn advance(&mut self, today: NaiveDate) -> bool {
        let reached = self.training_date.is_some_and(|date| date <= today);
        self.status == QuoteStatus::TerminSteht && reached && self.apply(QuoteEvent::DateReached)
    }

    /// Signed days from `today` to the training.
    #[must_use]
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        self.training_date.map(|date| (date - today).num_days())
    }

    #[must_use]
    pub fn countdown(&self, today: NaiveDate) -> Option<String> {
        self.days_until(today).map(|days| match days {
            0 => "Heute!".to_string(),
            d if d > 0 => format!("Noch {d} Tage"),
            d => format!("Vor {} Tagen", d.unsigned_abs()),
        })
    }

    /// Invoice mail for a quote whose training took place.
    #[must_use]
    pub fn invoice_mail(&self, billing_email: &str, sender: &str) -> String {
        let date = self
            .training_date
            .map(|date| date.format("%Y-%m-%d").to_string());
        let po_line = self
            .po_number
            .as_deref()
            .map(|po| format!("\nIhre Bestellnummer: {po}"))
            .unwrap_or_default();
        format!(
            "An: {billing_email}\n\
             Betreff: Rechnung {sender} - {service} {subject_date}\n\
             \n\
             Sehr geehrte Damen und Herren,\n\
             \n\
             anbei erhalten Sie die Rechnung für die durchgeführte Schulung \"{service}\" am {body_date}.\n\
             \n\
             Rechnungsbetrag: {amount} €{po_line}\n\
             \n\
             Bei Rückfragen stehen wir Ihnen gerne zur Verfügung.\n\
             \n\
             Mit freundlichen Grüßen\n\
             {sender}",
            service = self.service,
            subject_date = date.as_deref().unwrap_or_default(),
            body_date = date.as_deref().unwrap_or("[Datum]"),
            amount = amount_text(self.amount),
        )
    }
}

/// Advance every quote whose training date is reached; returns how many moved.
pub fn advance_all(quotes: &mut [Quote], today: NaiveDate) -> usize {
    quotes
        .iter_mut()
        .map(|quote| quote.advance(today))
        .filter(|moved| *moved)
        .count()
}

/// Total amount per status, every status present.
#[must_use]
pub fn totals(quotes: &[Quote]) -> BTreeMap<QuoteStatus, f64> {
    let mut sums: BTreeMap<_, _> = QuoteStatus::ALL.into_iter().map(|s| (s, 0.0)).collect();
    for quote in quotes {
        *sums.entry(quote.status).or_insert(0.0) += quote.amount;
    }
    sums
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub urgency: Urgency,
    pub text: String,
}

/// Due invoices first, then quotes whose reminder date has come.
#[must_use]
pub fn notifications(quotes: &[Quote], today: NaiveDate) -> Vec<Notification> {
    let due = quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::RechnungFaellig)
        .map(|q| Notification {
            urgency: Urgency::Error,
            text: format!("Rechnung fällig: {} — {} €", q.client, amount_text(q.amount)),
        });
    let reminders = quotes
        .iter()
        .filter(|q| {
            q.status == QuoteStatus::WarteTermin && q.reminder_date.is_some_and(|d| d <= today)
        })
        .map(|q| Notification {
            urgency: Urgency::Warning,
            text: format!("Termin nachfragen: {}", q.client),
        });
    due.chain(reminders).collect()
}

/// `1234.5` → `1,234.50`.
#[must_use]
pub fn amount_text(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

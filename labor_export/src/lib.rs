#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Turns a finished [`labor_core::Extraction`] into the shapes the office
//! works with downstream: Notion rows, contract drafts, feedback sessions and
//! a plain report. [`quote`] tracks accepted quotes up to the invoice.

pub mod contract;
pub mod feedback;
pub mod notion;
pub mod quote;
pub mod report;

pub use contract::ContractDraft;
pub use feedback::{FeedbackError, FeedbackRequest, FeedbackSession};
pub use notion::NotionPage;
pub use quote::{Quote, QuoteEvent, QuoteStatus};
pub use report::render_report;

/// Whole-euro text for an amount, truncating cents.
pub(crate) fn euros(amount: f64) -> String {
    format!("{:.0}", amount.trunc())
}

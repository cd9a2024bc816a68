#![deny(
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

pub mod extraction;
pub mod field;
pub mod registry;
pub mod settings;

pub use extraction::Extraction;
pub use field::{Field, FieldValue};
pub use registry::{Agency, Company, InternalPerson, Registry, Trainer};
pub use settings::{ExtractionSettings, NotionSettings};

/// Turns free-form correspondence into a booking record.
///
/// The regex engine is the only implementation in this workspace; the trait
/// is the seam where a model-backed extractor would plug in.
pub trait BookingExtractor: Send + Sync {
    /// Extract every field from `text`. Never fails: fields that cannot be
    /// determined end up in [`Extraction::not_found`].
    fn extract(&self, text: &str) -> Extraction;
}

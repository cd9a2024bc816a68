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

pub mod dates;
pub mod engine;
pub mod fields;
pub mod rules;

pub use dates::{Calendar, format_date};
pub use engine::ExtractionEngine;
pub use fields::FieldExtractor;
pub use rules::{BuildError, Cascade, Context, RuleDef};

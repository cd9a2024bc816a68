//! Field extractors.
//!
//! Each extractor owns the compiled cascades for one group of fields and
//! classifies those fields in the shared [`Extraction`]. Later extractors may
//! read what earlier ones recorded (format looks at the venue, the client
//! falls back to it, the briefing date needs the start date), so the order
//! returned by [`all`] is significant.

mod briefing;
mod contacts;
mod money;
mod participants;
mod parties;
mod schedule;
mod title;
mod trainer;
mod venue;

use labor_core::Extraction;

use crate::rules::{BuildError, Context};

pub use briefing::BriefingDateExtractor;
pub use contacts::ContactExtractor;
pub use money::{FeeExtractor, TravelCostExtractor};
pub use participants::ParticipantExtractor;
pub use parties::PartyExtractor;
pub use schedule::{DateExtractor, TimeExtractor};
pub use title::TitleExtractor;
pub use trainer::{TrainerAddressExtractor, TrainerExtractor};
pub use venue::{FormatExtractor, VenueExtractor};

/// One step of the extraction pass.
pub trait FieldExtractor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Classify this extractor's fields in `out`.
    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction);
}

/// Every extractor, in the order the fields depend on each other.
///
/// # Errors
/// Returns an error if any rule pattern does not compile.
pub fn all() -> Result<Vec<Box<dyn FieldExtractor>>, BuildError> {
    Ok(vec![
        Box::new(TitleExtractor::new()?),
        Box::new(DateExtractor::new()?),
        Box::new(TimeExtractor::new()?),
        Box::new(VenueExtractor::new()?),
        Box::new(FormatExtractor::new()?),
        Box::new(ContactExtractor::new()?),
        Box::new(ParticipantExtractor::new()?),
        Box::new(TrainerExtractor::new()?),
        Box::new(TrainerAddressExtractor::new()?),
        Box::new(FeeExtractor::new()?),
        Box::new(TravelCostExtractor::new()?),
        Box::new(PartyExtractor::new()?),
        Box::new(BriefingDateExtractor),
    ])
}

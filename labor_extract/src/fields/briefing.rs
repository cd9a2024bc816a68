use labor_core::{Extraction, Field};

use super::FieldExtractor;
use crate::dates::Calendar;
use crate::rules::Context;

/// `briefing_datum`: the configured number of days before the first training day.
pub struct BriefingDateExtractor;

impl FieldExtractor for BriefingDateExtractor {
    fn name(&self) -> &'static str {
        "briefing"
    }

    fn extract(&self, _text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let lead = ctx.settings.briefing_lead_days.checked_neg();
        let briefing = out
            .text(Field::DatumStart)
            .zip(lead)
            .and_then(|(start, lead)| Calendar::shift_days(start, lead));
        out.record(Field::BriefingDatum, briefing.map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::testing::{run, run_with};

    #[test]
    fn test_three_days_before_start() {
        let mut known = Extraction::new();
        known.record(Field::DatumStart, Some("02.03.2026".into()));
        let out = run_with(&BriefingDateExtractor, "", known);

        assert_eq!(out.text(Field::BriefingDatum), Some("27.02.2026"));
    }

    #[test]
    fn test_missing_or_invalid_start() {
        let out = run(&BriefingDateExtractor, "");
        assert_eq!(out.not_found(), &[Field::BriefingDatum]);

        let mut known = Extraction::new();
        known.record(Field::DatumStart, Some("31.02.2026".into()));
        let out = run_with(&BriefingDateExtractor, "", known);
        assert!(!out.is_found(Field::BriefingDatum));
    }
}

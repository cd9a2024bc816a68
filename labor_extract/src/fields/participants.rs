use labor_core::{Extraction, Field};
use regex::Captures;

use super::FieldExtractor;
use crate::rules::{BuildError, Cascade, Context, RuleDef, group};

const RULES: &[RuleDef<u32>] = &[
    RuleDef {
        id: "maximal",
        pattern: r"(?i)(?:max\.?|maximal)\s*(\d+)\s*(?:Teilnehmer)?",
        handler: count,
    },
    RuleDef {
        id: "teilnehmeranzahl",
        pattern: r"(?i)Teilnehmeranzahl[:\s]+(?:max\.?\s*)?(\d+)",
        handler: count,
    },
    RuleDef {
        id: "n_teilnehmer",
        pattern: r"(?i)(\d+)\s*Teilnehmer",
        handler: count,
    },
];

fn count(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<u32> {
    group(caps, 1)?.parse().ok()
}

/// `teilnehmeranzahl`. A count of zero is not a count.
pub struct ParticipantExtractor {
    cascade: Cascade<u32>,
}

impl ParticipantExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            cascade: Cascade::compile("teilnehmeranzahl", RULES)?,
        })
    }
}

impl FieldExtractor for ParticipantExtractor {
    fn name(&self) -> &'static str {
        "participants"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let value = self.cascade.first_match(text, ctx);
        out.record(Field::Teilnehmeranzahl, value.map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::testing::run;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn extractor() -> ParticipantExtractor {
        ParticipantExtractor::new().expect("participant rules should compile")
    }

    fn count(text: &str) -> Option<f64> {
        run(&extractor(), text).number(Field::Teilnehmeranzahl)
    }

    #[test]
    fn test_count_forms() {
        assert_eq!(count("maximal 12 Teilnehmer"), Some(12.0));
        assert_eq!(count("Teilnehmeranzahl: max. 8"), Some(8.0));
        assert_eq!(count("Es kommen 6 Teilnehmer."), Some(6.0));
    }

    #[test]
    fn test_zero_or_missing_is_not_found() {
        assert_eq!(count("0 Teilnehmer bisher"), None);
        assert_eq!(count("Teilnehmer folgen"), None);
    }

    #[test]
    fn test_overlong_number_is_skipped() {
        assert_eq!(count("99999999999 Teilnehmer"), None);
    }
}

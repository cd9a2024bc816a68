//! Day rate, trainer fee, preparation fee and travel costs.
//!
//! The three fees are independent cascades; a text that names only one of
//! them leaves the other two not found rather than zero.

use labor_core::{Extraction, Field, FieldValue};
use regex::Captures;

use super::FieldExtractor;
use crate::rules::{BuildError, Cascade, Context, RuleDef, group, parse_amount};

const DAY_RATE_RULES: &[RuleDef<f64>] = &[
    RuleDef {
        id: "inkl",
        pattern: r"(?i)(\d+(?:[.,]\d+)?)\s*(?:€|Euro)\s*inkl",
        handler: amount,
    },
    RuleDef {
        id: "tagessatz_label",
        pattern: r"(?i)Tagessatz\s*:?\s*(\d+(?:[.,]\d+)?)",
        handler: amount,
    },
    RuleDef {
        id: "pro_tag",
        pattern: r"(?i)(\d+(?:[.,]\d+)?)\s*(?:€|Euro)?\s*(?:pro\s+Tag|/\s*Tag|Tagessatz)",
        handler: amount,
    },
    RuleDef {
        id: "satz_von",
        pattern: r"(?i)Satz\s+(?:von\s+)?(\d+(?:[.,]\d+)?)\s*(?:€|Euro)",
        handler: amount,
    },
    RuleDef {
        id: "gehen",
        pattern: r"(?i)(\d{3,})\s*(?:€|Euro)\s*gehen",
        handler: amount,
    },
];

const TRAINER_COST_RULES: &[RuleDef<f64>] = &[
    RuleDef {
        id: "kosten_trainer",
        pattern: r"(?i)Kosten\s+Trainer\s+(\d+(?:[.,]\d+)?)",
        handler: amount,
    },
    RuleDef {
        id: "als_trainer_kosten",
        pattern: r"(?i)(\d+(?:[.,]\d+)?)\s*(?:€|Euro)?\s*(?:für\s+\w+\s+)?als\s+Trainer\s*kosten",
        handler: amount,
    },
    RuleDef {
        id: "fuer_trainer",
        pattern: r"(?i)(\d+(?:[.,]\d+)?)\s*(?:€|Euro)?\s*(?:für|an)\s+(?:den\s+)?Trainer",
        handler: amount,
    },
    RuleDef {
        id: "verguetung",
        pattern: r"(?i)Vergütung\s*:?\s*(\d+(?:[.,]\d+)?)",
        handler: amount,
    },
];

const PREPARATION_RULES: &[RuleDef<f64>] = &[
    RuleDef {
        id: "fuer_vorbereitung",
        pattern: r"(?i)(\d+(?:[.,]\d+)?)\s*(?:€|Euro)?\s*(?:für\s+)?Vorbereitung",
        handler: amount,
    },
    RuleDef {
        id: "vorbereitung_label",
        pattern: r"(?i)Vorbereitung(?:spauschale)?[:\s]+(\d+(?:[.,]\d+)?)",
        handler: amount,
    },
    RuleDef {
        id: "plus_vorbereitung",
        pattern: r"(?i)\+\s*(\d+(?:[.,]\d+)?)\s*(?:€|Euro)?\s*(?:für\s+)?Vorbereitung",
        handler: amount,
    },
];

fn amount(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<f64> {
    parse_amount(group(caps, 1)?)
}

/// `tagessatz`, `trainer_kosten` and `vorbereitungspauschale`.
pub struct FeeExtractor {
    day_rate: Cascade<f64>,
    trainer_cost: Cascade<f64>,
    preparation: Cascade<f64>,
}

impl FeeExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            day_rate: Cascade::compile("tagessatz", DAY_RATE_RULES)?,
            trainer_cost: Cascade::compile("trainer_kosten", TRAINER_COST_RULES)?,
            preparation: Cascade::compile("vorbereitungspauschale", PREPARATION_RULES)?,
        })
    }
}

impl FieldExtractor for FeeExtractor {
    fn name(&self) -> &'static str {
        "fees"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        for (field, cascade) in [
            (Field::Tagessatz, &self.day_rate),
            (Field::TrainerKosten, &self.trainer_cost),
            (Field::Vorbereitungspauschale, &self.preparation),
        ] {
            out.record(field, cascade.first_match(text, ctx).map(Into::into));
        }
    }
}

/// Travel costs already covered by the day rate.
pub const TRAVEL_INCLUDED: &str = "inkl. im Tagessatz";

const TRAVEL_RULES: &[RuleDef<FieldValue>] = &[
    RuleDef {
        id: "inklusive",
        pattern: r"(?i)inkl\.?\s*Reisekosten",
        handler: travel_included,
    },
    RuleDef {
        id: "fahrtkosten_hotel",
        pattern: r"(?i)(Fahrtkosten\s*\+?\s*Hotel\s*werden\s*erstattet)",
        handler: travel_phrase,
    },
    RuleDef {
        id: "reisekosten_betrag",
        pattern: r"(?i)Reisekosten[:\s]+(\d+(?:[.,]\d+)?)",
        handler: travel_amount,
    },
    RuleDef {
        id: "fahrtkosten_betrag",
        pattern: r"(?i)Fahrtkosten[:\s]+(\d+(?:[.,]\d+)?)",
        handler: travel_amount,
    },
    RuleDef {
        id: "reisekosten_erstattet",
        pattern: r"(?i)(Reisekosten\s*werden\s*erstattet)",
        handler: travel_phrase,
    },
];

fn travel_included(_caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<FieldValue> {
    Some(TRAVEL_INCLUDED.into())
}

fn travel_phrase(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<FieldValue> {
    group(caps, 1).map(Into::into)
}

fn travel_amount(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<FieldValue> {
    amount(caps, ctx).map(Into::into)
}

/// `reisekosten`: a policy phrase or an amount.
pub struct TravelCostExtractor {
    cascade: Cascade<FieldValue>,
}

impl TravelCostExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            cascade: Cascade::compile("reisekosten", TRAVEL_RULES)?,
        })
    }
}

impl FieldExtractor for TravelCostExtractor {
    fn name(&self) -> &'static str {
        "travel_costs"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        out.record(Field::Reisekosten, self.cascade.first_match(text, ctx));
    }
}

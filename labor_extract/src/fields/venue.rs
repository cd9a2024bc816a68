//! Where the training takes place, and whether it takes place at all in person.

use labor_core::{Extraction, Field};
use regex::Captures;

use super::FieldExtractor;
use crate::rules::{BuildError, Cascade, Context, RuleDef, group};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Venue {
    name: Option<String>,
    address: Option<String>,
}

const VENUE_RULES: &[RuleDef<Venue>] = &[
    RuleDef {
        id: "seminarort_block",
        pattern: r"(?is)Seminarort:?\s*\n(.+?)(?:\n\s*\n|\nAnsprechpartner|\nTeilnehmer|\nTrainer|$)",
        handler: venue_block,
    },
    RuleDef {
        id: "findet_statt",
        pattern: r"(?i)findet\s+in\s+der\s+([^,]+),\s*(\d{4,5})\s+(\w+)\s+statt",
        handler: venue_sentence,
    },
    RuleDef {
        id: "plz_ort",
        pattern: r"(?:^|[^\d.])(\d{4,5})\s+([A-ZÄÖÜ][\wäöüß-]+)",
        handler: postal_code_only,
    },
];

/// First line is the venue, the remaining lines the address.
fn venue_block(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<Venue> {
    let lines: Vec<&str> = group(caps, 1)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let (first, rest) = lines.split_first()?;
    Some(Venue {
        name: Some((*first).to_string()),
        address: (!rest.is_empty()).then(|| rest.join("\n")),
    })
}

fn venue_sentence(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<Venue> {
    let street = group(caps, 1)?;
    let postal_code = group(caps, 2)?;
    let city = group(caps, 3)?;
    Some(Venue {
        name: Some(city.to_string()),
        address: Some(format!("{street}, {postal_code} {city}")),
    })
}

fn postal_code_only(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<Venue> {
    Some(Venue {
        name: None,
        address: Some(format!("{} {}", group(caps, 1)?, group(caps, 2)?)),
    })
}

/// `firma_ort` and `adresse`.
pub struct VenueExtractor {
    cascade: Cascade<Venue>,
}

impl VenueExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            cascade: Cascade::compile("ort", VENUE_RULES)?,
        })
    }
}

impl FieldExtractor for VenueExtractor {
    fn name(&self) -> &'static str {
        "venue"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let venue = self.cascade.first_match(text, ctx);
        let (name, address) = venue.map_or((None, None), |v| (v.name, v.address));
        out.record(Field::FirmaOrt, name.map(Into::into));
        out.record(Field::Adresse, address.map(Into::into));
    }
}

pub const ON_SITE: &str = "Vor Ort";
pub const REMOTE: &str = "Remote";

const FORMAT_RULES: &[RuleDef<&'static str>] = &[
    RuleDef {
        id: "seminarort_block",
        pattern: r"(?i)seminarort:?\s*\n",
        handler: on_site,
    },
    RuleDef {
        id: "remote_keyword",
        pattern: r"(?i)online-seminar|online seminar|virtuell|remote training|remote|webinar|microsoft teams|zoom meeting",
        handler: remote,
    },
    RuleDef {
        id: "on_site_keyword",
        pattern: r"(?i)vor ort|vor-ort|präsenz|findet in|stattfinden",
        handler: on_site,
    },
];

const fn on_site(_caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<&'static str> {
    Some(ON_SITE)
}

const fn remote(_caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<&'static str> {
    Some(REMOTE)
}

/// `format`: `Vor Ort` or `Remote`.
///
/// A labeled venue block wins over any keyword. Without keywords, a resolved
/// venue or address implies an on-site training.
pub struct FormatExtractor {
    cascade: Cascade<&'static str>,
}

impl FormatExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            cascade: Cascade::compile("format", FORMAT_RULES)?,
        })
    }
}

impl FieldExtractor for FormatExtractor {
    fn name(&self) -> &'static str {
        "format"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let format = self.cascade.first_match(text, ctx).or_else(|| {
            (out.is_found(Field::Adresse) || out.is_found(Field::FirmaOrt)).then_some(ON_SITE)
        });
        out.record(Field::Format, format.map(Into::into));
    }
}

//! Training dates and daily hours.

use labor_core::{Extraction, Field};
use regex::Captures;

use super::FieldExtractor;
use crate::dates::Calendar;
use crate::rules::{BuildError, Cascade, Context, RuleDef, group};

type DateRange = (String, String);

const DATE_RULES: &[RuleDef<DateRange>] = &[
    RuleDef {
        id: "vom_bis",
        pattern: r"(?i)vom\s+(\d{1,2}\.\d{1,2}\.?)(?:\d{0,4})?\s*(?:bis\s+(?:zum\s+)?)?(\d{1,2}\.\d{1,2}\.\d{2,4})",
        handler: range_with_end_year,
    },
    RuleDef {
        id: "range",
        pattern: r"(?i)(\d{1,2}\.\d{1,2}\.?)\s*(?:bis|–|-)\s*(\d{1,2}\.\d{1,2}\.\d{2,4})",
        handler: range_with_end_year,
    },
    RuleDef {
        id: "am_und",
        pattern: r"(?i)am\s+(\d{1,2}\.\d{1,2}\.\d{2,4})\s+und\s+(\d{1,2}\.\d{1,2}\.\d{2,4})",
        handler: two_dates,
    },
    RuleDef {
        id: "am_tage_und",
        pattern: r"(?i)am\s+(\d{1,2})\.(\d{1,2})\.\d{0,2}\s+und\s+(\d{1,2})\.(\d{1,2})\.(\d{2,4})",
        handler: two_days_shared_year,
    },
    RuleDef {
        id: "tage_monat",
        pattern: r"(?i)(\d{1,2})\.\s*und\s+(\d{1,2})\.\s*(Januar|Februar|März|Maerz|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember)\s*(\d{2,4})?",
        handler: two_days_of_month,
    },
    RuleDef {
        id: "am_einzel",
        pattern: r"(?i)am\s+(\d{1,2}\.\d{1,2}\.\d{2,4})",
        handler: single_date,
    },
    RuleDef {
        id: "einzel",
        pattern: r"(\d{1,2}\.\d{1,2}\.\d{4})",
        handler: single_date,
    },
    RuleDef {
        id: "einzel_kurz",
        pattern: r"(\d{1,2}\.\d{1,2}\.\d{2})(?:[^\d]|$)",
        handler: single_date,
    },
];

/// `D.M.` to `D.M.YYYY`; the start takes the end's year unless it has its own.
fn range_with_end_year(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<DateRange> {
    let end = group(caps, 2)?;
    let year = Calendar::year_suffix(end)?;
    let start = ctx
        .calendar
        .normalize_date_with_year(group(caps, 1)?, &year)?;
    let end = ctx.calendar.normalize_date_with_year(end, &year)?;
    Some((start, end))
}

fn two_dates(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<DateRange> {
    let start = ctx.calendar.normalize_date(group(caps, 1)?)?;
    let end = ctx.calendar.normalize_date(group(caps, 2)?)?;
    Some((start, end))
}

fn two_days_shared_year(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<DateRange> {
    let number = |i| group(caps, i).and_then(|s| s.parse::<u32>().ok());
    let year = group(caps, 5);
    let start = ctx.calendar.resolve_unclamped(number(1)?, number(2)?, year)?;
    let end = ctx.calendar.resolve_unclamped(number(3)?, number(4)?, year)?;
    Some((start, end))
}

fn two_days_of_month(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<DateRange> {
    let number = |i| group(caps, i).and_then(|s| s.parse::<u32>().ok());
    let month = Calendar::month_number(group(caps, 3)?);
    let year = group(caps, 4);
    let start = ctx.calendar.resolve_unclamped(number(1)?, month, year)?;
    let end = ctx.calendar.resolve_unclamped(number(2)?, month, year)?;
    Some((start, end))
}

fn single_date(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<DateRange> {
    let date = ctx.calendar.normalize_date(group(caps, 1)?)?;
    Some((date.clone(), date))
}

/// `datum_start` and `datum_ende`. A single date fills both.
pub struct DateExtractor {
    cascade: Cascade<DateRange>,
}

impl DateExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            cascade: Cascade::compile("datum", DATE_RULES)?,
        })
    }
}

impl FieldExtractor for DateExtractor {
    fn name(&self) -> &'static str {
        "dates"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let (start, end) = self.cascade.first_match(text, ctx).unzip();
        out.record(Field::DatumStart, start.map(Into::into));
        out.record(Field::DatumEnde, end.map(Into::into));
    }
}

const TIME_RULES: &[RuleDef<String>] = &[
    RuleDef {
        id: "colon",
        pattern: r"(\d{1,2}:\d{2})\s*(?:–|-|bis)\s*(\d{1,2}:\d{2})\s*Uhr",
        handler: time_range,
    },
    RuleDef {
        id: "colon_uhr_uhr",
        pattern: r"(\d{1,2}:\d{2})\s*Uhr\s*(?:–|-|bis)\s*(\d{1,2}:\d{2})\s*Uhr",
        handler: time_range,
    },
    RuleDef {
        id: "dot",
        pattern: r"(\d{1,2}\.\d{2})\s*(?:–|-|bis)\s*(\d{1,2}\.\d{2})\s*Uhr",
        handler: time_range,
    },
    RuleDef {
        id: "hours",
        pattern: r"(\d{1,2})\s*(?:–|-|bis)\s*(\d{1,2})\s*Uhr",
        handler: time_range,
    },
];

fn clock(raw: &str) -> String {
    let clock = raw.replace('.', ":");
    if clock.contains(':') {
        clock
    } else {
        format!("{clock}:00")
    }
}

fn time_range(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<String> {
    let start = clock(group(caps, 1)?);
    let end = clock(group(caps, 2)?);
    Some(format!("{start} – {end} Uhr"))
}

/// `uhrzeit`, always rendered as `H:MM – H:MM Uhr`.
pub struct TimeExtractor {
    cascade: Cascade<String>,
}

impl TimeExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            cascade: Cascade::compile("uhrzeit", TIME_RULES)?,
        })
    }
}

impl FieldExtractor for TimeExtractor {
    fn name(&self) -> &'static str {
        "time"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let value = self.cascade.first_match(text, ctx);
        out.record(Field::Uhrzeit, value.map(Into::into));
    }
}

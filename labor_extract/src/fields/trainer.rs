//! The trainer and, for trainers we do not know yet, their address.

use labor_core::{Extraction, Field};
use regex::Captures;

use super::FieldExtractor;
use crate::rules::{BuildError, Cascade, Context, RuleDef, group};

/// Capitalized words that the name patterns pick up but are never names.
const STOPWORDS: [&str; 10] = [
    "der", "die", "das", "für", "und", "kosten", "euro", "trainer", "herr", "frau",
];

const SALUTATIONS: [&str; 2] = ["herr", "frau"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct TrainerMatch {
    name: String,
    known: bool,
}

// Most specific first: "für Lukas als Trainer" before "Trainer: ...".
const RULES: &[RuleDef<TrainerMatch>] = &[
    RuleDef {
        id: "fuer_als_trainer",
        pattern: r"(?i:für|mit)\s+([A-ZÄÖÜ][a-zäöüß]+)\s+(?i:als\s+Trainer)",
        handler: trainer,
    },
    RuleDef {
        id: "als_trainer_kosten",
        pattern: r"([A-ZÄÖÜ][a-zäöüß]+)\s+(?i:als\s+Trainer\s+kosten)",
        handler: trainer,
    },
    RuleDef {
        id: "label",
        pattern: r"(?i:Trainer)[:\s]+([A-ZÄÖÜ][a-zäöüß]+(?:[ \t]+[A-ZÄÖÜ][a-zäöüß]+)?)",
        handler: trainer,
    },
    RuleDef {
        id: "gesprochen",
        pattern: r"(?i:mit)\s+([A-ZÄÖÜ][a-zäöüß]+)\s+(?i:gesprochen)",
        handler: trainer,
    },
    RuleDef {
        id: "beauftragung",
        pattern: r"(?i:Beauftragung)\s+(?:(?i:an)\s+)?(?:(?i:Trainer)\s+)?([A-ZÄÖÜ][a-zäöüß]+)",
        handler: trainer,
    },
];

/// The name without a leading `Herr`/`Frau`.
fn without_salutation(name: &str) -> &str {
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) if SALUTATIONS.contains(&first.to_lowercase().as_str()) => {
            rest.trim_start()
        }
        _ => name,
    }
}

/// Canonical registry name when known, the captured name otherwise.
///
/// `Herr Schmidt` is a name; a bare salutation or a stopword is not.
fn trainer(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<TrainerMatch> {
    let name = group(caps, 1)?;
    let person = without_salutation(name);
    if person
        .split_whitespace()
        .any(|word| STOPWORDS.contains(&word.to_lowercase().as_str()))
    {
        return None;
    }
    Some(ctx.registry.find_trainer(person).map_or_else(
        || TrainerMatch {
            name: name.to_string(),
            known: false,
        },
        |known| TrainerMatch {
            name: known.name.clone(),
            known: true,
        },
    ))
}

/// `trainer` and `trainer_bekannt`.
pub struct TrainerExtractor {
    cascade: Cascade<TrainerMatch>,
}

impl TrainerExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            cascade: Cascade::compile("trainer", RULES)?,
        })
    }
}

impl FieldExtractor for TrainerExtractor {
    fn name(&self) -> &'static str {
        "trainer"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let found = self.cascade.first_match(text, ctx);
        let (name, known) = found.map(|m| (m.name, m.known)).unzip();
        out.record(Field::Trainer, name.map(Into::into));
        out.record(Field::TrainerBekannt, known.map(Into::into));
    }
}

const ADDRESS_RULES: &[RuleDef<String>] = &[RuleDef {
    id: "trainer_adresse",
    pattern: r"(?is)Trainer:?\s*\w+\s+\w+\s*\n\s*Adresse:?\s*(.+?\d{4,5}\s+\w+)",
    handler: address,
}];

fn address(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<String> {
    let lines: Vec<&str> = group(caps, 1)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    Some(lines.join(", "))
}

/// `trainer_adresse`: an `Adresse:` line directly under `Trainer: Vorname Nachname`.
pub struct TrainerAddressExtractor {
    cascade: Cascade<String>,
}

impl TrainerAddressExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            cascade: Cascade::compile("trainer_adresse", ADDRESS_RULES)?,
        })
    }
}

impl FieldExtractor for TrainerAddressExtractor {
    fn name(&self) -> &'static str {
        "trainer_address"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let value = self.cascade.first_match(text, ctx);
        out.record(Field::TrainerAdresse, value.map(Into::into));
    }
}

//! Who wrote, who is the contact on the customer side, and how to reach them.

use labor_core::{Extraction, Field};
use regex::{Captures, Regex};

use super::FieldExtractor;
use crate::rules::{BuildError, Cascade, Context, RuleDef, compile_regex, group};

const EMAIL: &str = r"[\w.-]+@[\w.-]+\.\w+";
const LABELED_EMAIL: &str = r"(?i)E-?Mail:?\s*([\w.-]+@[\w.-]+\.\w+)";

const CONTACT_BLOCK_RULES: &[RuleDef<String>] = &[RuleDef {
    id: "ansprechpartner_block",
    pattern: r"(?is)Ansprechpartner:?\s*\n(.*?)(?:\n\s*\n|\nDie\s+GFU|\nSeminar|\nTeilnehmer|\nBitte|$)",
    handler: block_text,
}];

fn block_text(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<String> {
    group(caps, 1).map(str::to_string)
}

// Lines after the label are scanned greedily, so the last salutation wins.
const CONTACT_NAME_RULES: &[RuleDef<String>] = &[
    RuleDef {
        id: "team_signature",
        pattern: r"([A-ZÄÖÜ][a-zäöüß]+[ \t]+[A-ZÄÖÜ][a-zäöüß]+)\s*\|\s*(?i:Team)",
        handler: external_name,
    },
    RuleDef {
        id: "block_full_name",
        pattern: r"(?i:Ansprechpartner):?\s*\n(?:.*\n)*[ \t]*((?:Herr|Frau)[ \t]+[A-ZÄÖÜ][a-zäöüß]+[ \t]+[A-ZÄÖÜ][a-zäöüß]+)",
        handler: external_name,
    },
    RuleDef {
        id: "inline_full_name",
        pattern: r"(?i:Ansprechpartner):?[ \t]*((?:Herr|Frau)[ \t]+[A-ZÄÖÜ][a-zäöüß]+[ \t]+[A-ZÄÖÜ][a-zäöüß]+)",
        handler: external_name,
    },
    RuleDef {
        id: "block_surname",
        pattern: r"(?i:Ansprechpartner):?\s*\n(?:.*\n)*[ \t]*((?:Herr|Frau)[ \t]+[A-ZÄÖÜ][a-zäöüß]+)",
        handler: external_name,
    },
    RuleDef {
        id: "inline_surname",
        pattern: r"(?i:Ansprechpartner):?[ \t]*((?:Herr|Frau)[ \t]+[A-ZÄÖÜ][a-zäöüß]+)",
        handler: external_name,
    },
];

/// Rejects names of our own staff, including surname-only mentions.
fn external_name(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<String> {
    let name = group(caps, 1)?;
    let bare = name
        .trim_start_matches("Herr")
        .trim_start_matches("Frau")
        .trim()
        .to_lowercase();
    let internal = ctx.registry.is_internal_name(name)
        || ctx
            .registry
            .internal_people
            .iter()
            .any(|person| person.name.to_lowercase().contains(&bare));
    (!internal).then(|| name.to_string())
}

const PHONE_RULES: &[RuleDef<String>] = &[
    RuleDef {
        id: "telefon_label",
        pattern: r"Telefon:?\s*([\d \t/+-]+)",
        handler: phone,
    },
    RuleDef {
        id: "tel_label",
        pattern: r"Tel\.?:?\s*([\d \t/+-]+)",
        handler: phone,
    },
    RuleDef {
        id: "international",
        pattern: r"(\+\d{2}\s*\d{2,3}\s*\d{3,4}\s*\d{2,4}\s*\d{0,4})",
        handler: phone,
    },
    RuleDef {
        id: "mobile",
        pattern: r"(01\d{2,3}\s+\d{3,4}\s+\d{3,4})",
        handler: phone,
    },
    RuleDef {
        id: "generic",
        pattern: r"(\+?\d{2,4}[\s-]?\d{3,}[\s-]?\d{3,})",
        handler: phone,
    },
];

fn phone(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<String> {
    let number = group(caps, 1)?
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (number.chars().count() >= ctx.settings.min_phone_len).then_some(number)
}

/// `absender_intern`, `absender_email`, `email_extern`,
/// `ansprechpartner_extern` and `telefon`.
pub struct ContactExtractor {
    email: Regex,
    labeled_email: Regex,
    contact_block: Cascade<String>,
    contact_name: Cascade<String>,
    phone: Cascade<String>,
}

impl ContactExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            email: compile_regex("email", EMAIL)?,
            labeled_email: compile_regex("labeled_email", LABELED_EMAIL)?,
            contact_block: Cascade::compile("ansprechpartner_block", CONTACT_BLOCK_RULES)?,
            contact_name: Cascade::compile("ansprechpartner_extern", CONTACT_NAME_RULES)?,
            phone: Cascade::compile("telefon", PHONE_RULES)?,
        })
    }

    /// Email of the `Ansprechpartner:` block, preferring an `E-Mail:` label.
    fn contact_block_email(&self, text: &str, ctx: &Context<'_>) -> Option<String> {
        let block = self.contact_block.first_match(text, ctx)?;
        let labeled = self
            .labeled_email
            .captures(&block)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        labeled.or_else(|| self.email.find(&block).map(|m| m.as_str().to_string()))
    }
}

impl FieldExtractor for ContactExtractor {
    fn name(&self) -> &'static str {
        "contacts"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let registry = ctx.registry;
        let (internal, external): (Vec<&str>, Vec<&str>) = self
            .email
            .find_iter(text)
            .map(|m| m.as_str())
            .partition(|email| registry.is_internal_email(email));

        let sender = internal.iter().find_map(|email| {
            registry
                .internal_person_by_email(email)
                .map(|person| (person.display_name(), (*email).to_string()))
        });
        let (sender_name, sender_email) = sender.unzip();
        out.record(Field::AbsenderIntern, sender_name.map(Into::into));
        out.record(Field::AbsenderEmail, sender_email.map(Into::into));

        let external_email = self
            .contact_block_email(text, ctx)
            .filter(|email| !registry.is_internal_email(email))
            .or_else(|| {
                external
                    .iter()
                    .find(|email| !registry.is_agency_email(email))
                    .or_else(|| external.first())
                    .map(|email| (*email).to_string())
            });
        out.record(Field::EmailExtern, external_email.map(Into::into));

        let contact = self.contact_name.first_match(text, ctx);
        out.record(Field::AnsprechpartnerExtern, contact.map(Into::into));

        let phone = self.phone.first_match(text, ctx);
        out.record(Field::Telefon, phone.map(Into::into));
    }
}

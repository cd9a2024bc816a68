//! Who commissions the training and who receives it.

use labor_core::{Extraction, Field};
use regex::Captures;

use super::FieldExtractor;
use crate::rules::{BuildError, Cascade, Context, RuleDef, group};

const SENDER_RULES: &[RuleDef<Option<String>>] = &[RuleDef {
    id: "von_header",
    pattern: r"Von:\s*[^<]*<([^>]+)>",
    handler: sender_domain,
}];

/// First domain label of an external sender, uppercased. An internal sender
/// settles the field as not found.
fn sender_domain(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<Option<String>> {
    let email = group(caps, 1)?;
    if ctx.registry.is_internal_email(email) {
        return Some(None);
    }
    let label = email
        .rsplit('@')
        .next()
        .and_then(|domain| domain.split('.').next())
        .filter(|label| !label.is_empty())?;
    Some(Some(label.to_uppercase()))
}

const CLIENT_RULES: &[RuleDef<String>] = &[RuleDef {
    id: "kunde_label",
    pattern: r"(?im)^[ \t]*(?:Kunde|Firma)[ \t]*:[ \t]*(.+)$",
    handler: client_label,
}];

fn client_label(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<String> {
    let name = group(caps, 1)?;
    if name.is_empty() || ctx.registry.is_internal_company(name) {
        return None;
    }
    Some(name.to_string())
}

/// `auftraggeber` and `kunde`.
///
/// The commissioning agency comes from the registry, or from the `Von:`
/// header of a forwarded mail. The client is an explicit `Kunde:` line, or
/// else the venue.
pub struct PartyExtractor {
    sender: Cascade<Option<String>>,
    client: Cascade<String>,
}

impl PartyExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            sender: Cascade::compile("auftraggeber", SENDER_RULES)?,
            client: Cascade::compile("kunde", CLIENT_RULES)?,
        })
    }
}

impl FieldExtractor for PartyExtractor {
    fn name(&self) -> &'static str {
        "parties"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let agency = ctx
            .registry
            .find_agency_in_text(text)
            .map(|agency| agency.name.clone())
            .or_else(|| self.sender.first_match(text, ctx).flatten());
        out.record(Field::Auftraggeber, agency.map(Into::into));

        let client = self
            .client
            .first_match(text, ctx)
            .or_else(|| out.text(Field::FirmaOrt).map(str::to_string));
        out.record(Field::Kunde, client.map(Into::into));
    }
}

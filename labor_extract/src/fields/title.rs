use labor_core::{Extraction, Field};
use regex::Captures;

use super::FieldExtractor;
use crate::rules::{BuildError, Cascade, Context, RuleDef, group};

const REPLY_PREFIXES: [&str; 3] = ["re", "aw", "fwd"];

const RULES: &[RuleDef<String>] = &[
    RuleDef {
        id: "quoted",
        pattern: r#"[„“”"]([^„“”"]+)[„“”"]"#,
        handler: title,
    },
    RuleDef {
        id: "keyword_quoted",
        pattern: r#"(?:Seminar|Schulung|Kurs|Workshop|Thema)\s+"([^"]+)""#,
        handler: title,
    },
    RuleDef {
        id: "subject",
        pattern: r"Betreff:.*?:\s*(.+)",
        handler: title,
    },
];

fn title(caps: &Captures<'_>, ctx: &Context<'_>) -> Option<String> {
    let name = group(caps, 1)?;
    if name.chars().count() < ctx.settings.min_title_len {
        return None;
    }
    if REPLY_PREFIXES.contains(&name.to_lowercase().as_str()) {
        return None;
    }
    Some(name.to_string())
}

/// `schulungsname`: quoted titles, then the subject line.
pub struct TitleExtractor {
    cascade: Cascade<String>,
}

impl TitleExtractor {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            cascade: Cascade::compile("schulungsname", RULES)?,
        })
    }
}

impl FieldExtractor for TitleExtractor {
    fn name(&self) -> &'static str {
        "title"
    }

    fn extract(&self, text: &str, ctx: &Context<'_>, out: &mut Extraction) {
        let value = self.cascade.first_match(text, ctx);
        out.record(Field::Schulungsname, value.map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::testing::run;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn extractor() -> TitleExtractor {
        TitleExtractor::new().expect("title rules should compile")
    }

    #[test]
    fn test_typographic_quotes() {
        let out = run(&extractor(), "Anfrage für das Seminar „Excel für Controller“ im Februar");
        assert_eq!(out.text(Field::Schulungsname), Some("Excel für Controller"));
    }

    #[test]
    fn test_subject_line() {
        let out = run(&extractor(), "Betreff: AW: Power BI Grundlagen\nHallo zusammen");
        assert_eq!(out.text(Field::Schulungsname), Some("Power BI Grundlagen"));
    }

    #[test]
    fn test_short_quote_falls_through_to_subject() {
        let out = run(&extractor(), "Betreff: Anfrage: Python Aufbaukurs\nein \"ok\" von uns");
        assert_eq!(out.text(Field::Schulungsname), Some("Python Aufbaukurs"));
    }

    #[test]
    fn test_missing_title_is_not_found() {
        let out = run(&extractor(), "Hallo, anbei die Unterlagen.");
        assert_eq!(out.not_found(), &[Field::Schulungsname]);
    }
}

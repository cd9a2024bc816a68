//! Declarative rule cascades.
//!
//! Every field extractor is an ordered list of [`RuleDef`]s: a regex plus a
//! handler that turns the captures into a value or rejects them. Rules are
//! tried in order against the first occurrence of their pattern; the first
//! rule whose handler accepts wins. A rejected capture moves on to the next
//! rule, never to a later occurrence of the same pattern.

use labor_core::{ExtractionSettings, Registry};
use regex::{Captures, Regex};
use thiserror::Error;
use tracing::{debug, trace};

use crate::dates::Calendar;

/// Error type for rule compilation.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A rule pattern does not compile.
    #[error("invalid pattern in rule '{rule}': {source}")]
    Regex {
        rule: &'static str,
        source: regex::Error,
    },
}

/// Read-only state handed to rule handlers.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub registry: &'a Registry,
    pub settings: &'a ExtractionSettings,
    pub calendar: &'a Calendar,
}

/// Converts a match into a value, or rejects it with `None`.
pub type Handler<T> = fn(&Captures<'_>, &Context<'_>) -> Option<T>;

/// Source form of a rule.
pub struct RuleDef<T> {
    /// Stable identifier, used in logs and tests.
    pub id: &'static str,
    pub pattern: &'static str,
    pub handler: Handler<T>,
}

struct Rule<T> {
    id: &'static str,
    regex: Regex,
    handler: Handler<T>,
}

/// A compiled, ordered list of rules for one field.
pub struct Cascade<T> {
    name: &'static str,
    rules: Vec<Rule<T>>,
}

impl<T> Cascade<T> {
    /// Compile `defs` in order.
    ///
    /// # Errors
    /// Returns an error if any pattern is not a valid regex.
    pub fn compile(name: &'static str, defs: &[RuleDef<T>]) -> Result<Self, BuildError> {
        let rules = defs
            .iter()
            .map(|def| {
                compile_regex(def.id, def.pattern).map(|regex| Rule {
                    id: def.id,
                    regex,
                    handler: def.handler,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, rules })
    }

    /// The winning rule and its value.
    #[must_use]
    pub fn matching_rule(&self, text: &str, ctx: &Context<'_>) -> Option<(&'static str, T)> {
        for rule in &self.rules {
            let Some(caps) = rule.regex.captures(text) else {
                continue;
            };
            if let Some(value) = (rule.handler)(&caps, ctx) {
                debug!(cascade = self.name, rule = rule.id, "rule matched");
                return Some((rule.id, value));
            }
            trace!(cascade = self.name, rule = rule.id, "capture rejected");
        }
        None
    }

    /// Value of the first accepting rule.
    #[must_use]
    pub fn first_match(&self, text: &str, ctx: &Context<'_>) -> Option<T> {
        self.matching_rule(text, ctx).map(|(_, value)| value)
    }

    /// Rule identifiers in precedence order.
    pub fn rule_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.id)
    }
}

/// Compile a standalone pattern used next to a cascade.
///
/// # Errors
/// Returns an error if `pattern` is not a valid regex.
pub fn compile_regex(rule: &'static str, pattern: &str) -> Result<Regex, BuildError> {
    Regex::new(pattern).map_err(|source| BuildError::Regex { rule, source })
}

/// Trimmed text of capture group `i`.
#[must_use]
pub fn group<'t>(caps: &Captures<'t>, i: usize) -> Option<&'t str> {
    caps.get(i).map(|m| m.as_str().trim())
}

/// Amount with a German decimal comma, e.g. `550` or `1,5`.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn accept(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<String> {
        group(caps, 1).map(str::to_string)
    }

    fn reject_short(caps: &Captures<'_>, _ctx: &Context<'_>) -> Option<String> {
        group(caps, 1).filter(|s| s.len() > 3).map(str::to_string)
    }

    const DEFS: &[RuleDef<String>] = &[
        RuleDef {
            id: "specific",
            pattern: r"name=(\w+)",
            handler: reject_short,
        },
        RuleDef {
            id: "generic",
            pattern: r"(\w+)$",
            handler: accept,
        },
    ];

    fn with_context<R>(f: impl FnOnce(&Context<'_>) -> R) -> R {
        let registry = Registry::default();
        let settings = ExtractionSettings::default();
        let calendar = Calendar::new(NaiveDate::MIN, &settings);
        f(&Context {
            registry: &registry,
            settings: &settings,
            calendar: &calendar,
        })
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_first_accepting_rule_wins() {
        let cascade = Cascade::compile("test", DEFS).expect("rules should compile");
        with_context(|ctx| {
            assert_eq!(
                cascade.matching_rule("name=Lukas end", ctx),
                Some(("specific", "Lukas".to_string()))
            );
            // rejected capture falls through to the next rule
            assert_eq!(
                cascade.matching_rule("name=Al end", ctx),
                Some(("generic", "end".to_string()))
            );
            assert_eq!(cascade.first_match("", ctx), None);
        });
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_rule_order_is_preserved() {
        let cascade = Cascade::compile("test", DEFS).expect("rules should compile");
        assert_eq!(cascade.rule_ids().collect::<Vec<_>>(), vec!["specific", "generic"]);
    }

    #[test]
    fn test_invalid_pattern_names_the_rule() {
        let defs: &[RuleDef<String>] = &[RuleDef {
            id: "broken",
            pattern: r"(unclosed",
            handler: accept,
        }];
        let err = Cascade::compile("test", defs).err();
        assert!(matches!(err, Some(BuildError::Regex { rule: "broken", .. })));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("550"), Some(550.0));
        assert_eq!(parse_amount("1,5"), Some(1.5));
        assert_eq!(parse_amount("x"), None);
    }
}

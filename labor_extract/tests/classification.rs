//! Every field is classified exactly once, whatever the input.

use std::sync::LazyLock;

use chrono::NaiveDate;
use labor_config::Config;
use labor_core::Field;
use labor_extract::ExtractionEngine;
use proptest::prelude::*;

const CONFIG: &str = r#"{
    "firma": {"namen": ["AI-Z Group"], "domains": ["ai-z.de"]},
    "interne_personen": [{"name": "Mara Keller", "rolle": "Vertrieb", "emails": ["mara@ai-z.de"]}],
    "bekannte_trainer": [{"name": "Lukas Sontheimer", "kurznamen": ["Lukas"]}],
    "bekannte_auftraggeber": [{"name": "GFU Cyrus AG", "kurznamen": ["GFU"], "domains": ["gfu.net"]}]
}"#;

/// Snippets that trigger the rules, so generated mails hit real code paths.
const FRAGMENTS: &[&str] = &[
    "Seminarort:",
    "Ansprechpartner:",
    "Trainer: Lukas",
    "Trainer: Der",
    "für Lukas als Trainer",
    "vom 21.1. bis zum 23.01.2026",
    "am 12.2. und 13.2.26",
    "4. und 5. März",
    "31.02.2019",
    "99.99.99",
    "09.00-17.00 Uhr",
    "9 bis 16 Uhr",
    "maximal 0 Teilnehmer",
    "Teilnehmeranzahl: 99999999999",
    "550 € für Lukas als Trainer kosten",
    "Tagessatz: 0",
    "Reisekosten: 80",
    "inkl. Reisekosten",
    "Von: X <mara@ai-z.de>",
    "Von: Y <info@kunde.de>",
    "Kunde: AI-Z Group",
    "Frau Keller",
    "Telefon: 1",
    "remote",
    "84048 Mainburg",
    "mara@ai-z.de",
    "„Excel“",
    "\n",
    "\n\n",
];

static ENGINE: LazyLock<ExtractionEngine> = LazyLock::new(|| {
    let config = Config::from_json(CONFIG).expect("test config should parse");
    let today = NaiveDate::from_ymd_opt(2026, 1, 10).expect("test date should be valid");
    ExtractionEngine::new(config.registry, config.extraction, today).expect("engine should build")
});

fn assert_classified_once(text: &str) {
    let out = ENGINE.extract(text);
    for field in Field::ALL {
        let found = out.is_found(field);
        let missing = out.not_found().iter().filter(|f| **f == field).count();
        assert!(
            (found && missing == 0) || (!found && missing == 1),
            "{field} classified wrongly for {text:?}"
        );
    }
    assert_eq!(out.found().count() + out.not_found().len(), Field::ALL.len());
}

#[test]
fn test_empty_input() {
    assert_classified_once("");
}

proptest! {
    #[test]
    fn prop_arbitrary_text_is_fully_classified(text in any::<String>()) {
        assert_classified_once(&text);
    }

    #[test]
    fn prop_rule_fragments_are_fully_classified(
        parts in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..16),
        separator in prop_oneof![Just(" "), Just("\n"), Just(", ")],
    ) {
        assert_classified_once(&parts.join(separator));
    }
}

//! End-to-end extraction over realistic booking mails.

use chrono::NaiveDate;
use labor_config::Config;
use labor_core::{ExtractionSettings, Field, FieldValue};
use labor_extract::ExtractionEngine;

const CONFIG: &str = r#"{
    "firma": {"namen": ["AI-Z Group"], "domains": ["ai-z.de"]},
    "interne_personen": [
        {"name": "Mara Keller", "rolle": "Vertrieb", "emails": ["mara.keller@gmail.com"]}
    ],
    "bekannte_trainer": [
        {"name": "Lukas Sontheimer", "kurznamen": ["Lukas"], "strasse": "Isarweg 3", "plz": "80331", "ort": "München"},
        "Svend Hansen"
    ],
    "bekannte_auftraggeber": [
        {"name": "GFU Cyrus AG", "kurznamen": ["GFU"], "domains": ["gfu.net"]}
    ]
}"#;

const AGENCY_MAIL: &str = "Von: Kursbüro GFU <kurs@gfu.net>
An: Mara Keller <mara.keller@gmail.com>
Betreff: Anfrage: Power BI für Controller

Hallo Frau Keller,

wir haben eine Anfrage für das Seminar „Power BI für Controller“ vom 21.1. bis zum 23.01.2026, jeweils 09:00 – 17:00 Uhr, maximal 8 Teilnehmer.

Seminarort:
HAIX Schuhe Produktions GmbH
Auhofstraße 10
84048 Mainburg

Ansprechpartner:
Herr Jonas Brandt
E-Mail: j.brandt@haix.de
Telefon: 08751 86250

Wir können 1200 € inkl. Reisekosten pro Tag gehen, 550 € für Lukas als Trainer kosten, 150 € Vorbereitung.

Viele Grüße
Lisa Wagner
";

const DIRECT_MAIL: &str = "Von: Anna Berg <anna.berg@seminarwerk.de>
Betreff: AW: Rückfrage

Hallo zusammen,

die Schulung \"Python Grundlagen\" findet am 4. und 5. März statt, 9-16 Uhr, als Online-Seminar über Microsoft Teams.
Teilnehmeranzahl: 12
Trainer: Henrik Olsen
Adresse: Lindenweg 4
20095 Hamburg
Tagessatz: 980 €
Vergütung: 600 €
Reisekosten werden erstattet.

Telefon: 040 1234567
";

fn engine() -> ExtractionEngine {
    let config = Config::from_json(CONFIG).expect("test config should parse");
    let today = NaiveDate::from_ymd_opt(2026, 1, 10).expect("test date should be valid");
    ExtractionEngine::new(config.registry, config.extraction, today).expect("engine should build")
}

#[test]
fn test_agency_mail() {
    let out = engine().extract(AGENCY_MAIL);

    assert_eq!(out.text(Field::Schulungsname), Some("Power BI für Controller"));
    assert_eq!(out.text(Field::DatumStart), Some("21.01.2026"));
    assert_eq!(out.text(Field::DatumEnde), Some("23.01.2026"));
    assert_eq!(out.text(Field::Uhrzeit), Some("09:00 – 17:00 Uhr"));
    assert_eq!(out.text(Field::FirmaOrt), Some("HAIX Schuhe Produktions GmbH"));
    assert_eq!(out.text(Field::Adresse), Some("Auhofstraße 10\n84048 Mainburg"));
    assert_eq!(out.text(Field::Format), Some("Vor Ort"));
    assert_eq!(out.text(Field::AbsenderIntern), Some("Mara Keller (Vertrieb)"));
    assert_eq!(out.text(Field::AbsenderEmail), Some("mara.keller@gmail.com"));
    assert_eq!(out.text(Field::EmailExtern), Some("j.brandt@haix.de"));
    assert_eq!(out.text(Field::AnsprechpartnerExtern), Some("Herr Jonas Brandt"));
    assert_eq!(out.text(Field::Telefon), Some("08751 86250"));
    assert_eq!(out.get(Field::Teilnehmeranzahl), Some(&FieldValue::Count(8)));
    assert_eq!(out.text(Field::Trainer), Some("Lukas Sontheimer"));
    assert_eq!(out.flag(Field::TrainerBekannt), Some(true));
    assert_eq!(out.number(Field::Tagessatz), Some(1200.0));
    assert_eq!(out.number(Field::TrainerKosten), Some(550.0));
    assert_eq!(out.number(Field::Vorbereitungspauschale), Some(150.0));
    assert_eq!(out.text(Field::Reisekosten), Some("inkl. im Tagessatz"));
    assert_eq!(out.text(Field::Auftraggeber), Some("GFU Cyrus AG"));
    assert_eq!(out.text(Field::Kunde), Some("HAIX Schuhe Produktions GmbH"));
    assert_eq!(out.text(Field::BriefingDatum), Some("18.01.2026"));
    assert_eq!(out.not_found(), &[Field::TrainerAdresse]);
}

#[test]
fn test_direct_remote_mail() {
    let out = engine().extract(DIRECT_MAIL);

    assert_eq!(out.text(Field::Schulungsname), Some("Python Grundlagen"));
    assert_eq!(out.text(Field::DatumStart), Some("04.03.2026"));
    assert_eq!(out.text(Field::DatumEnde), Some("05.03.2026"));
    assert_eq!(out.text(Field::Uhrzeit), Some("9:00 – 16:00 Uhr"));
    assert_eq!(out.text(Field::Format), Some("Remote"));
    assert_eq!(out.text(Field::EmailExtern), Some("anna.berg@seminarwerk.de"));
    assert_eq!(out.text(Field::Telefon), Some("040 1234567"));
    assert_eq!(out.get(Field::Teilnehmeranzahl), Some(&FieldValue::Count(12)));
    assert_eq!(out.text(Field::Trainer), Some("Henrik Olsen"));
    assert_eq!(out.flag(Field::TrainerBekannt), Some(false));
    assert_eq!(out.text(Field::TrainerAdresse), Some("Lindenweg 4, 20095 Hamburg"));
    assert_eq!(out.number(Field::Tagessatz), Some(980.0));
    assert_eq!(out.number(Field::TrainerKosten), Some(600.0));
    assert_eq!(out.text(Field::Reisekosten), Some("Reisekosten werden erstattet"));
    assert_eq!(out.text(Field::Auftraggeber), Some("SEMINARWERK"));
    assert_eq!(out.text(Field::BriefingDatum), Some("01.03.2026"));

    for field in [
        Field::FirmaOrt,
        Field::AbsenderIntern,
        Field::AbsenderEmail,
        Field::AnsprechpartnerExtern,
        Field::Vorbereitungspauschale,
        Field::Kunde,
    ] {
        assert!(out.not_found().contains(&field), "{field} should be missing");
    }
}

#[test]
fn test_venue_block_forces_on_site_over_remote() {
    let text = "Remote wäre grundsätzlich möglich, aber:\n\nSeminarort:\nStadtwerke Ulm\nKarlstraße 1\n89073 Ulm\n";
    let out = engine().extract(text);

    assert_eq!(out.text(Field::Format), Some("Vor Ort"));
    assert_eq!(out.text(Field::FirmaOrt), Some("Stadtwerke Ulm"));
}

#[test]
fn test_trainer_label_with_known_full_name() {
    let out = engine().extract("Trainer: Lukas Sontheimer");

    assert_eq!(out.text(Field::Trainer), Some("Lukas Sontheimer"));
    assert_eq!(out.flag(Field::TrainerBekannt), Some(true));
}

#[test]
fn test_no_trainer_cost_is_never_zero() {
    let out = engine().extract("Tagessatz: 1100 €. Reisekosten: 0");

    assert!(out.get(Field::TrainerKosten).is_none());
    assert!(out.not_found().contains(&Field::TrainerKosten));
    // a zero amount is not a value either
    assert!(out.not_found().contains(&Field::Reisekosten));
}

#[test]
fn test_output_json_uses_field_names() {
    let out = engine().extract(AGENCY_MAIL);
    let json = out.to_json();

    assert_eq!(json["datum_start"], "21.01.2026");
    assert_eq!(json["teilnehmeranzahl"], 8);
    assert_eq!(json["trainer_bekannt"], true);
    assert_eq!(json["tagessatz"], 1200.0);
    assert!(json.get("trainer_adresse").is_none());
}

#[test]
fn test_old_year_is_clamped_to_current() {
    let config = Config::from_json(CONFIG).expect("test config should parse");
    let today = NaiveDate::from_ymd_opt(2026, 10, 17).expect("test date should be valid");
    let engine = ExtractionEngine::new(config.registry, config.extraction, today)
        .expect("engine should build");

    let out = engine.extract("Termin am 12.03.2019");
    assert_eq!(out.text(Field::DatumStart), Some("12.03.2026"));
}

#[test]
fn test_range_keeps_its_old_year() {
    let out = engine().extract("Seminar vom 1.3. bis 5.3.2019 in Berlin");

    assert_eq!(out.text(Field::DatumStart), Some("01.03.2019"));
    assert_eq!(out.text(Field::DatumEnde), Some("05.03.2019"));
    assert_eq!(out.text(Field::BriefingDatum), Some("26.02.2019"));
}

#[test]
fn test_trainer_with_salutation() {
    let out = engine().extract("Trainer: Herr Schmidt\nVielen Dank");
    assert_eq!(out.text(Field::Trainer), Some("Herr Schmidt"));
    assert_eq!(out.flag(Field::TrainerBekannt), Some(false));

    let out = engine().extract("Trainer: Frau Müller\n");
    assert_eq!(out.text(Field::Trainer), Some("Frau Müller"));
}

#[test]
fn test_extreme_settings_degrade_instead_of_panicking() {
    let config = Config::from_json(CONFIG).expect("test config should parse");
    let settings = ExtractionSettings {
        rolling_window_days: i64::MAX / 2,
        max_past_years: i32::MIN,
        briefing_lead_days: i64::MIN,
        ..ExtractionSettings::default()
    };
    let today = NaiveDate::from_ymd_opt(2026, 1, 10).expect("test date should be valid");
    let engine =
        ExtractionEngine::new(config.registry, settings, today).expect("engine should build");

    let out = engine.extract("am 4. und 5. März");
    assert_eq!(out.text(Field::DatumStart), Some("04.03.2026"));
    assert_eq!(out.text(Field::DatumEnde), Some("05.03.2026"));
    assert!(out.not_found().contains(&Field::BriefingDatum));

    let out = engine.extract("Termin am 12.03.2019");
    assert_eq!(out.text(Field::DatumStart), Some("12.03.2019"));
}

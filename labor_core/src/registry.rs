//! Known entities: our own company, internal staff, trainers and agencies.
//!
//! The registry is read-only once loaded. Lookups are linear scans over
//! small lists; JSON keys follow the existing `config.json` layout.

use serde::{Deserialize, Serialize};

/// Static lookup data distinguishing internal staff from external parties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(rename = "firma", default)]
    pub company: Company,
    #[serde(rename = "interne_personen", default)]
    pub internal_people: Vec<InternalPerson>,
    #[serde(rename = "bekannte_trainer", default)]
    pub trainers: Vec<Trainer>,
    #[serde(rename = "bekannte_auftraggeber", default)]
    pub agencies: Vec<Agency>,
}

/// The operator's own company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "namen", default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(rename = "adresse", default, skip_serializing_if = "String::is_empty")]
    pub address: String,
}

/// A member of our own staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalPerson {
    pub name: String,
    #[serde(rename = "rolle", default)]
    pub role: String,
    #[serde(default)]
    pub emails: Vec<String>,
}

impl InternalPerson {
    /// `Name (Rolle)`, the display form used for the internal sender.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.role.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.role)
        }
    }
}

/// A trainer we have worked with before.
///
/// Older configuration files list trainers as bare names; both shapes load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TrainerEntry")]
pub struct Trainer {
    pub name: String,
    #[serde(rename = "kurznamen", default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(rename = "strasse", default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(rename = "plz", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "ort", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefon", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Trainer {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive match on the canonical name or any alias.
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.name.to_lowercase() == name || self.aliases.iter().any(|a| a.to_lowercase() == name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TrainerEntry {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        kurznamen: Vec<String>,
        #[serde(default)]
        strasse: Option<String>,
        #[serde(default)]
        plz: Option<String>,
        #[serde(default)]
        ort: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        telefon: Option<String>,
    },
}

impl From<TrainerEntry> for Trainer {
    fn from(entry: TrainerEntry) -> Self {
        match entry {
            TrainerEntry::Name(name) => Self::named(name),
            TrainerEntry::Full {
                name,
                kurznamen,
                strasse,
                plz,
                ort,
                email,
                telefon,
            } => Self {
                name,
                aliases: kurznamen,
                street: strasse,
                postal_code: plz,
                city: ort,
                email,
                phone: telefon,
            },
        }
    }
}

/// A commissioning agency that passes trainings on to us.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    pub name: String,
    #[serde(rename = "kurznamen", default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
}

impl Agency {
    fn owns_email(&self, email_lower: &str) -> bool {
        self.domains
            .iter()
            .any(|domain| email_lower.contains(&format!("@{}", domain.to_lowercase())))
    }
}

impl Registry {
    /// An email is internal when it contains one of our domains or belongs to
    /// a member of staff.
    #[must_use]
    pub fn is_internal_email(&self, email: &str) -> bool {
        let email_lower = email.to_lowercase();
        self.company
            .domains
            .iter()
            .any(|domain| email_lower.contains(&domain.to_lowercase()))
            || self.internal_person_by_email(email).is_some()
    }

    /// Reverse lookup of a staff member by exact email.
    #[must_use]
    pub fn internal_person_by_email(&self, email: &str) -> Option<&InternalPerson> {
        let email_lower = email.to_lowercase();
        self.internal_people.iter().find(|person| {
            person
                .emails
                .iter()
                .any(|known| known.to_lowercase() == email_lower)
        })
    }

    /// Whether `name` mentions a member of staff.
    #[must_use]
    pub fn is_internal_name(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        self.internal_people
            .iter()
            .any(|person| name_lower.contains(&person.name.to_lowercase()))
    }

    /// Whether `name` overlaps one of our own company names in either direction.
    #[must_use]
    pub fn is_internal_company(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        self.company.names.iter().any(|own| {
            let own_lower = own.to_lowercase();
            own_lower.contains(&name_lower) || name_lower.contains(&own_lower)
        })
    }

    #[must_use]
    pub fn find_trainer(&self, name: &str) -> Option<&Trainer> {
        self.trainers.iter().find(|trainer| trainer.answers_to(name))
    }

    /// First agency whose alias occurs in `text` or whose domain appears as
    /// `@domain`.
    #[must_use]
    pub fn find_agency_in_text(&self, text: &str) -> Option<&Agency> {
        let text_lower = text.to_lowercase();
        self.agencies.iter().find(|agency| {
            agency
                .aliases
                .iter()
                .any(|alias| text_lower.contains(&alias.to_lowercase()))
                || agency.owns_email(&text_lower)
        })
    }

    #[must_use]
    pub fn is_agency_email(&self, email: &str) -> bool {
        let email_lower = email.to_lowercase();
        self.agencies.iter().any(|agency| agency.owns_email(&email_lower))
    }
}

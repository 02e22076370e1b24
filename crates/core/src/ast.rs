//! Raw record types produced by the assembler.
//!
//! These are drafts: they hold the document's strings as written, pointers
//! included. Normalization and identity assignment happen in
//! [`crate::transform`].

use serde::Serialize;

/// Tags the importer recognizes.
pub mod tags {
    pub const INDI: &str = "INDI";
    pub const FAM: &str = "FAM";
    pub const NAME: &str = "NAME";
    pub const SEX: &str = "SEX";
    pub const BIRT: &str = "BIRT";
    pub const DEAT: &str = "DEAT";
    pub const HUSB: &str = "HUSB";
    pub const WIFE: &str = "WIFE";
    pub const CHIL: &str = "CHIL";
    pub const MARR: &str = "MARR";
    pub const DATE: &str = "DATE";
    pub const PLAC: &str = "PLAC";

    /// Structural top-level records that are discarded without comment.
    pub const ENVELOPE: &[&str] = &["HEAD", "TRLR"];
    /// Individual -> family links; redundant with the family's own lists.
    pub const FAMILY_LINKS: &[&str] = &["FAMC", "FAMS"];
}

// ──────────────────────────────────────────────
// Events
// ──────────────────────────────────────────────

/// A birth, death or marriage as written in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

// ──────────────────────────────────────────────
// Individuals
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    /// `M` and `F` map to male and female; anything else is unknown.
    pub fn from_code(code: &str) -> Sex {
        match code.trim() {
            "M" => Sex::Male,
            "F" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawIndividual {
    /// Pointer from the opening line, e.g. `@I1@`.
    pub id: String,
    #[serde(skip)]
    pub line: u32,
    /// Display name verbatim, e.g. `John /Smith/`.
    pub name: String,
    pub sex: Sex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<RawEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death: Option<RawEvent>,
    /// Filled by [`crate::transform::link_families`].
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub spouses: Vec<String>,
}

impl RawIndividual {
    pub fn new(id: impl Into<String>, line: u32) -> Self {
        RawIndividual {
            id: id.into(),
            line,
            name: String::new(),
            sex: Sex::Unknown,
            birth: None,
            death: None,
            parents: Vec::new(),
            children: Vec::new(),
            spouses: Vec::new(),
        }
    }
}

// ──────────────────────────────────────────────
// Family units
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawFamilyUnit {
    pub id: String,
    #[serde(skip)]
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub husband: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wife: Option<String>,
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marriage: Option<RawEvent>,
}

impl RawFamilyUnit {
    pub fn new(id: impl Into<String>, line: u32) -> Self {
        RawFamilyUnit {
            id: id.into(),
            line,
            husband: None,
            wife: None,
            children: Vec::new(),
            marriage: None,
        }
    }

    /// Defined parents, husband first.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.husband.as_deref().into_iter().chain(self.wife.as_deref())
    }
}

/// Everything the assembler extracted from one document, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawDocument {
    pub individuals: Vec<RawIndividual>,
    pub families: Vec<RawFamilyUnit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_codes() {
        assert_eq!(Sex::from_code("M"), Sex::Male);
        assert_eq!(Sex::from_code("F"), Sex::Female);
        assert_eq!(Sex::from_code("U"), Sex::Unknown);
        assert_eq!(Sex::from_code(""), Sex::Unknown);
        assert_eq!(Sex::from_code("m"), Sex::Unknown);
    }

    #[test]
    fn family_parents_husband_first() {
        let mut fam = RawFamilyUnit::new("@F1@", 1);
        assert_eq!(fam.parents().count(), 0);
        fam.wife = Some("@I2@".into());
        assert_eq!(fam.parents().collect::<Vec<_>>(), vec!["@I2@"]);
        fam.husband = Some("@I1@".into());
        assert_eq!(fam.parents().collect::<Vec<_>>(), vec!["@I1@", "@I2@"]);
    }
}

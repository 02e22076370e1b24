//! Output domain model: people, relationships and the tree that holds them.
//!
//! These are the values handed to storage and display collaborators. Field
//! names follow the stored column names (`first_name`, `person1_id`, ...);
//! only the tree name is camel-cased (`treeName`).

use serde::{Deserialize, Serialize};

use crate::ast::Sex;
use crate::normalize::year_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl From<Sex> for Gender {
    fn from(sex: Sex) -> Self {
        match sex {
            Sex::Male => Gender::Male,
            Sex::Female => Gender::Female,
            Sex::Unknown => Gender::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Spouse,
    Parent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineEventType {
    Birth,
    Death,
}

/// A dated life event attached to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub event_type: TimelineEventType,
    /// Normalized `YYYY-MM-DD`, when the raw date had that precision.
    pub date: Option<String>,
    /// The date exactly as written, kept for qualified dates like `ABT 1850`.
    pub raw_date: Option<String>,
    pub place: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub gender: Gender,
    pub biography: String,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub created_at: String,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<TimelineEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death: Option<TimelineEvent>,
    /// Document pointer this person was imported from (`@I1@`).
    pub source_ref: String,
}

impl Person {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// `"1900-1970"`, `"1905-Unknown"`, ...; uses the raw dates so
    /// year-only entries still show.
    pub fn lifespan_label(&self) -> String {
        let raw = |event: &Option<TimelineEvent>, normalized: &Option<String>| {
            event
                .as_ref()
                .and_then(|e| e.raw_date.clone())
                .or_else(|| normalized.clone())
        };
        format!(
            "{}-{}",
            year_label(raw(&self.birth, &self.birth_date).as_deref()),
            year_label(raw(&self.death, &self.death_date).as_deref()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    /// Spouse edges: the husband. Parent edges: the parent.
    pub person1_id: String,
    /// Spouse edges: the wife. Parent edges: the child.
    pub person2_id: String,
    pub relationship_type: RelationshipType,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: String,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub created_at: String,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyTreeResult {
    pub id: String,
    #[serde(rename = "treeName")]
    pub tree_name: String,
    pub description: String,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub created_at: String,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub updated_at: String,
    pub people: Vec<Person>,
    pub relationships: Vec<Relationship>,
}

impl FamilyTreeResult {
    pub fn spouse_edges(&self) -> impl Iterator<Item = &Relationship> {
        self.edges_of(RelationshipType::Spouse)
    }

    pub fn parent_edges(&self) -> impl Iterator<Item = &Relationship> {
        self.edges_of(RelationshipType::Parent)
    }

    fn edges_of(&self, kind: RelationshipType) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .iter()
            .filter(move |r| r.relationship_type == kind)
    }

    /// Find the person a relationship endpoint refers to. Works for both
    /// endpoint modes: the id is tried first, then the source pointer.
    pub fn resolve_endpoint(&self, endpoint: &str) -> Option<&Person> {
        self.people
            .iter()
            .find(|p| p.id == endpoint)
            .or_else(|| self.people.iter().find(|p| p.source_ref == endpoint))
    }
}

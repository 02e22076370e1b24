//! Transformer: raw drafts -> people, relationships and tree metadata.
//!
//! Every individual becomes exactly one [`Person`] with a fresh id. Family
//! units become edges: one spouse edge when both partners are named, and one
//! parent edge per (named parent, child) pair.

use std::collections::HashMap;

use crate::ast::{RawDocument, RawEvent, RawFamilyUnit, RawIndividual};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::model::{
    FamilyTreeResult, Gender, Person, Relationship, RelationshipType, TimelineEvent,
    TimelineEventType,
};
use crate::normalize::{normalize_date, split_name};
use crate::options::{EndpointMode, ImportOptions};

/// Fill each individual's parent / child / spouse pointer lists from the
/// family units. Pointers that name no individual are skipped.
pub fn link_families(document: &mut RawDocument) {
    let RawDocument {
        individuals,
        families,
    } = document;

    let mut index: HashMap<String, usize> = HashMap::new();
    for (pos, individual) in individuals.iter().enumerate() {
        index.entry(individual.id.clone()).or_insert(pos);
    }

    for family in families.iter() {
        if let (Some(husband), Some(wife)) = (&family.husband, &family.wife) {
            if let Some(&h) = index.get(husband) {
                individuals[h].spouses.push(wife.clone());
            }
            if let Some(&w) = index.get(wife) {
                individuals[w].spouses.push(husband.clone());
            }
        }
        for child in &family.children {
            for parent in family.parents() {
                if let Some(&c) = index.get(child) {
                    individuals[c].parents.push(parent.to_owned());
                }
                if let Some(&p) = index.get(parent) {
                    individuals[p].children.push(child.clone());
                }
            }
        }
    }
}

/// Build the tree for one assembled document.
///
/// Never fails: missing names, dates and dangling pointers just produce
/// empty fields (and diagnostics when `sink` is strict).
pub fn transform(
    document: &RawDocument,
    options: &ImportOptions,
    sink: &mut DiagnosticSink,
) -> FamilyTreeResult {
    let now = now_rfc3339();

    let people: Vec<Person> = document
        .individuals
        .iter()
        .map(|individual| to_person(individual, &now, sink))
        .collect();

    let mut ids: HashMap<&str, &str> = HashMap::new();
    for person in &people {
        ids.entry(person.source_ref.as_str())
            .or_insert(person.id.as_str());
    }

    let endpoint = |pointer: &str| -> String {
        match options.endpoints {
            EndpointMode::SourcePointer => pointer.to_owned(),
            EndpointMode::PersonId => ids.get(pointer).unwrap_or(&pointer).to_string(),
        }
    };

    let mut relationships = Vec::new();
    for family in &document.families {
        for pointer in family.parents().chain(family.children.iter().map(String::as_str)) {
            if !ids.contains_key(pointer) {
                sink.report(
                    DiagnosticKind::UnresolvedReference,
                    Some(family.line),
                    format!(
                        "family {} refers to unknown individual {}",
                        family.id, pointer
                    ),
                );
            }
        }

        if let (Some(husband), Some(wife)) = (&family.husband, &family.wife) {
            let (start_date, notes) = marriage_details(family, sink);
            relationships.push(Relationship {
                start_date,
                notes,
                ..edge(endpoint(husband), endpoint(wife), RelationshipType::Spouse, &now)
            });
        }

        for child in &family.children {
            for parent in family.parents() {
                relationships.push(edge(
                    endpoint(parent),
                    endpoint(child),
                    RelationshipType::Parent,
                    &now,
                ));
            }
        }
    }

    let tree_name = match people.first().map(Person::display_name) {
        Some(name) if !name.is_empty() => format!("{} Family Tree", name),
        _ => options.default_tree_name.clone(),
    };

    tracing::debug!(
        people = people.len(),
        relationships = relationships.len(),
        tree_name = %tree_name,
        "transformed document"
    );

    FamilyTreeResult {
        id: new_id(),
        tree_name,
        description: options.description.clone(),
        created_at: now.clone(),
        updated_at: now,
        people,
        relationships,
    }
}

fn to_person(individual: &RawIndividual, now: &str, sink: &mut DiagnosticSink) -> Person {
    let (first_name, last_name) = split_name(&individual.name);
    let birth = individual
        .birth
        .as_ref()
        .map(|e| timeline_event(TimelineEventType::Birth, e, individual.line, sink));
    let death = individual
        .death
        .as_ref()
        .map(|e| timeline_event(TimelineEventType::Death, e, individual.line, sink));

    Person {
        id: new_id(),
        first_name,
        last_name,
        birth_date: birth.as_ref().and_then(|e| e.date.clone()),
        death_date: death.as_ref().and_then(|e| e.date.clone()),
        gender: Gender::from(individual.sex),
        biography: String::new(),
        created_at: now.to_owned(),
        updated_at: now.to_owned(),
        birth,
        death,
        source_ref: individual.id.clone(),
    }
}

fn timeline_event(
    event_type: TimelineEventType,
    event: &RawEvent,
    line: u32,
    sink: &mut DiagnosticSink,
) -> TimelineEvent {
    TimelineEvent {
        event_type,
        date: checked_date(event.date.as_deref(), line, sink),
        raw_date: event.date.clone(),
        place: event.place.clone(),
    }
}

/// Spouse edge start date and notes (the marriage place, if any).
fn marriage_details(family: &RawFamilyUnit, sink: &mut DiagnosticSink) -> (Option<String>, String) {
    match &family.marriage {
        Some(marriage) => (
            checked_date(marriage.date.as_deref(), family.line, sink),
            marriage.place.clone().unwrap_or_default(),
        ),
        None => (None, String::new()),
    }
}

fn checked_date(raw: Option<&str>, line: u32, sink: &mut DiagnosticSink) -> Option<String> {
    let raw = raw?;
    let normalized = normalize_date(raw);
    if normalized.is_none() && !raw.trim().is_empty() {
        sink.report(
            DiagnosticKind::UnparseableDate,
            Some(line),
            format!("date '{}' is not in DD MON YYYY form", raw),
        );
    }
    normalized
}

fn edge(
    person1_id: String,
    person2_id: String,
    relationship_type: RelationshipType,
    now: &str,
) -> Relationship {
    Relationship {
        id: new_id(),
        person1_id,
        person2_id,
        relationship_type,
        start_date: None,
        end_date: None,
        notes: String::new(),
        created_at: now.to_owned(),
        updated_at: now.to_owned(),
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::lexer::lex;
    use crate::options::{Strictness, DEFAULT_TREE_NAME};

    fn doc(src: &str) -> RawDocument {
        assemble(lex(src))
    }

    fn run(src: &str, options: &ImportOptions) -> FamilyTreeResult {
        let mut sink = DiagnosticSink::new(options.strictness);
        transform(&doc(src), options, &mut sink)
    }

    const COUPLE: &str = "\
0 @I1@ INDI
1 NAME John /Smith/
1 SEX M
0 @I2@ INDI
1 NAME Mary /Jones/
1 SEX F
0 @I3@ INDI
1 NAME Ann /Smith/
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 MARR
2 DATE 10 JUN 1925
2 PLAC Boston
";

    #[test]
    fn people_are_one_to_one_with_individuals() {
        let tree = run(COUPLE, &ImportOptions::default());
        let refs: Vec<&str> = tree.people.iter().map(|p| p.source_ref.as_str()).collect();
        assert_eq!(refs, vec!["@I1@", "@I2@", "@I3@"]);
        assert_eq!(tree.people[0].gender, Gender::Male);
        assert_eq!(tree.people[2].gender, Gender::Other);
        assert!(tree.people.iter().all(|p| p.biography.is_empty()));
    }

    #[test]
    fn spouse_edge_carries_marriage() {
        let tree = run(COUPLE, &ImportOptions::default());
        let spouses: Vec<_> = tree.spouse_edges().collect();
        assert_eq!(spouses.len(), 1);
        assert_eq!(spouses[0].person1_id, "@I1@");
        assert_eq!(spouses[0].person2_id, "@I2@");
        assert_eq!(spouses[0].start_date.as_deref(), Some("1925-06-10"));
        assert_eq!(spouses[0].notes, "Boston");
        assert_eq!(spouses[0].end_date, None);
    }

    #[test]
    fn parent_edges_husband_first() {
        let tree = run(COUPLE, &ImportOptions::default());
        let parents: Vec<(&str, &str)> = tree
            .parent_edges()
            .map(|r| (r.person1_id.as_str(), r.person2_id.as_str()))
            .collect();
        assert_eq!(parents, vec![("@I1@", "@I3@"), ("@I2@", "@I3@")]);
    }

    #[test]
    fn single_parent_family_has_no_spouse_edge() {
        let src = "0 @I1@ INDI\n0 @I2@ INDI\n0 @I3@ INDI\n0 @F1@ FAM\n1 WIFE @I1@\n1 CHIL @I2@\n1 CHIL @I3@\n";
        let tree = run(src, &ImportOptions::default());
        assert_eq!(tree.spouse_edges().count(), 0);
        assert_eq!(tree.parent_edges().count(), 2);
    }

    #[test]
    fn childless_parentless_family_emits_nothing() {
        let tree = run("0 @F1@ FAM\n1 CHIL @I9@\n", &ImportOptions::default());
        assert!(tree.relationships.is_empty());
    }

    #[test]
    fn person_id_mode_rewrites_endpoints() {
        let options = ImportOptions::default().with_endpoints(EndpointMode::PersonId);
        let tree = run(COUPLE, &options);
        for r in &tree.relationships {
            assert!(tree.people.iter().any(|p| p.id == r.person1_id));
            assert!(tree.people.iter().any(|p| p.id == r.person2_id));
        }
    }

    #[test]
    fn person_id_mode_keeps_unresolved_pointers() {
        let options = ImportOptions::default().with_endpoints(EndpointMode::PersonId);
        let tree = run("0 @I1@ INDI\n0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I7@\n", &options);
        let spouse = tree.spouse_edges().next().unwrap();
        assert_eq!(spouse.person1_id, tree.people[0].id);
        assert_eq!(spouse.person2_id, "@I7@");
    }

    #[test]
    fn tree_name_from_first_person() {
        assert_eq!(
            run(COUPLE, &ImportOptions::default()).tree_name,
            "John Smith Family Tree"
        );
        assert_eq!(
            run("0 @I1@ INDI\n1 NAME Cher\n", &ImportOptions::default()).tree_name,
            "Cher Family Tree"
        );
        assert_eq!(
            run("0 HEAD\n0 TRLR\n", &ImportOptions::default()).tree_name,
            DEFAULT_TREE_NAME
        );
    }

    #[test]
    fn nameless_first_person_falls_back_to_default_tree_name() {
        let src = "0 @I1@ INDI\n1 SEX M\n0 @I2@ INDI\n1 NAME Mary /Jones/\n";
        assert_eq!(
            run(src, &ImportOptions::default()).tree_name,
            DEFAULT_TREE_NAME
        );
    }

    #[test]
    fn birth_and_death_normalize_into_person_and_timeline() {
        let src = "0 @I1@ INDI\n1 BIRT\n2 DATE 01 JAN 1900\n2 PLAC Springfield\n1 DEAT\n2 DATE ABT 1970\n";
        let tree = run(src, &ImportOptions::default());
        let p = &tree.people[0];
        assert_eq!(p.birth_date.as_deref(), Some("1900-01-01"));
        assert_eq!(p.death_date, None);
        let birth = p.birth.as_ref().unwrap();
        assert_eq!(birth.place.as_deref(), Some("Springfield"));
        let death = p.death.as_ref().unwrap();
        assert_eq!(death.raw_date.as_deref(), Some("ABT 1970"));
        assert_eq!(p.lifespan_label(), "1900-1970");
    }

    #[test]
    fn strict_sink_reports_unresolved_and_bad_dates() {
        let src = "0 @I1@ INDI\n1 BIRT\n2 DATE 01 XYZ 1900\n0 @F1@ FAM\n1 HUSB @I1@\n1 CHIL @I2@\n";
        let mut sink = DiagnosticSink::new(Strictness::Strict);
        let tree = transform(&doc(src), &ImportOptions::strict(), &mut sink);
        assert_eq!(tree.parent_edges().count(), 1);
        let kinds: Vec<DiagnosticKind> = sink.into_diagnostics().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UnparseableDate,
                DiagnosticKind::UnresolvedReference
            ]
        );
    }

    #[test]
    fn link_families_fills_pointer_lists() {
        let mut d = doc(COUPLE);
        link_families(&mut d);
        let john = &d.individuals[0];
        assert_eq!(john.spouses, vec!["@I2@"]);
        assert_eq!(john.children, vec!["@I3@"]);
        let ann = &d.individuals[2];
        assert_eq!(ann.parents, vec!["@I1@", "@I2@"]);
        assert!(ann.spouses.is_empty());
    }

    #[test]
    fn ids_are_fresh_and_timestamps_shared() {
        let tree = run(COUPLE, &ImportOptions::default());
        let mut ids: Vec<&str> = tree.people.iter().map(|p| p.id.as_str()).collect();
        ids.extend(tree.relationships.iter().map(|r| r.id.as_str()));
        ids.push(&tree.id);
        let unique: std::collections::HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(tree.people.iter().all(|p| p.created_at == tree.created_at));
    }
}

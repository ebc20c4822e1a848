//! Entity classification and model aggregation.
//!
//! Each block's triples share one subject. They are grouped by resolved
//! predicate and the first `rdf:type` picks the role, first match wins:
//!
//! | primary type    | role            |
//! |-----------------|-----------------|
//! | `owl:Ontology`  | ontology header |
//! | `rdfs:Class`    | class           |
//! | `rdf:Property`  | property        |
//! | anything/none   | instance        |
//!
//! Single-valued fields take the first value in source order.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::model::{
    OntologyHeader, ParsedTtl, PropertyMap, SchemaClass, SchemaInstance, SchemaProperty,
};
use crate::vocab;

use super::literal::{clean_literal, is_plain_literal};
use super::prefix::{PrefixTable, local_name};
use super::triples::Triple;

/// A classified subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Ontology(OntologyHeader),
    Class(SchemaClass),
    Property(SchemaProperty),
    Instance(SchemaInstance),
}

impl Entity {
    /// Category name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ontology(_) => "ontology",
            Self::Class(_) => "class",
            Self::Property(_) => "property",
            Self::Instance(_) => "instance",
        }
    }
}

/// Raw object values of one block, grouped by resolved predicate.
struct PredicateGroups<'a> {
    groups: Vec<(String, Vec<Cow<'a, str>>)>,
}

impl<'a> PredicateGroups<'a> {
    fn collect(triples: Vec<Triple<'a>>, prefixes: &PrefixTable) -> Self {
        let mut groups: Vec<(String, Vec<Cow<'a, str>>)> = Vec::new();
        for triple in triples {
            let predicate = prefixes.resolve(triple.predicate);
            match groups.iter_mut().find(|(p, _)| *p == predicate) {
                Some((_, values)) => values.push(triple.object),
                None => groups.push((predicate, vec![triple.object])),
            }
        }
        Self { groups }
    }

    fn values(&self, predicate: &str) -> &[Cow<'a, str>] {
        self.groups
            .iter()
            .find(|(p, _)| p == predicate)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    fn first(&self, predicate: &str) -> Option<&str> {
        self.values(predicate).first().map(|v| v.as_ref())
    }

    /// First value as display text, or empty.
    fn first_text(&self, predicate: &str) -> String {
        self.first(predicate).map(clean_literal).unwrap_or("").to_string()
    }

    /// First value as a shortened term, or empty.
    fn first_term(&self, predicate: &str, prefixes: &PrefixTable) -> String {
        self.first(predicate)
            .map(|v| prefixes.compact(v))
            .unwrap_or_default()
    }

    fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Label from `rdfs:label`, falling back to the local name of `uri`.
fn label_or_local_name(label: String, uri: &str) -> String {
    if label.is_empty() {
        local_name(uri).to_string()
    } else {
        label
    }
}

/// Classify one block's triples. Returns `None` for a subject that carries
/// neither a type nor any predicate.
pub fn classify(triples: Vec<Triple<'_>>, prefixes: &PrefixTable) -> Option<Entity> {
    let subject = triples.first()?.subject;
    let resolved_subject = prefixes.resolve(subject);
    let short_subject = prefixes.shorten(&resolved_subject);

    let groups = PredicateGroups::collect(triples, prefixes);
    let primary_type = groups
        .first(vocab::RDF_TYPE)
        .map(|t| prefixes.resolve(t))
        .unwrap_or_default();

    let label = groups.first_text(vocab::RDFS_LABEL);
    let comment = groups.first_text(vocab::RDFS_COMMENT);

    let entity = match primary_type.as_str() {
        vocab::OWL_ONTOLOGY => Entity::Ontology(OntologyHeader {
            uri: resolved_subject,
            label,
            comment,
            imports: groups
                .values(vocab::OWL_IMPORTS)
                .iter()
                .map(|i| prefixes.compact(i))
                .collect(),
        }),
        vocab::RDFS_CLASS => Entity::Class(SchemaClass {
            label: label_or_local_name(label, &short_subject),
            comment,
            sub_class_of: groups.first_term(vocab::RDFS_SUB_CLASS_OF, prefixes),
            uri: short_subject,
        }),
        vocab::RDF_PROPERTY => Entity::Property(SchemaProperty {
            label: label_or_local_name(label, &short_subject),
            comment,
            domain: groups.first_term(vocab::RDFS_DOMAIN, prefixes),
            range: groups.first_term(vocab::RDFS_RANGE, prefixes),
            uri: short_subject,
        }),
        _ if !primary_type.is_empty() || !groups.is_empty() => {
            let name = label_or_local_name(groups.first_text(vocab::SCHEMA_NAME), &short_subject);
            Entity::Instance(SchemaInstance {
                type_: prefixes.shorten(&primary_type),
                name,
                properties: instance_properties(&groups, prefixes),
                uri: short_subject,
            })
        }
        _ => return None,
    };
    Some(entity)
}

/// Every predicate but `rdf:type`, shortened, with literal values cleaned
/// and term values shortened.
fn instance_properties(groups: &PredicateGroups<'_>, prefixes: &PrefixTable) -> PropertyMap {
    let mut properties = PropertyMap::new();
    for (predicate, values) in &groups.groups {
        if predicate == vocab::RDF_TYPE {
            continue;
        }
        let key = prefixes.shorten(predicate);
        for value in values {
            let value = if is_plain_literal(value) {
                clean_literal(value).to_string()
            } else {
                prefixes.compact(value)
            };
            properties.push(key.clone(), value);
        }
    }
    properties
}

/// Category of a placed subject, ordered by classification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Instance,
    Property,
    Class,
}

/// Accumulates classified entities in block order.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    ontology: Option<OntologyHeader>,
    classes: Vec<SchemaClass>,
    properties: Vec<SchemaProperty>,
    instances: Vec<SchemaInstance>,
    /// Category each URI currently occupies.
    placed: HashMap<String, Rank>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity. A later ontology header replaces an earlier one. A
    /// subject already placed keeps its entry unless the new block ranks it
    /// higher (class > property > instance), in which case the old entry is
    /// removed. Returns whether the entity was recorded.
    pub fn add(&mut self, entity: Entity) -> bool {
        if let Entity::Ontology(header) = entity {
            if let Some(previous) = &self.ontology {
                tracing::debug!(
                    previous = %previous.uri,
                    replacement = %header.uri,
                    "ontology header replaced"
                );
            }
            self.ontology = Some(header);
            return true;
        }

        let (uri, rank) = match &entity {
            Entity::Class(c) => (c.uri.clone(), Rank::Class),
            Entity::Property(p) => (p.uri.clone(), Rank::Property),
            Entity::Instance(i) => (i.uri.clone(), Rank::Instance),
            Entity::Ontology(_) => return false,
        };

        if let Some(&existing) = self.placed.get(&uri) {
            if existing >= rank {
                tracing::debug!(%uri, kind = entity.kind(), "subject already classified, block ignored");
                return false;
            }
            tracing::debug!(%uri, from = ?existing, to = ?rank, "subject reclassified");
            self.unplace(&uri, existing);
        }
        self.placed.insert(uri, rank);

        match entity {
            Entity::Class(c) => self.classes.push(c),
            Entity::Property(p) => self.properties.push(p),
            Entity::Instance(i) => self.instances.push(i),
            Entity::Ontology(_) => {}
        }
        true
    }

    fn unplace(&mut self, uri: &str, rank: Rank) {
        match rank {
            Rank::Class => self.classes.retain(|c| c.uri != uri),
            Rank::Property => self.properties.retain(|p| p.uri != uri),
            Rank::Instance => self.instances.retain(|i| i.uri != uri),
        }
    }

    pub fn finish(self, prefixes: PrefixTable, raw: String) -> ParsedTtl {
        ParsedTtl {
            prefixes: prefixes.into_vec(),
            ontology: self.ontology,
            classes: self.classes,
            properties: self.properties,
            instances: self.instances,
            raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turtle::triples::extract_triples;

    const PREFIXES: &str = "@prefix : <http://ex.org/> .\n\
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
        @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
        @prefix schema: <https://schema.org/> .\n";

    fn classify_block(block: &str) -> Option<Entity> {
        let prefixes = PrefixTable::from_document(PREFIXES);
        classify(extract_triples(block), &prefixes)
    }

    #[test]
    fn class_with_label_and_parent() {
        let entity = classify_block(
            ":Card rdf:type rdfs:Class ; rdfs:label \"Card\"@en ; rdfs:subClassOf :Thing , :Item",
        );
        assert_eq!(
            entity,
            Some(Entity::Class(SchemaClass {
                uri: ":Card".into(),
                label: "Card".into(),
                comment: String::new(),
                sub_class_of: ":Thing".into(),
            }))
        );
    }

    #[test]
    fn class_label_defaults_to_local_name() {
        let Some(Entity::Class(class)) = classify_block(":Deck a rdfs:Class") else {
            panic!("expected class");
        };
        assert_eq!(class.label, "Deck");
    }

    #[test]
    fn first_label_wins() {
        let Some(Entity::Class(class)) =
            classify_block(":A rdf:type rdfs:Class ; rdfs:label \"Alpha\" , \"AlphaAgain\"")
        else {
            panic!("expected class");
        };
        assert_eq!(class.label, "Alpha");
    }

    #[test]
    fn property_with_domain_and_unresolved_range() {
        let entity = classify_block(":cost rdf:type rdf:Property ; rdfs:domain :Card ; rdfs:range xsd:integer");
        assert_eq!(
            entity,
            Some(Entity::Property(SchemaProperty {
                uri: ":cost".into(),
                label: "cost".into(),
                comment: String::new(),
                domain: ":Card".into(),
                range: "xsd:integer".into(),
            }))
        );
    }

    #[test]
    fn ontology_keeps_absolute_uri_and_imports() {
        let Some(Entity::Ontology(header)) = classify_block(
            "<http://ex.org/games> a owl:Ontology ; rdfs:label \"Games\" ; \
             owl:imports <http://ex.org/core> , <http://other.org/x>",
        ) else {
            panic!("expected ontology");
        };
        assert_eq!(header.uri, "http://ex.org/games");
        assert_eq!(header.label, "Games");
        assert_eq!(header.imports, vec![":core", "http://other.org/x"]);
    }

    #[test]
    fn instance_properties_exclude_type() {
        let Some(Entity::Instance(inst)) =
            classify_block(":c1 rdf:type :Card ; :cost \"3\" ; :deck :d1 , :d2 ; schema:name \"Fireball\"@en")
        else {
            panic!("expected instance");
        };
        assert_eq!(inst.uri, ":c1");
        assert_eq!(inst.type_, ":Card");
        assert_eq!(inst.name, "Fireball");
        assert_eq!(
            inst.properties.keys().collect::<Vec<_>>(),
            vec![":cost", ":deck", "schema:name"]
        );
        assert_eq!(inst.properties.get(":cost").unwrap(), ["3"]);
        assert_eq!(inst.properties.get(":deck").unwrap(), [":d1", ":d2"]);
        assert!(inst.properties.get("rdf:type").is_none());
    }

    #[test]
    fn untyped_subject_with_predicates_is_instance() {
        let Some(Entity::Instance(inst)) = classify_block(":x :likes :y") else {
            panic!("expected instance");
        };
        assert_eq!(inst.type_, "");
        assert_eq!(inst.name, "x");
    }

    #[test]
    fn empty_block_is_dropped() {
        assert_eq!(classify_block(":x"), None);
    }

    #[test]
    fn builder_ignores_lower_or_equal_category() {
        let mut builder = ModelBuilder::new();
        let class = classify_block(":A a rdfs:Class").unwrap();
        let again = classify_block(":A :note \"later\"").unwrap();
        assert!(builder.add(class));
        assert!(!builder.add(again));
        let model = builder.finish(PrefixTable::new(), String::new());
        assert_eq!(model.classes.len(), 1);
        assert!(model.instances.is_empty());
    }

    #[test]
    fn builder_promotes_to_higher_category() {
        let mut builder = ModelBuilder::new();
        assert!(builder.add(classify_block(":Card rdfs:comment \"described first\"").unwrap()));
        assert!(builder.add(classify_block(":Card a rdf:Property").unwrap()));
        assert!(builder.add(classify_block(":Card a rdfs:Class ; rdfs:label \"Card\"").unwrap()));
        assert!(!builder.add(classify_block(":Card a rdf:Property").unwrap()));
        let model = builder.finish(PrefixTable::new(), String::new());
        assert_eq!(model.classes.len(), 1);
        assert_eq!(model.classes[0].label, "Card");
        assert!(model.properties.is_empty());
        assert!(model.instances.is_empty());
    }

    #[test]
    fn builder_last_ontology_wins() {
        let mut builder = ModelBuilder::new();
        builder.add(classify_block(":one a owl:Ontology ; rdfs:label \"One\"").unwrap());
        builder.add(classify_block(":two a owl:Ontology ; rdfs:label \"Two\"").unwrap());
        let model = builder.finish(PrefixTable::new(), String::new());
        assert_eq!(model.ontology.unwrap().label, "Two");
    }
}

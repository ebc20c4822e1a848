//! Parsed schema model handed to consumers.
//!
//! Everything here is built once per parse and never mutated afterwards.
//! URIs of classes, properties and instances are shortened (`prefix:local`)
//! where a declared prefix covers them; the ontology header keeps its
//! absolute URI.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A namespace binding from an `@prefix` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefix {
    /// Short name; empty for the default `:` prefix.
    pub prefix: String,
    /// Absolute namespace IRI.
    pub uri: String,
}

/// Document-level metadata from the `owl:Ontology` subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyHeader {
    /// Absolute URI of the ontology subject.
    pub uri: String,
    pub label: String,
    pub comment: String,
    /// Shortened `owl:imports` targets in source order.
    pub imports: Vec<String>,
}

/// An `rdfs:Class` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaClass {
    pub uri: String,
    /// `rdfs:label`, or the local name of `uri` when none is given.
    pub label: String,
    pub comment: String,
    /// First `rdfs:subClassOf` target, shortened; empty when absent.
    #[serde(rename = "subClassOf")]
    pub sub_class_of: String,
}

/// An `rdf:Property` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaProperty {
    pub uri: String,
    /// `rdfs:label`, or the local name of `uri` when none is given.
    pub label: String,
    pub comment: String,
    /// First `rdfs:domain`, shortened; empty when absent.
    pub domain: String,
    /// First `rdfs:range`, shortened; empty when absent.
    pub range: String,
}

/// Any other typed or described subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaInstance {
    pub uri: String,
    /// First `rdf:type`, shortened; empty for untyped subjects.
    #[serde(rename = "type")]
    pub type_: String,
    /// `schema:name`, or the local name of `uri`.
    pub name: String,
    /// Remaining predicates (everything but `rdf:type`).
    pub properties: PropertyMap,
}

/// Insertion-ordered map from shortened predicate to its values.
///
/// Keys are unique and keep first-seen order; serializes as a JSON object in
/// that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, Vec<String>)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`, creating the key at the end if new.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.push(k, v);
        }
        map
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PropertyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertyMapVisitor;

        impl<'de> Visitor<'de> for PropertyMapVisitor {
            type Value = PropertyMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from predicate to a list of values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PropertyMap, A::Error> {
                let mut map = PropertyMap::new();
                while let Some((key, values)) = access.next_entry::<String, Vec<String>>()? {
                    for value in values {
                        map.push(key.clone(), value);
                    }
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(PropertyMapVisitor)
    }
}

/// The complete result of parsing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTtl {
    pub prefixes: Vec<Prefix>,
    pub ontology: Option<OntologyHeader>,
    pub classes: Vec<SchemaClass>,
    pub properties: Vec<SchemaProperty>,
    pub instances: Vec<SchemaInstance>,
    /// The source text, verbatim.
    pub raw: String,
}

impl ParsedTtl {
    pub fn class(&self, uri: &str) -> Option<&SchemaClass> {
        self.classes.iter().find(|c| c.uri == uri)
    }

    pub fn property(&self, uri: &str) -> Option<&SchemaProperty> {
        self.properties.iter().find(|p| p.uri == uri)
    }

    pub fn instance(&self, uri: &str) -> Option<&SchemaInstance> {
        self.instances.iter().find(|i| i.uri == uri)
    }

    /// Properties whose domain is the given class.
    pub fn properties_of<'a>(&'a self, class_uri: &'a str) -> impl Iterator<Item = &'a SchemaProperty> {
        self.properties.iter().filter(move |p| p.domain == class_uri)
    }

    /// Instances whose type is the given class.
    pub fn instances_of<'a>(&'a self, class_uri: &'a str) -> impl Iterator<Item = &'a SchemaInstance> {
        self.instances.iter().filter(move |i| i.type_ == class_uri)
    }

    /// Whether no entity of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.ontology.is_none()
            && self.classes.is_empty()
            && self.properties.is_empty()
            && self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_map_keeps_first_seen_order() {
        let mut map = PropertyMap::new();
        map.push(":b", "1");
        map.push(":a", "2");
        map.push(":b", "3");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![":b", ":a"]);
        assert_eq!(map.get(":b").unwrap(), ["1", "3"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn property_map_serializes_in_order() {
        let map: PropertyMap = [(":z", "1"), (":a", "2"), (":z", "3")].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{":z":["1","3"],":a":["2"]}"#);

        let back: PropertyMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn instance_serializes_type_field() {
        let inst = SchemaInstance {
            uri: ":c1".into(),
            type_: ":Card".into(),
            name: "c1".into(),
            properties: PropertyMap::new(),
        };
        let value = serde_json::to_value(&inst).unwrap();
        assert_eq!(value["type"], ":Card");
    }

    #[test]
    fn default_document_is_empty() {
        assert!(ParsedTtl::default().is_empty());
    }
}

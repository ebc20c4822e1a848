//! Catalog loading tests against schema directories on disk.

use std::path::Path;

use turtle_schema::catalog::{CatalogConfig, CatalogError, SchemaCatalog, SchemaSource};

const BOOKS_TTL: &str = "@prefix : <http://ex.org/books#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
<http://ex.org/books> a owl:Ontology ; rdfs:label \"Books\" ; rdfs:comment \"A tiny book schema\" .
:Book a rdfs:Class .
:title a rdf:Property ; rdfs:domain :Book .
";

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn books_dir() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "books.ttl", BOOKS_TTL);
    write(
        dir.path(),
        "registry.toml",
        r#"
[[schema]]
id = "books"
name = "Books"
file = "books.ttl"
description = "Titles and nothing else"
"#,
    );
    dir
}

#[test]
fn open_loads_registered_schemas() {
    let dir = books_dir();
    let catalog = SchemaCatalog::open(dir.path()).unwrap();

    assert_eq!(catalog.len(), 1);
    let books = catalog.require("books").unwrap();
    assert_eq!(books.name, "Books");
    assert_eq!(books.description, "Titles and nothing else");
    assert_eq!(books.file_name, "books.ttl");
    assert_eq!(books.source, SchemaSource::File(dir.path().join("books.ttl")));
    assert_eq!(books.parsed.classes[0].uri, ":Book");
    assert_eq!(books.parsed.properties[0].domain, ":Book");
    assert_eq!(books.parsed.raw, BOOKS_TTL);
}

#[test]
fn discover_adds_directory_to_bundled() {
    let dir = books_dir();
    let catalog = SchemaCatalog::discover(dir.path());

    let ids: Vec<_> = catalog.list().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["card-game", "library", "books"]);
}

#[test]
fn missing_manifest_is_an_error_for_open_only() {
    let dir = tempfile::TempDir::new().unwrap();

    assert!(matches!(
        SchemaCatalog::open(dir.path()),
        Err(CatalogError::Io { .. })
    ));
    assert_eq!(SchemaCatalog::discover(dir.path()).len(), 2);
}

#[test]
fn malformed_manifest_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "registry.toml", "[[schema]]\nid = \"broken\"\n");

    assert!(matches!(
        SchemaCatalog::open(dir.path()),
        Err(CatalogError::Manifest { .. })
    ));
    assert_eq!(SchemaCatalog::discover(dir.path()).len(), 2);
}

#[test]
fn missing_schema_file_is_skipped_by_discover() {
    let dir = books_dir();
    let manifest = std::fs::read_to_string(dir.path().join("registry.toml")).unwrap();
    write(
        dir.path(),
        "registry.toml",
        &format!("{manifest}\n[[schema]]\nid = \"ghost\"\nname = \"Ghost\"\nfile = \"ghost.ttl\"\n"),
    );

    assert!(matches!(
        SchemaCatalog::open(dir.path()),
        Err(CatalogError::Io { .. })
    ));

    let catalog = SchemaCatalog::discover(dir.path());
    assert!(catalog.get("books").is_some());
    assert!(catalog.get("ghost").is_none());
}

#[test]
fn non_utf8_schema_file_is_a_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("bad.ttl"), [0xffu8, 0xfe, 0x00]).unwrap();
    write(
        dir.path(),
        "registry.toml",
        "[[schema]]\nid = \"bad\"\nname = \"Bad\"\nfile = \"bad.ttl\"\n",
    );

    assert!(matches!(
        SchemaCatalog::open(dir.path()),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn duplicate_ids_in_directory() {
    let dir = books_dir();
    write(
        dir.path(),
        "registry.toml",
        r#"
[[schema]]
id = "library"
name = "Shadowed library"
file = "books.ttl"

[[schema]]
id = "books"
name = "Books"
file = "books.ttl"

[[schema]]
id = "books"
name = "Books again"
file = "books.ttl"
"#,
    );

    assert!(matches!(
        SchemaCatalog::open(dir.path()),
        Err(CatalogError::Duplicate { id }) if id == "books"
    ));

    // Bundled ids win; the first "books" wins over the second.
    let catalog = SchemaCatalog::discover(dir.path());
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.require("library").unwrap().source, SchemaSource::Bundled);
    assert_eq!(catalog.require("books").unwrap().name, "Books");
}

#[test]
fn config_selects_sources() {
    let dir = books_dir();
    let config = CatalogConfig {
        schemas_dir: Some(dir.path().to_path_buf()),
        include_bundled: false,
    };
    let catalog = SchemaCatalog::from_config(&config);
    assert_eq!(catalog.len(), 1);
    assert!(catalog.get("books").is_some());

    let config: CatalogConfig = toml::from_str(&format!(
        "schemas_dir = {:?}\n",
        dir.path().display().to_string()
    ))
    .unwrap();
    assert!(config.include_bundled);
    assert_eq!(SchemaCatalog::from_config(&config).len(), 3);
}

#[test]
fn upload_uses_ontology_metadata() {
    let mut catalog = SchemaCatalog::bundled();
    let entry = catalog.add_upload("books.ttl", BOOKS_TTL);

    assert!(entry.id.starts_with("user-"));
    assert!(entry.is_user_uploaded());
    assert_eq!(entry.name, "Books");
    assert_eq!(entry.description, "A tiny book schema");
    assert_eq!(entry.source, SchemaSource::Upload);
    assert_eq!(catalog.len(), 3);
}

#[test]
fn upload_without_ontology_is_named_after_file() {
    let mut catalog = SchemaCatalog::empty();
    let id = catalog
        .add_upload("my-schema.ttl", ":A a <http://www.w3.org/2000/01/rdf-schema#Class> .\n")
        .id
        .clone();

    let entry = catalog.require(&id).unwrap();
    assert_eq!(entry.name, "my-schema");
    assert_eq!(entry.description, "");
    assert_eq!(entry.raw(), ":A a <http://www.w3.org/2000/01/rdf-schema#Class> .\n");

    let removed = catalog.remove(&id).unwrap();
    assert_eq!(removed.name, "my-schema");
    assert!(catalog.is_empty());
}

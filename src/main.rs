//! turtle-schema CLI: inspect and export Turtle ontology schemas.

use std::fmt::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use turtle_schema::ParsedTtl;
use turtle_schema::catalog::{CatalogConfig, SchemaCatalog};
use turtle_schema::export::{ModelSummary, to_json};

#[derive(Parser)]
#[command(name = "turtle-schema", version, about = "Turtle ontology schema inspector")]
struct Cli {
    /// Directory containing a registry.toml with additional schemas.
    #[arg(long, global = true)]
    schemas_dir: Option<PathBuf>,

    /// Leave the bundled schemas out of the catalog.
    #[arg(long, global = true)]
    no_bundled: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Turtle file and list its ontology, classes, properties and instances.
    Inspect {
        /// Path to the .ttl file.
        file: PathBuf,
    },

    /// Parse a Turtle file and print the model as JSON.
    Export {
        /// Path to the .ttl file.
        file: PathBuf,

        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Print the original text of a catalog schema.
    Raw {
        /// Schema id.
        id: String,
    },

    /// Browse the schema catalog.
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all schemas in the catalog.
    List,
    /// Show the parsed contents of a catalog schema.
    Show {
        /// Schema id.
        id: String,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = CatalogConfig {
        schemas_dir: cli.schemas_dir.clone(),
        include_bundled: !cli.no_bundled,
    };

    match cli.command {
        Commands::Inspect { file } => {
            let parsed = parse_file(&file)?;
            print_model(&parsed);
        }

        Commands::Export { file, pretty } => {
            let parsed = parse_file(&file)?;
            println!("{}", to_json(&parsed, pretty)?);
        }

        Commands::Raw { id } => {
            let catalog = SchemaCatalog::from_config(&config);
            let entry = catalog.require(&id)?;
            print!("{}", entry.raw());
        }

        Commands::Catalog { action } => {
            let catalog = SchemaCatalog::from_config(&config);
            match action {
                CatalogAction::List => {
                    if catalog.is_empty() {
                        println!("No schemas available.");
                    }
                    for entry in catalog.list() {
                        println!(
                            "  {:<16} {} - {}",
                            entry.id,
                            entry.name,
                            ModelSummary::of(&entry.parsed)
                        );
                        if !entry.description.is_empty() {
                            println!("  {:<16} {}", "", entry.description);
                        }
                    }
                }
                CatalogAction::Show { id } => {
                    let entry = catalog.require(&id)?;
                    println!("{} [{}] {}", entry.name, entry.file_name, entry.source);
                    if !entry.description.is_empty() {
                        println!("{}", entry.description);
                    }
                    println!();
                    print_model(&entry.parsed);
                }
            }
        }
    }

    Ok(())
}

fn parse_file(path: &std::path::Path) -> Result<ParsedTtl> {
    let data = std::fs::read(path).into_diagnostic()?;
    Ok(turtle_schema::parse_bytes(&data)?)
}

fn print_model(parsed: &ParsedTtl) {
    print!("{}", render_model(parsed));
}

/// Plain-text listing of a parsed model, one entity per line.
fn render_model(parsed: &ParsedTtl) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_model(&mut out, parsed);
    out
}

fn write_model(out: &mut String, parsed: &ParsedTtl) -> std::fmt::Result {
    if let Some(onto) = &parsed.ontology {
        writeln!(out, "Ontology: {} <{}>", onto.label, onto.uri)?;
        if !onto.comment.is_empty() {
            writeln!(out, "  {}", onto.comment)?;
        }
        for import in &onto.imports {
            writeln!(out, "  imports {import}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Classes ({}):", parsed.classes.len())?;
    for class in &parsed.classes {
        write!(out, "  {} \"{}\"", class.uri, class.label)?;
        if !class.sub_class_of.is_empty() {
            write!(out, " subClassOf {}", class.sub_class_of)?;
        }
        writeln!(out)?;
        if !class.comment.is_empty() {
            writeln!(out, "      {}", class.comment)?;
        }
    }

    writeln!(out, "Properties ({}):", parsed.properties.len())?;
    for prop in &parsed.properties {
        let domain = if prop.domain.is_empty() { "?" } else { prop.domain.as_str() };
        let range = if prop.range.is_empty() { "?" } else { prop.range.as_str() };
        writeln!(out, "  {} \"{}\" : {domain} -> {range}", prop.uri, prop.label)?;
    }

    writeln!(out, "Instances ({}):", parsed.instances.len())?;
    for inst in &parsed.instances {
        let type_ = if inst.type_.is_empty() { "-" } else { inst.type_.as_str() };
        writeln!(out, "  {} \"{}\" ({type_})", inst.uri, inst.name)?;
        for (predicate, values) in inst.properties.iter() {
            writeln!(out, "      {predicate} = {}", values.join(", "))?;
        }
    }
    Ok(())
}

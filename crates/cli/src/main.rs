//! umlscope CLI: thin shell over the [`umlscope_core`] library crate.
//!
//! Discovery, extraction and rendering all live in the core; this binary only
//! parses arguments, picks the output sink and reports results.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use umlscope_core::render::{render_plantuml, write_diagram, write_diagram_file, RenderOptions};
use umlscope_core::resolve::external_types;
use umlscope_core::{extract_project, load_umlscope_config};

/// umlscope: class diagrams from source trees.
#[derive(Parser)]
#[command(name = "umlscope", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the class model and write a PlantUML diagram
    Generate {
        /// Project root (default: current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Diagram path (default: from .umlscope.toml, else docs/uml/project-class-diagram.puml)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the diagram to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// List extracted types
    List {
        /// Project root (default: current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// List referenced but undeclared supertypes instead
        #[arg(long)]
        externals: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn resolve_root(root: Option<PathBuf>) -> PathBuf {
    let root = match root {
        Some(r) => r,
        None => std::env::current_dir()
            .unwrap_or_else(|e| fail(format!("Could not determine current directory: {e}"))),
    };
    root.canonicalize()
        .unwrap_or_else(|e| fail(format!("Path '{}' not found: {e}", root.display())))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => fail(format!("Could not serialize output: {e}")),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("umlscope=warn".parse().expect("static directive")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { root, output, stdout } => {
            let root = resolve_root(root);
            let mut config = load_umlscope_config(&root);
            if let Some(output) = output {
                config.output = output;
            }

            let registry = extract_project(&config);
            let document = render_plantuml(&registry, &RenderOptions::from_config(&config));
            debug!(types = registry.len(), bytes = document.len(), "Rendered diagram");

            if stdout {
                let mut out = std::io::stdout().lock();
                if let Err(e) = write_diagram(&document, &mut out) {
                    fail(format!("Could not write diagram: {e}"));
                }
                println!();
            } else {
                let path = config.output_path();
                if let Err(e) = write_diagram_file(&path, &document) {
                    fail(e);
                }
                info!(path = %path.display(), "Diagram written");
                println!("Wrote {}", path.display());
            }
        }
        Commands::List { root, externals } => {
            let root = resolve_root(root);
            let config = load_umlscope_config(&root);
            let registry = extract_project(&config);

            if externals {
                let names = external_types(&registry);
                if cli.json {
                    print_json(&names);
                } else {
                    for name in &names {
                        println!("{name}");
                    }
                    eprintln!("\n{} external types", names.len());
                }
                return;
            }

            let records = registry.sorted();
            if cli.json {
                print_json(&records);
            } else {
                if records.is_empty() {
                    eprintln!("No types found under {}", root.display());
                    std::process::exit(1);
                }
                for t in &records {
                    let mut supertypes: Vec<&str> = t.extends.iter().map(String::as_str).collect();
                    supertypes.extend(t.implements.iter().map(String::as_str));
                    println!(
                        "{:<10} {:<32} {:>3} fields {:>3} methods  {}",
                        t.kind.keyword(),
                        t.name,
                        t.fields.len(),
                        t.methods.len(),
                        supertypes.join(", ")
                    );
                }
                eprintln!("\n{} types", records.len());
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "umlscope", &mut std::io::stdout());
        }
    }
}

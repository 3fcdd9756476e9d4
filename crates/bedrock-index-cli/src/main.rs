//! bedrock-index CLI - find where Bedrock add-on definitions live

mod watch;

use bedrock_index_core::{
    config::CONFIG_FILE_NAME, DataType, DiskWorkspace, FileIndex, FileType, IndexConfig,
    LocationData, Workspace,
};
use clap::{Parser, Subcommand};
use colored::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "bedrock-index")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Find where Bedrock add-on definitions live",
    long_about = "Index the definitions of a Bedrock add-on workspace.\n\nIndexes: Animations • Controllers • Geometry • Materials • Particles • Entities • Sounds • Blocks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Workspace root (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file path (defaults to .bedrock-index.toml in the root)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// File to treat as the open document; nearer files are scanned first
    #[arg(long, global = true)]
    active: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every identifier of a file type
    List {
        /// File type (animation, geometry, server-entity, ...)
        file_type: FileType,

        /// Record kind (definition, events, component-groups)
        #[arg(short, long, default_value = "definition")]
        data_type: DataType,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Find where an identifier is defined
    Find {
        file_type: FileType,

        identifier: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve a texture reference such as textures/entity/cow
    Texture { reference: String },

    /// Index file types, then keep them current as files change
    Watch {
        /// File types to index (defaults to all)
        file_types: Vec<FileType>,
    },

    /// Initialize config file
    Init {
        /// Output path for config
        #[arg(default_value = CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Init { output } => init_command(output),
        _ => run_command(&cli),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Explicit `--config`, else the config file in the root if there is one
fn config_path(cli: &Cli, root: &Path) -> Option<PathBuf> {
    cli.config.clone().or_else(|| {
        let default = root.join(CONFIG_FILE_NAME);
        default.is_file().then_some(default)
    })
}

fn load_config(path: Option<&Path>) -> anyhow::Result<IndexConfig> {
    match path {
        Some(path) => IndexConfig::load(path)
            .map_err(|e| e.context(format!("invalid config file {}", path.display()))),
        None => Ok(IndexConfig::default()),
    }
}

/// Returns `Ok(false)` when the lookup found nothing
fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let config_path = config_path(cli, &cli.root);
    let config = load_config(config_path.as_deref())?;

    let workspace = Arc::new(DiskWorkspace::open(&cli.root, &config)?);
    if let Some(active) = &cli.active {
        let active = if active.is_absolute() {
            active.clone()
        } else {
            workspace.root().join(active)
        };
        workspace.set_active_document(Some(active));
    }

    let index = FileIndex::with_config(workspace.clone(), config);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match &cli.command {
        Commands::List {
            file_type,
            data_type,
            json,
        } => {
            let locations =
                runtime.block_on(index.get_all_of_type_by_data_type(*file_type, *data_type))?;
            let sorted: BTreeMap<_, _> = locations.iter().collect();

            if *json {
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            } else if sorted.is_empty() {
                println!("{}", format!("No {} {} found", file_type, data_type).yellow());
            } else {
                for (identifier, location) in &sorted {
                    println!(
                        "{} {}",
                        identifier.as_str().bold(),
                        format_location(location).dimmed()
                    );
                }
                println!();
                println!("Found {} {}", sorted.len(), plural(sorted.len(), "identifier"));
            }
            Ok(true)
        }
        Commands::Find {
            file_type,
            identifier,
            json,
        } => {
            let found = runtime.block_on(index.find_by_identifier(*file_type, identifier))?;

            match (&found, *json) {
                (_, true) => println!("{}", serde_json::to_string_pretty(&found)?),
                (Some(location), false) => println!("{}", format_location(location)),
                (None, false) => eprintln!(
                    "{} {} not found: {}",
                    "✗".red().bold(),
                    file_type,
                    identifier
                ),
            }
            Ok(found.is_some())
        }
        Commands::Texture { reference } => match index.get_texture(reference)? {
            Some(path) => {
                println!("{}", path.display());
                Ok(true)
            }
            None => {
                eprintln!("{} no unique texture for {}", "✗".red().bold(), reference);
                Ok(false)
            }
        },
        Commands::Watch { file_types } => {
            let file_types = if file_types.is_empty() {
                FileType::ALL.to_vec()
            } else {
                file_types.clone()
            };
            watch::watch_index(
                &runtime,
                &index,
                &workspace,
                &file_types,
                config_path.as_deref(),
            )?;
            Ok(true)
        }
        Commands::Init { output } => init_command(output),
    }
}

fn format_location(location: &LocationData) -> String {
    format!(
        "{}:{}:{}",
        location.path.display(),
        location.range.start.line + 1,
        location.range.start.character + 1
    )
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

fn init_command(output: &Path) -> anyhow::Result<bool> {
    let default_config = IndexConfig::default();
    let toml_content = toml::to_string_pretty(&default_config)?;

    std::fs::write(output, toml_content)?;

    println!(
        "{} Created config file: {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(true)
}

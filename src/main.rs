//! compdoc: extract component metadata documents from a compiled UI library.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use compdoc_common::ComponentDocument;
use compdoc_core::{
    CandidateKind, DirectoryProse, Generator, GeneratorConfig, NoProse, OutputFormat, ProseSource,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "compdoc",
    version,
    about = "Generate component metadata documents from a compiled UI library"
)]
struct Cli {
    /// Library root containing components/<group>/<component>
    #[arg(short, long, default_value = ".")]
    library: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the components and aliases that would be generated
    Discover,

    /// Generate documents for every discovered component
    Generate {
        /// Output directory
        #[arg(short, long, default_value = "docs")]
        output: PathBuf,

        /// Output format: json (default) or markdown
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Directory holding <component>.md prose files
        #[arg(long)]
        prose: Option<PathBuf>,
    },

    /// Print one component's document to stdout
    Inspect {
        /// Component or alias name
        name: String,

        /// Output format: json (default) or markdown
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !cli.library.is_dir() {
        bail!("Library root is not a directory: {:?}", cli.library);
    }
    let config = load_config(cli.config.as_deref())?;
    let mut generator = Generator::new(&cli.library, config);

    match cli.command {
        Commands::Discover => discover(&generator),
        Commands::Generate {
            output,
            format,
            prose,
        } => generate(&mut generator, &output, format, prose),
        Commands::Inspect { name, format } => inspect(&mut generator, &name, format),
    }
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            GeneratorConfig::from_file(path)
        }
        None => Ok(GeneratorConfig::default()),
    }
}

fn discover(generator: &Generator) -> Result<()> {
    let candidates = generator.discover();
    if candidates.is_empty() {
        println!("{}", "No components found".yellow());
        return Ok(());
    }

    for candidate in &candidates {
        match &candidate.kind {
            CandidateKind::Component => println!(
                "{} {} {}",
                candidate.name.green().bold(),
                format!("[{}]", candidate.category).cyan(),
                candidate.location.display().to_string().dimmed()
            ),
            CandidateKind::Alias { source } => println!(
                "{} {} {}",
                candidate.name.green().bold(),
                format!("[{}]", candidate.category).cyan(),
                format!("alias of {}", source).dimmed()
            ),
        }
    }
    println!("\n{} candidates", candidates.len().to_string().bold());
    Ok(())
}

fn generate(
    generator: &mut Generator,
    output: &Path,
    format: OutputFormat,
    prose_dir: Option<PathBuf>,
) -> Result<()> {
    let docs = generator.generate_all();
    let prose: Box<dyn ProseSource> = match prose_dir {
        Some(dir) => Box::new(DirectoryProse::new(dir)),
        None => Box::new(NoProse),
    };

    let written = compdoc_core::write_documents(output, &docs, prose.as_ref(), format)
        .context("Failed to write documents")?;

    for doc in &docs {
        print_summary(doc);
    }
    println!(
        "\n{} {} documents to {}",
        "Wrote".green().bold(),
        written.len(),
        output.display()
    );
    Ok(())
}

fn inspect(generator: &mut Generator, name: &str, format: OutputFormat) -> Result<()> {
    let candidate = generator
        .discover()
        .into_iter()
        .find(|c| c.name == name)
        .with_context(|| format!("Component {} was not discovered", name))?;

    let doc = generator.generate(&candidate);
    print!("{}", compdoc_core::render(&doc, &NoProse, format)?);
    Ok(())
}

fn print_summary(doc: &ComponentDocument) {
    let label = if doc.is_alias() {
        format!("{} (alias)", doc.name()).cyan()
    } else {
        doc.name().green()
    };
    println!(
        "  {} {} props, {} methods, {} events, {} styles",
        label,
        doc.props().len(),
        doc.methods().len(),
        doc.events().len(),
        doc.styles().len()
    );
}

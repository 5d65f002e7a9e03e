//! docchunk CLI - chunk assembly for parsed documents

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docchunk::{render, route_values, Assembly, Chunker, JsonFormat, RecordDecoder};

#[derive(Parser)]
#[command(name = "docchunk")]
#[command(version)]
#[command(about = "Assemble retrieval chunks from parsed document elements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble chunks from text elements, image captions, and table records
    Chunk {
        /// Text elements JSON in document order (the text_elements.json written by `route`)
        #[arg(value_name = "ELEMENTS")]
        elements: PathBuf,

        /// Image caption records JSON
        #[arg(long, value_name = "FILE")]
        images: Option<PathBuf>,

        /// Normalized table records JSON
        #[arg(long, value_name = "FILE")]
        tables: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Title of the chunk holding content before the first title
        #[arg(long, env = "DOCCHUNK_INTRO_TITLE")]
        intro_title: Option<String>,

        /// Attach each image and table to at most one chunk
        #[arg(long)]
        document_scope: bool,

        /// Validate input records on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Split classifier output into text, table, and image element files
    Route {
        /// Classifier elements JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show a summary of a chunks file
    Info {
        /// Chunks JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Characters of text to preview per chunk (0 = none)
        #[arg(long, default_value = "0")]
        preview: usize,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chunk {
            elements,
            images,
            tables,
            output,
            compact,
            intro_title,
            document_scope,
            sequential,
        } => {
            let mut chunker = Chunker::new();
            if let Some(title) = intro_title {
                chunker = chunker.with_intro_title(title);
            }
            if document_scope {
                chunker = chunker.document_scope();
            }
            if sequential {
                chunker = chunker.sequential();
            }
            cmd_chunk(
                &chunker,
                &elements,
                images.as_deref(),
                tables.as_deref(),
                output.as_deref(),
                compact,
            )
        }
        Commands::Route { input, output } => cmd_route(&input, output.as_deref()),
        Commands::Info { input, preview } => cmd_info(&input, preview),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read a JSON array file, or an empty array when no path is given.
fn read_records(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            log::debug!("Reading {}", p.display());
            fs::read_to_string(p)
                .map_err(|e| format!("Failed to read {}: {}", p.display(), e).into())
        }
        None => Ok("[]".to_string()),
    }
}

fn run_chunker(
    chunker: &Chunker,
    elements: &Path,
    images: Option<&Path>,
    tables: Option<&Path>,
    pb: &ProgressBar,
) -> Result<Assembly, Box<dyn std::error::Error>> {
    pb.set_message("Loading inputs...");
    let elements_json = read_records(Some(elements))?;
    let images_json = read_records(images)?;
    let tables_json = read_records(tables)?;
    pb.inc(1);

    pb.set_message("Assembling chunks...");
    let assembly = chunker.assemble_json(&elements_json, &images_json, &tables_json)?;
    pb.inc(1);

    Ok(assembly)
}

fn cmd_chunk(
    chunker: &Chunker,
    elements: &Path,
    images: Option<&Path>,
    tables: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    // Progress output would interleave with JSON written to stdout
    let pb = if output.is_some() {
        let pb = ProgressBar::new(3);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let assembly = run_chunker(chunker, elements, images, tables, &pb)?;

    pb.set_message("Writing chunks...");
    let json = assembly.to_json(format)?;
    pb.inc(1);

    let Some(path) = output else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, &json)?;
    pb.finish_with_message("Done!");

    let stats = &assembly.stats;
    println!("\n{}", "Chunking complete".green().bold());
    println!("  {} {}", "Saved to".green(), path.display());
    println!("  {}: {}", "Total chunks created".bold(), stats.chunk_count);
    println!(
        "  {}: {} text, {} image, {} table",
        "Content lines".bold(),
        stats.text_line_count,
        stats.image_attachments,
        stats.table_attachments
    );
    if stats.has_orphans() {
        println!(
            "  {}: {} image, {} table records matched no chunk",
            "Unattached".yellow().bold(),
            stats.unattached_images,
            stats.unattached_tables
        );
    }

    Ok(())
}

fn cmd_route(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&data)?;
    let routed = route_values(records)?;

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let buckets = [
        ("text_elements.json", &routed.text),
        ("table_elements.json", &routed.tables),
        ("image_elements.json", &routed.images),
    ];
    for (filename, records) in buckets {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(output_dir.join(filename), json)?;
    }

    println!("{}", "Routing complete".green().bold());
    println!("  {} Text elements : {}", "├─".dimmed(), routed.text.len());
    println!("  {} Table elements: {}", "├─".dimmed(), routed.tables.len());
    println!("  {} Image elements: {}", "└─".dimmed(), routed.images.len());

    Ok(())
}

fn cmd_info(input: &Path, preview: usize) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    let chunks = render::from_json(&data)?;

    let pages: std::collections::BTreeSet<u32> =
        chunks.iter().flat_map(|c| c.pages.iter().copied()).collect();
    let pages: Vec<u32> = pages.into_iter().collect();
    let count = |f: fn(&docchunk::ChunkSources) -> usize| -> usize {
        chunks.iter().map(|c| f(&c.sources)).sum()
    };

    println!("{}", "Chunk Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Chunks".bold(), chunks.len());
    println!("{}: {}", "Pages".bold(), render::format_pages(&pages));
    println!(
        "{}: {}",
        "Text elements".bold(),
        count(|s| s.text_elements.len())
    );
    println!(
        "{}: {}",
        "Image elements".bold(),
        count(|s| s.image_elements.len())
    );
    println!(
        "{}: {}",
        "Table elements".bold(),
        count(|s| s.table_elements.len())
    );

    if !chunks.is_empty() {
        println!();
        println!("{}", "Chunks".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", render::to_text(&chunks, preview));
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docchunk".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Chunk assembly for parsed documents");
    println!();
    println!("License: MIT");
}

//! recap CLI - summary layout tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use recap::render::{self, FlowOptions, HeuristicMeasurer, JsonFormat, SlideOptions};
use recap::{
    CleanupPreset, Lang, NormalizeOptions, Normalizer, SectionKey, StructuredDocument,
};

#[derive(Parser)]
#[command(name = "recap")]
#[command(version)]
#[command(about = "Render structured meeting summaries as paged documents and slide decks", long_about = None)]
struct Cli {
    /// Input summary record (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output language (detected from the input when omitted)
    #[arg(long, value_enum, global = true, env = "RECAP_LANG")]
    lang: Option<LangArg>,

    /// Transcript used for language detection and the fallback when the record is unreadable
    #[arg(long, value_name = "FILE", global = true)]
    transcript: Option<PathBuf>,

    /// Text cleanup preset
    #[arg(long, value_enum, global = true)]
    cleanup: Option<CleanupLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize and render to every format
    Convert {
        /// Input summary record (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Layout configuration (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the normalized record
    Normalize {
        /// Input summary record (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render as a paged document
    Flow {
        /// Input summary record (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file, or directory for SVG (stdout if not specified)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: FlowFormat,

        /// Layout configuration (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Render as a slide deck
    Slides {
        /// Input summary record (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: SlideFormat,

        /// Bullets per slide
        #[arg(long, default_value_t = render::DEFAULT_CHUNK_CAPACITY)]
        chunk: usize,
    },

    /// Show document information
    Info {
        /// Input summary record (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Layout configuration (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LangArg {
    /// Russian
    Ru,
    /// English
    En,
}

impl From<LangArg> for Lang {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::Ru => Lang::Ru,
            LangArg::En => Lang::En,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (whitespace only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FlowFormat {
    /// Plain text, one line per text run
    Text,
    /// Pages with draw operations as JSON
    Json,
    /// One SVG file per page
    Svg,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SlideFormat {
    /// Plain text, one block per slide
    Text,
    /// Slides as JSON
    Json,
}

/// Options shared by every subcommand.
struct InputSettings {
    lang: Option<Lang>,
    transcript: Option<PathBuf>,
    cleanup: Option<CleanupLevel>,
}

impl InputSettings {
    fn load(&self, input: &Path) -> Result<StructuredDocument, Box<dyn std::error::Error>> {
        let mut options = NormalizeOptions::new();
        if let Some(lang) = self.lang {
            options = options.with_lang(lang);
        }
        if let Some(ref path) = self.transcript {
            options = options.with_transcript(fs::read_to_string(path)?);
        }
        if let Some(level) = self.cleanup {
            options = options.with_cleanup_preset(level.into());
        }

        let data = fs::read(input)?;
        Ok(Normalizer::new(options).normalize_bytes(&data))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let settings = InputSettings {
        lang: cli.lang.map(Lang::from),
        transcript: cli.transcript,
        cleanup: cli.cleanup,
    };

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            config,
        }) => cmd_convert(&settings, &input, output.as_deref(), config.as_deref()),
        Some(Commands::Normalize {
            input,
            output,
            compact,
        }) => cmd_normalize(&settings, &input, output.as_deref(), compact),
        Some(Commands::Flow {
            input,
            output,
            format,
            config,
        }) => cmd_flow(&settings, &input, output.as_deref(), format, config.as_deref()),
        Some(Commands::Slides {
            input,
            output,
            format,
            chunk,
        }) => cmd_slides(&settings, &input, output.as_deref(), format, chunk),
        Some(Commands::Info { input, config }) => cmd_info(&settings, &input, config.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&settings, &input, cli.output.as_deref(), None)
            } else {
                println!("{}", "Usage: recap <FILE> [OUTPUT]".yellow());
                println!("       recap --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn flow_options(config: Option<&Path>) -> recap::Result<FlowOptions> {
    match config {
        Some(path) => {
            log::info!("Loading layout configuration from {}", path.display());
            FlowOptions::from_json_file(path)
        }
        None => Ok(FlowOptions::default()),
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    settings: &InputSettings,
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Normalizing record...");
    let doc = settings.load(input)?;
    let json = render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("document.json"), &json)?;
    pb.inc(1);

    pb.set_message("Paginating...");
    let options = flow_options(config)?;
    let pages = render::render_flow(&doc, &HeuristicMeasurer::default(), &options)?;
    fs::write(
        output_dir.join("pages.json"),
        render::to_json(&pages, JsonFormat::Pretty)?,
    )?;
    fs::write(output_dir.join("pages.txt"), render::pages_to_text(&pages)?)?;
    pb.inc(1);

    pb.set_message("Drawing SVG pages...");
    write_svg_pages(&output_dir.join("pages"), &render::pages_to_svg(&pages)?)?;
    pb.inc(1);

    pb.set_message("Chunking slides...");
    let slides = render::render_slides(&doc, &SlideOptions::default());
    fs::write(
        output_dir.join("slides.json"),
        render::to_json(&slides, JsonFormat::Pretty)?,
    )?;
    fs::write(output_dir.join("slides.txt"), render::slides_to_text(&slides))?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} document.json", "├─".dimmed());
    println!("  {} pages.json", "├─".dimmed());
    println!("  {} pages.txt", "├─".dimmed());
    println!("  {} pages/ ({} SVG)", "├─".dimmed(), pages.len());
    println!("  {} slides.json", "├─".dimmed());
    println!("  {} slides.txt", "└─".dimmed());

    Ok(())
}

fn write_svg_pages(dir: &Path, svgs: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    for (i, svg) in svgs.iter().enumerate() {
        fs::write(dir.join(format!("page-{:03}.svg", i + 1)), svg)?;
    }
    Ok(())
}

fn cmd_normalize(
    settings: &InputSettings,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = settings.load(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_flow(
    settings: &InputSettings,
    input: &Path,
    output: Option<&Path>,
    format: FlowFormat,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = settings.load(input)?;
    let options = flow_options(config)?;
    let pages = render::render_flow(&doc, &HeuristicMeasurer::default(), &options)?;

    match format {
        FlowFormat::Text => write_or_print(output, &render::pages_to_text(&pages)?),
        FlowFormat::Json => write_or_print(output, &render::to_json(&pages, JsonFormat::Pretty)?),
        FlowFormat::Svg => {
            let svgs = render::pages_to_svg(&pages)?;
            match output {
                Some(dir) => {
                    write_svg_pages(dir, &svgs)?;
                    println!(
                        "{} {} pages to {}",
                        "Saved".green(),
                        svgs.len(),
                        dir.display()
                    );
                    Ok(())
                }
                None => {
                    for svg in &svgs {
                        print!("{}", svg);
                    }
                    Ok(())
                }
            }
        }
    }
}

fn cmd_slides(
    settings: &InputSettings,
    input: &Path,
    output: Option<&Path>,
    format: SlideFormat,
    chunk: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = settings.load(input)?;
    let slides = render::render_slides(&doc, &SlideOptions::new().with_chunk_capacity(chunk));

    let content = match format {
        SlideFormat::Text => render::slides_to_text(&slides),
        SlideFormat::Json => render::to_json(&slides, JsonFormat::Pretty)?,
    };
    write_or_print(output, &content)
}

fn cmd_info(
    settings: &InputSettings,
    input: &Path,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = settings.load(input)?;
    let options = flow_options(config)?;
    let result =
        render::render_flow_with_stats(&doc, &HeuristicMeasurer::default(), &options)?;
    let slides = render::render_slides(&doc, &SlideOptions::default());

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), doc.title);
    println!("{}: {}", "Language".bold(), doc.lang);
    println!("{}: {}", "Created".bold(), doc.created_at);
    if !doc.short_description.is_empty() {
        println!("{}: {}", "Description".bold(), doc.short_description);
    }

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for key in SectionKey::ALL {
        let count = doc.section(key).map(|s| s.bullets.len()).unwrap_or(0);
        let heading = recap::resolve(doc.lang, key);
        if count == 0 {
            println!("{}: {}", heading.bold(), "empty".dimmed());
        } else {
            println!("{}: {}", heading.bold(), count);
        }
    }

    println!();
    println!("{}", "Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Pages".bold(), result.stats.page_count);
    println!("{}: {}", "Body lines".bold(), result.stats.line_count);
    println!("{}: {}", "Overflow breaks".bold(), result.stats.overflow_breaks);
    println!(
        "{}: {}",
        "Lines per page".bold(),
        options.geometry.body_lines_per_page()?
    );
    println!("{}: {}", "Slides".bold(), slides.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "recap".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Summary layout tool");
    println!();
    println!("License: MIT");
}

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scribepad::config::Config;
use scribepad::draw::{DrawingSurface, SheetLayout, SurfaceSettings, compose_sheet};
use scribepad::export::{ExportedImage, FileSaveConfig, file};
use scribepad::replay::StrokeScript;
use scribepad::submit::{self, DirectoryGenerator, DirectorySink, GlyphCache};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "scribepad")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SCRIBEPAD_GIT_HASH"), ")"),
    about = "Handwriting capture surface with PNG export"
)]
struct Cli {
    /// Config file to use instead of ~/.config/scribepad/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a stroke script and export the result
    Render {
        /// JSON stroke script
        script: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Export an untouched surface
    Blank {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build a glyph sheet for a line of text from a directory of <char>.png files
    Compose {
        /// Directory holding one PNG per character
        #[arg(long, value_name = "DIR")]
        glyphs: PathBuf,

        /// Text to lay out; spaces become blank tiles
        #[arg(long)]
        text: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Replay a stroke script and store it as a labelled training sample
    Submit {
        /// JSON stroke script
        script: PathBuf,

        /// What the drawing depicts
        #[arg(long)]
        label: String,

        /// Contributor name
        #[arg(long)]
        user: String,

        /// Sample directory (defaults to export.save_directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Count stored samples per contributor, highest first
    Leaderboard {
        /// Sample directory (defaults to export.save_directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Write the documented default config file
    InitConfig,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write the PNG here instead of the configured save directory
    #[arg(long, short = 'o', value_name = "FILE", conflicts_with = "data_url")]
    output: Option<PathBuf>,

    /// Print a data:image/png;base64 URL to stdout instead of writing a file
    #[arg(long)]
    data_url: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::get_config_path()?,
    };

    let load_config = || Config::load_from(&config_path);

    match cli.command {
        Command::InitConfig => {
            Config::create_default_file(&config_path)?;
            println!("Created {}", config_path.display());
        }
        Command::Render { script, output } => {
            let config = load_config()?;
            let script = StrokeScript::load(&script)?;
            let mut surface = new_surface(&config)?;
            script.apply(&mut surface);
            let image = surface.export_image()?;
            emit(&image, &output, &config, None)?;
        }
        Command::Blank { output } => {
            let config = load_config()?;
            let surface = new_surface(&config)?;
            emit(&surface.export_image()?, &output, &config, None)?;
        }
        Command::Compose {
            glyphs,
            text,
            output,
        } => {
            let config = load_config()?;
            let mut generator = DirectoryGenerator::new(glyphs);
            let mut cache = GlyphCache::new();
            let line = cache
                .render_text(&text, &mut generator)
                .with_context(|| format!("Failed to generate glyphs for {text:?}"))?;
            log::debug!("{} distinct glyphs for {} positions", cache.len(), line.len());
            let tiles = submit::glyph_tiles(&line)?;
            let sheet = compose_sheet(
                &tiles,
                SheetLayout::from(&config.sheet),
                config.canvas.background_color.to_color(),
            )?;
            emit(&sheet, &output, &config, Some(&text))?;
        }
        Command::Submit {
            script,
            label,
            user,
            dir,
        } => {
            let config = load_config()?;
            let script = StrokeScript::load(&script)?;
            let mut surface = new_surface(&config)?;
            script.apply(&mut surface);

            let mut sink = sample_sink(&config, dir);
            let receipt = submit::submit_drawing(&mut surface, &mut sink, &label, &user)
                .context("Submission failed")?;
            println!("{}", receipt.file_id);
        }
        Command::Leaderboard { dir } => {
            let sink = sample_sink(&load_config()?, dir);
            let entries = sink.leaderboard().context("Failed to read the sample index")?;
            for entry in entries {
                println!("{} {}", entry.user, entry.score);
            }
        }
    }

    Ok(())
}

fn new_surface(config: &Config) -> Result<DrawingSurface> {
    DrawingSurface::new(SurfaceSettings::from(&config.canvas))
        .context("Failed to create drawing surface")
}

fn sample_sink(config: &Config, dir: Option<PathBuf>) -> DirectorySink {
    let mut save_config = FileSaveConfig::from(&config.export);
    if let Some(dir) = dir {
        save_config.save_directory = dir;
    }
    DirectorySink::new(save_config)
}

fn emit(
    image: &ExportedImage,
    output: &OutputArgs,
    config: &Config,
    label: Option<&str>,
) -> Result<()> {
    if output.data_url {
        println!("{}", image.to_data_url());
        return Ok(());
    }

    match &output.output {
        Some(path) => {
            write_to(path, image)?;
            println!("{}", path.display());
        }
        None => {
            let saved = file::save_image(image, label, &FileSaveConfig::from(&config.export))?;
            log::info!("Saved {} bytes", saved.size_bytes);
            println!("{}", saved.path.display());
        }
    }
    Ok(())
}

fn write_to(path: &Path, image: &ExportedImage) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        file::ensure_directory_exists(parent)?;
    }
    file::write_png(path, &image.png)
        .with_context(|| format!("Failed to write {}", path.display()))
}

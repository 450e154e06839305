use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use imgscribe::draw::Annotation;
use imgscribe::engine::{AnnotationEngine, EngineOptions, FileImageLoader, ImageState};
use imgscribe::export::file::{expand_tilde, write_download};
use imgscribe::{Config, replay};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "imgscribe")]
#[command(version, about = "Annotate images with freehand, shape and text markup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten an image and its saved annotations into a PNG
    Render {
        /// Source image path or file:// URL
        #[arg(long, short = 'i', value_name = "URL|PATH")]
        image: String,

        /// JSON file with the annotation list to draw
        #[arg(long, short = 'a', value_name = "FILE")]
        annotations: Option<PathBuf>,

        /// Container to fit the image into (defaults to the natural size)
        #[arg(long, value_name = "WxH")]
        container: Option<Container>,

        /// Output PNG (defaults to the configured export directory)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run a JSON script of host actions against an image and save the result
    Replay {
        /// Source image path or file:// URL
        #[arg(long, short = 'i', value_name = "URL|PATH")]
        image: String,

        /// JSON array of actions to perform
        #[arg(long, short = 's', value_name = "FILE")]
        script: PathBuf,

        /// JSON file with annotations to start from
        #[arg(long, short = 'a', value_name = "FILE")]
        annotations: Option<PathBuf>,

        /// Container to fit the image into (defaults to the natural size)
        #[arg(long, value_name = "WxH")]
        container: Option<Container>,

        /// Output PNG (defaults to the configured export directory)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Where to write the resulting annotation list as JSON
        #[arg(long, value_name = "FILE")]
        annotations_out: Option<PathBuf>,
    },
}

/// Container dimensions given as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy)]
struct Container {
    width: f64,
    height: f64,
}

impl FromStr for Container {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or_else(|| format!("invalid dimension '{part}'"))
        };
        Ok(Self {
            width: parse(width)?,
            height: parse(height)?,
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|err| {
        log::warn!("Failed to load config: {err:#}; using defaults");
        Config::default()
    });

    match cli.command {
        Command::Render {
            image,
            annotations,
            container,
            output,
        } => {
            let engine = open_session(&image, annotations.as_deref(), container, &config)?;
            write_output(&engine, output.as_deref(), &config)?;
        }
        Command::Replay {
            image,
            script,
            annotations,
            container,
            output,
            annotations_out,
        } => {
            let json = fs::read_to_string(&script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let actions = replay::parse_script(&json)
                .with_context(|| format!("Failed to parse script {}", script.display()))?;

            let mut engine = open_session(&image, annotations.as_deref(), container, &config)?;
            for (index, action) in actions.iter().enumerate() {
                action
                    .apply(&mut engine)
                    .with_context(|| format!("Script action {} failed", index + 1))?;
            }
            log::info!(
                "Replayed {} action(s); {} annotation(s) committed",
                actions.len(),
                engine.annotations().len()
            );

            write_output(&engine, output.as_deref(), &config)?;

            if let Some(path) = annotations_out {
                let json = serde_json::to_string_pretty(engine.annotations())?;
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write annotations to {}", path.display()))?;
            }
        }
    }

    Ok(())
}

/// Builds an engine over `image`, seeded from `annotations`, and waits for the decode.
fn open_session(
    image: &str,
    annotations: Option<&Path>,
    container: Option<Container>,
    config: &Config,
) -> Result<AnnotationEngine> {
    let initial_annotations = match annotations {
        Some(path) => load_annotations(path)?,
        None => Vec::new(),
    };

    let mut engine = AnnotationEngine::new(
        EngineOptions {
            image_url: image.to_string(),
            initial_annotations,
            container: container.map(|container| (container.width, container.height)),
            ..Default::default()
        },
        config,
    );

    engine.load_image(&FileImageLoader);
    if let ImageState::Failed(err) = engine.image_state() {
        bail!("Failed to load image {}: {err}", engine.image_url());
    }

    if container.is_none()
        && let Some((width, height)) = engine.natural_size()
    {
        engine.resize_container(width as f64, height as f64);
    }

    Ok(engine)
}

fn load_annotations(path: &Path) -> Result<Vec<Annotation>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read annotations from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse annotations from {}", path.display()))
}

/// Writes the flattened image to `output`, or the export directory when unset.
fn write_output(engine: &AnnotationEngine, output: Option<&Path>, config: &Config) -> Result<()> {
    let (directory, filename) = match output {
        Some(path) => (
            path.parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            path.file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default()
                .to_string(),
        ),
        None => (expand_tilde(&config.export.save_directory), String::new()),
    };

    let download = engine.download(&filename)?;
    let path = write_download(&download, &directory)?;
    println!("{}", path.display());
    Ok(())
}

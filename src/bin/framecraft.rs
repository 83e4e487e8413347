use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use framecraft::{BubbleMode, CompositeOpts, MediaConfig, MediaProcessor, Processed, Rgb24};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framecraft", version, about = "Edit animated and still images")]
struct Cli {
    /// JSON config (size limit, compressor tuning, container templates).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip the size-limit compressor.
    #[arg(long, global = true)]
    no_compress: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct Io {
    /// Input media.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; the format follows the input unless it had to become animated.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Change playback speed.
    Speed {
        #[command(flatten)]
        io: Io,
        /// >1 plays faster.
        #[arg(long)]
        multiplier: f32,
    },
    /// Keep every n-th frame.
    Fps {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        ratio: u32,
    },
    /// Scale both axes by one factor.
    Resize {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        factor: f32,
        /// Nearest-neighbour, no smoothing.
        #[arg(long)]
        raw: bool,
    },
    /// Scale each axis independently.
    Stretch {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        width: f32,
        #[arg(long)]
        height: f32,
        #[arg(long)]
        raw: bool,
    },
    /// Rotate clockwise.
    Rotate {
        #[command(flatten)]
        io: Io,
        #[arg(long, allow_hyphen_values = true)]
        degrees: f32,
        /// Background colour, e.g. `#ffffff`; transparent when omitted.
        #[arg(long)]
        background: Option<Rgb24>,
    },
    /// Draw another image on top.
    Overlay {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        overlay: PathBuf,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        y: i32,
        /// Grow the canvas so the overlay is not clipped.
        #[arg(long)]
        expand: bool,
        #[arg(long)]
        expand_color: Option<Rgb24>,
    },
    /// Fill the shape of a stencil with a solid colour.
    Cutout {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        stencil: PathBuf,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        y: i32,
        #[arg(long, default_value = "#ffffff")]
        fill: Rgb24,
    },
    /// Put a speech bubble across the top.
    Bubble {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        bubble: PathBuf,
        #[arg(long, value_enum, default_value_t = BubbleChoice::Overlay)]
        mode: BubbleChoice,
        /// Fill for `--mode cutout`.
        #[arg(long, default_value = "#ffffff")]
        fill: Rgb24,
    },
    /// Place the media inside a configured container template.
    Container {
        #[command(flatten)]
        io: Io,
        /// Template image.
        #[arg(long)]
        template_image: PathBuf,
        /// Template name from the config file.
        #[arg(long)]
        template: String,
    },
    /// Only shrink to the size limit.
    Compress {
        #[command(flatten)]
        io: Io,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BubbleChoice {
    Overlay,
    Cutout,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => MediaConfig::from_path(path)?,
        None => MediaConfig::default(),
    };
    if cli.no_compress {
        config.compress_output = false;
    }
    let processor = MediaProcessor::new(config).context("build media processor")?;

    let (io, processed) = match cli.cmd {
        Command::Speed { io, multiplier } => {
            let out = processor.speed(&read(&io.in_path)?, multiplier)?;
            (io, out)
        }
        Command::Fps { io, ratio } => {
            let out = processor.reduce_fps(&read(&io.in_path)?, ratio)?;
            (io, out)
        }
        Command::Resize { io, factor, raw } => {
            let out = processor.resize(&read(&io.in_path)?, factor, raw)?;
            (io, out)
        }
        Command::Stretch {
            io,
            width,
            height,
            raw,
        } => {
            let out = processor.stretch(&read(&io.in_path)?, width, height, raw)?;
            (io, out)
        }
        Command::Rotate {
            io,
            degrees,
            background,
        } => {
            let out = processor.rotate(&read(&io.in_path)?, degrees, background)?;
            (io, out)
        }
        Command::Overlay {
            io,
            overlay,
            x,
            y,
            expand,
            expand_color,
        } => {
            let opts = CompositeOpts {
                x,
                y,
                expand,
                expand_color: expand_color.map(Rgb24::to_rgba),
            };
            let out = processor.overlay(&read(&io.in_path)?, &read(&overlay)?, &opts)?;
            (io, out)
        }
        Command::Cutout {
            io,
            stencil,
            x,
            y,
            fill,
        } => {
            let out = processor.cutout(&read(&io.in_path)?, &read(&stencil)?, x, y, fill)?;
            (io, out)
        }
        Command::Bubble {
            io,
            bubble,
            mode,
            fill,
        } => {
            let mode = match mode {
                BubbleChoice::Overlay => BubbleMode::Overlay,
                BubbleChoice::Cutout => BubbleMode::Cutout { fill },
            };
            let out = processor.speech_bubble(&read(&io.in_path)?, &read(&bubble)?, mode)?;
            (io, out)
        }
        Command::Container {
            io,
            template_image,
            template,
        } => {
            let out = processor.fill_container(
                &read(&io.in_path)?,
                &read(&template_image)?,
                &template,
            )?;
            (io, out)
        }
        Command::Compress { io } => {
            let out = processor.compress(&read(&io.in_path)?)?;
            (io, out)
        }
    };

    write(&io.out, &processed)
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read media '{}'", path.display()))
}

fn write(path: &Path, processed: &Processed) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, &processed.bytes)
        .with_context(|| format!("write media '{}'", path.display()))?;
    eprintln!(
        "wrote {} ({:?}, {}x{}, {} frame(s), {} bytes)",
        path.display(),
        processed.format,
        processed.width,
        processed.height,
        processed.frame_count,
        processed.bytes.len()
    );
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use qrforge::{
    ClipShape, EcLevel, ExportFormat, GradientDirection, ImageSource, ModuleStyle, Rgba8,
    StyleOptions, WatermarkOptions,
};

#[derive(Parser, Debug)]
#[command(name = "qrforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a styled QR code image.
    Generate(GenerateArgs),
    /// Blend a photograph into a QR code while keeping it scannable.
    Blend(BlendArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Payload text (a URL, vCard document, WIFI: string, ...).
    #[arg(long)]
    text: String,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Export format (png, jpeg, webp, svg, pdf); inferred from the output
    /// extension when omitted.
    #[arg(long)]
    format: Option<String>,

    /// Style options JSON document; individual flags override its fields.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Raster width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Quiet-zone width in modules.
    #[arg(long)]
    margin: Option<u32>,

    /// Error correction level (L, M, Q or H).
    #[arg(long)]
    ec: Option<String>,

    /// Dark module color (#RRGGBB).
    #[arg(long)]
    dark: Option<String>,

    /// Light module color (#RRGGBB).
    #[arg(long)]
    light: Option<String>,

    /// Clip shape (circle, rounded-square, heart, star, spiral, ...).
    #[arg(long)]
    shape: Option<String>,

    /// Comma-separated gradient stops for dark modules (#RRGGBB,#RRGGBB).
    #[arg(long)]
    gradient: Option<String>,

    /// Gradient axis (horizontal, vertical, diagonal).
    #[arg(long)]
    gradient_direction: Option<String>,

    /// Data module style (square, rounded, circle).
    #[arg(long)]
    pattern_style: Option<String>,

    /// Finder pattern style (square, rounded, circle).
    #[arg(long)]
    corner_style: Option<String>,

    /// Logo image (path or data URI). Pair with --ec H.
    #[arg(long)]
    logo: Option<String>,

    /// Logo width as a fraction of the raster width.
    #[arg(long)]
    logo_size: Option<f32>,

    /// Watermark text drawn near the bottom-right corner.
    #[arg(long)]
    watermark: Option<String>,

    /// Font file for the watermark text.
    #[arg(long)]
    watermark_font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BlendArgs {
    /// Payload text to encode.
    #[arg(long)]
    text: String,

    /// Photograph to blend (path or data URI).
    #[arg(long)]
    photo: String,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Export format (png, jpeg, webp, svg, pdf); inferred from the output
    /// extension when omitted.
    #[arg(long)]
    format: Option<String>,

    /// Raster width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Error correction level; blends default to H to buy occlusion budget.
    #[arg(long, default_value = "H")]
    ec: String,

    /// Overlay opacity in [0, 1]: how hard the QR is stamped into the
    /// photo. Higher favors scan reliability, lower favors the photo.
    #[arg(long, default_value_t = 0.7)]
    overlay_opacity: f32,

    /// Contrast multiplier pre-applied to the photo.
    #[arg(long, default_value_t = 1.5)]
    contrast: f32,

    /// Brightness multiplier pre-applied to the photo.
    #[arg(long, default_value_t = 0.8)]
    brightness: f32,

    /// Skip the contrast/brightness pre-filter.
    #[arg(long, default_value_t = false)]
    no_enhance: bool,

    /// Watermark text drawn near the bottom-right corner.
    #[arg(long)]
    watermark: Option<String>,

    /// Font file for the watermark text.
    #[arg(long)]
    watermark_font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Blend(args) => cmd_blend(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut options = load_options(args.options.as_deref())?;

    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(margin) = args.margin {
        options.margin = margin;
    }
    if let Some(ec) = &args.ec {
        options.error_correction_level = EcLevel::parse(ec)?;
    }
    if let Some(dark) = &args.dark {
        options.color.dark = parse_color(dark)?;
    }
    if let Some(light) = &args.light {
        options.color.light = parse_color(light)?;
    }
    if let Some(shape) = &args.shape {
        options.shape = ClipShape::parse(shape)?;
    }
    if let Some(gradient) = &args.gradient {
        options.gradient_colors = gradient
            .split(',')
            .map(parse_color)
            .collect::<anyhow::Result<Vec<Rgba8>>>()?;
    }
    if let Some(dir) = &args.gradient_direction {
        options.gradient_direction = GradientDirection::parse(dir)?;
    }
    if let Some(style) = &args.pattern_style {
        options.pattern_style = ModuleStyle::parse(style)?;
    }
    if let Some(style) = &args.corner_style {
        options.corner_style = ModuleStyle::parse(style)?;
    }
    if let Some(logo) = &args.logo {
        options.logo = Some(logo.clone());
    }
    if let Some(logo_size) = args.logo_size {
        options.logo_size = logo_size;
    }

    let mut raster = qrforge::generate(&args.text, &options)?;
    if let Some(text) = args.watermark {
        raster = qrforge::watermarked(
            raster,
            &WatermarkOptions {
                text,
                font_path: args.watermark_font,
            },
        );
    }

    write_output(&raster, &args.out, args.format.as_deref())
}

fn cmd_blend(args: BlendArgs) -> anyhow::Result<()> {
    let mut options = StyleOptions {
        error_correction_level: EcLevel::parse(&args.ec)?,
        overlay_opacity: args.overlay_opacity,
        contrast_level: args.contrast,
        brightness: args.brightness,
        enhance_contrast: !args.no_enhance,
        ..StyleOptions::default()
    };
    if let Some(width) = args.width {
        options.width = width;
    }

    let photo = ImageSource::from_user_str(&args.photo);
    let mut raster = qrforge::generate_photo_blend(&args.text, &photo, &options)?;
    if let Some(text) = args.watermark {
        raster = qrforge::watermarked(
            raster,
            &WatermarkOptions {
                text,
                font_path: args.watermark_font,
            },
        );
    }

    write_output(&raster, &args.out, args.format.as_deref())
}

fn load_options(path: Option<&Path>) -> anyhow::Result<StyleOptions> {
    let Some(path) = path else {
        return Ok(StyleOptions::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read options '{}'", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parse options '{}'", path.display()))
}

fn parse_color(s: &str) -> anyhow::Result<Rgba8> {
    Rgba8::parse_hex(s).map_err(|e| anyhow::anyhow!("{e}"))
}

fn write_output(
    raster: &image::RgbaImage,
    out: &Path,
    format: Option<&str>,
) -> anyhow::Result<()> {
    let format = match format {
        Some(name) => ExportFormat::parse(name)?,
        None => out
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| ExportFormat::parse(e).ok())
            .unwrap_or(ExportFormat::Png),
    };

    let bytes = qrforge::export_raster(raster, format)?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
    }
    std::fs::write(out, bytes).with_context(|| format!("write '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "reviewgrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a board spec as a PNG.
    Render(RenderArgs),
    /// Print a built-in theme as JSON (a starting point for custom themes).
    Theme(ThemeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input render spec JSON (`cells`, `gridSize`, `username`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Regular font file (TTF/OTF).
    #[arg(long, required_unless_present = "mono")]
    font: Option<PathBuf>,

    /// Bold font file used for the title and pills.
    #[arg(long)]
    bold_font: Option<PathBuf>,

    /// Lay text out with fixed-advance metrics and draw no glyphs (layout preview).
    #[arg(long, conflicts_with_all = ["font", "bold_font", "dump_fonts"])]
    mono: bool,

    /// Preset name (`daylight`, `slate`) or path to a theme JSON file.
    #[arg(long, default_value = "daylight")]
    theme: String,

    /// Footer logo image.
    #[arg(long)]
    logo: Option<String>,

    /// Image loading threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Print diagnostics about the loaded fonts (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct ThemeArgs {
    /// Preset name.
    #[arg(default_value = "daylight")]
    name: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Theme(args) => cmd_theme(args),
    }
}

fn resolve_theme(arg: &str) -> anyhow::Result<reviewgrid::Theme> {
    if let Some(theme) = reviewgrid::Theme::preset(arg) {
        return Ok(theme);
    }
    let path = Path::new(arg);
    if !path.exists() {
        anyhow::bail!("unknown theme '{arg}' (expected daylight, slate or a JSON file)");
    }
    Ok(reviewgrid::Theme::from_path(path)?)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let spec = reviewgrid::RenderSpec::from_path(&args.in_path)
        .with_context(|| format!("load render spec '{}'", args.in_path.display()))?;
    spec.validate()?;

    let assets_root = args
        .in_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let opts = reviewgrid::RasterOpts {
        theme: resolve_theme(&args.theme)?,
        fonts: reviewgrid::FontConfig {
            regular: args.font.clone().unwrap_or_default(),
            bold: args.bold_font.clone(),
        },
        logo: args.logo.clone(),
        assets_root: assets_root.to_path_buf(),
        threads: args.threads,
    };

    let mut rasterizer = if args.mono {
        reviewgrid::Rasterizer::with_shaper(opts, reviewgrid::MonoMetrics::new())?
    } else {
        if args.dump_fonts {
            dump_font_diagnostics(&opts.fonts)?;
        }
        reviewgrid::Rasterizer::new(opts)?
    };

    let image = rasterizer.render(&spec)?;
    image.save(&args.out)?;

    eprintln!("wrote {} ({}x{})", args.out.display(), image.width, image.height);
    Ok(())
}

fn cmd_theme(args: ThemeArgs) -> anyhow::Result<()> {
    let theme = reviewgrid::Theme::preset(&args.name)
        .with_context(|| format!("unknown theme preset '{}'", args.name))?;
    println!("{}", serde_json::to_string_pretty(&theme)?);
    Ok(())
}

fn dump_font_diagnostics(fonts: &reviewgrid::FontConfig) -> anyhow::Result<()> {
    let regular = std::fs::read(&fonts.regular)
        .with_context(|| format!("read font '{}'", fonts.regular.display()))?;
    let bold = match &fonts.bold {
        Some(p) => Some(std::fs::read(p).with_context(|| format!("read font '{}'", p.display()))?),
        None => None,
    };
    let book = reviewgrid::FontBook::from_bytes(regular.clone(), bold.clone())?;

    eprintln!("font diagnostics:");
    eprintln!("  regular:");
    eprintln!("    source:  {}", fonts.regular.display());
    eprintln!("    family:  {}", book.regular_family());
    eprintln!("    sha256:  {}", sha256_hex(&regular));
    if let (Some(path), Some(bytes), Some(family)) = (&fonts.bold, &bold, book.bold_family()) {
        eprintln!("  bold:");
        eprintln!("    source:  {}", path.display());
        eprintln!("    family:  {family}");
        eprintln!("    sha256:  {}", sha256_hex(bytes));
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

//! Identiblock CLI
//!
//! Derives an identicon for a GitHub login (or a raw account id / digest)
//! and prints it as text, JSON, SVG or a block scene description.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use identiblock_core::{generate, Digest, Identicon, Identity};
use identiblock_github::{GithubConfig, GithubResolver};
use identiblock_scene::{render_ascii, render_svg, Scene, SceneConfig};

#[derive(Parser, Debug)]
#[command(name = "identiblock")]
#[command(about = "Deterministic block identicons from GitHub account ids")]
#[command(version)]
#[command(group(ArgGroup::new("source").required(true).args(["username", "id", "digest"])))]
struct Cli {
    /// GitHub login to look up
    username: Option<String>,

    /// Use this account id instead of looking one up
    #[arg(long, allow_hyphen_values = true)]
    id: Option<String>,

    /// Use an existing 32-char MD5 digest
    #[arg(long)]
    digest: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// SVG size / scene render resolution, in pixels
    #[arg(long, default_value_t = 500)]
    size: u32,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Summary plus a terminal preview
    Text,
    /// Serialized identicon
    Json,
    /// SVG image
    Svg,
    /// Block scene description (JSON)
    Scene,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;

    let identicon = derive(&cli).await?;
    let rendered = render(&identicon, cli.format, cli.size)?;
    emit(&rendered, cli.output.as_deref())
}

/// Crates whose events are shown at `info` unless `RUST_LOG` says otherwise
const LOG_TARGETS: [&str; 3] = ["identiblock_cli", "identiblock_core", "identiblock_github"];

fn log_filter(mut filter: EnvFilter) -> Result<EnvFilter> {
    for target in LOG_TARGETS {
        filter = filter.add_directive(format!("{}=info", target).parse()?);
    }
    Ok(filter)
}

fn init_logging(json: bool) -> Result<()> {
    let filter = log_filter(EnvFilter::from_default_env())?;

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

async fn derive(cli: &Cli) -> Result<Identicon> {
    if let Some(digest) = &cli.digest {
        let digest = Digest::parse(digest)?;
        return Ok(Identicon::from_digest(digest));
    }

    if let Some(id) = &cli.id {
        let identity: Identity = id.parse()?;
        return Ok(Identicon::from_identity(identity));
    }

    let username = cli
        .username
        .as_deref()
        .context("a username, --id or --digest is required")?;
    let resolver = GithubResolver::new(GithubConfig::from_env())?;
    let identicon = generate(&resolver, username)
        .await
        .with_context(|| format!("deriving identicon for {:?}", username))?;
    Ok(identicon)
}

fn render(identicon: &Identicon, format: Format, size: u32) -> Result<String> {
    let out = match format {
        Format::Text => render_text(identicon),
        Format::Json => serde_json::to_string_pretty(identicon)? + "\n",
        Format::Svg => render_svg(identicon, size),
        Format::Scene => {
            let config = SceneConfig {
                resolution: size,
                ..SceneConfig::default()
            };
            Scene::build(identicon, &config).to_json()? + "\n"
        }
    };
    Ok(out)
}

fn render_text(identicon: &Identicon) -> String {
    let mut out = String::new();
    if let Some(identity) = identicon.identity {
        out.push_str(&format!("identity  {}\n", identity));
    }
    let hls = identicon.hls;
    let rgb = identicon.color;
    out.push_str(&format!("digest    {}\n", identicon.digest));
    out.push_str(&format!(
        "hls       h={:.4} l={:.4} s={:.4}\n",
        hls.hue, hls.lightness, hls.saturation
    ));
    out.push_str(&format!(
        "color     {} ({:.4}, {:.4}, {:.4})\n\n",
        rgb.to_hex(),
        rgb.r,
        rgb.g,
        rgb.b
    ));
    out.push_str(&render_ascii(&identicon.pattern));
    out.push('\n');
    out
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

//! Vista CLI
//!
//! Load, inspect and preview models without a host application.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vista_3d::prelude::*;
use vista_widget::{ViewParams, ViewerConfig, ViewerWidget};

#[derive(Parser)]
#[command(name = "vista")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vista 3D model viewer CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the viewer headlessly until a model is shown
    View {
        /// Model URL or path
        url: String,

        /// Viewer config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Viewport width in pixels
        #[arg(long, default_value = "800")]
        width: f32,

        /// Viewport height in pixels
        #[arg(long, default_value = "600")]
        height: f32,

        /// Give up waiting for the model after this many seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },

    /// Load a model once and print its statistics
    Inspect {
        /// Model URL or path
        url: String,
    },

    /// Print the default viewer config
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::View {
            url,
            config,
            width,
            height,
            timeout_secs,
        } => cmd_view(&url, config.as_deref(), width, height, timeout_secs).await,

        Commands::Inspect { url } => cmd_inspect(&url).await,

        Commands::Config => cmd_config(),
    }
}

async fn cmd_view(
    url: &str,
    config_path: Option<&std::path::Path>,
    width: f32,
    height: f32,
    timeout_secs: u64,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    let mut viewer = ViewerWidget::new(config, tokio::runtime::Handle::current())?;
    if viewer
        .update_view(&ViewParams::new(width, height).with_model(url))
        .is_none()
    {
        anyhow::bail!("no model to load for '{}'", url);
    }

    info!("Loading {}", url);
    let outcomes = tokio::time::timeout(Duration::from_secs(timeout_secs), viewer.settle())
        .await
        .with_context(|| format!("timed out after {}s waiting for {}", timeout_secs, url))?;

    for outcome in &outcomes {
        if let SwapOutcome::Failed(report) = outcome {
            anyhow::bail!("{}", report);
        }
    }

    let frame = viewer
        .tick(1.0 / 60.0)
        .context("viewer was destroyed before the first frame")?;

    println!("model:      {}", url);
    println!(
        "viewport:   {}x{}",
        frame.viewport.width, frame.viewport.height
    );
    println!("draw items: {}", frame.items.len());
    println!("triangles:  {}", frame.triangle_count());
    println!("lights:     {}", frame.lights.len());
    println!(
        "camera:     ({:.2}, {:.2}, {:.2})",
        frame.camera_position.x, frame.camera_position.y, frame.camera_position.z
    );

    viewer.destroy();
    Ok(())
}

async fn cmd_inspect(url: &str) -> Result<()> {
    let loader = UrlAssetLoader::new();
    info!("Loading {} with {}", url, loader.name());

    let node = loader
        .load(url)
        .await
        .with_context(|| format!("failed to load {}", url))?;

    println!("name:      {}", node.name);
    println!("nodes:     {}", node.node_count());
    println!("meshes:    {}", node.mesh_count());
    println!("triangles: {}", node.triangle_count());

    let bounds = node.bounds();
    if bounds.is_empty() {
        warn!("Model has no geometry");
    } else {
        let size = bounds.size();
        println!(
            "bounds:    ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        );
        println!("size:      {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    print!("{}", ViewerConfig::default().to_toml()?);
    Ok(())
}

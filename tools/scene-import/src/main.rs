//! scene-import - glTF to NSCN scene converter
//!
//! Converts `.gltf`/`.glb` assets to `.nscene` scene documents and inspects
//! converted files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scene_import::{import_gltf, ImportConfig, SceneDocument, SCENE_FORMAT};

#[derive(Parser)]
#[command(name = "scene-import")]
#[command(about = "glTF to NSCN scene converter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a glTF/GLB file to .nscene
    Convert {
        /// Input glTF/GLB file
        input: PathBuf,

        /// Output .nscene file (defaults to the input path with .nscene)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Import config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scene index to import instead of the default scene
        #[arg(long)]
        scene: Option<usize>,
    },

    /// Print a summary of a .nscene file
    Inspect {
        /// Input .nscene file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            scene,
        } => {
            let mut import_config = match config {
                Some(path) => ImportConfig::load(&path)?,
                None => ImportConfig::default(),
            };
            if scene.is_some() {
                import_config.scene = scene;
            }

            let output =
                output.unwrap_or_else(|| input.with_extension(SCENE_FORMAT.extension));
            tracing::info!("Converting {:?} -> {:?}", input, output);

            let result = import_gltf(&input, &import_config)
                .with_context(|| format!("Failed to import: {:?}", input))?;
            for diagnostic in &result.diagnostics {
                tracing::warn!("{}", diagnostic);
            }

            let bytes = result.scene.to_bytes();
            std::fs::write(&output, &bytes)
                .with_context(|| format!("Failed to write output: {:?}", output))?;

            let summary = result.scene.summary();
            tracing::info!(
                "Converted scene: {} nodes, {} primitives, {} vertices, {} textures, {} animations ({} warnings, {} bytes)",
                summary.nodes,
                summary.mesh_primitives,
                summary.vertices,
                summary.textures,
                summary.animations,
                result.diagnostics.len(),
                bytes.len()
            );
        }

        Commands::Inspect { input } => {
            let bytes =
                std::fs::read(&input).with_context(|| format!("Failed to read: {:?}", input))?;
            let scene = SceneDocument::from_bytes(&bytes)
                .with_context(|| format!("Failed to decode scene: {:?}", input))?;

            let summary = scene.summary();
            tracing::info!("Scene: {:?}", input);
            tracing::info!("  Root children: {}", scene.children.len());
            tracing::info!("  Nodes: {}", summary.nodes);
            tracing::info!(
                "  Mesh primitives: {} ({} vertices)",
                summary.mesh_primitives,
                summary.vertices
            );
            tracing::info!("  Skins: {}", summary.skins);
            tracing::info!(
                "  Textures: {} ({} embedded)",
                summary.textures,
                summary.embedded_images
            );
            tracing::info!(
                "  Animations: {} ({} channels, {} keyframes)",
                summary.animations,
                summary.channels,
                summary.keyframes
            );
            for animation in &scene.animations {
                tracing::info!("    {} ({} channels)", animation.name, animation.channels.len());
            }
        }
    }

    Ok(())
}

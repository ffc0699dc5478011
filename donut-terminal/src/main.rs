/// Donut Terminal - Wireframe editor
/// 
/// Opens a wireframe (a built-in donut by default) in the terminal.
/// Controls:
///   - Left drag from vertex to vertex: add an edge
///   - Right click: add a vertex
///   - x/X, y/Y, z/Z: rotate around an axis
///   - 0: reset rotation
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use donut_core::{wire, EditorConfig, Mesh, DEFAULT_DISTANCE, DEFAULT_HIT_TOLERANCE};
use donut_terminal::{canvas_size, TerminalApp};
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "donut-terminal")]
#[command(about = "Edit a 3D wireframe in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Wireframe file to open (`v x y z` and `l a b ...` lines)
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Built-in shape used when no file is given
    #[arg(long, value_enum, default_value_t = Shape::Donut)]
    shape: Shape,

    /// Eye distance used by the perspective divide
    #[arg(long, default_value_t = DEFAULT_DISTANCE)]
    distance: f32,

    /// Hit-test tolerance in canvas pixels
    #[arg(long, default_value_t = DEFAULT_HIT_TOLERANCE)]
    tolerance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Shape {
    Donut,
    Cube,
    Empty,
}

impl Shape {
    /// Build the shape sized to fit a `width` x `height` canvas
    fn build(self, width: u32, height: u32) -> Mesh {
        let extent = width.min(height) as f32;
        match self {
            Shape::Donut => Mesh::donut(extent * 0.3, extent * 0.12, 12, 6),
            Shape::Cube => Mesh::cube(extent * 0.5),
            Shape::Empty => Mesh::new(),
        }
    }
}

/// Log filter used when `RUST_LOG` is unset.
///
/// Edit records (`donut_core` at info) are only written when stderr is
/// redirected; on a terminal they would scribble over the editor, and the
/// status line shows them instead.
fn default_log_filter(stderr_is_terminal: bool) -> &'static str {
    if stderr_is_terminal {
        "warn"
    } else {
        "warn,donut_core=info"
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(default_log_filter(
                    std::io::stderr().is_terminal(),
                ))
            }),
        )
        .init();

    let cli = Cli::parse();

    let mesh = match &cli.mesh {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read wireframe {}", path.display()))?;
            wire::parse_wireframe(&text)
                .with_context(|| format!("Failed to parse wireframe {}", path.display()))?
        }
        None => {
            let (width, height) = canvas_size().context("Failed to query terminal size")?;
            cli.shape.build(width, height)
        }
    };
    tracing::info!(
        vertices = mesh.vertices().len(),
        edges = mesh.edges().len(),
        "wireframe loaded"
    );

    let config = EditorConfig {
        distance: cli.distance,
        hit_tolerance: cli.tolerance,
        ..EditorConfig::default()
    };
    let mut app = TerminalApp::new(mesh, config)?;
    app.run()?;

    let positions: Vec<(f32, f32, f32)> = app
        .mesh()
        .vertices()
        .iter()
        .map(|v| (v.initial.x, v.initial.y, v.initial.z))
        .collect();
    println!("Vertex positions:");
    println!("{:?}", positions);
    println!("Connections:");
    println!("{:?}", app.mesh().edge_indices());

    Ok(())
}

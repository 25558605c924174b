use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vislab_assets::load_obj;
use vislab_common::SceneId;
use vislab_render::{DebugTextRenderer, DrawList, RenderView, Renderer};
use vislab_scenes::{CubicBezier, Scene, SceneResources, create_scene};
use vislab_tools::GeometryInspector;

/// Fixed update step used by `describe`, matching the desktop app.
const TICK: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "vislab-cli", about = "CLI tool for vislab scenes and assets")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the available scenes
    Info,
    /// Build a scene, run some updates and print its geometry and draw list
    Describe {
        /// Scene number (1-5)
        #[arg(short, long)]
        scene: SceneId,
        /// Fixed-rate updates to run before drawing
        #[arg(short, long, default_value = "0")]
        updates: u32,
        /// Directory holding bunny.obj
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },
    /// Load an OBJ file and summarize its meshes
    Mesh {
        path: PathBuf,
    },
    /// Print points along the default Bezier curve
    Bezier {
        #[arg(short, long, default_value = "11")]
        samples: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("vislab-cli v{}", env!("CARGO_PKG_VERSION"));
            for id in SceneId::ALL {
                println!("  {id}: {:?} camera", id.camera_kind());
            }
        }
        Commands::Describe {
            scene,
            updates,
            data_dir,
        } => {
            let mut resources = SceneResources::new(data_dir);
            let mut scene = create_scene(scene, &mut resources);
            for _ in 0..updates {
                scene.update(TICK);
            }
            tracing::debug!("ran {updates} updates on {}", scene.id());

            let meshes = scene.meshes();
            println!("{}", scene.id());
            println!("Geometry: {}", GeometryInspector::summary(&meshes));
            for (key, geometry) in &meshes {
                println!(
                    "  {key}: {:?}, {} vertices, {} elements",
                    geometry.topology,
                    geometry.vertices.len(),
                    geometry.element_count()
                );
            }

            let mut list = DrawList::new();
            scene.draw(&mut list);
            let (flat, lit) = GeometryInspector::draw_calls(&list);
            println!("Draw calls: {flat} flat, {lit} lit");
            print!("{}", DebugTextRenderer::new().render(&list, &RenderView::default()));
        }
        Commands::Mesh { path } => {
            let meshes = load_obj(&path)?;
            println!("{}: {} mesh(es)", path.display(), meshes.len());
            for mesh in &meshes {
                println!(
                    "  {}: {} vertices, {} triangles",
                    mesh.name,
                    mesh.vertex_count(),
                    mesh.triangle_count()
                );
                if let Some((min, max)) = mesh.bounds() {
                    println!(
                        "    bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
                        min.x, min.y, min.z, max.x, max.y, max.z
                    );
                }
            }
        }
        Commands::Bezier { samples } => {
            let curve = CubicBezier::default();
            let points = curve.sample(samples);
            let last = points.len().saturating_sub(1).max(1) as f32;
            for (i, p) in points.iter().enumerate() {
                println!(
                    "t={:.3}  ({:.3}, {:.3}, {:.3})",
                    i as f32 / last,
                    p.x,
                    p.y,
                    p.z
                );
            }
        }
    }

    Ok(())
}

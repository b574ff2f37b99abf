use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use winit::event_loop::EventLoop;

mod artifact;
mod axes;
mod camera;
mod element;
mod loader;
mod model;
mod pipeline;
mod window;

pub use artifact::{ArtifactUniform, RenderArtifact};
pub use camera::{Camera, CameraController, CameraUniform, Projection};
pub use element::{Element, IntoElement};
pub use loader::{LoadError, WireMesh};
pub use window::WindowState;

/// Show the wireframe of a triangular PLY mesh.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path of the mesh to display.
    mesh: PathBuf,
}

#[tokio::main(worker_threads = 4)]
async fn main() -> ExitCode {
    std::env::set_var("RUST_LOG", "wireview=info,wgpu_hal=warn,wgpu_core=error");
    env_logger::init();

    let args = Args::parse();

    let mesh = match loader::load_path(&args.mesh) {
        Ok(mesh) => mesh,
        Err(err) => {
            log::error!("{}: {}", args.mesh.display(), err);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "{}: {} vertices, {} facets, {} edges",
        args.mesh.display(),
        mesh.vertices.len(),
        mesh.facets.len(),
        mesh.edge_count()
    );

    let title = format!("wireview: {}", args.mesh.display());
    let event_loop = EventLoop::new().unwrap();
    window::run(mesh, &title, event_loop).await;

    log::info!("Wireview exit");

    ExitCode::SUCCESS
}

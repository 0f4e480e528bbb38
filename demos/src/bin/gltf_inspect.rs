//! Load a glTF model and print a summary of its meshes and materials.
//!
//! ```text
//! gltf_inspect assets/models/helmet.gltf --detailed
//! gltf_inspect --root assets models/helmet.gltf models/car.glb
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use redlilium_core::gltf::{load_model_with, LoadError, LoadOptions, Model, ModelLoader};
use redlilium_core::texture::TextureCache;
use redlilium_vfs::FileSystemProvider;

/// RedLilium glTF inspector arguments.
#[derive(Parser, Debug)]
#[command(
    name = "gltf_inspect",
    about = "Load .gltf/.glb models and print what they contain",
    version
)]
struct Args {
    /// Model files to load. Relative to --root when it is given.
    #[arg(required = true)]
    models: Vec<PathBuf>,

    /// Asset root directory. Models sharing a root share one texture cache.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Skip texture decoding.
    #[arg(long)]
    no_textures: bool,

    /// Keep out-of-range indices instead of failing the load.
    #[arg(long)]
    no_index_validation: bool,

    /// List every mesh and material.
    #[arg(long)]
    detailed: bool,

    /// Log loader internals (debug level).
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    log::info!("gltf_inspect v{}", redlilium_demos::VERSION);

    let options = LoadOptions::default()
        .with_textures(!args.no_textures)
        .with_index_validation(!args.no_index_validation);

    let mut failed = false;
    match &args.root {
        Some(root) => {
            let loader = ModelLoader::new(FileSystemProvider::new(root))
                .with_cache(Arc::new(TextureCache::new()))
                .with_options(options);
            for model in &args.models {
                let path = model.to_string_lossy();
                failed |= !report(&path, loader.load(&path), args.detailed);
            }
        }
        None => {
            for model in &args.models {
                let path = model.display().to_string();
                failed |= !report(&path, load_model_with(model, options), args.detailed);
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn report(path: &str, result: Result<Model, LoadError>, detailed: bool) -> bool {
    match result {
        Ok(model) => {
            print!("{}", redlilium_demos::describe(&model, detailed));
            true
        }
        Err(err) => {
            log::error!("{path}: {err} ({:?})", err.kind());
            false
        }
    }
}

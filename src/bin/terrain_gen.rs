//! Terrain Generator
//!
//! Run with: `cargo run --bin terrain_gen -- [settings.json] [--dump terrain.otmesh]`
//!
//! Generates the terrain exactly as the demo does at startup and prints a
//! summary. With `--dump`, also writes the mesh for an external viewer.
//! `--print-settings` writes the effective settings as JSON to stdout.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;

use anyhow::{Context, bail};
use odyssey_engine::terrain::save_mesh_dump;
use odyssey_engine::world::water_surface_for;
use odyssey_engine::{GroundFollower, Terrain, TerrainSettings};

struct Args {
    settings: Option<PathBuf>,
    dump: Option<PathBuf>,
    print_settings: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        settings: None,
        dump: None,
        print_settings: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dump" => {
                let path = iter.next().context("--dump needs an output path")?;
                args.dump = Some(PathBuf::from(path));
            }
            "--print-settings" => args.print_settings = true,
            "-h" | "--help" => {
                println!("usage: terrain_gen [settings.json] [--dump out.otmesh] [--print-settings]");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown option {flag}"),
            path => {
                if args.settings.is_some() {
                    bail!("only one settings file may be given");
                }
                args.settings = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let settings = match &args.settings {
        Some(path) => TerrainSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => {
            log::info!("No settings file given, using defaults");
            TerrainSettings::default()
        }
    };

    if args.print_settings {
        println!("{}", settings.to_json_string()?);
    }

    let terrain = Terrain::generate(&settings).context("terrain generation failed")?;
    let mesh = &terrain.mesh;

    let spawn = terrain.spawn_point();
    let follower = GroundFollower::for_terrain(settings.camera_height, mesh.sea_height);
    let eye = follower.follow(spawn, mesh);
    let water = water_surface_for(mesh);

    log::info!("[Terrain] {} vertices, {} indices", mesh.vertex_count(), mesh.index_count());
    log::info!(
        "[Terrain] height {:.1}..{:.1}, sea {:.1}, snow line {:.1}",
        mesh.height_range.min,
        mesh.height_range.max,
        mesh.sea_height,
        mesh.height_range.snow_line()
    );
    log::info!(
        "[Terrain] extent {:.1} units, water plane corner ({:.1}, {:.1}, {:.1})",
        mesh.world_extent(),
        water[5][0],
        water[5][1],
        water[5][2]
    );
    log::info!(
        "[Camera] spawn ({:.1}, {:.1}) ground {:.1}, eye at {:.1}",
        eye.x,
        eye.z,
        mesh.height_at(eye.x, eye.z),
        eye.y
    );

    if let Some(path) = &args.dump {
        save_mesh_dump(path, mesh)
            .with_context(|| format!("failed to write mesh dump to {}", path.display()))?;
    }

    Ok(())
}

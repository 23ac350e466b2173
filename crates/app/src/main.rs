//! Headless demo: drives a hierarchical transform pass over a box.
//!
//! Builds a parent frame from a pivot + rotation script, attaches a
//! child box frame, and logs the transformed box corners plus the
//! angles recovered from the composed frame.

use anyhow::Result;
use corelib::{CoordSystem, Vec3};

fn parse_vec_arg(flag: &str, default: Vec3) -> Vec3 {
    // Accept: --flag=x,y,z
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix(flag) {
            match format!("({val})").parse() {
                Ok(v) => return v,
                Err(e) => {
                    eprintln!("[warn] Bad value for {flag}{val}: {e}. Using {default}.");
                    return default;
                }
            }
        }
    }
    default
}

fn parse_scale_arg() -> f64 {
    // --scale=s, uniform, default 1.0
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--scale=") {
            if let Ok(s) = val.parse::<f64>() {
                return s;
            }
            eprintln!("[warn] Bad value for --scale={val}. Using 1.");
        }
    }
    1.0
}

fn box_corners(sx: f64, sy: f64, sz: f64) -> [Vec3; 8] {
    let mut corners = [Vec3::ZERO; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        corner.set(
            if i & 1 == 0 { 0.0 } else { sx },
            if i & 2 == 0 { 0.0 } else { -sy },
            if i & 4 == 0 { 0.0 } else { -sz },
        );
    }
    corners
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let pivot = parse_vec_arg("--pivot=", Vec3::new(0.0, 1.5, 0.0));
    let angles = parse_vec_arg("--angles=", Vec3::new(30.0, 45.0, 0.0));
    let scale = parse_scale_arg();
    log::info!("Transform pass: pivot={pivot}, angles={angles}, scale={scale}");

    let pool = CoordSystem::pool();

    // Parent frame: move to the pivot, rotate, commit, scale.
    let mut parent = pool.acquire();
    parent
        .translate_local_vec(pivot)
        .rotate_local_vec(angles)
        .submit_rot()
        .scale(scale, scale, scale);

    // The box hangs off the parent with its own local offset.
    let mut child = pool.acquire();
    child.translate_local(0.25, -0.5, 0.0);

    let mut world = pool.acquire();
    parent.compose(&child, &mut world);
    log::info!("Composed frame: {}", *world);

    for (i, corner) in box_corners(1.0, 1.0, 1.0).into_iter().enumerate() {
        let out = world.apply(corner);
        log::info!("corner[{i}] {corner} -> {out}");
    }

    // The angle queries eat the basis, so probe a clone.
    let mut probe = (*world).clone();
    let recovered = probe.take_euler_angles();
    log::info!(
        "Recovered angles: {recovered}, camera roll {:.3} deg",
        world.camera_roll()
    );

    log::info!("Done.");
    Ok(())
}

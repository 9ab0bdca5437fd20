use clap::Parser;
use glam::{Quat, Vec3};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{error, info};

use engine::{assets::AssetError, scene::Scene, transform::Transform};
use game::{
    animation::{Clip, TransformKey},
    assets::Skeletons,
    scenes::sneak::{SneakConfig, SneakScene},
    skeleton::Skeleton,
};

mod engine;
mod game;

#[derive(clap::Parser)]
struct Opts {
    /// Number of characters to spawn.
    #[arg(long, default_value_t = 6)]
    models: u32,

    /// Simulated seconds to run for.
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Fixed simulation rate in frames per second.
    #[arg(long, default_value_t = 60.0)]
    rate: f32,

    /// Seed for the per-instance animation speeds.
    #[arg(long)]
    seed: Option<u64>,
}

/// Stand-in for the jaiqua skeleton asset: a handful of bones and a "Sneak"
/// clip that creeps forward while turning, without ever returning to its
/// start pose.
fn sneak_skeleton() -> Skeleton {
    let mut skeleton = Skeleton::new("jaiqua.skeleton");

    let spineroot = skeleton.add_bone(
        "Spineroot",
        Transform::from_translation(Vec3::new(0.0, 0.9, 0.0)),
    );
    let spine = skeleton.add_bone(
        "Spine",
        Transform::from_translation(Vec3::new(0.0, 0.25, 0.0)),
    );
    let head = skeleton.add_bone(
        "Head",
        Transform::from_translation(Vec3::new(0.0, 0.55, 0.0)),
    );
    let thigh_l = skeleton.add_bone(
        "Thigh.L",
        Transform::from_translation(Vec3::new(0.12, -0.1, 0.0)),
    );
    let thigh_r = skeleton.add_bone(
        "Thigh.R",
        Transform::from_translation(Vec3::new(-0.12, -0.1, 0.0)),
    );

    let mut clip = Clip::default();

    // The root creeps forward along -Z and yaws as it goes.
    let track = clip.track_mut(spineroot);
    for i in 0..=10u32 {
        let t = i as f32;
        let crouch = 0.04 * (std::f32::consts::TAU * t / 4.0).sin();
        track.insert(
            TransformKey::new(t)
                .with_translation(Vec3::new(0.0, crouch, -0.625 * t))
                .with_rotation(Quat::from_rotation_y(-60f32.to_radians() * t / 8.0)),
        );
    }

    // Limbs swing with a 4 unit period, the legs in opposite phase.
    for (bone, phase, amplitude) in [
        (thigh_l, 0.0, 0.6),
        (thigh_r, std::f32::consts::PI, 0.6),
        (spine, std::f32::consts::FRAC_PI_2, 0.15),
        (head, std::f32::consts::FRAC_PI_2, 0.08),
    ] {
        let track = clip.track_mut(bone);
        for i in 0..=10u32 {
            let t = i as f32;
            let swing = amplitude * (std::f32::consts::TAU * t / 4.0 + phase).sin();
            track.insert(TransformKey::new(t).with_rotation(Quat::from_rotation_x(swing)));
        }
    }

    skeleton.add_animation("Sneak", clip);
    skeleton
}

fn main() {
    tracing_subscriber::fmt().init();

    let opts = Opts::parse();

    let skeletons = Skeletons::new(|name| match name {
        "jaiqua.skeleton" => Ok(sneak_skeleton()),
        _ => Err(AssetError::NotFound(name.to_string())),
    });

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let config = SneakConfig {
        model_count: opts.models,
        ..SneakConfig::default()
    };

    let mut scene = match SneakScene::new(config, skeletons, &mut rng) {
        Ok(scene) => scene,
        Err(err) => {
            error!("Could not create sneak scene! - {err}");
            std::process::exit(1);
        }
    };

    let rate = opts.rate.max(1.0);
    let delta_time = 1.0 / rate;
    let frames = (opts.seconds * rate) as u32;
    let per_second = rate as u32;

    for frame in 0..frames {
        if !scene.update(delta_time) {
            break;
        }

        if frame % per_second == 0 {
            for (i, position) in scene.sampled_root_positions().iter().enumerate() {
                info!("model {i}: root at {position}");
            }
        }
    }

    scene.teardown();
}

use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use squatcore::pose_interface::{joints, Landmark, PoseFrame};

use crate::generator::template::squat_trajectory;

const STANDING_KNEE_ANGLE: f32 = 175.0;
const KNEE_Y: f32 = 0.6;
const THIGH_LENGTH: f32 = 0.2;
const SHIN_LENGTH: f32 = 0.25;
const TORSO_LENGTH: f32 = 0.25;
/// Forward torso lean, in degrees, per degree of knee flexion.
const TORSO_LEAN_PER_DEGREE: f32 = 0.15;
/// Upper bound on frames in one generated workout.
const MAX_FRAMES: usize = 1_000_000;
const DETECTED: f32 = 0.95;
const OCCLUDED: f32 = 0.1;

/// Configuration for generating a synthetic workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub reps: u32,
    pub fps: f64,
    pub frames_per_rep: usize,
    /// Standing frames before the first rep and after each rep.
    pub hold_frames: usize,
    pub min_knee_angle: f32,
    /// Max coordinate jitter, in normalized units.
    pub noise: f32,
    /// Probability that the right leg is hidden in a given frame.
    pub occlusion_rate: f64,
    pub seed: u64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            reps: 3,
            fps: 30.0,
            frames_per_rep: 60,
            hold_frames: 20,
            min_knee_angle: 85.0,
            noise: 0.003,
            occlusion_rate: 0.0,
            seed: 0,
            description: None,
            scenario: None,
        }
    }
}

/// Places a person with both knees bent to `knee_angle`.
fn build_pose(knee_angle: f32, rng: &mut StdRng, noise: f32, hide_right: bool) -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::new(0.5, 0.3, DETECTED); joints::COUNT];
    let theta = knee_angle.to_radians();
    let mut jitter = |value: f32| {
        let offset = if noise > 0.0 {
            rng.gen_range(-noise..noise)
        } else {
            0.0
        };
        (value + offset).clamp(0.0, 1.0)
    };

    let right_visibility = if hide_right { OCCLUDED } else { DETECTED };
    let legs = [
        (joints::LEFT_HIP, joints::LEFT_KNEE, joints::LEFT_ANKLE, 0.42, 1.0, DETECTED),
        (joints::RIGHT_HIP, joints::RIGHT_KNEE, joints::RIGHT_ANKLE, 0.58, -1.0, right_visibility),
    ];

    let mut hips = Vec::with_capacity(2);
    for (hip, knee, ankle, knee_x, sign, visibility) in legs {
        // Shin stays vertical; the thigh swings about the knee.
        let hip_x = knee_x + sign * THIGH_LENGTH * theta.sin();
        let hip_y = KNEE_Y + THIGH_LENGTH * theta.cos();
        landmarks[knee] = Landmark::new(jitter(knee_x), jitter(KNEE_Y), visibility);
        landmarks[ankle] = Landmark::new(jitter(knee_x), jitter(KNEE_Y + SHIN_LENGTH), visibility);
        landmarks[hip] = Landmark::new(jitter(hip_x), jitter(hip_y), visibility);
        hips.push((hip_x, hip_y));
    }

    let hip_mid_x = (hips[0].0 + hips[1].0) / 2.0;
    let hip_mid_y = (hips[0].1 + hips[1].1) / 2.0;
    let lean = ((STANDING_KNEE_ANGLE - knee_angle).max(0.0) * TORSO_LEAN_PER_DEGREE).to_radians();
    let shoulder_x = hip_mid_x + TORSO_LENGTH * lean.sin();
    let shoulder_y = hip_mid_y - TORSO_LENGTH * lean.cos();
    landmarks[joints::LEFT_SHOULDER] =
        Landmark::new(jitter(shoulder_x - 0.06), jitter(shoulder_y), DETECTED);
    landmarks[joints::RIGHT_SHOULDER] =
        Landmark::new(jitter(shoulder_x + 0.06), jitter(shoulder_y), DETECTED);

    landmarks
}

fn knee_angles(config: &GeneratorConfig) -> anyhow::Result<Vec<f32>> {
    let per_rep = config
        .frames_per_rep
        .checked_add(config.hold_frames)
        .context("overflow computing frames per rep")?;
    let total = (config.reps as usize)
        .checked_mul(per_rep)
        .and_then(|frames| frames.checked_add(config.hold_frames))
        .context("overflow computing frame count for generator")?;
    if total > MAX_FRAMES {
        anyhow::bail!(
            "generator would produce {} frames, limit is {}",
            total,
            MAX_FRAMES
        );
    }

    let bottom = config.min_knee_angle.clamp(1.0, STANDING_KNEE_ANGLE);
    let mut angles = Vec::with_capacity(total);
    angles.extend(std::iter::repeat(STANDING_KNEE_ANGLE).take(config.hold_frames));
    for _ in 0..config.reps {
        angles.extend(squat_trajectory(config.frames_per_rep, STANDING_KNEE_ANGLE, bottom));
        angles.extend(std::iter::repeat(STANDING_KNEE_ANGLE).take(config.hold_frames));
    }
    Ok(angles)
}

pub fn build_frames_from_config(config: &GeneratorConfig) -> anyhow::Result<Vec<PoseFrame>> {
    if !(config.fps.is_finite() && config.fps > 0.0) {
        anyhow::bail!("generator fps must be positive, got {}", config.fps);
    }
    let angles = knee_angles(config)?;
    let occlusion = config.occlusion_rate.clamp(0.0, 1.0);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let frames = angles
        .into_iter()
        .enumerate()
        .map(|(index, angle)| {
            let hide_right = occlusion > 0.0 && rng.gen_bool(occlusion);
            let landmarks = build_pose(angle, &mut rng, config.noise, hide_right);
            PoseFrame::single(index as f64 / config.fps, landmarks)
        })
        .collect();
    Ok(frames)
}

#[cfg(test)]
pub fn build_frames(reps: u32, seed: u64) -> anyhow::Result<Vec<PoseFrame>> {
    let config = GeneratorConfig {
        reps,
        seed,
        ..Default::default()
    };
    build_frames_from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use squatcore::processing::{BilateralAggregator, VisibilityFilter};

    #[test]
    fn generator_builds_expected_frame_count() {
        let config = GeneratorConfig::default();
        let frames = build_frames_from_config(&config).unwrap();
        assert_eq!(frames.len(), 20 + 3 * (60 + 20));
        assert!(frames
            .windows(2)
            .all(|pair| pair[1].timestamp > pair[0].timestamp));
    }

    #[test]
    fn generated_pose_matches_requested_angle() {
        let mut rng = StdRng::seed_from_u64(1);
        let aggregator = BilateralAggregator::new(VisibilityFilter::new(0.5));
        for angle in [175.0, 140.0, 90.0] {
            let pose = build_pose(angle, &mut rng, 0.0, false);
            let sample = aggregator.aggregate(&pose, 0.0).unwrap();
            assert!((sample.combined_knee_angle - angle).abs() < 0.5);
            assert!(sample.back_tilt < 20.0);
        }
    }

    #[test]
    fn occluded_leg_is_hidden() {
        let mut rng = StdRng::seed_from_u64(3);
        let pose = build_pose(120.0, &mut rng, 0.0, true);
        assert_eq!(pose[joints::RIGHT_KNEE].visibility, OCCLUDED);
        assert_eq!(pose[joints::LEFT_KNEE].visibility, DETECTED);
    }

    #[test]
    fn same_seed_repeats_the_workout() {
        let config = GeneratorConfig {
            reps: 1,
            noise: 0.01,
            occlusion_rate: 0.3,
            seed: 13,
            description: Some("test".into()),
            scenario: Some("jittery".into()),
            ..Default::default()
        };
        let a = build_frames_from_config(&config).unwrap();
        let b = build_frames_from_config(&config).unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a[30].persons, b[30].persons);
    }

    #[test]
    fn oversized_workout_is_rejected() {
        let config = GeneratorConfig {
            reps: 1,
            frames_per_rep: 1_000_000_000_000_000,
            ..Default::default()
        };
        let err = build_frames_from_config(&config).unwrap_err();
        assert!(err.to_string().contains("limit"));

        let many_reps = GeneratorConfig {
            reps: u32::MAX,
            ..Default::default()
        };
        assert!(build_frames_from_config(&many_reps).is_err());
    }

    #[test]
    fn zero_fps_is_rejected() {
        let config = GeneratorConfig {
            fps: 0.0,
            ..Default::default()
        };
        assert!(build_frames_from_config(&config).is_err());
    }
}

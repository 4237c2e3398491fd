use std::f32::consts::PI;

/// Knee angle per frame for one smooth squat: starts and ends at `standing`,
/// bottoms out at `bottom` halfway through.
pub fn squat_trajectory(frames: usize, standing: f32, bottom: f32) -> Vec<f32> {
    if frames == 0 {
        return Vec::new();
    }
    (0..frames)
        .map(|i| {
            let phase = (i as f32 / frames as f32) * 2.0 * PI;
            bottom + (standing - bottom) * (1.0 + phase.cos()) / 2.0
        })
        .collect()
}

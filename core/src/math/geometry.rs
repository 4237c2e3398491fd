use crate::pose_interface::Landmark;

/// Vectors shorter than this have no usable direction.
const MIN_SEGMENT_LENGTH: f32 = 1e-9;

/// Point in normalized image coordinates. Depth is dropped; it is too noisy
/// for rep counting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<&Landmark> for Point2 {
    fn from(landmark: &Landmark) -> Self {
        Self::new(landmark.x, landmark.y)
    }
}

/// Angle at `b` formed by `a-b-c`, in degrees within [0, 180].
///
/// Returns `None` when either limb segment has zero length, since the angle
/// is undefined there.
pub fn joint_angle(a: Point2, b: Point2, c: Point2) -> Option<f32> {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);

    let mag_ba = (ba.0 * ba.0 + ba.1 * ba.1).sqrt();
    let mag_bc = (bc.0 * bc.0 + bc.1 * bc.1).sqrt();
    if !(mag_ba > MIN_SEGMENT_LENGTH && mag_bc > MIN_SEGMENT_LENGTH) {
        return None;
    }

    let dot = ba.0 * bc.0 + ba.1 * bc.1;
    let cos_theta = (dot / (mag_ba * mag_bc)).clamp(-1.0, 1.0);
    Some(cos_theta.acos().to_degrees())
}

/// Deviation in degrees of the shoulder-to-hip line from vertical.
///
/// Image y grows downward, so an upright torso points at +90 degrees.
pub fn back_tilt(shoulder_mid: Point2, hip_mid: Point2) -> f32 {
    let dy = hip_mid.y - shoulder_mid.y;
    let dx = hip_mid.x - shoulder_mid.x;
    if dx.abs() < MIN_SEGMENT_LENGTH && dy.abs() < MIN_SEGMENT_LENGTH {
        return 0.0;
    }
    (dy.atan2(dx).to_degrees() - 90.0).abs()
}

pub fn midpoint(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point2::new(sx / n, sy / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn straight_leg_is_180_degrees() {
        let angle = joint_angle(
            Point2::new(0.5, 0.3),
            Point2::new(0.5, 0.5),
            Point2::new(0.5, 0.7),
        )
        .unwrap();
        assert!(close(angle, 180.0));
    }

    #[test]
    fn right_angle_is_90_degrees() {
        let angle = joint_angle(
            Point2::new(0.7, 0.5),
            Point2::new(0.5, 0.5),
            Point2::new(0.5, 0.8),
        )
        .unwrap();
        assert!(close(angle, 90.0));
    }

    #[test]
    fn angle_is_symmetric_and_bounded() {
        let points = [
            (0.1, 0.2),
            (0.9, 0.4),
            (0.35, 0.95),
            (0.5, 0.5),
            (0.0, 1.0),
            (0.72, 0.13),
        ];
        for a in points {
            for b in points {
                for c in points {
                    let (a, b, c) = (
                        Point2::new(a.0, a.1),
                        Point2::new(b.0, b.1),
                        Point2::new(c.0, c.1),
                    );
                    let forward = joint_angle(a, b, c);
                    let backward = joint_angle(c, b, a);
                    match (forward, backward) {
                        (Some(f), Some(r)) => {
                            assert!((0.0..=180.0).contains(&f));
                            assert!(close(f, r));
                        }
                        (None, None) => {}
                        other => panic!("asymmetric degeneracy: {:?}", other),
                    }
                }
            }
        }
    }

    #[test]
    fn collapsed_segment_yields_no_angle() {
        let knee = Point2::new(0.5, 0.5);
        assert!(joint_angle(knee, knee, Point2::new(0.5, 0.8)).is_none());
        assert!(joint_angle(Point2::new(0.5, 0.2), knee, knee).is_none());
    }

    #[test]
    fn upright_torso_has_no_tilt() {
        let tilt = back_tilt(Point2::new(0.5, 0.2), Point2::new(0.5, 0.5));
        assert!(close(tilt, 0.0));
    }

    #[test]
    fn leaning_torso_reports_deviation() {
        let tilt = back_tilt(Point2::new(0.3, 0.2), Point2::new(0.5, 0.4));
        assert!(close(tilt, 45.0));
    }

    #[test]
    fn coincident_torso_points_report_zero() {
        let p = Point2::new(0.5, 0.5);
        assert_eq!(back_tilt(p, p), 0.0);
    }

    #[test]
    fn midpoint_averages_points() {
        let mid = midpoint(&[Point2::new(0.2, 0.4), Point2::new(0.4, 0.6)]).unwrap();
        assert!(close(mid.x, 0.3) && close(mid.y, 0.5));
        assert!(midpoint(&[]).is_none());
    }
}

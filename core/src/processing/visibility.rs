use crate::pose_interface::Landmark;

/// Gate deciding whether a landmark is trustworthy enough to use.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityFilter {
    threshold: f32,
}

impl VisibilityFilter {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Confident enough and inside the frame. NaN coordinates fail the range check.
    pub fn is_visible(&self, landmark: &Landmark) -> bool {
        landmark.visibility >= self.threshold
            && (0.0..=1.0).contains(&landmark.x)
            && (0.0..=1.0).contains(&landmark.y)
    }

    /// Landmark at `index` if present and visible.
    pub fn visible<'a>(&self, landmarks: &'a [Landmark], index: usize) -> Option<&'a Landmark> {
        landmarks.get(index).filter(|l| self.is_visible(l))
    }
}

impl Default for VisibilityFilter {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Range of ray parameters a hit may fall in.
///
/// Hits are accepted strictly inside `(min, max)`; see [`Interval::surrounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Whether `t` lies strictly between the bounds.
    pub fn surrounds(&self, t: f32) -> bool {
        t > self.min && t < self.max
    }

    /// Copy with the far bound pulled in to `max`, used while searching for
    /// the closest hit.
    pub fn with_max(&self, max: f32) -> Self {
        Self { max, ..*self }
    }
}

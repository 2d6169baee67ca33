use serde::{Deserialize, Serialize};

/// Axis aligned rectangle in world pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn centre(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Squared distance between the top left corners of two rectangles.
    pub fn origin_distance_sq(&self, other: &Self) -> f32 {
        let dx = other.left - self.left;
        let dy = other.top - self.top;
        dx.mul_add(dx, dy * dy)
    }

    /// Grow to the bounding box of `self` and `other`.
    pub fn stretch(&mut self, other: &Self) {
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.width = right - self.left;
        self.height = bottom - self.top;
    }

    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.left * factor,
            self.top * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

//! Damage rectangles
//!
//! Coordinates are destination pixels. `x2`/`y2` are exclusive for area
//! computations, so a rectangle with `x1 == x2` or `y1 == y2` covers
//! nothing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rectangle of changed pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DamageRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl DamageRect {
    /// Rectangle from its corners
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle from an origin and a size
    pub const fn from_size(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x.saturating_add(width),
            y2: y.saturating_add(height),
        }
    }

    /// Rectangle covering a whole `width` x `height` surface
    pub const fn covering(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub const fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Number of pixels covered, saturating at `u32::MAX`
    pub const fn area(&self) -> u32 {
        self.width().saturating_mul(self.height())
    }

    /// True when the rectangle covers no pixel
    pub const fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// True when `other` lies entirely inside this rectangle
    pub const fn contains(&self, other: &DamageRect) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }

    /// Overlap of two rectangles, `None` if they do not overlap
    pub fn intersect(&self, other: &DamageRect) -> Option<DamageRect> {
        let rect = DamageRect {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        };
        (!rect.is_empty()).then_some(rect)
    }

    /// Smallest rectangle containing both; empty rectangles are ignored
    pub fn union(&self, other: &DamageRect) -> DamageRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        DamageRect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }
}

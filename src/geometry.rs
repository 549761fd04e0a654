//! Core geometry types: Extent, Bounds.
//!
//! These are the pixel-space types used throughout flexform for widget sizes,
//! solved layout boxes, and panel dimensions. All values are `f32` because the
//! layout solver and the immediate-mode backends both work in fractional pixels.

use std::ops::{Add, Mul};

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// A width/height pair in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    /// The empty extent.
    pub const ZERO: Extent = Extent {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new extent.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True if both components differ from `other` by at most `epsilon`.
    #[inline]
    pub fn approx_eq(self, other: Extent, epsilon: f32) -> bool {
        (self.width - other.width).abs() <= epsilon && (self.height - other.height).abs() <= epsilon
    }
}

impl Add for Extent {
    type Output = Extent;
    #[inline]
    fn add(self, rhs: Extent) -> Extent {
        Extent::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Mul<f32> for Extent {
    type Output = Extent;
    #[inline]
    fn mul(self, rhs: f32) -> Extent {
        Extent::new(self.width * rhs, self.height * rhs)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A solved layout box: position relative to the parent plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Create a new box.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The size component.
    #[inline]
    pub fn extent(self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#![forbid(unsafe_code)]

//! RGBA color scalar and its live operators.
//!
//! Channels are straight (non-premultiplied) `f64` values, nominally in
//! `[0.0, 1.0]`. Nothing clamps them: out-of-range channels are useful as
//! intermediate values (HDR, overshooting animations) and are packed with
//! saturation by [`Rgba::to_rgba8`].

use std::fmt;

use crate::cell::Live;
use crate::node::{Binary, Ternary};
use crate::ops::unary;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    #[must_use]
    pub const fn gray(level: f64) -> Self {
        Self::rgb(level, level, level)
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Channel-wise linear interpolation; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: f64, to: f64| from + (to - from) * t;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Pack into 8-bit channels, saturating out-of-range values.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    #[must_use]
    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        let unit = |c: u8| f64::from(c) / 255.0;
        Self::new(unit(r), unit(g), unit(b), unit(a))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Live<Rgba> {
    /// A color cell assembled from four channel cells.
    pub fn rgba_from(r: &Live<f64>, g: &Live<f64>, b: &Live<f64>, a: &Live<f64>) -> Self {
        let rgb = Live::derive(
            r.mode().combine(g.mode()).combine(b.mode()),
            Ternary {
                first: r.clone(),
                second: g.clone(),
                third: b.clone(),
                op: |r: f64, g: f64, b: f64| Ok(Rgba::rgb(r, g, b)),
            },
        );
        rgb.with_alpha(a)
    }

    /// `self` with its alpha replaced by `alpha` on every read.
    pub fn with_alpha(&self, alpha: &Live<f64>) -> Self {
        Live::derive(
            self.mode().combine(alpha.mode()),
            Binary {
                lhs: self.clone(),
                rhs: alpha.clone(),
                op: |color: Rgba, a: f64| Ok(color.with_alpha(a)),
            },
        )
    }

    /// Linear blend from `self` to `other` by `t`.
    pub fn mix(&self, other: &Live<Rgba>, t: &Live<f64>) -> Self {
        Live::derive(
            self.mode().combine(other.mode()).combine(t.mode()),
            Ternary {
                first: self.clone(),
                second: other.clone(),
                third: t.clone(),
                op: |from: Rgba, to: Rgba, t: f64| Ok(from.lerp(to, t)),
            },
        )
    }

    pub fn red(&self) -> Live<f64> {
        unary(self, |c: Rgba| Ok(c.r))
    }

    pub fn green(&self) -> Live<f64> {
        unary(self, |c: Rgba| Ok(c.g))
    }

    pub fn blue(&self) -> Live<f64> {
        unary(self, |c: Rgba| Ok(c.b))
    }

    pub fn alpha(&self) -> Live<f64> {
        unary(self, |c: Rgba| Ok(c.a))
    }
}

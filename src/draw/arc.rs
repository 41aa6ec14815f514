//! Polar vectors, arcs and spirals
use core::f64::consts::PI;

use embedded_graphics_core::geometry::Point;

use crate::error::{DrawError, DrawResult};
use crate::framebuffer::{Color, Surface};

/// Cartesian point at `radius` and `theta` degrees from `origin`, or `None`
/// when it cannot be represented as a `Point`.
/// Screen y grows downward, so the sine term is negated.
pub fn polar_point(origin: Point, radius: f64, theta: f64) -> Option<Point> {
    let (x, y) = polar_wide(origin, radius, theta);
    Some(Point::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}

/// Offsets truncate toward zero; float-to-int casts saturate.
fn polar_wide(origin: Point, radius: f64, theta: f64) -> (i64, i64) {
    let (sin, cos) = libm::sincos(theta * PI / 180.0);
    (
        (origin.x as i64).saturating_add((radius * cos) as i64),
        (origin.y as i64).saturating_sub((radius * sin) as i64),
    )
}

/// Angular sweep around `origin`, one sample per degree by default.
///
/// With a non-zero `radius_step` the radius after `k` elapsed degrees is
/// `radius + floor(radius_diff / radius_step * k)`, recomputed from scratch
/// at every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcSweep {
    pub origin: Point,
    pub radius: i32,
    pub radius_diff: i32,
    pub radius_step: i32,
    pub theta_init: i32,
    /// Signed sweep in degrees; negative sweeps run clockwise
    pub theta_diff: i32,
    /// Samples per degree
    pub subdivisions: u32,
}

impl ArcSweep {
    pub fn new(origin: Point, radius: i32, theta_init: i32, theta_diff: i32) -> Self {
        Self {
            origin,
            radius,
            radius_diff: 0,
            radius_step: 0,
            theta_init,
            theta_diff,
            subdivisions: 1,
        }
    }

    pub fn spiral(mut self, radius_diff: i32, radius_step: i32) -> Self {
        self.radius_diff = radius_diff;
        self.radius_step = radius_step;
        self
    }

    /// Finer angular stepping for large radii, where one sample per degree
    /// leaves visible gaps
    pub fn subdivisions(mut self, per_degree: u32) -> Self {
        self.subdivisions = per_degree.max(1);
        self
    }

    /// Index of the last sample; samples run `0..=last_sample()`
    pub fn last_sample(&self) -> u32 {
        self.theta_diff
            .unsigned_abs()
            .saturating_mul(self.subdivisions.max(1))
    }

    fn elapsed_degrees(&self, k: u32) -> f64 {
        k as f64 / self.subdivisions.max(1) as f64
    }

    /// Widened so large spirals never wrap
    pub fn radius_at(&self, k: u32) -> i64 {
        let radius = self.radius as i64;
        if self.radius_step == 0 {
            return radius;
        }
        let rate = self.radius_diff as f64 / self.radius_step as f64;
        radius.saturating_add(libm::floor(rate * self.elapsed_degrees(k)) as i64)
    }

    /// `None` when the sample lies outside the `Point` range
    pub fn sample(&self, k: u32) -> Option<Point> {
        let direction = if self.theta_diff < 0 { -1.0 } else { 1.0 };
        let theta = self.theta_init as f64 + direction * self.elapsed_degrees(k);
        polar_point(self.origin, self.radius_at(k) as f64, theta)
    }
}

impl Surface<'_> {
    /// Line from `origin` out to `radius` at `theta` degrees
    pub fn vector_polar(&mut self, origin: Point, radius: i32, theta: f64, color: Color) -> DrawResult {
        if self.is_transparent(color) {
            return Ok(());
        }
        let (x, y) = polar_wide(origin, radius as f64, theta);
        let end = match (i32::try_from(x), i32::try_from(y)) {
            (Ok(x), Ok(y)) => Point::new(x, y),
            _ => {
                let err = DrawError::EndpointOutOfBounds { x, y };
                log::warn!("vector_polar: {}", err);
                return Err(err);
            }
        };
        self.line(origin, end, color)
    }

    /// Plot one pixel per sample. Samples off the surface are skipped.
    pub fn arc(&mut self, sweep: &ArcSweep, color: Color) -> DrawResult {
        if self.is_transparent(color) {
            return Ok(());
        }
        self.check_origin(sweep.origin)?;

        for k in 0..=sweep.last_sample() {
            match sweep.sample(k) {
                Some(p) if self.contains(p) => self.put(p.x as usize, p.y as usize, color),
                _ => {}
            }
        }
        Ok(())
    }

    /// Approximate a filled wedge by joining each sample to its mirror on the
    /// other half of the sweep. Exact only at the sweep's ends; chords with an
    /// end off the surface are skipped.
    pub fn filled_arc(&mut self, sweep: &ArcSweep, color: Color) -> DrawResult {
        if self.is_transparent(color) {
            return Ok(());
        }
        self.check_origin(sweep.origin)?;

        let last = sweep.last_sample();
        for k in 0..=last / 2 {
            if let (Some(a), Some(b)) = (sweep.sample(k), sweep.sample(last - k)) {
                if self.contains(a) && self.contains(b) {
                    self.line_unchecked(a, b, color);
                }
            }
        }
        Ok(())
    }

    fn check_origin(&self, origin: Point) -> DrawResult {
        if self.contains(origin) {
            return Ok(());
        }
        let err = DrawError::OriginOutOfBounds {
            x: origin.x as i64,
            y: origin.y as i64,
        };
        log::warn!("arc: {}", err);
        Err(err)
    }
}

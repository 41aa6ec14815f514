//! Straight lines between two on-surface points
use embedded_graphics_core::geometry::Point;

use crate::error::{DrawError, DrawResult};
use crate::framebuffer::{Color, Surface};

/// One position along a [`LineCursor`] walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStep {
    pub point: Point,
    /// How far the minor axis moved to reach `point` (0 or 1)
    pub minor_advance: i32,
    /// `point` with the minor-axis move undone, when there was one
    pub corner: Option<Point>,
}

/// Walks a segment one major-axis pixel at a time.
///
/// `step = (minor + 1) / (major + 1)` is computed once; at step `i` the minor
/// offset is `floor(step * i)`, recomputed from scratch rather than
/// accumulated so rounding never drifts. Both the line drawer and the
/// triangle filler step through this, so their pixels agree exactly.
#[derive(Debug, Clone)]
pub struct LineCursor {
    origin: Point,
    x_major: bool,
    sx: i32,
    sy: i32,
    major: i32,
    step: f64,
    i: i32,
    prev_offset: i32,
}

impl LineCursor {
    pub fn new(from: Point, to: Point) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let x_major = dx.abs() >= dy.abs();
        let (major, minor) = if x_major {
            (dx.abs(), dy.abs())
        } else {
            (dy.abs(), dx.abs())
        };

        Self {
            origin: from,
            x_major,
            sx: dx.signum(),
            sy: dy.signum(),
            major,
            step: (minor + 1) as f64 / (major + 1) as f64,
            i: 0,
            prev_offset: 0,
        }
    }

    /// Number of points the walk visits, endpoints included
    pub fn steps(&self) -> usize {
        self.major as usize + 1
    }

    fn offset(&self, i: i32) -> i32 {
        libm::floor(self.step * i as f64) as i32
    }

    fn at(&self, major: i32, minor: i32) -> Point {
        if self.x_major {
            Point::new(self.origin.x + self.sx * major, self.origin.y + self.sy * minor)
        } else {
            Point::new(self.origin.x + self.sx * minor, self.origin.y + self.sy * major)
        }
    }
}

impl Iterator for LineCursor {
    type Item = LineStep;

    fn next(&mut self) -> Option<LineStep> {
        if self.i > self.major {
            return None;
        }
        let i = self.i;
        let offset = self.offset(i);
        let minor_advance = offset - self.prev_offset;
        let step = LineStep {
            point: self.at(i, offset),
            minor_advance,
            corner: (minor_advance > 0).then(|| self.at(i, self.prev_offset)),
        };
        self.prev_offset = offset;
        self.i += 1;
        Some(step)
    }
}

impl Surface<'_> {
    /// Inclusive line from `from` to `to`.
    ///
    /// A transparent color makes the call a no-op. Both endpoints must be on
    /// the surface; intermediate points are not rechecked since the surface is
    /// a convex rectangle.
    pub fn line(&mut self, from: Point, to: Point, color: Color) -> DrawResult {
        if self.is_transparent(color) {
            return Ok(());
        }
        self.check_endpoint(from)?;
        self.check_endpoint(to)?;
        self.line_unchecked(from, to, color);
        Ok(())
    }

    pub(crate) fn check_endpoint(&self, p: Point) -> DrawResult {
        if self.contains(p) {
            return Ok(());
        }
        let err = DrawError::EndpointOutOfBounds {
            x: p.x as i64,
            y: p.y as i64,
        };
        log::warn!("line: {} on {}x{} surface", err, self.width(), self.height());
        Err(err)
    }

    /// Both endpoints already validated
    pub(crate) fn line_unchecked(&mut self, from: Point, to: Point, color: Color) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let stride = self.stride();

        if dx == 0 && dy == 0 {
            self.put(from.x as usize, from.y as usize, color);
        } else if dy == 0 {
            let left = from.x.min(to.x) as usize;
            self.span(left, from.y as usize, dx.unsigned_abs() as usize + 1, color);
        } else if dx == 0 {
            let mut idx = self.index_of(from.x as usize, from.y.min(to.y) as usize);
            for _ in 0..=dy.unsigned_abs() {
                self.put_index(idx, color);
                idx += stride;
            }
        } else if dx.abs() == dy.abs() {
            // walk down from the upper end; x moves right or left each row
            let (top, bottom) = if from.y < to.y { (from, to) } else { (to, from) };
            let mut idx = self.index_of(top.x as usize, top.y as usize);
            let step = if bottom.x > top.x { stride + 1 } else { stride - 1 };
            for _ in 0..=dy.unsigned_abs() {
                self.put_index(idx, color);
                idx += step;
            }
        } else {
            for step in LineCursor::new(from, to) {
                self.put(step.point.x as usize, step.point.y as usize, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{PixelLayout, SurfaceInfo};
    use alloc::vec;
    use alloc::vec::Vec;

    fn with_surface(width: usize, height: usize, f: impl FnOnce(&mut Surface<'_>)) -> Vec<u32> {
        let mut cells = vec![0u32; width * height];
        let mut s = Surface::new(
            &mut cells,
            SurfaceInfo {
                width,
                height,
                stride: width,
                layout: PixelLayout::Bgr,
            },
        )
        .unwrap();
        f(&mut s);
        cells
    }

    fn lit(cells: &[u32], width: usize) -> Vec<(usize, usize)> {
        cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != 0)
            .map(|(i, _)| (i % width, i / width))
            .collect()
    }

    #[test]
    fn test_cursor_reaches_endpoint() {
        let steps: Vec<_> = LineCursor::new(Point::new(0, 0), Point::new(5, 2)).collect();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0].point, Point::new(0, 0));
        assert_eq!(steps[5].point, Point::new(5, 2));
        assert!(steps.iter().all(|s| s.minor_advance <= 1));
    }

    #[test]
    fn test_cursor_corner_on_minor_move() {
        let steps: Vec<_> = LineCursor::new(Point::new(0, 0), Point::new(1, 3)).collect();
        let moved = steps.iter().find(|s| s.minor_advance == 1).unwrap();
        let corner = moved.corner.unwrap();
        assert_eq!(corner.y, moved.point.y);
        assert_eq!(corner.x, moved.point.x - 1);
    }

    #[test]
    fn test_cursor_straight_and_diagonal() {
        assert!(LineCursor::new(Point::new(4, 1), Point::new(0, 1)).all(|s| s.point.y == 1));
        let diag: Vec<_> = LineCursor::new(Point::new(3, 0), Point::new(0, 3)).map(|s| s.point).collect();
        assert_eq!(diag, [Point::new(3, 0), Point::new(2, 1), Point::new(1, 2), Point::new(0, 3)]);
    }

    #[test]
    fn test_vertical_line() {
        let cells = with_surface(4, 6, |s| {
            s.line(Point::new(2, 5), Point::new(2, 1), Color::GREEN).unwrap();
        });
        assert_eq!(lit(&cells, 4), [(2, 1), (2, 2), (2, 3), (2, 4), (2, 5)]);
    }

    #[test]
    fn test_diagonals_both_directions() {
        let cells = with_surface(5, 5, |s| {
            s.line(Point::new(0, 0), Point::new(3, 3), Color::RED).unwrap();
        });
        assert_eq!(lit(&cells, 5), [(0, 0), (1, 1), (2, 2), (3, 3)]);

        let cells = with_surface(5, 5, |s| {
            s.line(Point::new(1, 4), Point::new(4, 1), Color::RED).unwrap();
        });
        assert_eq!(lit(&cells, 5), [(4, 1), (3, 2), (2, 3), (1, 4)]);
    }

    #[test]
    fn test_general_line_one_pixel_per_major_step() {
        let cells = with_surface(10, 10, |s| {
            s.line(Point::new(8, 7), Point::new(1, 2), Color::WHITE).unwrap();
        });
        let pixels = lit(&cells, 10);
        assert_eq!(pixels.len(), 8);
        assert!(pixels.contains(&(1, 2)) && pixels.contains(&(8, 7)));
        for x in 1..=8 {
            assert_eq!(pixels.iter().filter(|p| p.0 == x).count(), 1);
        }
    }

    #[test]
    fn test_rejects_offscreen_endpoint() {
        let cells = with_surface(4, 4, |s| {
            assert_eq!(
                s.line(Point::new(0, 0), Point::new(4, 2), Color::RED),
                Err(DrawError::EndpointOutOfBounds { x: 4, y: 2 })
            );
            assert!(s.line(Point::new(-1, 0), Point::new(2, 2), Color::RED).is_err());
        });
        assert!(lit(&cells, 4).is_empty());
    }

    #[test]
    fn test_transparent_line_is_noop() {
        let cells = with_surface(4, 4, |s| {
            let t = s.transparent().unwrap();
            assert_eq!(s.line(Point::new(0, 0), Point::new(9, 9), t), Ok(()));
        });
        assert!(lit(&cells, 4).is_empty());
    }
}

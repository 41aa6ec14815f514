//! Rectangles, quads and triangles composed from lines and runs.
//!
//! Rectangle extents are inclusive: a `width` of 3 covers 4 columns.

use embedded_graphics_core::geometry::Point;

use crate::draw::line::LineCursor;
use crate::error::{DrawError, DrawResult};
use crate::framebuffer::{Color, Surface};

impl Surface<'_> {
    pub fn rectangle(&mut self, top_left: Point, width: u32, height: u32, color: Color) -> DrawResult {
        if self.is_transparent(color) {
            return Ok(());
        }
        let bottom_right = self.far_corner(top_left, width, height)?;
        let top_right = Point::new(bottom_right.x, top_left.y);
        let bottom_left = Point::new(top_left.x, bottom_right.y);

        self.line_unchecked(top_left, top_right, color);
        self.line_unchecked(top_right, bottom_right, color);
        self.line_unchecked(bottom_right, bottom_left, color);
        self.line_unchecked(bottom_left, top_left, color);
        Ok(())
    }

    /// One bulk run per row
    pub fn filled_rectangle(&mut self, top_left: Point, width: u32, height: u32, color: Color) -> DrawResult {
        if self.is_transparent(color) {
            return Ok(());
        }
        let bottom_right = self.far_corner(top_left, width, height)?;
        let len = width as usize + 1;
        for y in top_left.y..=bottom_right.y {
            self.span(top_left.x as usize, y as usize, len, color);
        }
        Ok(())
    }

    pub fn triangle(&mut self, vertices: [Point; 3], color: Color) -> DrawResult {
        self.polygon(&vertices, color)
    }

    pub fn quad(&mut self, vertices: [Point; 4], color: Color) -> DrawResult {
        self.polygon(&vertices, color)
    }

    /// Sweep the edge `vertices[0] -> vertices[1]`, joining every step to
    /// `vertices[2]`.
    ///
    /// When the swept point moves diagonally, an extra line from the corner
    /// it cut closes the stair-step gap. Vertex order picks the swept edge,
    /// so two triangles sharing an edge may leave a one-pixel seam.
    pub fn filled_triangle(&mut self, vertices: [Point; 3], color: Color) -> DrawResult {
        if self.is_transparent(color) {
            return Ok(());
        }
        for &v in &vertices {
            self.check_endpoint(v)?;
        }
        self.sweep_triangle(vertices, color);
        Ok(())
    }

    /// Two filled triangles sharing the `vertices[0]`-`vertices[2]` diagonal
    pub fn filled_quad(&mut self, vertices: [Point; 4], color: Color) -> DrawResult {
        if self.is_transparent(color) {
            return Ok(());
        }
        for &v in &vertices {
            self.check_endpoint(v)?;
        }
        let [a, b, c, d] = vertices;
        self.sweep_triangle([a, b, c], color);
        self.sweep_triangle([c, d, a], color);
        Ok(())
    }

    fn polygon(&mut self, vertices: &[Point], color: Color) -> DrawResult {
        if self.is_transparent(color) {
            return Ok(());
        }
        for &v in vertices {
            self.check_endpoint(v)?;
        }
        for (i, &from) in vertices.iter().enumerate() {
            let to = vertices[(i + 1) % vertices.len()];
            self.line_unchecked(from, to, color);
        }
        Ok(())
    }

    fn sweep_triangle(&mut self, [from, to, apex]: [Point; 3], color: Color) {
        for step in LineCursor::new(from, to) {
            self.line_unchecked(step.point, apex, color);
            if let Some(corner) = step.corner {
                self.line_unchecked(corner, apex, color);
            }
        }
    }

    /// Validate both corners of an inclusive rectangle, returning the far one
    fn far_corner(&self, top_left: Point, width: u32, height: u32) -> Result<Point, DrawError> {
        self.check_endpoint(top_left)?;
        let x = top_left.x as i64 + width as i64;
        let y = top_left.y as i64 + height as i64;
        if x >= self.width() as i64 || y >= self.height() as i64 {
            let err = DrawError::EndpointOutOfBounds { x, y };
            log::warn!("rectangle: {}", err);
            return Err(err);
        }
        Ok(Point::new(x as i32, y as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{PixelLayout, SurfaceInfo};
    use alloc::vec;
    use alloc::vec::Vec;

    const SIZE: usize = 12;

    fn render(f: impl FnOnce(&mut Surface<'_>)) -> Vec<(i32, i32)> {
        let mut cells = vec![0u32; SIZE * SIZE];
        let mut s = Surface::new(
            &mut cells,
            SurfaceInfo {
                width: SIZE,
                height: SIZE,
                stride: SIZE,
                layout: PixelLayout::Bgr,
            },
        )
        .unwrap();
        f(&mut s);
        cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != 0)
            .map(|(i, _)| ((i % SIZE) as i32, (i / SIZE) as i32))
            .collect()
    }

    #[test]
    fn test_rectangle_outline() {
        let lit = render(|s| {
            s.rectangle(Point::new(2, 3), 3, 2, Color::RED).unwrap();
        });
        assert_eq!(lit.len(), 10);
        assert!(lit.contains(&(2, 3)) && lit.contains(&(5, 5)));
        assert!(!lit.contains(&(3, 4)));
    }

    #[test]
    fn test_rectangle_rejects_far_corner() {
        let lit = render(|s| {
            assert_eq!(
                s.filled_rectangle(Point::new(8, 8), 4, 1, Color::RED),
                Err(DrawError::EndpointOutOfBounds { x: 12, y: 9 })
            );
            assert!(s.rectangle(Point::new(0, 0), u32::MAX, 1, Color::RED).is_err());
        });
        assert!(lit.is_empty());
    }

    #[test]
    fn test_triangle_outline_closes() {
        let lit = render(|s| {
            s.triangle([Point::new(1, 1), Point::new(7, 1), Point::new(1, 7)], Color::RED)
                .unwrap();
        });
        for x in 1..=7 {
            assert!(lit.contains(&(x, 1)));
            assert!(lit.contains(&(1, x)));
            assert!(lit.contains(&(8 - x, x)));
        }
    }

    #[test]
    fn test_quad_outline_validates_every_vertex() {
        let lit = render(|s| {
            let r = s.quad(
                [Point::new(0, 0), Point::new(3, 0), Point::new(3, 3), Point::new(0, 12)],
                Color::RED,
            );
            assert_eq!(r, Err(DrawError::EndpointOutOfBounds { x: 0, y: 12 }));
        });
        assert!(lit.is_empty());
    }

    #[test]
    fn test_filled_triangle_stays_inside() {
        let lit = render(|s| {
            s.filled_triangle([Point::new(0, 0), Point::new(6, 0), Point::new(0, 6)], Color::RED)
                .unwrap();
        });
        assert!(lit.contains(&(0, 0)) && lit.contains(&(6, 0)) && lit.contains(&(0, 6)));
        assert!(lit.contains(&(2, 2)));
        assert!(lit.iter().all(|&(x, y)| x + y <= 6));
    }

    #[test]
    fn test_filled_triangle_slanted_edge() {
        let lit = render(|s| {
            s.filled_triangle([Point::new(1, 1), Point::new(9, 5), Point::new(1, 9)], Color::RED)
                .unwrap();
        });
        assert!(lit.contains(&(9, 5)) && lit.contains(&(3, 5)));
        assert!(lit.iter().all(|&(x, y)| (1..=9).contains(&x) && (1..=9).contains(&y)));
    }

    #[test]
    fn test_filled_quad() {
        let lit = render(|s| {
            s.filled_quad(
                [Point::new(1, 1), Point::new(5, 1), Point::new(5, 5), Point::new(1, 5)],
                Color::RED,
            )
            .unwrap();
        });
        for corner in [(1, 1), (5, 1), (5, 5), (1, 5), (3, 3)] {
            assert!(lit.contains(&corner));
        }
        assert!(lit.iter().all(|&(x, y)| (1..=5).contains(&x) && (1..=5).contains(&y)));
    }
}

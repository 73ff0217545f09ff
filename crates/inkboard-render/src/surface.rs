//! The drawable raster surface.

use inkboard_core::Color;
use kurbo::Point;

/// The live drawable raster.
///
/// The backing buffer is allocated at `logical size × scale` physical pixels
/// (RGBA8, row-major, straight alpha); drawing commands take logical
/// coordinates and are mapped through the scale factor internally so content
/// stays sharp on high-DPI displays. The surface owns its buffer exclusively
/// and carries no history; it is the thing that gets snapshotted.
#[derive(Debug, Clone)]
pub struct Surface {
    width: f64,
    height: f64,
    scale: f64,
    px_width: u32,
    px_height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface. Returns `None` for a zero-area or
    /// non-finite size, which callers treat as "keep whatever you had".
    pub fn new(width: f64, height: f64, scale: f64) -> Option<Self> {
        if !(width > 0.0 && height > 0.0 && scale > 0.0) {
            return None;
        }
        if !(width.is_finite() && height.is_finite() && scale.is_finite()) {
            return None;
        }

        let px_width = (width * scale).round().max(1.0) as u32;
        let px_height = (height * scale).round().max(1.0) as u32;
        let pixels = vec![0; px_width as usize * px_height as usize * 4];

        Some(Self {
            width,
            height,
            scale,
            px_width,
            px_height,
            pixels,
        })
    }

    /// Logical width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Device pixel ratio.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Backing buffer width in physical pixels.
    pub fn px_width(&self) -> u32 {
        self.px_width
    }

    /// Backing buffer height in physical pixels.
    pub fn px_height(&self) -> u32 {
        self.px_height
    }

    /// The raw RGBA8 pixel buffer, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Read the pixel at physical coordinates, `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.px_width || y >= self.px_height {
            return None;
        }
        let i = self.index(x, y);
        Some(Color::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ))
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = color.a;
        }
    }

    /// Reset to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.px_width as usize + x as usize) * 4
    }

    /// Source-over blend `src` onto the pixel at physical (x, y).
    /// Caller guarantees the coordinates are in bounds.
    fn blend_pixel(&mut self, x: u32, y: u32, src: Color) {
        let i = self.index(x, y);
        let sa = src.a as u32;
        if sa == 0 {
            return;
        }
        if sa == 255 {
            self.pixels[i] = src.r;
            self.pixels[i + 1] = src.g;
            self.pixels[i + 2] = src.b;
            self.pixels[i + 3] = 255;
            return;
        }

        let da = self.pixels[i + 3] as u32;
        let inv = 255 - sa;
        let out_a = sa + da * inv / 255;
        if out_a == 0 {
            self.pixels[i..i + 4].fill(0);
            return;
        }

        let blend = |sc: u8, dc: u8| -> u8 {
            let s = sc as u32 * sa;
            let d = dc as u32 * da * inv / 255;
            ((s + d) / out_a) as u8
        };
        self.pixels[i] = blend(src.r, self.pixels[i]);
        self.pixels[i + 1] = blend(src.g, self.pixels[i + 1]);
        self.pixels[i + 2] = blend(src.b, self.pixels[i + 2]);
        self.pixels[i + 3] = out_a as u8;
    }

    /// Stamp a filled disc at a logical center with a logical radius.
    ///
    /// Discs are the brush's dab primitive; stamping them along a segment
    /// yields round caps and round joins for free.
    pub fn fill_disc(&mut self, center: Point, radius: f64, color: Color) {
        let cx = center.x * self.scale;
        let cy = center.y * self.scale;
        // Keep a dab from vanishing at small widths: pixel centers sit up to
        // ~0.71 px from a lattice point, so the radius must reach past that.
        let r = (radius * self.scale).max(0.75);
        let r2 = r * r;

        if cx + r < 0.0
            || cy + r < 0.0
            || cx - r > self.px_width as f64
            || cy - r > self.px_height as f64
        {
            return;
        }

        let min_x = ((cx - r).floor().max(0.0)) as u32;
        let max_x = ((cx + r).ceil().min(self.px_width as f64 - 1.0)) as u32;
        let min_y = ((cy - r).floor().max(0.0)) as u32;
        let max_y = ((cy + r).ceil().min(self.px_height as f64 - 1.0)) as u32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at the pixel center.
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Stamp discs along the segment from `from` to `to` (logical
    /// coordinates, `width` is the stroke diameter). Dab spacing stays below
    /// half the radius so the stamps fuse into a solid, round-ended line.
    pub fn stamp_segment(&mut self, from: Point, to: Point, width: f64, color: Color) {
        let radius = width / 2.0;
        let dist = from.distance(to);
        if dist == 0.0 {
            self.fill_disc(from, radius, color);
            return;
        }

        let spacing = (radius * 0.5).max(0.25 / self.scale);
        let steps = (dist / spacing).ceil() as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = from.lerp(to, t);
            self.fill_disc(p, radius, color);
        }
    }

    /// Replace the surface content with `src` pixels (RGBA8, `src_w` ×
    /// `src_h`), stretched to fit with nearest-neighbour sampling, anchored
    /// top-left. Identity when the source matches the backing buffer size.
    pub fn blit_scaled(&mut self, src: &[u8], src_w: u32, src_h: u32) {
        if src_w == 0 || src_h == 0 {
            return;
        }
        if src.len() < src_w as usize * src_h as usize * 4 {
            log::warn!(
                "image buffer too small for {}x{}, ignoring",
                src_w,
                src_h
            );
            return;
        }

        for y in 0..self.px_height {
            let sy = (y as u64 * src_h as u64 / self.px_height as u64) as usize;
            for x in 0..self.px_width {
                let sx = (x as u64 * src_w as u64 / self.px_width as u64) as usize;
                let si = (sy * src_w as usize + sx) * 4;
                let di = self.index(x, y);
                self.pixels[di..di + 4].copy_from_slice(&src[si..si + 4]);
            }
        }
    }

    /// A copy of this surface drawn over an opaque `background` fill.
    ///
    /// The live surface keeps unpainted regions transparent; the copy is
    /// filled first so every pixel of the result is opaque.
    pub fn composited_over(&self, background: Color) -> Surface {
        let mut out = self.clone();
        out.fill(Color::opaque(background.r, background.g, background.b));
        for y in 0..self.px_height {
            for x in 0..self.px_width {
                let i = self.index(x, y);
                let src = Color::new(
                    self.pixels[i],
                    self.pixels[i + 1],
                    self.pixels[i + 2],
                    self.pixels[i + 3],
                );
                out.blend_pixel(x, y, src);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_sizes() {
        assert!(Surface::new(0.0, 100.0, 1.0).is_none());
        assert!(Surface::new(100.0, 0.0, 1.0).is_none());
        assert!(Surface::new(100.0, 100.0, 0.0).is_none());
        assert!(Surface::new(f64::NAN, 100.0, 1.0).is_none());
        assert!(Surface::new(100.0, 100.0, 1.0).is_some());
    }

    #[test]
    fn test_scale_inflates_backing_buffer() {
        let surface = Surface::new(100.0, 50.0, 2.0).unwrap();
        assert_eq!(surface.px_width(), 200);
        assert_eq!(surface.px_height(), 100);
        assert_eq!(surface.pixels().len(), 200 * 100 * 4);
    }

    #[test]
    fn test_starts_transparent_and_fills() {
        let mut surface = Surface::new(4.0, 4.0, 1.0).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));

        surface.fill(Color::WHITE);
        assert_eq!(surface.pixel(3, 3), Some(Color::WHITE));

        surface.clear();
        assert_eq!(surface.pixel(3, 3), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_disc_covers_center_not_corners() {
        let mut surface = Surface::new(16.0, 16.0, 1.0).unwrap();
        surface.fill_disc(Point::new(8.0, 8.0), 3.0, Color::BLACK);

        assert_eq!(surface.pixel(8, 8), Some(Color::BLACK));
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(15, 15), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_disc_respects_scale() {
        let mut surface = Surface::new(8.0, 8.0, 2.0).unwrap();
        surface.fill_disc(Point::new(4.0, 4.0), 2.0, Color::BLACK);

        // Logical (4, 4) lands at physical (8, 8); the radius spans 4 px.
        assert_eq!(surface.pixel(8, 8), Some(Color::BLACK));
        assert_eq!(surface.pixel(11, 8), Some(Color::BLACK));
        assert_eq!(surface.pixel(14, 8), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_disc_clips_at_edges() {
        let mut surface = Surface::new(8.0, 8.0, 1.0).unwrap();
        // Mostly off-canvas; must not panic and must paint the corner.
        surface.fill_disc(Point::new(0.0, 0.0), 4.0, Color::BLACK);
        assert_eq!(surface.pixel(0, 0), Some(Color::BLACK));

        surface.fill_disc(Point::new(100.0, 100.0), 4.0, Color::BLACK);
    }

    #[test]
    fn test_segment_connects_endpoints() {
        let mut surface = Surface::new(32.0, 32.0, 1.0).unwrap();
        surface.stamp_segment(Point::new(4.0, 16.0), Point::new(28.0, 16.0), 4.0, Color::BLACK);

        // Solid along the whole run, nothing far above it.
        for x in 4..=28 {
            assert_eq!(surface.pixel(x, 16), Some(Color::BLACK), "gap at x={}", x);
        }
        assert_eq!(surface.pixel(16, 4), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_blit_identity_preserves_pixels() {
        let mut a = Surface::new(8.0, 8.0, 1.0).unwrap();
        a.fill_disc(Point::new(4.0, 4.0), 2.0, Color::opaque(200, 10, 50));

        let mut b = Surface::new(8.0, 8.0, 1.0).unwrap();
        b.blit_scaled(a.pixels(), a.px_width(), a.px_height());
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_blit_stretches_to_fit() {
        let mut small = Surface::new(2.0, 2.0, 1.0).unwrap();
        small.fill(Color::opaque(1, 2, 3));

        let mut big = Surface::new(8.0, 8.0, 1.0).unwrap();
        big.blit_scaled(small.pixels(), small.px_width(), small.px_height());
        assert_eq!(big.pixel(0, 0), Some(Color::opaque(1, 2, 3)));
        assert_eq!(big.pixel(7, 7), Some(Color::opaque(1, 2, 3)));
    }

    #[test]
    fn test_composited_over_is_fully_opaque() {
        let mut surface = Surface::new(8.0, 8.0, 1.0).unwrap();
        surface.fill_disc(Point::new(4.0, 4.0), 2.0, Color::BLACK);

        let flat = surface.composited_over(Color::WHITE);
        assert_eq!(flat.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(flat.pixel(4, 4), Some(Color::BLACK));
        for y in 0..flat.px_height() {
            for x in 0..flat.px_width() {
                assert_eq!(flat.pixel(x, y).map(|c| c.a), Some(255));
            }
        }
    }
}

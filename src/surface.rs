//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::{rect, Color, RectExt, Recti, UiError};

/// Owned raster buffer. All drawing operations clip against the surface
/// bounds; calls whose target is fully outside are no-ops. A surface never
/// outlives its buffer and a window's surface is exclusively owned by that
/// window.
pub struct Surface {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl Surface {
    /// Allocates a surface of the given dimensions filled with transparent
    /// black. Fails instead of panicking when the dimensions are not positive.
    pub fn new(width: i32, height: i32) -> Result<Self, UiError> {
        if width <= 0 || height <= 0 {
            return Err(UiError::InvalidSurfaceSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Color::default(); width as usize * height as usize],
        })
    }

    /// Returns the surface width in pixels.
    pub fn width(&self) -> i32 { self.width }

    /// Returns the surface height in pixels.
    pub fn height(&self) -> i32 { self.height }

    /// Returns the surface bounds as a rectangle rooted at the origin.
    pub fn bounds(&self) -> Recti { rect(0, 0, self.width, self.height) }

    fn clip(&self, r: Recti) -> Recti { r.clip_to(&self.bounds()) }

    #[inline]
    fn row(&mut self, y: i32) -> &mut [Color] {
        let start = y as usize * self.width as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    /// Reads a single pixel; returns `None` outside the bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Fills a rectangle with a solid color, ignoring the color's alpha.
    pub fn fill(&mut self, r: Recti, color: Color) {
        let r = self.clip(r);
        for y in r.y..r.y + r.height {
            let row = self.row(y);
            for px in &mut row[r.x as usize..(r.x + r.width) as usize] {
                *px = color;
            }
        }
    }

    /// Alpha-blends a rectangle over the existing pixels using the color's
    /// alpha as the source weight (source-over).
    pub fn blend(&mut self, r: Recti, color: Color) {
        let r = self.clip(r);
        let a = color.a as u32;
        if a == 0 {
            return;
        }
        if a == 255 {
            self.fill(r, color);
            return;
        }
        let inv = 255 - a;
        for y in r.y..r.y + r.height {
            let row = self.row(y);
            for px in &mut row[r.x as usize..(r.x + r.width) as usize] {
                px.r = ((color.r as u32 * a + px.r as u32 * inv) / 255) as u8;
                px.g = ((color.g as u32 * a + px.g as u32 * inv) / 255) as u8;
                px.b = ((color.b as u32 * a + px.b as u32 * inv) / 255) as u8;
                px.a = 255;
            }
        }
    }

    /// Tiles `pattern` across the rectangle. The tiling is phase-locked to
    /// the destination origin so adjacent fills line up seamlessly.
    pub fn fill_pattern(&mut self, r: Recti, pattern: &Surface) {
        if pattern.width <= 0 || pattern.height <= 0 {
            return;
        }
        let r = self.clip(r);
        for y in r.y..r.y + r.height {
            let src_y = (y.rem_euclid(pattern.height)) as usize;
            let src_row = &pattern.pixels[src_y * pattern.width as usize..(src_y + 1) * pattern.width as usize];
            let row = self.row(y);
            for x in r.x..r.x + r.width {
                row[x as usize] = src_row[x.rem_euclid(pattern.width) as usize];
            }
        }
    }

    /// Draws a 1px box outline along the inside edge of the rectangle.
    pub fn draw_box(&mut self, r: Recti, color: Color) {
        if r.width <= 0 || r.height <= 0 {
            return;
        }
        self.fill(rect(r.x, r.y, r.width, 1), color);
        self.fill(rect(r.x, r.y + r.height - 1, r.width, 1), color);
        self.fill(rect(r.x, r.y + 1, 1, r.height - 2), color);
        self.fill(rect(r.x + r.width - 1, r.y + 1, 1, r.height - 2), color);
    }

    /// Copies the whole of `src` to the given destination position, clipped
    /// against this surface's bounds.
    pub fn blit(&mut self, src: &Surface, dst_x: i32, dst_y: i32) { self.blit_rect(src, src.bounds(), dst_x, dst_y) }

    /// Copies `src_rect` out of `src` to the given destination position.
    /// The source rectangle is clipped against the source bounds and the
    /// destination against this surface's bounds.
    pub fn blit_rect(&mut self, src: &Surface, src_rect: Recti, dst_x: i32, dst_y: i32) {
        let src_rect = src_rect.clip_to(&src.bounds());
        let dst_rect = self.clip(rect(dst_x, dst_y, src_rect.width, src_rect.height));
        if dst_rect.width <= 0 || dst_rect.height <= 0 {
            return;
        }
        // account for destination clipping shifting the copy origin
        let sx = src_rect.x + (dst_rect.x - dst_x);
        let sy = src_rect.y + (dst_rect.y - dst_y);
        for dy in 0..dst_rect.height {
            let src_start = (sy + dy) as usize * src.width as usize + sx as usize;
            let dst_start = (dst_rect.y + dy) as usize * self.width as usize + dst_rect.x as usize;
            let w = dst_rect.width as usize;
            self.pixels[dst_start..dst_start + w].copy_from_slice(&src.pixels[src_start..src_start + w]);
        }
    }

    /// Grants scoped direct pixel access. The lock borrows the surface
    /// mutably, so no drawing operation can interleave with raw access.
    pub fn lock(&mut self) -> PixelLock<'_> { PixelLock { surface: self } }
}

/// Scoped direct pixel access handed out by [`Surface::lock`].
pub struct PixelLock<'a> {
    surface: &'a mut Surface,
}

impl<'a> PixelLock<'a> {
    /// Returns the pixel row at `y`, or `None` outside the bounds.
    pub fn row(&mut self, y: i32) -> Option<&mut [Color]> {
        if y < 0 || y >= self.surface.height {
            return None;
        }
        Some(self.surface.row(y))
    }

    /// Returns the full pixel buffer in row-major order.
    pub fn pixels(&mut self) -> &mut [Color] { &mut self.surface.pixels }

    /// Returns the locked surface's width in pixels.
    pub fn width(&self) -> i32 { self.surface.width }

    /// Returns the locked surface's height in pixels.
    pub fn height(&self) -> i32 { self.surface.height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn new_rejects_bad_dimensions() {
        assert!(Surface::new(0, 10).is_err());
        assert!(Surface::new(10, -1).is_err());
        assert!(Surface::new(4, 4).is_ok());
    }

    #[test]
    fn fill_is_clipped_to_bounds() {
        let mut s = Surface::new(4, 4).unwrap();
        s.fill(rect(2, 2, 10, 10), color(255, 0, 0, 255));
        assert_eq!(s.pixel(3, 3), Some(color(255, 0, 0, 255)));
        assert_eq!(s.pixel(1, 1), Some(Color::default()));
        assert_eq!(s.pixel(4, 4), None);
    }

    #[test]
    fn blend_weighs_source_by_alpha() {
        let mut s = Surface::new(2, 1).unwrap();
        s.fill(s.bounds(), color(0, 0, 0, 255));
        s.blend(s.bounds(), color(255, 255, 255, 128));
        let px = s.pixel(0, 0).unwrap();
        assert_eq!(px.r, 128);
        assert_eq!(px.a, 255);
    }

    #[test]
    fn blit_clips_source_and_destination() {
        let mut src = Surface::new(4, 4).unwrap();
        src.fill(src.bounds(), color(9, 9, 9, 255));
        let mut dst = Surface::new(4, 4).unwrap();
        dst.blit(&src, 2, 2);
        assert_eq!(dst.pixel(2, 2), Some(color(9, 9, 9, 255)));
        assert_eq!(dst.pixel(1, 1), Some(Color::default()));

        // negative destination shifts the copy origin into the source
        let mut dst2 = Surface::new(4, 4).unwrap();
        src.fill(rect(0, 0, 1, 1), color(1, 2, 3, 255));
        dst2.blit(&src, -1, -1);
        assert_eq!(dst2.pixel(0, 0), Some(color(9, 9, 9, 255)));
    }

    #[test]
    fn pattern_fill_is_phase_locked() {
        let mut pat = Surface::new(2, 1).unwrap();
        pat.fill(rect(0, 0, 1, 1), color(1, 1, 1, 255));
        pat.fill(rect(1, 0, 1, 1), color(2, 2, 2, 255));

        let mut s = Surface::new(4, 1).unwrap();
        s.fill_pattern(rect(0, 0, 2, 1), &pat);
        s.fill_pattern(rect(2, 0, 2, 1), &pat);
        // two separate fills must produce the same result as one
        assert_eq!(s.pixel(0, 0), Some(color(1, 1, 1, 255)));
        assert_eq!(s.pixel(1, 0), Some(color(2, 2, 2, 255)));
        assert_eq!(s.pixel(2, 0), Some(color(1, 1, 1, 255)));
        assert_eq!(s.pixel(3, 0), Some(color(2, 2, 2, 255)));
    }

    #[test]
    fn draw_box_outlines_inside_edge() {
        let mut s = Surface::new(4, 4).unwrap();
        let c = color(7, 7, 7, 255);
        s.draw_box(rect(0, 0, 4, 4), c);
        assert_eq!(s.pixel(0, 0), Some(c));
        assert_eq!(s.pixel(3, 3), Some(c));
        assert_eq!(s.pixel(1, 1), Some(Color::default()));
    }

    #[test]
    fn pixel_lock_gives_row_access() {
        let mut s = Surface::new(3, 2).unwrap();
        {
            let mut lock = s.lock();
            let row = lock.row(1).unwrap();
            row[2] = color(5, 5, 5, 255);
            assert!(lock.row(2).is_none());
        }
        assert_eq!(s.pixel(2, 1), Some(color(5, 5, 5, 255)));
    }
}

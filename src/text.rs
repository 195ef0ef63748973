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
use crate::{rect, Color, Dimensioni, RectExt, Recti, Surface, Vec2i};

#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// Handle referencing a font owned by the text backend.
pub struct FontId(usize);

impl FontId {
    /// Creates a font handle from a backend-defined index.
    pub fn new(index: usize) -> Self { Self(index) }

    /// Returns the backend-defined index wrapped by this handle.
    pub fn raw(self) -> usize { self.0 }
}

/// Narrow text measurement and drawing capability consumed by the widget
/// layer. Glyph rasterization lives entirely behind this trait; the toolkit
/// only measures strings and asks for clipped, tinted glyph runs.
pub trait TextRenderer {
    /// Returns the line height of the font in pixels.
    fn font_height(&self, font: FontId) -> i32;
    /// Returns the pixel dimensions of a single-line string.
    fn text_size(&self, font: FontId, text: &str) -> Dimensioni;
    /// Draws a single-line glyph run onto `surface`, tinted with `color` and
    /// clipped against `clip`.
    fn draw_text(&self, surface: &mut Surface, font: FontId, text: &str, pos: Vec2i, color: Color, clip: Recti);
}

#[derive(Copy, Clone, Debug)]
/// One wrapped line produced by [`wrap_text`], as byte offsets into the
/// original string plus its measured pixel width.
pub struct TextLine {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Measured pixel width of the line.
    pub width: i32,
}

fn push_wrapped_line(lines: &mut Vec<TextLine>, buf: &str, line_start: usize, line_end: usize, max_width: i32, font: FontId, text: &dyn TextRenderer) {
    let line = &buf[line_start..line_end];
    if line.is_empty() {
        lines.push(TextLine { start: line_start, end: line_start, width: 0 });
        return;
    }

    if max_width <= 0 {
        let width = text.text_size(font, line).width;
        lines.push(TextLine { start: line_start, end: line_end, width });
        return;
    }

    let mut offset = 0;
    let mut seg_start = 0;
    let mut seg_width = 0;
    for word in line.split_inclusive(' ') {
        let word_len = word.len();
        let word_width = text.text_size(font, word).width;
        if seg_width > 0 && seg_width + word_width > max_width {
            lines.push(TextLine {
                start: line_start + seg_start,
                end: line_start + offset,
                width: seg_width,
            });
            seg_start = offset;
            seg_width = 0;
        }
        seg_width += word_width;
        offset += word_len;
    }

    lines.push(TextLine {
        start: line_start + seg_start,
        end: line_start + line.len(),
        width: seg_width,
    });
}

/// Word-wraps `buf` into lines no wider than `max_width` pixels. Embedded
/// newlines always break; a non-positive `max_width` disables wrapping.
pub fn wrap_text(buf: &str, max_width: i32, font: FontId, text: &dyn TextRenderer) -> Vec<TextLine> {
    let mut lines = Vec::new();
    if buf.is_empty() {
        lines.push(TextLine { start: 0, end: 0, width: 0 });
        return lines;
    }

    let mut line_start = 0;
    for (idx, ch) in buf.char_indices() {
        if ch == '\n' {
            push_wrapped_line(&mut lines, buf, line_start, idx, max_width, font, text);
            line_start = idx + ch.len_utf8();
        }
    }

    if line_start <= buf.len() {
        push_wrapped_line(&mut lines, buf, line_start, buf.len(), max_width, font, text);
    }
    lines
}

/// Truncates `buf` so it fits into `max_width` pixels, appending an ellipsis
/// when anything was cut. Returns the original string untouched when it fits.
pub fn ellipsized(buf: &str, max_width: i32, font: FontId, text: &dyn TextRenderer) -> String {
    if text.text_size(font, buf).width <= max_width {
        return buf.to_string();
    }
    let ellipsis_width = text.text_size(font, "...").width;
    let budget = (max_width - ellipsis_width).max(0);
    let mut end = 0;
    for (idx, ch) in buf.char_indices() {
        let next = idx + ch.len_utf8();
        if text.text_size(font, &buf[..next]).width > budget {
            break;
        }
        end = next;
    }
    let mut out = buf[..end].to_string();
    out.push_str("...");
    out
}

/// Fixed-advance text backend that renders glyphs as solid blocks. Useful
/// for headless rendering and as the measurement double in tests.
pub struct FixedFont {
    advance: i32,
    height: i32,
}

impl FixedFont {
    /// Creates a backend with the given per-character advance and height.
    pub fn new(advance: i32, height: i32) -> Self { Self { advance, height } }
}

impl Default for FixedFont {
    fn default() -> Self { Self::new(8, 12) }
}

impl TextRenderer for FixedFont {
    fn font_height(&self, _font: FontId) -> i32 { self.height }

    fn text_size(&self, _font: FontId, text: &str) -> Dimensioni {
        Dimensioni::new(text.chars().count() as i32 * self.advance, self.height)
    }

    fn draw_text(&self, surface: &mut Surface, _font: FontId, text: &str, pos: Vec2i, color: Color, clip: Recti) {
        let clip = clip.clip_to(&surface.bounds());
        let mut x = pos.x;
        for ch in text.chars() {
            if !ch.is_whitespace() {
                let glyph = rect(x, pos.y + 1, (self.advance - 1).max(1), (self.height - 2).max(1));
                surface.fill(glyph.clip_to(&clip), color);
            }
            x += self.advance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        let font = FontId::default();
        let text = FixedFont::new(8, 12);
        // 10 chars budget per line at 8px advance
        let lines = wrap_text("alpha beta gamma", 80, font, &text);
        assert_eq!(lines.len(), 2);
        assert_eq!(&"alpha beta gamma"[lines[0].start..lines[0].end], "alpha ");
        assert_eq!(&"alpha beta gamma"[lines[1].start..lines[1].end], "beta gamma");
    }

    #[test]
    fn wrap_honors_embedded_newlines() {
        let font = FontId::default();
        let text = FixedFont::new(8, 12);
        let lines = wrap_text("a\n\nb", 0, font, &text);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].start, lines[1].end);
    }

    #[test]
    fn ellipsize_keeps_fitting_text() {
        let font = FontId::default();
        let text = FixedFont::new(8, 12);
        assert_eq!(ellipsized("short", 100, font, &text), "short");
        let cut = ellipsized("much too long to fit", 64, font, &text);
        assert!(cut.ends_with("..."));
        assert!(text.text_size(font, &cut).width <= 64);
    }
}

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
use crate::{
    rect, vec2, wrap_text, EventStatus, FontId, Id, Key, KeyMode, MouseButton, PaintCtx, RectExt, Recti, Slider, StyleColor, TextLine,
    Vec2i, Widget, WidgetBase, WidgetFlag,
};

/// Word-wrapped multi-line text display. The top visible line is exposed as
/// a scroll level so a [`Slider`] (or [`TextScroll`]) can drive it; the view
/// itself takes no input.
pub struct TextView {
    base: WidgetBase,
    text: String,
    lines: Vec<TextLine>,
    top_line: i32,
}

impl TextView {
    /// Creates a view over `text`. The text is wrapped on the first draw, or
    /// earlier through [`TextView::set_text`].
    pub fn new(id: Id, r: Recti, text: &str, flags: WidgetFlag) -> Self {
        Self {
            base: WidgetBase::new(id, r, flags),
            text: text.to_string(),
            lines: Vec::new(),
            top_line: 0,
        }
    }

    /// Replaces the text, rewraps it to the current width, clamps the scroll
    /// offset into the new range, and redraws.
    pub fn set_text(&mut self, ctx: &mut PaintCtx<'_>, text: &str) {
        self.text = text.to_string();
        self.reflow(ctx);
        self.show(ctx);
    }

    /// Returns the text as last set.
    pub fn text(&self) -> &str { &self.text }

    /// Returns the number of wrapped lines.
    pub fn line_count(&self) -> i32 { self.lines.len() as i32 }

    /// Returns the number of lines that fit in the view rectangle.
    pub fn visible_lines(&self, ctx: &PaintCtx<'_>) -> i32 {
        let line_h = ctx.font_height(FontId::default()).max(1);
        let inner_h = self.base.rect.height - 2 * ctx.style().padding;
        (inner_h / line_h).max(1)
    }

    /// Returns the index of the top visible line.
    pub fn level(&self) -> i32 { self.top_line }

    /// Scrolls so `line` becomes the top visible line (clamped), firing the
    /// hook when the offset changed.
    pub fn scroll_to(&mut self, ctx: &mut PaintCtx<'_>, line: i32) {
        let max_top = (self.line_count() - self.visible_lines(ctx)).max(0);
        let line = line.clamp(0, max_top);
        if line != self.top_line {
            self.top_line = line;
            self.base.notify(line);
            self.show(ctx);
        }
    }

    /// Rewraps the text to the current rectangle. Must be called after the
    /// rectangle changes width.
    pub fn reflow(&mut self, ctx: &mut PaintCtx<'_>) {
        let wrap_w = self.base.rect.width - 2 * ctx.style().padding;
        self.lines = wrap_text(&self.text, wrap_w, FontId::default(), ctx.text());
        let max_top = (self.line_count() - self.visible_lines(ctx)).max(0);
        self.top_line = self.top_line.clamp(0, max_top);
    }
}

impl Widget for TextView {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn draw(&mut self, ctx: &mut PaintCtx<'_>) {
        if self.lines.is_empty() {
            self.reflow(ctx);
        }
        let r = self.base.rect;
        ctx.fill(r, StyleColor::WindowBG);
        if self.base.flags.has_border() {
            ctx.draw_box(r, StyleColor::Border);
        }
        let pad = ctx.style().padding;
        let inner = rect(r.x + pad, r.y + pad, (r.width - 2 * pad).max(0), (r.height - 2 * pad).max(0));
        let line_h = ctx.font_height(FontId::default()).max(1);
        let color = ctx.style().color(StyleColor::Text);
        let visible = (inner.height / line_h).max(1);
        for row in 0..visible {
            let index = (self.top_line + row) as usize;
            let Some(line) = self.lines.get(index) else { break };
            let slice = &self.text[line.start..line.end];
            let x = if self.base.flags.is_aligned_center() {
                inner.x + (inner.width - line.width) / 2
            } else if self.base.flags.is_aligned_right() {
                inner.x + inner.width - line.width
            } else {
                inner.x
            };
            ctx.draw_text(FontId::default(), slice, vec2(x, inner.y + row * line_h), color, inner);
        }
    }
}

/// [`TextView`] paired with a vertical [`Slider`] that appears only while
/// the wrapped text overflows the view. The two stay synchronized through
/// their scroll levels.
pub struct TextScroll {
    base: WidgetBase,
    view: TextView,
    slider: Option<Slider>,
    slider_size: i32,
}

impl TextScroll {
    /// Creates the composite over `text`. [`TextScroll::set_text`] must be
    /// called once the widget is placed to perform the initial layout.
    pub fn new(id: Id, r: Recti, text: &str, flags: WidgetFlag) -> Self {
        let view_flags = (flags | WidgetFlag::SUBWIDGET) & !WidgetFlag::BORDER;
        Self {
            base: WidgetBase::new(id, r, flags),
            view: TextView::new(Id::new(id.raw() ^ 2), r, text, view_flags),
            slider: None,
            slider_size: 14,
        }
    }

    /// Returns the wrapped text view.
    pub fn view(&self) -> &TextView { &self.view }

    /// Returns `true` while the slider exists.
    pub fn has_slider(&self) -> bool { self.slider.is_some() }

    fn slider_rect(&self) -> Recti {
        let r = self.base.rect;
        rect(r.x + r.width - self.slider_size, r.y, self.slider_size, r.height)
    }

    /// Replaces the text. Wraps at full width first; only when the result
    /// overflows is the slider column carved out and the text rewrapped to
    /// the narrower view. The slider range follows the overflow.
    pub fn set_text(&mut self, ctx: &mut PaintCtx<'_>, text: &str) {
        let r = self.base.rect;
        self.view.base_mut().rect = r;
        self.view.set_text(ctx, text);

        let visible = self.view.visible_lines(ctx);
        if self.view.line_count() > visible {
            self.view.base_mut().rect = rect(r.x, r.y, (r.width - self.slider_size).max(0), r.height);
            self.view.reflow(ctx);
            let max_top = (self.view.line_count() - visible).max(0);
            match &mut self.slider {
                Some(slider) => slider.adjust(0, max_top, visible),
                None => {
                    self.slider = Some(Slider::new(
                        Id::new(self.base.id.raw() ^ 1),
                        self.slider_rect(),
                        0,
                        max_top,
                        visible,
                        WidgetFlag::SUBWIDGET,
                    ));
                }
            }
            if let Some(slider) = &mut self.slider {
                slider.scroll_to(ctx, self.view.level());
            }
        } else {
            self.slider = None;
        }
        self.show(ctx);
    }

    fn sync_from_slider(&mut self, ctx: &mut PaintCtx<'_>) {
        if let Some(slider) = &self.slider {
            let level = slider.level();
            self.view.scroll_to(ctx, level);
        }
    }
}

impl Widget for TextScroll {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn draw(&mut self, ctx: &mut PaintCtx<'_>) {
        self.view.draw(ctx);
        if let Some(slider) = &mut self.slider {
            slider.draw(ctx);
        }
        if self.base.flags.has_border() {
            ctx.draw_box(self.base.rect, StyleColor::Border);
        }
    }

    fn mouse_down(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, button: MouseButton) -> EventStatus {
        if !self.base.rect.contains_point(pos) {
            return EventStatus::Ignored;
        }
        let Some(slider) = &mut self.slider else {
            return EventStatus::Ignored;
        };
        let status = if button.is_wheel() {
            let r = slider.base().rect;
            slider.mouse_down(ctx, vec2(r.x + r.width / 2, r.y + r.height / 2), button)
        } else {
            slider.mouse_down(ctx, pos, button)
        };
        if !status.is_ignored() {
            self.sync_from_slider(ctx);
        }
        status
    }

    fn mouse_move(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, delta: Vec2i) -> EventStatus {
        let Some(slider) = &mut self.slider else {
            return EventStatus::Ignored;
        };
        let status = slider.mouse_move(ctx, pos, delta);
        if status.is_ok() {
            self.sync_from_slider(ctx);
        }
        status
    }

    fn mouse_up(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, button: MouseButton) -> EventStatus {
        match &mut self.slider {
            Some(slider) => slider.mouse_up(ctx, pos, button),
            None => EventStatus::Ignored,
        }
    }

    fn key_down(&mut self, ctx: &mut PaintCtx<'_>, key: Key, _mods: KeyMode) -> EventStatus {
        if !self.base.flags.has_scroll_keys() {
            return EventStatus::Ignored;
        }
        let level = self.view.level();
        let page = self.view.visible_lines(ctx);
        let target = match key {
            Key::Up => level - 1,
            Key::Down => level + 1,
            Key::PageUp => level - page,
            Key::PageDown => level + page,
            Key::Home => 0,
            Key::End => self.view.line_count(),
            _ => return EventStatus::Ignored,
        };
        match &mut self.slider {
            Some(slider) => {
                slider.scroll_to(ctx, target);
                self.sync_from_slider(ctx);
            }
            None => self.view.scroll_to(ctx, target),
        }
        EventStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirtyRegion, FixedFont, Style, Surface};

    fn with_ctx<R>(f: impl FnOnce(&mut PaintCtx<'_>) -> R) -> R {
        let mut surface = Surface::new(240, 240).unwrap();
        let text = FixedFont::default();
        let style = Style::default();
        let mut dirty = DirtyRegion::default();
        let mut ctx = PaintCtx::new(&mut surface, &text, &style, &mut dirty);
        f(&mut ctx)
    }

    #[test]
    fn scroll_level_clamps_to_the_wrapped_range() {
        with_ctx(|ctx| {
            // padding 4, advance 8: wrap width 92 fits 11 chars per line
            let mut view = TextView::new(Id::new(1), rect(0, 0, 100, 44), "one\ntwo\nthree\nfour\nfive\nsix", WidgetFlag::NONE);
            view.reflow(ctx);
            assert_eq!(view.line_count(), 6);
            // 36px inner height over 12px lines: 3 visible
            assert_eq!(view.visible_lines(ctx), 3);
            view.scroll_to(ctx, 99);
            assert_eq!(view.level(), 3);
            view.scroll_to(ctx, -4);
            assert_eq!(view.level(), 0);
        });
    }

    #[test]
    fn set_text_clamps_an_existing_offset() {
        with_ctx(|ctx| {
            let mut view = TextView::new(Id::new(1), rect(0, 0, 100, 44), "a\nb\nc\nd\ne\nf\ng\nh", WidgetFlag::NONE);
            view.reflow(ctx);
            view.scroll_to(ctx, 5);
            view.set_text(ctx, "a\nb\nc\nd");
            assert_eq!(view.level(), 1);
        });
    }

    #[test]
    fn text_scroll_grows_and_sheds_its_slider() {
        with_ctx(|ctx| {
            let mut ts = TextScroll::new(Id::new(1), rect(0, 0, 120, 44), "", WidgetFlag::SCROLL_KEYS);
            ts.set_text(ctx, "a\nb\nc\nd\ne\nf\ng\nh");
            assert!(ts.has_slider());
            ts.set_text(ctx, "a\nb");
            assert!(!ts.has_slider());
            assert_eq!(ts.view().level(), 0);
        });
    }

    #[test]
    fn keys_scroll_through_the_slider() {
        with_ctx(|ctx| {
            let mut ts = TextScroll::new(Id::new(1), rect(0, 0, 120, 44), "", WidgetFlag::SCROLL_KEYS);
            ts.set_text(ctx, "a\nb\nc\nd\ne\nf\ng\nh");
            ts.key_down(ctx, Key::Down, KeyMode::NONE);
            assert_eq!(ts.view().level(), 1);
            ts.key_down(ctx, Key::End, KeyMode::NONE);
            assert_eq!(ts.view().level(), 5);
            ts.key_down(ctx, Key::Home, KeyMode::NONE);
            assert_eq!(ts.view().level(), 0);
        });
    }

    #[test]
    fn wheel_over_the_body_scrolls_the_text() {
        with_ctx(|ctx| {
            let mut ts = TextScroll::new(Id::new(1), rect(0, 0, 120, 44), "", WidgetFlag::NONE);
            ts.set_text(ctx, "a\nb\nc\nd\ne\nf\ng\nh");
            let status = ts.mouse_down(ctx, vec2(10, 10), MouseButton::WHEEL_DOWN);
            assert_eq!(status, EventStatus::Ok);
            assert_eq!(ts.view().level(), 1);
        });
    }
}

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
    rect, vec2, EventStatus, FontId, Id, Key, KeyMode, MouseButton, PaintCtx, RectExt, Recti, StyleColor, Vec2i, Widget, WidgetBase,
    WidgetFlag,
};

/// Single-line editable text field. The buffer is edited in place with a
/// byte cursor kept on `char` boundaries; Return commits the buffer and
/// fires the hook, Escape rolls back to the last committed text.
pub struct StringInput {
    base: WidgetBase,
    text: String,
    committed: String,
    cursor: usize,
}

impl StringInput {
    /// Creates a field holding `text`, cursor at the end.
    pub fn new(id: Id, r: Recti, text: &str, flags: WidgetFlag) -> Self {
        Self {
            base: WidgetBase::new(id, r, flags),
            text: text.to_string(),
            committed: text.to_string(),
            cursor: text.len(),
        }
    }

    /// Returns the current (possibly uncommitted) buffer.
    pub fn text(&self) -> &str { &self.text }

    /// Returns the byte offset of the cursor.
    pub fn cursor(&self) -> usize { self.cursor }

    /// Replaces the buffer and the committed text, cursor at the end.
    pub fn set_text(&mut self, ctx: &mut PaintCtx<'_>, text: &str) {
        self.text = text.to_string();
        self.committed = text.to_string();
        self.cursor = self.text.len();
        self.show(ctx);
    }

    /// The string painted on screen; `PASSWORD` fields mask every character.
    fn display_text(&self) -> String {
        if self.base.flags.is_password() {
            "*".repeat(self.text.chars().count())
        } else {
            self.text.clone()
        }
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor].char_indices().next_back().map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    fn insert_char(&mut self, ctx: &mut PaintCtx<'_>, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.show(ctx);
    }

    // stores the buffer as the new committed text without firing the hook,
    // so wrappers can commit and report their own value
    fn store_committed(&mut self, ctx: &mut PaintCtx<'_>) {
        self.committed = self.text.clone();
        self.show(ctx);
    }

    fn commit(&mut self, ctx: &mut PaintCtx<'_>) {
        self.store_committed(ctx);
        self.base.notify(0);
    }

    fn rollback(&mut self, ctx: &mut PaintCtx<'_>) {
        self.text = self.committed.clone();
        self.cursor = self.cursor.min(self.text.len());
        while !self.text.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
        self.show(ctx);
    }
}

impl Widget for StringInput {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn draw(&mut self, ctx: &mut PaintCtx<'_>) {
        let r = self.base.rect;
        ctx.fill(r, StyleColor::WindowBG);
        ctx.draw_box(r, StyleColor::Border);
        let pad = ctx.style().padding;
        let inner = rect(r.x + pad, r.y + pad, (r.width - 2 * pad).max(0), (r.height - 2 * pad).max(0));
        let display = self.display_text();
        let color = ctx.style().color(StyleColor::Text);
        let font_h = ctx.font_height(FontId::default());
        let text_y = inner.y + (inner.height - font_h) / 2;
        ctx.draw_text(FontId::default(), &display, vec2(inner.x, text_y), color, inner);
        if !self.base.flags.is_readonly() {
            let chars_before = self.text[..self.cursor].chars().count();
            let before: String = display.chars().take(chars_before).collect();
            let caret_x = inner.x + ctx.text_width(FontId::default(), &before);
            let caret = rect(caret_x, text_y, 1, font_h).clip_to(&inner);
            ctx.fill(caret, StyleColor::Text);
        }
    }

    fn mouse_down(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, button: MouseButton) -> EventStatus {
        if !button.is_left() || !self.base.rect.contains_point(pos) {
            return EventStatus::Ignored;
        }
        // nearest glyph boundary to the click
        let pad = ctx.style().padding;
        let target = pos.x - (self.base.rect.x + pad);
        let display = self.display_text();
        let mut best = (0usize, i32::MAX);
        let mut display_w = 0;
        let mut byte = 0;
        for (d_ch, ch) in display.chars().zip(self.text.chars()) {
            let d = (display_w - target).abs();
            if d < best.1 {
                best = (byte, d);
            }
            display_w += ctx.text_width(FontId::default(), &d_ch.to_string());
            byte += ch.len_utf8();
        }
        let d = (display_w - target).abs();
        if d < best.1 {
            best = (self.text.len(), d);
        }
        self.cursor = best.0;
        self.show(ctx);
        EventStatus::Ok
    }

    fn key_down(&mut self, ctx: &mut PaintCtx<'_>, key: Key, _mods: KeyMode) -> EventStatus {
        let readonly = self.base.flags.is_readonly();
        match key {
            Key::Left => {
                self.cursor = self.prev_boundary();
                self.show(ctx);
                EventStatus::Ok
            }
            Key::Right => {
                self.cursor = self.next_boundary();
                self.show(ctx);
                EventStatus::Ok
            }
            Key::Home => {
                self.cursor = 0;
                self.show(ctx);
                EventStatus::Ok
            }
            Key::End => {
                self.cursor = self.text.len();
                self.show(ctx);
                EventStatus::Ok
            }
            Key::Backspace if !readonly => {
                if self.cursor > 0 {
                    let at = self.prev_boundary();
                    self.text.remove(at);
                    self.cursor = at;
                    self.show(ctx);
                }
                EventStatus::Ok
            }
            Key::Delete if !readonly => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                    self.show(ctx);
                }
                EventStatus::Ok
            }
            Key::Return if !readonly => {
                self.commit(ctx);
                EventStatus::Ok
            }
            Key::Escape if !readonly => {
                self.rollback(ctx);
                EventStatus::Ok
            }
            Key::Char(c) if !readonly && !c.is_control() => {
                self.insert_char(ctx, c);
                EventStatus::Ok
            }
            _ => EventStatus::Ignored,
        }
    }
}

/// Integer field built on [`StringInput`]: only digits (and a leading minus
/// for negative ranges) pass the filter, and committing with Return clamps
/// the parsed value into `[min, max]` and fires the hook with it.
pub struct NumberInput {
    input: StringInput,
    min: i32,
    max: i32,
    value: i32,
}

impl NumberInput {
    /// Creates a field over `[min, max]` starting at `value` (clamped).
    pub fn new(id: Id, r: Recti, value: i32, min: i32, max: i32, flags: WidgetFlag) -> Self {
        let value = value.clamp(min, max);
        Self {
            input: StringInput::new(id, r, &value.to_string(), flags),
            min,
            max,
            value,
        }
    }

    /// Returns the last committed value.
    pub fn value(&self) -> i32 { self.value }

    /// Returns the accepted range.
    pub fn range(&self) -> (i32, i32) { (self.min, self.max) }

    /// Sets the value (clamped) and rewrites the buffer.
    pub fn set_value(&mut self, ctx: &mut PaintCtx<'_>, value: i32) {
        self.value = value.clamp(self.min, self.max);
        self.input.set_text(ctx, &self.value.to_string());
    }

    fn accepts(&self, c: char) -> bool {
        if c.is_ascii_digit() {
            return true;
        }
        // a minus only makes sense up front in a signed range
        c == '-' && self.min < 0 && self.input.cursor() == 0 && !self.input.text().starts_with('-')
    }
}

impl Widget for NumberInput {
    fn base(&self) -> &WidgetBase { self.input.base() }

    fn base_mut(&mut self) -> &mut WidgetBase { self.input.base_mut() }

    fn draw(&mut self, ctx: &mut PaintCtx<'_>) { self.input.draw(ctx) }

    fn mouse_down(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, button: MouseButton) -> EventStatus {
        self.input.mouse_down(ctx, pos, button)
    }

    fn key_down(&mut self, ctx: &mut PaintCtx<'_>, key: Key, mods: KeyMode) -> EventStatus {
        match key {
            Key::Char(c) if !self.accepts(c) => EventStatus::Ignored,
            Key::Return if !self.input.base().flags.is_readonly() => {
                let parsed = self.input.text().parse::<i32>().unwrap_or(self.min);
                self.value = parsed.clamp(self.min, self.max);
                // rewrite the buffer so the clamp is visible, then commit
                let normalized = self.value.to_string();
                if self.input.text() != normalized {
                    self.input.set_text(ctx, &normalized);
                }
                self.input.store_committed(ctx);
                self.input.base().notify(self.value);
                EventStatus::Ok
            }
            _ => self.input.key_down(ctx, key, mods),
        }
    }
}

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
    rect, EventStatus, Id, MouseButton, PaintCtx, RectExt, Recti, StyleColor, Vec2i, Widget, WidgetBase, WidgetFlag,
};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Orientation of a slider track.
pub enum SliderAxis {
    /// Knob moves along the Y axis.
    Vertical,
    /// Knob moves along the X axis.
    Horizontal,
}

/// Draggable range control. Maps an inclusive `[min, max]` logical range
/// onto the track pixels; the knob length encodes the knob-size-to-range
/// ratio, so the same widget serves list scrolling, free-text scrolling,
/// and numeric ranges unmodified.
pub struct Slider {
    base: WidgetBase,
    axis: SliderAxis,
    min: i32,
    max: i32,
    knob_size: i32,
    level: i32,
    knob_px: i32,
    knob_pos: i32,
    step: f32,
    drag_grab: Option<i32>,
}

impl Slider {
    /// Creates a slider over `[min, max]` with the given knob size.
    pub fn new(id: Id, r: Recti, min: i32, max: i32, knob_size: i32, flags: WidgetFlag) -> Self {
        let axis = if flags.is_horizontal_scroll() { SliderAxis::Horizontal } else { SliderAxis::Vertical };
        let mut slider = Self {
            base: WidgetBase::new(id, r, flags),
            axis,
            min,
            max,
            knob_size,
            level: min,
            knob_px: 0,
            knob_pos: 1,
            step: 0.0,
            drag_grab: None,
        };
        slider.adjust(min, max, knob_size);
        slider
    }

    /// Returns the slider orientation.
    pub fn axis(&self) -> SliderAxis { self.axis }

    /// Returns the current level.
    pub fn level(&self) -> i32 { self.level }

    /// Returns the inclusive logical range.
    pub fn range(&self) -> (i32, i32) { (self.min, self.max) }

    /// Returns the knob size in range units.
    pub fn knob_size(&self) -> i32 { self.knob_size }

    fn track_px(&self) -> i32 {
        // the 1px border at each end is not part of the track
        let len = match self.axis {
            SliderAxis::Vertical => self.base.rect.height,
            SliderAxis::Horizontal => self.base.rect.width,
        };
        (len - 2).max(0)
    }

    /// Re-derives the pixel mapping for a new range and knob size, keeping
    /// (and clamping) the current level. A zero range produces a fixed knob
    /// filling the whole track.
    pub fn adjust(&mut self, min: i32, max: i32, knob_size: i32) {
        self.min = min;
        self.max = max.max(min);
        self.knob_size = knob_size.max(0);
        let track = self.track_px();
        let range = self.max - self.min;
        if range == 0 {
            self.knob_px = track;
            self.step = 0.0;
        } else {
            let ratio_len = if self.knob_size + range > 0 { track * self.knob_size / (self.knob_size + range) } else { 0 };
            self.knob_px = ratio_len.max(2).min(track);
            self.step = (track - self.knob_px) as f32 / range as f32;
        }
        self.level = self.level.clamp(self.min, self.max);
        self.knob_pos = self.pos_for(self.level);
    }

    fn pos_for(&self, level: i32) -> i32 {
        if self.step == 0.0 {
            return 1;
        }
        1 + (self.step * (level - self.min) as f32).round() as i32
    }

    fn level_for(&self, pos: i32) -> i32 {
        if self.step == 0.0 {
            return self.min;
        }
        let level = self.min + ((pos - 1) as f32 / self.step).round() as i32;
        level.clamp(self.min, self.max)
    }

    /// Returns the knob rectangle in window-local coordinates.
    pub fn knob_rect(&self) -> Recti {
        let r = self.base.rect;
        match self.axis {
            SliderAxis::Vertical => rect(r.x + 1, r.y + self.knob_pos, (r.width - 2).max(0), self.knob_px),
            SliderAxis::Horizontal => rect(r.x + self.knob_pos, r.y + 1, self.knob_px, (r.height - 2).max(0)),
        }
    }

    fn axis_pos(&self, pos: Vec2i) -> i32 {
        match self.axis {
            SliderAxis::Vertical => pos.y - self.base.rect.y,
            SliderAxis::Horizontal => pos.x - self.base.rect.x,
        }
    }

    /// Clamps `level` into range, repositions the knob through the linear
    /// mapping, fires the hook, and redraws. Idempotent: the same level
    /// always yields the same knob rectangle.
    pub fn scroll_to(&mut self, ctx: &mut PaintCtx<'_>, level: i32) {
        self.level = level.clamp(self.min, self.max);
        self.knob_pos = self.pos_for(self.level);
        self.base.notify(self.level);
        self.show(ctx);
    }

    fn drag_to(&mut self, ctx: &mut PaintCtx<'_>, track_pos: i32) {
        let max_pos = 1 + (self.track_px() - self.knob_px).max(0);
        let pos = track_pos.clamp(1, max_pos);
        let level = self.level_for(pos);
        // only a real level change fires the hook; pixel jitter does not
        if level != self.level {
            self.level = level;
            self.knob_pos = self.pos_for(level);
            self.base.notify(level);
            self.show(ctx);
        }
    }
}

impl Widget for Slider {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn draw(&mut self, ctx: &mut PaintCtx<'_>) {
        let r = self.base.rect;
        ctx.fill(r, StyleColor::Track);
        ctx.draw_box(r, StyleColor::Border);
        let knob = self.knob_rect();
        ctx.fill(knob, StyleColor::Knob);
        if self.base.is_pressed() {
            ctx.draw_box(knob, StyleColor::Text);
        } else {
            ctx.draw_box(knob, StyleColor::Border);
        }
    }

    fn mouse_down(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, button: MouseButton) -> EventStatus {
        if !self.base.rect.contains_point(pos) {
            return EventStatus::Ignored;
        }
        if button.intersects(MouseButton::WHEEL_UP) {
            let level = self.level - 1;
            self.scroll_to(ctx, level);
            return EventStatus::Ok;
        }
        if button.intersects(MouseButton::WHEEL_DOWN) {
            let level = self.level + 1;
            self.scroll_to(ctx, level);
            return EventStatus::Ok;
        }
        if !button.is_left() {
            return EventStatus::Ignored;
        }
        let track_pos = self.axis_pos(pos);
        if self.knob_rect().contains_point(pos) {
            if self.step != 0.0 {
                self.drag_grab = Some(track_pos - self.knob_pos);
                self.push(ctx);
            }
        } else if track_pos < self.knob_pos {
            let level = self.level - self.knob_size.max(1);
            self.scroll_to(ctx, level);
        } else {
            let level = self.level + self.knob_size.max(1);
            self.scroll_to(ctx, level);
        }
        EventStatus::Ok
    }

    fn mouse_move(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, _delta: Vec2i) -> EventStatus {
        match self.drag_grab {
            Some(grab) => {
                let track_pos = self.axis_pos(pos) - grab;
                self.drag_to(ctx, track_pos);
                EventStatus::Ok
            }
            None => EventStatus::Ignored,
        }
    }

    fn mouse_up(&mut self, ctx: &mut PaintCtx<'_>, _pos: Vec2i, button: MouseButton) -> EventStatus {
        if self.drag_grab.is_some() && button.is_left() {
            self.drag_grab = None;
            self.release(ctx);
            return EventStatus::Ok;
        }
        EventStatus::Ignored
    }
}

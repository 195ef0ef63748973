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
use crate::{rect, FontId, Id, PaintCtx, Recti, StyleColor, Widget, WidgetBase, WidgetFlag};

/// Read-only progress bar. Displays a percentage as a proportional fill with
/// the number centered on top; purely an output widget, all input handlers
/// keep their ignoring defaults.
pub struct Gauge {
    base: WidgetBase,
    percent: i32,
}

impl Gauge {
    /// Creates a gauge at `percent` (clamped to `0..=100`).
    pub fn new(id: Id, r: Recti, percent: i32, flags: WidgetFlag) -> Self {
        Self {
            base: WidgetBase::new(id, r, flags),
            percent: percent.clamp(0, 100),
        }
    }

    /// Returns the displayed percentage.
    pub fn percent(&self) -> i32 { self.percent }

    /// Sets the percentage (clamped to `0..=100`) and redraws.
    pub fn set_percent(&mut self, ctx: &mut PaintCtx<'_>, percent: i32) {
        let percent = percent.clamp(0, 100);
        if percent != self.percent {
            self.percent = percent;
            self.show(ctx);
        }
    }
}

impl Widget for Gauge {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn draw(&mut self, ctx: &mut PaintCtx<'_>) {
        let r = self.base.rect;
        ctx.fill(r, StyleColor::Track);
        let inner_w = (r.width - 2).max(0);
        let fill_w = inner_w * self.percent / 100;
        if fill_w > 0 {
            ctx.fill(rect(r.x + 1, r.y + 1, fill_w, (r.height - 2).max(0)), StyleColor::Selection);
        }
        ctx.draw_box(r, StyleColor::Border);
        let label = format!("{}%", self.percent);
        let color = ctx.style().color(StyleColor::Text);
        ctx.draw_control_text(FontId::default(), &label, r, color, WidgetFlag::ALIGN_CENTER);
    }
}

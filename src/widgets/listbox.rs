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
use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    rect, EventStatus, Id, Key, KeyMode, MouseButton, PaintCtx, RectExt, Recti, Slider, StyleColor, Vec2i, Widget, WidgetBase, WidgetFlag,
};

/// Ordered external item collection a [`ListBox`] presents a windowed view
/// over. The widget never stores items; it only counts them and asks the
/// source to paint individual rows.
pub trait ListSource {
    /// Returns the number of items.
    fn len(&self) -> usize;
    /// Returns `true` when the source holds no items.
    fn is_empty(&self) -> bool { self.len() == 0 }
    /// Paints the item at `index` into `area`.
    fn draw_item(&self, ctx: &mut PaintCtx<'_>, index: usize, area: Recti, selected: bool);
}

/// Windowed selection view over a [`ListSource`] too large to fit. When the
/// content overflows the visible rows, an internal vertical [`Slider`] is
/// created lazily and removed again once the content fits; wheel input and
/// knob drags anywhere over the list are funneled into that slider so both
/// behave identically.
pub struct ListBox {
    base: WidgetBase,
    source: Rc<RefCell<dyn ListSource>>,
    item_height: i32,
    slider_size: i32,
    count: usize,
    selected: Option<usize>,
    top_row: i32,
    slider: Option<Slider>,
}

impl ListBox {
    /// Creates a list over `source` with rows of `item_height` pixels.
    /// [`ListBox::update`] must be called once the widget is placed (and
    /// again after every change to the backing source).
    pub fn new(id: Id, r: Recti, source: Rc<RefCell<dyn ListSource>>, item_height: i32, flags: WidgetFlag) -> Self {
        Self {
            base: WidgetBase::new(id, r, flags),
            source,
            item_height: item_height.max(1),
            slider_size: 14,
            count: 0,
            selected: None,
            top_row: 0,
            slider: None,
        }
    }

    /// Overrides the width reserved for the internal slider column.
    pub fn with_slider_size(mut self, size: i32) -> Self {
        self.slider_size = size.max(3);
        self
    }

    /// Returns the number of items seen by the last [`ListBox::update`].
    pub fn count(&self) -> usize { self.count }

    /// Returns the selected index, or `-1` when nothing is selected.
    pub fn selected(&self) -> i32 {
        match self.selected {
            Some(i) => i as i32,
            None => -1,
        }
    }

    /// Returns the index of the top visible row.
    pub fn top_row(&self) -> i32 { self.top_row }

    /// Returns the number of fully visible rows.
    pub fn visible_rows(&self) -> i32 { (self.base.rect.height / self.item_height).max(1) }

    /// Returns `true` while the internal slider exists.
    pub fn has_slider(&self) -> bool { self.slider.is_some() }

    fn body_rect(&self) -> Recti {
        let r = self.base.rect;
        let slider_w = if self.slider.is_some() { self.slider_size } else { 0 };
        rect(r.x, r.y, (r.width - slider_w).max(0), r.height)
    }

    fn slider_rect(&self) -> Recti {
        let r = self.base.rect;
        rect(r.x + r.width - self.slider_size, r.y, self.slider_size, r.height)
    }

    /// Re-reads the backing source after it changed. Clamps an out-of-range
    /// selection to the last valid index and fires the hook for it
    /// (selection-changed-by-truncation is observable), then creates,
    /// resizes, or removes the internal slider to match the content.
    pub fn update(&mut self, ctx: &mut PaintCtx<'_>) {
        self.count = self.source.borrow().len();

        let mut changed_selection = None;
        match self.selected {
            Some(_) if self.count == 0 => {
                self.selected = None;
                changed_selection = Some(-1);
            }
            Some(sel) if sel >= self.count => {
                self.selected = Some(self.count - 1);
                changed_selection = Some(self.count as i32 - 1);
            }
            None if self.count > 0 => {
                self.selected = Some(0);
                changed_selection = Some(0);
            }
            _ => (),
        }

        let visible = self.visible_rows();
        let max_top = self.count as i32 - visible;
        if max_top > 0 {
            self.top_row = self.top_row.clamp(0, max_top);
            match &mut self.slider {
                Some(slider) => slider.adjust(0, max_top, visible),
                None => {
                    let sub = Slider::new(
                        Id::new(self.base.id.raw() ^ 1),
                        self.slider_rect(),
                        0,
                        max_top,
                        visible,
                        WidgetFlag::SUBWIDGET,
                    );
                    self.slider = Some(sub);
                }
            }
            if let Some(slider) = &mut self.slider {
                slider.scroll_to(ctx, self.top_row);
            }
        } else {
            self.top_row = 0;
            // content fits again: the slider child is removed and dropped
            self.slider = None;
        }

        self.show(ctx);
        if let Some(value) = changed_selection {
            self.base.notify(value);
        }
    }

    /// Clamps `index` into range, scrolls the minimal amount needed to keep
    /// the selected row fully visible (delegated to the internal slider),
    /// and fires the hook with the new selection.
    pub fn select(&mut self, ctx: &mut PaintCtx<'_>, index: i32) {
        if self.count == 0 {
            return;
        }
        let index = index.clamp(0, self.count as i32 - 1);
        let visible = self.visible_rows();

        let mut top = self.top_row;
        if index < top {
            top = index;
        } else if index >= top + visible {
            top = index - (visible - 1);
        }

        self.selected = Some(index as usize);
        if top != self.top_row {
            match &mut self.slider {
                Some(slider) => {
                    slider.scroll_to(ctx, top);
                }
                None => (),
            }
            // read the level back from the slider, which owns the clamp
            self.top_row = match &self.slider {
                Some(slider) => slider.level(),
                None => top,
            };
        }
        self.show(ctx);
        self.base.notify(index);
    }

    fn sync_from_slider(&mut self, ctx: &mut PaintCtx<'_>) {
        let level = match &self.slider {
            Some(slider) => slider.level(),
            None => return,
        };
        if level != self.top_row {
            self.top_row = level;
            self.show(ctx);
        }
    }

    fn row_at(&self, pos: Vec2i) -> Option<i32> {
        let body = self.body_rect();
        if !body.contains_point(pos) {
            return None;
        }
        let row = self.top_row + (pos.y - body.y) / self.item_height;
        if row >= 0 && (row as usize) < self.count { Some(row) } else { None }
    }
}

impl Widget for ListBox {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn draw(&mut self, ctx: &mut PaintCtx<'_>) {
        let r = self.base.rect;
        ctx.fill(r, StyleColor::WindowBG);
        let body = self.body_rect();
        let source = self.source.clone();
        let source = source.borrow();
        for row in 0..self.visible_rows() {
            let index = self.top_row + row;
            if index < 0 || index as usize >= self.count {
                break;
            }
            let area = rect(body.x, body.y + row * self.item_height, body.width, self.item_height).clip_to(&body);
            let selected = self.selected == Some(index as usize);
            if selected {
                ctx.fill(area, StyleColor::Selection);
            }
            source.draw_item(ctx, index as usize, area, selected);
        }
        drop(source);
        if let Some(slider) = &mut self.slider {
            slider.draw(ctx);
        }
        if self.base.flags.has_border() {
            ctx.draw_box(r, StyleColor::Border);
        }
    }

    fn mouse_down(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, button: MouseButton) -> EventStatus {
        if !self.base.rect.contains_point(pos) {
            return EventStatus::Ignored;
        }
        if button.is_wheel() {
            // wheel anywhere over the list lands on the slider geometry
            if let Some(slider) = &mut self.slider {
                let knob = slider.base().rect;
                let status = slider.mouse_down(ctx, vec_inside(knob), button);
                self.sync_from_slider(ctx);
                return status;
            }
            return EventStatus::Ok;
        }
        if !button.is_left() {
            return EventStatus::Ignored;
        }
        if let Some(slider) = &mut self.slider {
            if slider.base().rect.contains_point(pos) {
                let status = slider.mouse_down(ctx, pos, button);
                self.sync_from_slider(ctx);
                return status;
            }
        }
        match self.row_at(pos) {
            Some(row) => {
                self.select(ctx, row);
                EventStatus::Ok
            }
            None => EventStatus::Ok,
        }
    }

    fn mouse_move(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, delta: Vec2i) -> EventStatus {
        if let Some(slider) = &mut self.slider {
            let status = slider.mouse_move(ctx, pos, delta);
            if status.is_ok() {
                self.sync_from_slider(ctx);
                return status;
            }
        }
        EventStatus::Ignored
    }

    fn mouse_up(&mut self, ctx: &mut PaintCtx<'_>, pos: Vec2i, button: MouseButton) -> EventStatus {
        match &mut self.slider {
            Some(slider) => slider.mouse_up(ctx, pos, button),
            None => EventStatus::Ignored,
        }
    }

    fn key_down(&mut self, ctx: &mut PaintCtx<'_>, key: Key, _mods: KeyMode) -> EventStatus {
        if !self.base.flags.has_scroll_keys() || self.count == 0 {
            return EventStatus::Ignored;
        }
        let selected = self.selected();
        match key {
            Key::Up => {
                self.select(ctx, selected - 1);
                EventStatus::Ok
            }
            Key::Down => {
                self.select(ctx, selected + 1);
                EventStatus::Ok
            }
            Key::PageUp => {
                self.select(ctx, selected - self.visible_rows());
                EventStatus::Ok
            }
            Key::PageDown => {
                self.select(ctx, selected + self.visible_rows());
                EventStatus::Ok
            }
            _ => EventStatus::Ignored,
        }
    }
}

fn vec_inside(r: Recti) -> Vec2i { crate::vec2(r.x + r.width / 2, r.y + r.height / 2) }

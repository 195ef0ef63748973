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

use log::debug;

use crate::{
    rect, vec2, DirtyRegion, Event, EventStatus, FontId, Id, Key, PaintCtx, RectExt, Recti, Style, StyleColor, Surface, TextRenderer,
    UiError, Widget, WidgetFlag, WindowFlag,
};

/// Lifecycle state of a window. Transitions are monotonic: a window opens
/// once and, once closed, is only ever reaped by the view.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Activity {
    /// Receiving events and being composited.
    Open,
    /// Awaiting removal at the tail of the window stack.
    Closed,
}

/// Top-level surface holding an ordered set of widgets. The window owns its
/// own pixel buffer; widgets paint into it in window-local coordinates and
/// the view composites the buffer onto the screen at the window rectangle.
pub struct Window {
    id: Id,
    title: String,
    rect: Recti,
    flags: WindowFlag,
    activity: Activity,
    surface: Surface,
    widgets: Vec<Box<dyn Widget>>,
    dirty: DirtyRegion,
}

impl Window {
    /// Creates an open window at `r` on the screen.
    pub fn new(id: Id, title: &str, r: Recti, flags: WindowFlag) -> Result<Self, UiError> {
        let surface = Surface::new(r.width, r.height)?;
        debug!("window {:?} '{}' opened at {},{} {}x{}", id, title, r.x, r.y, r.width, r.height);
        Ok(Self {
            id,
            title: title.to_string(),
            rect: r,
            flags,
            activity: Activity::Open,
            surface,
            widgets: Vec::new(),
            dirty: DirtyRegion::default(),
        })
    }

    /// Returns the window id.
    pub fn id(&self) -> Id { self.id }

    /// Returns the title text.
    pub fn title(&self) -> &str { &self.title }

    /// Returns the window rectangle in screen coordinates.
    pub fn rect(&self) -> Recti { self.rect }

    /// Returns the window flags.
    pub fn flags(&self) -> WindowFlag { self.flags }

    /// Returns the lifecycle state.
    pub fn activity(&self) -> Activity { self.activity }

    /// Returns `true` while the window is open.
    pub fn is_open(&self) -> bool { self.activity == Activity::Open }

    /// Marks the window closed. It stops receiving events immediately and
    /// is deallocated by the view on the next pump cycle.
    pub fn request_close(&mut self) {
        if self.activity == Activity::Open {
            self.activity = Activity::Closed;
            debug!("window {:?} '{}' closed", self.id, self.title);
        }
    }

    /// Returns the window-local area below the title bar.
    pub fn content_rect(&self, style: &Style) -> Recti {
        let top = if self.flags.has_no_title() { 0 } else { style.title_height };
        rect(0, top, self.rect.width, (self.rect.height - top).max(0))
    }

    /// Appends a top-level widget. Widget rectangles are window-local.
    pub fn add_widget(&mut self, widget: Box<dyn Widget>) { self.widgets.push(widget) }

    /// Removes and returns the widget with `id` without destroying it.
    pub fn remove_widget(&mut self, id: Id) -> Option<Box<dyn Widget>> {
        let index = self.widgets.iter().position(|w| w.base().id == id)?;
        Some(self.widgets.remove(index))
    }

    /// Returns the number of top-level widgets.
    pub fn widget_count(&self) -> usize { self.widgets.len() }

    /// Looks up a top-level widget by id.
    pub fn widget_mut(&mut self, id: Id) -> Option<&mut (dyn Widget + '_)> {
        for w in &mut self.widgets {
            if w.base().id == id {
                return Some(w.as_mut());
            }
        }
        None
    }

    /// Runs `f` with a paint context over this window's surface, for callers
    /// that mutate widget state outside of event dispatch.
    pub fn with_paint_ctx<R>(&mut self, text: &dyn TextRenderer, style: &Style, f: impl FnOnce(&mut PaintCtx<'_>, &mut Vec<Box<dyn Widget>>) -> R) -> R {
        let mut ctx = PaintCtx::new(&mut self.surface, text, style, &mut self.dirty);
        f(&mut ctx, &mut self.widgets)
    }

    /// Routes one event through the window. Flag rules run first:
    /// `CLOSE_ON_ESC` turns an Escape press into a `Close` verdict without
    /// any widget seeing the key, `CLOSE_ON_UNFOCUS_CLICK` does the same for
    /// a click landing outside the window. Everything else is translated to
    /// window-local coordinates and offered to the widgets in order; the
    /// first widget not ignoring the event decides the status.
    pub fn handle_event(&mut self, event: &Event, text: &dyn TextRenderer, style: &Style) -> EventStatus {
        match *event {
            Event::Quit => return EventStatus::Quit,
            Event::KeyDown { key: Key::Escape, .. } if self.flags.closes_on_esc() => {
                return EventStatus::Close;
            }
            Event::MouseDown { pos, .. } if self.flags.closes_on_unfocus_click() && !self.rect.contains_point(pos) => {
                return EventStatus::Close;
            }
            _ => (),
        }
        let local = self.to_local(event);
        let mut ctx = PaintCtx::new(&mut self.surface, text, style, &mut self.dirty);
        for widget in &mut self.widgets {
            if !widget.base().accepts_events() {
                continue;
            }
            let status = widget.handle_event(&local, &mut ctx);
            if !status.is_ignored() {
                return status;
            }
        }
        EventStatus::Ignored
    }

    fn to_local(&self, event: &Event) -> Event {
        let origin = vec2(self.rect.x, self.rect.y);
        match *event {
            Event::MouseDown { pos, button } => Event::MouseDown { pos: pos - origin, button },
            Event::MouseUp { pos, button } => Event::MouseUp { pos: pos - origin, button },
            Event::MouseMove { pos, delta } => Event::MouseMove { pos: pos - origin, delta },
            other => other,
        }
    }

    /// Repaints the entire window: background, title bar, border, and every
    /// visible widget. Marks the whole surface dirty.
    pub fn draw_all(&mut self, text: &dyn TextRenderer, style: &Style) {
        let mut ctx = PaintCtx::new(&mut self.surface, text, style, &mut self.dirty);
        let full = rect(0, 0, self.rect.width, self.rect.height);
        ctx.fill(full, StyleColor::WindowBG);
        if !self.flags.has_no_title() {
            let bar = rect(0, 0, self.rect.width, style.title_height);
            ctx.fill(bar, StyleColor::TitleBG);
            let color = style.color(StyleColor::TitleText);
            ctx.draw_control_text(FontId::default(), &self.title, bar, color, WidgetFlag::ALIGN_CENTER);
        }
        ctx.draw_box(full, StyleColor::Border);
        for widget in &mut self.widgets {
            if widget.base().flags.is_hidden() {
                continue;
            }
            widget.draw(&mut ctx);
        }
        ctx.invalidate(full);
    }

    /// Takes the accumulated dirty region, in window-local coordinates.
    pub fn take_dirty(&mut self) -> Option<Recti> { self.dirty.take() }

    /// Returns the window's pixel buffer for compositing.
    pub fn surface(&self) -> &Surface { &self.surface }
}

/// Shared, clonable reference to a [`Window`]. The view and the embedding
/// application both keep handles; all access goes through short
/// [`WindowHandle::with`] / [`WindowHandle::with_mut`] borrows.
#[derive(Clone)]
pub struct WindowHandle(Rc<RefCell<Window>>);

impl WindowHandle {
    /// Wraps a window in a shared handle.
    pub fn new(window: Window) -> Self { Self(Rc::new(RefCell::new(window))) }

    /// Returns the window id.
    pub fn id(&self) -> Id { self.0.borrow().id }

    /// Returns `true` while the window is open.
    pub fn is_open(&self) -> bool { self.0.borrow().is_open() }

    /// Runs `f` with shared access to the window.
    pub fn with<R>(&self, f: impl FnOnce(&Window) -> R) -> R { f(&self.0.borrow()) }

    /// Runs `f` with exclusive access to the window.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Window) -> R) -> R { f(&mut self.0.borrow_mut()) }
}

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
use std::rc::{Rc, Weak};

use crate::{
    ellipsized, rect, Color, Event, EventStatus, FontId, Id, Key, KeyMode, MouseButton, Recti, Style, StyleColor, Surface, TextRenderer, Vec2i, WidgetFlag,
};

/// Listener invoked when a widget's observable state changes (slider moved,
/// list selection changed, text input finished). Multiple widgets may share
/// one hook implementation; `source` disambiguates the origin and `value`
/// carries the driver's new level/selection so the listener never re-derives
/// the driver's layout math.
pub trait WidgetHook {
    /// Called by the driving widget after its state changed.
    fn widget_activated(&mut self, source: Id, value: i32);
}

/// Shared, caller-owned handle to a [`WidgetHook`] listener.
pub type HookHandle = Rc<RefCell<dyn WidgetHook>>;

/// Accumulates the union of rectangles that need re-compositing. Kept small
/// on purpose: partial refreshes cover single widget rectangles, and a union
/// is always a correct over-approximation.
#[derive(Default)]
pub struct DirtyRegion {
    area: Option<Recti>,
}

impl DirtyRegion {
    /// Adds a rectangle to the region.
    pub fn add(&mut self, r: Recti) {
        if r.width <= 0 || r.height <= 0 {
            return;
        }
        self.area = Some(match self.area {
            None => r,
            Some(prev) => {
                let x0 = prev.x.min(r.x);
                let y0 = prev.y.min(r.y);
                let x1 = (prev.x + prev.width).max(r.x + r.width);
                let y1 = (prev.y + prev.height).max(r.y + r.height);
                rect(x0, y0, x1 - x0, y1 - y0)
            }
        });
    }

    /// Takes the accumulated region, leaving the accumulator empty.
    pub fn take(&mut self) -> Option<Recti> { self.area.take() }

    /// Returns the accumulated region without clearing it.
    pub fn peek(&self) -> Option<Recti> { self.area }
}

/// Drawing and notification context handed to widget handlers. Carries the
/// owning window's surface, the text capability, the style, and the dirty
/// region accumulator; widgets hold no back-reference to their window.
pub struct PaintCtx<'a> {
    surface: &'a mut Surface,
    text: &'a dyn TextRenderer,
    style: &'a Style,
    dirty: &'a mut DirtyRegion,
}

impl<'a> PaintCtx<'a> {
    pub(crate) fn new(surface: &'a mut Surface, text: &'a dyn TextRenderer, style: &'a Style, dirty: &'a mut DirtyRegion) -> Self {
        Self { surface, text, style, dirty }
    }

    /// Returns the surface widgets draw onto.
    pub fn surface(&mut self) -> &mut Surface { self.surface }

    /// Returns the text measurement/drawing capability.
    pub fn text(&self) -> &dyn TextRenderer { self.text }

    /// Returns the active style.
    pub fn style(&self) -> &Style { self.style }

    /// Marks a rectangle as needing re-compositing to the screen.
    pub fn invalidate(&mut self, r: Recti) { self.dirty.add(r) }

    /// Fills a rectangle with a palette color.
    pub fn fill(&mut self, r: Recti, id: StyleColor) { self.surface.fill(r, self.style.color(id)) }

    /// Draws a 1px box outline with a palette color.
    pub fn draw_box(&mut self, r: Recti, id: StyleColor) { self.surface.draw_box(r, self.style.color(id)) }

    /// Returns the line height of `font`.
    pub fn font_height(&self, font: FontId) -> i32 { self.text.font_height(font) }

    /// Measures the pixel width of a single-line string.
    pub fn text_width(&self, font: FontId, text: &str) -> i32 { self.text.text_size(font, text).width }

    /// Draws a single-line glyph run clipped to `clip`.
    pub fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2i, color: Color, clip: Recti) {
        self.text.draw_text(self.surface, font, text, pos, color, clip);
    }

    /// Draws a single line inside `r`, honoring the alignment flags, with
    /// vertical centering, ellipsis truncation, and clipping to `r`.
    pub fn draw_control_text(&mut self, font: FontId, text: &str, r: Recti, color: Color, flags: WidgetFlag) {
        let padding = self.style.padding;
        let inner = rect(r.x + padding, r.y, (r.width - padding * 2).max(0), r.height);
        let fitted = ellipsized(text, inner.width, font, self.text);
        let width = self.text.text_size(font, &fitted).width;
        let x = if flags.is_aligned_center() {
            inner.x + (inner.width - width) / 2
        } else if flags.is_aligned_right() {
            inner.x + inner.width - width
        } else {
            inner.x
        };
        let y = r.y + (r.height - self.text.font_height(font)).max(0) / 2;
        self.text.draw_text(self.surface, font, &fitted, crate::vec2(x, y), color, r);
    }
}

/// Position, size, flags, activation key, pressed state, and hook reference
/// shared by every widget. Concrete widgets embed one and expose it through
/// [`Widget::base`]/[`Widget::base_mut`].
pub struct WidgetBase {
    /// Caller-defined identifier passed to hooks.
    pub id: Id,
    /// Widget rectangle in window-local coordinates.
    pub rect: Recti,
    /// Behaviour flags fixed at construction.
    pub flags: WidgetFlag,
    /// Optional keyboard shortcut that activates the widget.
    pub key: Option<Key>,
    pressed: bool,
    hook: Option<Weak<RefCell<dyn WidgetHook>>>,
}

impl WidgetBase {
    /// Creates a widget base without an activation key or hook.
    pub fn new(id: Id, rect: Recti, flags: WidgetFlag) -> Self {
        Self { id, rect, flags, key: None, pressed: false, hook: None }
    }

    /// Returns a copy of the base with an activation key.
    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    /// Registers a caller-owned hook. The widget keeps only a weak
    /// reference; the listener's lifetime stays with the caller.
    pub fn set_hook(&mut self, hook: &HookHandle) { self.hook = Some(Rc::downgrade(hook)) }

    /// Removes the registered hook.
    pub fn clear_hook(&mut self) { self.hook = None }

    /// Returns `true` while the widget is visually pressed.
    pub fn is_pressed(&self) -> bool { self.pressed }

    pub(crate) fn set_pressed(&mut self, pressed: bool) { self.pressed = pressed }

    /// Returns `true` if the widget currently accepts events.
    pub fn accepts_events(&self) -> bool { !self.flags.is_hidden() && !self.flags.is_disabled() }

    /// Returns `true` if `key` should activate this widget, either through
    /// its explicit activation key or the default-on-Return flag.
    pub fn activates_on(&self, key: Key) -> bool {
        self.key == Some(key) || (self.flags.is_default() && key == Key::Return)
    }

    /// Invokes the registered hook, if the listener is still alive.
    pub fn notify(&self, value: i32) {
        if let Some(hook) = self.hook.as_ref().and_then(Weak::upgrade) {
            hook.borrow_mut().widget_activated(self.id, value);
        }
    }
}

/// Abstract interactive element: a rectangle with enabled/hidden/pressed
/// state and a polymorphic event-handling contract. The typed handlers
/// default to [`EventStatus::Ignored`]; [`Widget::draw`] is always
/// implemented by concrete widgets.
pub trait Widget {
    /// Returns the shared widget state.
    fn base(&self) -> &WidgetBase;
    /// Returns the shared widget state mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Paints the widget into the window surface.
    fn draw(&mut self, ctx: &mut PaintCtx<'_>);

    /// Handles a mouse button press at a window-local position.
    fn mouse_down(&mut self, _ctx: &mut PaintCtx<'_>, _pos: Vec2i, _button: MouseButton) -> EventStatus { EventStatus::Ignored }

    /// Handles a mouse button release at a window-local position.
    fn mouse_up(&mut self, _ctx: &mut PaintCtx<'_>, _pos: Vec2i, _button: MouseButton) -> EventStatus { EventStatus::Ignored }

    /// Handles pointer motion.
    fn mouse_move(&mut self, _ctx: &mut PaintCtx<'_>, _pos: Vec2i, _delta: Vec2i) -> EventStatus { EventStatus::Ignored }

    /// Handles a key press.
    fn key_down(&mut self, _ctx: &mut PaintCtx<'_>, _key: Key, _mods: KeyMode) -> EventStatus { EventStatus::Ignored }

    /// Handles a key release.
    fn key_up(&mut self, _ctx: &mut PaintCtx<'_>, _key: Key, _mods: KeyMode) -> EventStatus { EventStatus::Ignored }

    /// Performs the widget's primary action, as triggered by its activation
    /// key. The default fires the hook with a zero value.
    fn activate(&mut self, _ctx: &mut PaintCtx<'_>) -> EventStatus {
        self.base().notify(0);
        EventStatus::Ok
    }

    /// Dispatches an event to the correctly-typed handler. Activation keys
    /// are resolved here so every widget gets the same push/activate/release
    /// sequence for keyboard activation.
    fn handle_event(&mut self, event: &Event, ctx: &mut PaintCtx<'_>) -> EventStatus {
        match *event {
            Event::MouseDown { pos, button } => self.mouse_down(ctx, pos, button),
            Event::MouseUp { pos, button } => self.mouse_up(ctx, pos, button),
            Event::MouseMove { pos, delta } => self.mouse_move(ctx, pos, delta),
            Event::KeyDown { key, mods } => {
                if self.base().activates_on(key) {
                    self.push(ctx);
                    let status = self.activate(ctx);
                    self.release(ctx);
                    if status.is_ignored() { EventStatus::Ok } else { status }
                } else {
                    self.key_down(ctx, key, mods)
                }
            }
            Event::KeyUp { key, mods } => self.key_up(ctx, key, mods),
            Event::Quit => EventStatus::Ignored,
        }
    }

    /// Redraws the widget and invalidates exactly its own rectangle, never
    /// the full screen.
    fn show(&mut self, ctx: &mut PaintCtx<'_>) {
        if self.base().flags.is_hidden() {
            return;
        }
        self.draw(ctx);
        let r = self.base().rect;
        ctx.invalidate(r);
    }

    /// Marks the widget visually pressed and redraws it.
    fn push(&mut self, ctx: &mut PaintCtx<'_>) {
        self.base_mut().set_pressed(true);
        self.show(ctx);
    }

    /// Clears the pressed mark and redraws the widget. Always called
    /// symmetrically with [`Widget::push`].
    fn release(&mut self, ctx: &mut PaintCtx<'_>) {
        self.base_mut().set_pressed(false);
        self.show(ctx);
    }
}

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
use crate::{Event, EventStatus, Id, PaintCtx, Recti, Widget, WidgetBase, WidgetFlag};

/// A widget that owns an ordered collection of child widgets and forwards
/// events and drawing to them, appearing as a single widget to its
/// container. Children are owned exclusively; dropping the composite drops
/// the remaining children.
pub struct CompositeWidget {
    base: WidgetBase,
    children: Vec<Box<dyn Widget>>,
}

impl CompositeWidget {
    /// Creates an empty composite covering `rect`.
    pub fn new(id: Id, rect: Recti, flags: WidgetFlag) -> Self {
        Self {
            base: WidgetBase::new(id, rect, flags),
            children: Vec::new(),
        }
    }

    /// Appends a child, tagging it as a sub-widget so a window does not
    /// also track it directly.
    pub fn add_child(&mut self, mut child: Box<dyn Widget>) {
        child.base_mut().flags |= WidgetFlag::SUBWIDGET;
        self.children.push(child);
    }

    /// Un-links the child with the given ID and returns ownership to the
    /// caller without destroying it. Returns `None` when no child matches.
    pub fn remove_child(&mut self, id: Id) -> Option<Box<dyn Widget>> {
        let idx = self.children.iter().position(|c| c.base().id == id)?;
        Some(self.children.remove(idx))
    }

    /// Returns the number of owned children.
    pub fn child_count(&self) -> usize { self.children.len() }

    /// Returns the child at `index`, in insertion order.
    pub fn child(&self, index: usize) -> Option<&dyn Widget> { self.children.get(index).map(|c| c.as_ref()) }

    /// Returns the child at `index` mutably.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut (dyn Widget + '_)> {
        match self.children.get_mut(index) {
            Some(c) => Some(c.as_mut()),
            None => None,
        }
    }
}

impl Widget for CompositeWidget {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn draw(&mut self, ctx: &mut PaintCtx<'_>) {
        for child in &mut self.children {
            if child.base().flags.is_hidden() {
                continue;
            }
            child.draw(ctx);
        }
    }

    /// Offers the event to children in insertion order. The first child
    /// whose handler returns something other than [`EventStatus::Ignored`]
    /// short-circuits dispatch and its status propagates unchanged, so
    /// composites nest transparently inside windows.
    fn handle_event(&mut self, event: &Event, ctx: &mut PaintCtx<'_>) -> EventStatus {
        for child in &mut self.children {
            if !child.base().accepts_events() {
                continue;
            }
            let status = child.handle_event(event, ctx);
            if !status.is_ignored() {
                return status;
            }
        }
        EventStatus::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color, rect, vec2, DirtyRegion, FixedFont, Key, KeyMode, MouseButton, Style, Surface};

    use std::cell::Cell;
    use std::rc::Rc;

    struct Claiming {
        base: WidgetBase,
        status: EventStatus,
        seen: Rc<Cell<usize>>,
    }

    impl Claiming {
        fn boxed(id: usize, status: EventStatus) -> (Box<Self>, Rc<Cell<usize>>) {
            let seen = Rc::new(Cell::new(0));
            let probe = Box::new(Self {
                base: WidgetBase::new(Id::new(id), rect(0, 0, 10, 10), WidgetFlag::NONE),
                status,
                seen: seen.clone(),
            });
            (probe, seen)
        }
    }

    impl Widget for Claiming {
        fn base(&self) -> &WidgetBase { &self.base }
        fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
        fn draw(&mut self, ctx: &mut PaintCtx<'_>) {
            let r = self.base.rect;
            ctx.surface().fill(r, color(1, 1, 1, 255));
        }
        fn mouse_down(&mut self, _ctx: &mut PaintCtx<'_>, _pos: crate::Vec2i, _button: MouseButton) -> EventStatus {
            self.seen.set(self.seen.get() + 1);
            self.status
        }
        fn key_down(&mut self, _ctx: &mut PaintCtx<'_>, _key: Key, _mods: KeyMode) -> EventStatus {
            self.seen.set(self.seen.get() + 1);
            self.status
        }
    }

    fn dispatch(composite: &mut CompositeWidget, event: Event) -> EventStatus {
        let mut surface = Surface::new(32, 32).unwrap();
        let text = FixedFont::default();
        let style = Style::default();
        let mut dirty = DirtyRegion::default();
        let mut ctx = PaintCtx::new(&mut surface, &text, &style, &mut dirty);
        composite.handle_event(&event, &mut ctx)
    }

    #[test]
    fn first_claim_wins_and_short_circuits() {
        let mut composite = CompositeWidget::new(Id::new(0), rect(0, 0, 32, 32), WidgetFlag::NONE);
        let (c1, seen1) = Claiming::boxed(1, EventStatus::Ignored);
        let (c2, seen2) = Claiming::boxed(2, EventStatus::Close);
        let (c3, seen3) = Claiming::boxed(3, EventStatus::Ok);
        composite.add_child(c1);
        composite.add_child(c2);
        composite.add_child(c3);

        let status = dispatch(&mut composite, Event::MouseDown { pos: vec2(1, 1), button: MouseButton::LEFT });
        assert_eq!(status, EventStatus::Close);
        assert_eq!(seen1.get(), 1);
        assert_eq!(seen2.get(), 1);
        assert_eq!(seen3.get(), 0);
    }

    #[test]
    fn hidden_and_disabled_children_are_skipped() {
        let mut composite = CompositeWidget::new(Id::new(0), rect(0, 0, 32, 32), WidgetFlag::NONE);
        let (mut hidden, seen1) = Claiming::boxed(1, EventStatus::Ok);
        hidden.base.flags |= WidgetFlag::HIDDEN;
        let (mut disabled, seen2) = Claiming::boxed(2, EventStatus::Ok);
        disabled.base.flags |= WidgetFlag::DISABLED;
        composite.add_child(hidden);
        composite.add_child(disabled);

        let status = dispatch(&mut composite, Event::KeyDown { key: Key::Tab, mods: KeyMode::NONE });
        assert_eq!(status, EventStatus::Ignored);
        assert_eq!(seen1.get(), 0);
        assert_eq!(seen2.get(), 0);
    }

    #[test]
    fn children_are_tagged_as_sub_widgets() {
        let mut composite = CompositeWidget::new(Id::new(0), rect(0, 0, 32, 32), WidgetFlag::NONE);
        let (child, _seen) = Claiming::boxed(1, EventStatus::Ok);
        composite.add_child(child);
        assert!(composite.child(0).unwrap().base().flags.is_sub_widget());
    }

    #[test]
    fn remove_child_unlinks_without_destroying() {
        let mut composite = CompositeWidget::new(Id::new(0), rect(0, 0, 32, 32), WidgetFlag::NONE);
        let (c1, _s1) = Claiming::boxed(1, EventStatus::Ok);
        let (c2, _s2) = Claiming::boxed(2, EventStatus::Ok);
        composite.add_child(c1);
        composite.add_child(c2);
        let removed = composite.remove_child(Id::new(1)).unwrap();
        assert_eq!(removed.base().id, Id::new(1));
        assert_eq!(composite.child_count(), 1);
        assert!(composite.remove_child(Id::new(9)).is_none());
    }
}

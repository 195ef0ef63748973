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
use log::{debug, trace, warn};

use crate::{
    Event, EventStatus, Id, Key, RectExt, Recti, Style, Surface, TextRenderer, UiError, Window, WindowHandle,
};

/// Why the event pump returned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Verdict {
    /// The application should exit.
    Quit,
    /// The application should tear down and start over (display mode or
    /// configuration changed underneath the toolkit).
    Restart,
}

/// Host capability the view pumps events from and presents pixels to.
/// Everything platform-specific (event queues, video modes, vsync) lives
/// behind this trait.
pub trait Platform {
    /// Blocks until the next event. Fails with
    /// [`UiError::EventSourceClosed`] when the host queue shuts down.
    fn wait_event(&mut self) -> Result<Event, UiError>;
    /// Returns the next event without blocking.
    fn poll_event(&mut self) -> Option<Event>;
    /// Monotonic millisecond clock.
    fn ticks(&self) -> u64;
    /// Copies `area` of the root surface to the screen.
    fn present(&mut self, surface: &Surface, area: Recti);
    /// Switches between windowed and fullscreen display.
    fn toggle_fullscreen(&mut self);
}

/// Milliseconds within which consecutive mouse-motion events are merged
/// into one before dispatch.
const MOTION_COALESCE_MS: u64 = 10;

/// Root of a user interface: the screen surface, the z-ordered window stack
/// and the event pump tying them to a [`Platform`]. Explicitly constructed;
/// nothing in the toolkit is global.
pub struct View {
    platform: Box<dyn Platform>,
    text: Box<dyn TextRenderer>,
    style: Style,
    surface: Surface,
    windows: Vec<WindowHandle>,
    pending: Option<Event>,
    filter: Option<Box<dyn FnMut(&Event) -> bool>>,
}

impl View {
    /// Creates a view with a root surface of the given size.
    pub fn new(platform: Box<dyn Platform>, text: Box<dyn TextRenderer>, style: Style, width: i32, height: i32) -> Result<Self, UiError> {
        Ok(Self {
            platform,
            text,
            style,
            surface: Surface::new(width, height)?,
            windows: Vec::new(),
            pending: None,
            filter: None,
        })
    }

    /// Returns the style shared by every window.
    pub fn style(&self) -> &Style { &self.style }

    /// Returns the text capability shared by every window.
    pub fn text(&self) -> &dyn TextRenderer { self.text.as_ref() }

    /// Returns the number of windows on the stack, closed ones included.
    pub fn window_count(&self) -> usize { self.windows.len() }

    /// Installs a caller event filter. The filter runs after the system
    /// filter and before dispatch; returning `true` consumes the event.
    pub fn set_event_filter(&mut self, filter: Box<dyn FnMut(&Event) -> bool>) { self.filter = Some(filter) }

    /// Wraps `window` in a handle, paints it, and puts it at the front of
    /// the stack (front = focused).
    pub fn open_window(&mut self, mut window: Window) -> WindowHandle {
        window.draw_all(self.text.as_ref(), &self.style);
        let handle = WindowHandle::new(window);
        self.windows.insert(0, handle.clone());
        handle
    }

    /// Looks up a window handle by id.
    pub fn window(&self, id: Id) -> Option<WindowHandle> {
        self.windows.iter().find(|w| w.id() == id).cloned()
    }

    /// Returns the focused window, if any.
    pub fn front(&self) -> Option<WindowHandle> { self.windows.first().cloned() }

    /// Moves the window with `id` to the front of the stack.
    pub fn bring_to_front(&mut self, id: Id) {
        if let Some(index) = self.windows.iter().position(|w| w.id() == id) {
            let handle = self.windows.remove(index);
            self.windows.insert(0, handle);
        }
    }

    /// Blocks for the next event. Consecutive mouse-motion events arriving
    /// within a short tick window collapse into a single motion with the
    /// final position and the accumulated delta; a non-motion event
    /// interrupting the burst is stashed and returned by the next call.
    pub fn fetch_event(&mut self) -> Result<Event, UiError> {
        if let Some(event) = self.pending.take() {
            return Ok(event);
        }
        let event = self.platform.wait_event()?;
        let Event::MouseMove { mut pos, mut delta } = event else {
            return Ok(event);
        };
        let start = self.platform.ticks();
        let mut merged = 0u32;
        while self.platform.ticks() - start < MOTION_COALESCE_MS {
            match self.platform.poll_event() {
                Some(Event::MouseMove { pos: p, delta: d }) => {
                    pos = p;
                    delta = delta + d;
                    merged += 1;
                }
                Some(other) => {
                    self.pending = Some(other);
                    break;
                }
                None => break,
            }
        }
        if merged > 0 {
            trace!("coalesced {} mouse-motion events", merged);
        }
        Ok(Event::MouseMove { pos, delta })
    }

    /// Returns the next event without blocking, if one is ready.
    pub fn peek_event(&mut self) -> Option<Event> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }
        self.platform.poll_event()
    }

    /// Runs the system filter (Alt+Return toggles the display mode and is
    /// suppressed) and then the caller filter. Returns `None` when the
    /// event was consumed.
    pub fn filter_event(&mut self, event: Event) -> Option<Event> {
        if let Event::KeyDown { key: Key::Return, mods } = event {
            if mods.is_alt() {
                debug!("display mode toggle");
                self.platform.toggle_fullscreen();
                return None;
            }
        }
        if let Some(filter) = &mut self.filter {
            if filter(&event) {
                return None;
            }
        }
        Some(event)
    }

    /// Offers one event to the front window. A `Close` verdict marks the
    /// window closed and moves it to the tail, where the next pump cycle
    /// reaps it; the verdict never unwinds further.
    pub fn handle_events(&mut self, event: &Event) -> EventStatus {
        if matches!(event, Event::Quit) {
            return EventStatus::Quit;
        }
        let Some(front) = self.windows.first().cloned() else {
            return EventStatus::Ignored;
        };
        if !front.is_open() {
            return EventStatus::Ignored;
        }
        let status = front.with_mut(|w| w.handle_event(event, self.text.as_ref(), &self.style));
        trace!("event {:?} -> {:?}", event, status);
        if status == EventStatus::Close {
            front.with_mut(|w| w.request_close());
            let handle = self.windows.remove(0);
            self.windows.push(handle);
            return EventStatus::Ok;
        }
        status
    }

    /// Pops the contiguous run of closed windows at the tail of the stack,
    /// dropping them. Called at the start of every pump cycle so a close
    /// verdict never deallocates the window it was produced in.
    pub fn reap_closed(&mut self) {
        while let Some(last) = self.windows.last() {
            if last.is_open() {
                break;
            }
            let handle = self.windows.pop();
            if let Some(handle) = handle {
                debug!("window {:?} reaped", handle.id());
            }
        }
    }

    /// Composites every window back to front onto the root surface and
    /// presents the whole screen.
    pub fn compose(&mut self) {
        for handle in self.windows.iter().rev() {
            handle.with_mut(|w| {
                let r = w.rect();
                self.surface.blit(w.surface(), r.x, r.y);
                w.take_dirty();
            });
        }
        let bounds = self.surface.bounds();
        self.platform.present(&self.surface, bounds);
    }

    /// Re-composites and presents only the union of the windows' dirty
    /// regions. A cycle without damage presents nothing.
    pub fn refresh(&mut self) {
        let mut damage: Option<Recti> = None;
        for handle in &self.windows {
            let local = handle.with_mut(|w| w.take_dirty());
            if let Some(local) = local {
                let r = handle.with(|w| w.rect());
                let screen = local.offset(r.x, r.y).clip_to(&self.surface.bounds());
                damage = Some(match damage {
                    Some(d) => union(d, screen),
                    None => screen,
                });
            }
        }
        let Some(area) = damage else { return };
        if area.width <= 0 || area.height <= 0 {
            return;
        }
        for handle in self.windows.iter().rev() {
            handle.with(|w| {
                let r = w.rect();
                let overlap = area.intersect(&r);
                if let Some(overlap) = overlap {
                    let src = overlap.offset(-r.x, -r.y);
                    self.surface.blit_rect(w.surface(), src, overlap.x, overlap.y);
                }
            });
        }
        self.platform.present(&self.surface, area);
    }

    /// Pumps events until the application decides to quit or restart, or
    /// the platform event source fails. Each cycle reaps closed windows,
    /// refreshes damaged pixels, then fetches, filters, and dispatches one
    /// event.
    pub fn run(&mut self) -> Result<Verdict, UiError> {
        self.compose();
        loop {
            self.reap_closed();
            self.refresh();
            let event = self.fetch_event()?;
            let Some(event) = self.filter_event(event) else {
                continue;
            };
            match self.handle_events(&event) {
                EventStatus::Quit => return Ok(Verdict::Quit),
                EventStatus::Restart => return Ok(Verdict::Restart),
                EventStatus::Error => warn!("event dispatch reported an error"),
                _ => (),
            }
        }
    }
}

fn union(a: Recti, b: Recti) -> Recti {
    let x0 = a.x.min(b.x);
    let y0 = a.y.min(b.y);
    let x1 = (a.x + a.width).max(b.x + b.width);
    let y1 = (a.y + a.height).max(b.y + b.height);
    crate::rect(x0, y0, x1 - x0, y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rect, vec2, FixedFont, KeyMode, MouseButton, WindowFlag};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct ScriptState {
        queue: VecDeque<Event>,
        ticks: u64,
        presents: Vec<Recti>,
        fullscreen_toggles: usize,
    }

    /// Event source double fed from a prepared queue. The clock advances by
    /// one millisecond per observation so coalescing windows stay open.
    #[derive(Clone)]
    struct ScriptedPlatform(Rc<RefCell<ScriptState>>);

    impl ScriptedPlatform {
        fn new(events: Vec<Event>) -> (Self, Rc<RefCell<ScriptState>>) {
            let state = Rc::new(RefCell::new(ScriptState {
                queue: events.into(),
                ..ScriptState::default()
            }));
            (Self(state.clone()), state)
        }
    }

    impl Platform for ScriptedPlatform {
        fn wait_event(&mut self) -> Result<Event, UiError> {
            self.0.borrow_mut().queue.pop_front().ok_or(UiError::EventSourceClosed)
        }
        fn poll_event(&mut self) -> Option<Event> { self.0.borrow_mut().queue.pop_front() }
        fn ticks(&self) -> u64 {
            let mut state = self.0.borrow_mut();
            state.ticks += 1;
            state.ticks
        }
        fn present(&mut self, _surface: &Surface, area: Recti) { self.0.borrow_mut().presents.push(area) }
        fn toggle_fullscreen(&mut self) { self.0.borrow_mut().fullscreen_toggles += 1 }
    }

    fn view_over(events: Vec<Event>) -> (View, Rc<RefCell<ScriptState>>) {
        let (platform, state) = ScriptedPlatform::new(events);
        let view = View::new(Box::new(platform), Box::new(FixedFont::default()), Style::default(), 320, 200).unwrap();
        (view, state)
    }

    #[test]
    fn motion_bursts_coalesce_into_one_event() {
        let (mut view, _state) = view_over(vec![
            Event::MouseMove { pos: vec2(1, 1), delta: vec2(1, 1) },
            Event::MouseMove { pos: vec2(3, 2), delta: vec2(2, 1) },
            Event::MouseMove { pos: vec2(7, 4), delta: vec2(4, 2) },
            Event::Quit,
        ]);
        let event = view.fetch_event().unwrap();
        match event {
            Event::MouseMove { pos, delta } => {
                assert_eq!((pos.x, pos.y), (7, 4));
                assert_eq!((delta.x, delta.y), (7, 4));
            }
            other => panic!("expected a mouse move, got {:?}", other),
        }
        assert!(matches!(view.fetch_event(), Ok(Event::Quit)));
    }

    #[test]
    fn interrupting_event_is_stashed_not_lost() {
        let (mut view, _state) = view_over(vec![
            Event::MouseMove { pos: vec2(1, 1), delta: vec2(1, 1) },
            Event::MouseDown { pos: vec2(1, 1), button: MouseButton::LEFT },
        ]);
        assert!(matches!(view.fetch_event(), Ok(Event::MouseMove { .. })));
        assert!(matches!(view.fetch_event(), Ok(Event::MouseDown { .. })));
    }

    #[test]
    fn alt_return_toggles_fullscreen_and_is_suppressed() {
        let (mut view, state) = view_over(vec![]);
        let event = Event::KeyDown { key: Key::Return, mods: KeyMode::ALT };
        assert!(view.filter_event(event).is_none());
        assert_eq!(state.borrow().fullscreen_toggles, 1);
        let plain = Event::KeyDown { key: Key::Return, mods: KeyMode::NONE };
        assert!(view.filter_event(plain).is_some());
    }

    #[test]
    fn caller_filter_can_consume_events() {
        let (mut view, _state) = view_over(vec![]);
        view.set_event_filter(Box::new(|event| matches!(event, Event::KeyDown { key: Key::Tab, .. })));
        assert!(view.filter_event(Event::KeyDown { key: Key::Tab, mods: KeyMode::NONE }).is_none());
        assert!(view.filter_event(Event::KeyDown { key: Key::Left, mods: KeyMode::NONE }).is_some());
    }

    #[test]
    fn close_marks_and_moves_to_tail_then_reaps_next_cycle() {
        let (mut view, _state) = view_over(vec![]);
        let back = view.open_window(Window::new(Id::new(1), "back", rect(0, 0, 100, 100), WindowFlag::NONE).unwrap());
        let front = view.open_window(Window::new(Id::new(2), "front", rect(20, 20, 60, 60), WindowFlag::CLOSE_ON_ESC).unwrap());

        let status = view.handle_events(&Event::KeyDown { key: Key::Escape, mods: KeyMode::NONE });
        assert_eq!(status, EventStatus::Ok);
        // still on the stack, but closed and at the tail
        assert_eq!(view.window_count(), 2);
        assert!(!front.is_open());
        assert_eq!(view.front().unwrap().id(), back.id());

        view.reap_closed();
        assert_eq!(view.window_count(), 1);
        assert!(view.window(Id::new(2)).is_none());
    }

    #[test]
    fn bring_to_front_refocuses_a_back_window() {
        let (mut view, _state) = view_over(vec![]);
        let back = view.open_window(Window::new(Id::new(1), "back", rect(0, 0, 100, 100), WindowFlag::NONE).unwrap());
        let front = view.open_window(Window::new(Id::new(2), "front", rect(20, 20, 60, 60), WindowFlag::NONE).unwrap());
        assert_eq!(view.front().unwrap().id(), front.id());

        view.bring_to_front(back.id());
        assert_eq!(view.front().unwrap().id(), back.id());
        assert_eq!(view.window_count(), 2);

        // unknown ids leave the stack alone
        view.bring_to_front(Id::new(99));
        assert_eq!(view.front().unwrap().id(), back.id());
    }

    #[test]
    fn run_returns_quit_and_unwinds() {
        let (mut view, _state) = view_over(vec![Event::Quit]);
        view.open_window(Window::new(Id::new(1), "w", rect(0, 0, 100, 100), WindowFlag::NONE).unwrap());
        assert_eq!(view.run().unwrap(), Verdict::Quit);
    }

    #[test]
    fn closed_event_source_surfaces_as_an_error() {
        let (mut view, _state) = view_over(vec![]);
        assert!(view.run().is_err());
    }

    #[test]
    fn refresh_presents_only_the_damaged_union() {
        let (mut view, state) = view_over(vec![]);
        let w = view.open_window(Window::new(Id::new(1), "w", rect(10, 10, 100, 80), WindowFlag::NONE).unwrap());
        view.compose();
        state.borrow_mut().presents.clear();

        view.refresh();
        assert!(state.borrow().presents.is_empty());

        w.with_mut(|win| {
            win.draw_all(&FixedFont::default(), &Style::default());
        });
        view.refresh();
        let presents = state.borrow().presents.clone();
        assert_eq!(presents.len(), 1);
        let area = presents[0];
        assert_eq!((area.x, area.y, area.width, area.height), (10, 10, 100, 80));
    }
}

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
//! End-to-end pump scenarios: a scripted platform feeds events through the
//! view and the tests observe window lifecycle, widget hooks, and verdicts.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rasterui::*;

#[derive(Default)]
struct ScriptState {
    queue: VecDeque<Event>,
    ticks: u64,
    presents: Vec<Recti>,
    fullscreen_toggles: usize,
}

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

struct LevelSink {
    seen: Vec<i32>,
}

impl WidgetHook for LevelSink {
    fn widget_activated(&mut self, _source: Id, value: i32) { self.seen.push(value) }
}

#[test]
fn esc_closes_the_dialog_then_quit_unwinds() {
    let (mut view, _state) = view_over(vec![
        Event::KeyDown { key: Key::Escape, mods: KeyMode::NONE },
        Event::Quit,
    ]);
    view.open_window(Window::new(Id::from_str("main"), "main", rect(0, 0, 320, 200), WindowFlag::NONE).unwrap());
    let dialog = view.open_window(Window::new(Id::from_str("dialog"), "dialog", rect(60, 40, 200, 120), WindowFlag::CLOSE_ON_ESC).unwrap());

    assert_eq!(view.run().unwrap(), Verdict::Quit);
    assert!(!dialog.is_open());
    // the dialog was reaped on the cycle after the close
    assert!(view.window(Id::from_str("dialog")).is_none());
    assert!(view.window(Id::from_str("main")).is_some());
}

#[test]
fn close_never_frees_the_window_mid_dispatch() {
    let (mut view, _state) = view_over(vec![]);
    let dialog = view.open_window(Window::new(Id::new(7), "d", rect(0, 0, 100, 100), WindowFlag::CLOSE_ON_ESC).unwrap());

    let status = view.handle_events(&Event::KeyDown { key: Key::Escape, mods: KeyMode::NONE });
    assert_eq!(status, EventStatus::Ok);
    // closed but still owned by the stack until the next cycle reaps it
    assert!(!dialog.is_open());
    assert_eq!(view.window_count(), 1);
    view.reap_closed();
    assert_eq!(view.window_count(), 0);
}

#[test]
fn slider_drag_reaches_the_hook_through_the_whole_stack() {
    // window at (10, 10); slider local rect (10, 10, 110, 14), range 0..=100
    // with a 10-unit knob: 108px track, 9px knob, step 0.99
    let (mut view, _state) = view_over(vec![
        Event::MouseDown { pos: vec2(22, 25), button: MouseButton::LEFT },
        Event::MouseMove { pos: vec2(200, 25), delta: vec2(178, 0) },
        Event::MouseUp { pos: vec2(200, 25), button: MouseButton::LEFT },
        Event::Quit,
    ]);
    let sink = Rc::new(RefCell::new(LevelSink { seen: Vec::new() }));
    let handle: HookHandle = sink.clone();

    let mut window = Window::new(Id::new(1), "w", rect(10, 10, 140, 60), WindowFlag::NO_TITLE).unwrap();
    let mut slider = Slider::new(Id::new(2), rect(10, 10, 110, 14), 0, 100, 10, WidgetFlag::HSCROLL);
    slider.base_mut().set_hook(&handle);
    window.add_widget(Box::new(slider));
    view.open_window(window);

    assert_eq!(view.run().unwrap(), Verdict::Quit);
    assert_eq!(*sink.borrow().seen.last().unwrap(), 100);
}

#[test]
fn alt_return_is_swallowed_by_the_system_filter() {
    let (mut view, state) = view_over(vec![
        Event::KeyDown { key: Key::Return, mods: KeyMode::ALT },
        Event::Quit,
    ]);
    let sink = Rc::new(RefCell::new(LevelSink { seen: Vec::new() }));
    let handle: HookHandle = sink.clone();

    let mut window = Window::new(Id::new(1), "w", rect(0, 0, 320, 200), WindowFlag::NO_TITLE).unwrap();
    let mut input = StringInput::new(Id::new(2), rect(10, 10, 120, 20), "", WidgetFlag::NONE);
    input.base_mut().set_hook(&handle);
    window.add_widget(Box::new(input));
    view.open_window(window);

    assert_eq!(view.run().unwrap(), Verdict::Quit);
    assert_eq!(state.borrow().fullscreen_toggles, 1);
    // the Return never reached the input, so no commit hook fired
    assert!(sink.borrow().seen.is_empty());
}

#[test]
fn a_widget_verdict_ends_the_pump() {
    struct RestartKey {
        base: WidgetBase,
    }

    impl Widget for RestartKey {
        fn base(&self) -> &WidgetBase { &self.base }
        fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
        fn draw(&mut self, _ctx: &mut PaintCtx<'_>) {}
        fn key_down(&mut self, _ctx: &mut PaintCtx<'_>, key: Key, _mods: KeyMode) -> EventStatus {
            if key == Key::Char('r') { EventStatus::Restart } else { EventStatus::Ignored }
        }
    }

    let (mut view, _state) = view_over(vec![
        Event::KeyDown { key: Key::Char('x'), mods: KeyMode::NONE },
        Event::KeyDown { key: Key::Char('r'), mods: KeyMode::NONE },
    ]);
    let mut window = Window::new(Id::new(1), "w", rect(0, 0, 320, 200), WindowFlag::NO_TITLE).unwrap();
    window.add_widget(Box::new(RestartKey { base: WidgetBase::new(Id::new(2), rect(0, 0, 10, 10), WidgetFlag::NONE) }));
    view.open_window(window);

    assert_eq!(view.run().unwrap(), Verdict::Restart);
}

struct Names(Vec<String>);

impl ListSource for Names {
    fn len(&self) -> usize { self.0.len() }
    fn draw_item(&self, ctx: &mut PaintCtx<'_>, index: usize, area: Recti, selected: bool) {
        let color = if selected { StyleColor::TitleText } else { StyleColor::Text };
        let color = ctx.style().color(color);
        let label = self.0[index].clone();
        ctx.draw_control_text(FontId::default(), &label, area, color, WidgetFlag::NONE);
    }
}

#[test]
fn wheel_over_a_list_scrolls_it_through_the_window() {
    // window at (10, 10), no title; list local rect (5, 5, 100, 40):
    // 4 visible rows of 10px over 10 items, so the internal slider exists.
    // One wheel tick scrolls the top row to 1; the click lands on visible
    // row 1, which is item 2 after the scroll.
    let (mut view, _state) = view_over(vec![
        Event::MouseDown { pos: vec2(40, 30), button: MouseButton::WHEEL_DOWN },
        Event::MouseDown { pos: vec2(40, 30), button: MouseButton::LEFT },
        Event::Quit,
    ]);
    let sink = Rc::new(RefCell::new(LevelSink { seen: Vec::new() }));
    let handle: HookHandle = sink.clone();

    let source = Rc::new(RefCell::new(Names((0..10).map(|i| format!("row {i}")).collect())));
    let mut window = Window::new(Id::new(1), "w", rect(10, 10, 120, 60), WindowFlag::NO_TITLE).unwrap();
    let mut list = ListBox::new(Id::new(2), rect(5, 5, 100, 40), source, 10, WidgetFlag::NONE);
    list.base_mut().set_hook(&handle);
    let style = *view.style();
    window.with_paint_ctx(&FixedFont::default(), &style, |ctx, _| list.update(ctx));
    assert!(list.has_slider());
    window.add_widget(Box::new(list));
    view.open_window(window);

    assert_eq!(view.run().unwrap(), Verdict::Quit);
    assert_eq!(*sink.borrow().seen.last().unwrap(), 2);
}

#[test]
fn every_cycle_presents_at_most_the_damage() {
    let (mut view, state) = view_over(vec![
        Event::MouseDown { pos: vec2(5, 5), button: MouseButton::LEFT },
        Event::Quit,
    ]);
    view.open_window(Window::new(Id::new(1), "w", rect(20, 20, 100, 80), WindowFlag::NONE).unwrap());
    assert_eq!(view.run().unwrap(), Verdict::Quit);
    let presents = state.borrow().presents.clone();
    // the initial composite covers the screen; later cycles had no damage
    assert_eq!(presents.len(), 1);
    assert_eq!((presents[0].width, presents[0].height), (320, 200));
}

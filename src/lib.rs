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
#![deny(missing_docs)]
//! `rasterui` is a retained-mode windowing and widget toolkit that renders a
//! stack of overlapping windows onto a single software raster surface and
//! routes input events to them. Glyph rendering and the platform event/display
//! layer are consumed through the narrow [`TextRenderer`] and [`Platform`]
//! traits, keeping the core free of any rasterizer or video backend.

mod composite;
mod geometry;
mod surface;
mod text;
mod view;
mod widget;
mod widgets;
mod window;

pub use composite::*;
pub use geometry::*;
pub use rs_math3d::*;
pub use surface::*;
pub use text::*;
pub use view::*;
pub use widget::*;
pub use widgets::*;
pub use window::*;

use bitflags::bitflags;
use thiserror::Error;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Caller-defined numeric widget/window identifier. Not required to be unique;
/// hooks receive it to disambiguate which widget fired.
pub struct Id(usize);

impl Id {
    /// Creates an ID from a caller-supplied numeric value.
    pub fn new(value: usize) -> Self { Self(value) }

    /// Creates a stable ID from a string label using FNV-1a hashing.
    pub fn from_str(label: &str) -> Self {
        const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;
        let mut hash = FNV_OFFSET_BASIS;
        for byte in label.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(hash as usize)
    }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> usize { self.0 }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Errors produced when constructing toolkit resources.
#[derive(Debug, Error)]
pub enum UiError {
    /// A surface was requested with non-positive dimensions.
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidSurfaceSize {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// The platform event source failed or was closed.
    #[error("platform event source closed")]
    EventSourceClosed,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Verdict returned by every event handler in the widget → composite →
/// window → view chain. There is no exception channel; this status is the
/// only way an inner handler influences its containers.
pub enum EventStatus {
    /// The event was handled; continue normally.
    Ok,
    /// The event was not handled; offer it to the next candidate.
    Ignored,
    /// Close the window that dispatched this event.
    Close,
    /// Terminate the application event loop.
    Quit,
    /// Leave the event loop and restart it (e.g. after a mode change).
    Restart,
    /// The handler failed; the event is discarded.
    Error,
}

impl EventStatus {
    /// Returns `true` for the plain handled status.
    pub fn is_ok(self) -> bool { self == Self::Ok }
    /// Returns `true` if the event was left unhandled.
    pub fn is_ignored(self) -> bool { self == Self::Ignored }
    /// Returns `true` if this status carries a container-level verdict
    /// (close/quit/restart/error) rather than a handled/unhandled outcome.
    pub fn is_verdict(self) -> bool { !matches!(self, Self::Ok | Self::Ignored) }
}

bitflags! {
    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    /// Mouse button state as reported by the platform. The wheel is exposed
    /// as a pair of pseudo-buttons so widgets can treat wheel ticks like
    /// clicks on slider arrows.
    pub struct MouseButton : u32 {
        /// Wheel rotated away from the user.
        const WHEEL_DOWN = 16;
        /// Wheel rotated towards the user.
        const WHEEL_UP = 8;
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the left mouse button is pressed.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if the right mouse button is pressed.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the middle mouse button is pressed.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` for either wheel pseudo-button.
    pub fn is_wheel(&self) -> bool { self.intersects(Self::WHEEL_UP | Self::WHEEL_DOWN) }
    /// Returns `true` if no buttons are pressed.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    /// Modifier key state delivered alongside key events.
    pub struct KeyMode : u32 {
        /// Alt key held.
        const ALT = 4;
        /// Control key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Returns `true` if no modifiers are active.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Symbolic key code delivered with key events.
pub enum Key {
    /// Escape key.
    Escape,
    /// Return/Enter key.
    Return,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page-up key.
    PageUp,
    /// Page-down key.
    PageDown,
    /// A printable character, already translated by the platform layer.
    Char(char),
}

#[derive(Copy, Clone, Debug)]
/// Input event delivered by the platform layer and routed by the [`View`].
pub enum Event {
    /// A mouse button was pressed at the given screen position.
    MouseDown {
        /// Screen position of the pointer.
        pos: Vec2i,
        /// Button that went down.
        button: MouseButton,
    },
    /// A mouse button was released at the given screen position.
    MouseUp {
        /// Screen position of the pointer.
        pos: Vec2i,
        /// Button that went up.
        button: MouseButton,
    },
    /// The pointer moved. Consecutive motion events may be coalesced by the
    /// view, accumulating `delta`.
    MouseMove {
        /// New screen position of the pointer.
        pos: Vec2i,
        /// Relative motion since the previous event.
        delta: Vec2i,
    },
    /// A key went down.
    KeyDown {
        /// Symbolic key code.
        key: Key,
        /// Active modifier mask.
        mods: KeyMode,
    },
    /// A key went up.
    KeyUp {
        /// Symbolic key code.
        key: Key,
        /// Active modifier mask.
        mods: KeyMode,
    },
    /// The platform requested application shutdown.
    Quit,
}

bitflags! {
    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    /// Construction-time widget behaviour bitmask. This flag set is the
    /// entire configuration surface of the toolkit.
    pub struct WidgetFlag : u32 {
        /// Text is rendered masked (password input).
        const PASSWORD = 1024;
        /// The widget rejects edits but still draws normally.
        const READONLY = 512;
        /// Directional keys move the widget's selection/scroll position.
        const SCROLL_KEYS = 256;
        /// The internal slider scrolls horizontally instead of vertically.
        const HSCROLL = 128;
        /// The widget is a child of a composite and must not be tracked by
        /// its window directly.
        const SUBWIDGET = 64;
        /// Align contained text to the right edge.
        const ALIGN_RIGHT = 32;
        /// Center contained text.
        const ALIGN_CENTER = 16;
        /// Draw a 1px border around the widget.
        const BORDER = 8;
        /// The widget is drawn but receives no events.
        const DISABLED = 4;
        /// The widget is neither drawn nor receives events.
        const HIDDEN = 2;
        /// Return activates this widget even without an activation key.
        const DEFAULT = 1;
        /// No special behaviour.
        const NONE = 0;
    }

    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    /// Construction-time window behaviour bitmask.
    pub struct WindowFlag : u32 {
        /// Do not draw a title bar.
        const NO_TITLE = 4;
        /// A mouse press outside the window requests closing it.
        const CLOSE_ON_UNFOCUS_CLICK = 2;
        /// An Escape key press requests closing the window.
        const CLOSE_ON_ESC = 1;
        /// No special behaviour.
        const NONE = 0;
    }
}

impl WidgetFlag {
    /// Returns `true` if the widget is hidden.
    pub fn is_hidden(&self) -> bool { self.intersects(Self::HIDDEN) }
    /// Returns `true` if the widget is disabled.
    pub fn is_disabled(&self) -> bool { self.intersects(Self::DISABLED) }
    /// Returns `true` if the widget belongs to a composite.
    pub fn is_sub_widget(&self) -> bool { self.intersects(Self::SUBWIDGET) }
    /// Returns `true` if Return should activate the widget.
    pub fn is_default(&self) -> bool { self.intersects(Self::DEFAULT) }
    /// Returns `true` if the widget draws a border.
    pub fn has_border(&self) -> bool { self.intersects(Self::BORDER) }
    /// Returns `true` if text should be centered.
    pub fn is_aligned_center(&self) -> bool { self.intersects(Self::ALIGN_CENTER) }
    /// Returns `true` if text should be right-aligned.
    pub fn is_aligned_right(&self) -> bool { self.intersects(Self::ALIGN_RIGHT) }
    /// Returns `true` if the widget scrolls on directional keys.
    pub fn has_scroll_keys(&self) -> bool { self.intersects(Self::SCROLL_KEYS) }
    /// Returns `true` if scrolling is horizontal.
    pub fn is_horizontal_scroll(&self) -> bool { self.intersects(Self::HSCROLL) }
    /// Returns `true` if text should be masked.
    pub fn is_password(&self) -> bool { self.intersects(Self::PASSWORD) }
    /// Returns `true` if the widget rejects edits.
    pub fn is_readonly(&self) -> bool { self.intersects(Self::READONLY) }
}

impl WindowFlag {
    /// Returns `true` if Escape closes the window.
    pub fn closes_on_esc(&self) -> bool { self.intersects(Self::CLOSE_ON_ESC) }
    /// Returns `true` if clicking outside closes the window.
    pub fn closes_on_unfocus_click(&self) -> bool { self.intersects(Self::CLOSE_ON_UNFOCUS_CLICK) }
    /// Returns `true` if the title bar is suppressed.
    pub fn has_no_title(&self) -> bool { self.intersects(Self::NO_TITLE) }
}

#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
/// Identifiers for each of the built-in style colors.
pub enum StyleColor {
    /// Number of color entries in [`Style::colors`].
    Max = 8,
    /// Slider knob fill.
    Knob = 7,
    /// Slider track fill.
    Track = 6,
    /// Selected list row background.
    Selection = 5,
    /// Window title text color.
    TitleText = 4,
    /// Window title background color.
    TitleBG = 3,
    /// Widget/window border color.
    Border = 2,
    /// Default text color.
    Text = 1,
    /// Window background color.
    WindowBG = 0,
}

#[derive(Copy, Clone)]
/// Collection of visual constants that drive widget appearance. Owned by the
/// [`View`] and passed down by reference; there is no global style state.
pub struct Style {
    /// Inner padding applied to text inside widgets.
    pub padding: i32,
    /// Height of window title bars.
    pub title_height: i32,
    /// Default height of one list row in pixels.
    pub item_height: i32,
    /// Thickness of slider tracks perpendicular to their axis.
    pub slider_size: i32,
    /// Palette of [`StyleColor`] entries.
    pub colors: [Color; 8],
}

impl Style {
    /// Returns the palette entry for `id`.
    pub fn color(&self, id: StyleColor) -> Color { self.colors[id as usize] }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            padding: 4,
            title_height: 20,
            item_height: 16,
            slider_size: 14,
            colors: [
                Color { r: 50, g: 50, b: 50, a: 255 },
                Color { r: 230, g: 230, b: 230, a: 255 },
                Color { r: 25, g: 25, b: 25, a: 255 },
                Color { r: 35, g: 35, b: 35, a: 255 },
                Color { r: 240, g: 240, b: 240, a: 255 },
                Color { r: 75, g: 75, b: 95, a: 255 },
                Color { r: 40, g: 40, b: 40, a: 255 },
                Color { r: 115, g: 115, b: 115, a: 255 },
            ],
        }
    }
}

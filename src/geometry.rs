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
use crate::{rect, Recti, Vec2i};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Horizontal/vertical placement used by [`RectExt::aligned_in`].
pub enum Align {
    /// Align against the lower coordinate edge.
    Start,
    /// Center within the parent.
    Center,
    /// Align against the higher coordinate edge.
    End,
}

/// Pure value operations on axis-aligned integer rectangles. Width and
/// height stay non-negative; clipping may collapse a rectangle to zero size.
pub trait RectExt: Sized {
    /// Returns `true` if the point lies inside the rectangle.
    fn contains_point(&self, p: Vec2i) -> bool;
    /// Returns `true` if `other` lies entirely inside the rectangle.
    fn contains_rect(&self, other: &Self) -> bool;
    /// Clamps the rectangle to `parent`, collapsing to zero size when the
    /// two do not overlap.
    fn clip_to(&self, parent: &Self) -> Self;
    /// Returns a copy moved by the given offsets.
    fn offset(&self, dx: i32, dy: i32) -> Self;
    /// Returns a copy centered inside `parent`, keeping its own size.
    fn centered_in(&self, parent: &Self) -> Self;
    /// Returns a copy aligned inside `parent` on both axes.
    fn aligned_in(&self, parent: &Self, horizontal: Align, vertical: Align) -> Self;
}

fn align_coord(len: i32, parent_pos: i32, parent_len: i32, align: Align) -> i32 {
    match align {
        Align::Start => parent_pos,
        Align::Center => parent_pos + (parent_len - len) / 2,
        Align::End => parent_pos + parent_len - len,
    }
}

impl RectExt for Recti {
    fn contains_point(&self, p: Vec2i) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    fn clip_to(&self, parent: &Self) -> Self {
        match self.intersect(parent) {
            Some(r) => r,
            None => rect(self.x.clamp(parent.x, parent.x + parent.width), self.y.clamp(parent.y, parent.y + parent.height), 0, 0),
        }
    }

    fn offset(&self, dx: i32, dy: i32) -> Self { rect(self.x + dx, self.y + dy, self.width, self.height) }

    fn centered_in(&self, parent: &Self) -> Self { self.aligned_in(parent, Align::Center, Align::Center) }

    fn aligned_in(&self, parent: &Self, horizontal: Align, vertical: Align) -> Self {
        rect(
            align_coord(self.width, parent.x, parent.width, horizontal),
            align_coord(self.height, parent.y, parent.height, vertical),
            self.width,
            self.height,
        )
    }
}

//! Scripted backend for unit testing.
//!
//! Replays a queue of [`PickerEvent`]s and serves pixel colors from an
//! in-memory map, so the dispatcher can run without an X server.

use std::collections::{HashMap, VecDeque};

use anyhow::Result;

use crate::backend::Backend;
use crate::error::PickError;
use crate::types::{Color, PickerEvent, Point};

pub struct MockBackend {
    pointer: Point,
    background: Color,
    pixels: HashMap<Point, Color>,
    bad_depths: HashMap<Point, usize>,
    events: VecDeque<PickerEvent>,
    /// Position and color the preview was first shown with.
    pub shown: Option<(Point, Color)>,
    /// Every preview update, in order.
    pub updates: Vec<(Point, Color)>,
    pub grabbed: bool,
}

impl MockBackend {
    /// A screen filled with `background` and the pointer resting at `pointer`.
    pub fn new(pointer: Point, background: Color) -> Self {
        Self {
            pointer,
            background,
            pixels: HashMap::new(),
            bad_depths: HashMap::new(),
            events: VecDeque::new(),
            shown: None,
            updates: Vec::new(),
            grabbed: false,
        }
    }

    pub fn paint(&mut self, at: Point, color: Color) {
        self.pixels.insert(at, color);
    }

    /// Sampling `at` will report an image of `bits` bits per pixel.
    pub fn fail_at(&mut self, at: Point, bits: usize) {
        self.bad_depths.insert(at, bits);
    }

    pub fn push(&mut self, event: PickerEvent) {
        self.events.push_back(event);
    }
}

impl Backend for MockBackend {
    fn pointer_position(&mut self) -> Result<Point> {
        Ok(self.pointer)
    }

    fn color_at(&mut self, at: Point) -> Result<Color> {
        if let Some(&bits) = self.bad_depths.get(&at) {
            return Err(PickError::PixelFormat(bits).into());
        }
        Ok(self.pixels.get(&at).copied().unwrap_or(self.background))
    }

    fn show_preview(&mut self, cursor: Point, color: Color) -> Result<()> {
        self.shown = Some((cursor, color));
        Ok(())
    }

    fn update_preview(&mut self, cursor: Point, color: Color) -> Result<()> {
        self.updates.push((cursor, color));
        Ok(())
    }

    fn grab_pointer(&mut self) -> Result<()> {
        self.grabbed = true;
        Ok(())
    }

    fn next_event(&mut self) -> Result<PickerEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| PickError::EventStreamClosed.into())
    }
}

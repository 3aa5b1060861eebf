//! The capabilities the picker needs from a display server.
//!
//! [`Picker`](crate::picker::Picker) only talks to a [`Backend`], so the
//! dispatcher can be driven by scripted events in tests. [`X11Backend`] is the
//! live implementation on top of a [`Session`].

use anyhow::{Context, Result};
use tracing::trace;
use x11rb::connection::Connection;
use x11rb::protocol::Event;

use crate::error::PickError;
use crate::sampler;
use crate::session::Session;
use crate::types::{Color, PickerEvent, Point};
use crate::window::PreviewWindow;

pub trait Backend {
    /// Current pointer position relative to the root window.
    fn pointer_position(&mut self) -> Result<Point>;
    /// Color of the single pixel at `at`.
    fn color_at(&mut self, at: Point) -> Result<Color>;
    /// Creates and maps the preview window.
    fn show_preview(&mut self, cursor: Point, color: Color) -> Result<()>;
    /// Moves the preview next to `cursor` and fills it with `color`.
    fn update_preview(&mut self, cursor: Point, color: Color) -> Result<()>;
    /// Takes exclusive ownership of pointer input.
    fn grab_pointer(&mut self) -> Result<()>;
    /// Blocks until the next event arrives.
    fn next_event(&mut self) -> Result<PickerEvent>;
}

pub struct X11Backend<'a> {
    session: &'a mut Session,
    preview: Option<PreviewWindow>,
}

impl<'a> X11Backend<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self {
            session,
            preview: None,
        }
    }
}

impl Backend for X11Backend<'_> {
    fn pointer_position(&mut self) -> Result<Point> {
        sampler::get_pointer_position(&self.session.conn, self.session.root())
    }

    fn color_at(&mut self, at: Point) -> Result<Color> {
        sampler::get_color_at(&self.session.conn, self.session.root(), at)
    }

    fn show_preview(&mut self, cursor: Point, color: Color) -> Result<()> {
        let window = PreviewWindow::create(&self.session.conn, self.session.screen(), cursor, color)?;
        self.preview = Some(window);
        Ok(())
    }

    fn update_preview(&mut self, cursor: Point, color: Color) -> Result<()> {
        match self.preview.as_mut() {
            Some(window) => {
                window.reposition_and_recolor(&self.session.conn, self.session.screen(), cursor, color)?;
                trace!(x = window.position.0, y = window.position.1, "preview moved");
                Ok(())
            }
            None => self.show_preview(cursor, color),
        }
    }

    fn grab_pointer(&mut self) -> Result<()> {
        self.session.grab_pointer()
    }

    fn next_event(&mut self) -> Result<PickerEvent> {
        let event = self
            .session
            .conn
            .wait_for_event()
            .context(PickError::EventStreamClosed)?;

        let event = match event {
            Event::MotionNotify(ev) => PickerEvent::Motion(Point::new(ev.root_x, ev.root_y)),
            Event::ButtonPress(ev) => PickerEvent::ButtonPress(ev.detail),
            // Errors from unchecked requests show up here
            Event::Error(e) => {
                return Err(PickError::Request {
                    request: e.request_name.unwrap_or("request"),
                    code: e.error_code,
                }
                .into())
            }
            other => {
                trace!(?other, "ignoring event");
                PickerEvent::Other
            }
        };

        Ok(event)
    }
}

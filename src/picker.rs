// Input dispatcher: the Tracking -> Confirmed/Cancelled state machine

use anyhow::Result;
use tracing::{debug, trace};

use crate::backend::Backend;
use crate::constants::{MIDDLE_BUTTON, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::types::{Color, Outcome, PickerEvent, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickState {
    Tracking,
    Confirmed,
    Cancelled,
}

pub struct Picker {
    state: PickState,
    position: Point,
    color: Color,
}

impl Picker {
    /// Samples the pixel under the pointer, shows the preview there and
    /// grabs the pointer.
    pub fn start(backend: &mut impl Backend) -> Result<Self> {
        let position = backend.pointer_position()?;
        let color = backend.color_at(position)?;
        backend.show_preview(position, color)?;
        backend.grab_pointer()?;

        debug!(x = position.x, y = position.y, color = %color, "picker started");

        Ok(Self {
            state: PickState::Tracking,
            position,
            color,
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> PickState {
        self.state
    }

    #[cfg(test)]
    pub fn color(&self) -> Color {
        self.color
    }

    #[cfg(test)]
    pub fn position(&self) -> Point {
        self.position
    }

    // Apply one event; terminal states ignore everything
    pub fn handle(&mut self, backend: &mut impl Backend, event: PickerEvent) -> Result<()> {
        if self.state != PickState::Tracking {
            return Ok(());
        }

        match event {
            PickerEvent::Motion(at) => {
                let color = backend.color_at(at)?;
                backend.update_preview(at, color)?;
                trace!(x = at.x, y = at.y, color = %color, "pointer moved");

                self.position = at;
                self.color = color;
            }
            PickerEvent::ButtonPress(PRIMARY_BUTTON) => {
                debug!(color = %self.color, "color confirmed");
                self.state = PickState::Confirmed;
            }
            PickerEvent::ButtonPress(button @ (MIDDLE_BUTTON | SECONDARY_BUTTON)) => {
                debug!(button, "picking cancelled");
                self.state = PickState::Cancelled;
            }
            // Wheel and extra buttons
            PickerEvent::ButtonPress(button) => trace!(button, "ignoring button"),
            PickerEvent::Other => {}
        }

        Ok(())
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            PickState::Tracking => None,
            PickState::Confirmed => Some(Outcome::Confirmed(self.color)),
            PickState::Cancelled => Some(Outcome::Cancelled),
        }
    }

    /// Blocks on the event stream until a button press ends the session.
    pub fn run(mut self, backend: &mut impl Backend) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }

            let event = backend.next_event()?;
            self.handle(backend, event)?;
        }
    }
}

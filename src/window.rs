// Preview swatch window that follows the cursor

use anyhow::{Context, Result};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::wrapper::ConnectionExt as _;
use x11rb::COPY_DEPTH_FROM_PARENT;

use crate::constants::{
    BORDER_COLOR, PREVIEW_BORDER, PREVIEW_MARGIN, PREVIEW_REACH, PREVIEW_SIZE, PROGRAM_NAME,
};
use crate::types::{Color, Point};

pub struct PreviewWindow {
    pub win: Window,
    pub position: (i32, i32),
}

/// Where the window goes for a cursor at `cursor` on a `width`x`height` screen.
///
/// Horizontally the window tracks the cursor but is clamped between the left
/// margin and the right edge. Vertically it sits below the cursor unless that
/// would run off the bottom, in which case it flips above.
pub fn placement(cursor: Point, width: u16, height: u16) -> (i32, i32) {
    let (cx, cy) = (i32::from(cursor.x), i32::from(cursor.y));
    let right = i32::from(width) - PREVIEW_REACH;
    let bottom = i32::from(height) - PREVIEW_REACH;

    let x = if cx < PREVIEW_MARGIN {
        PREVIEW_MARGIN
    } else if cx >= right {
        right
    } else {
        cx
    };

    let y = if cy >= bottom {
        cy - PREVIEW_REACH
    } else {
        cy + PREVIEW_MARGIN
    };

    (x, y)
}

// X11 only takes 16-bit window positions
fn clamp_i16(v: i32) -> i16 {
    v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

impl PreviewWindow {
    pub fn create(conn: &impl Connection, screen: &Screen, cursor: Point, color: Color) -> Result<Self> {
        let win = conn.generate_id().context("Failed to allocate window id")?;
        let (x, y) = placement(cursor, screen.width_in_pixels, screen.height_in_pixels);

        let values = CreateWindowAux::new()
            .background_pixel(color.rgb())
            .border_pixel(BORDER_COLOR)
            .override_redirect(1);

        conn.create_window(
            COPY_DEPTH_FROM_PARENT,
            win,
            screen.root,
            clamp_i16(x), clamp_i16(y),
            PREVIEW_SIZE as u16, PREVIEW_SIZE as u16,
            PREVIEW_BORDER as u16,
            WindowClass::INPUT_OUTPUT,
            screen.root_visual,
            &values,
        )?;

        conn.change_property8(
            PropMode::REPLACE,
            win,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            PROGRAM_NAME.as_bytes(),
        )?;

        conn.map_window(win)?;
        conn.flush()?;

        Ok(Self {
            win,
            position: (x, y),
        })
    }

    pub fn reposition_and_recolor(
        &mut self,
        conn: &impl Connection,
        screen: &Screen,
        cursor: Point,
        color: Color,
    ) -> Result<()> {
        // New fill only shows after the area is cleared
        let values = ChangeWindowAttributesAux::new().background_pixel(color.rgb());
        conn.change_window_attributes(self.win, &values)?;
        conn.clear_area(false, self.win, 0, 0, PREVIEW_SIZE as u16, PREVIEW_SIZE as u16)?;

        let (x, y) = placement(cursor, screen.width_in_pixels, screen.height_in_pixels);
        let values = ConfigureWindowAux::new().x(x).y(y);
        conn.configure_window(self.win, &values)?;

        conn.flush()?;

        self.position = (x, y);

        Ok(())
    }
}

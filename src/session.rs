// Display session: the X connection, its default screen, and the
// server-side resources tied to the pointer grab

use anyhow::{Context, Result};
use tracing::{debug, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;
use x11rb::{CURRENT_TIME, NONE};

use crate::constants::{CURSOR_FONT, XC_GOBBLER};
use crate::error::PickError;

pub struct Session {
    pub conn: RustConnection,
    screen_num: usize,
    cursor: Option<Cursor>,
    grabbed: bool,
}

impl Session {
    /// Connects to the display named by `$DISPLAY` and resolves its default screen.
    pub fn open() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None).map_err(PickError::OpenDisplay)?;

        if conn.setup().roots.get(screen_num).is_none() {
            return Err(PickError::NoScreen.into());
        }

        debug!(screen_num, "connected to display");

        Ok(Self {
            conn,
            screen_num,
            cursor: None,
            grabbed: false,
        })
    }

    pub fn screen(&self) -> &Screen {
        &self.conn.setup().roots[self.screen_num]
    }

    pub fn root(&self) -> Window {
        self.screen().root
    }

    // Grab the pointer on the root window with the picker cursor
    pub fn grab_pointer(&mut self) -> Result<()> {
        let cursor = load_cursor(&self.conn, XC_GOBBLER)?;
        self.cursor = Some(cursor);

        let reply = self
            .conn
            .grab_pointer(
                false,
                self.root(),
                EventMask::POINTER_MOTION | EventMask::BUTTON_PRESS,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
                NONE,
                cursor,
                CURRENT_TIME,
            )
            .context("grab_pointer failed")?
            .reply()
            .map_err(|e| PickError::from_reply("grab_pointer", e))?;

        if reply.status != GrabStatus::SUCCESS {
            debug!(status = ?reply.status, "pointer grab refused");
            return Err(PickError::GrabFailed.into());
        }

        self.grabbed = true;
        debug!("pointer grabbed");

        Ok(())
    }

    /// Releases the grab and cursor, then disconnects.
    ///
    /// Failures here are only logged: the process is about to exit and the
    /// server reclaims everything on disconnect anyway.
    pub fn close(self) {
        if self.grabbed {
            if let Err(e) = self.conn.ungrab_pointer(CURRENT_TIME) {
                warn!("failed to release pointer grab: {}", e);
            }
        }

        if let Some(cursor) = self.cursor {
            if let Err(e) = self.conn.free_cursor(cursor) {
                warn!("failed to free cursor: {}", e);
            }
        }

        if let Err(e) = self.conn.flush() {
            warn!("failed to flush before disconnect: {}", e);
        }

        debug!("disconnected from display");
        // Dropping the connection closes the socket
    }
}

// Create a glyph cursor from the server's cursor font
fn load_cursor(conn: &impl Connection, glyph: u16) -> Result<Cursor> {
    let font = conn
        .generate_id()
        .map_err(|e| PickError::from_reply_or_id("open_font", e))?;
    let cursor = conn
        .generate_id()
        .map_err(|e| PickError::from_reply_or_id("create_glyph_cursor", e))?;

    conn.open_font(font, CURSOR_FONT.as_bytes())
        .context("open_font failed")?
        .check()
        .map_err(|e| PickError::from_reply("open_font", e))?;

    conn.create_glyph_cursor(
        cursor,
        font,
        font,
        glyph,
        glyph + 1,     // Mask glyph follows the source glyph
        0xffff, 0xffff, 0xffff, // Foreground color (RGB)
        0, 0, 0,       // Background color (RGB)
    )
    .context("create_glyph_cursor failed")?
    .check()
    .map_err(|e| PickError::from_reply("create_glyph_cursor", e))?;

    conn.close_font(font).context("close_font failed")?;

    Ok(cursor)
}

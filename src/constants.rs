// Constants shared across multiple modules

pub const PROGRAM_NAME: &str = "xcpick";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Preview window geometry
pub const PREVIEW_SIZE: i32 = 44;
pub const PREVIEW_BORDER: i32 = 3;
pub const PREVIEW_MARGIN: i32 = 25; // Gap between cursor and window, also the left clamp

// Distance the window needs from the cursor when it flips or clamps
pub const PREVIEW_REACH: i32 = PREVIEW_SIZE + PREVIEW_MARGIN + 2 * PREVIEW_BORDER;

pub const BORDER_COLOR: u32 = 0xffffff;

// Cursor font glyphs
pub const CURSOR_FONT: &str = "cursor";
pub const XC_GOBBLER: u16 = 54;

// Pointer buttons
pub const PRIMARY_BUTTON: u8 = 1;
pub const MIDDLE_BUTTON: u8 = 2;
pub const SECONDARY_BUTTON: u8 = 3;

// Only 32 bits-per-pixel Z-pixmap images are understood
pub const PIXEL_BYTES: usize = 4;

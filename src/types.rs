use std::fmt;

// Types shared across multiple modules

// A root-relative screen coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// A 24-bit RGB color packed as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color(u32);

impl Color {
    pub fn new(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    /// Builds a color from a BGRX pixel as it arrives from the server,
    /// dropping the padding byte.
    pub fn from_bgrx(bytes: [u8; 4]) -> Self {
        Self::new(u32::from_le_bytes(bytes))
    }

    pub fn rgb(self) -> u32 {
        self.0
    }
}

// Six lowercase hex digits, no prefix
impl fmt::LowerHex for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06x}", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self)
    }
}

// Events the picker cares about, stripped of their X11 wrappers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    Motion(Point),
    ButtonPress(u8),
    Other,
}

// How a picking session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Confirmed(Color),
    Cancelled,
}

use std::fmt;

use serde::Serialize;

/// A display color as a `#RRGGBB` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub const BLACK: Color = Color("#000000");

    pub const fn new(hex: &'static str) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Distinct chart colors handed out to queues in first-seen order.
pub const CHART_PALETTE: [Color; 35] = [
    Color("#FF0000"),
    Color("#7F0000"),
    Color("#FFA280"),
    Color("#806C60"),
    Color("#FF8800"),
    Color("#FFE1BF"),
    Color("#996600"),
    Color("#FFCC00"),
    Color("#66644D"),
    Color("#4C4700"),
    Color("#EEFF00"),
    Color("#FBFFBF"),
    Color("#66FF00"),
    Color("#7DB359"),
    Color("#8FBFA3"),
    Color("#005930"),
    Color("#00FFAA"),
    Color("#00EEFF"),
    Color("#003C40"),
    Color("#00AAFF"),
    Color("#738C99"),
    Color("#004480"),
    Color("#0066FF"),
    Color("#0000FF"),
    Color("#0000BF"),
    Color("#1A1966"),
    Color("#C8BFFF"),
    Color("#9559B3"),
    Color("#CC00FF"),
    Color("#590047"),
    Color("#FF00AA"),
    Color("#FFBFEA"),
    Color("#A65369"),
    Color("#FF4059"),
    Color("#400009"),
];

use unicode_width::UnicodeWidthChar;

/// Measures the rendered width of a single character, in pixels.
///
/// The live surface injects a measurer backed by its real font metrics; the
/// engine never touches layout machinery itself, so it can run headless in
/// tests with a deterministic implementation.
pub trait TextMeasurer {
    fn measure(&self, ch: char) -> f64;
}

/// Monospace measurer: one cell per narrow glyph, two cells per wide glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub cell_width: f64,
}

impl MonospaceMeasurer {
    pub const fn new(cell_width: f64) -> Self {
        Self { cell_width }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, ch: char) -> f64 {
        // Zero-width characters (combining marks, controls) take no cell.
        let cells = UnicodeWidthChar::width(ch).unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        {
            self.cell_width * cells as f64
        }
    }
}

/// Deterministic fixed-width measurer for headless tests: every character
/// is exactly `width` pixels wide, wide glyphs included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidthMeasurer {
    pub width: f64,
}

impl FixedWidthMeasurer {
    pub const fn new(width: f64) -> Self {
        Self { width }
    }
}

impl TextMeasurer for FixedWidthMeasurer {
    fn measure(&self, _ch: char) -> f64 {
        self.width
    }
}

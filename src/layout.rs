//! Paginated grid drawing over an abstract page surface.
//!
//! Coordinates are millimetres measured from the top-left corner of the
//! page; backends flip the axis themselves if they need to.

/// Continuation pages start the table at this offset from the top.
pub const CONTINUATION_TOP: f32 = 18.0;
/// No row may end below `page_height - PAGE_BOTTOM_MARGIN`.
pub const PAGE_BOTTOM_MARGIN: f32 = 18.0;
/// Horizontal padding between a cell border and its text.
pub const CELL_INSET: f32 = 2.0;
/// Text baseline as a fraction of the row height.
const BASELINE: f32 = 0.7;

const HEADER_FONT_SIZE: f32 = 10.0;
const BODY_FONT_SIZE: f32 = 9.0;
const BORDER_WIDTH: f32 = 0.2;

pub const HEADER_FILL: Rgb = Rgb(217, 212, 207);
pub const BORDER_COLOR: Rgb = Rgb(60, 60, 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// The drawing capability a rendering backend has to provide.
pub trait Surface {
    fn page_width(&self) -> f32;
    fn page_height(&self) -> f32;
    fn new_page(&mut self);
    fn set_font(&mut self, weight: FontWeight, size: f32);
    /// Width of `s` in the current font.
    fn text_width(&self, s: &str) -> f32;
    /// Draw `s` with its baseline starting at `(x, y)`.
    fn text(&mut self, s: &str, x: f32, y: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, thickness: f32);
    fn hline(&mut self, x1: f32, x2: f32, y: f32, color: Rgb, thickness: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Col {
    pub width: f32,
    pub align: Align,
}

pub struct Table<'a> {
    pub x: f32,
    pub y: f32,
    pub cols: &'a [Col],
    pub row_h: f32,
    pub headers: &'a [&'a str],
}

impl Table<'_> {
    fn width(&self) -> f32 {
        self.cols.iter().map(|c| c.width).sum()
    }

    /// Draw the header band and every row, breaking pages as needed.
    /// Returns the vertical cursor just below the last row.
    pub fn draw<S, I, R, C>(&self, surface: &mut S, rows: I) -> f32
    where
        S: Surface,
        I: IntoIterator<Item = R>,
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        let limit = surface.page_height() - PAGE_BOTTOM_MARGIN;
        let mut y = self.y;
        self.header(surface, y);
        y += self.row_h;

        for row in rows {
            if y + self.row_h > limit {
                surface.new_page();
                y = CONTINUATION_TOP;
                self.header(surface, y);
                y += self.row_h;
            }
            self.row(surface, y, row.as_ref());
            y += self.row_h;
        }
        y
    }

    fn header<S: Surface>(&self, surface: &mut S, y: f32) {
        let w = self.width();
        surface.fill_rect(self.x, y, w, self.row_h, HEADER_FILL);
        surface.stroke_rect(self.x, y, w, self.row_h, BORDER_COLOR, BORDER_WIDTH);
        surface.set_font(FontWeight::Bold, HEADER_FONT_SIZE);

        let mut x = self.x;
        for (i, col) in self.cols.iter().enumerate() {
            surface.stroke_rect(x, y, col.width, self.row_h, BORDER_COLOR, BORDER_WIDTH);
            let label = self.headers.get(i).copied().unwrap_or("");
            let clipped = clip(surface, label, col.width - 2.0 * CELL_INSET);
            surface.text(&clipped, x + CELL_INSET, y + self.row_h * BASELINE);
            x += col.width;
        }
    }

    fn row<S: Surface, C: AsRef<str>>(&self, surface: &mut S, y: f32, cells: &[C]) {
        surface.set_font(FontWeight::Normal, BODY_FONT_SIZE);
        let mut x = self.x;
        for (i, col) in self.cols.iter().enumerate() {
            surface.stroke_rect(x, y, col.width, self.row_h, BORDER_COLOR, BORDER_WIDTH);
            let txt = cells.get(i).map(|c| c.as_ref()).unwrap_or("");
            let clipped = clip(surface, txt, col.width - 2.0 * CELL_INSET);
            let baseline = y + self.row_h * BASELINE;
            match col.align {
                Align::Left => surface.text(&clipped, x + CELL_INSET, baseline),
                Align::Right => {
                    let tw = surface.text_width(&clipped);
                    surface.text(&clipped, x + col.width - CELL_INSET - tw, baseline);
                }
            }
            x += col.width;
        }
    }
}

/// Longest prefix of `text` that fits in `max_width` in the current font.
pub fn clip<S: Surface>(surface: &S, text: &str, max_width: f32) -> String {
    if surface.text_width(text) <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if surface.text_width(&out) > max_width {
            out.pop();
            break;
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        NewPage,
        Font(FontWeight, f32),
        Text { s: String, x: f32, y: f32 },
        Fill { x: f32, y: f32, w: f32, h: f32, color: Rgb },
        Stroke { x: f32, y: f32, w: f32, h: f32 },
        HLine { x1: f32, x2: f32, y: f32 },
    }

    /// In-memory surface that records every call, for layout assertions.
    pub struct RecordingSurface {
        pub width: f32,
        pub height: f32,
        pub font_size: f32,
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn a4() -> Self {
            Self {
                width: 210.0,
                height: 297.0,
                font_size: 10.0,
                ops: Vec::new(),
            }
        }

        pub fn pages(&self) -> usize {
            1 + self.ops.iter().filter(|op| **op == Op::NewPage).count()
        }

        /// Ops split per page.
        pub fn by_page(&self) -> Vec<Vec<&Op>> {
            let mut pages = vec![Vec::new()];
            for op in &self.ops {
                if *op == Op::NewPage {
                    pages.push(Vec::new());
                } else if let Some(last) = pages.last_mut() {
                    last.push(op);
                }
            }
            pages
        }

        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text { s, .. } => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn page_width(&self) -> f32 {
            self.width
        }
        fn page_height(&self) -> f32 {
            self.height
        }
        fn new_page(&mut self) {
            self.ops.push(Op::NewPage);
        }
        fn set_font(&mut self, weight: FontWeight, size: f32) {
            self.font_size = size;
            self.ops.push(Op::Font(weight, size));
        }
        fn text_width(&self, s: &str) -> f32 {
            s.chars().count() as f32 * self.font_size * 0.2
        }
        fn text(&mut self, s: &str, x: f32, y: f32) {
            self.ops.push(Op::Text { s: s.to_string(), x, y });
        }
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
            self.ops.push(Op::Fill { x, y, w, h, color });
        }
        fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _color: Rgb, _thickness: f32) {
            self.ops.push(Op::Stroke { x, y, w, h });
        }
        fn hline(&mut self, x1: f32, x2: f32, y: f32, _color: Rgb, _thickness: f32) {
            self.ops.push(Op::HLine { x1, x2, y });
        }
    }
}

use std::io::BufWriter;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;

use tracing::info;

use crate::composer::{compose, document_title};
use crate::error::{Result, ShiftTapError};
use crate::layout::{FontWeight, Rgb, Surface};
use crate::timesheet::Timesheet;

// A4 dimensions (mm)
pub const PAGE_W: f32 = 210.0;
pub const PAGE_H: f32 = 297.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em (from the AFM).
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Advance width of one glyph in 1/1000 em. Characters outside ASCII get a
/// wide upper bound so clipping errs on the short side.
fn glyph_width(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Normal => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    match c {
        ' '..='~' => table[c as usize - 32],
        '…' => 1000,
        _ => 778,
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        f32::from(c.0) / 255.0,
        f32::from(c.1) / 255.0,
        f32::from(c.2) / 255.0,
        None,
    ))
}

/// printpdf-backed page surface.
pub struct PdfSurface {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    current_page: PdfPageIndex,
    current_layer: PdfLayerIndex,
    weight: FontWeight,
    size: f32,
    pages: usize,
}

impl PdfSurface {
    pub fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ShiftTapError::Pdf(format!("{e:?}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ShiftTapError::Pdf(format!("{e:?}")))?;
        Ok(Self {
            doc,
            font,
            font_bold,
            current_page: page,
            current_layer: layer,
            weight: FontWeight::Normal,
            size: 10.0,
            pages: 1,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    fn layer(&self) -> PdfLayerReference {
        self.doc
            .get_page(self.current_page)
            .get_layer(self.current_layer)
    }

    /// PDF user space grows upwards from the bottom edge.
    fn flip(y: f32) -> Mm {
        Mm(PAGE_H - y)
    }

    fn point(x: f32, y: f32) -> (Point, bool) {
        (Point::new(Mm(x), Self::flip(y)), false)
    }

    fn rect_points(x: f32, y: f32, w: f32, h: f32) -> Vec<(Point, bool)> {
        vec![
            Self::point(x, y),
            Self::point(x + w, y),
            Self::point(x + w, y + h),
            Self::point(x, y + h),
        ]
    }

    pub fn to_bytes(self) -> Result<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ShiftTapError::Pdf(format!("{e:?}")))?;
        buf.into_inner().map_err(|e| ShiftTapError::Pdf(e.to_string()))
    }
}

impl Surface for PdfSurface {
    fn page_width(&self) -> f32 {
        PAGE_W
    }

    fn page_height(&self) -> f32 {
        PAGE_H
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer");
        self.current_page = page;
        self.current_layer = layer;
        self.pages += 1;
    }

    fn set_font(&mut self, weight: FontWeight, size: f32) {
        self.weight = weight;
        self.size = size;
    }

    fn text_width(&self, s: &str) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(glyph_width(c, self.weight))).sum();
        units as f32 / 1000.0 * self.size * MM_PER_PT
    }

    fn text(&mut self, s: &str, x: f32, y: f32) {
        if s.is_empty() {
            return;
        }
        let font = match self.weight {
            FontWeight::Normal => &self.font,
            FontWeight::Bold => &self.font_bold,
        };
        let layer = self.layer();
        layer.set_fill_color(color(Rgb(0, 0, 0)));
        layer.use_text(s, self.size, Mm(x), Self::flip(y), font);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, c: Rgb) {
        let layer = self.layer();
        layer.set_fill_color(color(c));
        layer.add_polygon(Polygon {
            rings: vec![Self::rect_points(x, y, w, h)],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, c: Rgb, thickness: f32) {
        let layer = self.layer();
        layer.set_outline_color(color(c));
        layer.set_outline_thickness(thickness);
        layer.add_line(Line {
            points: Self::rect_points(x, y, w, h),
            is_closed: true,
        });
    }

    fn hline(&mut self, x1: f32, x2: f32, y: f32, c: Rgb, thickness: f32) {
        let layer = self.layer();
        layer.set_outline_color(color(c));
        layer.set_outline_thickness(thickness);
        layer.add_line(Line {
            points: vec![Self::point(x1, y), Self::point(x2, y)],
            is_closed: false,
        });
    }
}

/// Render a timesheet to PDF bytes.
pub fn render_timesheet(sheet: &Timesheet) -> Result<Vec<u8>> {
    let mut pdf = PdfSurface::new(&document_title(sheet))?;
    compose(&mut pdf, sheet);
    info!(pages = pdf.page_count(), rows = sheet.rows.len(), "rendered timesheet");
    pdf.to_bytes()
}

//! A minimal PDF 1.4 writer for the expense report.
//!
//! Pages are A4, text uses the standard Helvetica fonts with WinAnsi
//! encoding, so nothing needs embedding. The table header repeats on every
//! page and each page carries a "Page i of n" footer.

use std::ops::Range;

use super::ExpenseReport;

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN_X: f32 = 40.0;

// Distances below are measured from the top edge of the page.
const TITLE_TOP: f32 = 57.0;
const SUMMARY_TOP: f32 = 113.0;
const SUMMARY_SPACING: f32 = 28.0;
const FIRST_TABLE_TOP: f32 = 198.0;
const NEXT_TABLE_TOP: f32 = 40.0;
const TABLE_BOTTOM: f32 = PAGE_HEIGHT - 60.0;
const FOOTER_TOP: f32 = PAGE_HEIGHT - 28.0;

const HEADER_HEIGHT: f32 = 22.0;
const ROW_HEIGHT: f32 = 20.0;
const COLUMN_WIDTHS: [f32; 3] = [50.0, 305.0, PAGE_WIDTH - 2.0 * MARGIN_X - 355.0];
const CELL_PADDING: f32 = 6.0;

const HEADER_FILL: (f32, f32, f32) = (0.204, 0.286, 0.369);
const STRIPE_FILL: (f32, f32, f32) = (0.961, 0.961, 0.961);

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "/F1",
            Font::Bold => "/F2",
        }
    }
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

pub fn render(report: &ExpenseReport) -> Vec<u8> {
    let pages = paginate(report.rows.len());
    let page_count = pages.len();

    let contents: Vec<Vec<u8>> = pages
        .into_iter()
        .enumerate()
        .map(|(page, rows)| page_content(report, page, page_count, rows))
        .collect();

    write_document(&contents)
}

fn rows_fitting(table_top: f32) -> usize {
    ((TABLE_BOTTOM - table_top - HEADER_HEIGHT) / ROW_HEIGHT).floor() as usize
}

/// Split `row_count` rows into per-page ranges. There is always at least one
/// page, even for an empty table.
fn paginate(row_count: usize) -> Vec<Range<usize>> {
    let first = rows_fitting(FIRST_TABLE_TOP);
    let next = rows_fitting(NEXT_TABLE_TOP);

    let mut pages = vec![0..row_count.min(first)];
    let mut start = pages[0].end;
    while start < row_count {
        let end = (start + next).min(row_count);
        pages.push(start..end);
        start = end;
    }
    pages
}

fn page_content(report: &ExpenseReport, page: usize, page_count: usize, rows: Range<usize>) -> Vec<u8> {
    let mut canvas = Canvas::default();

    let table_top = if page == 0 {
        canvas.text(&report.title, PAGE_WIDTH / 2.0, TITLE_TOP, 20.0, Font::Bold, Align::Center);
        for (i, line) in report.summary.iter().enumerate() {
            let top = SUMMARY_TOP + i as f32 * SUMMARY_SPACING;
            canvas.text(line, MARGIN_X, top, 12.0, Font::Regular, Align::Left);
        }
        FIRST_TABLE_TOP
    } else {
        NEXT_TABLE_TOP
    };

    let table_width: f32 = COLUMN_WIDTHS.iter().sum();
    canvas.fill_rect(MARGIN_X, table_top, table_width, HEADER_HEIGHT, HEADER_FILL);
    canvas.set_color((1.0, 1.0, 1.0));
    canvas.row(&report.columns, table_top, HEADER_HEIGHT, Font::Bold);
    canvas.set_color((0.0, 0.0, 0.0));

    let mut top = table_top + HEADER_HEIGHT;
    for index in rows {
        if index % 2 == 1 {
            canvas.fill_rect(MARGIN_X, top, table_width, ROW_HEIGHT, STRIPE_FILL);
            canvas.set_color((0.0, 0.0, 0.0));
        }
        canvas.row(&report.rows[index], top, ROW_HEIGHT, Font::Regular);
        top += ROW_HEIGHT;
    }

    let footer = format!("Page {} of {}", page + 1, page_count);
    canvas.text(&footer, PAGE_WIDTH / 2.0, FOOTER_TOP, 10.0, Font::Regular, Align::Center);

    canvas.ops
}

/// Accumulates content stream operators for one page.
#[derive(Default)]
struct Canvas {
    ops: Vec<u8>,
}

impl Canvas {
    fn push(&mut self, op: &str) {
        self.ops.extend_from_slice(op.as_bytes());
        self.ops.push(b'\n');
    }

    fn set_color(&mut self, (r, g, b): (f32, f32, f32)) {
        self.push(&format!("{:.3} {:.3} {:.3} rg", r, g, b));
    }

    fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: (f32, f32, f32)) {
        self.set_color(color);
        let y = PAGE_HEIGHT - top - height;
        self.push(&format!("{:.2} {:.2} {:.2} {:.2} re f", x, y, width, height));
    }

    fn text(&mut self, text: &str, x: f32, top: f32, size: f32, font: Font, align: Align) {
        let width = approx_text_width(text, size);
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        let y = PAGE_HEIGHT - top;

        self.push(&format!("BT {} {:.1} Tf {:.2} {:.2} Td", font.resource(), size, x, y));
        self.ops.push(b'(');
        self.ops.extend(encode_text(text));
        self.ops.extend_from_slice(b") Tj ET\n");
    }

    /// One table row; the amount column is right aligned.
    fn row(&mut self, cells: &[String; 3], top: f32, height: f32, font: Font) {
        let size = 10.0;
        let baseline = top + height / 2.0 + size * 0.35;
        let mut left = MARGIN_X;
        for (i, (cell, width)) in cells.iter().zip(COLUMN_WIDTHS).enumerate() {
            if i == 2 {
                let right = left + width - CELL_PADDING;
                self.text(cell, right, baseline, size, font, Align::Right);
            } else {
                self.text(cell, left + CELL_PADDING, baseline, size, font, Align::Left);
            }
            left += width;
        }
    }
}

/// Rough Helvetica advance width; good enough for centring and right
/// alignment without font metrics.
fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.52
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' => Some(ch as u8),
        '€' => Some(0x80),
        '\u{a0}'..='\u{ff}' => Some(ch as u32 as u8),
        _ => None,
    }
}

/// Whether every character of `text` has a glyph in the report fonts.
pub fn can_encode(text: &str) -> bool {
    text.chars().all(|ch| win_ansi_byte(ch).is_some())
}

/// Encode `text` as the body of a PDF literal string. Characters without a
/// WinAnsi code become `?`.
fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match win_ansi_byte(ch) {
            Some(b @ (b'(' | b')' | b'\\')) => {
                out.push(b'\\');
                out.push(b);
            }
            Some(b) if b.is_ascii() => out.push(b),
            Some(b) => out.extend_from_slice(format!("\\{:03o}", b).as_bytes()),
            None => out.push(b'?'),
        }
    }
    out
}

/// Object layout: 1 catalog, 2 page tree, 3-4 fonts, then a page object and
/// its content stream for each page.
fn write_document(contents: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::new();

    let kids = (0..contents.len())
        .map(|i| format!("{} 0 R", 5 + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    push_object(&mut out, &mut offsets, b"<< /Type /Catalog /Pages 2 0 R >>");
    push_object(
        &mut out,
        &mut offsets,
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, contents.len()).as_bytes(),
    );
    for base_font in ["Helvetica", "Helvetica-Bold"] {
        push_object(
            &mut out,
            &mut offsets,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                base_font
            )
            .as_bytes(),
        );
    }

    for (i, content) in contents.iter().enumerate() {
        let page = format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            6 + 2 * i
        );
        push_object(&mut out, &mut offsets, page.as_bytes());

        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content);
        stream.extend_from_slice(b"\nendstream");
        push_object(&mut out, &mut offsets, &stream);
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1).as_bytes());
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

fn push_object(out: &mut Vec<u8>, offsets: &mut Vec<usize>, body: &[u8]) {
    offsets.push(out.len());
    out.extend_from_slice(format!("{} 0 obj\n", offsets.len()).as_bytes());
    out.extend_from_slice(body);
    out.extend_from_slice(b"\nendobj\n");
}

use crate::export::model::ExportTable;
use crate::utils::formatting::truncate;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_RATIO: f32 = 0.55;

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    /// A4 portrait, Helvetica with WinAnsi encoding.
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 595.0,
            page_h: 842.0,
            margin: 40.0,
            row_h: 22.0,

            next_id: 5,
            font_id,
            bold_font_id,

            font_size: 10.0,
            header_font_size: 10.0,
            title_font_size: 16.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(FONT_REGULAR, self.font_id);
        fonts.pair(FONT_BOLD, self.bold_font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * GLYPH_RATIO
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, bold: bool, text: &str) {
        let font = if bold { FONT_BOLD } else { FONT_REGULAR };
        let bytes = win_ansi(text);
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn fill_row(&self, content: &mut Content, y: f32, width: f32, rgb: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        font_size: f32,
        bold: bool,
    ) {
        let mut x = self.margin;

        for (i, w) in col_widths.iter().enumerate() {
            let text = row.get(i).map(String::as_str).unwrap_or("");
            let max_chars = ((w - 8.0) / (font_size * GLYPH_RATIO)).max(1.0) as usize;
            let fitted = truncate(text, max_chars);
            self.draw_text(content, x + 4.0, y + 7.0, font_size, bold, &fitted);
            self.draw_cell_borders(content, x, y, *w, self.row_h);
            x += w;
        }
    }

    /// Widths from header and content, scaled down to the printable width.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| self.text_width(h, self.header_font_size) + 10.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = w.max(self.text_width(cell, self.font_size) + 10.0);
                }
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    /// Title and subtitle lines on the first page; returns the y where the
    /// table starts.
    fn draw_title_block(&self, content: &mut Content, table: &ExportTable) -> f32 {
        let mut y = self.page_h - self.margin - self.title_font_size;
        let title_x = (self.page_w - self.text_width(&table.title, self.title_font_size)) / 2.0;
        self.draw_text(content, title_x.max(self.margin), y, self.title_font_size, true, &table.title);

        y -= 10.0;
        for line in &table.subtitle {
            y -= self.font_size + 6.0;
            self.draw_text(content, self.margin, y, self.font_size + 1.0, false, line);
        }

        y - 20.0 - self.row_h
    }

    fn draw_page_number(&self, content: &mut Content, page: usize) {
        let pg = format!("Page {page}");
        self.draw_text(
            content,
            self.page_w - self.margin - 50.0,
            self.margin - 25.0,
            self.font_size - 1.0,
            false,
            &pg,
        );
    }

    fn draw_header_row(&self, content: &mut Content, y: f32, col_widths: &[f32], headers: &[String]) {
        self.fill_row(content, y, col_widths.iter().sum(), (0.184, 0.329, 0.588));
        content.save_state();
        content.set_fill_rgb(1.0, 1.0, 1.0);
        self.draw_row(content, y, col_widths, headers, self.header_font_size, true);
        content.restore_state();
    }

    /// Multipage table: title block on page one, header row repeated on
    /// every page, zebra stripes, bold shaded total row.
    pub fn write_table(&mut self, table: &ExportTable) {
        let all_rows = table.all_rows();
        let col_widths = self.compute_col_widths(&table.headers, &all_rows);
        let header_row: Vec<String> = table
            .headers
            .iter()
            .map(|s| s.replace('_', " ").to_uppercase())
            .collect();
        let width: f32 = col_widths.iter().sum();
        let total_index = table.total.as_ref().map(|_| all_rows.len() - 1);

        let mut remaining: &[Vec<String>] = &all_rows;
        let mut consumed_before = 0;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_number(&mut content, page_idx);

            let mut y = if page_idx == 1 {
                self.draw_title_block(&mut content, table)
            } else {
                self.page_h - self.margin - self.row_h
            };

            self.draw_header_row(&mut content, y, &col_widths, &header_row);
            y -= self.row_h;

            let mut consumed = 0;

            for (i, row) in remaining.iter().enumerate() {
                if y < self.margin {
                    break;
                }

                let is_total = total_index == Some(consumed_before + i);

                if is_total {
                    self.fill_row(&mut content, y, width, (0.94, 0.94, 0.94));
                } else if (consumed_before + i) % 2 == 1 {
                    self.fill_row(&mut content, y, width, (0.96, 0.96, 0.96));
                }

                self.draw_row(&mut content, y, &col_widths, row, self.font_size, is_total);

                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            consumed_before += consumed;
            page_idx += 1;

            if remaining.is_empty() || consumed == 0 {
                break;
            }
        }
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();
        self.pdf.finish()
    }

    pub fn save(self, path: &Path) -> std::io::Result<()> {
        let bytes = self.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Latin-1 subset of WinAnsi plus the ellipsis; anything else prints as `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            0x2026 => 0x85,
            _ => b'?',
        })
        .collect()
}

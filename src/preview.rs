//! Plain-text receipt layout
//!
//! Lays a document out in monospace columns the way it appears on the
//! thermal roll: 32 characters for 58 mm paper, 48 for 80 mm.

use chrono::NaiveDate;

use crate::document::ReceiptDocument;
use crate::format::format_idr;

pub const DEFAULT_STORE_NAME: &str = "NAMA TOKO";
pub const LOGO_MARKER: &str = "[LOGO]";

/// Line-oriented text builder with a fixed column width
pub struct ReceiptTextBuilder {
    lines: Vec<String>,
    width: usize,
}

impl ReceiptTextBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            lines: Vec::new(),
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Left-aligned text, wrapped at the column width
    pub fn line(&mut self, s: &str) -> &mut Self {
        for chunk in wrap(s, self.width) {
            self.lines.push(chunk);
        }
        self
    }

    /// Centered text, wrapped at the column width
    pub fn center(&mut self, s: &str) -> &mut Self {
        for chunk in wrap(s, self.width) {
            let pad = (self.width - chunk.chars().count()) / 2;
            self.lines.push(format!("{}{}", " ".repeat(pad), chunk));
        }
        self
    }

    /// Left and right text on one line, gap filled with spaces
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = left.chars().count();
        let rw = right.chars().count();
        if lw + rw >= self.width {
            self.lines.push(format!("{left} {right}"));
        } else {
            let spaces = self.width - lw - rw;
            self.lines.push(format!("{left}{}{right}", " ".repeat(spaces)));
        }
        self
    }

    pub fn dash_sep(&mut self) -> &mut Self {
        self.lines.push("-".repeat(self.width));
        self
    }

    pub fn dot_sep(&mut self) -> &mut Self {
        self.lines.push(".".repeat(self.width));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn build(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

fn wrap(s: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in s.lines() {
        let chars: Vec<char> = raw_line.trim_end().chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            out.push(chunk.iter().collect());
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Render `doc` for its paper width. `today` stands in for an unset date.
pub fn render_text(doc: &ReceiptDocument, today: NaiveDate) -> String {
    let mut b = ReceiptTextBuilder::new(doc.paper_width.columns());

    if doc.logo_data_url.is_some() {
        b.center(LOGO_MARKER);
    }
    if doc.store_name.is_empty() {
        b.center(DEFAULT_STORE_NAME);
    } else {
        b.center(&doc.store_name);
    }
    if doc.cashier_enabled {
        let cashier = doc.cashier_name.trim();
        let cashier = if cashier.is_empty() { "-" } else { cashier };
        b.center(&format!("Kasir: {cashier}"));
    }
    b.center(&doc.display_date(today));

    if !doc.note.trim().is_empty() {
        b.blank();
        b.center(&doc.note);
    }

    b.dash_sep();
    for item in doc.items.items() {
        b.line(&item.name);
        b.line_lr(
            &format!("{} x {}", item.qty, format_idr(item.price)),
            &format_idr(item.subtotal()),
        );
    }
    b.dash_sep();
    b.line_lr("Total", &format_idr(doc.total()));
    b.dot_sep();

    if !doc.footer_line1.trim().is_empty() {
        b.center(&doc.footer_line1);
    }
    if !doc.footer_line2.trim().is_empty() {
        b.center(&doc.footer_line2);
    }

    b.build()
}

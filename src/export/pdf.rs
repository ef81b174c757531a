// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! PDF export of the printable report

use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::report::page_lines;
use crate::history::HistoryRecord;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 6.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;

/// Body lines that fit below the title on one A4 page
const LINES_PER_PAGE: usize = 40;

/// Built-in PDF fonts only cover a Latin code page
fn printable(line: &str) -> String {
    line.replace('→', "->")
        .replace('✓', "OK")
        .replace('✗', "X")
        .chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

/// Split each record's report page into PDF pages.
///
/// Every record starts a new page; records too long for one page continue
/// on the next, repeating the title.
pub fn layout<'a>(records: impl IntoIterator<Item = &'a HistoryRecord>) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    for (i, record) in records.into_iter().enumerate() {
        let mut lines = page_lines(i + 1, record).into_iter().map(|l| printable(&l));
        let title = lines.next().unwrap_or_default();
        let body: Vec<String> = lines.collect();
        for chunk in body.chunks(LINES_PER_PAGE) {
            let mut page = Vec::with_capacity(chunk.len() + 1);
            page.push(title.clone());
            page.extend(chunk.iter().cloned());
            pages.push(page);
        }
    }
    pages
}

fn draw_page(layer: &PdfLayerReference, lines: &[String], title_font: &IndirectFontRef, body_font: &IndirectFontRef) {
    let mut y = PAGE_HEIGHT - MARGIN;
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            layer.use_text(line.as_str(), TITLE_SIZE, Mm(MARGIN), Mm(y), title_font);
            y -= LINE_HEIGHT * 2.0;
        } else {
            layer.use_text(line.as_str(), BODY_SIZE, Mm(MARGIN), Mm(y), body_font);
            y -= LINE_HEIGHT;
        }
    }
}

/// Render records as an A4 PDF document
pub fn render<'a>(records: impl IntoIterator<Item = &'a HistoryRecord>) -> Result<Vec<u8>> {
    let pages = layout(records);
    let (doc, first_page, first_layer) =
        PdfDocument::new("Hincas validation report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
    let title_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow!("Failed to load PDF font: {}", e))?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| anyhow!("Failed to load PDF font: {}", e))?;

    for (i, lines) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
            doc.get_page(page).get_layer(layer)
        };
        draw_page(&layer, lines, &title_font, &body_font);
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow!("Failed to render PDF: {}", e))
}

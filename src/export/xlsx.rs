// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{entry_to_row, get_headers};
use crate::export::{EntryExport, notify_export_success};
use crate::models::status::StatusKind;
use crate::ui::messages::info;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet,
};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const HEADER_BG: u32 = 0x2F75B5;
const BAND_BG: [u32; 2] = [0xEAF3FB, 0xFFFFFF];

/// Cell formats of one row band.
struct BandFormats {
    text: Format,
    number: Format,
    date: Format,
    time: Format,
}

impl BandFormats {
    fn new(bg: u32) -> Self {
        let base = Format::new()
            .set_background_color(Color::RGB(bg))
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);
        Self {
            text: base.clone(),
            number: base.clone().set_align(FormatAlign::Right),
            date: base.clone().set_num_format("yyyy-mm-dd"),
            time: base.set_num_format("hh:mm"),
        }
    }
}

/// Export XLSX: one sheet with every entry, one with status counts per student.
pub(crate) fn export_xlsx(entries: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(HEADER_BG))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    let bands = BAND_BG.map(BandFormats::new);

    let mut workbook = Workbook::new();

    let rows: Vec<Vec<String>> = entries.iter().map(entry_to_row).collect();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Entries").map_err(to_io_app_error)?;
    write_table(sheet, &get_headers(), &rows, &header_format, &bands)?;

    let mut summary_headers = vec!["group", "student_id", "last_name", "first_name"];
    summary_headers.extend(StatusKind::ALL.iter().map(|k| k.label()));
    summary_headers.push("late");

    let summary = workbook.add_worksheet();
    summary.set_name("Summary").map_err(to_io_app_error)?;
    write_table(
        summary,
        &summary_headers,
        &summary_rows(entries),
        &header_format,
        &bands,
    )?;

    workbook.save(path_str(path)?).map_err(to_io_app_error)?;

    notify_export_success("XLSX", entries.len(), path);
    Ok(())
}

/// Header row, banded data rows, frozen header and fitted column widths.
fn write_table(
    sheet: &mut Worksheet,
    headers: &[&str],
    rows: &[Vec<String>],
    header_format: &Format,
    bands: &[BandFormats; 2],
) -> AppResult<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, *header, header_format)
            .map_err(to_io_app_error)?;
    }
    sheet.set_freeze_panes(1, 0).map_err(to_io_app_error)?;

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();

    for (i, values) in rows.iter().enumerate() {
        let band = &bands[i % 2];
        for (col, value) in values.iter().enumerate() {
            write_cell(sheet, (i + 1) as u32, col as u16, value, band)?;
            if let Some(w) = widths.get_mut(col) {
                *w = (*w).max(value.width());
            }
        }
    }

    for (col, w) in widths.iter().enumerate() {
        sheet
            .set_column_width(col as u16, *w as f64 + 2.0)
            .map_err(to_io_app_error)?;
    }
    Ok(())
}

/// Write one cell, as a date, time or number when the text parses as one.
fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    band: &BandFormats,
) -> AppResult<()> {
    let written = if let Some((num_format, serial)) = parse_to_excel_date(s) {
        let fmt = if num_format == "hh:mm" {
            &band.time
        } else {
            &band.date
        };
        sheet.write_with_format(row, col, serial, fmt)
    } else if let Ok(num) = s.parse::<f64>() {
        sheet.write_with_format(row, col, num, &band.number)
    } else {
        sheet.write_with_format(row, col, s, &band.text)
    };
    written.map_err(to_io_app_error)?;
    Ok(())
}

/// Status counts per student, in group then name order.
fn summary_rows(entries: &[EntryExport]) -> Vec<Vec<String>> {
    type Key = (String, String, String, i64);
    let mut counts: BTreeMap<Key, ([usize; 4], usize)> = BTreeMap::new();

    for e in entries {
        let key = (
            e.group.clone(),
            e.last_name.clone(),
            e.first_name.clone(),
            e.student_id,
        );
        let slot = counts.entry(key).or_default();
        if let Some(i) = StatusKind::ALL
            .iter()
            .position(|k| k.label().eq_ignore_ascii_case(&e.status))
        {
            slot.0[i] += 1;
        }
        if e.late_minutes > 0 {
            slot.1 += 1;
        }
    }

    counts
        .into_iter()
        .map(|((group, last, first, id), (by_status, late))| {
            let mut row = vec![group, id.to_string(), last, first];
            row.extend(by_status.iter().map(usize::to_string));
            row.push(late.to_string());
            row
        })
        .collect()
}

fn to_io_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::from(io::Error::other(e.to_string()))
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::from(io::Error::other("invalid path")))
}

//! Spreadsheet loading. Thin calamine wrapper that turns the configured
//! sheet into header labels plus one `Row` map per data row.

use calamine::{open_workbook_auto, Data, Reader};
use dashboard_core::{CellValue, DashboardError, Row};
use std::path::Path;

#[derive(Debug)]
pub struct SheetData {
    /// Non-empty header labels in sheet order.
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

pub fn load_sheet(path: &Path, sheet_name: &str) -> Result<SheetData, DashboardError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| DashboardError::Workbook(e.to_string()))?;
    let available = workbook.sheet_names().to_vec();

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|_| DashboardError::SheetNotFound {
            name: sheet_name.to_string(),
            available,
        })?;

    let mut iter = range.rows();
    // First row is the header row; blank cells mark merged/spacer columns
    // whose values are discarded.
    let header_cells: Vec<Option<String>> = match iter.next() {
        Some(cells) => cells
            .iter()
            .map(|c| match c {
                Data::Empty => None,
                other => Some(other.to_string()),
            })
            .collect(),
        None => Vec::new(),
    };
    let headers: Vec<String> = header_cells.iter().flatten().cloned().collect();

    let rows = iter
        .map(|cells| {
            let mut row = Row::new();
            for (header, cell) in header_cells.iter().zip(cells) {
                let (Some(header), Some(value)) = (header, convert(cell)) else {
                    continue;
                };
                row.insert(header.clone(), value);
            }
            row
        })
        .collect();

    Ok(SheetData { headers, rows })
}

fn convert(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Int(v) => Some(CellValue::Number(*v as f64)),
        Data::Float(v) => Some(CellValue::Number(*v)),
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Bool(b) => Some(CellValue::Text(b.to_string())),
        Data::DateTime(dt) => Some(match dt.as_datetime() {
            Some(naive) => CellValue::Text(naive.to_string()),
            None => CellValue::Number(dt.as_f64()),
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(_) | Data::Empty => None,
    }
}

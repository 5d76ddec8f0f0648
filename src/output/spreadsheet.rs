use crate::error::{Result, ScraperError};
use crate::types::{EquipmentRecord, Field};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use umya_spreadsheet::{reader, writer, Worksheet};

fn spreadsheet_err(e: impl std::fmt::Display) -> ScraperError {
    ScraperError::Spreadsheet(e.to_string())
}

/// Write a fresh workbook: header row, then one row per record. Values are
/// stored verbatim as strings, `=IMAGE(...)` cells included.
pub fn write_xlsx(
    schema: &[Field],
    records: &[EquipmentRecord],
    path: &Path,
    sheet_name: &str,
) -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| spreadsheet_err("new workbook has no sheet"))?;
    sheet.set_name(sheet_name);

    for (col, field) in schema.iter().enumerate() {
        sheet
            .get_cell_mut((col as u32 + 1, 1))
            .set_value_string(field.header());
    }
    let columns: Vec<(Field, u32)> = schema
        .iter()
        .enumerate()
        .map(|(i, f)| (*f, i as u32 + 1))
        .collect();
    write_rows(sheet, &columns, records, 0);

    writer::xlsx::write(&book, path).map_err(spreadsheet_err)?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Fill an existing template's first sheet from row 2 down, leaving headers,
/// formatting and macros alone. Columns are matched on row-1 header text;
/// a field without a matching header falls back to its schema position, or
/// to the first free column after the headers when a matched field holds it.
pub fn write_xlsx_from_template(
    template: &Path,
    schema: &[Field],
    records: &[EquipmentRecord],
    out: &Path,
) -> Result<()> {
    if !template.exists() {
        return Err(ScraperError::Config(format!(
            "Template not found: {}",
            template.display()
        )));
    }
    let mut book = reader::xlsx::read(template).map_err(spreadsheet_err)?;
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| spreadsheet_err("template has no sheets"))?;

    let columns = template_columns(sheet, schema);
    let stale_rows = sheet.get_highest_row().saturating_sub(1) as usize;
    write_rows(sheet, &columns, records, stale_rows);

    writer::xlsx::write(&book, out).map_err(spreadsheet_err)?;
    info!(
        "Wrote {} rows into template {} -> {}",
        records.len(),
        template.display(),
        out.display()
    );
    Ok(())
}

fn template_columns(sheet: &Worksheet, schema: &[Field]) -> Vec<(Field, u32)> {
    let width = sheet.get_highest_column().max(1);
    let headers: Vec<String> = (1..=width)
        .map(|col| sheet.get_value((col, 1)).trim().to_string())
        .collect();

    let matched: Vec<Option<u32>> = schema
        .iter()
        .map(|field| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(field.header()))
                .map(|i| i as u32 + 1)
        })
        .collect();
    let mut taken: Vec<u32> = matched.iter().flatten().copied().collect();
    let mut next_free = headers
        .iter()
        .rposition(|h| !h.is_empty())
        .map(|i| i as u32 + 2)
        .unwrap_or(1);

    // Unmatched fields keep their schema position unless a matched field owns it
    schema
        .iter()
        .zip(matched)
        .enumerate()
        .map(|(i, (field, found))| {
            let col = match found {
                Some(col) => col,
                None => {
                    let mut col = i as u32 + 1;
                    if taken.contains(&col) {
                        while taken.contains(&next_free) {
                            next_free += 1;
                        }
                        col = next_free;
                    }
                    debug!("Template has no '{}' header, using column {}", field.header(), col);
                    taken.push(col);
                    col
                }
            };
            (*field, col)
        })
        .collect()
}

/// Where a template-filled workbook should be written. A macro-enabled
/// template keeps its `.xlsm` extension so the result still opens with macros.
pub fn template_output_path(template: &Path, requested: &Path) -> PathBuf {
    let is_macro = |p: &Path| {
        p.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xlsm"))
    };
    if is_macro(template) && !is_macro(requested) {
        let adjusted = requested.with_extension("xlsm");
        warn!(
            "Template {} has macros; writing {} instead of {}",
            template.display(),
            adjusted.display(),
            requested.display()
        );
        adjusted
    } else {
        requested.to_path_buf()
    }
}

/// Rows are written from row 2; `clear_through` previous data rows are blanked
/// where they extend past the new records.
fn write_rows(
    sheet: &mut Worksheet,
    columns: &[(Field, u32)],
    records: &[EquipmentRecord],
    clear_through: usize,
) {
    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 2;
        for (field, col) in columns {
            sheet.get_cell_mut((*col, row)).set_value_string(record.get(*field));
        }
    }
    for i in records.len()..clear_through {
        let row = i as u32 + 2;
        for (_, col) in columns {
            sheet.get_cell_mut((*col, row)).set_value_string("");
        }
    }
}

/// Header + rows as CSV.
pub fn write_csv<W: Write>(schema: &[Field], records: &[EquipmentRecord], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(schema.iter().map(|f| f.header()))?;
    for record in records {
        wtr.write_record(record.row(schema))?;
    }
    wtr.flush()?;
    Ok(())
}

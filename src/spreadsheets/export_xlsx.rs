// src/spreadsheets/export_xlsx.rs
//
// One worksheet per export: header row from the resource's table
// columns, one row per entity of the full unpaged listing.
use crate::admin::resources::ResourceSpec;
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx_response;
use rust_xlsxwriter::Workbook;
use serde_json::Value;

pub fn export_resource_xlsx(spec: &ResourceSpec, rows: &[Value]) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let columns: Vec<_> = spec.fields.iter().filter(|f| f.in_table).collect();

    for (col, field) in columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, field.label)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", field.label, e))
            })?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        for (col, field) in columns.iter().enumerate() {
            let c = col as u16;
            let cell = row.get(field.name);

            let result = match cell {
                Some(Value::Number(n)) => {
                    worksheet.write_number(r, c, n.as_f64().unwrap_or(0.0))
                }
                Some(Value::String(s)) => worksheet.write_string(r, c, s),
                Some(Value::Bool(b)) => {
                    worksheet.write_string(r, c, if *b { "Yes" } else { "No" })
                }
                _ => worksheet.write_string(r, c, ""),
            };

            result.map_err(|e| {
                ServerError::XlsxError(format!("Failed to write {}: {}", field.name, e))
            })?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))?;

    xlsx_response(buffer, &format!("{}.xlsx", spec.key))
}

use std::io::Cursor;

use async_trait::async_trait;
use calamine::Reader;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// Reads `.xlsx` (first worksheet) or `.csv` and renders it as a text table.
pub struct SpreadsheetAdapter;

impl SpreadsheetAdapter {
    fn read_csv(data: &[u8]) -> Result<Vec<Vec<String>>, FileLoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| FileLoaderError::ExtractionFailed(format!("invalid CSV: {e}")))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    fn read_xlsx(data: &[u8]) -> Result<Vec<Vec<String>>, FileLoaderError> {
        let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(data))
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("invalid workbook: {e}")))?;

        let sheet_name = workbook.sheet_names().first().cloned().ok_or_else(|| {
            FileLoaderError::ExtractionFailed("workbook has no worksheets".to_string())
        })?;

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("worksheet {sheet_name}: {e}"))
        })?;

        Ok(range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        calamine::Data::Empty => String::new(),
                        calamine::Data::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect())
    }
}

/// One line per row, each column right-aligned to its widest cell, columns
/// separated by a single space. The first row is the header.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; column_count];
    for row in rows {
        for (column, cell) in row.iter().enumerate() {
            widths[column] = widths[column].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(column, &width)| {
                    let cell = row.get(column).map(String::as_str).unwrap_or_default();
                    format!("{cell:>width$}")
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl FileLoader for SpreadsheetAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename))]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let rows = match document.content_type {
            ContentType::Csv => Self::read_csv(data)?,
            ContentType::Xlsx => Self::read_xlsx(data)?,
            other => {
                return Err(FileLoaderError::UnsupportedContentType(
                    other.as_mime().to_string(),
                ));
            }
        };

        tracing::debug!(rows = rows.len(), "Spreadsheet parsed");
        Ok(render_table(&rows))
    }
}

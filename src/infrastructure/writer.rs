//! Report and export emission

use crate::domain::report::Sheet;
use crate::error::Result;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes rendered outputs into a single directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: PathBuf) -> Self {
        ReportWriter { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a UTF-8 text file, replacing any previous one
    pub fn write_text(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, content)?;
        info!(path = %path.display(), "Wrote text output");
        Ok(path)
    }

    /// Write `<stem>.xlsx` with one worksheet per sheet, in order.
    ///
    /// Sheet names must already be valid and unique. A workbook without
    /// sheets still gets one empty worksheet.
    pub fn write_workbook(&self, stem: &str, sheets: &[Sheet]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.xlsx", stem));

        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name.as_str())?;

            for (col, title) in (0u16..).zip(&sheet.header) {
                worksheet.write_string_with_format(0, col, *title, &bold)?;
            }
            for (row, cells) in (1u32..).zip(&sheet.rows) {
                for (col, cell) in (0u16..).zip(cells) {
                    worksheet.write_string(row, col, cell.as_str())?;
                }
            }
            worksheet.autofit();
        }
        if sheets.is_empty() {
            workbook.add_worksheet();
        }

        workbook.save(&path)?;
        info!(path = %path.display(), sheets = sheets.len(), "Wrote workbook");
        Ok(path)
    }
}

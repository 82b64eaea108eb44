//! ---
//! ems_section: "08-reporting"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Spreadsheet export of the generated telemetry."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};

use bms_sim::{Channel, Telemetry};
use rust_xlsxwriter::{Format, FormatBorder, Workbook};
use tracing::info;

use crate::errors::ExportError;

pub const DATA_FILE: &str = "bms_data.xlsx";
pub const TIME_COLUMN: &str = "Time (s)";
pub const SHEET_NAME: &str = "Sheet1";

const TIME_WIDTH: f64 = 10.0;
const VALUE_WIDTH: f64 = 18.0;

/// Header row, time column first and then one column per channel in dashboard order.
pub fn column_headers() -> Vec<&'static str> {
    std::iter::once(TIME_COLUMN)
        .chain(Channel::all().map(|channel| channel.descriptor().column))
        .collect()
}

/// Writes [`Telemetry`] as a single-sheet workbook, one row per sample.
#[derive(Debug, Default, Clone)]
pub struct DataExporter;

impl DataExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, telemetry: &Telemetry, output_dir: &Path) -> Result<PathBuf, ExportError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold().set_border(FormatBorder::Thin);

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        for (col, title) in column_headers().into_iter().enumerate() {
            let col = col as u16;
            sheet.write_string_with_format(0, col, title, &header)?;
            sheet.set_column_width(col, if col == 0 { TIME_WIDTH } else { VALUE_WIDTH })?;
        }
        sheet.set_freeze_panes(1, 0)?;

        for (row, &second) in telemetry.time().seconds().iter().enumerate() {
            sheet.write_number(row as u32 + 1, 0, f64::from(second))?;
        }
        for (channel, values) in telemetry.channels() {
            let col = channel.index() as u16 + 1;
            for (row, &value) in values.iter().enumerate() {
                sheet.write_number(row as u32 + 1, col, value)?;
            }
        }

        let path = output_dir.join(DATA_FILE);
        workbook.save(&path).map_err(|source| ExportError::Save {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), rows = telemetry.len(), "telemetry exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_follow_dashboard_order() {
        assert_eq!(
            column_headers(),
            vec![
                "Time (s)",
                "SOC (%)",
                "SOH (%)",
                "Voltage (V)",
                "Temperature (°C)",
                "Power (W)",
                "Protection",
            ]
        );
    }

    #[test]
    fn missing_directory_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let telemetry = bms_sim::SignalGenerator::seeded(3)
            .generate(&bms_sim::TimeDomain::with_len(5))
            .unwrap();
        let err = DataExporter::new()
            .export(&telemetry, &dir.path().join("absent"))
            .unwrap_err();
        assert!(matches!(err, ExportError::Save { .. }));
    }
}

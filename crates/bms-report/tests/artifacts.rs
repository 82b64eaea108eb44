//! ---
//! ems_section: "08-reporting"
//! ems_subsection: "integration-tests"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Reads rendered and exported artifacts back from disk."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::fs::File;

use anyhow::Result;
use bms_report::{
    column_headers, DashboardRenderer, DataExporter, DASHBOARD_FILE, DATA_FILE, SHEET_NAME,
};
use bms_sim::{Channel, SignalGenerator, Telemetry, TimeDomain, SAMPLE_COUNT};
use calamine::{open_workbook, Data, Reader, Xlsx};

fn telemetry() -> Telemetry {
    SignalGenerator::seeded(42)
        .generate(&TimeDomain::one_hour())
        .expect("telemetry")
}

#[test]
fn spreadsheet_holds_one_row_per_second() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let telemetry = telemetry();
    let path = DataExporter::new().export(&telemetry, dir.path())?;
    assert_eq!(path, dir.path().join(DATA_FILE));

    let mut workbook: Xlsx<_> = open_workbook(&path)?;
    let range = workbook.worksheet_range(SHEET_NAME)?;
    assert_eq!(range.height(), SAMPLE_COUNT + 1);
    assert_eq!(range.width(), 7);

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .expect("header row")
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    assert_eq!(header, column_headers());

    let first = rows.next().expect("first sample");
    assert_eq!(first[0], Data::Float(0.0));
    assert_eq!(first[1], Data::Float(100.0));
    assert_eq!(first[6], Data::Float(0.0));

    let last = range.rows().last().expect("last sample");
    assert_eq!(last[0], Data::Float(3599.0));
    assert_eq!(last[1], Data::Float(55.0));
    assert_eq!(last[3], Data::Float(13.0));
    assert_eq!(last[4], Data::Float(29.5));

    let power = telemetry.channel(Channel::Power);
    for (row, expected) in range.rows().skip(1).zip(power) {
        match row[5] {
            Data::Float(value) => assert!((value - expected).abs() < 1e-9),
            ref other => panic!("unexpected power cell {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn dashboard_png_carries_size_and_density() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = DashboardRenderer::default().render(&telemetry(), dir.path())?;
    assert_eq!(path, dir.path().join(DASHBOARD_FILE));
    assert!(std::fs::metadata(&path)?.len() > 0);

    let reader = png::Decoder::new(File::open(&path)?).read_info()?;
    let info = reader.info();
    assert_eq!((info.width, info.height), (4200, 2400));
    let dims = info.pixel_dims.expect("pHYs chunk");
    assert_eq!(dims.unit, png::Unit::Meter);
    assert_eq!((dims.xppu, dims.yppu), (11811, 11811));
    Ok(())
}

#[test]
fn smaller_dashboard_scales_with_dpi() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let renderer = DashboardRenderer::new(50, 14.0, 8.0);
    let path = renderer.render(&telemetry(), dir.path())?;
    let reader = png::Decoder::new(File::open(&path)?).read_info()?;
    assert_eq!((reader.info().width, reader.info().height), (700, 400));
    Ok(())
}

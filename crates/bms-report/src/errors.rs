//! ---
//! ems_section: "08-reporting"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Dashboard rendering, spreadsheet export, and run reporting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("dashboard size {width}x{height} px is empty")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("dashboard size {width}x{height} px exceeds {limit} pixels")]
    CanvasTooLarge { width: u32, height: u32, limit: u64 },
    #[error("chart backend failed: {0}")]
    Backend(String),
    #[error("unable to write dashboard {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("png encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Backend(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet cell write failed: {0}")]
    Cell(#[from] rust_xlsxwriter::XlsxError),
    #[error("unable to save spreadsheet {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no display available")]
    Headless,
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
}

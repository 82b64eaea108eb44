//! ---
//! ems_section: "08-reporting"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Dashboard rendering, spreadsheet export, and run reporting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
//! Output artifacts for a dashboard run: the six-panel PNG, the spreadsheet
//! holding the same samples, and the console report naming both.

pub mod dashboard;
pub mod errors;
pub mod export;
pub mod reporter;
pub mod viewer;

pub use dashboard::{
    dots_per_meter, DashboardRenderer, DASHBOARD_FILE, DASHBOARD_TITLE, MAX_CANVAS_PIXELS,
};
pub use errors::{ExportError, RenderError, ViewerError};
pub use export::{column_headers, DataExporter, DATA_FILE, SHEET_NAME, TIME_COLUMN};
pub use reporter::RunReporter;
pub use viewer::{NoopViewer, SystemViewer, Viewer};

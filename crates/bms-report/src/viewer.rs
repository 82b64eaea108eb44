//! ---
//! ems_section: "08-reporting"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Best-effort interactive display of the rendered dashboard."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::errors::ViewerError;

/// Presents a rendered dashboard to the operator.
///
/// Failures are reported to the caller, which treats them as non-fatal.
pub trait Viewer {
    fn show(&self, image: &Path) -> Result<(), ViewerError>;
}

/// Hands the image to the platform's default opener without waiting for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

#[cfg(target_os = "macos")]
const OPENER: (&str, &[&str]) = ("open", &[]);
#[cfg(target_os = "windows")]
const OPENER: (&str, &[&str]) = ("cmd", &["/C", "start", ""]);
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: (&str, &[&str]) = ("xdg-open", &[]);

impl Viewer for SystemViewer {
    fn show(&self, image: &Path) -> Result<(), ViewerError> {
        if !display_available() {
            return Err(ViewerError::Headless);
        }
        let (program, args) = OPENER;
        Command::new(program)
            .args(args)
            .arg(image)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ViewerError::Launch { program, source })?;
        debug!(program, image = %image.display(), "viewer launched");
        Ok(())
    }
}

/// Skips display entirely (`--no-show`, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopViewer;

impl Viewer for NoopViewer {
    fn show(&self, _image: &Path) -> Result<(), ViewerError> {
        Ok(())
    }
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|value| !value.is_empty()))
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn display_available() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_viewer_always_succeeds() {
        assert!(NoopViewer.show(Path::new("missing.png")).is_ok());
    }

    #[test]
    fn headless_error_message() {
        assert_eq!(ViewerError::Headless.to_string(), "no display available");
    }
}

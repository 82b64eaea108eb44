//! ---
//! ems_section: "08-reporting"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Console summary printed after a completed run."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::io::{self, Stdout, Write};
use std::path::Path;

/// Prints the three completion lines for a run.
#[derive(Debug)]
pub struct RunReporter<W = Stdout> {
    out: W,
}

impl RunReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> RunReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RunReporter<W> {
    pub fn report(&mut self, dashboard: &Path, data: &Path) -> io::Result<()> {
        writeln!(self.out, "✅ Simulation complete!")?;
        writeln!(self.out, "📊 Dashboard saved at: {}", dashboard.display())?;
        writeln!(self.out, "📑 Data saved at: {}", data.display())?;
        self.out.flush()
    }
}

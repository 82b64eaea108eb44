//! ---
//! ems_section: "08-reporting"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Six-panel dashboard rendering with threshold zones."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use bms_sim::{AxisStyle, ChannelDescriptor, Rgb, Telemetry, TimeDomain};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::info;

use crate::errors::RenderError;

pub const DASHBOARD_FILE: &str = "bms_dashboard.png";
pub const DASHBOARD_TITLE: &str = "EV Battery Management System (BMS) Dashboard";

const GRID: (usize, usize) = (3, 2);
const ZONE_ALPHA: f64 = 0.2;
/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;
const METERS_PER_INCH: f64 = 0.0254;
/// Largest canvas allocated for a render, in pixels.
pub const MAX_CANVAS_PIXELS: u64 = 100_000_000;

/// Renders [`Telemetry`] as a 3x2 grid of zoned line charts.
///
/// Sizes are specified in typographic points and scaled by `dpi / 72`, so the
/// layout keeps its proportions at any resolution. The PNG carries a `pHYs`
/// chunk declaring the resolution.
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    dpi: u32,
    width_in: f64,
    height_in: f64,
}

impl Default for DashboardRenderer {
    fn default() -> Self {
        Self::new(300, 14.0, 8.0)
    }
}

impl DashboardRenderer {
    pub fn new(dpi: u32, width_in: f64, height_in: f64) -> Self {
        Self {
            dpi,
            width_in,
            height_in,
        }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round().max(0.0) as u32,
            (self.height_in * dpi).round().max(0.0) as u32,
        )
    }

    /// Draw the dashboard and write it to `<output_dir>/bms_dashboard.png`.
    pub fn render(&self, telemetry: &Telemetry, output_dir: &Path) -> Result<PathBuf, RenderError> {
        let (width, height) = self.pixel_size();
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas { width, height });
        }
        if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
            return Err(RenderError::CanvasTooLarge {
                width,
                height,
                limit: MAX_CANVAS_PIXELS,
            });
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        self.draw(telemetry, &mut buffer, (width, height))?;

        let path = output_dir.join(DASHBOARD_FILE);
        self.write_png(&path, &buffer, (width, height))?;
        info!(path = %path.display(), width, height, dpi = self.dpi, "dashboard written");
        Ok(path)
    }

    fn draw(
        &self,
        telemetry: &Telemetry,
        buffer: &mut [u8],
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
        root.fill(&WHITE)?;

        let body = root.titled(
            DASHBOARD_TITLE,
            FontDesc::new(FontFamily::SansSerif, self.pt(16.0), FontStyle::Bold),
        )?;
        let panels = body.split_evenly(GRID);
        for ((channel, values), panel) in telemetry.channels().zip(panels.iter()) {
            self.draw_panel(panel, channel.descriptor(), telemetry.time(), values)?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_panel(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        descriptor: &ChannelDescriptor,
        time: &TimeDomain,
        values: &[f64],
    ) -> Result<(), RenderError> {
        let (x_lo, x_hi) = padded(0.0, f64::from(time.last()));
        let (y_lo, y_hi) = value_range(descriptor, values);
        let label_font = FontDesc::new(FontFamily::SansSerif, self.pt(10.0), FontStyle::Normal);
        let swatch = self.px(14.0) as i32;
        let half_height = (swatch / 3).max(1);

        let tick_tolerance = (y_hi - y_lo) * 1e-6;
        let categorical = move |value: &f64| -> String {
            match descriptor.axis {
                AxisStyle::Categorical(ticks) => ticks
                    .iter()
                    .find(|(at, _)| (value - at).abs() <= tick_tolerance)
                    .map(|(_, label)| (*label).to_owned())
                    .unwrap_or_default(),
                AxisStyle::Numeric => format!("{value}"),
            }
        };

        let mut chart = ChartBuilder::on(area)
            .caption(
                descriptor.title,
                FontDesc::new(FontFamily::SansSerif, self.pt(12.0), FontStyle::Normal),
            )
            .margin(self.px(6.0))
            .x_label_area_size(self.px(30.0))
            .y_label_area_size(self.px(52.0))
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        let whole_seconds = |x: &f64| format!("{x:.0}");
        {
            let mut mesh = chart.configure_mesh();
            mesh.x_desc("Time (s)")
                .y_desc(descriptor.axis_label)
                .label_style(label_font.clone())
                .axis_desc_style(label_font.clone())
                .bold_line_style(BLACK.mix(0.15))
                .light_line_style(WHITE.mix(0.0))
                .x_label_formatter(&whole_seconds);
            match descriptor.axis {
                AxisStyle::Numeric => {
                    mesh.y_labels(6);
                }
                AxisStyle::Categorical(_) => {
                    mesh.y_labels(5).y_label_formatter(&categorical);
                }
            }
            mesh.draw()?;
        }

        for zone in descriptor.zones {
            let fill = color(zone.severity.color()).mix(ZONE_ALPHA);
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x_lo, zone.lower), (x_hi, zone.upper)],
                    fill.filled(),
                )))?
                .label(zone.legend)
                .legend(move |(x, y)| {
                    Rectangle::new(
                        [(x, y - half_height), (x + swatch, y + half_height)],
                        fill.filled(),
                    )
                });
        }

        let line = color(descriptor.line_color);
        let stroke = self.px(1.5);
        chart
            .draw_series(LineSeries::new(
                time.seconds()
                    .iter()
                    .zip(values)
                    .map(|(&second, &value)| (f64::from(second), value)),
                line.stroke_width(stroke),
            ))?
            .label(descriptor.legend_label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], line.stroke_width(stroke))
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .legend_area_size(swatch + self.px(4.0) as i32)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .label_font(label_font)
            .draw()?;
        Ok(())
    }

    fn write_png(&self, path: &Path, buffer: &[u8], size: (u32, u32)) -> Result<(), RenderError> {
        let file = File::create(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), size.0, size.1);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let density = dots_per_meter(self.dpi);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: density,
            yppu: density,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(buffer)?;
        writer.finish()?;
        Ok(())
    }

    fn pt(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    fn px(&self, points: f64) -> u32 {
        self.pt(points).round().max(1.0) as u32
    }
}

/// PNG `pHYs` density for a DPI value.
pub fn dots_per_meter(dpi: u32) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let margin = (hi - lo) * AXIS_MARGIN;
    (lo - margin, hi + margin)
}

/// Union of the data extent and the zone bands, padded like an autoscaled axis.
fn value_range(descriptor: &ChannelDescriptor, values: &[f64]) -> (f64, f64) {
    let (mut lo, mut hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if let Some((zone_lo, zone_hi)) = descriptor.zone_extent() {
        lo = lo.min(zone_lo);
        hi = hi.max(zone_hi);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return padded(0.0, 1.0);
    }
    if hi - lo < f64::EPSILON {
        lo -= 0.05;
        hi += 0.05;
    }
    padded(lo, hi)
}

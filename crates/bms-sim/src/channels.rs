//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Telemetry channel descriptors and threshold zones."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use strum::{Display, EnumIter, IntoEnumIterator};

/// The six telemetry channels, in dashboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Channel {
    #[strum(serialize = "SOC")]
    Soc,
    #[strum(serialize = "SOH")]
    Soh,
    Voltage,
    Temperature,
    Power,
    Protection,
}

impl Channel {
    /// Position in [`DESCRIPTORS`] and in the dashboard grid (row-major, two columns).
    pub fn index(self) -> usize {
        match self {
            Channel::Soc => 0,
            Channel::Soh => 1,
            Channel::Voltage => 2,
            Channel::Temperature => 3,
            Channel::Power => 4,
            Channel::Protection => 5,
        }
    }

    pub fn descriptor(self) -> &'static ChannelDescriptor {
        &DESCRIPTORS[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Channel> {
        Channel::iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const DARK_ORANGE: Rgb = Rgb(255, 140, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const PURPLE: Rgb = Rgb(128, 0, 128);
}

/// Visual severity of a zone band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Good,
    Warning,
    Critical,
}

impl Severity {
    pub fn color(self) -> Rgb {
        match self {
            Severity::Good => Rgb(0, 128, 0),
            Severity::Warning => Rgb(255, 165, 0),
            Severity::Critical => Rgb(255, 0, 0),
        }
    }
}

/// Labelled threshold range drawn behind a channel's trace.
///
/// Bands are annotation only; they never influence generated values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBand {
    pub lower: f64,
    pub upper: f64,
    pub label: &'static str,
    /// Legend text, including the range hint.
    pub legend: &'static str,
    pub severity: Severity,
}

impl ZoneBand {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// How a channel's samples are produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalProfile {
    /// Exact linear interpolation from `start` to `end` over the time domain.
    Linear { start: f64, end: f64 },
    /// Independent draws from a normal distribution.
    Normal { mean: f64, std_dev: f64 },
    Constant(f64),
}

/// Y axis presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisStyle {
    Numeric,
    /// Only the listed ticks are labelled.
    Categorical(&'static [(f64, &'static str)]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelDescriptor {
    pub channel: Channel,
    pub title: &'static str,
    pub axis_label: &'static str,
    pub legend_label: &'static str,
    /// Spreadsheet column header.
    pub column: &'static str,
    pub line_color: Rgb,
    pub profile: SignalProfile,
    pub zones: &'static [ZoneBand],
    pub axis: AxisStyle,
}

impl ChannelDescriptor {
    /// First zone containing `value`; boundaries shared by two bands resolve to
    /// the band listed first.
    pub fn zone_for(&self, value: f64) -> Option<&'static ZoneBand> {
        self.zones.iter().find(|zone| zone.contains(value))
    }

    /// Smallest and largest bound across all zone bands.
    pub fn zone_extent(&self) -> Option<(f64, f64)> {
        self.zones.iter().fold(None, |acc, zone| match acc {
            None => Some((zone.lower, zone.upper)),
            Some((lo, hi)) => Some((lo.min(zone.lower), hi.max(zone.upper))),
        })
    }
}

const fn zone(
    lower: f64,
    upper: f64,
    label: &'static str,
    legend: &'static str,
    severity: Severity,
) -> ZoneBand {
    ZoneBand {
        lower,
        upper,
        label,
        legend,
        severity,
    }
}

const SOC_ZONES: [ZoneBand; 3] = [
    zone(80.0, 100.0, "Good", "Good (>80%)", Severity::Good),
    zone(20.0, 80.0, "Medium", "Medium (20–80%)", Severity::Warning),
    zone(0.0, 20.0, "Low", "Low (<20%)", Severity::Critical),
];

const SOH_ZONES: [ZoneBand; 3] = [
    zone(90.0, 100.0, "Healthy", "Healthy (>90%)", Severity::Good),
    zone(70.0, 90.0, "Warning", "Warning (70–90%)", Severity::Warning),
    zone(0.0, 70.0, "Poor", "Poor (<70%)", Severity::Critical),
];

const VOLTAGE_ZONES: [ZoneBand; 3] = [
    zone(13.5, 15.0, "Nominal", "Nominal", Severity::Good),
    zone(12.0, 13.5, "Low", "Low Voltage", Severity::Warning),
    zone(0.0, 12.0, "Critical Low", "Critical Low", Severity::Critical),
];

const TEMPERATURE_ZONES: [ZoneBand; 3] = [
    zone(0.0, 40.0, "Safe", "Safe (<40°C)", Severity::Good),
    zone(40.0, 60.0, "Warning", "Warning (40–60°C)", Severity::Warning),
    zone(60.0, 100.0, "Overheat", "Overheat (>60°C)", Severity::Critical),
];

const POWER_ZONES: [ZoneBand; 3] = [
    zone(0.0, 25.0, "Normal", "Normal Load", Severity::Good),
    zone(25.0, 35.0, "High", "High Load", Severity::Warning),
    zone(35.0, 50.0, "Critical", "Critical Load", Severity::Critical),
];

/// Per-channel configuration, indexed by [`Channel::index`].
pub static DESCRIPTORS: [ChannelDescriptor; 6] = [
    ChannelDescriptor {
        channel: Channel::Soc,
        title: "State of Charge (SOC)",
        axis_label: "SOC (%)",
        legend_label: "SOC (%)",
        column: "SOC (%)",
        line_color: Rgb::BLUE,
        profile: SignalProfile::Linear {
            start: 100.0,
            end: 55.0,
        },
        zones: &SOC_ZONES,
        axis: AxisStyle::Numeric,
    },
    ChannelDescriptor {
        channel: Channel::Soh,
        title: "State of Health (SOH)",
        axis_label: "SOH (%)",
        legend_label: "SOH (%)",
        column: "SOH (%)",
        line_color: Rgb::DARK_ORANGE,
        profile: SignalProfile::Linear {
            start: 100.0,
            end: 99.97,
        },
        zones: &SOH_ZONES,
        axis: AxisStyle::Numeric,
    },
    ChannelDescriptor {
        channel: Channel::Voltage,
        title: "Battery Pack Voltage",
        axis_label: "Voltage (V)",
        legend_label: "Voltage (V)",
        column: "Voltage (V)",
        line_color: Rgb::BLUE,
        profile: SignalProfile::Linear {
            start: 14.8,
            end: 13.0,
        },
        zones: &VOLTAGE_ZONES,
        axis: AxisStyle::Numeric,
    },
    ChannelDescriptor {
        channel: Channel::Temperature,
        title: "Cell Temperature",
        axis_label: "Temperature (°C)",
        legend_label: "Temp (°C)",
        column: "Temperature (°C)",
        line_color: Rgb::RED,
        profile: SignalProfile::Linear {
            start: 25.0,
            end: 29.5,
        },
        zones: &TEMPERATURE_ZONES,
        axis: AxisStyle::Numeric,
    },
    ChannelDescriptor {
        channel: Channel::Power,
        title: "Power Output",
        axis_label: "Power (W)",
        legend_label: "Power (W)",
        column: "Power (W)",
        line_color: Rgb::GREEN,
        profile: SignalProfile::Normal {
            mean: 20.0,
            std_dev: 5.0,
        },
        zones: &POWER_ZONES,
        axis: AxisStyle::Numeric,
    },
    ChannelDescriptor {
        channel: Channel::Protection,
        title: "Protection Flags",
        axis_label: "Protection Flags",
        legend_label: "Protections",
        column: "Protection",
        line_color: Rgb::PURPLE,
        profile: SignalProfile::Constant(0.0),
        zones: &[],
        axis: AxisStyle::Categorical(&[(0.0, "Normal")]),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_table_is_indexed_by_channel() {
        for channel in Channel::all() {
            assert_eq!(channel.descriptor().channel, channel);
        }
        assert_eq!(Channel::all().count(), DESCRIPTORS.len());
    }

    #[test]
    fn zoned_channels_have_three_ordered_bands() {
        for descriptor in DESCRIPTORS.iter().filter(|d| d.channel != Channel::Protection) {
            assert_eq!(descriptor.zones.len(), 3, "{}", descriptor.channel);
            let severities: Vec<_> = descriptor.zones.iter().map(|z| z.severity).collect();
            assert_eq!(
                severities,
                vec![Severity::Good, Severity::Warning, Severity::Critical]
            );
            for zone in descriptor.zones {
                assert!(zone.lower < zone.upper);
            }
        }
        assert!(Channel::Protection.descriptor().zones.is_empty());
    }

    #[test]
    fn shared_boundary_resolves_to_first_band() {
        let soc = Channel::Soc.descriptor();
        assert_eq!(soc.zone_for(80.0).map(|z| z.label), Some("Good"));
        assert_eq!(soc.zone_for(55.0).map(|z| z.label), Some("Medium"));
        assert_eq!(soc.zone_for(120.0), None);
    }

    #[test]
    fn zone_extent_spans_all_bands() {
        assert_eq!(Channel::Voltage.descriptor().zone_extent(), Some((0.0, 15.0)));
        assert_eq!(Channel::Power.descriptor().zone_extent(), Some((0.0, 50.0)));
        assert_eq!(Channel::Protection.descriptor().zone_extent(), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(Channel::Soc.to_string(), "SOC");
        assert_eq!(Channel::Temperature.to_string(), "Temperature");
    }
}

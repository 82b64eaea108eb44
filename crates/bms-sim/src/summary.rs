//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Per-channel run statistics."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use crate::channels::Channel;

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSummary {
    pub channel: Channel,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub last: f64,
    /// Label of the zone band holding `last`, if the channel has bands and one matches.
    pub final_zone: Option<&'static str>,
}

impl ChannelSummary {
    /// `None` for an empty series.
    pub fn from_values(channel: Channel, values: &[f64]) -> Option<Self> {
        let last = *values.last()?;
        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );
        Some(Self {
            channel,
            min,
            max,
            mean: sum / values.len() as f64,
            last,
            final_zone: channel.descriptor().zone_for(last).map(|zone| zone.label),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_soc_ramp() {
        let summary = ChannelSummary::from_values(Channel::Soc, &[100.0, 77.5, 55.0]).unwrap();
        assert_eq!(summary.min, 55.0);
        assert_eq!(summary.max, 100.0);
        assert!((summary.mean - 77.5).abs() < 1e-12);
        assert_eq!(summary.final_zone, Some("Medium"));
    }

    #[test]
    fn protection_has_no_zone() {
        let summary = ChannelSummary::from_values(Channel::Protection, &[0.0; 4]).unwrap();
        assert_eq!(summary.final_zone, None);
        assert_eq!(summary.mean, 0.0);
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert!(ChannelSummary::from_values(Channel::Power, &[]).is_none());
    }
}

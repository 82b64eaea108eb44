//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Seeded generator producing the telemetry channel arrays."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use rand::prelude::*;
use rand_distr::Normal;
use tracing::debug;

use crate::channels::{Channel, SignalProfile, DESCRIPTORS};
use crate::summary::ChannelSummary;
use crate::{Result, SimError};

/// One hour at one-second resolution.
pub const SAMPLE_COUNT: usize = 3600;

/// Elapsed seconds shared by every channel as the common index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDomain {
    seconds: Vec<u32>,
}

impl TimeDomain {
    /// `0..=3599`.
    pub fn one_hour() -> Self {
        Self::with_len(SAMPLE_COUNT)
    }

    pub fn with_len(len: usize) -> Self {
        Self {
            seconds: (0..len as u32).collect(),
        }
    }

    pub fn seconds(&self) -> &[u32] {
        &self.seconds
    }

    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    /// Last second in the domain, `0` for an empty domain.
    pub fn last(&self) -> u32 {
        self.seconds.last().copied().unwrap_or_default()
    }
}

/// `len` evenly spaced values from `start` to `end` inclusive.
///
/// Sample `i` is `start + i * step`; the final sample is pinned to `end`.
pub fn linspace(start: f64, end: f64, len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (len - 1) as f64;
            let mut values: Vec<f64> = (0..len).map(|i| start + i as f64 * step).collect();
            values[len - 1] = end;
            values
        }
    }
}

/// Generated channel arrays aligned on a [`TimeDomain`].
#[derive(Debug, Clone)]
pub struct Telemetry {
    time: TimeDomain,
    series: [Vec<f64>; 6],
}

impl Telemetry {
    pub fn time(&self) -> &TimeDomain {
        &self.time
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn channel(&self, channel: Channel) -> &[f64] {
        &self.series[channel.index()]
    }

    /// Channels in dashboard order with their samples.
    pub fn channels(&self) -> impl Iterator<Item = (Channel, &[f64])> + '_ {
        Channel::all().map(move |channel| (channel, self.channel(channel)))
    }

    /// Min/max/mean and the zone of the final sample, per channel.
    pub fn summary(&self) -> Vec<ChannelSummary> {
        self.channels()
            .filter_map(|(channel, values)| ChannelSummary::from_values(channel, values))
            .collect()
    }
}

/// Produces [`Telemetry`] from the descriptor table.
///
/// Linear and constant channels are deterministic; normal channels draw from
/// the injected RNG, so a seeded generator reproduces the same power trace.
#[derive(Debug)]
pub struct SignalGenerator<R = StdRng> {
    rng: R,
}

impl SignalGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> SignalGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, time: &TimeDomain) -> Result<Telemetry> {
        let len = time.len();
        let mut series: [Vec<f64>; 6] = Default::default();
        for descriptor in DESCRIPTORS.iter() {
            series[descriptor.channel.index()] =
                self.sample(descriptor.channel, descriptor.profile, len)?;
        }
        debug!(samples = len, "telemetry generated");
        Ok(Telemetry {
            time: time.clone(),
            series,
        })
    }

    fn sample(&mut self, channel: Channel, profile: SignalProfile, len: usize) -> Result<Vec<f64>> {
        match profile {
            SignalProfile::Linear { start, end } => Ok(linspace(start, end, len)),
            SignalProfile::Constant(value) => Ok(vec![value; len]),
            SignalProfile::Normal { mean, std_dev } => {
                let normal =
                    Normal::new(mean, std_dev).map_err(|source| SimError::Distribution {
                        channel,
                        mean,
                        std_dev,
                        source,
                    })?;
                Ok((&mut self.rng).sample_iter(normal).take(len).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_edges() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn domain_is_zero_based() {
        let domain = TimeDomain::one_hour();
        assert_eq!(domain.len(), SAMPLE_COUNT);
        assert_eq!(domain.seconds()[0], 0);
        assert_eq!(domain.last(), 3599);
    }

    #[test]
    fn short_domain_still_pins_endpoints() {
        let telemetry = SignalGenerator::seeded(1)
            .generate(&TimeDomain::with_len(2))
            .unwrap();
        assert_eq!(telemetry.channel(Channel::Soc), &[100.0, 55.0]);
        assert_eq!(telemetry.channel(Channel::Power).len(), 2);
    }

    #[test]
    fn empty_domain_yields_empty_channels() {
        let telemetry = SignalGenerator::seeded(1)
            .generate(&TimeDomain::with_len(0))
            .unwrap();
        assert!(telemetry.is_empty());
        assert!(telemetry.channels().all(|(_, values)| values.is_empty()));
        assert!(telemetry.summary().is_empty());
    }

    #[test]
    fn invalid_distribution_is_reported() {
        let mut generator = SignalGenerator::seeded(1);
        let err = generator
            .sample(
                Channel::Power,
                SignalProfile::Normal {
                    mean: 20.0,
                    std_dev: f64::NAN,
                },
                4,
            )
            .unwrap_err();
        assert!(err.to_string().contains("Power"));
    }
}

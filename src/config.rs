use crate::{error::Error, pose::Side};
use std::time::Duration;

const DEFAULT_SAMPLE_INTERVAL_MS: &str = "1000";
const DEFAULT_MIN_CONFIDENCE: &str = "0.1";
const DEFAULT_SIDE: &str = "right";

/// Tunables shared by the classifier and the session aggregator.
#[derive(Debug, Clone, Copy, PartialEq, structopt::StructOpt)]
pub struct AnalyzerConfig {
    /// Minimum time between two scored frames, in milliseconds.
    #[structopt(long, default_value = DEFAULT_SAMPLE_INTERVAL_MS)]
    pub sample_interval_ms: u64,

    /// Joints reported with a confidence at or below this value are treated as missing.
    #[structopt(short = "c", long, default_value = DEFAULT_MIN_CONFIDENCE)]
    pub min_confidence: f32,

    /// Body side whose limbs are measured (left or right).
    #[structopt(short, long, default_value = DEFAULT_SIDE)]
    pub side: Side,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS.parse().unwrap(),
            min_confidence: DEFAULT_MIN_CONFIDENCE.parse().unwrap(),
            side: DEFAULT_SIDE.parse().unwrap(),
        }
    }
}

impl AnalyzerConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.sample_interval_ms == 0 {
            return Err(Error::ZeroSampleInterval);
        }
        if !(0.0..1.0).contains(&self.min_confidence) {
            return Err(Error::MinConfidenceOutOfRange(self.min_confidence));
        }
        Ok(())
    }
}

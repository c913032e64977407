//! Blind baud-rate discovery
//!
//! An unidentified LIN bus does not announce its bit rate. The discovery
//! engine sweeps trial rates around a set of nominal candidates, samples the
//! bus at each, and scores the sample by relaxed-scan frame density: at the
//! true rate the UART decodes sync markers and parity-valid identifiers, at
//! a wrong rate it decodes garbage that almost never passes parity. The
//! highest-scoring trial wins. Scoring is raw frame count, with no
//! noise-floor or confidence heuristic applied on top.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::protocol::{
    scan_relaxed, ByteSource, Detection, TransportError, TransportFactory, NEAR_SYNC_BYTE,
};

/// Nominal rates most LIN buses run at; 10417 is the LIN 2.x favourite.
pub const COMMON_BAUD_RATES: [u32; 3] = [9600, 10417, 19200];

/// Baud sweep configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Nominal rates to sweep around
    pub nominal_rates: Vec<u32>,

    /// Sweep width as a percentage of each nominal rate
    pub sweep_percent: u32,

    /// Sample size per trial, in bytes
    pub sample_bytes: usize,

    /// Upper bound on how long one trial may spend accumulating its sample
    pub sample_window: Duration,

    /// Second sync byte accepted by the relaxed scan
    pub near_sync: u8,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            nominal_rates: COMMON_BAUD_RATES.to_vec(),
            sweep_percent: 15,
            sample_bytes: 512,
            sample_window: Duration::from_millis(1500),
            near_sync: NEAR_SYNC_BYTE,
        }
    }
}

/// What happened at one trial rate.
#[derive(Debug)]
pub enum TrialOutcome {
    /// Sample collected; this many relaxed-scan frames were found
    Frames(usize),

    /// The transport could not deliver a sample at this rate
    Transport(TransportError),
}

/// One swept trial rate and its outcome.
#[derive(Debug)]
pub struct Trial {
    /// Trial rate in baud
    pub baud: u32,

    /// Result of sampling at that rate
    pub outcome: TrialOutcome,
}

/// The winning rate and the frames that scored it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaudMatch {
    /// Best-scoring trial rate in baud
    pub baud: u32,

    /// Relaxed-scan hits from the winning sample
    pub detections: Vec<Detection>,
}

/// Full sweep result: the best candidate (if any trial scored at all) plus
/// the per-trial record for diagnostics.
#[derive(Debug)]
pub struct SweepReport {
    /// Winner by maximum frame count, ties kept at first-seen
    pub best: Option<BaudMatch>,

    /// Every trial in sweep order
    pub trials: Vec<Trial>,
}

/// The trial rates swept around one nominal rate: `[nominal*(100-p)%,
/// nominal*(100+p)%)` in steps of 1 % of nominal.
pub fn sweep_rates(nominal: u32, percent: u32) -> Vec<u32> {
    let pct = u64::from(percent.min(100));
    let lo = (u64::from(nominal) * (100 - pct) / 100) as u32;
    let hi = (u64::from(nominal) * (100 + pct) / 100) as u32;
    let step = (nominal / 100).max(1) as usize;
    (lo..hi).step_by(step).collect()
}

/// Sweeps candidate rates and scores each by relaxed frame detection.
#[derive(Debug, Clone)]
pub struct BaudDiscovery {
    config: DiscoveryConfig,
}

impl BaudDiscovery {
    /// Engine with the given configuration.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine sweeps with.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Run the full sweep.
    ///
    /// Transport failures are per-trial outcomes, scored as zero frames;
    /// the sweep never aborts and never retries. `best` is `None` exactly
    /// when every trial scored zero.
    pub fn run(&self, factory: &mut dyn TransportFactory) -> SweepReport {
        let mut best: Option<BaudMatch> = None;
        let mut trials = Vec::new();

        for &nominal in &self.config.nominal_rates {
            for baud in sweep_rates(nominal, self.config.sweep_percent) {
                let outcome = match self.sample_trial(factory, baud) {
                    Ok(detections) => {
                        let count = detections.len();
                        debug!(baud, frames = count, "trial complete");
                        let best_count = best.as_ref().map(|b| b.detections.len()).unwrap_or(0);
                        if count > best_count {
                            info!(baud, frames = count, "new best candidate");
                            best = Some(BaudMatch { baud, detections });
                        }
                        TrialOutcome::Frames(count)
                    }
                    Err(e) => {
                        warn!(baud, error = %e, "trial failed, continuing sweep");
                        TrialOutcome::Transport(e)
                    }
                };
                trials.push(Trial { baud, outcome });
            }
        }

        SweepReport { best, trials }
    }

    fn sample_trial(
        &self,
        factory: &mut dyn TransportFactory,
        baud: u32,
    ) -> Result<Vec<Detection>, TransportError> {
        let mut source = factory.open(baud)?;
        let sample = read_sample(
            source.as_mut(),
            self.config.sample_bytes,
            self.config.sample_window,
        )?;
        Ok(scan_relaxed(&sample, self.config.near_sync))
    }
}

/// Accumulate up to `want` bytes, bounded by `window`. Each individual read
/// blocks at most the source's own timeout, so the window is honored to
/// within one read.
fn read_sample(
    source: &mut dyn ByteSource,
    want: usize,
    window: Duration,
) -> Result<Vec<u8>, TransportError> {
    let mut sample = Vec::with_capacity(want);
    let mut chunk = [0u8; 256];
    let deadline = Instant::now() + window;

    while sample.len() < want && Instant::now() < deadline {
        let space = (want - sample.len()).min(chunk.len());
        let n = source.read_available(&mut chunk[..space])?;
        if n > 0 {
            sample.extend_from_slice(&chunk[..n]);
        }
    }
    Ok(sample)
}

//! Baud sweep behavior over a synthetic transport.

use std::time::Duration;

use linprobe_core::demo::SyntheticFactory;
use linprobe_core::discovery::{sweep_rates, BaudDiscovery, DiscoveryConfig, TrialOutcome};

fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("linprobe_core=debug")
        .try_init();
}

fn fast_config() -> DiscoveryConfig {
    DiscoveryConfig {
        // Synthetic sources never block, so the window is just a backstop.
        sample_window: Duration::from_millis(100),
        ..Default::default()
    }
}

#[test]
fn sweep_selects_the_true_rate() {
    init_logs();

    // Bus runs at exactly one of the swept trial rates; every other trial
    // sees misclocked noise.
    let mut factory = SyntheticFactory {
        true_baud: 9600,
        // The closest foreign trial is 9582 (from the 10417 sweep), 18 baud
        // away; keep the decodable band tighter than that so exactly one
        // trial sees the bus.
        tolerance: 16,
        seed: 0xCAFE,
    };
    let report = BaudDiscovery::new(fast_config()).run(&mut factory);

    let best = report.best.expect("clean traffic at 9600 must score");
    assert_eq!(best.baud, 9600);
    assert!(
        best.detections.len() >= 20,
        "only {} detections at the true rate",
        best.detections.len()
    );
    assert!(best
        .detections
        .iter()
        .all(|d| [0x20, 0x10, 0x33].contains(&d.id())));
}

#[test]
fn off_grid_rate_still_wins_through_its_neighbours() {
    // 10417 baud with a tolerance covering adjacent trial steps: several
    // nearby trials decode, the best of them must carry the day over noise.
    let mut factory = SyntheticFactory {
        true_baud: 10417,
        tolerance: 120,
        seed: 0xBEEF,
    };
    let report = BaudDiscovery::new(fast_config()).run(&mut factory);

    let best = report.best.expect("in-tolerance trials must score");
    assert!(
        best.baud.abs_diff(10417) <= 120,
        "winner {} is outside the decodable band",
        best.baud
    );
}

#[test]
fn every_trial_is_accounted_for() {
    let config = fast_config();
    let expected: usize = config
        .nominal_rates
        .iter()
        .map(|&n| sweep_rates(n, config.sweep_percent).len())
        .sum();

    let mut factory = SyntheticFactory {
        true_baud: 19200,
        tolerance: 100,
        seed: 1,
    };
    let report = BaudDiscovery::new(config).run(&mut factory);

    assert_eq!(report.trials.len(), expected);
    assert!(report
        .trials
        .iter()
        .all(|t| matches!(t.outcome, TrialOutcome::Frames(_))));
}

#[test]
fn noise_alone_scores_far_below_real_traffic() {
    // Point the sweep somewhere the bus is not: whatever noise scores, it
    // must not look like the dozens of frames a real rate produces.
    let mut factory = SyntheticFactory {
        true_baud: 1_000_000,
        tolerance: 0,
        seed: 7,
    };
    let report = BaudDiscovery::new(fast_config()).run(&mut factory);

    if let Some(best) = report.best {
        assert!(
            best.detections.len() < 10,
            "noise produced {} detections at {}",
            best.detections.len(),
            best.baud
        );
    }
}

//! Integration tests: MonitorService cycle behaviour against mock ports.

use core::time::Duration;

use climasense::app::alert::AlertState;
use climasense::app::channel::Channels;
use climasense::app::service::{CycleOutcome, MonitorService};
use climasense::app::ports::TimePort;
use climasense::config::SystemConfig;
use climasense::error::{Error, SensorError};

use crate::mock_hw::{HwCall, MockClock, MockHardware, MockPublisher, RecordingSink};

const COOLDOWN: Duration = Duration::from_secs(15);

fn service() -> MonitorService {
    MonitorService::new(SystemConfig::default(), Channels::for_account("ada"))
}

struct Rig {
    svc: MonitorService,
    hw: MockHardware,
    publisher: MockPublisher,
    clock: MockClock,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        let mut rig = Self {
            svc: service(),
            hw: MockHardware::new(),
            publisher: MockPublisher::new(),
            clock: MockClock::new(),
            sink: RecordingSink::new(),
        };
        rig.svc.start(&mut rig.hw, &rig.clock, &mut rig.sink);
        rig
    }

    fn run_cycle(&mut self) -> climasense::error::Result<CycleOutcome> {
        self.svc
            .run_cycle(&mut self.hw, &mut self.publisher, &self.clock, &mut self.sink)
    }

    fn run_once(&mut self) -> climasense::error::Result<CycleOutcome> {
        self.svc
            .run_once(&mut self.hw, &mut self.publisher, &self.clock, &mut self.sink)
    }
}

// ── Scenario A: normal sample ─────────────────────────────────

#[test]
fn normal_sample_presents_and_publishes_without_alert() {
    let mut rig = Rig::new();
    rig.hw.reading = Ok((20, 45));

    let outcome = rig.run_cycle().unwrap();

    match outcome {
        CycleOutcome::Completed { sample, alert } => {
            assert_eq!(alert, AlertState::Normal);
            assert_eq!(sample.temperature_c, 20);
            assert_eq!(sample.humidity_pct, 45);
        }
        other => panic!("expected completed cycle, got {:?}", other),
    }

    // No alert side effects.
    assert!(!rig.hw.calls.iter().any(|c| matches!(c, HwCall::SetColour { .. })));
    assert!(!rig.hw.calls.iter().any(|c| matches!(c, HwCall::Buzzer(true))));
    assert!(!rig.hw.calls.iter().any(|c| matches!(c, HwCall::ShowAlert { .. })));

    // Reading screen shown after the cycle-start clear.
    let clear = rig.hw.position(|c| *c == HwCall::Clear).unwrap();
    let reading = rig
        .hw
        .position(|c| matches!(c, HwCall::ShowReading { .. }))
        .unwrap();
    assert!(clear < reading);

    // Exactly one publish attempt per channel, temperature first.
    assert_eq!(
        rig.publisher.sent,
        vec![
            ("ada/feeds/temperature".to_string(), 20),
            ("ada/feeds/humidity".to_string(), 45),
        ]
    );
}

// ── Scenario B: exceeded sample ───────────────────────────────

#[test]
fn exceeded_sample_runs_full_alert_sequence_before_publishing() {
    let mut rig = Rig::new();
    rig.hw.reading = Ok((25, 60));

    let outcome = rig.run_cycle().unwrap();
    assert!(matches!(
        outcome,
        CycleOutcome::Completed {
            alert: AlertState::Exceeded,
            ..
        }
    ));

    // Colour hold → colour off → buzzer pulse → silence, in that order.
    let colour_on = rig
        .hw
        .position(|c| {
            matches!(
                c,
                HwCall::SetColour {
                    r: false,
                    g: true,
                    b: false
                }
            )
        })
        .expect("alert colour never set");
    let colour_off = rig
        .hw
        .calls
        .iter()
        .enumerate()
        .position(|(i, c)| i > colour_on && *c == HwCall::ColourOff)
        .expect("colour never cleared");
    let buzz_on = rig.hw.position(|c| *c == HwCall::Buzzer(true)).unwrap();
    let buzz_off = rig
        .hw
        .calls
        .iter()
        .enumerate()
        .position(|(i, c)| i > buzz_on && *c == HwCall::Buzzer(false))
        .expect("buzzer never silenced");
    assert!(colour_on < colour_off);
    assert!(colour_off < buzz_on);
    assert!(buzz_on < buzz_off);

    // Alert screen held, cleared, then the reading screen.
    let alert_screen = rig
        .hw
        .position(|c| matches!(c, HwCall::ShowAlert { threshold_c: 23 }))
        .expect("alert screen never shown");
    let clear_after = rig
        .hw
        .calls
        .iter()
        .enumerate()
        .position(|(i, c)| i > alert_screen && *c == HwCall::Clear)
        .expect("alert screen never cleared");
    let reading = rig
        .hw
        .position(|c| matches!(c, HwCall::ShowReading { .. }))
        .unwrap();
    assert!(buzz_off < alert_screen);
    assert!(alert_screen < clear_after);
    assert!(clear_after < reading);

    // Holds observed: colour 2s, buzzer 1s, alert screen 5s.
    let sleeps = rig.clock.sleeps.borrow().clone();
    assert_eq!(
        sleeps,
        vec![
            Duration::from_secs(2),
            Duration::from_secs(1),
            Duration::from_secs(5),
        ]
    );

    // Indicators neutral once the sequence is over.
    assert_eq!(rig.hw.colour, (false, false, false));
    assert!(!rig.hw.buzzer_on);

    // Publishes still happen, after the alert.
    assert_eq!(rig.publisher.sent.len(), 2);
}

#[test]
fn boundary_temperature_does_not_alert() {
    let mut rig = Rig::new();
    rig.hw.reading = Ok((23, 50));

    let outcome = rig.run_cycle().unwrap();
    assert!(matches!(
        outcome,
        CycleOutcome::Completed {
            alert: AlertState::Normal,
            ..
        }
    ));
    assert!(!rig.hw.calls.iter().any(|c| matches!(c, HwCall::ShowAlert { .. })));
}

#[test]
fn repeated_alerts_always_end_neutral() {
    let mut rig = Rig::new();
    rig.hw.reading = Ok((30, 60));

    for _ in 0..3 {
        rig.run_once().unwrap();
        assert_eq!(rig.hw.colour, (false, false, false));
        assert!(!rig.hw.buzzer_on);
        assert!(!rig.hw.activity_on);
    }
}

// ── Scenario C: sensor failure ────────────────────────────────

#[test]
fn sensor_failure_aborts_body_but_still_cooldowns() {
    let mut rig = Rig::new();
    rig.hw.reading = Err(SensorError::Timeout);

    let before = rig.clock.uptime();
    let result = rig.run_once();

    assert_eq!(result.unwrap_err(), Error::Sensor(SensorError::Timeout));

    // No publish attempt was made.
    assert_eq!(rig.publisher.attempts, 0);

    // Cooldown still ran: activity off, window reset, one 15s sleep.
    assert!(rig.hw.contains(&HwCall::Activity(false)));
    assert_eq!(rig.clock.sleep_count(COOLDOWN), 1);
    assert!(rig.svc.last_publish() >= before);
    assert_eq!(rig.svc.last_publish(), rig.clock.uptime() - COOLDOWN);
}

// ── Cooldown invariant ────────────────────────────────────────

#[test]
fn cooldown_runs_exactly_once_per_cycle_regardless_of_outcome() {
    let mut rig = Rig::new();

    // Success.
    rig.hw.reading = Ok((20, 45));
    rig.run_once().unwrap();
    assert_eq!(rig.clock.sleep_count(COOLDOWN), 1);

    // Sensor failure.
    rig.hw.reading = Err(SensorError::ChecksumMismatch);
    let _ = rig.run_once();
    assert_eq!(rig.clock.sleep_count(COOLDOWN), 2);

    // Publish failure.
    rig.hw.reading = Ok((20, 45));
    rig.publisher.fail_topic("ada/feeds/temperature");
    rig.publisher.fail_topic("ada/feeds/humidity");
    rig.run_once().unwrap();
    assert_eq!(rig.clock.sleep_count(COOLDOWN), 3);
}

// ── Publish-window gate ───────────────────────────────────────

#[test]
fn stale_window_skips_body_until_cooldown_resets_it() {
    let mut rig = Rig::new();

    // Let the full window elapse without a cycle.
    rig.clock.advance(Duration::from_secs(40));

    let outcome = rig.run_cycle().unwrap();
    assert!(matches!(outcome, CycleOutcome::Skipped { .. }));
    assert_eq!(rig.hw.measure_count, 0);
    assert_eq!(rig.publisher.attempts, 0);

    // Cooldown reopens the window; the next cycle runs the body.
    rig.svc.cooldown(&mut rig.hw, &rig.clock);
    let outcome = rig.run_cycle().unwrap();
    assert!(matches!(outcome, CycleOutcome::Completed { .. }));
    assert_eq!(rig.hw.measure_count, 1);
}

#[test]
fn fresh_window_runs_body() {
    let mut rig = Rig::new();
    rig.clock.advance(Duration::from_secs(39));

    let outcome = rig.run_cycle().unwrap();
    assert!(matches!(outcome, CycleOutcome::Completed { .. }));
}

// ── Publish failure containment ───────────────────────────────

#[test]
fn one_failed_channel_does_not_block_the_other() {
    let mut rig = Rig::new();
    rig.hw.reading = Ok((20, 45));
    rig.publisher.fail_topic("ada/feeds/temperature");

    let outcome = rig.run_cycle();
    assert!(outcome.is_ok(), "publish failure must not abort the cycle");

    assert_eq!(rig.publisher.attempts, 2);
    assert_eq!(
        rig.publisher.sent,
        vec![("ada/feeds/humidity".to_string(), 45)]
    );
    assert_eq!(rig.sink.failed_topics(), vec!["ada/feeds/temperature"]);
    assert_eq!(rig.sink.published_topics(), vec!["ada/feeds/humidity"]);
}

#[test]
fn telemetry_outage_leaves_local_indicators_working() {
    let mut rig = Rig::new();
    rig.hw.reading = Ok((25, 60));
    rig.publisher.fail_topic("ada/feeds/temperature");
    rig.publisher.fail_topic("ada/feeds/humidity");

    rig.run_once().unwrap();

    // Alert sequence and reading screen still happened.
    assert!(rig.hw.calls.iter().any(|c| matches!(c, HwCall::ShowAlert { .. })));
    assert!(rig.hw.calls.iter().any(|c| matches!(c, HwCall::ShowReading { .. })));
    assert_eq!(rig.sink.failed_topics().len(), 2);
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_forces_indicators_to_known_state() {
    let mut svc = service();
    let mut hw = MockHardware::new();
    let clock = MockClock::new();
    let mut sink = RecordingSink::new();

    clock.advance(Duration::from_secs(7));
    svc.start(&mut hw, &clock, &mut sink);

    assert!(hw.contains(&HwCall::AllOff));
    assert_eq!(svc.last_publish(), Duration::from_secs(7));
}

#[test]
fn activity_led_marks_the_body() {
    let mut rig = Rig::new();
    rig.hw.reading = Ok((20, 45));
    rig.run_once().unwrap();

    let on = rig.hw.position(|c| *c == HwCall::Activity(true)).unwrap();
    let off = rig.hw.position(|c| *c == HwCall::Activity(false)).unwrap();
    assert!(on < off);
    assert!(!rig.hw.activity_on);
}

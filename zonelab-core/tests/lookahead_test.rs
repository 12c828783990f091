//! Anti-lookahead tests.
//!
//! Invariant: the decision evaluated at processing index i may only use
//! bars [0, i−1]. The signal receives the strict prefix, the zone test
//! uses the close of bar i−1, and a triggered entry executes at the open
//! of bar i — never better.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;
use zonelab_core::domain::{Bar, Side, Zone};
use zonelab_core::engine::{run, EngineParams};
use zonelab_core::signals::EntrySignal;
use zonelab_core::sink::NullSink;

fn ts(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap() + chrono::Duration::minutes(15 * i as i64)
}

/// Synthetic series with a distinct open per bar so entry prices are
/// attributable to exactly one bar.
fn make_bars(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let open = 100.0 + i as f64; // unique per bar
            Bar::new(ts(i), open, open + 1.0, open - 1.0, open + 0.5, None)
        })
        .collect()
}

/// Records every prefix it is shown and fires once, at a chosen length.
struct FireAt {
    fire_len: usize,
    seen: Mutex<Vec<(usize, DateTime<Utc>)>>, // (prefix len, last prefix timestamp)
}

impl FireAt {
    fn new(fire_len: usize) -> Self {
        Self {
            fire_len,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl EntrySignal for FireAt {
    fn should_enter(&self, prefix: &[Bar], _side: Side) -> bool {
        let last = prefix.last().expect("engine never passes an empty prefix");
        self.seen.lock().unwrap().push((prefix.len(), last.timestamp));
        prefix.len() == self.fire_len
    }

    fn name(&self) -> &str {
        "fire_at"
    }
}

#[test]
fn entry_executes_at_the_open_of_the_bar_after_the_signal() {
    let bars = make_bars(20);
    let fire_len = 7; // signal decided after bar 6 closed
    let signal = FireAt::new(fire_len);
    // Zone spans everything; stop far below so the position stays open.
    let params = EngineParams::new(Side::Long, Zone::new(0.0, 1000.0).unwrap(), 1.0);

    let outcome = run(&bars, &params, &signal, &mut NullSink).unwrap();

    let open = outcome.open_position.expect("entry should have fired");
    // Entry is dated at bar `fire_len` (one past the signal bar) and priced
    // at exactly that bar's open.
    assert_eq!(open.entry_time, bars[fire_len].timestamp);
    assert_eq!(open.entry, bars[fire_len].open);
    assert!(open.entry_time > bars[fire_len - 1].timestamp);
}

#[test]
fn signal_only_ever_sees_strict_prefixes() {
    let bars = make_bars(20);
    let signal = FireAt::new(usize::MAX); // never fires, sees every decision
    let params = EngineParams::new(Side::Long, Zone::new(0.0, 1000.0).unwrap(), 1.0);

    run(&bars, &params, &signal, &mut NullSink).unwrap();

    let seen = signal.seen.lock().unwrap();
    // One evaluation per decision index 1..n, each with prefix length i.
    assert_eq!(seen.len(), bars.len() - 1);
    for (call, (len, last_ts)) in seen.iter().enumerate() {
        assert_eq!(*len, call + 1);
        // The newest bar the signal can see closed strictly before the
        // decision bar opened.
        assert_eq!(*last_ts, bars[*len - 1].timestamp);
        assert!(*last_ts < bars[*len].timestamp);
    }
}

#[test]
fn truncating_the_future_does_not_change_past_decisions() {
    // Same engine, same parameters, series truncated after the entry: the
    // recorded entry must be identical. Future bars cannot leak backwards.
    let full = make_bars(20);
    let truncated = full[..10].to_vec();
    let params = EngineParams::new(Side::Long, Zone::new(0.0, 1000.0).unwrap(), 1.0);

    let full_outcome = run(&full, &params, &FireAt::new(5), &mut NullSink).unwrap();
    let truncated_outcome = run(&truncated, &params, &FireAt::new(5), &mut NullSink).unwrap();

    let a = full_outcome.open_position.unwrap();
    let b = truncated_outcome.open_position.unwrap();
    assert_eq!(a.entry_time, b.entry_time);
    assert_eq!(a.entry, b.entry);
    assert_eq!(a.stop, b.stop);
    assert_eq!(a.target, b.target);
}

//! Entry signals — pure predicates over closed bar history.
//!
//! Signals must NEVER see the decision bar or anything after it: the
//! engine hands them the prefix of bars strictly before the bar whose open
//! would execute the entry. They carry no state and touch no engine
//! internals.

pub mod ema_rejection;

pub use ema_rejection::EmaRejection;

use crate::domain::{Bar, Side};

/// Pluggable entry predicate.
///
/// # Invariants
/// - `should_enter()` MUST be a pure function of `prefix` and `side`
/// - `should_enter()` MUST NOT assume anything beyond the prefix exists
/// - the same prefix and side always produce the same answer
pub trait EntrySignal: Send + Sync {
    /// Decide whether to enter, given all bars strictly before the
    /// decision bar. If true, the engine enters at the decision bar's open.
    fn should_enter(&self, prefix: &[Bar], side: Side) -> bool;

    /// Signal name for reports and sinks.
    fn name(&self) -> &str;
}

/// Enters at every opportunity. Test double and sweep baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEnter;

impl EntrySignal for AlwaysEnter {
    fn should_enter(&self, _prefix: &[Bar], _side: Side) -> bool {
        true
    }

    fn name(&self) -> &str {
        "always_enter"
    }
}

/// Never enters. Test double.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverEnter;

impl EntrySignal for NeverEnter {
    fn should_enter(&self, _prefix: &[Bar], _side: Side) -> bool {
        false
    }

    fn name(&self) -> &str {
        "never_enter"
    }
}

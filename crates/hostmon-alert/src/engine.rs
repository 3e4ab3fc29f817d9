use crate::rules::threshold::ThresholdRule;
use chrono::{Duration, NaiveDateTime};
use hostmon_common::types::{AlertEvent, Sample};

#[derive(Debug, Clone, PartialEq)]
pub enum AlertDecision {
    /// No metric is over its limit.
    Clear,
    /// Over a limit, but an alert already went out inside the cooldown.
    Suppressed { last_fired: NaiveDateTime },
    Fire(AlertEvent),
}

/// Applies the repeat cooldown on top of [`ThresholdRule`].
///
/// The engine keeps no state of its own; the caller owns the time of the
/// last fired alert and passes it in on every evaluation.
#[derive(Debug, Clone)]
pub struct AlertEngine {
    rule: ThresholdRule,
    cooldown: Duration,
}

impl AlertEngine {
    /// A zero cooldown means every breaching sample alerts.
    pub fn new(rule: ThresholdRule, cooldown_secs: u64) -> Self {
        Self {
            rule,
            cooldown: i64::try_from(cooldown_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
        }
    }

    pub fn evaluate(&self, sample: &Sample, last_fired: Option<NaiveDateTime>) -> AlertDecision {
        let Some(event) = self.rule.evaluate(sample) else {
            return AlertDecision::Clear;
        };

        if let Some(last) = last_fired {
            if self.within_cooldown(sample.timestamp - last) {
                tracing::debug!(
                    breached = ?event.breached,
                    last_fired = %last,
                    "Alert suppressed (cooldown)"
                );
                return AlertDecision::Suppressed { last_fired: last };
            }
        }
        AlertDecision::Fire(event)
    }

    /// A negative elapsed time (wall clock stepped back) counts as an expired window.
    fn within_cooldown(&self, elapsed: Duration) -> bool {
        !self.cooldown.is_zero() && elapsed >= Duration::zero() && elapsed < self.cooldown
    }
}

//! Tracing support for outcomes.
//!
//! Provides the [`OutcomeTraceExt`] extension trait for emitting an
//! outcome's reason transcript as a `tracing` event. Feature-gated behind
//! `#[cfg(feature = "tracing")]`.

use tracing::Level;

use crate::Outcome;

/// Extension trait for logging outcomes through `tracing`.
///
/// Both methods return the receiver so a pipeline can log mid-chain:
///
/// ```rust,ignore
/// let outcome = load_config()
///     .bind(parse_config);
/// outcome.log("loading configuration");
/// ```
pub trait OutcomeTraceExt {
    /// Emit this outcome's transcript at a level derived from its status:
    /// `ERROR` when failed, `DEBUG` when successful.
    ///
    /// The transcript is flattened to a single line so every reason lands
    /// inside the event field; line-oriented log processing would otherwise
    /// detach the continuation lines from the event.
    fn log(&self, context: &str) -> &Self;

    /// Emit this outcome's transcript at an explicit level.
    fn log_at(&self, context: &str, level: Level) -> &Self;
}

impl<T> OutcomeTraceExt for Outcome<T> {
    fn log(&self, context: &str) -> &Self {
        let level = if self.is_failed() {
            Level::ERROR
        } else {
            Level::DEBUG
        };
        self.log_at(context, level)
    }

    fn log_at(&self, context: &str, level: Level) -> &Self {
        let transcript = single_line(&self.to_string());
        // The event macros require a const level, so dispatch here.
        if level == Level::ERROR {
            tracing::error!(context = %context, outcome = %transcript);
        } else if level == Level::WARN {
            tracing::warn!(context = %context, outcome = %transcript);
        } else if level == Level::INFO {
            tracing::info!(context = %context, outcome = %transcript);
        } else if level == Level::DEBUG {
            tracing::debug!(context = %context, outcome = %transcript);
        } else {
            tracing::trace!(context = %context, outcome = %transcript);
        }
        self
    }
}

// Joins the transcript's lines with a single space, dropping the per-reason
// indentation.
fn single_line(transcript: &str) -> String {
    transcript
        .lines()
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn failed_outcome_logs_at_error() {
        let outcome: Outcome<i32> = Outcome::fail("database is down");
        outcome.log("loading users");

        assert!(logs_contain("database is down"));
        assert!(logs_contain("loading users"));
    }

    #[traced_test]
    #[test]
    fn explicit_level_is_respected() {
        let outcome = Outcome::ok(1).with_success("warmed");
        outcome.log_at("startup", Level::INFO);

        assert!(logs_contain("warmed"));
    }

    #[traced_test]
    #[test]
    fn every_reason_lands_on_the_event_line() {
        // Reasons past the first start on continuation lines of the
        // transcript; the emitted field must carry them all on one line so
        // log capture keeps them attached to the event.
        let outcome: Outcome<i32> = Outcome::new()
            .with_error("primary fault")
            .with_error("secondary fault");
        outcome.log("multi-reason");

        assert!(logs_contain("primary fault"));
        assert!(logs_contain("secondary fault"));
        assert!(logs_contain("failed with 2 reason(s)"));
    }

    #[test]
    fn single_line_flattens_and_trims() {
        let flat = single_line("failed with 2 reason(s):\n  1. error: a\n  2. error: b");
        assert_eq!(flat, "failed with 2 reason(s): 1. error: a 2. error: b");
    }

    #[traced_test]
    #[test]
    fn logging_is_chainable() {
        let outcome = Outcome::ok(2);
        let doubled = outcome.log("before").clone().map(|x| x * 2);

        assert_eq!(*doubled.value(), 4);
    }
}

//! Human-readable rendering of rally server replies.

use chrono::TimeDelta;
use wristband_client::{Acknowledgement, RallyStats, RegistrationResult};

/// Shown when the rally server could not be reached or answered garbage.
pub const CONNECTION_ERROR: &str =
    "Could not reach the rally server. Please check your connection and try again.";

/// Whether the server accepted the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

/// Rendered reply, ready for the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub outcome: Outcome,
    pub text: String,
}

impl Rendered {
    fn accepted(text: String) -> Self {
        Self {
            outcome: Outcome::Accepted,
            text,
        }
    }

    fn rejected(text: String) -> Self {
        Self {
            outcome: Outcome::Rejected,
            text,
        }
    }
}

pub fn registration(result: &RegistrationResult) -> Rendered {
    if !result.is_success() {
        return Rendered::rejected(rejection(
            "Registration failed",
            result.error_message(),
            result.status.as_deref(),
        ));
    }

    let mut lines = vec!["Email registered.".to_string()];
    if let Some(registered_at) = &result.registered_at {
        lines.push(format!("Started:  {}", registered_at));
    }
    if let Some(finished_at) = &result.finished_at {
        lines.push(format!("Finished: {}", finished_at));
    }
    if let Some(elapsed) = result.elapsed() {
        lines.push(format!("Time:     {}", format_elapsed(elapsed)));
    }

    Rendered::accepted(lines.join("\n"))
}

/// Render a tag registration or flag collection reply.
pub fn acknowledgement(action: &str, ack: &Acknowledgement) -> Rendered {
    if !ack.is_success() {
        return Rendered::rejected(rejection(
            &format!("{} failed", action),
            ack.error_message(),
            ack.status.as_deref(),
        ));
    }

    match &ack.timestamp {
        Some(timestamp) => Rendered::accepted(format!("{} succeeded at {}", action, timestamp)),
        None => Rendered::accepted(format!("{} succeeded", action)),
    }
}

pub fn stats(stats: &RallyStats) -> Rendered {
    let count = |n: Option<u64>| n.unwrap_or(0);
    let flags = &stats.flags_collected;

    Rendered::accepted(format!(
        "Participants:      {}\n\
         Flag 1 collected:  {}\n\
         Flag 2 collected:  {}\n\
         Flag 3 collected:  {}\n\
         Emails submitted:  {}",
        count(stats.total_participants),
        count(flags.flag1),
        count(flags.flag2),
        count(flags.flag3),
        count(stats.email_submissions),
    ))
}

fn rejection(headline: &str, error: Option<&str>, status: Option<&str>) -> String {
    match (error, status) {
        (Some(error), _) => format!("{}: {}", headline, error),
        (None, Some(status)) => format!("{}: server reported status \"{}\"", headline, status),
        (None, None) => format!("{}: no status in server reply", headline),
    }
}

/// Format as `H:MM:SS`. Negative spans keep their sign.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();

    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

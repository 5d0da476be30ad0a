//! Metric names and descriptions for the contact intake pipeline.
//!
//! Metrics are recorded through the `metrics` facade; without an installed
//! recorder they are no-ops, so library code and tests record freely.
//!
//! # Metric Naming Conventions
//!
//! - Prefix: `contact_`
//! - Suffix: `_total` for counters
//! - Labels: `outcome` only, with a small fixed set of values

use metrics::describe_counter;

/// Submissions handled by the intake pipeline (label: `outcome`).
///
/// Outcomes: `created`, `invalid`, `duplicate`, `unavailable`, `error`.
pub const SUBMISSIONS_TOTAL: &str = "contact_submissions_total";

/// Best-effort notification attempts (label: `outcome`: `sent`, `failed`).
pub const NOTIFICATIONS_TOTAL: &str = "contact_notifications_total";

/// Register descriptions for every metric above.
///
/// Call once after installing a recorder.
pub fn describe_metrics() {
    describe_counter!(
        SUBMISSIONS_TOTAL,
        "Contact form submissions processed, by outcome"
    );
    describe_counter!(
        NOTIFICATIONS_TOTAL,
        "Notification emails attempted after a stored submission, by outcome"
    );
}

//! Timestamp sources used by [`super::ServerSideAuth`].

use chrono::Utc;

/// Supplies the `ts` value for server-side authentication.
///
/// The API only requires that the value changes between requests; it is never
/// parsed as a date. Closures returning a `String` implement this trait, which
/// keeps tests deterministic.
pub trait Timestamper: Send + Sync {
    /// Returns the timestamp for the next request.
    fn timestamp(&self) -> String;
}

impl<F> Timestamper for F
where
    F: Fn() -> String + Send + Sync,
{
    fn timestamp(&self) -> String {
        self()
    }
}

/// Default source: current UTC time in nanoseconds, base-16 encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimestamper;

impl Timestamper for SystemTimestamper {
    fn timestamp(&self) -> String {
        let now = Utc::now();
        // Out of range only past the year 2262; fall back to microseconds.
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000));
        format!("{:x}", nanos)
    }
}

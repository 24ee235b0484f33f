//! Frame-time conversions.
//!
//! BVH stores the frame step as fractional seconds; the document keeps it as a
//! `Duration` so arithmetic on it stays exact.

use std::time::Duration;

use crate::error::BvhError;

/// Convert fractional seconds to a `Duration`.
///
/// Fails for negative, NaN, infinite or overflowing values.
pub fn fractional_seconds_to_duration(seconds: f64) -> Result<Duration, BvhError> {
    Duration::try_from_secs_f64(seconds).map_err(|_| BvhError::InvalidFrameTime { seconds })
}

/// Convert a `Duration` to fractional seconds.
#[inline]
pub fn duration_to_fractional_seconds(duration: Duration) -> f64 {
    duration.as_secs_f64()
}

use chrono::Datelike;
use log::trace;

use crate::types::{CaptureTimestamp, GroupKey};

/// Convert a capture date into the folder key used to group it.
///
/// Only the calendar date takes part; the time of day is ignored.
pub fn format_key(date: &CaptureTimestamp) -> GroupKey {
    let stamp = format!("{:02}_{:02}_{:02} - ", date.year(), date.month(), date.day());
    trace!("Stamp for {} = '{}'", date, stamp);
    GroupKey::from_string(stamp)
}

//! Counts errors recorded in the Summary SMART error log.

use crate::ata::data::log::{LogDirectory, LogSummary};

/**
Returns the total number of device errors across summary log sectors.

Sectors with a zero index (no errors were logged there yet) are skipped, as are sectors beyond the count the log directory reports. Returns 0 if the directory says there's no summary log at all.
*/
pub fn aggregate(directory: &LogDirectory, summaries: &[LogSummary]) -> u32 {
	let sectors = directory.summary_sectors() as usize;

	summaries.iter()
		.take(sectors)
		.filter(|s| s.index != 0)
		.map(|s| s.count as u32)
		.sum()
}

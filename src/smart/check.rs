/*!
The health check itself: IDENTIFY, then SMART data and thresholds, then the error log.

```text
IDENTIFY ── unsupported ──→ Outcome::Unsupported
    │    ── disabled ─────→ Outcome::Disabled
    ↓
SMART READ DATA → SMART READ THRESHOLDS → evaluate
    ↓
SMART READ LOG (directory) ── no summary log ──→ Outcome::Evaluated
    ↓
SMART READ LOG (summary) → aggregate ──────────→ Outcome::Evaluated
```

Any command or decoding failure aborts the check.
*/

use crate::ata::data::attr::{OfflineStatus, SmartData};
use crate::ata::data::id::{Id, Ternary};
use crate::ata::data::log::LogSummary;
use crate::ata::misc::{Error, Misc};

use super::eval::{evaluate, EvaluationResult};
use super::log::aggregate;
use super::status::Status;
use super::thresholds::ThresholdMap;

/// User-supplied raw value thresholds
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
	pub critical: ThresholdMap,
	pub warning: ThresholdMap,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct Report {
	pub id: Id,
	pub data: SmartData,
	pub result: EvaluationResult,
	/// decoded Summary SMART error log sectors; empty if the device keeps no such log
	pub logs: Vec<LogSummary>,
	pub log_errors: u32,
	pub status: Status,
}

impl Report {
	/// First line of plugin output, with perfdata
	pub fn status_line(&self) -> String {
		format!("{}: prdfail {}, advisory {}, critical {}, warning {}, logs {} |{}",
			self.status,
			self.result.predicted_fail,
			self.result.advisory,
			self.result.custom_critical,
			self.result.custom_warning,
			self.log_errors,
			self.result.metrics_text(),
		)
	}
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum Outcome {
	/// Device does not support SMART feature set; nothing to check
	Unsupported,
	/// SMART is supported but turned off
	Disabled,
	Evaluated(Report),
}

impl Outcome {
	pub fn status(&self) -> Status {
		match *self {
			Outcome::Unsupported => Status::OK,
			Outcome::Disabled => Status::Unknown,
			Outcome::Evaluated(ref report) => report.status,
		}
	}

	pub fn status_line(&self) -> String {
		match *self {
			Outcome::Unsupported => format!("{}: SMART feature set unsupported", Status::OK),
			Outcome::Disabled => format!("{}: SMART feature set disabled", Status::Unknown),
			Outcome::Evaluated(ref report) => report.status_line(),
		}
	}
}

pub fn check<D: Misc + ?Sized>(dev: &D, options: &CheckOptions) -> Result<Outcome, Error> {
	let id = dev.get_device_id()?;
	info!("device: model {:?}, serial {:?}, firmware {:?}, SMART {}", id.model, id.serial, id.firmware, id.smart);

	match id.smart {
		Ternary::Unsupported => return Ok(Outcome::Unsupported),
		Ternary::Disabled => return Ok(Outcome::Disabled),
		Ternary::Enabled => (),
	}

	let data = dev.get_smart_data()?;
	if !data.checksum_valid {
		warn!("SMART data checksum mismatch");
	}
	if let OfflineStatus::Other(x) = data.offline_status {
		warn!("unknown off-line data collection status {:#04x}", x);
	}
	let thresholds = dev.get_smart_thresholds()?;
	if !thresholds.checksum_valid {
		warn!("SMART thresholds checksum mismatch");
	}

	let result = evaluate(&data, &thresholds, &options.critical, &options.warning);
	info!("attributes: {} predicted failures, {} advisories, {} over critical, {} over warning",
		result.predicted_fail, result.advisory, result.custom_critical, result.custom_warning);

	if !id.smart_error_logging_supported {
		debug!("device does not claim to support SMART error logging, reading the log anyway");
	}
	let directory = dev.get_smart_log_directory()?;
	let sectors = directory.summary_sectors();
	info!("log directory: version {}, {} summary log sector(s)", directory.version(), sectors);

	let logs = if sectors > 0 {
		dev.get_smart_log_summaries(sectors)?
	} else {
		vec![]
	};
	for (i, log) in logs.iter().enumerate() {
		if !log.checksum_valid {
			warn!("summary error log sector {} checksum mismatch", i);
		}
	}
	let log_errors = aggregate(&directory, &logs);
	info!("summary error log: {} error(s)", log_errors);

	let status = result.status().worst(if log_errors > 0 { Status::Warning } else { Status::OK });

	Ok(Outcome::Evaluated(Report {
		id,
		data,
		result,
		logs,
		log_errors,
		status,
	}))
}

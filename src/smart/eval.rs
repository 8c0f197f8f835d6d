/*!
Judges SMART attributes against vendor thresholds and user-supplied raw value overrides.

Two independent checks are made for every used attribute slot:

* normalized value vs. vendor threshold from the same slot of the thresholds page: failing pre-fail attributes are *predicted failures*, failing advisory (old age) attributes are *advisories*;
* raw value vs. `critical`/`warning` overrides for this attribute id: critical takes precedence, so one attribute never counts as both.
*/

use crate::ata::data::attr::{SmartAttribute, SmartData, SmartThresholds};
use super::names;
use super::status::Status;
use super::thresholds::ThresholdMap;

/// Outcome for a single attribute slot
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct AttributeVerdict {
	pub attribute: SmartAttribute,
	pub name: &'static str,
	/// vendor threshold from the same slot
	pub threshold: u8,
	/// normalized value is valid and at or below the threshold
	pub failing: bool,
	/// critical override is configured and reached
	pub over_critical: bool,
	/// warning override is configured and reached, and critical one is not
	pub over_warning: bool,
	pub status: Status,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct EvaluationResult {
	pub predicted_fail: u32,
	pub advisory: u32,
	pub custom_critical: u32,
	pub custom_warning: u32,
	/// perfdata entries, in slot order
	pub metrics: Vec<String>,
	pub attributes: Vec<AttributeVerdict>,
}

impl EvaluationResult {
	/// Status as far as attributes are concerned
	pub fn status(&self) -> Status {
		if self.predicted_fail > 0 || self.custom_critical > 0 {
			Status::Critical
		} else if self.advisory > 0 || self.custom_warning > 0 {
			Status::Warning
		} else {
			Status::OK
		}
	}

	/// Perfdata part of the status line, every entry preceded by a space
	pub fn metrics_text(&self) -> String {
		self.metrics.iter().map(|m| format!(" {}", m)).collect()
	}
}

fn perfdata(attr: &SmartAttribute, warning: Option<u64>, critical: Option<u64>) -> String {
	let opt = |x: Option<u64>| x.map(|x| x.to_string()).unwrap_or_default();
	format!("{}_{}={};{};{};;", attr.id, names::name(attr.id), attr.raw, opt(warning), opt(critical))
}

pub fn evaluate(data: &SmartData, thresholds: &SmartThresholds, critical: &ThresholdMap, warning: &ThresholdMap) -> EvaluationResult {
	let mut result = EvaluationResult::default();

	for (i, attr) in data.attributes.iter().enumerate() {
		if !attr.is_used() { continue }

		let threshold = thresholds.thresholds.get(i).map(|t| t.threshold).unwrap_or(0);

		let failing = attr.value_valid() && attr.value <= threshold;
		if failing {
			if attr.pre_fail() {
				result.predicted_fail += 1;
			} else {
				result.advisory += 1;
			}
		}

		let (crit, warn) = (critical.get(attr.id), warning.get(attr.id));
		let over_critical = crit.map(|c| attr.raw >= c).unwrap_or(false);
		let over_warning = !over_critical && warn.map(|w| attr.raw >= w).unwrap_or(false);
		if over_critical {
			result.custom_critical += 1;
		} else if over_warning {
			result.custom_warning += 1;
		}

		let status = if (failing && attr.pre_fail()) || over_critical {
			Status::Critical
		} else if failing || over_warning {
			Status::Warning
		} else {
			Status::OK
		};
		if status != Status::OK {
			debug!("attribute {} ({}) in slot {}: {}, value {}, threshold {}, raw {}", attr.id, names::name(attr.id), i, status, attr.value, threshold, attr.raw);
		}

		result.metrics.push(perfdata(attr, warn, crit));
		result.attributes.push(AttributeVerdict {
			attribute: *attr,
			name: names::name(attr.id),
			threshold,
			failing,
			over_critical,
			over_warning,
			status,
		});
	}

	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ata::data::attr::{parse_smart_data, parse_smart_thresholds};
	use crate::ata::data::attr::tests::{set_attr, set_thresh};
	use crate::smart::thresholds;

	const PRE_FAIL: u16 = 0x0003;
	const OLD_AGE: u16 = 0x0002;

	fn pages(attrs: &[(u8, u16, u8, u64, u8)]) -> (SmartData, SmartThresholds) {
		let mut data = vec![0; 512];
		let mut thresh = vec![0; 512];
		for (i, &(id, flags, value, raw, threshold)) in attrs.iter().enumerate() {
			set_attr(&mut data, i, id, flags, value, raw);
			set_thresh(&mut thresh, i, id, threshold);
		}
		(parse_smart_data(&data).unwrap(), parse_smart_thresholds(&thresh).unwrap())
	}

	fn none() -> ThresholdMap { ThresholdMap::default() }

	#[test]
	fn classification() {
		for &(flags, value, threshold, prdfail, advisory) in &[
			(PRE_FAIL, 10, 10, 1, 0),
			(PRE_FAIL, 9, 10, 1, 0),
			(PRE_FAIL, 11, 10, 0, 0),
			(OLD_AGE, 10, 10, 0, 1),
			(OLD_AGE, 1, 10, 0, 1),
			(OLD_AGE, 100, 10, 0, 0),
			// invalid normalized values never fail
			(PRE_FAIL, 0x00, 10, 0, 0),
			(PRE_FAIL, 0xfe, 0xff, 0, 0),
			(OLD_AGE, 0xff, 0xff, 0, 0),
			(PRE_FAIL, 0xfd, 0xfd, 1, 0),
		] {
			let (data, thresh) = pages(&[(5, flags, value, 0, threshold)]);
			let r = evaluate(&data, &thresh, &none(), &none());
			assert_eq!((r.predicted_fail, r.advisory), (prdfail, advisory), "flags {:#x}, value {}, threshold {}", flags, value, threshold);
			assert_eq!((r.custom_critical, r.custom_warning), (0, 0));
		}
	}

	#[test]
	fn overrides() {
		let (data, thresh) = pages(&[(5, OLD_AGE, 100, 1000, 10)]);

		for &(crit, warn, custom_critical, custom_warning) in &[
			("5:900", "5:500", 1, 0),
			("5:1000", "5:500", 1, 0),
			("5:1001", "5:500", 0, 1),
			("5:1001", "5:1000", 0, 1),
			("5:1001", "5:1001", 0, 0),
			("", "5:500", 0, 1),
			("5:900", "", 1, 0),
			// other attributes' overrides do not apply
			("197:1", "197:1", 0, 0),
			// 0 is the same as not configured
			("5:0", "5:0", 0, 0),
		] {
			let r = evaluate(&data, &thresh, &thresholds::parse(crit).unwrap(), &thresholds::parse(warn).unwrap());
			assert_eq!((r.custom_critical, r.custom_warning), (custom_critical, custom_warning), "-c {:?} -w {:?}", crit, warn);
		}
	}

	#[test]
	fn status() {
		let eval = |attrs: &[(u8, u16, u8, u64, u8)], crit: &str, warn: &str| {
			let (data, thresh) = pages(attrs);
			evaluate(&data, &thresh, &thresholds::parse(crit).unwrap(), &thresholds::parse(warn).unwrap()).status()
		};

		assert_eq!(eval(&[(1, PRE_FAIL, 100, 0, 6)], "", ""), Status::OK);
		assert_eq!(eval(&[(1, PRE_FAIL, 5, 0, 6)], "", ""), Status::Critical);
		assert_eq!(eval(&[(190, OLD_AGE, 5, 0, 6)], "", ""), Status::Warning);
		assert_eq!(eval(&[(5, OLD_AGE, 100, 3, 6)], "5:3", ""), Status::Critical);
		assert_eq!(eval(&[(5, OLD_AGE, 100, 3, 6)], "", "5:1"), Status::Warning);
		// advisory and critical override
		assert_eq!(eval(&[(190, OLD_AGE, 5, 0, 6), (5, OLD_AGE, 100, 3, 6)], "5:3", ""), Status::Critical);
	}

	#[test]
	fn metrics() {
		let (data, thresh) = pages(&[
			(1, PRE_FAIL, 100, 0, 6),
			(0, 0, 0, 0, 0), // unused slot in between
			(5, PRE_FAIL, 100, 12, 36),
			(194, OLD_AGE, 64, 0x0032_0014_0024, 0),
			(250, OLD_AGE, 100, 7, 0),
		]);
		let r = evaluate(&data, &thresh, &thresholds::parse("5:100").unwrap(), &thresholds::parse("5:10,194:50").unwrap());

		assert_eq!(r.metrics, vec![
			"1_read_error_rate=0;;;;",
			"5_reallocated_sectors_count=12;10;100;;",
			"194_temperature=36;50;;;",
			"250_read_error_retry_rate=7;;;;",
		]);
		assert_eq!(r.metrics_text(), " 1_read_error_rate=0;;;; 5_reallocated_sectors_count=12;10;100;; 194_temperature=36;50;;; 250_read_error_retry_rate=7;;;;");
		assert_eq!(r.attributes.len(), 4);
		assert_eq!(r.attributes[1].status, Status::Warning);
		assert!(r.attributes[1].over_warning);
	}

	#[test]
	fn unknown_names() {
		let (data, thresh) = pages(&[(100, OLD_AGE, 100, 1, 0)]);
		let r = evaluate(&data, &thresh, &none(), &none());
		assert_eq!(r.metrics, vec!["100_unknown=1;;;;"]);
	}

	#[test]
	fn thresholds_are_matched_by_slot() {
		let mut data = vec![0; 512];
		let mut thresh = vec![0; 512];
		set_attr(&mut data, 0, 5, PRE_FAIL, 20, 0);
		set_attr(&mut data, 1, 9, OLD_AGE, 20, 0);
		// ids in the thresholds page are ignored, only the position matters
		set_thresh(&mut thresh, 0, 9, 30);
		set_thresh(&mut thresh, 1, 5, 10);

		let r = evaluate(&parse_smart_data(&data).unwrap(), &parse_smart_thresholds(&thresh).unwrap(), &none(), &none());
		assert_eq!((r.predicted_fail, r.advisory), (1, 0));
	}
}

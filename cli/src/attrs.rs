use check_scsi_smart::smart::check::Report;
use check_scsi_smart::smart::eval::AttributeVerdict;
use check_scsi_smart::smart::Status;

use prettytable::{format, Table, Row, Cell};

fn bool_to_flag(b: bool, c: char) -> char {
	if b { c } else { '-' }
}

/// Status followed by every reason that applies, e.g. `CRITICAL (FAILING_NOW, over critical)`
fn status_text(verdict: &AttributeVerdict) -> String {
	if verdict.status == Status::OK {
		return "-".to_string();
	}

	let reasons: Vec<&str> = [
		(verdict.failing, "FAILING_NOW"),
		(verdict.over_critical, "over critical"),
		(verdict.over_warning, "over warning"),
	].iter()
		.filter(|&&(applies, _)| applies)
		.map(|&(_, why)| why)
		.collect();

	format!("{} ({})", verdict.status, reasons.join(", "))
}

/// Nagios long output: every used attribute with its verdict, followed by off-line data collection status and recent errors
pub fn print_attributes(report: &Report) {
	let mut table = Table::new();
	table.set_format(*format::consts::FORMAT_CLEAN);

	table.set_titles(Row::new(
		["ID", "name", "flags", "value", "worst", "thresh", "type", "updated", "raw", "status"].iter()
			.map(|&title| Cell::new(title))
			.collect()
	));

	for verdict in &report.result.attributes {
		let attr = &verdict.attribute;
		table.add_row(Row::new(vec![
			Cell::new(&attr.id.to_string()).style_spec("r"),
			Cell::new(verdict.name),
			Cell::new(&format!("{}{}{}{}{}{}",
				bool_to_flag(attr.pre_fail(), 'P'),
				bool_to_flag(!attr.online(), 'O'),
				bool_to_flag(attr.performance(), 'S'),
				bool_to_flag(attr.error_rate(), 'R'),
				bool_to_flag(attr.event_count(), 'C'),
				bool_to_flag(attr.self_preserving(), 'K'),
			)),
			Cell::new(&if attr.value_valid() { format!("{:3}", attr.value) } else { "---".to_string() }).style_spec("r"),
			Cell::new(&format!("{:3}", attr.worst)).style_spec("r"),
			Cell::new(&format!("{:3}", verdict.threshold)).style_spec("r"),
			Cell::new(if attr.pre_fail() { "pre-fail" } else { "old age" }),
			Cell::new(if attr.online() { "always" } else { "offline" }),
			Cell::new(&attr.raw.to_string()).style_spec("r"),
			Cell::new(&match verdict.status {
				Status::OK => "-".to_string(),
				status => {
					let why = if verdict.failing { "FAILING_NOW" }
						else if verdict.over_critical { "over critical" }
						else { "over warning" };
					format!("{} ({})", status, why)
				},
			}),
		]));
	}

	if report.result.attributes.is_empty() {
		print!("No S.M.A.R.T. attributes found.\n");
	} else {
		print!("{}", table);
	}

	print!("Off-line data collection: {}{}\n",
		report.data.offline_status,
		if report.data.offline_auto { ", automatic collection enabled" } else { "" },
	);

	print!("Summary error log: {} error(s)\n", report.log_errors);
	for log in &report.logs {
		for error in log.recent_errors() {
			// error and status registers, then the command that caused it
			let cmd = error.commands.iter().rev().find(|c| c.is_used());
			print!("  at {} hours: error {:#04x}, status {:#04x}, LBA {:#08x}{}\n",
				error.error.life_timestamp,
				error.error.error,
				error.error.status,
				error.error.lba,
				cmd.map(|c| format!(", command {:#04x}", c.command)).unwrap_or_default(),
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use check_scsi_smart::ata::data::attr::SmartAttribute;

	fn verdict(failing: bool, over_critical: bool, over_warning: bool, status: Status) -> AttributeVerdict {
		AttributeVerdict {
			// old age, online
			attribute: SmartAttribute { id: 5, flags: 0x0032, value: 5, worst: 5, raw: 150 },
			name: "Reallocated_Sectors_Count",
			threshold: 10,
			failing,
			over_critical,
			over_warning,
			status,
		}
	}

	#[test]
	fn healthy() {
		assert_eq!(status_text(&verdict(false, false, false, Status::OK)), "-");
	}

	#[test]
	fn single_reason() {
		assert_eq!(status_text(&verdict(true, false, false, Status::Warning)), "WARNING (FAILING_NOW)");
		assert_eq!(status_text(&verdict(false, true, false, Status::Critical)), "CRITICAL (over critical)");
		assert_eq!(status_text(&verdict(false, false, true, Status::Warning)), "WARNING (over warning)");
	}

	#[test]
	fn advisory_failure_over_critical() {
		// CRITICAL comes from the override, not from the advisory failure
		assert_eq!(status_text(&verdict(true, true, false, Status::Critical)), "CRITICAL (FAILING_NOW, over critical)");
	}
}

#![warn(
	missing_debug_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unstable_features,
	unused_import_braces,
	unused_qualifications,
)]

use check_scsi_smart::Device;
use check_scsi_smart::smart::Status;
use check_scsi_smart::smart::check::{check, CheckOptions, Outcome};
use check_scsi_smart::smart::thresholds;

#[macro_use]
extern crate clap;
use clap::{
	App,
	Arg,
	ArgMatches,
	ErrorKind,
};

use log::LevelFilter;
use env_logger::Builder as LogBuilder;

use std::error::Error;
use std::process;

mod attrs;

fn app() -> App<'static, 'static> {
	App::new("check_scsi_smart")
		.about("Nagios/Icinga plugin that checks S.M.A.R.T. health of ATA drives behind SCSI generic devices")
		.version(crate_version!())
		.arg(Arg::with_name("device")
			.short("d")
			.long("device")
			.takes_value(true)
			.value_name("PATH")
			.required(true)
			.help("SCSI generic device to query, e.g. /dev/sg0")
		)
		.arg(Arg::with_name("warning")
			.short("w")
			.long("warning")
			.takes_value(true)
			.value_name("ID:VALUE[,ID:VALUE…]")
			.help("Raw attribute values to warn at")
		)
		.arg(Arg::with_name("critical")
			.short("c")
			.long("critical")
			.takes_value(true)
			.value_name("ID:VALUE[,ID:VALUE…]")
			.help("Raw attribute values to go critical at (takes precedence over --warning)")
		)
		.arg(Arg::with_name("verbose")
			.short("v")
			.long("verbose")
			.multiple(true)
			.help("Verbose output to stderr: set once to log actions, twice to also show commands and raw data buffers\ncan also be set though env_logger's RUST_LOG env")
		)
		.arg(Arg::with_name("attributes")
			.short("a")
			.long("attributes")
			.help("Append attribute table, off-line data collection status and logged errors to the output")
		)
		.arg(Arg::with_name("json")
			.long("json")
			.conflicts_with("attributes")
			.help("Export report in JSON instead of the status line")
		)
}

fn init_log(args: &ArgMatches) {
	let mut log = LogBuilder::new();

	if let Ok(var) = std::env::var("RUST_LOG") {
		log.parse_filters(&var);
	}
	// -v takes precedence over RUST_LOG which some might export globally for some reasons
	log.filter(Some("check_scsi_smart"), {
		use self::LevelFilter::*;
		match args.occurrences_of("verbose") {
			0 => Warn,
			1 => Info,
			_ => Debug,
		}
	});
	log.init();
}

fn unknown(msg: &str) -> ! {
	print!("{}: {}\n", Status::Unknown, msg);
	process::exit(Status::Unknown.exit_code());
}

fn run(args: &ArgMatches) -> Result<Status, Box<dyn Error>> {
	// thresholds go first: there's no point in talking to the device if we cannot judge the reply
	let options = CheckOptions {
		critical: thresholds::parse(args.value_of("critical").unwrap_or(""))?,
		warning: thresholds::parse(args.value_of("warning").unwrap_or(""))?,
	};

	let path = args.value_of("device").unwrap_or_default();
	let dev = Device::open(path)?;

	let outcome = check(&dev, &options)?;

	if args.is_present("json") {
		print!("{}\n", serde_json::to_string(&outcome)?);
	} else {
		print!("{}\n", outcome.status_line());
		if let (true, Outcome::Evaluated(report)) = (args.is_present("attributes"), &outcome) {
			attrs::print_attributes(report);
		}
	}

	Ok(outcome.status())
}

fn main() {
	let args = match app().get_matches_safe() {
		Ok(args) => args,
		Err(e) => match e.kind {
			ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
			_ => {
				eprint!("{}\n", e.message);
				let msg = e.message.lines().next().unwrap_or_default();
				unknown(msg.trim_start_matches("error: "));
			},
		},
	};

	init_log(&args);

	match run(&args) {
		Ok(status) => process::exit(status.exit_code()),
		Err(e) => unknown(&e.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn device_is_required() {
		let e = app().get_matches_from_safe(vec!["check_scsi_smart", "-w", "5:1"]).unwrap_err();
		assert_eq!(e.kind, ErrorKind::MissingRequiredArgument);
	}

	#[test]
	fn help_and_version() {
		for flag in &["-h", "--help"] {
			let e = app().get_matches_from_safe(vec!["check_scsi_smart", *flag]).unwrap_err();
			assert_eq!(e.kind, ErrorKind::HelpDisplayed);
		}
		for flag in &["-V", "--version"] {
			let e = app().get_matches_from_safe(vec!["check_scsi_smart", *flag]).unwrap_err();
			assert_eq!(e.kind, ErrorKind::VersionDisplayed);
		}
	}

	#[test]
	fn arguments() {
		let args = app().get_matches_from_safe(vec![
			"check_scsi_smart", "--device=/dev/sg1", "-c", "5:100", "-w", "5:10,197:1", "-vv", "-a",
		]).unwrap();
		assert_eq!(args.value_of("device"), Some("/dev/sg1"));
		assert_eq!(args.value_of("critical"), Some("5:100"));
		assert_eq!(args.value_of("warning"), Some("5:10,197:1"));
		assert_eq!(args.occurrences_of("verbose"), 2);
		assert!(args.is_present("attributes"));
		assert!(!args.is_present("json"));
	}

	#[test]
	fn unknown_flags() {
		let e = app().get_matches_from_safe(vec!["check_scsi_smart", "-d", "/dev/sg0", "--frobnicate"]).unwrap_err();
		assert_eq!(e.kind, ErrorKind::UnknownArgument);
	}
}

/*!
SMART log directory and Summary SMART error log pages.

See ATA8-ACS, A.19 (SMART Log Directory) and A.20 (Summary SMART Error log).
*/

use crate::ata::SECTOR_SIZE;
use crate::endian;
use super::{check_size, Error};

/// Decoded SMART log directory
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct LogDirectory {
	/// 256 entries; entry `n` is the number of sectors in log at address `n`, except for entry 0, which is the SMART logging version
	pub entries: Vec<u16>,
}

impl LogDirectory {
	pub fn version(&self) -> u16 { self.entries[0] }

	pub fn sectors(&self, address: u8) -> u16 {
		if address == 0 { return 0 }
		self.entries[address as usize]
	}

	/// Sectors in the Summary SMART error log; 0 means the device keeps no such log
	pub fn summary_sectors(&self) -> u16 {
		self.sectors(crate::ata::log_address::SUMMARY)
	}
}

pub fn parse_log_directory(data: &[u8]) -> Result<LogDirectory, Error> {
	check_size("SMART log directory", data, SECTOR_SIZE)?;
	Ok(LogDirectory { entries: endian::words(data) })
}

/// Command that preceded the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct LogCommand {
	pub command: u8,
	pub features: u8,
	/// 24 bits
	pub lba: u32,
	pub count: u8,
	pub device: u8,
	pub device_control: u8,
	/// milliseconds since power-on, wraps around
	pub timestamp: u32,
}

impl LogCommand {
	const LEN: usize = 12;

	// layout: [device control][features][count][lba ×3][device][command][timestamp ×4]
	fn parse(data: &[u8]) -> Self {
		LogCommand {
			device_control: data[0],
			features: data[1],
			count: data[2],
			lba: endian::u32_at(data, 3) & 0xff_ffff,
			device: data[6],
			command: data[7],
			timestamp: endian::u32_at(data, 8),
		}
	}

	/// Unused command slots are zero-filled
	pub fn is_used(&self) -> bool {
		*self != LogCommand::parse(&[0; LogCommand::LEN])
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct LogError {
	pub error: u8,
	pub count: u8,
	/// 24 bits
	pub lba: u32,
	pub device: u8,
	pub status: u8,
	/// vendor-specific
	pub extended: [u8; 19],
	/// upper nibble is the device state (idle, active, standby, sleep…), lower nibble is vendor-specific
	pub state: u8,
	/// hours since power-on
	pub life_timestamp: u16,
}

impl LogError {
	const LEN: usize = 30;

	// layout: [reserved][error][count][lba ×3][device][status][extended ×19][state][timestamp ×2]
	fn parse(data: &[u8]) -> Self {
		let mut extended = [0; 19];
		extended.copy_from_slice(&data[8 .. 27]);

		LogError {
			error: data[1],
			count: data[2],
			lba: endian::u32_at(data, 3) & 0xff_ffff,
			device: data[6],
			status: data[7],
			extended,
			state: data[27],
			life_timestamp: endian::u16_at(data, 28),
		}
	}
}

/// Single error data structure of the summary log: five last commands before the error, and the error itself
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct ErrorData {
	pub commands: Vec<LogCommand>,
	pub error: LogError,
}

impl ErrorData {
	const COMMANDS: usize = 5;
	const LEN: usize = Self::COMMANDS * LogCommand::LEN + LogError::LEN;

	fn parse(data: &[u8]) -> Self {
		let (commands, error) = data.split_at(Self::COMMANDS * LogCommand::LEN);
		ErrorData {
			commands: commands.chunks(LogCommand::LEN).map(LogCommand::parse).collect(),
			error: LogError::parse(error),
		}
	}

	/// Structures that were never written are zero-filled
	pub fn is_used(&self) -> bool {
		self.commands.iter().any(LogCommand::is_used) || self.error.error != 0 || self.error.status != 0 || self.error.life_timestamp != 0
	}
}

/// Decoded sector of the Summary SMART error log
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct LogSummary {
	pub version: u8,
	/// index of the most recent entry in `errors`, 1-based; 0 means there were no errors logged yet
	pub index: u8,
	/// circular buffer of the last five errors
	pub errors: Vec<ErrorData>,
	/// total number of errors ever encountered by the device; saturates at 0xffff
	pub count: u16,
	pub checksum_valid: bool,
}

impl LogSummary {
	const ERRORS: usize = 5;
	const ERRORS_OFFSET: usize = 2;
	const COUNT_OFFSET: usize = Self::ERRORS_OFFSET + Self::ERRORS * ErrorData::LEN;

	/// Error data structures in chronological order, skipping unused ones
	pub fn recent_errors(&self) -> Vec<&ErrorData> {
		if self.index == 0 { return vec![] }

		// index points to the latest entry, so the oldest one is right after it
		let start = (self.index as usize) % Self::ERRORS;
		(0 .. Self::ERRORS)
			.map(|n| &self.errors[(start + n) % Self::ERRORS])
			.filter(|e| e.is_used())
			.collect()
	}
}

pub fn parse_log_summary(data: &[u8]) -> Result<LogSummary, Error> {
	check_size("Summary SMART error log", data, SECTOR_SIZE)?;

	let errors = &data[LogSummary::ERRORS_OFFSET .. LogSummary::COUNT_OFFSET];
	Ok(LogSummary {
		version: data[0],
		index: data[1],
		errors: errors.chunks(ErrorData::LEN).map(ErrorData::parse).collect(),
		count: endian::u16_at(data, LogSummary::COUNT_OFFSET),
		// 454..511 are reserved
		checksum_valid: data.iter().fold(0u8, |sum, &b| sum.wrapping_add(b)) == 0,
	})
}

/// Decodes a buffer of `sectors` consecutive summary log sectors
pub fn parse_log_summaries(data: &[u8], sectors: u16) -> Result<Vec<LogSummary>, Error> {
	check_size("Summary SMART error log", data, sectors as usize * SECTOR_SIZE)?;
	data.chunks(SECTOR_SIZE).map(parse_log_summary).collect()
}

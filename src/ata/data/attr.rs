/*!
SMART READ DATA and SMART READ THRESHOLDS pages.

Both pages hold 30 twelve-byte slots right after a 2-byte revision number. Slots of the threshold page are matched against slots of the data page by position, not by attribute id.
*/

use std::fmt;

use crate::ata::SECTOR_SIZE;
use crate::endian;
use super::{check_size, Error};

/// Number of attribute (and threshold) slots in a page
pub const SLOTS: usize = 30;
const SLOT_LEN: usize = 12;
const SLOTS_OFFSET: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct SmartAttribute {
	/// 0 marks an unused slot
	pub id: u8,
	pub flags: u16,
	/// normalized value; 0x00, 0xfe and 0xff are invalid
	pub value: u8,
	pub worst: u8,
	/// 48-bit raw counter, with vendor-specific high bits masked (see `mask_raw()`)
	pub raw: u64,
}

/**
Strips bits vendors are known to put unrelated data into.

E.g. a lot of drives report min/max temperature in the upper bytes of attributes 190/194, and some report milliseconds next to the power-on hours. Same masks are used by smartmontools' default raw formats for these attributes.
*/
pub fn mask_raw(id: u8, raw: u64) -> u64 {
	match id {
		3 | 5 | 196 => raw & 0xffff, // spin up time, reallocated sectors, reallocation events
		9 | 240 => raw & 0xff_ffff, // power on hours, head flying hours
		190 | 194 => raw & 0xff, // temperature
		_ => raw,
	}
}

impl SmartAttribute {
	fn parse(slot: &[u8]) -> Self {
		let id = slot[0];
		let raw_lo = endian::u32_at(slot, 5) as u64;
		let raw_hi = endian::u16_at(slot, 9) as u64;

		SmartAttribute {
			id,
			flags: endian::u16_at(slot, 1),
			value: slot[3],
			worst: slot[4],
			raw: mask_raw(id, (raw_hi << 32) | raw_lo),
		}
	}

	pub fn is_used(&self) -> bool { self.id != 0 }

	/// Whether `value` can be compared with the threshold
	pub fn value_valid(&self) -> bool { self.value > 0x00 && self.value < 0xfe }

	// if true, failure is predicted within 24h; otherwise, attribute indicates drive's exceeded intended design life period
	pub fn pre_fail(&self)        -> bool { self.flags & (1<<0) != 0 }
	pub fn online(&self)          -> bool { self.flags & (1<<1) != 0 }
	// In SFF-8035i rev 2, bits 2-5 are defined as vendor-specific, and 6-15 are reserved;
	// however, these days the following seems to be universally interpreted the way it was once (probably) established by IBM, Maxtor and Quantum
	pub fn performance(&self)     -> bool { self.flags & (1<<2) != 0 }
	pub fn error_rate(&self)      -> bool { self.flags & (1<<3) != 0 }
	pub fn event_count(&self)     -> bool { self.flags & (1<<4) != 0 }
	pub fn self_preserving(&self) -> bool { self.flags & (1<<5) != 0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct SmartThreshold {
	pub id: u8,
	pub threshold: u8,
}

/// Off-line data collection status (lower 7 bits of byte 362)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum OfflineStatus {
	NeverStarted,
	Completed,
	InProgress,
	Suspended,
	AbortedByHost,
	AbortedByDevice,
	/// reserved or vendor-specific
	Other(u8),
}

impl From<u8> for OfflineStatus {
	fn from(status: u8) -> Self {
		use self::OfflineStatus::*;
		match status & 0x7f {
			0x00 => NeverStarted,
			0x02 => Completed,
			0x03 => InProgress,
			0x04 => Suspended,
			0x05 => AbortedByHost,
			0x06 => AbortedByDevice,
			x => Other(x),
		}
	}
}

impl fmt::Display for OfflineStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use self::OfflineStatus::*;
		match *self {
			NeverStarted => write!(f, "never started"),
			Completed => write!(f, "completed"),
			InProgress => write!(f, "in progress"),
			Suspended => write!(f, "suspended"),
			AbortedByHost => write!(f, "aborted by host"),
			AbortedByDevice => write!(f, "aborted by device"),
			Other(x) => write!(f, "unknown state ({:#04x})", x),
		}
	}
}

/// Decoded SMART READ DATA page
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct SmartData {
	pub revision: u16,
	/// all 30 slots, including unused ones, in the order the device reported them
	pub attributes: Vec<SmartAttribute>,

	pub offline_status: OfflineStatus,
	/// automatic off-line data collection is enabled (byte 362, bit 7)
	pub offline_auto: bool,
	pub self_test_status: u8,
	/// seconds
	pub offline_collection_time: u16,
	pub offline_capability: u8,
	pub smart_capability: u16,
	pub error_logging_capability: u8,
	/// minutes
	pub short_test_time: u8,
	/// minutes; if 0xff, see `extended_test_time_long`
	pub extended_test_time: u8,
	/// minutes
	pub conveyance_test_time: u8,
	pub extended_test_time_long: u16,

	/// all 512 bytes should add up to 0 (mod 256)
	pub checksum_valid: bool,
}

/// Decoded SMART READ THRESHOLDS page
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct SmartThresholds {
	pub revision: u16,
	/// all 30 slots, positionally aligned with `SmartData::attributes`
	pub thresholds: Vec<SmartThreshold>,
	pub checksum_valid: bool,
}

fn checksum_valid(data: &[u8]) -> bool {
	data.iter().fold(0u8, |sum, &b| sum.wrapping_add(b)) == 0
}

fn slots(data: &[u8]) -> impl Iterator<Item = &[u8]> {
	data[SLOTS_OFFSET .. SLOTS_OFFSET + SLOTS * SLOT_LEN].chunks(SLOT_LEN)
}

pub fn parse_smart_data(data: &[u8]) -> Result<SmartData, Error> {
	check_size("SMART data", data, SECTOR_SIZE)?;

	Ok(SmartData {
		revision: endian::u16_at(data, 0),
		attributes: slots(data).map(SmartAttribute::parse).collect(),

		offline_status: OfflineStatus::from(data[362]),
		offline_auto: data[362] & 0x80 != 0,
		self_test_status: data[363],
		offline_collection_time: endian::u16_at(data, 364),
		// 366 is vendor-specific
		offline_capability: data[367],
		smart_capability: endian::u16_at(data, 368),
		error_logging_capability: data[370],
		// 371 is vendor-specific
		short_test_time: data[372],
		extended_test_time: data[373],
		conveyance_test_time: data[374],
		extended_test_time_long: endian::u16_at(data, 375),
		// 377..386 are reserved, 386..511 are vendor-specific

		checksum_valid: checksum_valid(data),
	})
}

pub fn parse_smart_thresholds(data: &[u8]) -> Result<SmartThresholds, Error> {
	check_size("SMART thresholds", data, SECTOR_SIZE)?;

	Ok(SmartThresholds {
		revision: endian::u16_at(data, 0),
		// bytes 2..11 of each slot are reserved
		thresholds: slots(data).map(|slot| SmartThreshold {
			id: slot[0],
			threshold: slot[1],
		}).collect(),
		checksum_valid: checksum_valid(data),
	})
}

use std::fmt;

use crate::ata::SECTOR_SIZE;
use crate::endian;
use super::{check_size, Error};

// ATA strings are stored as big-endian byte pairs within little-endian words
// TODO make sure characters are in the range of 0x20 to (and including) 0x7e
fn read_string(words: &[u16], start: usize, fin: usize) -> String {
	let mut output = String::with_capacity((fin - start + 1) * 2);

	for &word in &words[start ..= fin] {
		output.push((word >> 8) as u8 as char);
		output.push((word & 0xff) as u8 as char);
	}

	String::from(output.trim())
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum Ternary {
	Unsupported, Disabled, Enabled
}

impl fmt::Display for Ternary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			Ternary::Unsupported => write!(f, "not supported"),
			Ternary::Disabled    => write!(f, "supported, disabled"),
			Ternary::Enabled     => write!(f, "supported, enabled"),
		}
	}
}

/// Decoded IDENTIFY DEVICE data.
///
/// Only `smart` matters for the health check; the rest is here for logs and reports.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct Id {
	pub is_ata: bool, // ATAPI devices set w0:15

	pub serial: String,
	pub firmware: String,
	pub model: String,

	pub smart: Ternary,
	pub smart_error_logging_supported: bool,
}

fn is_set(word: u16, bit: usize) -> bool {
	word & (1<<bit) != 0
}

fn make_ternary(data: &[u16], word_sup: usize, bit_sup: usize, word_enabled: usize, bit_enabled: usize) -> Ternary {
	if !is_set(data[word_sup], bit_sup) {
		Ternary::Unsupported
	} else if is_set(data[word_enabled], bit_enabled) {
		Ternary::Enabled
	} else {
		Ternary::Disabled
	}
}

pub fn parse_id(data: &[u8]) -> Result<Id, Error> {
	check_size("IDENTIFY DEVICE data", data, SECTOR_SIZE)?;
	let data = endian::words(data);

	Ok(Id {
		is_ata: !is_set(data[0], 15),

		serial: read_string(&data, 10, 19),
		firmware: read_string(&data, 23, 26),
		model: read_string(&data, 27, 46),

		// w82:0 SMART feature set is supported, w85:0 it is enabled
		smart: make_ternary(&data, 82, 0, 85, 0),
		// XXX mirrored in w87:0
		smart_error_logging_supported: is_set(data[84], 0),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn page(words: &[(usize, u16)]) -> Vec<u8> {
		let mut data = vec![0; 512];
		for &(i, w) in words {
			data[i*2] = w as u8;
			data[i*2 + 1] = (w >> 8) as u8;
		}
		data
	}

	#[test]
	fn smart_support() {
		assert_eq!(parse_id(&page(&[])).unwrap().smart, Ternary::Unsupported);
		// enabled bit alone means nothing
		assert_eq!(parse_id(&page(&[(85, 1)])).unwrap().smart, Ternary::Unsupported);
		assert_eq!(parse_id(&page(&[(82, 1)])).unwrap().smart, Ternary::Disabled);
		assert_eq!(parse_id(&page(&[(82, 0x4001), (85, 0x4001)])).unwrap().smart, Ternary::Enabled);
		// other bits of the same words are irrelevant
		assert_eq!(parse_id(&page(&[(82, 0xfffe), (85, 0xffff)])).unwrap().smart, Ternary::Unsupported);
	}

	#[test]
	fn strings() {
		// "ST1000" + padding, byte-swapped within words
		let mut data = page(&[(0, 0x0040), (84, 0x0001)]);
		data[54 .. 60].copy_from_slice(b"TS0100");
		for b in &mut data[60 .. 94] { *b = b' '; }
		for b in &mut data[20 .. 40] { *b = b' '; }
		data[32 .. 40].copy_from_slice(b"AZ5X0000");

		let id = parse_id(&data).unwrap();
		assert_eq!(id.model, "ST1000");
		assert_eq!(id.serial, "ZAX50000");
		assert!(id.is_ata);
		assert!(id.smart_error_logging_supported);
	}

	#[test]
	fn wrong_size() {
		match parse_id(&[0; 510]) {
			Err(Error::Size(_, 512, 510)) => (),
			x => panic!("unexpected {:?}", x),
		}
	}
}

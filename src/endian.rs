//! Host-order views of little-endian on-wire integers.
//!
//! ATA returns everything in little-endian regardless of the host, so every multi-byte field of every page goes through here.
//!
//! All functions panic if `data` is too short; page decoders check buffer sizes before reading fields.

use byteorder::{ByteOrder, LittleEndian};

#[inline]
pub fn u16_at(data: &[u8], offset: usize) -> u16 {
	LittleEndian::read_u16(&data[offset .. offset + 2])
}

#[inline]
pub fn u32_at(data: &[u8], offset: usize) -> u32 {
	LittleEndian::read_u32(&data[offset .. offset + 4])
}

/// Splits `data` into 16-bit words. Odd trailing byte, if any, is ignored.
pub fn words(data: &[u8]) -> Vec<u16> {
	let mut output = vec![0; data.len() / 2];
	LittleEndian::read_u16_into(&data[.. output.len() * 2], &mut output);
	output
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_little_endian() {
		let data = [0x34, 0x12, 0x78, 0x56, 0xbc, 0x9a];
		assert_eq!(u16_at(&data, 0), 0x1234);
		assert_eq!(u16_at(&data, 1), 0x7812);
		assert_eq!(u32_at(&data, 0), 0x5678_1234);
		assert_eq!(u32_at(&data, 2), 0x9abc_5678);
	}

	#[test]
	fn words_ignore_odd_byte() {
		assert_eq!(words(&[0x01, 0x00, 0xff, 0xee, 0x42]), vec![0x0001, 0xeeff]);
		assert!(words(&[]).is_empty());
	}
}

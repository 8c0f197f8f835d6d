/*!
ATA PASS-THROUGH (16) command descriptor blocks.

See T10/04-262r8a ATA Command Pass-Through, 3.2.3. Layout of the CDB:

```text
byte  0  opcode (85h)
byte  1  [multiple count ×3][protocol ×4][extend]
byte  2  [off_line ×2][ck_cond][t_type][t_dir][byte_block][t_length ×2]
byte  3  features 15:8     byte  4  features 7:0
byte  5  count 15:8        byte  6  count 7:0
byte  7  lba 31:24         byte  8  lba 7:0
byte  9  lba 39:32         byte 10  lba 15:8
byte 11  lba 47:40         byte 12  lba 23:16
byte 13  device            byte 14  command
byte 15  control
```

Sub-byte fields are described by [`BitField`](struct.BitField.html)s below rather than by struct layout, so the table here is the only place the wire format is defined.
*/

use super::{Command, SMARTFeature, SECTOR_SIZE, log_address};

/// opcode: ATA PASS-THROUGH (16)
pub const OPCODE: u8 = 0x85;

/// Position of a sub-byte field within the CDB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
	pub byte: usize,
	pub shift: u8,
	pub width: u8,
}

impl BitField {
	#[inline]
	fn mask(self) -> u8 {
		((1u16 << self.width) - 1) as u8
	}

	pub fn get(self, cdb: &[u8; 16]) -> u8 {
		(cdb[self.byte] >> self.shift) & self.mask()
	}

	/// Stores `value` in the field; bits not fitting into the field are dropped
	pub fn set(self, cdb: &mut [u8; 16], value: u8) {
		let mask = self.mask() << self.shift;
		cdb[self.byte] = (cdb[self.byte] & !mask) | ((value << self.shift) & mask);
	}
}

pub const EXTEND:         BitField = BitField { byte: 1, shift: 0, width: 1 };
pub const PROTOCOL:       BitField = BitField { byte: 1, shift: 1, width: 4 };
pub const MULTIPLE_COUNT: BitField = BitField { byte: 1, shift: 5, width: 3 };
pub const T_LENGTH:       BitField = BitField { byte: 2, shift: 0, width: 2 };
pub const BYTE_BLOCK:     BitField = BitField { byte: 2, shift: 2, width: 1 };
pub const T_DIR:          BitField = BitField { byte: 2, shift: 3, width: 1 };
pub const T_TYPE:         BitField = BitField { byte: 2, shift: 4, width: 1 };
pub const CK_COND:        BitField = BitField { byte: 2, shift: 5, width: 1 };
pub const OFF_LINE:       BitField = BitField { byte: 2, shift: 6, width: 2 };

const FEATURES: (usize, usize) = (3, 4); // (15:8, 7:0)
const COUNT: (usize, usize) = (5, 6); // (15:8, 7:0)
/// (byte, lowest bit of the LBA stored in that byte), in wire order
const LBA: [(usize, u32); 6] = [(7, 24), (8, 0), (9, 32), (10, 8), (11, 40), (12, 16)];
const DEVICE: usize = 13;
const COMMAND: usize = 14;
const CONTROL: usize = 15;

/// Values of the PROTOCOL field
pub mod protocol {
	pub const NON_DATA: u8 = 3;
	pub const PIO_DATA_IN: u8 = 4;
	pub const PIO_DATA_OUT: u8 = 5;
}

/// T_DIR: transfer from the ATA device
pub const T_DIR_FROM_DEVICE: u8 = 1;
/// BYTE_BLOCK: transfer length is in blocks, not in bytes
pub const BYTE_BLOCK_BLOCKS: u8 = 1;
/// T_TYPE: blocks are 512 bytes long (as opposed to logical sector size of the device)
pub const T_TYPE_512: u8 = 0;
/// T_LENGTH: transfer length is specified in the COUNT field
pub const T_LENGTH_COUNT: u8 = 2;

/// ATA SMART commands are only accepted with these in LBA 15:8 and LBA 23:16
pub const SMART_LBA_MID: u8 = 0x4f;
pub const SMART_LBA_HIGH: u8 = 0xc2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandBlock {
	pub extend: u8,
	pub protocol: u8,
	pub multiple_count: u8,
	pub t_length: u8,
	pub byte_block: u8,
	pub t_dir: u8,
	pub t_type: u8,
	pub ck_cond: u8,
	pub off_line: u8,
	pub features: u16,
	pub count: u16,
	/// only lower 48 bits are used
	pub lba: u64,
	pub device: u8,
	pub command: u8,
	pub control: u8,
}

impl CommandBlock {
	pub fn to_bytes(&self) -> [u8; 16] {
		let mut cdb = [0; 16];
		cdb[0] = OPCODE;

		EXTEND.set(&mut cdb, self.extend);
		PROTOCOL.set(&mut cdb, self.protocol);
		MULTIPLE_COUNT.set(&mut cdb, self.multiple_count);
		T_LENGTH.set(&mut cdb, self.t_length);
		BYTE_BLOCK.set(&mut cdb, self.byte_block);
		T_DIR.set(&mut cdb, self.t_dir);
		T_TYPE.set(&mut cdb, self.t_type);
		CK_COND.set(&mut cdb, self.ck_cond);
		OFF_LINE.set(&mut cdb, self.off_line);

		cdb[FEATURES.0] = (self.features >> 8) as u8;
		cdb[FEATURES.1] = self.features as u8;
		cdb[COUNT.0] = (self.count >> 8) as u8;
		cdb[COUNT.1] = self.count as u8;
		for &(byte, shift) in LBA.iter() {
			cdb[byte] = (self.lba >> shift) as u8;
		}
		cdb[DEVICE] = self.device;
		cdb[COMMAND] = self.command;
		cdb[CONTROL] = self.control;

		cdb
	}

	/// Reverse of `to_bytes()`; returns `None` if `cdb` is not an ATA PASS-THROUGH (16) command
	pub fn from_bytes(cdb: &[u8; 16]) -> Option<Self> {
		if cdb[0] != OPCODE { return None }

		Some(CommandBlock {
			extend: EXTEND.get(cdb),
			protocol: PROTOCOL.get(cdb),
			multiple_count: MULTIPLE_COUNT.get(cdb),
			t_length: T_LENGTH.get(cdb),
			byte_block: BYTE_BLOCK.get(cdb),
			t_dir: T_DIR.get(cdb),
			t_type: T_TYPE.get(cdb),
			ck_cond: CK_COND.get(cdb),
			off_line: OFF_LINE.get(cdb),
			features: ((cdb[FEATURES.0] as u16) << 8) | cdb[FEATURES.1] as u16,
			count: ((cdb[COUNT.0] as u16) << 8) | cdb[COUNT.1] as u16,
			lba: LBA.iter().fold(0, |lba, &(byte, shift)| lba | ((cdb[byte] as u64) << shift)),
			device: cdb[DEVICE],
			command: cdb[COMMAND],
			control: cdb[CONTROL],
		})
	}
}

/// ATA commands this crate knows how to tunnel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
	Identify,
	SmartReadData,
	SmartReadThresholds,
	SmartReadLog { address: u8, sectors: u16 },
}

impl CommandKind {
	pub fn log_directory() -> Self {
		CommandKind::SmartReadLog { address: log_address::DIRECTORY, sectors: 1 }
	}

	pub fn log_summary(sectors: u16) -> Self {
		CommandKind::SmartReadLog { address: log_address::SUMMARY, sectors }
	}

	/// Number of sectors the device is expected to return
	pub fn sectors(&self) -> u16 {
		match *self {
			CommandKind::SmartReadLog { sectors, .. } => sectors,
			_ => 1,
		}
	}

	/// Size of the buffer the device is expected to fill, in bytes
	pub fn data_len(&self) -> usize {
		self.sectors() as usize * SECTOR_SIZE
	}

	/// Returns the command block along with the response length in sectors
	pub fn encode(&self) -> (CommandBlock, u16) {
		// every command here is a PIO Data-In one that transfers whole 512-byte sectors, with the length taken from the COUNT field
		let pio_in = CommandBlock {
			protocol: protocol::PIO_DATA_IN,
			t_dir: T_DIR_FROM_DEVICE,
			byte_block: BYTE_BLOCK_BLOCKS,
			t_type: T_TYPE_512,
			t_length: T_LENGTH_COUNT,
			count: self.sectors(),
			..Default::default()
		};
		let smart = |feature: SMARTFeature, lba_low: u8| CommandBlock {
			command: Command::SMART as u8,
			features: feature as u16,
			lba: ((SMART_LBA_HIGH as u64) << 16) | ((SMART_LBA_MID as u64) << 8) | lba_low as u64,
			..pio_in
		};

		let cdb = match *self {
			CommandKind::Identify => CommandBlock {
				command: Command::Identify as u8,
				..pio_in
			},
			CommandKind::SmartReadData => smart(SMARTFeature::ReadValues, 0),
			CommandKind::SmartReadThresholds => smart(SMARTFeature::ReadThresholds, 0),
			CommandKind::SmartReadLog { address, .. } => smart(SMARTFeature::ReadLog, address),
		};

		(cdb, self.sectors())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identify() {
		let (cdb, sectors) = CommandKind::Identify.encode();
		assert_eq!(sectors, 1);
		assert_eq!(cdb.to_bytes(), [
			0x85, 0x08, 0x0e,
			0, 0, // features
			0, 1, // count
			0, 0, 0, 0, 0, 0, // lba
			0, 0xec, 0,
		]);
	}

	#[test]
	fn smart_read_data_and_thresholds() {
		for &(kind, feature) in &[
			(CommandKind::SmartReadData, 0xd0),
			(CommandKind::SmartReadThresholds, 0xd1),
		] {
			let (cdb, sectors) = kind.encode();
			assert_eq!(sectors, 1);
			assert_eq!(cdb.to_bytes(), [
				0x85, 0x08, 0x0e,
				0, feature,
				0, 1,
				0, 0, 0, 0x4f, 0, 0xc2,
				0, 0xb0, 0,
			]);
		}
	}

	#[test]
	fn smart_read_log() {
		let (cdb, sectors) = CommandKind::SmartReadLog { address: 0x01, sectors: 0x0102 }.encode();
		assert_eq!(sectors, 0x0102);
		assert_eq!(cdb.to_bytes(), [
			0x85, 0x08, 0x0e,
			0, 0xd5,
			0x01, 0x02,
			0, 0x01, 0, 0x4f, 0, 0xc2,
			0, 0xb0, 0,
		]);

		let (dir, sectors) = CommandKind::log_directory().encode();
		assert_eq!(sectors, 1);
		let bytes = dir.to_bytes();
		assert_eq!(bytes[8], 0); // lba 7:0 is the log address
		assert_eq!((bytes[5], bytes[6]), (0, 1));
	}

	#[test]
	fn fixed_fields_for_every_kind() {
		for kind in &[
			CommandKind::Identify,
			CommandKind::SmartReadData,
			CommandKind::SmartReadThresholds,
			CommandKind::log_directory(),
			CommandKind::log_summary(2),
		] {
			let bytes = kind.encode().0.to_bytes();
			assert_eq!(bytes[0], OPCODE);
			assert_eq!(PROTOCOL.get(&bytes), protocol::PIO_DATA_IN);
			assert_eq!(T_DIR.get(&bytes), 1);
			assert_eq!(T_LENGTH.get(&bytes), 2);
			assert_eq!(BYTE_BLOCK.get(&bytes), 1);
			assert_eq!(T_TYPE.get(&bytes), 0);
			assert_eq!(CK_COND.get(&bytes), 0);
			if *kind != CommandKind::Identify {
				assert_eq!(bytes[12], SMART_LBA_HIGH);
				assert_eq!(bytes[10], SMART_LBA_MID);
			}
		}
	}

	#[test]
	fn sub_byte_fields_do_not_overlap() {
		let cdb = CommandBlock {
			extend: 1,
			protocol: 0b1010,
			multiple_count: 0b101,
			t_length: 0b11,
			byte_block: 0,
			t_dir: 1,
			t_type: 0,
			ck_cond: 1,
			off_line: 0b10,
			features: 0xabcd,
			count: 0x1234,
			lba: 0x0605_0403_0201,
			device: 0x40,
			command: 0x25,
			control: 0,
		};
		let bytes = cdb.to_bytes();
		assert_eq!(bytes[1], 0b101_1010_1);
		assert_eq!(bytes[2], 0b10_1_0_1_0_11);
		assert_eq!(&bytes[7 .. 13], &[0x04, 0x01, 0x05, 0x02, 0x06, 0x03]);
		assert_eq!(CommandBlock::from_bytes(&bytes), Some(cdb));
	}

	#[test]
	fn oversized_values_are_truncated() {
		let mut bytes = [0; 16];
		PROTOCOL.set(&mut bytes, 0xff);
		assert_eq!(bytes[1], 0b0001_1110);
		assert_eq!(EXTEND.get(&bytes), 0);
		assert_eq!(MULTIPLE_COUNT.get(&bytes), 0);
	}

	#[test]
	fn not_a_pass_through() {
		let mut bytes = CommandKind::Identify.encode().0.to_bytes();
		bytes[0] = 0xa1; // ATA PASS-THROUGH (12)
		assert_eq!(CommandBlock::from_bytes(&bytes), None);
	}
}

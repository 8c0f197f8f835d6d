/*!
Sense data, in both fixed (70h/71h) and descriptor (72h/73h) formats.

Only the key code qualifier is decoded here: this is all it takes to tell whether the SAT layer refused to pass the command through.
*/

/// Sense key descriptions, as seen in SPC-4, 4.5.6, table 43
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenseKey {
	/// No Sense: indicates successful command execution
	Ok,
	/// Recovered Error: still indicates successfully executed command but with some recovery action performed
	Recovered,
	/// Not Ready: the logical unit is not accessible
	NotReady,
	/// Medium Error: usually indicates unrecoverable errors caused by damaged media
	MediumError,
	/// Hardware Error: unrecoverable non-medium failure (controller/CRC/…)
	HardwareError,
	/// Illegal Request: invalid LUN/task attribute/parameter/…; this is what SAT layers that do not support ATA PASS-THROUGH reply with
	IllegalRequest,
	/// Unit Attention: removable medium change, logical unit reset etc.
	UnitAttention,
	DataProtect,
	BlankCheck,
	VendorSpecific,
	AbortedCopy,
	/// Aborted Command: client may be able to recover by trying the command again
	AbortedCommand,
	Reserved,
	VolumeOverflow,
	Miscompare,
	/// Completed: completion sense data report; also may occur for successful command
	Completed,
}

impl From<u8> for SenseKey {
	fn from(key: u8) -> Self {
		use self::SenseKey::*;
		match key & 0x0f {
			0x0 => Ok,
			0x1 => Recovered,
			0x2 => NotReady,
			0x3 => MediumError,
			0x4 => HardwareError,
			0x5 => IllegalRequest,
			0x6 => UnitAttention,
			0x7 => DataProtect,
			0x8 => BlankCheck,
			0x9 => VendorSpecific,
			0xa => AbortedCopy,
			0xb => AbortedCommand,
			0xc => Reserved,
			0xd => VolumeOverflow,
			0xe => Miscompare,
			_ => Completed,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format { Fixed, Descriptor }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sense {
	pub format: Format,
	/// current (as opposed to deferred) error
	pub current: bool,
	pub key: u8,
	/// Additional Sense Code
	pub asc: u8,
	/// Additional Sense Code Qualifier
	pub ascq: u8,
}

impl Sense {
	pub fn sense_key(&self) -> SenseKey { SenseKey::from(self.key) }

	/// Whether the command should be considered failed
	pub fn is_error(&self) -> bool {
		match self.sense_key() {
			SenseKey::Ok | SenseKey::Recovered => false,
			_ => true,
		}
	}
}

/**
Parses sense data of any of the supported formats (70h–73h).

Sense key is all that is required; ASC and ASCQ are reported as 0 if `data` is too short to hold them, which is legal for sense with zero additional length.

Returns `None` if format is not recognized, or if `data` buffer is too short to hold the sense key.
*/
pub fn parse(data: &[u8]) -> Option<Sense> {
	let (format, current) = match data.first()? & 0x7f {
		0x70 => (Format::Fixed, true),
		0x71 => (Format::Fixed, false),
		0x72 => (Format::Descriptor, true),
		0x73 => (Format::Descriptor, false),
		_ => return None,
	};

	let (key, asc, ascq) = match format {
		Format::Fixed => (2, 12, 13),
		Format::Descriptor => (1, 2, 3),
	};
	if data.len() < 3 {
		return None;
	}
	let byte = |i: usize| data.get(i).copied().unwrap_or(0);

	Some(Sense {
		format,
		current,
		key: data[key] & 0x0f,
		asc: byte(asc),
		ascq: byte(ascq),
	})
}

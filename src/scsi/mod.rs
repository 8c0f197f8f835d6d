/*!
All things SCSI.

* Implement (or import) [`SCSIDevice`](trait.SCSIDevice.html) to send SCSI commands to the [`Device`](../device/index.html).
* Use [`sense` module](sense/index.html) to make sense (heh) of errors reported by the device.
*/

pub mod sense;

#[cfg(target_os = "linux")]
mod linux;

use std::io;

use crate::ata::cdb::CommandKind;
use crate::utils::hexdump;

/// Size of the sense buffer passed along with every command
pub const SENSE_LEN: u8 = 32;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		IO(err: io::Error) {
			from()
			display("IO error: {}", err)
			source(err)
		}
		/// SCSI status other than GOOD/CHECK CONDITION, or a failure reported by the host adapter or its driver
		Status(status: u8, host: u16, driver: u16) {
			display("command failed: SCSI status {:#04x}, host status {:#06x}, driver status {:#06x}", status, host, driver)
		}
		/// Sense key indicating command failure (e.g. ILLEGAL REQUEST from a SAT layer that does not know ATA PASS-THROUGH)
		Sense(key: u8, asc: u8, ascq: u8) {
			display("command failed: sense key {:#03x}, asc {:#04x}, ascq {:#04x}", key, asc, ascq)
		}
		/// Sense data in a format we cannot decode; the command is assumed to have failed
		UnknownSense(sense: Vec<u8>) {
			display("command failed with unrecognized sense data {:02x?}", sense)
		}
	}
}

pub trait SCSIDevice {
	/**
	Executes `cmd`, reading up to `data_len` bytes from the device, and returns tuple of `(sense, data)`.

	Non-empty sense means the command ended with CHECK CONDITION. Implementations must fail with [`Error::Status`](enum.Error.html) rather than return CHECK CONDITION without any sense.
	*/
	fn do_cmd(&self, cmd: &[u8], sense_len: u8, data_len: usize) -> Result<(Vec<u8>, Vec<u8>), Error>;

	/**
	Tunnels ATA command `kind` through ATA PASS-THROUGH (16), and returns whatever data the device sent back.

	Sense data, if any, is checked for errors; sense that cannot be parsed fails the command.
	*/
	fn ata_pass_through_16(&self, kind: &CommandKind) -> Result<Vec<u8>, Error> {
		let (cdb, _) = kind.encode();
		let cdb = cdb.to_bytes();
		debug!("{:?}: CDB {:02x?}", kind, cdb);

		let (sense, data) = self.do_cmd(&cdb, SENSE_LEN, kind.data_len())?;

		if !sense.is_empty() {
			match sense::parse(&sense) {
				Some(s) if s.is_error() => {
					return Err(Error::Sense(s.key, s.asc, s.ascq));
				},
				Some(s) => debug!("{:?}: sense {:?}", kind, s),
				None => {
					warn!("{:?}: unable to parse sense data:{}", kind, hexdump(&sense));
					return Err(Error::UnknownSense(sense));
				},
			}
		}

		debug!("{:?}: {} bytes of data:{}", kind, data.len(), hexdump(&data));
		Ok(data)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;

	struct Canned {
		sense: Vec<u8>,
		cdbs: RefCell<Vec<Vec<u8>>>,
	}

	impl SCSIDevice for Canned {
		fn do_cmd(&self, cmd: &[u8], sense_len: u8, data_len: usize) -> Result<(Vec<u8>, Vec<u8>), Error> {
			assert_eq!(sense_len, SENSE_LEN);
			self.cdbs.borrow_mut().push(cmd.to_vec());
			Ok((self.sense.clone(), vec![0xa5; data_len]))
		}
	}

	fn canned(sense: Vec<u8>) -> Canned {
		Canned { sense, cdbs: RefCell::new(vec![]) }
	}

	#[test]
	fn passes_data_through() {
		let dev = canned(vec![]);
		let data = dev.ata_pass_through_16(&CommandKind::log_summary(3)).unwrap();
		assert_eq!(data.len(), 3 * 512);

		let cdbs = dev.cdbs.borrow();
		assert_eq!(cdbs.len(), 1);
		assert_eq!(cdbs[0], CommandKind::log_summary(3).encode().0.to_bytes().to_vec());
	}

	#[test]
	fn failed_sense() {
		let mut sense = vec![0; 18];
		sense[0] = 0x70;
		sense[2] = 0x05; // ILLEGAL REQUEST
		sense[7] = 10;
		sense[12] = 0x20;

		match canned(sense).ata_pass_through_16(&CommandKind::Identify) {
			Err(Error::Sense(5, 0x20, 0)) => (),
			x => panic!("unexpected {:?}", x),
		}
	}

	#[test]
	fn short_sense() {
		// fixed format without additional sense bytes
		match canned(vec![0x70, 0, 0x05, 0, 0, 0, 0, 0]).ata_pass_through_16(&CommandKind::Identify) {
			Err(Error::Sense(5, 0, 0)) => (),
			x => panic!("unexpected {:?}", x),
		}
	}

	#[test]
	fn garbage_sense() {
		match canned(vec![0xff; 4]).ata_pass_through_16(&CommandKind::Identify) {
			Err(Error::UnknownSense(ref sense)) => assert_eq!(sense, &vec![0xff; 4]),
			x => panic!("unexpected {:?}", x),
		}
		assert!(canned(vec![0x70, 0]).ata_pass_through_16(&CommandKind::Identify).is_err());
	}

	#[test]
	fn harmless_sense() {
		// RECOVERED ERROR, ATA PASS THROUGH INFORMATION AVAILABLE
		let sense = vec![0x72, 0x01, 0x00, 0x1d, 0, 0, 0, 0];
		assert!(canned(sense).ata_pass_through_16(&CommandKind::Identify).is_ok());

		// NO SENSE
		assert!(canned(vec![0x70, 0, 0x00]).ata_pass_through_16(&CommandKind::Identify).is_ok());
	}
}

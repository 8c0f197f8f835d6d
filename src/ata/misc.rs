use crate::scsi::{self, SCSIDevice};

use super::cdb::CommandKind;
use super::data::{self, id, attr, log};

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		SCSI(err: scsi::Error) {
			from()
			display("{}", err)
			source(err)
		}
		Size(err: data::Error) {
			from()
			display("{}", err)
			source(err)
		}
	}
}

/// Typical ATA commands, issued against anything that can run them, with their replies decoded
pub trait Misc {
	/// Executes `kind`, returning raw data sent by the device
	fn ata_do(&self, kind: &CommandKind) -> Result<Vec<u8>, Error>;

	fn get_device_id(&self) -> Result<id::Id, Error> {
		let data = self.ata_do(&CommandKind::Identify)?;
		Ok(id::parse_id(&data)?)
	}

	fn get_smart_data(&self) -> Result<attr::SmartData, Error> {
		let data = self.ata_do(&CommandKind::SmartReadData)?;
		Ok(attr::parse_smart_data(&data)?)
	}

	fn get_smart_thresholds(&self) -> Result<attr::SmartThresholds, Error> {
		let data = self.ata_do(&CommandKind::SmartReadThresholds)?;
		Ok(attr::parse_smart_thresholds(&data)?)
	}

	fn get_smart_log_directory(&self) -> Result<log::LogDirectory, Error> {
		let data = self.ata_do(&CommandKind::log_directory())?;
		Ok(log::parse_log_directory(&data)?)
	}

	/// Reads `sectors` sectors of the Summary SMART error log; the buffer is dropped once decoded
	fn get_smart_log_summaries(&self, sectors: u16) -> Result<Vec<log::LogSummary>, Error> {
		let data = self.ata_do(&CommandKind::log_summary(sectors))?;
		Ok(log::parse_log_summaries(&data, sectors)?)
	}
}

impl<T: SCSIDevice> Misc for T {
	fn ata_do(&self, kind: &CommandKind) -> Result<Vec<u8>, Error> {
		Ok(self.ata_pass_through_16(kind)?)
	}
}

/*!
All things ATA.

* [`cdb`](cdb/index.html) builds ATA PASS-THROUGH (16) command blocks out of ATA commands.
* [`data`](data/index.html) parses pages returned by those commands.
* Import [`Misc`](misc/trait.Misc.html) to issue typical commands against a [`SCSIDevice`](../scsi/trait.SCSIDevice.html) and get decoded pages back.
*/

pub mod cdb;
pub mod data;
pub mod misc;

/// Size of a single data block transferred by all commands issued here
pub const SECTOR_SIZE: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	Identify = 0xec,
	SMART = 0xb0,
}

/// Subcommands of `Command::SMART`, passed in the features register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SMARTFeature {
	ReadValues = 0xd0, // in ATA8-ACS it's called 'SMART READ DATA'
	ReadThresholds = 0xd1, // obsolete since ATA/ATAPI-7, yet still answered by most drives
	ReadLog = 0xd5,
}

/// SMART log addresses (ATA8-ACS, A.1)
pub mod log_address {
	/// Log directory; entry 0 of the directory is its own version
	pub const DIRECTORY: u8 = 0x00;
	/// Summary SMART error log
	pub const SUMMARY: u8 = 0x01;
}

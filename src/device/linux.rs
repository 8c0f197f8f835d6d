use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use libc::{c_int, ioctl};

#[cfg(not(any(target_env = "musl")))]
use libc::c_ulong;

use super::Error;

// see scsi/sg.h
#[cfg(not(any(target_env = "musl")))]
const SG_GET_VERSION_NUM: c_ulong = 0x2282;
#[cfg(any(target_env = "musl"))]
const SG_GET_VERSION_NUM: c_int = 0x2282;

/// sg driver version 3.0.0 introduced the SG_IO ioctl
const SG_MIN_VERSION: c_int = 30000;

/// See [parent module docs](../index.html)
#[derive(Debug)]
pub struct Device {
	pub file: File,
}

impl Device {
	/// Opens SCSI generic device at `path` (e.g. `/dev/sg0`, or `/dev/sda` for that matter) for reading and writing, which is what SG_IO requires.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
		let path = path.as_ref();

		let file = OpenOptions::new()
			.read(true)
			.write(true)
			.open(path)
			.map_err(|err| Error::Open(path.to_path_buf(), err))?;

		let mut version: c_int = 0;
		let ret = unsafe {
			ioctl(file.as_raw_fd(), SG_GET_VERSION_NUM, &mut version as *mut c_int)
		};
		if ret < 0 || version < SG_MIN_VERSION {
			return Err(Error::NotSG(path.to_path_buf()));
		}
		debug!("{}: sg driver version {}", path.display(), version);

		Ok(Device { file })
	}
}

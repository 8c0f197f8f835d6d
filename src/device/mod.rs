/*!
Thin wrapper for platform-specific device handle.

This module (and struct it provides) allows opening (`Device::open(&path)`) and interacting with (via [`scsi::SCSIDevice`](../scsi/trait.SCSIDevice.html) trait) SCSI generic devices. The handle is closed once `Device` is dropped.

## Example

See [parent module](../index.html).
*/

use std::io;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "linux")]
pub use self::linux::*;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		Open(path: PathBuf, err: io::Error) {
			display("unable to open device {}: {}", path.display(), err)
			source(err)
		}
		NotSG(path: PathBuf) {
			display("{} is either not an sg device, or the driver is old", path.display())
		}
	}
}

use libc::{c_int, c_uint, c_uchar, c_ushort, c_void};

use libc::ioctl;
use std::ptr;

#[cfg(not(any(target_env = "musl")))]
use libc::c_ulong;

use std::os::unix::io::AsRawFd;
use std::io;

use crate::device::Device;
use super::{SCSIDevice, Error};

use std::cmp::max;

// see scsi/sg.h

#[cfg(not(any(target_env = "musl")))]
const SG_IO: c_ulong = 0x2285;

#[cfg(any(target_env = "musl"))]
const SG_IO: c_int = 0x2285;

// SG_DXFER_FROM_DEV; nothing here ever sends data to the device
const SG_DXFER_FROM_DEV: c_int = -3;

/// Milliseconds to wait for a single command to complete
const TIMEOUT: c_uint = 10000;

// SCSI status codes (SAM-5, 5.3.1)
const STATUS_GOOD: u8 = 0x00;
const STATUS_CHECK_CONDITION: u8 = 0x02;

// DRIVER_SENSE (0x08) is set whenever there's sense data, the rest of the lower nibble indicates actual driver errors
const DRIVER_STATUS_MASK: c_ushort = 0x07;

#[repr(C)]
#[derive(Debug)]
struct sg_io_hdr {
	interface_id:	c_int,	// [i] 'S' for SCSI generic (required)
	dxfer_direction:	c_int,	// [i] data transfer direction
	cmd_len:	c_uchar,	// [i] SCSI command length ( <= 16 bytes)
	mx_sb_len:	c_uchar,	// [i] max length to write to sbp
	iovec_count:	c_ushort,	// [i] 0 implies no scatter gather
	dxfer_len:	c_uint,	// [i] byte count of data transfer
	dxferp:	*mut c_void,	// [i], [*io] points to data transfer memory or scatter gather list
	cmdp:	*const c_uchar,	// [i], [*i] points to command to perform
	sbp:	*mut c_uchar,	// [i], [*o] points to sense_buffer memory
	timeout:	c_uint,	// [i] MAX_UINT->no timeout (unit: millisec)
	flags:	c_uint,	// [i] 0 -> default, see SG_FLAG...
	pack_id:	c_int,	// [i->o] unused internally (normally)
	usr_ptr:	*mut c_void,	// [i->o] unused internally
	status:	c_uchar,	// [o] scsi status
	masked_status:	c_uchar,	// [o] shifted, masked scsi status
	msg_status:	c_uchar,	// [o] messaging level data (optional)
	sb_len_wr:	c_uchar,	// [o] byte count actually written to sbp
	host_status:	c_ushort,	// [o] errors from host adapter
	driver_status:	c_ushort,	// [o] errors from software driver
	resid:	c_int,	// [o] dxfer_len - actual_transferred
	duration:	c_uint,	// [o] time taken by cmd (unit: millisec)
	info:	c_uint,	// [o] auxiliary information
}

impl SCSIDevice for Device {
	fn do_cmd(&self, cmd: &[u8], sense_len: u8, data_len: usize) -> Result<(Vec<u8>, Vec<u8>), Error> {
		let mut sense = vec![0; sense_len as usize];
		let mut data = vec![0; data_len];

		let mut hdr = sg_io_hdr {
			interface_id:	'S' as c_int,

			dxfer_direction:	SG_DXFER_FROM_DEV,
			dxferp:	data.as_mut_ptr() as *mut c_void,
			dxfer_len:	data.len() as c_uint,
			resid:	0,

			sbp:	sense.as_mut_ptr(),
			mx_sb_len:	sense_len,
			sb_len_wr:	0,

			cmdp:	cmd.as_ptr(),
			cmd_len:	cmd.len() as c_uchar,

			status:	0,
			host_status:	0,
			driver_status:	0,

			timeout:	TIMEOUT,
			duration:	0,

			iovec_count:	0,
			flags:	0,
			pack_id:	0,
			usr_ptr:	ptr::null_mut(),
			masked_status:	0,
			msg_status:	0,
			info:	0,
		};

		unsafe {
			if ioctl(self.file.as_raw_fd(), SG_IO, &mut hdr as *mut sg_io_hdr) == -1 {
				return Err(io::Error::last_os_error().into());
			}
		}

		trace!("SG_IO: status {:#04x}, host {:#06x}, driver {:#06x}, resid {}, took {} ms",
			hdr.status, hdr.host_status, hdr.driver_status, hdr.resid, hdr.duration);

		check_status(&hdr)?;

		// > In practice [resid] only reports underruns (i.e. positive number) as data overruns should never happen
		// but I'd still not cast i32 to u32 blindly, just to be sure
		let data_len = hdr.dxfer_len.saturating_sub(max(hdr.resid, 0) as u32);

		sense.truncate(hdr.sb_len_wr as usize);
		data.truncate(data_len as usize);

		Ok((sense, data))
	}
}

/// Fails unless the command either succeeded, or ended with CHECK CONDITION that left some sense data to look at
fn check_status(hdr: &sg_io_hdr) -> Result<(), Error> {
	let failed = hdr.host_status != 0
		|| hdr.driver_status & DRIVER_STATUS_MASK != 0
		|| match hdr.status {
			STATUS_GOOD => false,
			STATUS_CHECK_CONDITION => hdr.sb_len_wr == 0,
			_ => true,
		};

	if failed {
		return Err(Error::Status(hdr.status, hdr.host_status, hdr.driver_status));
	}
	Ok(())
}

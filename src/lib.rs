/*!
This crate checks the health of ATA drives that are only reachable through a SCSI generic device, by tunnelling ATA commands inside ATA PASS-THROUGH (16) CDBs (SCSI/ATA Translation, SAT), and turning the S.M.A.R.T. data they return into a Nagios/Icinga verdict.

## Example

```no_run
use check_scsi_smart::Device;
use check_scsi_smart::smart::check::{check, CheckOptions, Outcome};
use check_scsi_smart::smart::thresholds;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let dev = Device::open("/dev/sg0")?;

let options = CheckOptions {
	critical: thresholds::parse("5:100")?,
	warning: thresholds::parse("5:10,197:1")?,
};

match check(&dev, &options)? {
	Outcome::Unsupported => println!("OK: SMART feature set unsupported"),
	Outcome::Disabled => println!("UNKNOWN: SMART feature set disabled"),
	Outcome::Evaluated(report) => println!("{}", report.status_line()),
}
# Ok(())
# }
```

Layers, bottom to top:

* [`endian`](endian/index.html): little-endian on-wire integers,
* [`ata::cdb`](ata/cdb/index.html): ATA PASS-THROUGH command blocks,
* [`ata::data`](ata/data/index.html): IDENTIFY, SMART data/thresholds and SMART log pages,
* [`scsi`](scsi/index.html): the transport, i.e. anything that can execute a CDB,
* [`smart`](smart/index.html): evaluation, log aggregation, threshold overrides and the check itself.
*/

#![warn(missing_debug_implementations)]

#[cfg(feature = "serializable")]
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

pub mod device;
pub use crate::device::Device;

pub mod endian;
pub mod utils;

pub mod ata;
pub mod scsi;

pub mod smart;

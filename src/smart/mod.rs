/*!
S.M.A.R.T. health evaluation on top of decoded ATA pages.

* [`check`](check/index.html) runs the whole thing against a device,
* [`eval`](eval/index.html) judges attributes, [`log`](log/index.html) counts logged errors,
* [`thresholds`](thresholds/index.html) parses user-supplied raw value thresholds,
* [`names`](names/index.html) maps attribute ids to perfdata labels.
*/

pub mod check;
pub mod eval;
pub mod log;
pub mod names;
pub mod status;
pub mod thresholds;

pub use self::status::Status;

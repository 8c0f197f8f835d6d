use std::fmt;

/// Nagios plugin status, ordered by severity (except for `Unknown`, which is special)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum Status {
	OK,
	Warning,
	Critical,
	Unknown,
}

impl Status {
	pub fn exit_code(self) -> i32 {
		match self {
			Status::OK => 0,
			Status::Warning => 1,
			Status::Critical => 2,
			Status::Unknown => 3,
		}
	}

	fn severity(self) -> u8 {
		match self {
			Status::OK => 0,
			Status::Warning => 1,
			Status::Unknown => 2,
			Status::Critical => 3,
		}
	}

	/// Returns the more severe of two statuses; CRITICAL beats UNKNOWN, which beats WARNING
	pub fn worst(self, other: Status) -> Status {
		if other.severity() > self.severity() { other } else { self }
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", match *self {
			Status::OK => "OK",
			Status::Warning => "WARNING",
			Status::Critical => "CRITICAL",
			Status::Unknown => "UNKNOWN",
		})
	}
}

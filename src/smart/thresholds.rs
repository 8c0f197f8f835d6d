/*!
Per-attribute raw value thresholds, as given on the command line.

The format is a comma-separated list of `ID:VALUE` pairs, e.g. `5:10,197:1`, where both `ID` (0–255) and `VALUE` are non-negative decimal integers.
*/

use std::collections::HashMap;

use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map_res};
use nom::multi::separated_list0;
use nom::sequence::separated_pair;
use nom::IResult;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		Parse(input: String) {
			display("malformed threshold list: {:?}", input)
		}
	}
}

/// Attribute id → raw value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct ThresholdMap(HashMap<u8, u64>);

impl ThresholdMap {
	/**
	Returns threshold configured for attribute `id`.

	Threshold of 0 is treated as if it wasn't configured at all: it cannot be told apart from a missing entry.
	*/
	pub fn get(&self, id: u8) -> Option<u64> {
		match self.0.get(&id) {
			Some(&0) | None => None,
			Some(&x) => Some(x),
		}
	}

	pub fn len(&self) -> usize { self.0.len() }
	pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

fn entry(input: &str) -> IResult<&str, (u8, u64)> {
	separated_pair(
		map_res(digit1, |s: &str| s.parse::<u8>()),
		char(':'),
		map_res(digit1, |s: &str| s.parse::<u64>()),
	)(input)
}

fn entries(input: &str) -> IResult<&str, Vec<(u8, u64)>> {
	all_consuming(separated_list0(char(','), entry))(input)
}

/// Parses threshold list; if the same id is mentioned more than once, the last value wins.
pub fn parse(s: &str) -> Result<ThresholdMap, Error> {
	match entries(s) {
		// later entries overwrite earlier ones as they're collected
		Ok((_, entries)) => Ok(ThresholdMap(entries.into_iter().collect())),
		Err(_) => Err(Error::Parse(s.to_string())),
	}
}

/*!
Decoders for pages returned by ATA commands.

Every decoder takes exactly the buffer the command filled in, and refuses to decode buffers of any other size.
*/

pub mod id;
pub mod attr;
pub mod log;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		Size(page: &'static str, expected: usize, actual: usize) {
			display("{} is {} bytes long, expected {}", page, actual, expected)
		}
	}
}

fn check_size(page: &'static str, data: &[u8], expected: usize) -> Result<(), Error> {
	if data.len() != expected {
		return Err(Error::Size(page, expected, data.len()));
	}
	Ok(())
}

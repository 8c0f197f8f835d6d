/// Formats `data` as 16-byte rows of hex with the offset in front and printable ASCII at the end; meant for `debug!()`.
pub fn hexdump(data: &[u8]) -> String {
	// "0000: " + 16×" xx" + "  " + 16 chars + "\n"
	let mut dump = String::with_capacity((data.len() / 16 + 1) * 76);

	for (row, chunk) in data.chunks(16).enumerate() {
		dump.push('\n');
		dump.push_str(&format!("{:04x}:", row * 16));
		for byte in chunk {
			dump.push_str(&format!(" {:02x}", byte));
		}
		for _ in chunk.len() .. 16 {
			dump.push_str("   ");
		}
		dump.push_str("  ");
		dump.extend(chunk.iter().map(|&byte| {
			// ' ' and '.' are ambiguous, and a string of '�'s is just unreadable
			if (0x20 .. 0x7f).contains(&byte) { byte as char } else { '░' }
		}));
	}

	dump
}

#[cfg(test)]
mod tests {
	use super::hexdump;

	#[test]
	fn rows_and_ascii() {
		let mut data = b"ATA ".to_vec();
		data.extend_from_slice(&[0; 14]);

		let dump = hexdump(&data);
		let lines: Vec<&str> = dump.lines().collect();

		assert_eq!(lines.len(), 3); // leading empty line + 2 rows
		assert!(lines[1].starts_with("0000: 41 54 41 20 00"));
		assert!(lines[1].ends_with("ATA ░░░░░░░░░░░░"));
		assert!(lines[2].starts_with("0010: 00 00"));
	}

	#[test]
	fn empty() {
		assert_eq!(hexdump(&[]), "");
	}
}

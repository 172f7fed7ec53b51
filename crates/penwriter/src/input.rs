use std::io::{self, Read};

use log::warn;

/// Read at most `max_bytes` of text, logging when input is cut short.
pub fn read_bounded<R: Read>(reader: R, max_bytes: usize) -> io::Result<Vec<u8>> {
    let mut text = Vec::new();
    // One extra byte tells a full buffer apart from a truncated one.
    reader.take(max_bytes as u64 + 1).read_to_end(&mut text)?;

    if text.len() > max_bytes {
        text.truncate(max_bytes);
        warn!("Input longer than {max_bytes} bytes; the rest is ignored");
    }
    Ok(text)
}

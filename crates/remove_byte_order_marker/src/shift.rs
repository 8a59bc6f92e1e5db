// crates/remove_byte_order_marker/src/shift.rs

use std::fs::File;
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

/// Moves every byte at or after `offset` to the start of `file` and
/// truncates it, using a single `block_size` buffer.
///
/// Each block is read `offset` bytes ahead of where it is written, so a
/// write never lands on bytes that have not been read yet. Returns the new
/// file length, which is zero when `offset` is past the end of the file.
pub fn shift_left(file: &mut File, offset: u64, block_size: usize) -> io::Result<u64> {
    if block_size == 0 {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            "block size must be greater than zero",
        ));
    }

    let mut buffer = vec![0u8; block_size];
    let mut write_pos: u64 = 0;
    let mut read_pos = offset;

    loop {
        file.seek(SeekFrom::Start(read_pos))?;
        let read = read_block(file, &mut buffer)?;
        if read == 0 {
            break;
        }

        file.seek(SeekFrom::Start(write_pos))?;
        file.write_all(&buffer[..read])?;
        write_pos += read as u64;
        read_pos = write_pos + offset;
        log::trace!("shifted {} bytes, write cursor at {}", read, write_pos);
    }

    file.set_len(write_pos)?;
    file.flush()?;
    Ok(write_pos)
}

fn read_block(file: &mut File, buffer: &mut [u8]) -> io::Result<usize> {
    loop {
        match file.read(buffer) {
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

/// Source of random input bytes. `/dev/random` may block on large reads.
pub const RANDOM_SOURCE: &str = "/dev/urandom";

/// Files at least this large are mapped instead of read.
pub const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// A counting buffer: a read-only file mapping or bytes we own.
pub enum InputBuffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl InputBuffer {
    pub fn is_mapped(&self) -> bool {
        matches!(self, InputBuffer::Mapped(_))
    }
}

impl Deref for InputBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputBuffer::Mapped(m) => m,
            InputBuffer::Owned(v) => v,
        }
    }
}

/// Load `path` for counting: mapped when it is at least [`MMAP_THRESHOLD`]
/// bytes, read into memory otherwise.
pub fn read_file(path: &Path) -> io::Result<InputBuffer> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    if len < MMAP_THRESHOLD {
        let mut buf = Vec::with_capacity(len as usize);
        file.read_to_end(&mut buf)?;
        return Ok(InputBuffer::Owned(buf));
    }

    // SAFETY: read-only mapping; the counting passes never write to it.
    let map = unsafe { Mmap::map(&file)? };
    Ok(InputBuffer::Mapped(map))
}

/// Fill a new buffer of exactly `len` bytes from `reader`.
/// Fails with `UnexpectedEof` if the reader runs dry first.
pub fn read_exact_len(reader: &mut impl Read, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read `len` random bytes from [`RANDOM_SOURCE`].
pub fn read_random(len: usize) -> io::Result<Vec<u8>> {
    let mut file = File::open(RANDOM_SOURCE)?;
    read_exact_len(&mut file, len)
}

use crate::kernel::{CHUNK_SIZE, WordKernel, count_bits_naive, load_chunk};

/// Count set bits by driving `kernel` over every whole chunk of `data`,
/// then the bit loop over the trailing `data.len() % CHUNK_SIZE` bytes.
///
/// Chunks are taken at offsets that are multiples of `CHUNK_SIZE` from the
/// start of `data`, whatever its address. Inputs shorter than a chunk go
/// entirely through the bit loop.
pub fn reduce<K: WordKernel + ?Sized>(kernel: &K, data: &[u8]) -> u64 {
    let chunks = data.chunks_exact(CHUNK_SIZE);
    let remainder = chunks.remainder();

    let mut total = 0u64;
    for chunk in chunks {
        total += kernel.count_word(load_chunk(chunk));
    }

    // Word kernels assume a full word; only the bit loop is safe here.
    total + count_bits_naive(remainder)
}

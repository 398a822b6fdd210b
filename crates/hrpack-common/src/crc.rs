//! CRC32C checksum utilities.
//!
//! The watch app container closes with a CRC32C (Castagnoli) of its payload,
//! stored little-endian.

/// Compute the CRC32C checksum of a byte slice.
///
/// Uses hardware acceleration when available (SSE4.2 on x86).
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

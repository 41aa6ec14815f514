//! Bit-orientation helpers for preparing bitmap assets.
//!
//! All operate on `height` rows of `ceil(width / 8)` bytes and write into a
//! caller-supplied buffer of the same size. None allocate.

use crate::error::{DrawError, DrawResult};
use crate::raster::bitmap::row_bytes;

fn check_buffers(input: &[u8], output: &[u8], width: usize, height: usize) -> Result<usize, DrawError> {
    let needed = row_bytes(width) * height;
    let available = input.len().min(output.len());
    if available < needed {
        return Err(DrawError::BitmapTooShort { needed, available });
    }
    Ok(needed)
}

/// Swap the high and low nibble of every byte
pub fn nibble_swap(input: &[u8], output: &mut [u8], width: usize, height: usize) -> DrawResult {
    let len = check_buffers(input, output, width, height)?;
    for (out, &byte) in output[..len].iter_mut().zip(&input[..len]) {
        *out = byte.rotate_left(4);
    }
    Ok(())
}

/// Reverse the bit order of every byte (MSB <-> LSB)
pub fn bit_reverse(input: &[u8], output: &mut [u8], width: usize, height: usize) -> DrawResult {
    let len = check_buffers(input, output, width, height)?;
    for (out, &byte) in output[..len].iter_mut().zip(&input[..len]) {
        *out = byte.reverse_bits();
    }
    Ok(())
}

/// Reverse the byte order of every row. Bits inside a byte keep their order;
/// follow with `bit_reverse` for a true horizontal flip.
pub fn byte_mirror(input: &[u8], output: &mut [u8], width: usize, height: usize) -> DrawResult {
    let len = check_buffers(input, output, width, height)?;
    let bytes = row_bytes(width);
    if bytes == 0 {
        return Ok(());
    }
    for (out_row, in_row) in output[..len]
        .chunks_exact_mut(bytes)
        .zip(input[..len].chunks_exact(bytes))
    {
        for (out, &byte) in out_row.iter_mut().zip(in_row.iter().rev()) {
            *out = byte;
        }
    }
    Ok(())
}

//! Run-length scanning of bitmap rows.
//!
//! Instead of testing each bit, every step jumps straight to the next run
//! boundary with one trailing-zero count. Rows are MSB-first (bit 7 of the
//! first byte is the leftmost pixel), so each byte is bit-reversed on load
//! to put the leftmost pixel in bit 0.

/// A maximal run of equal bits within one bitmap byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Pixel column of the first bit, relative to the row start
    pub start: usize,
    pub len: usize,
    pub set: bool,
}

/// Iterator over the runs of one bitmap row, byte by byte.
///
/// The final byte is masked to `width % 8` bits when the width is not a
/// multiple of 8. Runs never span a byte boundary.
#[derive(Debug, Clone)]
pub struct RowRuns<'a> {
    row: &'a [u8],
    width: usize,
    invert: u8,
    byte: usize,
    word: u32,
    pos: u32,
    valid: u32,
}

impl<'a> RowRuns<'a> {
    /// `row` must hold at least `ceil(width / 8)` bytes.
    pub fn new(row: &'a [u8], width: usize) -> Self {
        Self::with_mask(row, width, 0)
    }

    /// Scan the bit-complement of `row`: runs of 0-bits come out as `set`.
    pub fn complement(row: &'a [u8], width: usize) -> Self {
        Self::with_mask(row, width, 0xFF)
    }

    fn with_mask(row: &'a [u8], width: usize, invert: u8) -> Self {
        let mut runs = Self {
            row,
            width,
            invert,
            byte: 0,
            word: 0,
            pos: 0,
            valid: 0,
        };
        runs.load();
        runs
    }

    fn load(&mut self) -> bool {
        let first_bit = self.byte * 8;
        if first_bit >= self.width {
            self.valid = 0;
            return false;
        }
        let byte = self.row[self.byte] ^ self.invert;
        self.word = byte.reverse_bits() as u32;
        self.valid = (self.width - first_bit).min(8) as u32;
        self.pos = 0;
        true
    }
}

impl Iterator for RowRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        while self.pos >= self.valid {
            if self.valid == 0 {
                return None;
            }
            self.byte += 1;
            if !self.load() {
                return None;
            }
        }

        let rest = self.word >> self.pos;
        let set = rest & 1 != 0;
        let boundary = if set {
            (!rest).trailing_zeros()
        } else {
            rest.trailing_zeros()
        };
        let len = boundary.min(self.valid - self.pos);
        let run = Run {
            start: self.byte * 8 + self.pos as usize,
            len: len as usize,
            set,
        };
        self.pos += len;
        Some(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn runs(row: &[u8], width: usize) -> Vec<(usize, usize, bool)> {
        RowRuns::new(row, width).map(|r| (r.start, r.len, r.set)).collect()
    }

    #[test]
    fn test_alternating_runs() {
        assert_eq!(
            runs(&[0b1100_1110], 8),
            [(0, 2, true), (2, 2, false), (4, 3, true), (7, 1, false)]
        );
    }

    #[test]
    fn test_partial_final_byte_is_masked() {
        assert_eq!(runs(&[0xFF], 5), [(0, 5, true)]);
        assert_eq!(
            runs(&[0x00, 0b1011_1111], 11),
            [(0, 8, false), (8, 1, true), (9, 1, false), (10, 1, true)]
        );
    }

    #[test]
    fn test_runs_split_at_byte_boundary() {
        assert_eq!(runs(&[0xFF, 0x80], 9), [(0, 8, true), (8, 1, true)]);
    }

    #[test]
    fn test_complement() {
        let got: Vec<_> = RowRuns::complement(&[0xF0], 8)
            .map(|r| (r.start, r.len, r.set))
            .collect();
        assert_eq!(got, [(0, 4, false), (4, 4, true)]);
    }

    #[test]
    fn test_zero_width_row() {
        assert!(runs(&[], 0).is_empty());
    }

    #[test]
    fn test_runs_cover_width() {
        for byte in 0..=255u8 {
            let total: usize = RowRuns::new(&[byte, byte], 13).map(|r| r.len).sum();
            assert_eq!(total, 13);
        }
    }
}

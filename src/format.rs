use core::fmt::{self, Write};

/// A simple fixed-size buffer you can write formatted strings into.
pub struct FmtBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FmtBuf<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        FmtBuf { buf, pos: 0 }
    }

    /// The bytes written so far
    pub fn into_str(self) -> &'a str {
        let FmtBuf { buf, pos } = self;
        // Safety: only whole `&str`s were copied in
        unsafe { core::str::from_utf8_unchecked(&buf[..pos]) }
    }
}

impl<'a> Write for FmtBuf<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if self.pos + bytes.len() > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }
}

/// Sink that only counts the bytes a format run would produce
#[derive(Debug, Default)]
struct Measure(usize);

impl Write for Measure {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Bytes `args` formats to, without writing them anywhere
pub fn measure(args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
    let mut m = Measure::default();
    m.write_fmt(args)?;
    Ok(m.0)
}

/// Format into `buf`, failing if it does not fit.
pub fn format_to<'a>(
    buf: &'a mut [u8],
    args: fmt::Arguments<'_>
) -> Result<&'a str, fmt::Error> {
    let mut f = FmtBuf::new(buf);
    f.write_fmt(args)?;
    Ok(f.into_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_matches_output() {
        assert_eq!(measure(format_args!("{}-{:04}", "ab", 7)), Ok(7));
        let mut buf = [0u8; 7];
        assert_eq!(format_to(&mut buf, format_args!("{}-{:04}", "ab", 7)), Ok("ab-0007"));
    }

    #[test]
    fn test_format_to_overflow() {
        let mut buf = [0u8; 3];
        assert!(format_to(&mut buf, format_args!("{}", 12345)).is_err());
    }
}

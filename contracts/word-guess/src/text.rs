//! Fixed-capacity text building for contract responses.
//!
//! The contract is `no_std` without an allocator, so every message is
//! rendered into a stack buffer through `core::fmt::Write` and only then
//! copied into a host `String`.

use core::fmt::{self, Write};

use soroban_sdk::{Env, String};

/// Capacity for short responses (rules, tries, confirmations, error text).
pub const SHORT_TEXT_LEN: usize = 256;

/// A UTF-8 buffer of at most `N` bytes.
///
/// Writes that would overflow the buffer are rejected whole, so the
/// contents always stay valid UTF-8.
pub struct TextBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> TextBuf<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    /// Copy the rendered text into a host string.
    pub fn finish(&self, env: &Env) -> String {
        String::from_str(env, self.as_str())
    }
}

impl<const N: usize> Write for TextBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        if end > N {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Render a short message into a host string.
///
/// Only for fixed templates whose size is known to fit `SHORT_TEXT_LEN`.
pub fn short(env: &Env, args: fmt::Arguments<'_>) -> String {
    let mut out = TextBuf::<SHORT_TEXT_LEN>::new();
    let written = out.write_fmt(args);
    debug_assert!(written.is_ok(), "message exceeds SHORT_TEXT_LEN");
    out.finish(env)
}

const SECONDS_PER_DAY: u64 = 86_400;

/// Write a ledger timestamp (seconds since the Unix epoch) as
/// `YYYY-MM-DD HH:MM:SS UTC`.
pub fn write_timestamp<W: Write>(out: &mut W, seconds: u64) -> fmt::Result {
    let days = seconds / SECONDS_PER_DAY;
    let secs_of_day = seconds % SECONDS_PER_DAY;
    let (year, month, day) = civil_from_days(days as i64);
    write!(
        out,
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
        year,
        month,
        day,
        secs_of_day / 3_600,
        secs_of_day % 3_600 / 60,
        secs_of_day % 60
    )
}

/// Proleptic Gregorian date for a count of days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

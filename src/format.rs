//! Stopwatch time formatting
//!
//! The live display and the leaderboard rows both go through
//! [`format_elapsed`], so the two always agree.

/// Format milliseconds as `MM:SS.CC`
///
/// Minutes are not wrapped at 60, so an hour reads `60:00.00`.
pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centis = (ms % 1000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
}

/// Parse `MM:SS.CC` back to milliseconds
///
/// Accepts exactly what [`format_elapsed`] produces: two or more minute
/// digits, two second digits below 60, two centisecond digits.
pub fn parse_elapsed(text: &str) -> Option<u64> {
    let (minutes, rest) = text.split_once(':')?;
    let (seconds, centis) = rest.split_once('.')?;

    if minutes.len() < 2 || seconds.len() != 2 || centis.len() != 2 {
        return None;
    }
    if ![minutes, seconds, centis]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    let centis: u64 = centis.parse().ok()?;
    if seconds >= 60 {
        return None;
    }

    minutes
        .checked_mul(60_000)?
        .checked_add(seconds * 1000 + centis * 10)
}

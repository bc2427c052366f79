//! Human-readable size formatting

/// Format a byte count as a human-readable string (KB, MB, GB).
///
/// Rounds to whole kilobytes, whole megabytes, or one-decimal gigabytes,
/// picking the unit at the 1024 boundaries. Everything below a megabyte
/// is reported in KB, so small files show up as "0 KB" rather than bytes.
pub fn format_size(bytes: u64) -> String {
    const STEP: u64 = 1024;

    let kb = div_round(bytes, STEP);
    let mb = div_round(kb, STEP);
    let gb = div_round(10 * mb, STEP) as f64 / 10.0;

    if mb > STEP {
        format!("{:.1} GB", gb)
    } else if kb > STEP {
        format!("{} MB", mb)
    } else {
        format!("{} KB", kb)
    }
}

/// Integer division rounded to the nearest whole number.
fn div_round(n: u64, d: u64) -> u64 {
    (n + d / 2) / d
}

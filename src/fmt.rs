//! Shared formatting utilities for size display

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;

/// Unit table, largest first: (threshold, divisor, suffix).
///
/// A value at or above `threshold` is rendered as `value / divisor` with
/// `suffix`. Anything below the smallest threshold is printed in plain bytes.
pub const SIZE_UNITS: [(u64, u64, &str); 3] = [(GB, GB, "GB"), (MB, MB, "MB"), (KB, KB, "KB")];

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use gosize::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// assert_eq!(format_bytes(3 * 1_073_741_824), "3.00 GB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    SIZE_UNITS
        .iter()
        .find(|(threshold, _, _)| bytes >= *threshold)
        .map(|(_, divisor, suffix)| format!("{:.2} {}", bytes as f64 / *divisor as f64, suffix))
        .unwrap_or_else(|| format!("{} B", bytes))
}

//! Human-readable byte sizes.

/// Binary unit symbols, smallest first. `u64` tops out in the exbibyte range.
const SYMBOLS: [&str; 6] = ["K", "M", "G", "T", "P", "E"];

/// Format a byte count with binary units and two decimals (`1.50M`).
///
/// Values below one KiB are printed as plain bytes (`512B`).
pub fn format_size(bytes: u64) -> String {
    for (i, symbol) in SYMBOLS.iter().enumerate().rev() {
        let prefix = 1u64 << (10 * (i + 1));
        if bytes >= prefix {
            #[allow(clippy::cast_precision_loss)]
            let value = bytes as f64 / prefix as f64;
            return format!("{value:.2}{symbol}");
        }
    }
    format!("{bytes}B")
}

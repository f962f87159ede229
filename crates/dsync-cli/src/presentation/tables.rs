//! Table formatting for `query` output.

use dsync_core::format_size;
use dsync_download::QueryListing;

/// Render a listing as aligned `path  size` rows followed by the total.
pub fn render_listing(listing: &QueryListing) -> Vec<String> {
    let sizes: Vec<String> = listing.files.iter().map(|f| format_size(f.size)).collect();
    let path_width = listing
        .files
        .iter()
        .map(|f| f.path.chars().count())
        .max()
        .unwrap_or(0);
    let size_width = sizes.iter().map(String::len).max().unwrap_or(0);

    let mut lines: Vec<String> = listing
        .files
        .iter()
        .zip(&sizes)
        .map(|(file, size)| format!("{:<path_width$}  {size:>size_width$}", file.path))
        .collect();
    lines.push(separator(path_width + 2 + size_width));
    lines.push(format!("Total Size: {}", format_size(listing.total_size)));
    lines
}

/// A horizontal separator line.
pub fn separator(width: usize) -> String {
    "-".repeat(width.max(1))
}

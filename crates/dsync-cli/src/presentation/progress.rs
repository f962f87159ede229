//! Terminal rendering of download progress.
//!
//! Presentation only: per-file lines, the overwritten batch progress line,
//! and an indicatif bar for segmented transfers.

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use dsync_core::{FileEntry, TransferMode, format_size};
use dsync_download::{DispatchEvent, ProgressSink, ProgressSnapshot};

/// Line printed for a file whose local copy at `target` verified.
pub fn skipped_line(index: usize, target: &Path) -> String {
    format!("{index}. {} already exists, jumping to next!", target.display())
}

/// Line printed once a file is complete on disk.
pub fn downloaded_line(index: usize, entry: &FileEntry) -> String {
    format!(
        "{index}. file: {}, size: {}, progress: 100%",
        entry.file_name(),
        format_size(entry.size)
    )
}

struct State<W> {
    out: W,
    status_len: usize,
    status_open: bool,
    bar: Option<ProgressBar>,
}

/// [`ProgressSink`] writing to a terminal or a plain stream.
///
/// With `overwrite` set, the batch progress line is redrawn in place and
/// segmented transfers get a live bar on stderr. Without it every progress
/// line is printed on its own and no bar is drawn.
pub struct TerminalProgressSink<W: Write + Send> {
    overwrite: bool,
    state: Mutex<State<W>>,
}

impl TerminalProgressSink<io::Stdout> {
    /// Sink on stdout, overwriting only when stdout is a terminal.
    pub fn stdout() -> Self {
        let overwrite = io::stdout().is_terminal();
        Self::new(io::stdout(), overwrite)
    }
}

impl<W: Write + Send> TerminalProgressSink<W> {
    /// Create a sink over `out`.
    pub const fn new(out: W, overwrite: bool) -> Self {
        Self {
            overwrite,
            state: Mutex::new(State {
                out,
                status_len: 0,
                status_open: false,
                bar: None,
            }),
        }
    }

    /// Print a plain message line.
    pub fn message(&self, text: &str) {
        let mut state = self.lock();
        self.write_line(&mut state, text);
    }

    /// Close an open progress line so later output starts on a fresh line.
    pub fn finish(&self) {
        let mut state = self.lock();
        if let Some(bar) = state.bar.take() {
            bar.finish_and_clear();
        }
        if state.status_open {
            let _ = writeln!(state.out);
            state.status_open = false;
            state.status_len = 0;
        }
        let _ = state.out.flush();
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    fn lock(&self) -> MutexGuard<'_, State<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_line(&self, state: &mut State<W>, text: &str) {
        if self.overwrite && state.status_open {
            let blank = " ".repeat(state.status_len);
            let _ = write!(state.out, "\r{blank}\r");
            state.status_open = false;
        }
        let _ = writeln!(state.out, "{text}");
    }

    fn write_status(&self, state: &mut State<W>, snapshot: &ProgressSnapshot) {
        let line = snapshot.render();
        if self.overwrite {
            let pad = state.status_len.saturating_sub(line.len());
            let _ = write!(state.out, "\r{line}{}", " ".repeat(pad));
            state.status_len = line.len();
            state.status_open = true;
        } else {
            let _ = writeln!(state.out, "{line}");
        }
        let _ = state.out.flush();
    }

    fn segment_bar(entry: &FileEntry) -> ProgressBar {
        let bar = ProgressBar::with_draw_target(Some(entry.size), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{bar:32.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        ) {
            bar.set_style(style.progress_chars("█▓░"));
        }
        bar.set_message(entry.file_name().to_string());
        bar
    }
}

impl<W: Write + Send> ProgressSink for TerminalProgressSink<W> {
    fn on_event(&self, event: &DispatchEvent<'_>) {
        let mut state = self.lock();
        match *event {
            DispatchEvent::FetchingManifest => {
                self.write_line(&mut state, "Fetching the list of files...");
            }
            DispatchEvent::ManifestReady { files, total_bytes } => {
                tracing::debug!(files, total_bytes, "manifest ready");
            }
            DispatchEvent::Skipped {
                index,
                target,
                progress,
                ..
            } => {
                self.write_line(&mut state, &skipped_line(index, target));
                self.write_status(&mut state, &progress);
            }
            DispatchEvent::TransferStarted { entry, mode, .. } => {
                if self.overwrite && mode == TransferMode::Segmented {
                    state.bar = Some(Self::segment_bar(entry));
                }
            }
            DispatchEvent::TransferProgress { received, .. } => {
                if let Some(bar) = &state.bar {
                    bar.set_position(received);
                }
            }
            DispatchEvent::Downloaded {
                index,
                entry,
                progress,
                ..
            } => {
                if let Some(bar) = state.bar.take() {
                    bar.finish_and_clear();
                }
                self.write_line(&mut state, &downloaded_line(index, entry));
                self.write_status(&mut state, &progress);
            }
        }
    }
}

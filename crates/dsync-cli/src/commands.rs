//! Subcommands and their arguments.

use clap::{Args, Subcommand};

use dsync_core::{DEFAULT_FILE_THRESHOLD, DEFAULT_PAGE_LIMIT, DEFAULT_SEGMENT_COUNT, SyncSettings};

/// Available dsync commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every file of a dataset repository
    Get {
        /// Dataset repository (e.g., "openlab/mnist")
        repo: String,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Download the files under one path of a dataset repository
    Download {
        /// Dataset repository (e.g., "openlab/mnist")
        repo: String,
        /// Repository path to download (e.g., "/raw" or "./raw/train.csv")
        #[arg(short, long)]
        source: String,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// List the files of a dataset repository with their sizes
    Query {
        /// Dataset repository (e.g., "openlab/mnist")
        repo: String,
    },
}

/// Where and how files are downloaded.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Directory the dataset folder is created in (default: current directory)
    #[arg(short, long, env = "DSYNC_TARGET_DIR")]
    pub target: Option<String>,

    /// Files at or above this many bytes are downloaded in parallel segments
    #[arg(long, default_value_t = DEFAULT_FILE_THRESHOLD)]
    pub threshold: u64,

    /// Number of parallel segments for large files
    #[arg(long, default_value_t = DEFAULT_SEGMENT_COUNT)]
    pub segments: usize,

    /// Files requested per listing page
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub page_limit: u32,
}

impl TargetArgs {
    /// Settings for this run. Validation happens in bootstrap.
    pub fn settings(&self) -> SyncSettings {
        SyncSettings {
            file_threshold: self.threshold,
            segment_count: self.segments,
            page_limit: self.page_limit,
            ..SyncSettings::default()
        }
    }
}

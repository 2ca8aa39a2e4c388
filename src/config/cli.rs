use std::path::PathBuf;

use clap::Parser;

/// Build a cleaned caption corpus for one hashtag from scraped post batches.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Hashtag the batch files were scraped for.
    #[arg(short, long)]
    pub tag: String,

    /// Directory of scraped batch files. Defaults to `json/<tag>`.
    #[arg(short = 'j', long)]
    pub json_dir: Option<PathBuf>,

    /// Output text file. Defaults to `text/training_text/<tag>.txt`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only use captions with at least this many likes.
    #[arg(short = 'm', long)]
    pub min_likes: Option<u64>,

    /// Number of hashtags that makes a caption get cut at its first hashtag.
    #[arg(long)]
    pub hashtag_run_threshold: Option<usize>,

    /// Path to an optional pipeline configuration YAML file.
    #[arg(short = 'c', long)]
    pub pipeline_config: Option<PathBuf>,

    /// Validate the pipeline configuration and exit
    #[arg(long)]
    pub validate_config: bool,

    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub const DEFAULT_MIN_LIKES: u64 = 10;

impl Args {
    pub fn json_dir(&self) -> PathBuf {
        self.json_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("json").join(&self.tag))
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from("text")
                .join("training_text")
                .join(format!("{}.txt", self.tag))
        })
    }

    /// CLI flag, then the config file, then the built-in default.
    pub fn resolve_min_likes(&self, config_min_likes: Option<u64>) -> u64 {
        self.min_likes
            .or(config_min_likes)
            .unwrap_or(DEFAULT_MIN_LIKES)
    }
}

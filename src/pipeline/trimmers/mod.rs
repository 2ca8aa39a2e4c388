// src/pipeline/trimmers/mod.rs

mod boilerplate;
mod hashtag_run;

pub use boilerplate::{cut_at_first_bullet, cut_at_first_newline, trim_boilerplate, BoilerplateTrimmer};
pub use hashtag_run::{trim_hashtag_run, HashtagRunTrimmer, DEFAULT_HASHTAG_RUN_THRESHOLD};

use super::MergeConfig;
use crate::{cli::CLAP_ARGS, window::DEFAULT_OVERSCAN};
use anyhow::{Result, ensure};
use serde::Deserialize;
use std::path::PathBuf;

/// Two messages at the default height.
const FOLLOW_ROWS: f64 = 4.0;

#[derive(Deserialize)]
pub struct UserOptions {
    transcript_path: Option<PathBuf>,
    author: Option<String>,
    item_height: Option<u16>,
    overscan: Option<usize>,
    follow_threshold: Option<f64>,
    scrollbar: Option<bool>,
    incremental_search: Option<bool>,
}

pub struct Options {
    pub transcript_path: Option<PathBuf>,
    /// Name put on messages composed in the viewer.
    pub author: String,
    /// Rows given to every message: a header line plus the body.
    pub item_height: u16,
    pub overscan: usize,
    /// Terminal rows from the bottom within which new messages keep the view
    /// pinned.
    pub follow_threshold: f64,
    pub scrollbar: bool,
    pub incremental_search: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            transcript_path: None,
            author: std::env::var("USER")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "me".to_owned()),
            item_height: 2,
            overscan: DEFAULT_OVERSCAN,
            follow_threshold: FOLLOW_ROWS,
            scrollbar: true,
            incremental_search: true,
        }
    }
}

impl MergeConfig for Options {
    type Other = UserOptions;

    fn merge(&mut self, user_options: Self::Other) -> Result<()> {
        macro_rules! set_options_field {
            ($($name: ident),*) => {
                $(
                    if let Some(option) = user_options.$name {
                        self.$name = option;
                    }
                )*
            };
        }

        if user_options.transcript_path.is_some() {
            self.transcript_path = user_options.transcript_path;
        }

        set_options_field!(
            author,
            item_height,
            overscan,
            follow_threshold,
            scrollbar,
            incremental_search
        );

        self.validate()
    }
}

impl Options {
    pub fn override_with_clap_args(&mut self) -> Result<()> {
        if let Some(path) = CLAP_ARGS.get_one::<PathBuf>("transcript") {
            self.transcript_path = Some(path.to_owned());
        }

        if let Some(item_height) = CLAP_ARGS.get_one::<u16>("item_height") {
            self.item_height = *item_height;
        }

        if let Some(overscan) = CLAP_ARGS.get_one::<usize>("overscan") {
            self.overscan = *overscan;
        }

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.item_height > 0, "item_height must be at least 1.");
        ensure!(
            self.follow_threshold.is_finite() && self.follow_threshold >= 0.0,
            "follow_threshold must be a non-negative number."
        );
        ensure!(!self.author.trim().is_empty(), "author can't be empty.");

        Ok(())
    }
}

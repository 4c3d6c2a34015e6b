//! Loader configuration.
//!
//! [`LoaderConfig`] is a plain value handed to the loaders at construction. The
//! defaults reproduce what a browser demo does out of the box: resources live
//! under `assets/`, images are requested in CORS "anonymous" mode, nothing
//! times out and CSV parsing never fails on bad numbers.

use instant::Duration;

use crate::data_structures::image::CrossOrigin;

/// How [`parse_csv`](crate::resources::point_cloud::parse_csv) treats malformed rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Every line after the header yields three values. Missing or non-numeric
    /// fields become `NaN`, including the empty line after a trailing newline.
    #[default]
    Lenient,
    /// Blank lines are skipped and any missing or non-numeric field is a
    /// [`LoadError::Parse`](crate::error::LoadError::Parse).
    Strict,
}

#[derive(Clone, Debug)]
pub struct LoaderConfig {
    /// Base that relative resource names are resolved against. A directory on
    /// native targets (default `./assets`), a URL on the web (default the
    /// document base URL, so names resolve like they would in `img.src`).
    pub asset_root: String,
    pub cross_origin: CrossOrigin,
    /// Upper bound for a single fetch. `None` waits forever.
    ///
    /// Natively the timer is a tokio timer, so a timeout needs the loaders to be
    /// awaited inside a tokio runtime with the time driver enabled.
    pub timeout: Option<Duration>,
    pub parse_mode: ParseMode,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            asset_root: default_asset_root(),
            cross_origin: CrossOrigin::default(),
            timeout: None,
            parse_mode: ParseMode::default(),
        }
    }
}

impl LoaderConfig {
    pub fn with_asset_root(mut self, asset_root: impl Into<String>) -> Self {
        self.asset_root = asset_root.into();
        self
    }

    pub fn with_cross_origin(mut self, cross_origin: CrossOrigin) -> Self {
        self.cross_origin = cross_origin;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_asset_root() -> String {
    "./assets".to_string()
}

/// The document base URL, which is what `img.src` and `fetch` resolve against.
#[cfg(target_arch = "wasm32")]
fn default_asset_root() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    window
        .document()
        .and_then(|document| document.base_uri().ok().flatten())
        .or_else(|| window.location().href().ok())
        .unwrap_or_default()
}

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Mutex, OnceLock},
    time::Duration,
};

use anyhow::anyhow;
use cloud_loaders::{CrossOrigin, Fetch, ImageHandle, ImageSource};
use tempfile::TempDir;

/// In-memory [`Fetch`] with an optional artificial latency per resource.
#[derive(Default)]
pub(crate) struct MemoryFetcher {
    files: HashMap<String, String>,
    delays: HashMap<String, Duration>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(path.to_string(), contents.to_string());
        self
    }

    pub fn with_delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    async fn lookup(&self, path: &str) -> anyhow::Result<&String> {
        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        self.files
            .get(path)
            .ok_or_else(|| anyhow!("404 Not Found: {path}"))
    }
}

impl Fetch for MemoryFetcher {
    async fn fetch_text(&self, path: &str) -> anyhow::Result<String> {
        Ok(self.lookup(path).await?.clone())
    }

    async fn fetch_binary(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.lookup(path).await?.as_bytes().to_vec())
    }
}

/// [`ImageSource`] that hands out blank images of a fixed size for known URLs
/// and remembers the CORS mode of every request.
#[derive(Default)]
pub(crate) struct FakeImageSource {
    sizes: HashMap<String, (u32, u32)>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<(String, CrossOrigin)>>,
}

impl FakeImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, url: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(url.to_string(), (width, height));
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn requests(&self) -> Vec<(String, CrossOrigin)> {
        self.requests.lock().unwrap().clone()
    }
}

impl ImageSource for FakeImageSource {
    type Handle = ImageHandle;

    async fn load(&self, url: &str, cross_origin: CrossOrigin) -> anyhow::Result<ImageHandle> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), cross_origin));
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        let (width, height) = self
            .sizes
            .get(url)
            .copied()
            .ok_or_else(|| anyhow!("net::ERR_NAME_NOT_RESOLVED {url}"))?;
        Ok(image::RgbaImage::new(width, height).into())
    }
}

/// Logger that keeps every record so tests can assert on diagnostics.
struct CapturingLogger {
    records: Mutex<Vec<(log::Level, String)>>,
}

impl log::Log for CapturingLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

fn logger() -> &'static CapturingLogger {
    static LOGGER: OnceLock<CapturingLogger> = OnceLock::new();
    LOGGER.get_or_init(|| CapturingLogger {
        records: Mutex::new(Vec::new()),
    })
}

/// Install the capturing logger. Safe to call from every test.
pub(crate) fn capture_logs() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        log::set_logger(logger()).expect("another logger is already installed");
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Warnings logged so far whose message contains `needle`.
///
/// Tests run in parallel and share the logger, so always filter on something
/// unique to the test.
pub(crate) fn warnings_containing(needle: &str) -> Vec<String> {
    logger()
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, msg)| *level == log::Level::Warn && msg.contains(needle))
        .map(|(_, msg)| msg.clone())
        .collect()
}

/// Fresh temporary directory, removed when the returned guard is dropped.
///
/// Keep the guard alive for as long as the test reads from the directory.
pub(crate) fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("cloud-loaders-")
        .tempdir()
        .expect("failed to create scratch dir")
}

pub(crate) fn assert_positions(actual: &[f32], expected: &[f32]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {actual:?} vs {expected:?}"
    );
    for (idx, (a, e)) in actual.iter().zip(expected).enumerate() {
        if e.is_nan() {
            assert!(a.is_nan(), "expected NaN at {idx}, got {a} in {actual:?}");
        } else {
            assert_eq!(a, e, "mismatch at {idx} in {actual:?}");
        }
    }
}

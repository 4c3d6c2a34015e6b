//! Default [`Fetch`] implementation.
//!
//! On the web resources are requested over HTTP relative to the asset root URL.
//! Natively they are read from the asset root directory.

use anyhow::Context;
use url::Url;

use crate::{config::LoaderConfig, resources::Fetch};

/// Reads resources relative to an asset root.
///
/// Natively the reads go through `tokio::fs`, so the loader futures have to be
/// driven by a tokio runtime (its blocking pool serves file I/O); awaiting them
/// from another executor panics. On the web requests are made with `reqwest`
/// and the root is a URL, see [`resolve_url`].
#[derive(Clone, Debug)]
pub struct AssetFetcher {
    root: String,
    #[cfg(target_arch = "wasm32")]
    client: reqwest::Client,
}

impl AssetFetcher {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            #[cfg(target_arch = "wasm32")]
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(config.asset_root.clone())
    }

    pub fn root(&self) -> &str {
        &self.root
    }
}

/// Resolve `file_name` against `root` the same way the browser resolves `img.src`
/// or `fetch(path)` against the document base URL.
///
/// Absolute URLs are kept as they are. The root is used verbatim, so a directory
/// root needs its trailing slash: `https://host/assets` + `a.csv` is
/// `https://host/a.csv`, exactly like a page at `/assets` would see it.
pub fn resolve_url(root: &str, file_name: &str) -> anyhow::Result<Url> {
    if let Ok(url) = Url::parse(file_name) {
        return Ok(url);
    }
    let base = Url::parse(root).with_context(|| format!("invalid asset root {root}"))?;
    base.join(file_name)
        .with_context(|| format!("cannot resolve {file_name} against {root}"))
}

#[cfg(target_arch = "wasm32")]
impl AssetFetcher {
    async fn get(&self, file_name: &str) -> anyhow::Result<reqwest::Response> {
        let url = resolve_url(&self.root, file_name)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()?;
        Ok(response)
    }
}

#[cfg(target_arch = "wasm32")]
impl Fetch for AssetFetcher {
    async fn fetch_text(&self, path: &str) -> anyhow::Result<String> {
        Ok(self.get(path).await?.text().await?)
    }

    async fn fetch_binary(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.get(path).await?.bytes().await?.to_vec())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetFetcher {
    fn path(&self, file_name: &str) -> std::path::PathBuf {
        // absolute paths replace the root
        std::path::Path::new(&self.root).join(file_name)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Fetch for AssetFetcher {
    async fn fetch_text(&self, path: &str) -> anyhow::Result<String> {
        let path = self.path(path);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))
    }

    async fn fetch_binary(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.path(path);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))
    }
}

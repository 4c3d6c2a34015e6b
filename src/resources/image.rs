use instant::{Duration, Instant};

use crate::{
    config::LoaderConfig,
    data_structures::image::CrossOrigin,
    error::{LoadError, Result},
    platform::with_timeout,
    resources::ImageSource,
};

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformImageSource = DecodingImageSource;
#[cfg(target_arch = "wasm32")]
pub type PlatformImageSource = BrowserImageSource;

/// Loads images through an injected [`ImageSource`].
///
/// Every call is independent: the loader only holds its configuration, so one
/// loader can serve any number of concurrent loads.
pub struct ImageLoader<S = PlatformImageSource> {
    source: S,
    cross_origin: CrossOrigin,
    timeout: Option<Duration>,
}

impl<S: ImageSource> ImageLoader<S> {
    pub fn new(source: S, config: &LoaderConfig) -> Self {
        Self {
            source,
            cross_origin: config.cross_origin,
            timeout: config.timeout,
        }
    }

    /// Fetch and decode the image at `url`.
    ///
    /// Failures are logged as warnings before they are returned.
    pub async fn load_image(&self, url: &str) -> Result<S::Handle> {
        let start = Instant::now();
        let load = async {
            self.source
                .load(url, self.cross_origin)
                .await
                .map_err(|source| {
                    log::warn!("Could not load image {}: {:#}", url, source);
                    LoadError::ImageLoad {
                        url: url.to_string(),
                        source,
                    }
                })
        };
        let handle = with_timeout(url, self.timeout, load).await?;
        log::debug!("Loaded image {} in {:?}", url, start.elapsed());
        Ok(handle)
    }
}

impl ImageLoader<PlatformImageSource> {
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(PlatformImageSource::from_config(config), config)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::DecodingImageSource;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use image::{ImageFormat, load_from_memory, load_from_memory_with_format};

    use crate::{
        config::LoaderConfig,
        data_structures::image::{CrossOrigin, ImageHandle},
        resources::{AssetFetcher, Fetch, ImageSource},
    };

    /// Fetches the encoded bytes and decodes them with the `image` crate.
    pub struct DecodingImageSource<F = AssetFetcher> {
        fetcher: F,
    }

    impl<F: Fetch> DecodingImageSource<F> {
        pub fn new(fetcher: F) -> Self {
            Self { fetcher }
        }
    }

    impl DecodingImageSource {
        pub fn from_config(config: &LoaderConfig) -> Self {
            Self::new(AssetFetcher::from_config(config))
        }
    }

    impl<F: Fetch> ImageSource for DecodingImageSource<F> {
        type Handle = ImageHandle;

        async fn load(&self, url: &str, cross_origin: CrossOrigin) -> anyhow::Result<ImageHandle> {
            log::trace!(
                "Ignoring crossorigin={} for {} outside the browser",
                cross_origin.as_attr(),
                url
            );
            let bytes = self.fetcher.fetch_binary(url).await?;
            // The extension is only a hint, let the decoder guess otherwise.
            let img = match ImageFormat::from_path(url) {
                Ok(format) => load_from_memory_with_format(&bytes, format)?,
                Err(_) => load_from_memory(&bytes)?,
            };
            Ok(img.into())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::BrowserImageSource;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::rc::Rc;

    use anyhow::anyhow;
    use wasm_bindgen::{JsCast, JsValue, closure::Closure};

    use crate::{
        config::LoaderConfig,
        data_structures::image::{CrossOrigin, ImageHandle},
        resources::{ImageSource, fetch::resolve_url},
    };

    /// Loads images through an `HTMLImageElement` so the browser does the
    /// fetching, CORS handling and decoding.
    pub struct BrowserImageSource {
        root: String,
    }

    impl BrowserImageSource {
        pub fn new(root: impl Into<String>) -> Self {
            Self { root: root.into() }
        }

        pub fn from_config(config: &LoaderConfig) -> Self {
            Self::new(config.asset_root.clone())
        }
    }

    impl ImageSource for BrowserImageSource {
        type Handle = ImageHandle;

        async fn load(&self, url: &str, cross_origin: CrossOrigin) -> anyhow::Result<ImageHandle> {
            let src = resolve_url(&self.root, url)?;
            let element = web_sys::HtmlImageElement::new()
                .map_err(|e| anyhow!("could not create image element: {:?}", e))?;
            // must be set before src, otherwise the request goes out without CORS
            element.set_cross_origin(Some(cross_origin.as_attr()));

            let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
            let tx = Rc::new(tx);
            let load_tx = Rc::clone(&tx);
            let on_load: Closure<dyn FnMut()> = Closure::once(move || {
                let _ = load_tx.send(Ok(()));
            });
            let on_error: Closure<dyn FnMut(JsValue)> = Closure::once(move |event: JsValue| {
                let _ = tx.send(Err(event));
            });
            element.set_onload(Some(on_load.as_ref().unchecked_ref()));
            element.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            element.set_src(src.as_str());

            let outcome: Option<Result<(), JsValue>> = rx.receive().await;
            element.set_onload(None);
            element.set_onerror(None);
            match outcome {
                Some(Ok(())) => Ok(ImageHandle::from_element(element)),
                Some(Err(event)) => Err(anyhow!("{} failed to load: {:?}", src, event)),
                None => Err(anyhow!("{} was dropped before it finished loading", src)),
            }
        }
    }
}

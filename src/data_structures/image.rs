//! Decoded image handles.
//!
//! An [`ImageHandle`] is what an image load resolves to. On the web it is the
//! `HTMLImageElement` the browser decoded (ready to be handed to
//! `texImage2D`), natively it is the decoded RGBA pixel buffer.

/// CORS mode requested when fetching an image from another origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrossOrigin {
    /// Request the resource without sending credentials.
    #[default]
    Anonymous,
    UseCredentials,
}

impl CrossOrigin {
    /// Value of the HTML `crossorigin` attribute for this mode.
    pub fn as_attr(&self) -> &'static str {
        match self {
            CrossOrigin::Anonymous => "anonymous",
            CrossOrigin::UseCredentials => "use-credentials",
        }
    }
}

/// An opaque decoded image owned by the caller.
#[derive(Clone, Debug)]
pub struct ImageHandle {
    #[cfg(target_arch = "wasm32")]
    element: web_sys::HtmlImageElement,
    #[cfg(not(target_arch = "wasm32"))]
    pixels: image::RgbaImage,
}

#[cfg(target_arch = "wasm32")]
impl ImageHandle {
    pub(crate) fn from_element(element: web_sys::HtmlImageElement) -> Self {
        Self { element }
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.element.natural_width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.element.natural_height()
    }

    pub fn element(&self) -> &web_sys::HtmlImageElement {
        &self.element
    }

    pub fn into_element(self) -> web_sys::HtmlImageElement {
        self.element
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ImageHandle {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &image::RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> image::RgbaImage {
        self.pixels
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<image::DynamicImage> for ImageHandle {
    fn from(img: image::DynamicImage) -> Self {
        Self {
            pixels: img.to_rgba8(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<image::RgbaImage> for ImageHandle {
    fn from(pixels: image::RgbaImage) -> Self {
        Self { pixels }
    }
}

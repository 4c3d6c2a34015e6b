//! JavaScript bindings for the browser demo.
//!
//! ```js
//! import init, { initLogging, loadImage, pointCloudFromCSV } from "./cloud_loaders.js";
//! await init();
//! initLogging();
//! const img = await loadImage("textures/ground.png");
//! const positions = await pointCloudFromCSV("clouds/bunny.csv"); // Float32Array
//! ```

use wasm_bindgen::prelude::*;

use crate::{data_structures::image::ImageHandle, error::LoadError};

#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging_js() {
    crate::logging::init_logging();
}

#[wasm_bindgen(js_name = loadImage)]
pub async fn load_image_js(url: String) -> Result<web_sys::HtmlImageElement, JsValue> {
    crate::resources::load_image(&url)
        .await
        .map(ImageHandle::into_element)
        .map_err(to_js)
}

#[wasm_bindgen(js_name = pointCloudFromCSV)]
pub async fn point_cloud_from_csv_js(path: String) -> Result<Vec<f32>, JsValue> {
    crate::resources::point_cloud_from_csv(&path)
        .await
        .map(|cloud| cloud.into_positions())
        .map_err(to_js)
}

fn to_js(err: LoadError) -> JsValue {
    JsValue::from_str(&format!("{:#}", anyhow::Error::from(err)))
}

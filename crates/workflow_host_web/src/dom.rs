//! DOM input helpers the sidebar uses to feed the panel.

use std::future::Future;

use wasm_bindgen::JsValue;
use workflow_host::{DroppedItem, PreviewImage, PreviewUpload};

/// Reads files and folders from a native drop's `DataTransfer`, walking folders recursively.
///
/// Call this inside the drop handler and await the returned future afterwards. Unreadable entries
/// are skipped; file bodies are decoded as UTF-8 text.
pub fn dropped_items(
    data_transfer: &web_sys::DataTransfer,
) -> impl Future<Output = Result<Vec<DroppedItem>, String>> + 'static {
    let value: &JsValue = data_transfer.as_ref();
    crate::bridge::read_dropped_items(value)
}

/// Opens an `image/*` file picker; `Ok(None)` when the user cancels.
pub async fn pick_preview_image() -> Result<Option<PreviewUpload>, String> {
    crate::bridge::pick_image().await
}

/// Creates a `blob:` URL displaying `image`; release it with [`revoke_preview_url`].
pub fn preview_url(image: &PreviewImage) -> Result<String, String> {
    crate::bridge::preview_object_url(image)
}

/// Releases a URL created by [`preview_url`].
pub fn revoke_preview_url(url: &str) {
    crate::bridge::revoke_object_url(url);
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn image_picker_is_unsupported_outside_the_browser() {
        assert!(block_on(pick_preview_image()).is_err());
        let image = PreviewImage {
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(preview_url(&image).is_err());
        revoke_preview_url("blob:unused");
    }
}

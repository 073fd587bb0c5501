//! Thin wrappers over the browser APIs the dashboard needs outside of
//! rendering: blocking confirmation prompts, file downloads and navigation.

use wasm_bindgen::JsCast;

use crate::error::Error;

/// Show a native confirmation prompt. Returns `false` if it cannot be shown.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Hand `bytes` to the browser as a file download named `filename`.
pub fn download(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), Error> {
    let window = web_sys::window().ok_or_else(|| Error::Report("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| Error::Report("no document".to_string()))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| Error::Report("could not create blob".to_string()))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| Error::Report("could not create object URL".to_string()))?;

    let anchor = document
        .create_element("a")
        .map_err(|_| Error::Report("could not create link".to_string()))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| Error::Report("link is not an anchor".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Navigate the whole page to `path`.
pub fn redirect(path: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(path).is_err() {
            log::error!("could not redirect to {}", path);
        }
    }
}

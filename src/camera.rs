//! Camera access and QR decoding for the scanner.
//!
//! Frames are copied from the `<video>` element into an off-screen canvas,
//! converted to greyscale and handed to `rqrr`.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream};

use crate::scan::ScanError;

/// Frames wider than this are scaled down before decoding.
const MAX_FRAME_WIDTH: u32 = 640;

/// Why the camera could not be started.
#[derive(Debug)]
pub enum CameraError {
    /// A failure the user should be told about.
    Reported(ScanError),
    /// Anything else; logged and otherwise ignored.
    Other(String),
}

impl From<JsValue> for CameraError {
    fn from(value: JsValue) -> Self {
        match value.dyn_ref::<web_sys::DomException>() {
            Some(exception) => match ScanError::from_dom_name(&exception.name()) {
                Some(error) => CameraError::Reported(error),
                None => CameraError::Other(exception.message()),
            },
            None => CameraError::Other(format!("{:?}", value)),
        }
    }
}

/// Ask for the rear camera and start playing it into `video`.
pub async fn start(video: &HtmlVideoElement) -> Result<MediaStream, CameraError> {
    let window = web_sys::window().ok_or_else(|| CameraError::Other("no window".to_string()))?;
    let devices = window.navigator().media_devices()?;

    let constraints = web_sys::MediaStreamConstraints::new();
    let video_constraints = js_sys::Object::new();
    js_sys::Reflect::set(&video_constraints, &"facingMode".into(), &"environment".into())?;
    js_sys::Reflect::set(&constraints, &"video".into(), &video_constraints)?;
    js_sys::Reflect::set(&constraints, &"audio".into(), &JsValue::FALSE)?;

    let stream = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?).await?;
    let stream: MediaStream = stream.dyn_into()?;

    video.set_src_object(Some(&stream));
    // Safari refuses inline playback without this attribute.
    video.set_attribute("playsinline", "true")?;
    if let Ok(playing) = video.play() {
        if let Err(e) = JsFuture::from(playing).await {
            log::debug!("video playback did not start: {:?}", e);
        }
    }

    Ok(stream)
}

/// Stop every track so the browser releases the camera.
pub fn stop(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Grab the current video frame and try to decode a QR code from it.
pub fn decode_frame(video: &HtmlVideoElement, canvas: &HtmlCanvasElement) -> Option<String> {
    let (width, height) = frame_size(video.video_width(), video.video_height())?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context = canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;
    context
        .draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, width as f64, height as f64)
        .ok()?;
    let pixels = context
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .ok()?
        .data();

    let luma = rgba_to_luma(&pixels);
    decode_luma(width as usize, height as usize, &luma)
}

/// Scale a video frame down to [MAX_FRAME_WIDTH], keeping the aspect ratio.
/// Returns `None` until the video has produced a frame.
fn frame_size(video_width: u32, video_height: u32) -> Option<(u32, u32)> {
    if video_width == 0 || video_height == 0 {
        return None;
    }
    if video_width <= MAX_FRAME_WIDTH {
        return Some((video_width, video_height));
    }
    let height = (video_height as u64 * MAX_FRAME_WIDTH as u64 / video_width as u64).max(1);
    Some((MAX_FRAME_WIDTH, height as u32))
}

/// ITU-R BT.601 luma from packed RGBA pixels.
fn rgba_to_luma(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .map(|px| {
            let luma = 299 * px[0] as u32 + 587 * px[1] as u32 + 114 * px[2] as u32;
            (luma / 1000) as u8
        })
        .collect()
}

fn decode_luma(width: usize, height: usize, luma: &[u8]) -> Option<String> {
    if width == 0 || height == 0 || luma.len() < width * height {
        return None;
    }

    let mut image = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| luma[y * width + x]);
    image
        .detect_grids()
        .into_iter()
        .find_map(|grid| grid.decode().ok().map(|(_, content)| content))
        .filter(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_rgba_to_luma() {
        let pixels = [255, 255, 255, 255, 0, 0, 0, 255, 255, 0, 0, 128];

        assert_eq!(rgba_to_luma(&pixels), vec![255, 0, 76]);
    }

    #[test]
    fn waits_for_first_frame() {
        assert_eq!(frame_size(0, 0), None);
        assert_eq!(frame_size(640, 0), None);
    }

    #[test]
    fn scales_large_frames_down() {
        assert_eq!(frame_size(320, 240), Some((320, 240)));
        assert_eq!(frame_size(1920, 1080), Some((640, 360)));
    }

    #[test]
    fn blank_frame_has_no_code() {
        let luma = vec![255u8; 64 * 64];

        assert_eq!(decode_luma(64, 64, &luma), None);
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert_eq!(decode_luma(10, 10, &[0u8; 20]), None);
    }
}

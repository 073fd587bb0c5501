use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlVideoElement, MediaStream};
use yew::prelude::*;

use super::modal::modal_shell;
use crate::camera::{self, CameraError};
use crate::scan::{ScanError, ScanEvent};

/// How often a frame is grabbed from the camera and decoded.
const FRAME_INTERVAL_MS: u32 = 250;

#[derive(Properties, PartialEq)]
pub struct QrScannerProps {
    pub error: Option<ScanError>,
    pub on_event: Callback<ScanEvent>,
    pub on_cancel: Callback<()>,
}

fn offscreen_canvas() -> Option<HtmlCanvasElement> {
    web_sys::window()?
        .document()?
        .create_element("canvas")
        .ok()?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

/// Live camera preview. Every decoded code is emitted as a `ScanEvent`; the
/// owner decides which one counts. The camera is released on unmount.
#[function_component(QrScanner)]
pub fn qr_scanner(props: &QrScannerProps) -> Html {
    let video_ref = use_node_ref();

    {
        let video_ref = video_ref.clone();
        let on_event = props.on_event.clone();
        use_effect_with_deps(
            move |_| {
                let stream: Rc<RefCell<Option<MediaStream>>> = Rc::default();
                let mounted = Rc::new(Cell::new(true));

                if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                    let stream = stream.clone();
                    let mounted = mounted.clone();
                    let on_event = on_event.clone();
                    spawn_local(async move {
                        match camera::start(&video).await {
                            Ok(started) if mounted.get() => *stream.borrow_mut() = Some(started),
                            // Closed before the user answered the permission prompt.
                            Ok(started) => camera::stop(&started),
                            Err(CameraError::Reported(error)) => {
                                log::warn!("camera unavailable: {:?}", error);
                                on_event.emit(ScanEvent::Failed(error));
                            }
                            Err(CameraError::Other(reason)) => {
                                log::debug!("ignoring camera error: {}", reason)
                            }
                        }
                    });
                }

                let poll = offscreen_canvas().map(|canvas| {
                    Interval::new(FRAME_INTERVAL_MS, move || {
                        if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                            if let Some(text) = camera::decode_frame(&video, &canvas) {
                                on_event.emit(ScanEvent::Decoded(text));
                            }
                        }
                    })
                });

                move || {
                    mounted.set(false);
                    drop(poll);
                    if let Some(stream) = stream.borrow_mut().take() {
                        camera::stop(&stream);
                    }
                }
            },
            (),
        );
    }

    let on_close = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let body = html! {
        <div class="space-y-3">
            <div class="relative bg-black rounded-[10px] overflow-hidden aspect-square">
                <video ref={video_ref} class="w-full h-full object-cover" muted=true autoplay=true></video>
                <div class="absolute inset-8 border-2 border-white/70 rounded-lg pointer-events-none"></div>
            </div>
            {
                match props.error {
                    Some(error) => html! { <p class="text-sm text-red-500">{ error.message() }</p> },
                    None => html! { <p class="text-sm text-muted-foreground">{"Point the camera at the QR code on your receipt."}</p> },
                }
            }
        </div>
    };
    let footer = html! {
        <button type="button" onclick={on_close.clone()} class="px-4 py-2 rounded-[10px] bg-secondary text-secondary-foreground text-sm font-bold">{"Cancel"}</button>
    };

    modal_shell("Scan QR Code", on_close, body, footer)
}

//! Video playback surfaces.
//!
//! In the browser each bound video is a hidden, muted, looping `<video>`
//! element. Frames are copied through an offscreen 2D canvas into an RGBA
//! texture every frame. Natively there is no video decoder, so opening a
//! video fails and the exhibit keeps its still image.

#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use constants::proximity::VIDEO_FRAME_SIZE;

use crate::engine::loading::media_loader::MediaError;

/// Black RGBA texture that video frames are written into.
pub fn blank_video_texture() -> Image {
    Image::new_fill(
        Extent3d {
            width: VIDEO_FRAME_SIZE,
            height: VIDEO_FRAME_SIZE,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

#[cfg(target_arch = "wasm32")]
struct VideoSurface {
    element: web_sys::HtmlVideoElement,
    context: web_sys::CanvasRenderingContext2d,
    texture: Handle<Image>,
}

/// Live video elements keyed by item. Holds browser objects, so it is a
/// non-send resource and every system touching it runs on the main thread.
/// Natively it never holds anything.
#[derive(Default)]
pub struct VideoSurfaces {
    #[cfg(target_arch = "wasm32")]
    surfaces: HashMap<String, VideoSurface>,
}

#[cfg(target_arch = "wasm32")]
fn js_error(context: &str, value: wasm_bindgen::JsValue) -> MediaError {
    MediaError::Video(format!("{context}: {value:?}"))
}

#[cfg(target_arch = "wasm32")]
impl VideoSurfaces {
    pub fn open(
        &mut self,
        key: &str,
        url: &str,
        images: &mut Assets<Image>,
    ) -> Result<Handle<Image>, MediaError> {
        use wasm_bindgen::JsCast;
        use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement};

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| MediaError::Video("document not available".into()))?;

        // Canvas first: nothing starts playing unless the surface is complete.
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| js_error("create canvas", e))?
            .dyn_into()
            .map_err(|e| js_error("canvas element", e.into()))?;
        canvas.set_width(VIDEO_FRAME_SIZE);
        canvas.set_height(VIDEO_FRAME_SIZE);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| js_error("2d context", e))?
            .ok_or_else(|| MediaError::Video("2d context not available".into()))?
            .dyn_into()
            .map_err(|e| js_error("2d context", e.into()))?;

        let element: HtmlVideoElement = document
            .create_element("video")
            .map_err(|e| js_error("create video", e))?
            .dyn_into()
            .map_err(|e| js_error("video element", e.into()))?;
        element.set_cross_origin(Some("anonymous"));
        element.set_muted(true);
        element.set_loop(true);
        element
            .set_attribute("playsinline", "")
            .map_err(|e| js_error("playsinline", e))?;
        element.set_src(url);
        if let Err(e) = element.play() {
            warn!("Video for {} refused to start: {:?}", key, e);
        }

        let texture = images.add(blank_video_texture());
        self.surfaces.insert(
            key.to_owned(),
            VideoSurface {
                element,
                context,
                texture: texture.clone(),
            },
        );
        Ok(texture)
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    #[cfg(test)]
    fn is_paused(&self, key: &str) -> Option<bool> {
        self.surfaces.get(key).map(|surface| surface.element.paused())
    }

    /// Stop playback and detach the source so the browser frees the decoder.
    pub fn close(&mut self, key: &str) {
        let Some(surface) = self.surfaces.remove(key) else {
            return;
        };
        if let Err(e) = surface.element.pause() {
            warn!("Failed to pause video for {}: {:?}", key, e);
        }
        let _ = surface.element.remove_attribute("src");
        surface.element.load();
    }

    /// Copy the current frame of every playing video into its texture.
    pub fn upload_frames(&self, images: &mut Assets<Image>) {
        const HAVE_CURRENT_DATA: u16 = 2;
        let size = f64::from(VIDEO_FRAME_SIZE);

        for (key, surface) in &self.surfaces {
            if surface.element.ready_state() < HAVE_CURRENT_DATA {
                continue;
            }
            if let Err(e) = surface
                .context
                .draw_image_with_html_video_element_and_dw_and_dh(
                    &surface.element,
                    0.0,
                    0.0,
                    size,
                    size,
                )
            {
                debug!("Video frame for {} not drawable: {:?}", key, e);
                continue;
            }
            // Fails for cross-origin media without CORS headers.
            let frame = match surface.context.get_image_data(0.0, 0.0, size, size) {
                Ok(frame) => frame,
                Err(e) => {
                    debug!("Video frame for {} not readable: {:?}", key, e);
                    continue;
                }
            };
            if let Some(image) = images.get_mut(&surface.texture) {
                image.data = Some(frame.data().0);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl VideoSurfaces {
    pub fn open(
        &mut self,
        _key: &str,
        _url: &str,
        _images: &mut Assets<Image>,
    ) -> Result<Handle<Image>, MediaError> {
        Err(MediaError::Video(
            "video playback is only available in the browser".into(),
        ))
    }

    pub fn is_empty(&self) -> bool {
        true
    }

    pub fn close(&mut self, _key: &str) {}

    pub fn upload_frames(&self, _images: &mut Assets<Image>) {}
}

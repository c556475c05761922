#![cfg(target_arch = "wasm32")]
use instant::Instant;
use scene_core::{InputEvent, InputQueue, SceneConfig, Stage, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod render;

use constants::*;

/// Fetch the gradient map; the loaded element is handed to the frame loop.
fn load_gradient_image(pending: &Rc<RefCell<Option<web::HtmlImageElement>>>) -> anyhow::Result<()> {
    let image = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let image_loaded = image.clone();
    let pending = pending.clone();
    let onload = Closure::wrap(Box::new(move || {
        log::info!("[scene] gradient image loaded");
        *pending.borrow_mut() = Some(image_loaded.clone());
    }) as Box<dyn FnMut()>);
    _ = image.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref());
    onload.forget();

    let onerror = Closure::wrap(Box::new(move || {
        log::warn!("[scene] gradient image failed to load; keeping fallback ramp");
    }) as Box<dyn FnMut()>);
    _ = image.add_event_listener_with_callback("error", onerror.as_ref().unchecked_ref());
    onerror.forget();

    image.set_src(GRADIENT_TEXTURE_URL);
    Ok(())
}

fn prepare_video(video: &web::HtmlVideoElement) {
    // autoplay is only allowed for muted media
    video.set_muted(true);
    video.set_loop(true);
    video.set_autoplay(true);
    _ = video.set_attribute("playsinline", "");
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scroll-scene starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::query_canvas(&document, CANVAS_SELECTOR)?;
    let video = dom::video_by_id(&document, VIDEO_ELEMENT_ID)?;
    prepare_video(&video);

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    let (width, height) = dom::viewport_size(&window);
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let mut stage = Stage::new(SceneConfig::default().with_seed(seed), Viewport::new(width, height))
        .map_err(|e| anyhow::anyhow!("scene build failed: {}", e))?;

    let queue = Rc::new(RefCell::new(InputQueue::new()));
    events::wire_input_handlers(events::InputWiring {
        window: window.clone(),
        canvas: canvas.clone(),
        video: video.clone(),
        queue: queue.clone(),
    });
    // the page may be restored mid-scroll, or the video cached and already decoded
    let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
    queue.borrow_mut().push(InputEvent::Scroll { scroll_y });
    if video.ready_state() >= VIDEO_HAVE_CURRENT_DATA {
        events::push_video_loaded(&video, &queue);
        _ = video.play();
    }
    // apply the startup events before the renderer sizes its video texture
    let startup = queue.borrow_mut().drain();
    if let Err(e) = stage.handle_events(startup) {
        log::error!("[scene] startup events failed: {}", e);
    }

    let pending_gradient = Rc::new(RefCell::new(None));
    if let Err(e) = load_gradient_image(&pending_gradient) {
        log::warn!("[scene] gradient image not requested: {:?}", e);
    }

    let gpu = frame::init_gpu(&canvas, &stage).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        stage,
        queue,
        canvas,
        video,
        gpu,
        pending_gradient,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

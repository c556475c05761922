use crate::render;
use instant::Instant;
use scene_core::{InputQueue, Stage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub stage: Stage,
    pub queue: Rc<RefCell<InputQueue>>,
    pub canvas: web::HtmlCanvasElement,
    pub video: web::HtmlVideoElement,
    pub gpu: Option<render::GpuState<'a>>,
    // set by the image onload handler, consumed on the next frame
    pub pending_gradient: Rc<RefCell<Option<web::HtmlImageElement>>>,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        // Drain first so listeners firing during this frame land in the next one.
        let events = self.queue.borrow_mut().drain();
        match self.stage.handle_events(events) {
            Ok(outcome) => {
                if outcome.layout_changed {
                    log::debug!("[layout] updated");
                }
            }
            Err(e) => log::error!("[scene] event handling failed: {}", e),
        }

        if let Some(g) = &mut self.gpu {
            if self.stage.video_texture.take_needs_update() {
                g.set_video_fit(self.stage.video_texture.fit, self.stage.video_texture.size);
            }
            if let Some(image) = self.pending_gradient.borrow_mut().take() {
                g.set_gradient_image(&image);
            }
        }

        let elapsed = self.started.elapsed().as_secs_f32();
        if let Err(e) = self.stage.tick(elapsed) {
            log::error!("[scene] tick failed: {}", e);
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            g.upload_video_frame(&self.video);
            if let Err(e) = g.render(&self.stage) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    stage: &Stage,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, stage).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

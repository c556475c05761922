use crate::dom;
use scene_core::{InputEvent, InputQueue};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Shared handles the DOM listeners write into.
#[derive(Clone)]
pub struct InputWiring {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub video: web::HtmlVideoElement,
    pub queue: Rc<RefCell<InputQueue>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_resize(&w);
    wire_scroll(&w);
    wire_mousemove(&w);
    wire_video_loaded(&w);
}

fn wire_resize(w: &InputWiring) {
    let w = w.clone();
    let target = w.window.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&w.canvas);
        let (width, height) = dom::viewport_size(&w.window);
        w.queue
            .borrow_mut()
            .push(InputEvent::Resize { width, height });
    }) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_scroll(w: &InputWiring) {
    let w = w.clone();
    let target = w.window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let scroll_y = w.window.scroll_y().unwrap_or(0.0) as f32;
        w.queue.borrow_mut().push(InputEvent::Scroll { scroll_y });
    }) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_mousemove(w: &InputWiring) {
    let w = w.clone();
    let target = w.window.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        w.queue.borrow_mut().push(InputEvent::CursorMove {
            client_x: ev.client_x() as f32,
            client_y: ev.client_y() as f32,
        });
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_video_loaded(w: &InputWiring) {
    let w = w.clone();
    let target = w.video.clone();
    let closure = Closure::wrap(Box::new(move || {
        push_video_loaded(&w.video, &w.queue);
        _ = w.video.play();
    }) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback("loadeddata", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn push_video_loaded(video: &web::HtmlVideoElement, queue: &Rc<RefCell<InputQueue>>) {
    queue.borrow_mut().push(InputEvent::VideoLoaded {
        width: video.video_width(),
        height: video.video_height(),
    });
}

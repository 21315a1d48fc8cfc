//! Browser host for the Pong clock
//!
//! Owns the canvas, a `PongClock` reading Indian Standard Time and the three
//! browser callbacks that drive it: animation frames, a one-second interval
//! and viewport resizes. Everything runs on the page's main thread.

#![cfg(target_arch = "wasm32")]

mod canvas;

use std::cell::RefCell;
use std::rc::Rc;

use canvas::CanvasRenderer;
use clock_core::{IstClock, PongClock};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, VisibilityState, Window};

const CANVAS_ID: &str = "pong-clock";

struct Host {
    app: PongClock<IstClock>,
    renderer: CanvasRenderer,
    interval_id: Option<i32>,
}

thread_local! {
    static HOST: RefCell<Option<Rc<RefCell<Host>>>> = const { RefCell::new(None) };
}

#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }

    let window = browser_window()?;
    let canvas = find_or_create_canvas(&window)?;
    let (width, height) = viewport_size(&window);

    let renderer = CanvasRenderer::new(canvas)?;
    renderer.set_size(width as u32, height as u32);

    let clock = IstClock::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let seed = js_sys::Date::now() as u64;
    let mut app = PongClock::new(clock, width, height, seed);
    app.start(now_ms(&window));
    log::info!("Pong clock running with seed {}", seed);

    let host = Rc::new(RefCell::new(Host {
        app,
        renderer,
        interval_id: None,
    }));

    let interval_id = setup_poller(&window, host.clone())?;
    host.borrow_mut().interval_id = Some(interval_id);
    setup_resize(&window, host.clone())?;
    setup_visibility(&window, host.clone())?;
    request_animation_frame(host.clone());

    HOST.with(|slot| *slot.borrow_mut() = Some(host));
    Ok(())
}

/// Stop polling and drawing; the page keeps the last frame
#[wasm_bindgen]
pub fn stop() {
    with_host(|host| {
        host.app.stop();
        if let (Some(id), Ok(window)) = (host.interval_id.take(), browser_window()) {
            window.clear_interval_with_handle(id);
        }
    });
}

/// Current frame state as JSON, for page scripts and debugging
#[wasm_bindgen]
pub fn snapshot_json() -> Result<String, JsValue> {
    with_host(|host| serde_json::to_string(&host.app.snapshot()))
        .ok_or_else(|| JsValue::from_str("Pong clock not started"))?
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize snapshot: {}", e)))
}

fn with_host<T>(f: impl FnOnce(&mut Host) -> T) -> Option<T> {
    HOST.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|host| f(&mut host.borrow_mut()))
    })
}

fn browser_window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window"))
}

fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn viewport_size(window: &Window) -> (f32, f32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn find_or_create_canvas(window: &Window) -> Result<HtmlCanvasElement, JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    if let Some(existing) = document.get_element_by_id(CANVAS_ID) {
        return existing
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("Clock element is not a canvas"));
    }

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("Failed to create canvas"))?;
    canvas.set_id(CANVAS_ID);
    canvas.style().set_property("display", "block")?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("No document body"))?;
    body.style().set_property("margin", "0")?;
    body.style().set_property("overflow", "hidden")?;
    body.append_child(&canvas)?;
    Ok(canvas)
}

fn request_animation_frame(host: Rc<RefCell<Host>>) {
    let closure = Closure::once(move |timestamp: f64| {
        frame_loop(host, timestamp);
    });
    if let Err(err) = schedule_frame(closure) {
        log::error!("requestAnimationFrame failed, frame loop stopped: {:?}", err);
    }
}

/// Hand `closure` to the next animation frame; it is only leaked once scheduled
fn schedule_frame(closure: Closure<dyn FnMut(f64)>) -> Result<(), JsValue> {
    let window = browser_window()?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn frame_loop(host: Rc<RefCell<Host>>, timestamp: f64) {
    {
        let mut h = host.borrow_mut();
        if !h.app.is_running() {
            return;
        }
        let Host { app, renderer, .. } = &mut *h;
        // A suspended driver discards the frame; keep asking so resume is immediate
        app.frame(timestamp, renderer);
    }
    request_animation_frame(host);
}

fn setup_poller(window: &Window, host: Rc<RefCell<Host>>) -> Result<i32, JsValue> {
    let interval_ms = host.borrow().app.simulation().config().poll_interval_ms;
    let closure = Closure::<dyn FnMut()>::new(move || {
        host.borrow_mut().app.poll();
    });
    let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        interval_ms as i32,
    )?;
    closure.forget();
    Ok(id)
}

fn setup_resize(window: &Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let Ok(window) = browser_window() else {
            return;
        };
        let (width, height) = viewport_size(&window);
        let mut h = host.borrow_mut();
        h.renderer.set_size(width as u32, height as u32);
        h.app.resize(width, height);
    });
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn setup_visibility(window: &Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let hidden = browser_window()
            .ok()
            .and_then(|w| w.document())
            .map(|d| d.visibility_state() == VisibilityState::Hidden)
            .unwrap_or(false);
        let mut h = host.borrow_mut();
        if hidden {
            log::info!("Page hidden, frames suspended");
            h.app.suspend_frames();
        } else {
            log::info!("Page visible, frames resumed");
            h.app.resume_frames();
        }
    });
    document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#![cfg(target_arch = "wasm32")]
//! Browser host for the flowfield.
//!
//! Finds `#canvas1`, sizes it to the window, and runs a [`Session`] on
//! `requestAnimationFrame`. Pointer and touch input feed the shared
//! pointer tracker; a window resize cancels the pending frame, rebuilds the
//! engine with fresh defaults and rebuilds the control panel.

mod frames;
mod input;
mod panel;
mod surface;

use flowfield_core::{Engine, FieldError};
use flowfield_engine::Session;
use frames::{AnimationFrames, FrameCallback};
use panel::Panel;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use surface::CanvasSurface;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

const CANVAS_ID: &str = "canvas1";

type WebSession = Session<CanvasSurface, AnimationFrames>;
type PanelSlot = Rc<RefCell<Option<Panel>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flowfield starting");

    init().map_err(|e| {
        log::error!("init error: {e}");
        JsValue::from_str(&e.to_string())
    })
}

fn init() -> Result<(), FieldError> {
    let window = web::window().ok_or_else(|| FieldError::Surface("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| FieldError::Surface("no document".into()))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| FieldError::Surface(format!("missing #{CANVAS_ID}")))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| FieldError::Surface(format!("#{CANVAS_ID} is not a canvas")))?;

    let (width, height) = input::window_size(&window);
    canvas.set_width(width);
    canvas.set_height(height);
    let surface = CanvasSurface::from_canvas(&canvas)?;

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let scheduler = AnimationFrames::new(window.clone(), callback.clone());
    let session: Rc<RefCell<WebSession>> = Rc::new(RefCell::new(Session::new(
        surface.clone(),
        width,
        height,
        scheduler,
    )?));
    {
        let weak = Rc::downgrade(&session);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(s) = weak.upgrade() {
                s.borrow_mut().on_frame(timestamp);
            }
        }) as Box<dyn FnMut(f64)>));
    }

    input::wire_pointer(&window, session.borrow().pointer());
    session.borrow_mut().start()?;

    let panel: PanelSlot = Rc::new(RefCell::new(None));
    rebuild_panel(&document, &session, &panel);

    input::wire_resize(&window, move |w, h| {
        canvas.set_width(w);
        canvas.set_height(h);
        let resized = session.borrow_mut().resize(surface.clone(), w, h);
        match resized {
            Ok(_) => rebuild_panel(&document, &session, &panel),
            Err(e) => log::error!("resize to {w}x{h} failed: {e}"),
        }
    });

    log::info!("flowfield running at {width}x{height}");
    Ok(())
}

/// Replaces the control panel with one showing the engine's current values.
fn rebuild_panel(document: &web::Document, session: &Rc<RefCell<WebSession>>, slot: &PanelSlot) {
    slot.borrow_mut().take();
    let values = Engine::params(session.borrow().engine());

    let weak = Rc::downgrade(session);
    let on_change: Rc<dyn Fn(&str, f64)> = Rc::new(move |name: &str, value: f64| {
        if let Some(s) = weak.upgrade() {
            bind(s.borrow_mut().engine_mut(), name, value);
        }
    });
    let weak = Rc::downgrade(session);
    let on_toggle: Rc<dyn Fn()> = Rc::new(move || {
        if let Some(s) = weak.upgrade() {
            let started = s.borrow_mut().engine_mut().toggle_pause();
            log::info!("animation {}", if started { "resumed" } else { "paused" });
        }
    });

    match Panel::build(document, &values, on_change, on_toggle) {
        Ok(p) => *slot.borrow_mut() = Some(p),
        Err(e) => log::warn!("control panel unavailable: {e}"),
    }
}

fn bind(engine: &mut dyn Engine, name: &str, value: f64) {
    if let Err(e) = engine.set_param(name, &json!(value)) {
        log::warn!("rejected {name}={value}: {e}");
    }
}

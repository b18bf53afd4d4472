use flowfield_core::PointerTracker;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// ---------------- Pointer and touch ----------------

fn touch_points(ev: &web::TouchEvent) -> Vec<(f64, f64)> {
    let list = ev.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
        .collect()
}

/// Routes pointer-move, touch-move and touch-start into `pointer` for the
/// lifetime of the page.
pub fn wire_pointer(window: &web::Window, pointer: &PointerTracker) {
    let p = pointer.clone();
    let on_move = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        p.set_position(ev.client_x() as f64, ev.client_y() as f64);
    }) as Box<dyn FnMut(web::PointerEvent)>);
    let _ = window.add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref());
    on_move.forget();

    for kind in ["touchmove", "touchstart"] {
        let p = pointer.clone();
        let on_touch = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            p.set_from_touches(&touch_points(&ev));
        }) as Box<dyn FnMut(web::TouchEvent)>);
        let _ = window.add_event_listener_with_callback(kind, on_touch.as_ref().unchecked_ref());
        on_touch.forget();
    }
}

// ---------------- Resize ----------------

/// Window inner size in CSS pixels, at least 1x1.
pub fn window_size(window: &web::Window) -> (u32, u32) {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

pub fn wire_resize(window: &web::Window, mut handler: impl FnMut(u32, u32) + 'static) {
    let w = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = window_size(&w);
        handler(width, height);
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

//! DOM control panel bound to the tunable parameter surface.
//!
//! One range slider per tunable plus a pause/resume button. The panel is
//! rebuilt from scratch on every resize; dropping it detaches its element
//! and releases its listeners.

use flowfield_core::{FieldError, PARAM_SPECS};
use serde_json::Value;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const PANEL_ID: &str = "flowfield-panel";
const HINT: &str = "set cellSize to 1 :)";

pub struct Panel {
    root: web::Element,
    _listeners: Vec<Closure<dyn FnMut(web::Event)>>,
}

fn dom_err(e: wasm_bindgen::JsValue) -> FieldError {
    FieldError::Surface(format!("{e:?}"))
}

impl Panel {
    /// Builds the panel showing `values` and appends it to the body.
    ///
    /// `on_change(name, value)` fires for every slider input; `on_toggle`
    /// fires on the pause/resume button.
    pub fn build(
        document: &web::Document,
        values: &Value,
        on_change: Rc<dyn Fn(&str, f64)>,
        on_toggle: Rc<dyn Fn()>,
    ) -> Result<Self, FieldError> {
        let root = document.create_element("div").map_err(dom_err)?;
        root.set_id(PANEL_ID);
        let mut listeners = Vec::new();

        let hint = document.create_element("p").map_err(dom_err)?;
        hint.set_text_content(Some(HINT));
        root.append_child(&hint).map_err(dom_err)?;

        for spec in PARAM_SPECS {
            let label = document.create_element("label").map_err(dom_err)?;
            label.set_text_content(Some(spec.name));
            let input = document
                .create_element("input")
                .map_err(dom_err)?
                .dyn_into::<web::HtmlInputElement>()
                .map_err(|_| FieldError::Surface("input element has unexpected type".into()))?;
            input.set_type("range");
            input.set_min(&spec.min.to_string());
            input.set_max(&spec.max.to_string());
            match spec.slider_step() {
                Some(step) => input.set_step(&step.to_string()),
                None => input.set_step("any"),
            }
            if let Some(v) = values.get(spec.name).and_then(Value::as_f64) {
                input.set_value(&v.to_string());
            }

            let name = spec.name;
            let source = input.clone();
            let on_change = on_change.clone();
            let listener = Closure::wrap(Box::new(move |_ev: web::Event| {
                on_change(name, source.value_as_number());
            }) as Box<dyn FnMut(web::Event)>);
            input
                .add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())
                .map_err(dom_err)?;
            listeners.push(listener);

            label.append_child(&input).map_err(dom_err)?;
            root.append_child(&label).map_err(dom_err)?;
        }

        let button = document.create_element("button").map_err(dom_err)?;
        button.set_text_content(Some("pause/resume"));
        let on_click = Closure::wrap(Box::new(move |_ev: web::Event| on_toggle())
            as Box<dyn FnMut(web::Event)>);
        button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        listeners.push(on_click);
        root.append_child(&button).map_err(dom_err)?;

        let body = document
            .body()
            .ok_or_else(|| FieldError::Surface("document has no body".into()))?;
        body.append_child(&root).map_err(dom_err)?;

        Ok(Self {
            root,
            _listeners: listeners,
        })
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        self.root.remove();
    }
}

//! Rust closures the chart shim calls back into.
//!
//! Hooks live on `window.__aidHooks`. Installing a hook under a name that is
//! already taken replaces (and drops) the previous closure, so re-rendering a
//! plot never leaks the closures of the old one.

use aid_plot::axis::{time_splits, TickFormat};
use aid_plot::quadtree::HitRect;
use aid_plot::CirclesInteraction;
use js_sys::{Array, Object, Reflect};
use log::debug;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

const HOOKS_KEY: &str = "__aidHooks";

thread_local! {
    static INSTALLED: RefCell<HashMap<&'static str, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

fn hooks_object() -> Result<Object, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let existing = Reflect::get(&window, &JsValue::from_str(HOOKS_KEY))?;
    if existing.is_object() {
        return Ok(existing.unchecked_into());
    }
    let hooks = Object::new();
    Reflect::set(&window, &JsValue::from_str(HOOKS_KEY), &hooks)?;
    Ok(hooks)
}

fn set_hook<F: ?Sized + 'static>(name: &'static str, closure: Closure<F>) -> Result<(), JsValue> {
    let hooks = hooks_object()?;
    Reflect::set(&hooks, &JsValue::from_str(name), closure.as_ref())?;
    INSTALLED.with(|installed| installed.borrow_mut().insert(name, Box::new(closure)));
    Ok(())
}

fn labels_to_js(labels: Vec<Option<String>>) -> Array {
    labels
        .into_iter()
        .map(|l| l.map_or(JsValue::NULL, |s| JsValue::from_str(&s)))
        .collect()
}

/// `formatTicks(format, values)` and `timeSplits(width, min, max)`.
pub fn install_tick_hooks() -> Result<(), JsValue> {
    let format_ticks = Closure::<dyn Fn(String, Array) -> Array>::wrap(Box::new(
        |format: String, values: Array| {
            let format: TickFormat =
                serde_json::from_value(serde_json::Value::String(format)).unwrap_or(TickFormat::Default);
            let values: Vec<f64> = values
                .iter()
                .map(|v| v.as_f64().unwrap_or(f64::NAN))
                .collect();
            labels_to_js(format.labels(&values))
        },
    ));
    set_hook("formatTicks", format_ticks)?;

    let splits = Closure::<dyn Fn(f64, f64, f64) -> Array>::wrap(Box::new(
        |width: f64, min: f64, max: f64| {
            time_splits(width, min, max)
                .into_iter()
                .map(JsValue::from_f64)
                .collect()
        },
    ));
    set_hook("timeSplits", splits)
}

/// Hit-testing, legend and gesture hooks for one circles plot.
///
/// Coordinates are canvas pixels relative to the plot area; `clear` also
/// passes the device pixel ratio so the click threshold stays in CSS pixels.
pub fn install_circles(interaction: CirclesInteraction) -> Result<(), JsValue> {
    let state = Rc::new(RefCell::new(interaction));

    let s = state.clone();
    set_hook(
        "clear",
        Closure::<dyn Fn(f64, f64, f64, f64, f64)>::wrap(Box::new(move |w, h, min, max, dpr| {
            let mut interaction = s.borrow_mut();
            interaction.draw_clear(w, h, min, max);
            interaction.set_pixel_ratio(dpr);
        })),
    )?;

    let s = state.clone();
    set_hook(
        "addRect",
        Closure::<dyn Fn(f64, f64, f64, f64, u32, u32)>::wrap(Box::new(
            move |x, y, w, h, series, index| {
                s.borrow_mut()
                    .add_rect(HitRect::new(x, y, w, h, series as usize, index as usize));
            },
        )),
    )?;

    let s = state.clone();
    set_hook(
        "hover",
        Closure::<dyn Fn(f64, f64) -> bool>::wrap(Box::new(move |x, y| {
            s.borrow_mut().hover(x, y).is_some()
        })),
    )?;

    let s = state.clone();
    set_hook(
        "dataIdx",
        Closure::<dyn Fn(u32) -> u32>::wrap(Box::new(move |series| {
            s.borrow().hover_state().data_index(series as usize) as u32
        })),
    )?;

    let s = state.clone();
    set_hook(
        "pointSize",
        Closure::<dyn Fn(u32) -> f64>::wrap(Box::new(move |series| {
            s.borrow().hover_state().point_size(series as usize)
        })),
    )?;

    let s = state.clone();
    set_hook(
        "legend",
        Closure::<dyn Fn() -> String>::wrap(Box::new(move || s.borrow().legend_text())),
    )?;

    let s = state.clone();
    set_hook(
        "pointerDown",
        Closure::<dyn Fn(f64, f64)>::wrap(Box::new(move |x, y| {
            s.borrow_mut().pointer_down(x, y);
        })),
    )?;

    let s = state.clone();
    set_hook(
        "pointerMove",
        Closure::<dyn Fn(f64, f64)>::wrap(Box::new(move |x, y| {
            s.borrow_mut().pointer_move(x, y);
        })),
    )?;

    let s = state.clone();
    set_hook(
        "pointerUp",
        Closure::<dyn Fn(f64, f64) -> bool>::wrap(Box::new(move |x, y| {
            let outcome = s.borrow_mut().pointer_up(x, y);
            debug!("[AID] circles: pointer up {:?}", outcome);
            outcome.is_some()
        })),
    )?;

    let s = state;
    set_hook(
        "band",
        Closure::<dyn Fn() -> JsValue>::wrap(Box::new(move || match s.borrow().band_span() {
            Some((left, width)) => {
                Array::of2(&JsValue::from_f64(left), &JsValue::from_f64(width)).into()
            }
            None => JsValue::NULL,
        })),
    )
}

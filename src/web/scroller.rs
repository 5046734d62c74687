//! Binding to the page's scroll driver (scrollama, loaded as a global).

use log::{debug, error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::dom;
use crate::config::ScrollConfig;
use crate::error::{NarrativeError, Result};
use crate::tally::{Direction, StepEvent};

#[wasm_bindgen]
extern "C" {
    type Scrollama;

    #[wasm_bindgen(catch, js_name = scrollama)]
    fn scrollama() -> std::result::Result<Scrollama, JsValue>;

    #[wasm_bindgen(method)]
    fn setup(this: &Scrollama, options: &JsValue) -> Scrollama;

    #[wasm_bindgen(method, js_name = onStepEnter)]
    fn on_step_enter(this: &Scrollama, callback: &js_sys::Function) -> Scrollama;

    #[wasm_bindgen(method, js_name = onStepExit)]
    fn on_step_exit(this: &Scrollama, callback: &js_sys::Function) -> Scrollama;

    #[wasm_bindgen(method)]
    fn resize(this: &Scrollama);
}

/// `{ element, index, direction }` as delivered to step callbacks.
struct StepResponse {
    step: u32,
    direction: Direction,
}

fn parse_response(resp: &JsValue) -> Result<StepResponse> {
    let element: Element = js_sys::Reflect::get(resp, &JsValue::from_str("element"))?
        .dyn_into()
        .map_err(|_| NarrativeError::missing("step response element"))?;
    let direction = js_sys::Reflect::get(resp, &JsValue::from_str("direction"))?
        .as_string()
        .unwrap_or_default()
        .parse()?;
    let raw = element
        .get_attribute("data-step")
        .ok_or_else(|| NarrativeError::missing("data-step"))?;
    let step = raw
        .trim()
        .parse()
        .map_err(|_| NarrativeError::InvalidStep { value: raw.clone() })?;
    Ok(StepResponse {
        step,
        direction,
    })
}

fn options(cfg: &ScrollConfig) -> Result<JsValue> {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"step".into(), &cfg.step_selector.as_str().into())?;
    js_sys::Reflect::set(&obj, &"offset".into(), &cfg.offset.into())?;
    js_sys::Reflect::set(&obj, &"debug".into(), &cfg.debug.into())?;
    Ok(obj.into())
}

/// Wire step callbacks into `on_event`. A missing driver is logged and the
/// page stays readable without a live tally.
pub fn install(cfg: &ScrollConfig, on_event: impl Fn(StepEvent) + 'static) -> Result<()> {
    let scroller = match scrollama() {
        Ok(s) => s,
        Err(e) => {
            error!("scroll driver unavailable: {e:?}");
            return Ok(());
        }
    };
    let on_event = std::rc::Rc::new(on_event);

    let enter_handler = on_event.clone();
    let enter = Closure::wrap(Box::new(move |resp: JsValue| match parse_response(&resp) {
        Ok(r) => enter_handler(StepEvent::Enter {
            step: r.step,
            direction: r.direction,
        }),
        Err(e) => warn!("ignoring step enter: {e}"),
    }) as Box<dyn FnMut(JsValue)>);

    let exit = Closure::wrap(Box::new(move |resp: JsValue| match parse_response(&resp) {
        Ok(r) => on_event(StepEvent::Exit {
            step: r.step,
            direction: r.direction,
        }),
        Err(e) => warn!("ignoring step exit: {e}"),
    }) as Box<dyn FnMut(JsValue)>);

    scroller
        .setup(&options(cfg)?)
        .on_step_enter(enter.as_ref().unchecked_ref())
        .on_step_exit(exit.as_ref().unchecked_ref());
    enter.forget();
    exit.forget();

    let win = dom::window()?;
    dom::listen(&win, "resize", move |_| scroller.resize())?;
    debug!("scroll driver attached to {:?}", cfg.step_selector);
    Ok(())
}

//! Draws the timeline spine and event dots into `#timelineLine`.

use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::board::create_svg_element;
use super::dom;
use crate::config::NarrativeConfig;
use crate::error::Result;
use crate::render::svg::to_svg;
use crate::render::{plan_timeline, select_renderer, DotSample, Rect};

const CONTAINER_SELECTOR: &str = ".timeline-container";
const DOT_SELECTOR: &str = ".event-dot";

fn rect_of(el: &web_sys::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Measure the page and redraw. Missing pieces are a silent no-op.
pub fn draw(cfg: &NarrativeConfig) -> Result<()> {
    let doc = dom::document()?;
    let Some(svg) = dom::by_id(&doc, "timelineLine") else {
        warn!("timeline line element not found");
        return Ok(());
    };
    let Some(container) = svg.closest(CONTAINER_SELECTOR)? else {
        return Ok(());
    };
    let events = dom::query_all_in(&container, &cfg.scroll.event_selector);
    let (Some(first), Some(last)) = (events.first(), events.last()) else {
        return Ok(());
    };
    // Without both end dots there is no spine to draw.
    if first.query_selector(DOT_SELECTOR)?.is_none() || last.query_selector(DOT_SELECTOR)?.is_none()
    {
        return Ok(());
    }

    let samples: Vec<DotSample> = events
        .iter()
        .filter_map(|ev| {
            let dot = ev.query_selector(DOT_SELECTOR).ok().flatten()?;
            Some(DotSample {
                rect: rect_of(&dot),
                active: dom::has_class(ev, "is-active"),
            })
        })
        .collect();

    let mut bounds = rect_of(&container);
    if let Some(html) = container.dyn_ref::<HtmlElement>() {
        bounds.width = html.offset_width() as f64;
    }
    let Some(plan) = plan_timeline(bounds, container.scroll_height() as f64, &samples) else {
        return Ok(());
    };

    svg.set_attribute("width", &plan.width.to_string())?;
    svg.set_attribute("height", &plan.height.to_string())?;
    svg.set_attribute("viewBox", &plan.view_box())?;
    svg.set_inner_html("");

    let style = &cfg.timeline;
    let renderer = select_renderer(cfg.renderer, style.sketch);
    for d in plan.draw(renderer.as_ref(), style) {
        let el = create_svg_element(&doc, &to_svg(&d))?;
        svg.append_child(&el)?;
    }
    debug!("timeline drawn with {} dots", plan.dots.len());
    Ok(())
}

pub fn redraw_after(cfg: Rc<NarrativeConfig>, ms: i32) {
    dom::set_timeout(ms, move || {
        if let Err(e) = draw(&cfg) {
            warn!("timeline redraw failed: {e}");
        }
    });
}

/// First draw once layout has settled, then redraw after every resize.
pub fn install(cfg: Rc<NarrativeConfig>) -> Result<()> {
    let win = dom::window()?;
    let initial = cfg.clone();
    dom::request_animation_frame(move || {
        let delay = initial.timeline.initial_delay_ms;
        redraw_after(initial, delay);
    });
    dom::listen(&win, "resize", move |_| {
        redraw_after(cfg.clone(), cfg.timeline.resize_delay_ms);
    })
}

//! DOM side of the decorative effects: sound cues, the unmute rat, the rat
//! swarm, image migration, the intro fade-in, and smooth anchor scrolling.
//!
//! State here (`SOUND`, `SWARM`, `AUDIO_CTX`) is separate from the tally
//! session and is only touched from these handlers and their timers.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AudioContext, Document, Element, HtmlAudioElement, HtmlImageElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::{dom, entropy};
use crate::config::NarrativeConfig;
use crate::effects::sound::{UNMUTE_FALL_DELAY_MS, UNMUTE_SQUEAK_DELAY_MS, UNMUTE_SWAP_DELAY_MS};
use crate::effects::{
    migrate_images, near_bottom, plan_swarm, AudioConfig, Cue, SoundState, SwarmConfig,
    SwarmTrigger, IMAGES_MOVED_CLASS,
};
use crate::error::Result;

thread_local! {
    static SOUND: RefCell<SoundState> = RefCell::new(SoundState::new());
    static SWARM: RefCell<SwarmTrigger> = RefCell::new(SwarmTrigger::default());
    static AUDIO_CTX: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

pub fn install(doc: &Document, cfg: Rc<NarrativeConfig>) -> Result<()> {
    setup_unmute_rat(doc, cfg.clone())?;
    setup_mute_toggle(doc)?;
    setup_bottom_detection(cfg.clone())?;
    setup_anchor_scrolling(doc)?;
    observe_intro_fade(doc)?;
    setup_image_migration(doc, cfg)?;
    Ok(())
}

// --- Sound ---------------------------------------------------------------------

/// Start playback; failures (autoplay policy, missing asset) are only logged.
fn start_audio(audio: &AudioConfig, cue: Cue) {
    let (src, volume) = audio.source(cue);
    let el = match HtmlAudioElement::new_with_src(src) {
        Ok(el) => el,
        Err(e) => {
            warn!("could not create audio for {cue:?}: {e:?}");
            return;
        }
    };
    el.set_volume(volume);
    match el.play() {
        Ok(promise) => {
            let on_err = Closure::once(move |err: JsValue| {
                info!("{cue:?} playback failed: {err:?}");
            });
            let _ = promise.catch(&on_err);
            on_err.forget();
        }
        Err(e) => info!("{cue:?} playback failed: {e:?}"),
    }
}

fn play_cue(audio: &AudioConfig, cue: Cue) {
    if SOUND.with(|s| s.borrow_mut().request(cue)) {
        start_audio(audio, cue);
    }
}

fn ensure_audio_context() {
    AUDIO_CTX.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            match AudioContext::new() {
                Ok(ctx) => *slot = Some(ctx),
                Err(e) => warn!("audio context unavailable: {e:?}"),
            }
        }
    });
}

fn setup_unmute_rat(doc: &Document, cfg: Rc<NarrativeConfig>) -> Result<()> {
    let (Some(button), Some(toggle)) = (dom::by_id(doc, "unmuteRat"), dom::by_id(doc, "muteToggle"))
    else {
        return Ok(());
    };
    let target = button.clone();
    dom::listen(&target, "click", move |_| {
        SOUND.with(|s| s.borrow_mut().interact());
        ensure_audio_context();
        dom::add_class(&button, "running");

        let button = button.clone();
        let toggle = toggle.clone();
        let cfg = cfg.clone();
        dom::set_timeout(UNMUTE_FALL_DELAY_MS, move || {
            dom::add_class(&button, "animate-fall");
            dom::set_timeout(UNMUTE_SQUEAK_DELAY_MS, move || play_cue(&cfg.audio, Cue::Squeak));
            dom::set_timeout(UNMUTE_SWAP_DELAY_MS, move || {
                button.remove();
                dom::remove_class(&toggle, "hidden");
            });
        });
    })
}

fn setup_mute_toggle(doc: &Document) -> Result<()> {
    let Some(toggle) = dom::by_id(doc, "muteToggle") else {
        return Ok(());
    };
    let target = toggle.clone();
    dom::listen(&target, "click", move |_| {
        let muted = SOUND.with(|s| s.borrow_mut().toggle_mute());
        if muted {
            dom::add_class(&toggle, "muted");
        } else {
            dom::remove_class(&toggle, "muted");
        }
    })
}

// --- Rat swarm -----------------------------------------------------------------

fn spawn_swarm(cfg: &SwarmConfig) {
    let Ok(doc) = dom::document() else { return };
    let Some(container) = dom::by_id(&doc, "ratSwarm") else {
        return;
    };
    let plan = plan_swarm(cfg, &mut entropy::unit);
    info!("rat swarm: {} rats", plan.len());
    for rat in plan {
        let doc = doc.clone();
        let container = container.clone();
        let src = cfg.image_src.clone();
        let class = cfg.class_name.clone();
        let animation = rat.animation(cfg);
        let remove_after = rat.remove_after_ms(cfg);
        dom::set_timeout(rat.spawn_at_ms, move || {
            let Some(img) = doc
                .create_element("img")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            else {
                return;
            };
            img.set_src(&src);
            img.set_class_name(&class);
            let style = img.style();
            style.set_property("bottom", &format!("{}vh", rat.bottom_vh)).ok();
            style.set_property("animation", &animation).ok();
            if container.append_child(&img).is_ok() {
                dom::set_timeout(remove_after, move || img.remove());
            }
        });
    }
}

fn setup_bottom_detection(cfg: Rc<NarrativeConfig>) -> Result<()> {
    let win = dom::window()?;
    dom::listen(&win, "scroll", move |_| {
        if !SWARM.with(|s| s.borrow_mut().begin_tick()) {
            return;
        }
        let cfg = cfg.clone();
        dom::request_animation_frame(move || {
            if let (Ok(win), Ok(doc)) = (dom::window(), dom::document()) {
                if let Some(root) = doc.document_element() {
                    let scroll_height = root.scroll_height() as f64;
                    let scroll_top = win
                        .page_y_offset()
                        .unwrap_or_else(|_| root.scroll_top() as f64);
                    let client_height = win
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(0.0);
                    let bottom = near_bottom(
                        scroll_top,
                        client_height,
                        scroll_height,
                        cfg.swarm.trigger_distance_px,
                    );
                    if bottom && SWARM.with(|s| s.borrow_mut().fire()) {
                        spawn_swarm(&cfg.swarm);
                    }
                }
            }
            SWARM.with(|s| s.borrow_mut().end_tick());
        });
    })
}

// --- Intersection-driven effects ---------------------------------------------

fn observe(
    target: &Element,
    threshold: f64,
    root_margin: &str,
    mut on_entry: impl FnMut(&IntersectionObserverEntry) + 'static,
) -> Result<()> {
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _obs: IntersectionObserver| {
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                on_entry(&entry);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    init.set_root_margin(root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    observer.observe(target);
    callback.forget();
    Ok(())
}

fn observe_intro_fade(doc: &Document) -> Result<()> {
    let Some(intro_text) = dom::query(doc, ".intro-text") else {
        return Ok(());
    };
    observe(&intro_text, 0.1, "0px 0px -100px 0px", |entry| {
        let target = entry.target();
        if entry.is_intersecting() && !dom::has_class(&target, "animated") {
            dom::add_class(&target, "animated");
        }
    })
}

fn setup_image_migration(doc: &Document, cfg: Rc<NarrativeConfig>) -> Result<()> {
    let (Some(intro), Some(scrolly)) = (dom::query(doc, ".intro"), dom::query(doc, ".scrolly"))
    else {
        return Ok(());
    };
    if dom::by_id(doc, "ratImage").is_none() || dom::by_id(doc, "nyImage").is_none() {
        return Ok(());
    }
    let movers: Vec<Element> = [
        Some(intro),
        dom::query(doc, ".tally-rats"),
        dom::query(doc, ".tally-newyorkers"),
    ]
    .into_iter()
    .flatten()
    .collect();
    observe(&scrolly, 0.1, "0px", move |entry| {
        let m = SOUND.with(|s| migrate_images(entry.is_intersecting(), &mut s.borrow_mut()));
        for el in &movers {
            if m.moved {
                dom::add_class(el, IMAGES_MOVED_CLASS);
            } else {
                dom::remove_class(el, IMAGES_MOVED_CLASS);
            }
        }
        if m.bells {
            start_audio(&cfg.audio, Cue::Bells);
        }
    })
}

// --- Anchors -------------------------------------------------------------------

fn setup_anchor_scrolling(doc: &Document) -> Result<()> {
    for anchor in dom::query_all(doc, "a[href^=\"#\"]") {
        let target = anchor.clone();
        dom::listen(&target, "click", move |evt| {
            evt.prevent_default();
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            let Ok(doc) = dom::document() else { return };
            if let Some(dest) = dom::query(&doc, &href) {
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                opts.set_block(ScrollLogicalPosition::Start);
                dest.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        })?;
    }
    Ok(())
}

//! SVG tally board: `#ratsTally svg` / `#newyorkersTally svg` plus the
//! `#ratsScore` / `#newyorkersScore` readouts.

use log::warn;
use web_sys::{Document, Element};

use super::dom;
use crate::error::Result;
use crate::render::svg::{to_svg, SvgNode, SVG_NS};
use crate::render::Drawable;
use crate::tally::{Contestant, PerContestant, TallyBoard};

/// Delay before a new mark gets its `animate` class, so the CSS transition runs.
pub const MARK_ANIMATE_DELAY_MS: i32 = 50;

pub struct SvgBoard {
    doc: Document,
    containers: PerContestant<Option<Element>>,
    readouts: PerContestant<Option<Element>>,
}

impl SvgBoard {
    pub fn attach(doc: &Document) -> Self {
        let lookup = |c: Contestant| {
            let container = dom::query(doc, &format!("#{}Tally svg", c.tag()));
            if container.is_none() {
                warn!("no tally container for {c}; marks will be counted but not drawn");
            }
            let readout = dom::by_id(doc, &format!("{}Score", c.tag()));
            if readout.is_none() {
                warn!("no score readout for {c}");
            }
            (container, readout)
        };
        let (rats_svg, rats_score) = lookup(Contestant::Rats);
        let (ny_svg, ny_score) = lookup(Contestant::NewYorkers);
        Self {
            doc: doc.clone(),
            containers: PerContestant::new(rats_svg, ny_svg),
            readouts: PerContestant::new(rats_score, ny_score),
        }
    }
}

/// Build (but do not insert) the SVG element for `node`.
pub fn create_svg_element(doc: &Document, node: &SvgNode) -> Result<Element> {
    let el = doc.create_element_ns(Some(SVG_NS), node.tag)?;
    for (name, value) in &node.attrs {
        el.set_attribute(name, value)?;
    }
    for class in &node.classes {
        dom::add_class(&el, class);
    }
    Ok(el)
}

impl TallyBoard for SvgBoard {
    type Handle = Element;

    fn append(&mut self, contestant: Contestant, mark: &Drawable) -> Option<Element> {
        let container = self.containers[contestant].as_ref()?;
        let el = match create_svg_element(&self.doc, &to_svg(mark)) {
            Ok(el) => el,
            Err(e) => {
                warn!("could not build {contestant} mark: {e}");
                return None;
            }
        };
        if let Err(e) = container.append_child(&el) {
            warn!("could not append {contestant} mark: {e:?}");
            return None;
        }
        let animated = el.clone();
        dom::set_timeout(MARK_ANIMATE_DELAY_MS, move || {
            dom::add_class(&animated, "animate");
        });
        Some(el)
    }

    fn remove(&mut self, _contestant: Contestant, handle: Element) {
        handle.remove();
    }

    fn show_score(&mut self, contestant: Contestant, score: u32) {
        if let Some(el) = &self.readouts[contestant] {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    fn clear(&mut self, contestant: Contestant) {
        if let Some(svg) = &self.containers[contestant] {
            svg.set_inner_html("");
        }
    }
}

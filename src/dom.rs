//! web-sys implementations of the surface traits, element lookup and the
//! headline listeners.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

use crate::config::ElementIds;
use crate::error::{Result, SplashError};
use crate::input::{classify, ActivationInput};
use crate::particles::Particle;
use crate::surface::{ParticleLayer, Screen, TextTarget};
use crate::transition::{SplashController, SplashView};

fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    if let Err(e) = el.style().set_property(prop, value) {
        log::warn!("could not set {prop} on #{}: {e:?}", el.id());
    }
}

fn opacity_css(opacity: f32) -> String {
    format!("{}", opacity.clamp(0.0, 1.0))
}

pub struct DomScreen(pub HtmlElement);

impl Screen for DomScreen {
    fn set_opacity(&self, opacity: f32) {
        set_style(&self.0, "opacity", &opacity_css(opacity));
    }

    fn set_interactive(&self, interactive: bool) {
        set_style(&self.0, "pointer-events", if interactive { "auto" } else { "none" });
    }

    fn hide(&self) {
        if let Err(e) = self.0.class_list().add_1("hidden") {
            log::warn!("could not hide #{}: {e:?}", self.0.id());
        }
    }
}

pub struct DomParticleLayer {
    container: HtmlElement,
    document: Document,
}

impl DomParticleLayer {
    pub fn new(container: HtmlElement, document: Document) -> Self {
        Self { container, document }
    }

    fn build(&self, particles: &[Particle]) -> Result<web_sys::DocumentFragment> {
        let fragment = self.document.create_document_fragment();
        for p in particles {
            let el: HtmlElement = self.document.create_element("div")?.dyn_into().map_err(|_| {
                SplashError::WrongElementType { id: "particle".into() }
            })?;
            el.set_class_name(p.kind.class_name());
            let style = el.style();
            style.set_property("left", &p.left_css())?;
            style.set_property("animation", &p.animation_css())?;
            style.set_property("--drift", &p.drift_css())?;
            fragment.append_child(&el)?;
        }
        Ok(fragment)
    }
}

impl ParticleLayer for DomParticleLayer {
    fn particle_count(&self) -> usize {
        self.container.child_element_count() as usize
    }

    fn replace_particles(&self, particles: &[Particle]) {
        self.container.set_inner_html("");
        let appended = self
            .build(particles)
            .and_then(|fragment| self.container.append_child(&fragment).map_err(SplashError::from));
        if let Err(e) = appended {
            log::warn!("particle generation in #{} failed: {e}", self.container.id());
        }
    }

    fn set_opacity(&self, opacity: f32) {
        set_style(&self.container, "opacity", &opacity_css(opacity));
    }
}

pub struct DomText(pub HtmlElement);

impl TextTarget for DomText {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn hide_cursor(&self) {
        set_style(&self.0, "border-right", "none");
    }
}

fn html_element(doc: &Document, id: &str) -> Result<Option<HtmlElement>> {
    match doc.get_element_by_id(id) {
        None => Ok(None),
        Some(el) => el
            .dyn_into::<HtmlElement>()
            .map(Some)
            .map_err(|_| SplashError::WrongElementType { id: id.to_string() }),
    }
}

fn required(doc: &Document, id: &str) -> Result<HtmlElement> {
    html_element(doc, id)?.ok_or_else(|| SplashError::MissingElement { id: id.to_string() })
}

fn optional(doc: &Document, id: &str) -> Result<Option<HtmlElement>> {
    let el = html_element(doc, id)?;
    if el.is_none() {
        log::warn!("optional element #{id} not found, skipping");
    }
    Ok(el)
}

/// Resolved page elements. Screens and headline are required; particle
/// containers and the typed headline degrade to no-ops when absent.
pub struct SplashElements {
    pub headline: HtmlElement,
    pub view: SplashView,
}

impl SplashElements {
    pub fn resolve(doc: &Document, ids: &ElementIds) -> Result<Self> {
        let screen1 = required(doc, &ids.screen1)?;
        let screen2 = required(doc, &ids.screen2)?;
        let headline = required(doc, &ids.headline)?;

        let layer = |id: &str| -> Result<Option<Rc<dyn ParticleLayer>>> {
            Ok(optional(doc, id)?
                .map(|el| Rc::new(DomParticleLayer::new(el, doc.clone())) as Rc<dyn ParticleLayer>))
        };
        let particles1 = layer(&ids.particles1)?;
        let particles2 = layer(&ids.particles2)?;
        let typed_headline = optional(doc, &ids.typed_headline)?
            .map(|el| Rc::new(DomText(el)) as Rc<dyn TextTarget>);

        Ok(Self {
            headline,
            view: SplashView {
                screen1: Rc::new(DomScreen(screen1)),
                screen2: Rc::new(DomScreen(screen2)),
                particles1,
                particles2,
                typed_headline,
            },
        })
    }
}

fn route(controller: &SplashController, event: &Event, input: ActivationInput) {
    let decision = classify(&input);
    if decision.prevent_default {
        event.prevent_default();
    }
    if decision.activate {
        controller.activate_screen2();
    }
}

/// Bind click, touchstart and keydown on the headline for the page lifetime.
pub fn attach_headline_listeners(headline: &Element, controller: &SplashController) -> Result<()> {
    {
        let ctl = controller.clone();
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            route(&ctl, &evt, ActivationInput::Click);
        }) as Box<dyn FnMut(_)>);
        headline.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Non-passive so preventDefault can suppress the follow-up click.
    {
        let ctl = controller.clone();
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            route(&ctl, &evt, ActivationInput::TouchStart);
        }) as Box<dyn FnMut(_)>);
        let opts = web_sys::AddEventListenerOptions::new();
        opts.set_passive(false);
        headline.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;
        closure.forget();
    }

    {
        let ctl = controller.clone();
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            let key = evt.key();
            route(&ctl, &evt, ActivationInput::Key(key));
        }) as Box<dyn FnMut(_)>);
        headline.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

// Landing page shell: navigation and hero inside the vortex header, then
// the signup and contact forms. Static markup; the only live parts are the
// header animation and the form listeners.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlInputElement, HtmlTextAreaElement, Window};

use crate::config::VortexConfig;
use crate::dom::{self, EventListener};
use crate::forms::{FieldSpec, FormKind, FormRecord, FormState, SubmissionSink};
use crate::header::VortexHeader;
use crate::viewport::Viewport;

// Logs to the console and acknowledges with a blocking alert
struct BrowserSink {
    window: Window,
}

impl BrowserSink {
    fn new(window: Window) -> BrowserSink {
        BrowserSink { window }
    }
}

impl SubmissionSink for BrowserSink {
    fn log(&mut self, label: &str, record: &FormRecord) {
        match record_object(record) {
            Ok(object) => console::log_2(&JsValue::from_str(label), &object),
            Err(err) => {
                log::debug!("could not build record object: {:?}", err);
                console::log_2(&JsValue::from_str(label), &JsValue::from_str(&record.to_string()));
            }
        }
    }

    fn acknowledge(&mut self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {:?}", err);
        }
    }
}

fn record_object(record: &FormRecord) -> Result<JsValue, JsValue> {
    let object = js_sys::Object::new();
    for (name, value) in &record.fields {
        js_sys::Reflect::set(&object, &JsValue::from_str(name), &JsValue::from_str(value))?;
    }
    Ok(object.into())
}

struct BoundForm {
    state: Rc<RefCell<FormState>>,
    _listeners: Vec<EventListener>,
}

/// The mounted page. Dropping it tears everything down.
pub struct LandingPage {
    _header: VortexHeader,
    forms: Vec<BoundForm>,
    section: Element,
}

impl LandingPage {
    pub fn mount(parent: &Element, config: VortexConfig) -> Result<LandingPage, JsValue> {
        let window = dom::window()?;
        let viewport = Viewport::from_window(&window)?;
        LandingPage::mount_with_viewport(parent, config, viewport)
    }

    pub fn mount_with_viewport(
        parent: &Element,
        config: VortexConfig,
        viewport: Viewport,
    ) -> Result<LandingPage, JsValue> {
        let sink = Rc::new(RefCell::new(BrowserSink::new(dom::window()?)));
        LandingPage::mount_with_sink(parent, config, viewport, sink)
    }

    // Submissions from both forms go to `sink`
    pub fn mount_with_sink<S>(
        parent: &Element,
        config: VortexConfig,
        viewport: Viewport,
        sink: Rc<RefCell<S>>,
    ) -> Result<LandingPage, JsValue>
    where
        S: SubmissionSink + 'static,
    {
        let document = dom::document()?;

        let hero = build_hero(&document)?;
        let header = VortexHeader::mount_with_viewport(parent, &hero, config, viewport)?;

        let section = dom::create(&document, "section", "dual-forms")?;
        section.set_id("signup");
        let intro = dom::create(&document, "div", "dual-forms-intro")?;
        let heading = dom::create(&document, "h1", "")?;
        dom::append_all(
            &heading,
            &[
                &dom::text(&document, "span", "accent", "Únete")?,
                &dom::text(&document, "span", "", " a nuestra plataforma")?,
            ],
        )?;
        dom::append_all(
            &intro,
            &[
                &heading,
                &dom::text(
                    &document,
                    "p",
                    "",
                    "Elige la opción que mejor se adapte a tus necesidades",
                )?,
            ],
        )?;
        let grid = dom::create(&document, "div", "dual-forms-grid")?;
        dom::append_all(&section, &[&intro, &grid])?;

        let mut forms = Vec::new();
        for &kind in &[FormKind::Signup, FormKind::Lead] {
            let (card, bound) = build_form(&document, kind, sink.clone())?;
            grid.append_child(&card)?;
            forms.push(bound);
        }
        parent.append_child(&section)?;

        log::info!("landing page mounted ({:?})", header.form_factor());
        Ok(LandingPage {
            _header: header,
            forms,
            section,
        })
    }

    pub fn form_state(&self, kind: FormKind) -> Option<FormState> {
        self.forms
            .iter()
            .map(|form| form.state.borrow())
            .find(|state| state.kind() == kind)
            .map(|state| state.clone())
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.section.remove();
    }
}

fn build_hero(document: &Document) -> Result<Element, JsValue> {
    let container = dom::create(document, "div", "container")?;

    let nav = dom::create(document, "nav", "site-nav")?;
    let brand = dom::link(document, "/", "brand", "")?;
    let logo = dom::create(document, "img", "brand-logo")?;
    logo.set_attribute("src", "/images/logo.png")?;
    logo.set_attribute("alt", "Logo")?;
    logo.set_attribute("width", "40")?;
    logo.set_attribute("height", "40")?;
    let wordmark = dom::text(document, "span", "wordmark", "Rockola")?;
    let fly = dom::text(document, "span", "accent", "Fly")?;
    wordmark.append_child(&fly)?;
    dom::append_all(&brand, &[&logo, &wordmark])?;

    let links = dom::create(document, "div", "nav-links")?;
    dom::append_all(
        &links,
        &[
            &dom::link(document, "#features", "nav-link", "Características")?,
            &dom::link(document, "#demo", "nav-link", "Demo")?,
        ],
    )?;
    let signup = dom::link(document, "#signup", "button nav-cta", "Registrarse")?;
    dom::append_all(&nav, &[&brand, &links, &signup])?;

    let hero = dom::create(document, "div", "hero")?;
    let headline = dom::text(document, "h1", "hero-title slide-up", "Revoluciona tu ")?;
    let music = dom::text(document, "span", "accent", "música")?;
    headline.append_child(&music)?;
    let subtitle = dom::text(
        document,
        "p",
        "hero-subtitle slide-up delay-1",
        "La plataforma definitiva para gestionar y compartir tus listas de reproducción.",
    )?;
    let actions = dom::create(document, "div", "hero-actions slide-up delay-2")?;
    let start = dom::link(document, "#signup", "button button-large", "Comenzar ahora")?;
    actions.append_child(&start)?;
    dom::append_all(&hero, &[&headline, &subtitle, &actions])?;

    dom::append_all(&container, &[&nav, &hero])?;
    Ok(container)
}

fn build_form<S>(
    document: &Document,
    kind: FormKind,
    sink: Rc<RefCell<S>>,
) -> Result<(Element, BoundForm), JsValue>
where
    S: SubmissionSink + 'static,
{
    let state = Rc::new(RefCell::new(FormState::new(kind)));
    let mut listeners = Vec::new();

    let card = dom::create(document, "div", "form-card")?;
    let head = dom::create(document, "div", "form-head")?;
    dom::append_all(
        &head,
        &[
            &dom::text(document, "h2", "", kind.title())?,
            &dom::text(document, "p", "", kind.subtitle())?,
        ],
    )?;

    let form = dom::create(document, "form", "capture-form")?;
    form.set_id(kind.id());
    for field in kind.fields() {
        let (row, control) = build_field(document, kind, field)?;
        form.append_child(&row)?;

        let field_state = state.clone();
        let name = field.name;
        listeners.push(EventListener::new(&control, "input", move |event| {
            if let Some(value) = event.target().as_ref().and_then(control_value) {
                field_state.borrow_mut().set(name, &value);
            }
        })?);
    }
    let submit = dom::text(document, "button", "button button-block", kind.submit_label())?;
    submit.set_attribute("type", "submit")?;
    let footnote = dom::text(document, "p", "form-footnote", kind.footnote())?;
    if let Some((text, href)) = kind.footnote_link() {
        let terms = dom::link(document, href, "accent", text)?;
        footnote.append_child(&terms)?;
    }
    dom::append_all(&form, &[&submit, &footnote])?;

    let submit_state = state.clone();
    listeners.push(EventListener::new(&form, "submit", move |event| {
        event.prevent_default();
        if let Err(missing) = submit_state.borrow().submit(&mut *sink.borrow_mut()) {
            log::debug!("{} not submitted: {}", kind.id(), missing);
        }
    })?);

    dom::append_all(&card, &[&head, &form])?;
    Ok((
        card,
        BoundForm {
            state,
            _listeners: listeners,
        },
    ))
}

// Field ids are prefixed with the form id since both forms have `name` and
// `email`
fn build_field(
    document: &Document,
    kind: FormKind,
    field: &FieldSpec,
) -> Result<(Element, Element), JsValue> {
    let id = format!("{}-{}", kind.id(), field.name);
    let row = dom::create(document, "div", "form-row")?;
    let label = dom::text(document, "label", "", field.label)?;
    label.set_attribute("for", &id)?;

    let control = match field.kind.input_type() {
        Some(input_type) => {
            let input = dom::create(document, "input", "form-control")?;
            input.set_attribute("type", input_type)?;
            input
        }
        None => {
            let area = dom::create(document, "textarea", "form-control")?;
            area.set_attribute("rows", "4")?;
            area
        }
    };
    control.set_id(&id);
    control.set_attribute("name", field.name)?;
    control.set_attribute("placeholder", field.placeholder)?;
    if field.required {
        control.set_attribute("required", "")?;
    }

    dom::append_all(&row, &[&label, &control])?;
    Ok((row, control))
}

fn control_value(target: &web_sys::EventTarget) -> Option<String> {
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    target
        .dyn_ref::<HtmlTextAreaElement>()
        .map(|area| area.value())
}


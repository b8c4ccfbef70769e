// Header component: an animated vortex canvas with arbitrary content on top.
//
// Markup produced:
//
// ```text
// div.vortex-header
//   div.vortex-backdrop      (desktop only)
//     canvas.vortex-canvas
//   div.vortex-content
//     <content>
// ```
//
// On a mobile-sized viewport the backdrop is never created. Every resize
// re-measures the window: crossing the breakpoint adds or removes the
// backdrop, otherwise the canvas is resized and the particle pool rebuilt.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, Window};

use crate::animation::AnimationLoop;
use crate::config::VortexConfig;
use crate::dom::{self, EventListener};
use crate::renderer::Renderer;
use crate::utils::Timer;
use crate::viewport::{FormFactor, Viewport};
use crate::vortex::Vortex;

struct Scene {
    vortex: Vortex,
    renderer: Renderer,
}

impl Scene {
    fn frame(&mut self) {
        self.vortex.draw_frame(&mut self.renderer);
    }

    fn resize(&mut self, viewport: &Viewport) {
        self.renderer.resize(viewport);
        self.vortex
            .resize(self.renderer.width(), self.renderer.height());
    }
}

// Everything that only exists while the background is animating
struct ActiveVortex {
    backdrop: Element,
    scene: Rc<RefCell<Scene>>,
    animation: AnimationLoop,
}

impl Drop for ActiveVortex {
    fn drop(&mut self) {
        self.animation.cancel();
        self.backdrop.remove();
    }
}

struct HeaderState {
    window: Window,
    document: Document,
    root: Element,
    config: VortexConfig,
    form_factor: FormFactor,
    active: Option<ActiveVortex>,
}

impl HeaderState {
    fn activate(&mut self, viewport: &Viewport) {
        self.active = None;
        match self.build_backdrop(viewport) {
            Ok(active) => self.active = active,
            Err(err) => log::debug!("vortex background disabled: {:?}", err),
        }
    }

    // Ok(None) means the canvas exists but cannot be drawn on
    fn build_backdrop(&self, viewport: &Viewport) -> Result<Option<ActiveVortex>, JsValue> {
        let backdrop = dom::create(&self.document, "div", "vortex-backdrop fade-in")?;
        let canvas = dom::create(&self.document, "canvas", "vortex-canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        backdrop.append_child(&canvas)?;
        self.root.prepend_with_node_1(&backdrop)?;

        let renderer = match Renderer::new(canvas) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::debug!("no 2d context, rendering content only: {:?}", err);
                backdrop.remove();
                return Ok(None);
            }
        };
        renderer.resize(viewport);

        let vortex = {
            let _timer = Timer::new("Vortex::init_particles");
            Vortex::new(self.config.clone(), renderer.width(), renderer.height())
        };
        let scene = Rc::new(RefCell::new(Scene { vortex, renderer }));

        let frame_scene = scene.clone();
        let animation = match AnimationLoop::start(&self.window, move || frame_scene.borrow_mut().frame()) {
            Ok(animation) => animation,
            Err(err) => {
                backdrop.remove();
                return Err(err);
            }
        };

        Ok(Some(ActiveVortex {
            backdrop,
            scene,
            animation,
        }))
    }

    fn on_resize(&mut self, viewport: Viewport) {
        let form_factor = viewport.form_factor();
        if form_factor != self.form_factor {
            log::debug!("viewport is now {:?} at {}px", form_factor, viewport.width);
            self.form_factor = form_factor;
            if form_factor.animates() {
                self.activate(&viewport);
            } else {
                self.active = None;
            }
            return;
        }
        if let Some(active) = &self.active {
            active.scene.borrow_mut().resize(&viewport);
        }
    }
}

/// Mounted header. Dropping it stops the animation, unregisters the resize
/// listener and removes the markup.
pub struct VortexHeader {
    root: Element,
    state: Rc<RefCell<HeaderState>>,
    _on_resize: EventListener,
}

impl VortexHeader {
    pub fn mount(parent: &Element, content: &Element, config: VortexConfig) -> Result<Self, JsValue> {
        let window = dom::window()?;
        let viewport = Viewport::from_window(&window)?;
        VortexHeader::mount_with_viewport(parent, content, config, viewport)
    }

    // Same as `mount` but with an explicit initial viewport instead of the
    // window's current size
    pub fn mount_with_viewport(
        parent: &Element,
        content: &Element,
        config: VortexConfig,
        viewport: Viewport,
    ) -> Result<Self, JsValue> {
        let window = dom::window()?;
        let document = dom::document()?;

        let root = dom::create(&document, "div", "vortex-header")?;
        let layer = dom::create(&document, "div", "vortex-content")?;
        layer.append_child(content)?;
        root.append_child(&layer)?;
        parent.append_child(&root)?;

        let form_factor = viewport.form_factor();
        let state = Rc::new(RefCell::new(HeaderState {
            window: window.clone(),
            document,
            root: root.clone(),
            config,
            form_factor,
            active: None,
        }));
        if form_factor.animates() {
            state.borrow_mut().activate(&viewport);
        }

        let resize_state = state.clone();
        let resize_window = window.clone();
        let on_resize = EventListener::new(&window, "resize", move |_| {
            match Viewport::from_window(&resize_window) {
                Ok(viewport) => resize_state.borrow_mut().on_resize(viewport),
                Err(err) => log::debug!("resize ignored: {:?}", err),
            }
        })?;

        Ok(VortexHeader {
            root,
            state,
            _on_resize: on_resize,
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().active.is_some()
    }

    pub fn form_factor(&self) -> FormFactor {
        self.state.borrow().form_factor
    }

    pub fn particle_count(&self) -> usize {
        self.state
            .borrow()
            .active
            .as_ref()
            .map(|active| active.scene.borrow().vortex.particles().len())
            .unwrap_or(0)
    }

    pub fn resize_to(&self, viewport: Viewport) {
        self.state.borrow_mut().on_resize(viewport);
    }
}

impl Drop for VortexHeader {
    fn drop(&mut self) {
        self.state.borrow_mut().active = None;
        self.root.remove();
    }
}

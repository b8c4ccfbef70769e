// Repeating `requestAnimationFrame` task.
//
// The frame closure re-requests itself after each run, so exactly one frame
// is ever pending. `AnimationLoop` owns both the closure and the pending
// request id; dropping it cancels the request and frees the closure.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Closure<dyn FnMut()>;

pub struct AnimationLoop {
    window: Window,
    frame_id: Rc<Cell<Option<i32>>>,
    // The closure only holds a weak handle to itself, so dropping this is
    // enough to free it
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationLoop {
    pub fn start<F>(window: &Window, mut on_frame: F) -> Result<AnimationLoop, JsValue>
    where
        F: FnMut() + 'static,
    {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(Cell::new(None));

        let slot = Rc::downgrade(&callback);
        let pending = frame_id.clone();
        let win = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending.set(None);
            on_frame();

            // Cancelled while drawing: the owner is gone, stop here
            let slot = match slot.upgrade() {
                Some(slot) => slot,
                None => return,
            };
            let slot = slot.borrow();
            if let Some(cb) = slot.as_ref() {
                match request_frame(&win, cb) {
                    Ok(id) => pending.set(Some(id)),
                    Err(err) => log::warn!("animation loop stopped: {:?}", err),
                }
            }
        }) as Box<dyn FnMut()>));

        let first = match callback.borrow().as_ref() {
            Some(cb) => request_frame(window, cb)?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        frame_id.set(Some(first));

        Ok(AnimationLoop {
            window: window.clone(),
            frame_id,
            callback,
        })
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.frame_id.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::debug!("cancel_animation_frame failed: {:?}", err);
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
}

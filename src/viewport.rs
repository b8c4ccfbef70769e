// Window size and the mobile/desktop split that decides whether the
// background animates at all.

use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::config::MOBILE_BREAKPOINT;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormFactor {
    Mobile,
    Desktop,
}

impl FormFactor {
    pub fn classify(width: f64) -> FormFactor {
        if width < MOBILE_BREAKPOINT {
            FormFactor::Mobile
        } else {
            FormFactor::Desktop
        }
    }

    pub fn animates(self) -> bool {
        self == FormFactor::Desktop
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Viewport {
        Viewport { width, height }
    }

    pub fn from_window(window: &Window) -> Result<Viewport, JsValue> {
        let width = window
            .inner_width()?
            .as_f64()
            .ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
        let height = window
            .inner_height()?
            .as_f64()
            .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
        Ok(Viewport::new(width, height))
    }

    pub fn form_factor(&self) -> FormFactor {
        FormFactor::classify(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewports_are_mobile() {
        assert_eq!(Viewport::new(500.0, 900.0).form_factor(), FormFactor::Mobile);
        assert_eq!(Viewport::new(767.9, 900.0).form_factor(), FormFactor::Mobile);
        assert!(!FormFactor::Mobile.animates());
    }

    #[test]
    fn breakpoint_and_wider_are_desktop() {
        assert_eq!(Viewport::new(768.0, 500.0).form_factor(), FormFactor::Desktop);
        assert_eq!(Viewport::new(1920.0, 1080.0).form_factor(), FormFactor::Desktop);
        assert!(FormFactor::Desktop.animates());
    }
}

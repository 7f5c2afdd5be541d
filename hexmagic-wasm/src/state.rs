use std::cell::RefCell;
use std::rc::Rc;

use hexmagic_core::Controller;
use rand::rngs::SmallRng;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::canvas::CanvasRenderer;
use crate::config::Config;

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub renderer: CanvasRenderer,
    pub game: Controller,
    pub rng: SmallRng,
    pub config: Config,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}

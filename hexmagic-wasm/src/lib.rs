use std::cell::RefCell;
use std::rc::Rc;

use hexmagic_core::{Controller, Outcome, Renderer, TilePosition, Verdict};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent};

mod canvas;
mod config;
mod constants;
mod state;
mod utils;

use crate::canvas::CanvasRenderer;
use crate::config::{Config, bundled_layout};
use crate::state::{STATE, State};
use crate::utils::{event_canvas_coords, log};

/// Extra room to the right of the board for parking detached tiles, in cells.
const PARKING_CELLS: f64 = 2.5;

fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id("cv")
        .ok_or_else(|| JsValue::from_str("canvas #cv not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = context_2d(&cv)?;
    Ok((cv, ctx))
}

fn context_2d(cv: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok(ctx)
}

fn new_back_buffer(
    document: &Document,
    w: u32,
    h: u32,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let back = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    back.set_width(w);
    back.set_height(h);
    let ctx = context_2d(&back)?;
    Ok((back, ctx))
}

fn update_status_dom(state: &State) {
    if let Some(el) = state.document.get_element_by_id("status")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        let v = state.game.verdict();
        let txt = if v.won {
            "Solved!".to_string()
        } else {
            format!(
                "Rows complete: {}/{}",
                v.qualified_rows(),
                v.rows_qualified.len()
            )
        };
        el.set_inner_text(&txt);
    }
}

fn redraw(state: &mut State) {
    let s = &mut *state;
    s.renderer.draw(&s.game.scene(None));
    update_status_dom(s);
}

fn announce_win(state: &State) {
    let target = state.game.layout().target();
    let msg = format!("Solved! Every row and diagonal adds up to {}.", target);
    if state.window.alert_with_message(&msg).is_err() {
        log(&msg);
    }
}

fn handle(state: &mut State, result: hexmagic_core::Result<Outcome>) {
    let outcome = match result {
        Ok(o) => o,
        Err(e) => {
            log(&format!("pointer event dropped: {}", e));
            return;
        }
    };
    let s = &mut *state;
    s.game.present(&outcome, &mut s.renderer);
    if outcome.is_mutation() {
        update_status_dom(s);
        if s.game.is_won() {
            announce_win(s);
        }
    }
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    // New game button (optional)
    if let Some(btn) = doc.get_element_by_id("newGame") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            let s = &mut *s;
            if let Err(e) = s.game.reset(&mut s.rng) {
                log(&format!("reset failed: {}", e));
                return;
            }
            redraw(s);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Mouse events
    {
        let st = state.clone();
        let mousedown = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let pt = event_canvas_coords(&e, &s.canvas);
            let res = s.game.pointer_down(pt);
            handle(&mut s, res);
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
        mousedown.forget();
    }
    {
        let st = state.clone();
        let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            if s.game.selected().is_none() {
                return;
            }
            let pt = event_canvas_coords(&e, &s.canvas);
            let out = s.game.pointer_move(pt);
            handle(&mut s, Ok(out));
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
        mousemove.forget();
    }
    {
        let st = state.clone();
        let mouseup = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let pt = event_canvas_coords(&e, &s.canvas);
            let res = s.game.pointer_up(pt);
            handle(&mut s, res);
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
        mouseup.forget();
    }
    Ok(())
}

fn seed_from_page() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;

    let config = window
        .location()
        .search()
        .map(|s| Config::from_search(&s))
        .unwrap_or_default();
    let layout = bundled_layout();

    let (board_w, board_h) = layout.canvas_size();
    let w = (board_w + PARKING_CELLS * layout.cell_width()).ceil() as u32;
    let h = board_h.ceil() as u32;
    canvas.set_width(w);
    canvas.set_height(h);
    let (back, back_ctx) = new_back_buffer(&document, w, h)?;
    let renderer = CanvasRenderer::new(ctx, back, back_ctx, w as f64, h as f64);

    let mut rng = SmallRng::seed_from_u64(config.seed.unwrap_or_else(seed_from_page));
    let mut game =
        Controller::shuffled(layout, &mut rng).map_err(|e| JsValue::from_str(&e.to_string()))?;
    game.set_hints(config.hints);
    log(&format!(
        "hexmagic: {} cells, target {}, hints {}",
        game.layout().cell_count(),
        game.layout().target(),
        if config.hints { "on" } else { "off" }
    ));

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        canvas,
        renderer,
        game,
        rng,
        config,
    }));

    STATE.with(|st| st.replace(Some(state.clone())));
    attach_ui(state.clone())?;
    redraw(&mut state.borrow_mut());
    Ok(())
}

#[derive(Serialize)]
struct Snapshot<'a> {
    tiles: &'a [TilePosition],
    selected: Option<usize>,
    hints: bool,
    verdict: &'a Verdict,
}

/// JSON dump of the live game, for debugging from the console.
#[wasm_bindgen]
pub fn snapshot() -> String {
    STATE.with(|st| {
        let Some(st_rc) = st.borrow().as_ref().cloned() else {
            return "{}".to_string();
        };
        let s = st_rc.borrow();
        let snap = Snapshot {
            tiles: s.game.tiles().positions(),
            selected: s.game.selected(),
            hints: s.config.hints,
            verdict: s.game.verdict(),
        };
        serde_json::to_string(&snap).unwrap_or_else(|_| "{}".to_string())
    })
}

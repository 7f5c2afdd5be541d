use hexmagic_core::geometry::CELL_WIDTH_PX;
use hexmagic_core::{Point, Renderer, Scene, TileSprite};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::constants::*;

/// Assigns a colour to one of the context's style properties. The typed
/// `set_fill_style` setters in web-sys are deprecated.
fn set_style(ctx: &CanvasRenderingContext2d, prop: &str, color: &str) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from(prop), &JsValue::from(color));
}

fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    set_style(ctx, "fillStyle", color);
}

fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    set_style(ctx, "strokeStyle", color);
}

/// Paints scenes onto the visible canvas, with an offscreen canvas of the
/// same size holding the background while a tile is dragged.
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    back: HtmlCanvasElement,
    back_ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        back: HtmlCanvasElement,
        back_ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    ) -> Self {
        CanvasRenderer {
            ctx,
            back,
            back_ctx,
            width,
            height,
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, scene: &Scene<'_>) {
        paint_scene(&self.ctx, scene, self.width, self.height);
    }

    fn prepare_drag(&mut self, scene: &Scene<'_>) {
        paint_scene(&self.back_ctx, scene, self.width, self.height);
    }

    fn draw_dragged(&mut self, sprite: &TileSprite, at: Point) {
        let _ = self
            .ctx
            .draw_image_with_html_canvas_element(&self.back, 0.0, 0.0);
        let origin = bbox_origin(&sprite.polygon);
        let moved: Vec<Point> = sprite
            .polygon
            .iter()
            .map(|p| p.offset(at.x - origin.x, at.y - origin.y))
            .collect();
        draw_tile(&self.ctx, sprite, &moved, false);
    }
}

fn paint_scene(ctx: &CanvasRenderingContext2d, scene: &Scene<'_>, w: f64, h: f64) {
    set_fill_style(ctx, BACKGROUND);
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_line_width(STROKE_WIDTH);
    set_stroke_style(ctx, CELL_STROKE);
    for cell in scene.cells {
        trace_polygon(ctx, cell);
        ctx.stroke();
    }
    for sprite in &scene.tiles {
        draw_tile(ctx, sprite, &sprite.polygon, scene.won);
    }
}

fn trace_polygon(ctx: &CanvasRenderingContext2d, pts: &[Point]) {
    let Some(first) = pts.first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in &pts[1..] {
        ctx.line_to(p.x, p.y);
    }
    ctx.close_path();
}

/// Top-left of a polygon's bounding box.
fn bbox_origin(poly: &[Point]) -> Point {
    let x = poly.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let y = poly.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    Point::new(x, y)
}

fn draw_tile(ctx: &CanvasRenderingContext2d, sprite: &TileSprite, pts: &[Point], won: bool) {
    trace_polygon(ctx, pts);
    set_fill_style(ctx, if won { TILE_FILL_WON } else { TILE_FILL });
    ctx.fill();
    if sprite.selected {
        ctx.set_line_width(SELECTED_STROKE_WIDTH);
        set_stroke_style(ctx, SELECTED_STROKE);
    } else {
        ctx.set_line_width(STROKE_WIDTH);
        set_stroke_style(ctx, TILE_STROKE);
    }
    ctx.stroke();

    let origin = bbox_origin(pts);
    let width = pts.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max) - origin.x;
    let text = sprite.value.to_string();
    ctx.set_font(FONT);
    let text_w = ctx.measure_text(&text).map(|m| m.width()).unwrap_or(0.0);
    set_fill_style(ctx, if sprite.hinted { NUMERAL_HINT } else { NUMERAL });
    let _ = ctx.fill_text(
        &text,
        origin.x + (width - text_w) / 2.0,
        origin.y + TEXT_VERTICAL_OFFSET * width / CELL_WIDTH_PX,
    );
}

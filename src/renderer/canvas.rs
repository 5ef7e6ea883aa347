//! Canvas 2D backend
//!
//! Images load asynchronously; until one is decoded (or if it fails) the matching
//! element is drawn as a solid fill instead.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::shapes::{self, ACTOR_COLOR, DrawCmd, GATE_COLOR, SKY_COLOR};
use crate::sim::Snapshot;

/// Image locations relative to the page
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub background: String,
    pub gate: String,
    pub actor: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            background: "background.png".into(),
            gate: "gate.png".into(),
            actor: "character.png".into(),
        }
    }
}

/// An image that may not be available
struct Sprite {
    image: Option<HtmlImageElement>,
}

impl Sprite {
    fn load(src: &str) -> Self {
        let image = HtmlImageElement::new().ok();
        match &image {
            Some(img) => img.set_src(src),
            None => log::warn!("Could not create image element for {}", src),
        }
        Self { image }
    }

    /// The image if fully decoded (broken images report complete with zero width)
    fn ready(&self) -> Option<&HtmlImageElement> {
        self.image
            .as_ref()
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

/// Draws snapshots onto a canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    background: Sprite,
    gate: Sprite,
    actor: Sprite,
}

impl CanvasRenderer {
    /// Returns None if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement, assets: &AssetPaths) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(Self {
            canvas,
            ctx,
            background: Sprite::load(&assets.background),
            gate: Sprite::load(&assets.gate),
            actor: Sprite::load(&assets.actor),
        })
    }

    /// Match the backing store to the given size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn render(&self, snapshot: &Snapshot, show_hitbox: bool) {
        for cmd in shapes::frame(snapshot, show_hitbox) {
            self.draw(&cmd);
        }
    }

    fn draw(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Background { width, height } => {
                let (w, h) = (*width as f64, *height as f64);
                ctx.clear_rect(0.0, 0.0, w, h);
                match self.background.ready() {
                    Some(img) => {
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)
                            .ok();
                    }
                    None => {
                        ctx.set_fill_style_str(SKY_COLOR);
                        ctx.fill_rect(0.0, 0.0, w, h);
                    }
                }
            }
            DrawCmd::Gate(rect) => {
                let (x, y) = (rect.pos.x as f64, rect.pos.y as f64);
                let (w, h) = (rect.size.x as f64, rect.size.y as f64);
                match self.gate.ready() {
                    Some(img) => {
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                            .ok();
                    }
                    None => {
                        ctx.set_fill_style_str(GATE_COLOR);
                        ctx.fill_rect(x, y, w, h);
                    }
                }
            }
            DrawCmd::Actor {
                center,
                size,
                rotation,
                corner_radius,
            } => {
                ctx.save();
                ctx.translate(center.x as f64, center.y as f64).ok();
                ctx.rotate(*rotation as f64).ok();

                let (start, corners) = shapes::rounded_rect_path(*size, *corner_radius);
                ctx.begin_path();
                ctx.move_to(start.x as f64, start.y as f64);
                for (line_end, control, end) in corners {
                    ctx.line_to(line_end.x as f64, line_end.y as f64);
                    ctx.quadratic_curve_to(
                        control.x as f64,
                        control.y as f64,
                        end.x as f64,
                        end.y as f64,
                    );
                }
                ctx.close_path();
                ctx.clip();

                let (x, y) = (-size.x as f64 / 2.0, -size.y as f64 / 2.0);
                let (w, h) = (size.x as f64, size.y as f64);
                match self.actor.ready() {
                    Some(img) => {
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                            .ok();
                    }
                    None => {
                        ctx.set_fill_style_str(ACTOR_COLOR);
                        ctx.fill_rect(x, y, w, h);
                    }
                }
                ctx.restore();
            }
            DrawCmd::Hitbox(rect) => {
                ctx.set_stroke_style_str("#ff0044");
                ctx.set_line_width(2.0);
                ctx.stroke_rect(
                    rect.pos.x as f64,
                    rect.pos.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            DrawCmd::Score(label) => {
                ctx.set_fill_style_str("#fff");
                ctx.set_stroke_style_str("#000");
                ctx.set_font("bold 32px Arial");
                ctx.set_line_width(3.0);
                ctx.set_text_align("left");
                ctx.stroke_text(label, 20.0, 50.0).ok();
                ctx.fill_text(label, 20.0, 50.0).ok();
            }
        }
    }
}

//! DOM rendering collaborator
//!
//! The original presentation is plain absolutely-positioned `<img>`
//! elements over a tiled background, so the renderer is a thin sync pass:
//! each frame it reconciles one element per entity and writes `left`/`top`
//! from the sim state. No game logic lives here.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use crate::consts::*;
use crate::sim::GameState;

const BACKGROUND_SRC: &str = "assets/background.png";
const PLAYER_SRC: &str = "assets/player.gif";
const CAN_SRC: &str = "assets/trash-can.png";
const PILE_SRC: &str = "assets/trash-pile.png";
const ITEM_SRC: &str = "assets/litter.png";

/// Sprite layer order, background to foreground
mod z {
    pub const BACKGROUND: &str = "0";
    pub const GROUND_PROPS: &str = "1";
    pub const PLAYER: &str = "2";
    pub const ITEMS: &str = "3";
    pub const POPUPS: &str = "4";
    pub const HUD: &str = "5";
}

/// Renders a [`GameState`] into a container element
pub struct DomRenderer {
    document: Document,
    root: Element,
    background: HtmlElement,
    player: HtmlImageElement,
    score: HtmlElement,
    cans: Vec<HtmlImageElement>,
    piles: Vec<HtmlImageElement>,
    items: Vec<HtmlImageElement>,
    popups: Vec<HtmlElement>,
}

impl DomRenderer {
    /// Build the static scene under `container_id`
    pub fn new(container_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str("game container not found"))?;

        if let Some(el) = root.dyn_ref::<HtmlElement>() {
            let style = el.style();
            style.set_property("position", "relative")?;
            style.set_property("overflow", "hidden")?;
            style.set_property("width", &px(WORLD_WIDTH))?;
            style.set_property("height", &px(WORLD_HEIGHT))?;
            style.set_property("touch-action", "none")?;
        }

        // Two background widths tile seamlessly while the offset wraps
        let background: HtmlElement = document.create_element("div")?.dyn_into()?;
        {
            let style = background.style();
            style.set_property("position", "absolute")?;
            style.set_property("top", "0")?;
            style.set_property("width", &px(WORLD_WIDTH * 2.0))?;
            style.set_property("height", &px(WORLD_HEIGHT))?;
            style.set_property("background-image", &format!("url({BACKGROUND_SRC})"))?;
            style.set_property(
                "background-size",
                &format!("{} {}", px(WORLD_WIDTH), px(WORLD_HEIGHT)),
            )?;
            style.set_property("background-repeat", "repeat-x")?;
            style.set_property("z-index", z::BACKGROUND)?;
        }
        root.append_child(&background)?;

        let player = make_sprite(&document, PLAYER_SRC, PLAYER_WIDTH, PLAYER_HEIGHT, z::PLAYER)?;
        root.append_child(&player)?;

        let score: HtmlElement = document.create_element("div")?.dyn_into()?;
        {
            let style = score.style();
            style.set_property("position", "absolute")?;
            style.set_property("top", "4px")?;
            style.set_property("left", "4px")?;
            style.set_property("color", "white")?;
            style.set_property("font-weight", "bold")?;
            style.set_property("font-size", "24px")?;
            style.set_property("z-index", z::HUD)?;
        }
        root.append_child(&score)?;

        Ok(Self {
            document,
            root,
            background,
            player,
            score,
            cans: Vec::new(),
            piles: Vec::new(),
            items: Vec::new(),
            popups: Vec::new(),
        })
    }

    /// Write one frame of state into the DOM
    pub fn render(&mut self, state: &GameState) {
        let camera = state.camera;

        let _ = self
            .background
            .style()
            .set_property("left", &px(-state.scroll_offset));

        set_pos(&self.player, state.player.pos.x - camera, state.player.pos.y);

        sync_sprites(
            &self.document,
            &self.root,
            &mut self.cans,
            state.cans.len(),
            CAN_SRC,
            CAN_WIDTH,
            CAN_HEIGHT,
            z::GROUND_PROPS,
        );
        for (img, can) in self.cans.iter().zip(&state.cans) {
            set_pos(img, can.pos.x - camera, can.pos.y);
        }

        sync_sprites(
            &self.document,
            &self.root,
            &mut self.piles,
            state.piles.len(),
            PILE_SRC,
            PILE_WIDTH,
            PILE_HEIGHT,
            z::GROUND_PROPS,
        );
        for (img, pile) in self.piles.iter().zip(&state.piles) {
            set_pos(img, pile.pos.x - camera, pile.pos.y);
        }

        sync_sprites(
            &self.document,
            &self.root,
            &mut self.items,
            state.items.len(),
            ITEM_SRC,
            ITEM_WIDTH,
            ITEM_HEIGHT,
            z::ITEMS,
        );
        for (img, item) in self.items.iter().zip(&state.items) {
            set_pos(img, item.pos.x - camera, item.pos.y);
            // Grounded litter fades to show it can no longer score
            let opacity = if item.on_ground { "0.5" } else { "1" };
            let _ = img.style().set_property("opacity", opacity);
        }

        self.sync_popups(state);
        for (el, popup) in self.popups.iter().zip(&state.popups) {
            set_pos(el, popup.pos.x - camera, popup.pos.y);
            let _ = el
                .style()
                .set_property("opacity", &format!("{:.3}", popup.opacity));
            el.set_text_content(Some(&popup.value.to_string()));
        }

        self.score
            .set_text_content(Some(&format!("Score: {}", state.score)));
    }

    fn sync_popups(&mut self, state: &GameState) {
        while self.popups.len() < state.popups.len() {
            let el: HtmlElement = match self
                .document
                .create_element("div")
                .and_then(|el| el.dyn_into().map_err(JsValue::from))
            {
                Ok(el) => el,
                Err(err) => {
                    log::warn!("Failed to create popup element: {err:?}");
                    return;
                }
            };
            let style = el.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("color", "red");
            let _ = style.set_property("font-weight", "bold");
            let _ = style.set_property("font-size", "24px");
            let _ = style.set_property("z-index", z::POPUPS);
            let _ = self.root.append_child(&el);
            self.popups.push(el);
        }
        while self.popups.len() > state.popups.len() {
            if let Some(el) = self.popups.pop() {
                el.remove();
            }
        }
    }
}

/// Create an absolutely positioned sprite image
fn make_sprite(
    document: &Document,
    src: &str,
    w: f32,
    h: f32,
    z_index: &str,
) -> Result<HtmlImageElement, JsValue> {
    let img: HtmlImageElement = document.create_element("img")?.dyn_into()?;
    img.set_src(src);
    let style = img.style();
    style.set_property("position", "absolute")?;
    style.set_property("width", &px(w))?;
    style.set_property("height", &px(h))?;
    style.set_property("object-fit", "cover")?;
    style.set_property("z-index", z_index)?;
    Ok(img)
}

/// Grow or shrink a sprite pool to match the entity count
#[allow(clippy::too_many_arguments)]
fn sync_sprites(
    document: &Document,
    root: &Element,
    pool: &mut Vec<HtmlImageElement>,
    count: usize,
    src: &str,
    w: f32,
    h: f32,
    z_index: &str,
) {
    while pool.len() < count {
        match make_sprite(document, src, w, h, z_index) {
            Ok(img) => {
                let _ = root.append_child(&img);
                pool.push(img);
            }
            Err(err) => {
                log::warn!("Failed to create sprite element: {err:?}");
                return;
            }
        }
    }
    while pool.len() > count {
        if let Some(img) = pool.pop() {
            img.remove();
        }
    }
}

fn set_pos(el: &HtmlElement, x: f32, y: f32) {
    let style = el.style();
    let _ = style.set_property("left", &px(x));
    let _ = style.set_property("top", &px(y));
}

fn px(v: f32) -> String {
    format!("{v}px")
}

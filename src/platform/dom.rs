//! DOM presenter: positions absolutely-placed divs to match the simulation
//!
//! Expects the page to provide `.game` (playfield), `.sky`, `.land`, `.bird`
//! and an `.active` overlay. Pipe divs are created and removed on demand.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::layout::Layout;
use crate::sim::{BodyId, KinematicBody, ObstaclePair, Presenter, Segment, SwingState};

fn query(document: &Document, selector: &str) -> Result<Element, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("missing element {}", selector)))
}

fn query_html(document: &Document, selector: &str) -> Result<HtmlElement, JsValue> {
    query(document, selector)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("{} is not an HTML element", selector)))
}

/// Read one computed CSS length in whole pixels
fn computed_px(window: &Window, element: &Element, property: &str) -> Result<f32, JsValue> {
    let style = window
        .get_computed_style(element)?
        .ok_or_else(|| JsValue::from_str("no computed style"))?;
    let value = style.get_property_value(property)?;
    Layout::parse_px(&value)
        .ok_or_else(|| JsValue::from_str(&format!("cannot parse {} = '{}'", property, value)))
}

/// Measure the page once at startup
pub fn read_layout(window: &Window, document: &Document) -> Result<Layout, JsValue> {
    let game = query(document, ".game")?;
    let sky = query(document, ".sky")?;
    let land = query(document, ".land")?;
    let bird = query(document, ".bird")?;

    let layout = Layout {
        playfield: Vec2::new(game.client_width() as f32, game.client_height() as f32),
        sky: Vec2::new(
            computed_px(window, &sky, "width")?,
            computed_px(window, &sky, "height")?,
        ),
        land: Vec2::new(
            computed_px(window, &land, "width")?,
            computed_px(window, &land, "height")?,
        ),
        land_top: computed_px(window, &land, "top")?,
        avatar: Vec2::new(
            computed_px(window, &bird, "width")?,
            computed_px(window, &bird, "height")?,
        ),
        avatar_start: Vec2::new(
            computed_px(window, &bird, "left")?,
            computed_px(window, &bird, "top")?,
        ),
    };
    log::info!("Measured layout: {:?}", layout);
    Ok(layout)
}

/// Presenter writing inline styles onto page elements
pub struct DomPresenter {
    document: Document,
    game: Element,
    sky: HtmlElement,
    land: HtmlElement,
    bird: HtmlElement,
    active: Option<HtmlElement>,
    pipes: HashMap<BodyId, HtmlElement>,
    /// Set once a reload has been issued; the page is going away
    reloading: bool,
}

impl DomPresenter {
    pub fn attach(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            game: query(document, ".game")?,
            sky: query_html(document, ".sky")?,
            land: query_html(document, ".land")?,
            bird: query_html(document, ".bird")?,
            active: query_html(document, ".active").ok(),
            pipes: HashMap::new(),
            reloading: false,
        })
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    fn element(&self, id: BodyId) -> Option<&HtmlElement> {
        match id {
            BodyId::Sky => Some(&self.sky),
            BodyId::Land => Some(&self.land),
            BodyId::Avatar => Some(&self.bird),
            BodyId::Pipe { .. } => self.pipes.get(&id),
        }
    }

    fn create_pipe(&mut self, body: &KinematicBody) -> Result<(), JsValue> {
        let class = match body.id {
            BodyId::Pipe {
                segment: Segment::Upper,
                ..
            } => "pipe up",
            _ => "pipe down",
        };
        let element = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str("div is not an HTML element"))?;
        element.set_class_name(class);
        apply_geometry(&element, body);
        self.game.append_child(&element)?;
        self.pipes.insert(body.id, element);
        Ok(())
    }
}

fn apply_geometry(element: &HtmlElement, body: &KinematicBody) {
    let style = element.style();
    let _ = style.set_property("width", &format!("{}px", body.width()));
    let _ = style.set_property("height", &format!("{}px", body.height()));
    let _ = style.set_property("top", &format!("{}px", body.top()));
    let _ = style.set_property("left", &format!("{}px", body.left()));
}

impl Presenter for DomPresenter {
    fn render(&mut self, id: BodyId, body: &KinematicBody) {
        if let Some(element) = self.element(id) {
            apply_geometry(element, body);
        }
    }

    fn render_swing(&mut self, swing: SwingState) {
        self.bird
            .set_class_name(&format!("bird swing{}", swing.frame()));
    }

    fn pair_created(&mut self, pair: &ObstaclePair) {
        for segment in pair.segments() {
            if let Err(e) = self.create_pipe(segment) {
                log::warn!("Failed to create pipe element: {:?}", e);
            }
        }
    }

    fn pair_removed(&mut self, pair: &ObstaclePair) {
        for segment in pair.segments() {
            if let Some(element) = self.pipes.remove(&segment.id) {
                element.remove();
            }
        }
    }

    fn set_restart_visible(&mut self, visible: bool) {
        if let Some(active) = &self.active {
            let display = if visible { "block" } else { "none" };
            let _ = active.style().set_property("display", display);
        }
    }

    fn request_reload(&mut self) {
        if self.reloading {
            return;
        }
        self.reloading = true;
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                log::error!("Page reload failed: {:?}", e);
            }
        }
    }
}

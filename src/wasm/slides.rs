use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::config::DeckConfig;
use crate::deck::{NavCommand, SlideDeck, SlideView};
use crate::error::InitError;

pub type SharedDeck = Rc<RefCell<SlideDeck<DomSlideView>>>;

/// [`SlideView`] over the page's slide elements, controls and progress bar.
pub struct DomSlideView {
    slides: Vec<Element>,
    prev: HtmlElement,
    next: HtmlElement,
    progress: HtmlElement,
    active_class: &'static str,
    shown_display: &'static str,
}

impl DomSlideView {
    /// Collects the slides and controls named in `config`. The slide list is
    /// read once and never refreshed.
    pub fn from_document(document: &Document, config: &DeckConfig) -> Result<Self, InitError> {
        let nodes = document.query_selector_all(config.slide_selector)?;
        let mut slides = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(node) = nodes.item(i) {
                let slide = node
                    .dyn_into::<Element>()
                    .map_err(|_| InitError::WrongElementType(config.slide_selector))?;
                slides.push(slide);
            }
        }

        Ok(Self {
            slides,
            prev: html_element(document, config.prev_id)?,
            next: html_element(document, config.next_id)?,
            progress: html_element(document, config.progress_id)?,
            active_class: config.active_class,
            shown_display: config.shown_display,
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    fn set_display(&self, element: &HtmlElement, visible: bool) {
        let value = if visible { self.shown_display } else { "none" };
        report(element.style().set_property("display", value));
    }
}

impl SlideView for DomSlideView {
    fn set_active(&mut self, index: usize, active: bool) {
        if let Some(slide) = self.slides.get(index) {
            let classes = slide.class_list();
            report(if active {
                classes.add_1(self.active_class)
            } else {
                classes.remove_1(self.active_class)
            });
        }
    }

    fn set_progress(&mut self, percent: f64) {
        report(
            self.progress
                .style()
                .set_property("width", &format!("{}%", percent)),
        );
    }

    fn set_prev_visible(&mut self, visible: bool) {
        self.set_display(&self.prev, visible);
    }

    fn set_next_visible(&mut self, visible: bool) {
        self.set_display(&self.next, visible);
    }
}

/// Builds the deck from the document, shows the first slide and binds the
/// controls and arrow keys.
pub fn start(config: &DeckConfig) -> Result<SharedDeck, InitError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(InitError::MissingElement("document"))?;

    let view = DomSlideView::from_document(&document, config)?;
    if view.is_empty() {
        return Err(InitError::EmptyDeck);
    }
    let len = view.len();
    let mut deck = SlideDeck::new(view, len)?;
    deck.show_slide(0);
    log::info!("slide deck ready: {} slides", len);

    let deck = Rc::new(RefCell::new(deck));
    bind(&document, config, &deck)?;
    Ok(deck)
}

/// Routes clicks on the two controls and document-level arrow keys to `deck`.
pub fn bind(document: &Document, config: &DeckConfig, deck: &SharedDeck) -> Result<(), InitError> {
    for (id, command) in [
        (config.next_id, NavCommand::Next),
        (config.prev_id, NavCommand::Previous),
    ] {
        let target = html_element(document, id)?;
        let deck = deck.clone();
        let on_click = Closure::wrap(Box::new(move || {
            deck.borrow_mut().apply(command);
        }) as Box<dyn FnMut()>);
        target.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    let on_key = {
        let deck = deck.clone();
        Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if let Some(command) = NavCommand::from_key(&event.key()) {
                deck.borrow_mut().apply(command);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();
    Ok(())
}

fn html_element(document: &Document, id: &'static str) -> Result<HtmlElement, InitError> {
    document
        .get_element_by_id(id)
        .ok_or(InitError::MissingElement(id))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| InitError::WrongElementType(id))
}

fn report(result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("slide view update failed: {:?}", e);
    }
}

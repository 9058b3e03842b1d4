use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// Class toggled by the host template's stylesheet to hide a region.
pub const HIDE_CLASS: &str = "hide";

// Attribute contract with the host page template.
pub mod selectors {
    pub const BUY_BUTTONS: &str = "[data-button=\"buy-install\"]";
    pub const BUTTON_TEXT: &str = "[data-btn=\"text\"]";
    pub const BUTTON_TYPE_WRAPPER: &str = "[data-button-type]";
    pub const SUCCESS_INFO: &str = "[data-div=\"success-info\"]";
    pub const SUBSCRIPTION_END_DATES: &str = "[data-date=\"subscription-end\"]";
    pub const SITE_INFO_HEADER: &str = "[data-element=\"site-info-header\"]";
    pub const SITE_NAMES: &str = "[data-element=\"site-name\"]";
    pub const DROPDOWN_BTN_PLAN: &str = "[data-dropdown-btn=\"plan\"]";
    pub const DROPDOWN_PLAN: &str = "[data-dropdown=\"plan\"]";
    pub const DROPDOWN_PRICES: &str = "[data-dropdown-price]";
    pub const DROPDOWN_SUBS: &str = "[data-dropdown-subs]";
    pub const MODAL: &str = "[data-element=\"modal\"]";
    pub const MODAL_CLOSE: &str = "[data-element=\"modal-close-button\"]";
    pub const MODAL_PRICES: &str = "[data-modal-price]";
    pub const MODAL_PLAN: &str = "[data-modal=\"plan\"]";
    pub const OPEN_CHECKOUT_LINK: &str = "[data-element=\"open-chekout-link-button\"]";
    pub const CHECKOUT_LINK_TEXT: &str = "[data-element=\"stripe-link\"]";
    pub const COPY_BUTTON: &str = "[data-element=\"copy-button\"]";
    pub const NAVBAR_SUBSCRIPTION_BTN: &str = "[data-dropdown-btn=\"subscription-info\"]";
    pub const NAVBAR_INSTALL_BTN: &str = "[data-navbar-btn=\"install\"]";

    pub fn dropdown_price(period: &str) -> String {
        format!("[data-dropdown-price=\"{}\"]", period)
    }

    pub fn dropdown_subs(period: &str) -> String {
        format!("[data-dropdown-subs=\"{}\"]", period)
    }

    pub fn modal_price(period: &str) -> String {
        format!("[data-modal-price=\"{}\"]", period)
    }

    pub fn button_type(key: &str) -> String {
        format!("[data-button-type=\"{}\"]", key)
    }
}

/// Capability surface the reconciler and checkout controller see instead of
/// concrete elements. Implemented once per host toolkit; the browser
/// implementation below drives class toggling and text content.
pub trait UiRegion {
    fn show(&self);
    fn hide(&self);
    fn set_text(&self, text: &str);
}

/// A single attribute-selected element of the host template.
#[derive(Clone)]
pub struct DomRegion {
    element: Element,
}

impl DomRegion {
    pub fn new(element: Element) -> Self {
        DomRegion { element }
    }

    pub fn query(document: &Document, selector: &str) -> Option<Self> {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .map(DomRegion::new)
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    pub fn set_html(&self, html: &str) {
        self.element.set_inner_html(html);
    }

    /// Finds a child region, e.g. the `[data-btn="text"]` label inside a buy
    /// control.
    pub fn query_child(&self, selector: &str) -> Option<DomRegion> {
        self.element
            .query_selector(selector)
            .ok()
            .flatten()
            .map(DomRegion::new)
    }

    /// Attaches a click handler. The closure is leaked into the page, which
    /// is fine for listeners that live as long as the document.
    pub fn on_activate<F: FnMut() + 'static>(&self, handler: F) {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        let _ = self
            .element
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        callback.forget();
    }
}

impl UiRegion for DomRegion {
    fn show(&self) {
        let _ = self.element.class_list().remove_1(HIDE_CLASS);
    }

    fn hide(&self) {
        let _ = self.element.class_list().add_1(HIDE_CLASS);
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

/// An element collection matched by one selector, shown/hidden/labeled as a
/// unit.
#[derive(Clone)]
pub struct DomRegionList {
    regions: Vec<DomRegion>,
}

impl DomRegionList {
    pub fn query(document: &Document, selector: &str) -> Self {
        let mut regions = Vec::new();
        if let Ok(nodes) = document.query_selector_all(selector) {
            for i in 0..nodes.length() {
                if let Some(node) = nodes.item(i) {
                    if let Ok(element) = node.dyn_into::<Element>() {
                        regions.push(DomRegion::new(element));
                    }
                }
            }
        }
        DomRegionList { regions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomRegion> {
        self.regions.iter()
    }
}

impl UiRegion for DomRegionList {
    fn show(&self) {
        for region in &self.regions {
            region.show();
        }
    }

    fn hide(&self) {
        for region in &self.regions {
            region.hide();
        }
    }

    fn set_text(&self, text: &str) {
        for region in &self.regions {
            region.set_text(text);
        }
    }
}

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use log::{debug, error};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Document};

use crate::api;
use crate::dom::{selectors, DomRegion, DomRegionList, UiRegion};
use crate::format::truncate_link;
use crate::plan::{PlanPeriod, PlanType};
use crate::reconcile::PlanButtonDescriptor;

// Checkmark shown on the copy control while the confirmation is up.
const COPIED_SVG: &str = r#"
<svg width="32" height="32" viewBox="0 0 32 32" fill="none" xmlns="http://www.w3.org/2000/svg">
<path d="M8.2207 15.2065L13.5679 20.4446L23.7763 10.4446" class="hover-svg-new" stroke="black" stroke-width="2"/>
  </svg>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    Idle,
    AwaitingCheckout,
    ModalOpen,
}

impl FlowState {
    /// Closing the modal lands on Idle no matter where the flow was.
    fn closed(self) -> FlowState {
        FlowState::Idle
    }
}

/// The confirmation modal and its always-available controls: close, "open
/// checkout link" and "copy link". Wired once per page load, with or without
/// a session; the controls are inert until a checkout stores its target.
pub struct ModalController {
    modal: Option<DomRegion>,
    checkout_url: RefCell<Option<String>>,
    copy_generation: Cell<u32>,
    on_close: RefCell<Option<Box<dyn Fn()>>>,
}

impl ModalController {
    pub fn bind(document: &Document) -> Rc<Self> {
        let controller = Rc::new(ModalController {
            modal: DomRegion::query(document, selectors::MODAL),
            checkout_url: RefCell::new(None),
            copy_generation: Cell::new(0),
            on_close: RefCell::new(None),
        });

        if let Some(close_button) = DomRegion::query(document, selectors::MODAL_CLOSE) {
            let controller_handle = Rc::clone(&controller);
            close_button.on_activate(move || controller_handle.close());
        }

        if let Some(open_link_button) = DomRegion::query(document, selectors::OPEN_CHECKOUT_LINK) {
            let controller_handle = Rc::clone(&controller);
            open_link_button.on_activate(move || {
                if let Some(url) = controller_handle.checkout_url.borrow().as_deref() {
                    if let Some(window) = window() {
                        let _ = window.open_with_url(url);
                    }
                }
            });
        }

        if let Some(copy_button) = DomRegion::query(document, selectors::COPY_BUTTON) {
            let controller_handle = Rc::clone(&controller);
            // the control's markup before any confirmation swap, restored
            // after the 3-second window
            let original_content = copy_button.inner_html();
            let button = copy_button.clone();
            copy_button.on_activate(move || {
                let Some(url) = controller_handle
                    .checkout_url
                    .borrow()
                    .as_deref()
                    .map(str::to_string)
                else {
                    return;
                };
                if let Some(window) = window() {
                    let _ = window.navigator().clipboard().write_text(&url);
                }

                button.set_html(&format!(
                    "<div><div class=\"pricing-modal_button-icon is-2 w-embed\">{}</div></div><div>link copied</div>",
                    COPIED_SVG
                ));

                // a second copy within the window restarts it; only the
                // newest generation reverts the content
                let generation = controller_handle.copy_generation.get().wrapping_add(1);
                controller_handle.copy_generation.set(generation);
                let controller_handle = Rc::clone(&controller_handle);
                let button = button.clone();
                let original_content = original_content.clone();
                spawn_local(async move {
                    TimeoutFuture::new(3_000).await;
                    if controller_handle.copy_generation.get() == generation {
                        button.set_html(&original_content);
                    }
                });
            });
        }

        controller
    }

    fn set_target(&self, url: String) {
        *self.checkout_url.borrow_mut() = Some(url);
    }

    fn open(&self) {
        if let Some(modal) = &self.modal {
            modal.show();
        }
    }

    fn close(&self) {
        if let Some(modal) = &self.modal {
            modal.hide();
        }
        if let Some(hook) = self.on_close.borrow().as_ref() {
            hook();
        }
    }

    fn set_on_close(&self, hook: Box<dyn Fn()>) {
        *self.on_close.borrow_mut() = Some(hook);
    }
}

/// Modal content regions the checkout flow populates before opening it.
pub struct CheckoutRegions {
    pub plan_label: Option<DomRegion>,
    pub price_rows: DomRegionList,
    pub link_text: Option<DomRegion>,
    pub site_names: DomRegionList,
}

/// Drives a buy-control click from checkout initiation to the open modal.
///
/// Per click: `Idle -> AwaitingCheckout -> ModalOpen`, falling back to `Idle`
/// when the checkout service reports no session. A busy flag rejects clicks
/// that land while a request is in flight, so a double-click cannot issue two
/// checkout intents.
pub struct CheckoutFlow {
    document: Document,
    token: String,
    display_name: String,
    modal: Rc<ModalController>,
    regions: CheckoutRegions,
    state: Cell<FlowState>,
}

impl CheckoutFlow {
    pub fn new(
        document: Document,
        token: String,
        display_name: String,
        modal: Rc<ModalController>,
        regions: CheckoutRegions,
    ) -> Rc<Self> {
        let flow = Rc::new(CheckoutFlow {
            document,
            token,
            display_name,
            modal,
            regions,
            state: Cell::new(FlowState::Idle),
        });
        // closing the modal resets the machine, from any state
        let weak = Rc::downgrade(&flow);
        flow.modal.set_on_close(Box::new(move || {
            if let Some(flow) = weak.upgrade() {
                flow.state.set(flow.state.get().closed());
            }
        }));
        flow
    }

    /// Attaches the checkout behavior to one buy control. A descriptor
    /// missing its plan attributes is inert: the click logs and does nothing.
    pub fn arm(self: &Rc<Self>, button: &DomRegion, descriptor: PlanButtonDescriptor) {
        let flow = Rc::clone(self);
        button.on_activate(move || {
            let Some((plan_type, plan_period)) = descriptor.plan_selection() else {
                error!("Attributes \"plan-type\" and \"plan-period\" are missing on the button.");
                return;
            };
            let flow = Rc::clone(&flow);
            spawn_local(async move {
                flow.start(plan_type, plan_period).await;
            });
        });
    }

    async fn start(&self, plan_type: PlanType, plan_period: PlanPeriod) {
        if self.state.get() == FlowState::AwaitingCheckout {
            debug!("Checkout already in flight, ignoring click");
            return;
        }
        self.state.set(FlowState::AwaitingCheckout);
        self.regions.price_rows.hide();

        let Some(session) = api::initiate_checkout(plan_type, &plan_period, &self.token).await
        else {
            // logged by the client; the button appears to do nothing
            self.state.set(FlowState::Idle);
            return;
        };

        self.regions.site_names.set_text(&self.display_name);
        if let Some(plan_label) = &self.regions.plan_label {
            plan_label.set_text(&format!("{} Plan", session.plan_period));
        }
        if let Some(row) = DomRegion::query(
            &self.document,
            &selectors::modal_price(session.plan_period.as_str()),
        ) {
            row.show();
        }

        self.modal.set_target(session.redirect_url.clone());
        if let Some(link_text) = &self.regions.link_text {
            link_text.set_text(&truncate_link(&session.redirect_url));
        }

        self.modal.open();
        self.state.set(FlowState::ModalOpen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_the_modal_returns_to_idle_from_any_state() {
        assert_eq!(FlowState::Idle.closed(), FlowState::Idle);
        assert_eq!(FlowState::AwaitingCheckout.closed(), FlowState::Idle);
        assert_eq!(FlowState::ModalOpen.closed(), FlowState::Idle);
    }
}

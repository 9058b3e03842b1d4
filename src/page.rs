use log::{error, info};
use wasm_bindgen::JsValue;
use web_sys::{window, Document};

use crate::api;
use crate::checkout::{CheckoutFlow, CheckoutRegions, ModalController};
use crate::config;
use crate::dom::{selectors, DomRegion, DomRegionList, UiRegion};
use crate::plan::{PlanPeriod, PlanType};
use crate::reconcile::{reconcile, PageState, PlanButtonDescriptor};
use crate::token::get_token;

/// Binds the controller to the host template and runs the page-load flow:
/// resolve regions, read the session cookie, fetch account state, apply the
/// reconciled visibility/labels, then arm the buy controls.
pub async fn run(document: &Document) -> Result<(), JsValue> {
    // hidden is the default state before any reconciliation
    DomRegionList::query(document, selectors::DROPDOWN_PRICES).hide();
    DomRegionList::query(document, selectors::DROPDOWN_SUBS).hide();

    let modal = ModalController::bind(document);
    let buy_buttons = DomRegionList::query(document, selectors::BUY_BUTTONS);

    let Some(token) = get_token() else {
        bind_install_variant(&buy_buttons);
        return Ok(());
    };

    // signed-in affordances become visible before the fetch
    if let Some(header) = DomRegion::query(document, selectors::SITE_INFO_HEADER) {
        header.show();
    }
    if let Some(subscription_btn) = DomRegion::query(document, selectors::NAVBAR_SUBSCRIPTION_BTN) {
        subscription_btn.show();
    }
    if let Some(install_btn) = DomRegion::query(document, selectors::NAVBAR_INSTALL_BTN) {
        install_btn.hide();
    }

    // a failed fetch aborts here and leaves the page in its pre-fetch state
    let account = api::fetch_account_info(&token).await.map_err(|e| {
        error!("Error getting site info: {}", e);
        JsValue::from_str(&e.to_string())
    })?;
    info!("Account info loaded, plan period {}", account.plan_period);

    DomRegionList::query(document, selectors::SITE_NAMES).set_text(&account.display_name);

    let bindings: Vec<(DomRegion, PlanButtonDescriptor)> = buy_buttons
        .iter()
        .map(|button| {
            let descriptor = PlanButtonDescriptor {
                plan_type: button
                    .attribute("plan-type")
                    .as_deref()
                    .and_then(PlanType::from_str),
                plan_period: button
                    .attribute("plan-period")
                    .as_deref()
                    .map(PlanPeriod::from_str),
            };
            (button.clone(), descriptor)
        })
        .collect();
    let descriptors: Vec<PlanButtonDescriptor> =
        bindings.iter().map(|(_, d)| d.clone()).collect();

    let state = reconcile(&account, &descriptors);
    apply_page_state(document, &state, &bindings);

    // arm the buy controls only after the page reflects account state
    let flow = CheckoutFlow::new(
        document.clone(),
        token,
        account.display_name.clone(),
        modal,
        CheckoutRegions {
            plan_label: DomRegion::query(document, selectors::MODAL_PLAN),
            price_rows: DomRegionList::query(document, selectors::MODAL_PRICES),
            link_text: DomRegion::query(document, selectors::CHECKOUT_LINK_TEXT),
            site_names: DomRegionList::query(document, selectors::SITE_NAMES),
        },
    );
    for (button, descriptor) in bindings {
        flow.arm(&button, descriptor);
    }

    Ok(())
}

/// No session cookie: every buy control becomes an install affordance that
/// navigates to the app-installation endpoint. No account fetch happens.
fn bind_install_variant(buy_buttons: &DomRegionList) {
    for button in buy_buttons.iter() {
        if let Some(text_region) = button.query_child(selectors::BUTTON_TEXT) {
            text_region.set_text("Install App");
        }
        button.on_activate(move || {
            if let Some(window) = window() {
                let _ = window.location().set_href(&config::install_url());
            }
        });
    }
}

fn apply_page_state(
    document: &Document,
    state: &PageState,
    bindings: &[(DomRegion, PlanButtonDescriptor)],
) {
    if let Some(plan_btn) = DomRegion::query(document, selectors::DROPDOWN_BTN_PLAN) {
        plan_btn.set_text(&state.plan_button_label);
    }
    if let Some(dropdown) = DomRegion::query(document, selectors::DROPDOWN_PLAN) {
        dropdown.set_text(&state.dropdown_plan_label);
    }

    if let Some(period) = &state.revealed_price_row {
        DomRegionList::query(document, &selectors::dropdown_price(period.as_str())).show();
    }
    if let Some(panel) = DomRegion::query(
        document,
        &selectors::dropdown_subs(state.revealed_subscription_panel.as_str()),
    ) {
        panel.show();
    }
    if let Some(text) = &state.subscription_end_text {
        DomRegionList::query(document, selectors::SUBSCRIPTION_END_DATES).set_text(text);
    }

    for ((button, _), button_state) in bindings.iter().zip(&state.buttons) {
        if let Some(label) = button_state.label {
            if let Some(text_region) = button.query_child(selectors::BUTTON_TEXT) {
                text_region.set_text(label);
            }
        }
        if button_state.hide_buy {
            if let Some(key) = buy_control_key(&state.revealed_subscription_panel) {
                if let Some(control) = DomRegion::query(document, &selectors::button_type(key)) {
                    control.hide();
                }
            }
        }
        if button_state.reveal_success {
            if let Some(success) = success_region(button) {
                success.show();
            }
        }
    }
}

/// The template's typed buy control hidden once the matching plan is owned.
fn buy_control_key(period: &PlanPeriod) -> Option<&'static str> {
    match period {
        PlanPeriod::Free => Some("free-install"),
        PlanPeriod::Yearly => Some("yearly"),
        PlanPeriod::Lifetime => Some("lifetime"),
        PlanPeriod::Other(_) => None,
    }
}

/// The success panel sits next to the buy control's `[data-button-type]`
/// wrapper, one level up in the template.
fn success_region(button: &DomRegion) -> Option<DomRegion> {
    let wrapper = button
        .element()
        .closest(selectors::BUTTON_TYPE_WRAPPER)
        .ok()
        .flatten()?;
    let parent = wrapper.parent_element()?;
    parent
        .query_selector(selectors::SUCCESS_INFO)
        .ok()
        .flatten()
        .map(DomRegion::new)
}

use crate::account::AccountRecord;
use crate::format::format_subscription_date;
use crate::plan::{PlanPeriod, PlanType};

/// One buy control as discovered on the page at load time. Attribute values
/// that fail to parse count as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanButtonDescriptor {
    pub plan_type: Option<PlanType>,
    pub plan_period: Option<PlanPeriod>,
}

impl PlanButtonDescriptor {
    /// The (type, period) pair to start a checkout with. `None` when either
    /// attribute is missing, which is a template configuration error.
    pub fn plan_selection(&self) -> Option<(PlanType, PlanPeriod)> {
        match (self.plan_type, self.plan_period.clone()) {
            (Some(plan_type), Some(plan_period)) => Some((plan_type, plan_period)),
            _ => None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.plan_selection().is_some()
    }
}

/// Computed state for a single buy control.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    /// Replacement text for the control's label, when the tier calls for one.
    pub label: Option<&'static str>,
    pub hide_buy: bool,
    pub reveal_success: bool,
}

/// Fully determined visibility/label state for the page. A pure function of
/// the account record and the discovered buy controls; applying it is
/// idempotent because every field is an absolute state, not a delta.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub plan_button_label: String,
    pub dropdown_plan_label: String,
    /// Pricing row to reveal in the dropdown; `None` on the free tier (all
    /// rows stay at their hidden default).
    pub revealed_price_row: Option<PlanPeriod>,
    /// Subscription-detail panel keyed by the current period; exactly one.
    pub revealed_subscription_panel: PlanPeriod,
    /// Formatted expiry date for every subscription-end display region; only
    /// populated while on the yearly tier.
    pub subscription_end_text: Option<String>,
    /// Parallel to the descriptor slice passed to [`reconcile`].
    pub buttons: Vec<ButtonState>,
}

/// Computes the page's visibility/label state from the fetched account
/// record. Deterministic, no ordering dependency between regions.
pub fn reconcile(account: &AccountRecord, buttons: &[PlanButtonDescriptor]) -> PageState {
    let current = &account.plan_period;

    // the date regions belong to the yearly buy control; a template without
    // one leaves them untouched
    let has_yearly_control = buttons
        .iter()
        .any(|d| d.plan_period == Some(PlanPeriod::Yearly));
    let subscription_end_text = if *current == PlanPeriod::Yearly && has_yearly_control {
        Some(format_subscription_date(&account.subscription_end_date))
    } else {
        None
    };

    let button_states = buttons
        .iter()
        .map(|descriptor| reconcile_button(descriptor, current))
        .collect();

    PageState {
        plan_button_label: current.button_label(),
        dropdown_plan_label: current.dropdown_label(),
        revealed_price_row: if current.is_free() {
            None
        } else {
            Some(current.clone())
        },
        revealed_subscription_panel: current.clone(),
        subscription_end_text,
        buttons: button_states,
    }
}

fn reconcile_button(descriptor: &PlanButtonDescriptor, current: &PlanPeriod) -> ButtonState {
    let mut state = ButtonState {
        label: None,
        hide_buy: false,
        reveal_success: false,
    };

    if descriptor.plan_type == Some(PlanType::Free) && current.is_free() {
        state.hide_buy = true;
        state.reveal_success = true;
    }

    match descriptor.plan_period {
        Some(PlanPeriod::Yearly) => {
            state.label = Some("upgrade to yearly");
            if *current == PlanPeriod::Yearly {
                state.hide_buy = true;
                state.reveal_success = true;
            }
        }
        Some(PlanPeriod::Lifetime) => {
            state.label = Some("upgrade to lifetime");
            if *current == PlanPeriod::Lifetime {
                state.hide_buy = true;
                state.reveal_success = true;
            }
        }
        _ => {}
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(period: PlanPeriod) -> AccountRecord {
        AccountRecord {
            display_name: "Acme".to_string(),
            plan_period: period,
            subscription_end_date: "2025-03-01".to_string(),
        }
    }

    fn descriptor(plan_type: PlanType, plan_period: PlanPeriod) -> PlanButtonDescriptor {
        PlanButtonDescriptor {
            plan_type: Some(plan_type),
            plan_period: Some(plan_period),
        }
    }

    fn standard_buttons() -> Vec<PlanButtonDescriptor> {
        vec![
            descriptor(PlanType::Free, PlanPeriod::Yearly),
            descriptor(PlanType::Yearly, PlanPeriod::Yearly),
            descriptor(PlanType::Lifetime, PlanPeriod::Lifetime),
        ]
    }

    #[test]
    fn free_tier_labels_and_hidden_price_rows() {
        let state = reconcile(&account(PlanPeriod::Free), &standard_buttons());
        assert_eq!(state.plan_button_label, "No Plan");
        assert_eq!(state.dropdown_plan_label, "Staging (free)");
        assert_eq!(state.revealed_price_row, None);
        assert_eq!(state.revealed_subscription_panel, PlanPeriod::Free);
        assert_eq!(state.subscription_end_text, None);
    }

    #[test]
    fn free_account_reveals_only_the_free_success_region() {
        let state = reconcile(&account(PlanPeriod::Free), &standard_buttons());
        // free button carries plan-type "free"
        assert!(state.buttons[0].hide_buy);
        assert!(state.buttons[0].reveal_success);
        assert!(!state.buttons[1].reveal_success);
        assert!(!state.buttons[2].reveal_success);
    }

    #[test]
    fn yearly_account_full_scenario() {
        let state = reconcile(&account(PlanPeriod::Yearly), &standard_buttons());
        assert_eq!(state.plan_button_label, "yearly Plan");
        assert_eq!(state.dropdown_plan_label, "yearly");
        assert_eq!(state.revealed_price_row, Some(PlanPeriod::Yearly));
        assert_eq!(state.revealed_subscription_panel, PlanPeriod::Yearly);
        assert_eq!(
            state.subscription_end_text.as_deref(),
            Some("March 1, 2025")
        );

        // the yearly buy control is hidden and its success region revealed
        assert!(state.buttons[1].hide_buy);
        assert!(state.buttons[1].reveal_success);
        // the lifetime control keeps its upgrade label and stays visible
        assert_eq!(state.buttons[2].label, Some("upgrade to lifetime"));
        assert!(!state.buttons[2].hide_buy);
        assert!(!state.buttons[2].reveal_success);
    }

    #[test]
    fn free_descriptor_on_yearly_account_stays_hidden() {
        // only matching-plan descriptors reveal their success region
        let buttons = vec![descriptor(PlanType::Free, PlanPeriod::Lifetime)];
        let state = reconcile(&account(PlanPeriod::Yearly), &buttons);
        assert!(!state.buttons[0].hide_buy);
        assert!(!state.buttons[0].reveal_success);
    }

    #[test]
    fn period_match_governs_independently_of_plan_type() {
        let buttons = vec![descriptor(PlanType::Free, PlanPeriod::Yearly)];
        let state = reconcile(&account(PlanPeriod::Yearly), &buttons);
        assert_eq!(state.buttons[0].label, Some("upgrade to yearly"));
        assert!(state.buttons[0].hide_buy);
        assert!(state.buttons[0].reveal_success);
    }

    #[test]
    fn date_regions_stay_untouched_without_a_yearly_control() {
        let buttons = vec![
            descriptor(PlanType::Free, PlanPeriod::Free),
            descriptor(PlanType::Lifetime, PlanPeriod::Lifetime),
        ];
        let state = reconcile(&account(PlanPeriod::Yearly), &buttons);
        assert_eq!(state.subscription_end_text, None);
        // everything else still reflects the yearly account
        assert_eq!(state.plan_button_label, "yearly Plan");
        assert_eq!(state.revealed_subscription_panel, PlanPeriod::Yearly);
    }

    #[test]
    fn lifetime_account_hides_lifetime_control() {
        let state = reconcile(&account(PlanPeriod::Lifetime), &standard_buttons());
        assert_eq!(state.plan_button_label, "lifetime Plan");
        assert_eq!(state.revealed_price_row, Some(PlanPeriod::Lifetime));
        assert_eq!(state.subscription_end_text, None);
        assert!(state.buttons[2].hide_buy);
        assert!(state.buttons[2].reveal_success);
        assert!(!state.buttons[1].hide_buy);
        assert_eq!(state.buttons[1].label, Some("upgrade to yearly"));
    }

    #[test]
    fn unknown_period_reveals_its_keyed_regions() {
        let state = reconcile(
            &account(PlanPeriod::Other("beta".to_string())),
            &standard_buttons(),
        );
        assert_eq!(state.plan_button_label, "beta Plan");
        assert_eq!(state.dropdown_plan_label, "beta");
        assert_eq!(
            state.revealed_price_row,
            Some(PlanPeriod::Other("beta".to_string()))
        );
        assert!(!state.buttons[1].hide_buy);
        assert!(!state.buttons[2].hide_buy);
    }

    #[test]
    fn descriptor_without_attributes_is_inert() {
        let blank = PlanButtonDescriptor {
            plan_type: None,
            plan_period: None,
        };
        assert!(!blank.is_actionable());
        assert_eq!(blank.plan_selection(), None);
        let partial = PlanButtonDescriptor {
            plan_type: Some(PlanType::Yearly),
            plan_period: None,
        };
        assert!(!partial.is_actionable());
        assert_eq!(partial.plan_selection(), None);

        let full = descriptor(PlanType::Yearly, PlanPeriod::Yearly);
        assert_eq!(
            full.plan_selection(),
            Some((PlanType::Yearly, PlanPeriod::Yearly))
        );

        let state = reconcile(&account(PlanPeriod::Yearly), &[blank]);
        assert_eq!(state.buttons[0].label, None);
        assert!(!state.buttons[0].hide_buy);
        assert!(!state.buttons[0].reveal_success);
    }

    #[test]
    fn reconciliation_is_deterministic_and_idempotent() {
        let account = account(PlanPeriod::Yearly);
        let buttons = standard_buttons();
        let first = reconcile(&account, &buttons);
        let second = reconcile(&account, &buttons);
        assert_eq!(first, second);
    }
}

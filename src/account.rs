use serde::Deserialize;

use crate::plan::PlanPeriod;

/// Account/subscription state for the current site, as served by
/// `GET /v1/site/info`. Fetched at most once per page load.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub display_name: String,
    pub plan_period: PlanPeriod,
    pub subscription_end_date: String,
}

// Wire shape: { data: { displayName, paymentInfo: { planPeriod, subscriptionEndDate } } }
#[derive(Deserialize)]
pub(crate) struct SiteInfoResponse {
    data: SiteInfoData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteInfoData {
    display_name: String,
    payment_info: PaymentInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentInfo {
    plan_period: PlanPeriod,
    subscription_end_date: String,
}

impl From<SiteInfoResponse> for AccountRecord {
    fn from(resp: SiteInfoResponse) -> Self {
        AccountRecord {
            display_name: resp.data.display_name,
            plan_period: resp.data.payment_info.plan_period,
            subscription_end_date: resp.data.payment_info.subscription_end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let body = r#"{
            "data": {
                "displayName": "Acme",
                "paymentInfo": {
                    "planPeriod": "yearly",
                    "subscriptionEndDate": "2025-03-01"
                }
            }
        }"#;
        let record: AccountRecord = serde_json::from_str::<SiteInfoResponse>(body)
            .unwrap()
            .into();
        assert_eq!(record.display_name, "Acme");
        assert_eq!(record.plan_period, PlanPeriod::Yearly);
        assert_eq!(record.subscription_end_date, "2025-03-01");
    }

    #[test]
    fn missing_payment_info_is_rejected() {
        let body = r#"{ "data": { "displayName": "Acme" } }"#;
        assert!(serde_json::from_str::<SiteInfoResponse>(body).is_err());
    }

    #[test]
    fn missing_plan_period_is_rejected() {
        let body = r#"{
            "data": {
                "displayName": "Acme",
                "paymentInfo": { "subscriptionEndDate": "2025-03-01" }
            }
        }"#;
        assert!(serde_json::from_str::<SiteInfoResponse>(body).is_err());
    }
}

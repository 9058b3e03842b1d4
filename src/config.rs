#[cfg(debug_assertions)]
pub fn get_api_base_url() -> &'static str {
    "https://api-staging.candidleap.com"  // Staging URL while developing against the sandbox
}

#[cfg(not(debug_assertions))]
pub fn get_api_base_url() -> &'static str {
    "https://api-staging.candidleap.com"
}

pub fn site_info_url() -> String {
    format!("{}/v1/site/info", get_api_base_url())
}

pub fn checkout_url() -> String {
    format!("{}/v1/payment/checkout", get_api_base_url())
}

/// App-installation entry point for visitors without a session.
pub fn install_url() -> String {
    format!("{}/auth/webflow", get_api_base_url())
}

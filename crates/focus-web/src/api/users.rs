use gloo_net::http::Request;
use serde::Deserialize;
use shared::CONFIG;

/// User account info from the profile endpoint
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub timezone: String,
}

/// Tracked interval as serialized by focus-api. Completed intervals carry
/// display-formatted timestamps; the active one carries RFC 3339.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct IntervalView {
    pub interval_id: i64,
    pub user_id: i64,
    pub project_id: Option<i64>,
    pub name: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Profile response: account, completed intervals, active interval
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_info: UserInfo,
    pub intervals: Vec<IntervalView>,
    pub active_interval: Option<IntervalView>,
}

/// Fetch a user's profile from the focus-api server
pub async fn get_profile(user_id: i64) -> Option<Profile> {
    let url = format!("{}/api/user/{}", CONFIG.api_base, user_id);

    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .ok()?;

    if !response.ok() {
        web_sys::console::error_1(&format!("Focus API error: {}", response.status()).into());
        return None;
    }

    response.json().await.ok()
}

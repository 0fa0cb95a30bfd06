use leptos::prelude::*;
use shared::CONFIG;

use crate::api::{Profile, get_profile};

/// Fetch the tracker panel's data
async fn fetch_tracker() -> Option<Profile> {
    get_profile(CONFIG.default_user_id).await
}

/// Tracker status panel - shows the signed-in user's current tracking state
#[component]
pub fn TrackerStatus() -> impl IntoView {
    let profile = LocalResource::new(fetch_tracker);

    view! {
        <Suspense fallback=move || view! {
            <div class="text-slate-400">"Loading tracker..."</div>
        }>
            {move || {
                profile.get().map(|result| {
                    // Dereference SendWrapper to access inner Option
                    match &*result {
                        Some(data) => view! { <TrackerContent profile=data.clone() /> }.into_any(),
                        None => view! {
                            <div class="text-slate-400">
                                "Tracker data unavailable. Is the focus-api server running?"
                            </div>
                        }.into_any(),
                    }
                })
            }}
        </Suspense>
    }
}

#[component]
fn TrackerContent(profile: Profile) -> impl IntoView {
    let user = profile.user_info.clone();
    let completed = profile.intervals.len();

    view! {
        <div class="space-y-4">
            <div>
                <strong>{user.username}</strong>
                " · " {user.timezone}
            </div>

            {match profile.active_interval {
                Some(active) => {
                    let started = active.start_time.clone().unwrap_or_default();
                    view! {
                        <div>
                            <strong>"TRACKING"</strong> " " {active.name}
                            <br />
                            <span class="text-sm text-slate-400">
                                "since " {started}
                            </span>
                        </div>
                    }.into_any()
                }
                None => view! {
                    <div class="text-slate-400">"No interval running"</div>
                }.into_any(),
            }}

            <div>
                <strong>"COMPLETED"</strong> " " {completed} " interval(s)"
            </div>
        </div>
    }
}

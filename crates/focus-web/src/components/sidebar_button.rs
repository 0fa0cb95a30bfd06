use leptos::prelude::*;

/// One clickable navigation row: icon, label, bound action.
/// The callback fires exactly once per activation, with no arguments.
#[component]
pub fn SidebarButton(
    label: &'static str,
    icon: &'static str,
    #[prop(into)] on_press: Callback<()>,
) -> impl IntoView {
    view! {
        <button class="sidebar-button" on:click=move |_| on_press.run(())>
            <img class="sidebar-button-icon" src=icon alt="" />
            <span class="sidebar-button-label">{label}</span>
        </button>
    }
}

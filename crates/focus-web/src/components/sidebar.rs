use leptos::prelude::*;
use shared::{MENU, MenuAction};

use crate::components::SidebarButton;

/// Class pair for the two mutually exclusive presentation modes
fn panel_class(collapsed: bool) -> &'static str {
    if collapsed {
        "sidebar sidebar-collapsed"
    } else {
        "sidebar sidebar-expanded"
    }
}

/// Sidebar component - the navigation menu panel
///
/// Renders the groups of `shared::MENU` in their fixed order: captions as
/// bold non-interactive text, entries as `SidebarButton` rows. The panel is
/// stateless; the host supplies the collapse flag and the activation handler.
#[component]
pub fn Sidebar(
    #[prop(into)] collapsed: Signal<bool>,
    #[prop(into)] on_activate: Callback<MenuAction>,
) -> impl IntoView {
    view! {
        <nav class=move || panel_class(collapsed.get())>
            {MENU
                .iter()
                .map(|group| {
                    view! {
                        {group
                            .caption
                            .map(|caption| {
                                view! { <p class="sidebar-caption font-bold">{caption}</p> }
                            })}
                        {group
                            .entries
                            .iter()
                            .map(|entry| {
                                let action = entry.action;
                                view! {
                                    <SidebarButton
                                        label=entry.label
                                        icon=entry.icon
                                        on_press=Callback::new(move |_| on_activate.run(action))
                                    />
                                }
                            })
                            .collect_view()}
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_classes_are_mutually_exclusive() {
        assert_eq!(panel_class(true), "sidebar sidebar-collapsed");
        assert_eq!(panel_class(false), "sidebar sidebar-expanded");
        assert_ne!(panel_class(true), panel_class(false));
    }

    #[test]
    fn test_panel_class_is_deterministic() {
        assert_eq!(panel_class(true), panel_class(true));
        assert_eq!(panel_class(false), panel_class(false));
    }
}

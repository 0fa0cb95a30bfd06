//! Static navigation menu definition
//!
//! The sidebar renders this structure verbatim: group order, entry order, and
//! captions are part of the visible contract. Entries carry an action
//! identifier instead of behavior so the shell decides what activation does.

/// Placeholder asset shared by every entry until per-entry icons land
pub const PLACEHOLDER_ICON: &str = "/Cheese.png";

/// Identifier for what a menu entry activates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    TimeTracker,
    Calendar,
    Rooms,
    Dashboard,
    Reports,
    Projects,
    Settings,
}

impl MenuAction {
    /// Stable name for diagnostics and logging
    pub fn name(self) -> &'static str {
        match self {
            MenuAction::TimeTracker => "time-tracker",
            MenuAction::Calendar => "calendar",
            MenuAction::Rooms => "rooms",
            MenuAction::Dashboard => "dashboard",
            MenuAction::Reports => "reports",
            MenuAction::Projects => "projects",
            MenuAction::Settings => "settings",
        }
    }
}

/// One clickable navigation row
pub struct MenuEntry {
    pub label: &'static str,
    pub icon: &'static str,
    pub action: MenuAction,
}

/// A run of entries under an optional bold section caption
pub struct MenuGroup {
    pub caption: Option<&'static str>,
    pub entries: &'static [MenuEntry],
}

pub static MENU: &[MenuGroup] = &[
    MenuGroup {
        caption: None,
        entries: &[
            MenuEntry {
                label: "TIME TRACKER",
                icon: PLACEHOLDER_ICON,
                action: MenuAction::TimeTracker,
            },
            MenuEntry {
                label: "CALENDAR",
                icon: PLACEHOLDER_ICON,
                action: MenuAction::Calendar,
            },
            MenuEntry {
                label: "ROOMS",
                icon: PLACEHOLDER_ICON,
                action: MenuAction::Rooms,
            },
        ],
    },
    MenuGroup {
        caption: Some("ANALYZE"),
        entries: &[
            MenuEntry {
                label: "DASHBOARD",
                icon: PLACEHOLDER_ICON,
                action: MenuAction::Dashboard,
            },
            MenuEntry {
                label: "REPORTS",
                icon: PLACEHOLDER_ICON,
                action: MenuAction::Reports,
            },
        ],
    },
    MenuGroup {
        caption: Some("MANAGE"),
        entries: &[
            MenuEntry {
                label: "PROJECTS",
                icon: PLACEHOLDER_ICON,
                action: MenuAction::Projects,
            },
            MenuEntry {
                label: "SETTINGS",
                icon: PLACEHOLDER_ICON,
                action: MenuAction::Settings,
            },
        ],
    },
];

/// All entries in render order, groups flattened
pub fn entries() -> impl Iterator<Item = &'static MenuEntry> {
    MENU.iter().flat_map(|group| group.entries.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_order_is_fixed() {
        let labels: Vec<&str> = entries().map(|e| e.label).collect();
        assert_eq!(
            labels,
            [
                "TIME TRACKER",
                "CALENDAR",
                "ROOMS",
                "DASHBOARD",
                "REPORTS",
                "PROJECTS",
                "SETTINGS",
            ]
        );
    }

    #[test]
    fn test_captions_and_group_sizes() {
        let captions: Vec<Option<&str>> = MENU.iter().map(|g| g.caption).collect();
        assert_eq!(captions, [None, Some("ANALYZE"), Some("MANAGE")]);

        let sizes: Vec<usize> = MENU.iter().map(|g| g.entries.len()).collect();
        assert_eq!(sizes, [3, 2, 2]);
    }

    #[test]
    fn test_labels_are_non_empty() {
        for entry in entries() {
            assert!(!entry.label.is_empty());
        }
    }

    #[test]
    fn test_actions_are_unique() {
        let actions: Vec<MenuAction> = entries().map(|e| e.action).collect();
        let unique: std::collections::HashSet<MenuAction> = actions.iter().copied().collect();
        assert_eq!(unique.len(), actions.len());
    }

    #[test]
    fn test_all_icons_use_placeholder() {
        // Every entry currently shares the same placeholder asset
        for entry in entries() {
            assert_eq!(entry.icon, PLACEHOLDER_ICON);
        }
    }
}

pub mod menu;

pub use menu::{MENU, MenuAction, MenuEntry, MenuGroup};

/// Static application configuration
pub struct Config {
    pub name: &'static str,
    pub tagline: &'static str,

    /// Base URL of the focus-api server
    pub api_base: &'static str,
    /// User shown in the tracker panel until account selection exists
    pub default_user_id: i64,
}

pub static CONFIG: Config = Config {
    name: "Focus",
    tagline: "Collaborative time tracking",

    api_base: "http://127.0.0.1:5000",
    default_user_id: 1,
};

mod sidebar;
mod sidebar_button;
mod tracker;

pub use sidebar::Sidebar;
pub use sidebar_button::SidebarButton;
pub use tracker::TrackerStatus;

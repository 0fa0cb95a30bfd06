mod users;

pub use users::{IntervalView, Profile, UserInfo, get_profile};

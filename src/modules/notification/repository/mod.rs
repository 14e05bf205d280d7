pub mod notification;
pub mod preference;

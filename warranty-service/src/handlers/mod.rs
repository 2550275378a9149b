pub mod api;
pub mod tenant;

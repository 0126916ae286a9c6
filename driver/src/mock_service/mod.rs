pub mod bridge;
pub mod profile;

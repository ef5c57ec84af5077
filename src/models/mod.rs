pub mod payload;
pub mod user;

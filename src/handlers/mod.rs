pub mod fallback;
pub mod health;
pub mod login;
pub mod user_item;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

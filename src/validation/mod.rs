pub mod user_input;

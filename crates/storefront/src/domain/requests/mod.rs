pub mod auth;
pub mod cart;
pub mod contact;
pub mod order;

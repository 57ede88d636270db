pub mod api;
pub mod cart;
pub mod contact;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

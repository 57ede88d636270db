pub mod cart_item;
pub mod contact_message;
pub mod order;
pub mod product;
pub mod user;

mod cart;
mod contact;
mod order;
mod product;
mod user;

pub use self::cart::{CartCommandRepository, CartQueryRepository};
pub use self::contact::ContactRepository;
pub use self::order::{OrderCommandRepository, OrderQueryRepository};
pub use self::product::ProductQueryRepository;
pub use self::user::UserRepository;

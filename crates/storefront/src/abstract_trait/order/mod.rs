pub mod repository;
mod service;

pub use self::repository::{
    DynOrderCommandRepository, DynOrderQueryRepository, OrderCommandRepositoryTrait,
    OrderQueryRepositoryTrait,
};
pub use self::service::{DynOrderService, OrderServiceTrait};

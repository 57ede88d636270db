mod repository;
mod service;

pub use self::repository::{ContactRepositoryTrait, DynContactRepository};
pub use self::service::{ContactServiceTrait, DynContactService};

//! Storage infrastructure - Member store implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{MemberStoreFactory, MemberStores, StorageConfig, StorageType};
pub use in_memory::InMemoryMemberStore;
pub use postgres::{PostgresConfig, PostgresMemberStore};

mod entities;
mod image_store;
mod memory;
mod repository;

pub use image_store::{ImageStore, NullImageStore};
pub use memory::MemoryRepository;
pub use repository::{Entity, Repository, StoreError};

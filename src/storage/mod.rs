mod json_store;
mod memory;
mod store;

pub use json_store::{JsonStore, WorkbookState};
pub use memory::MemoryStore;
pub use store::CostingStore;

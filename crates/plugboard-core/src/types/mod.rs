mod arena;
mod id;
mod property;

pub use arena::Arena;
pub use id::Id;
pub use property::{Property, PropertyList};

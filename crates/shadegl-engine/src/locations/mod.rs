//! Attribute/uniform location cache and the types used to wire them.

mod cache;
mod layout;

pub use cache::LocationCache;
pub use layout::{AttributeLayout, ComponentType, UniformValue};

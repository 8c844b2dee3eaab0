pub mod catalog;
pub mod grouping;
pub mod node;
pub mod normalize;
pub mod registry;
pub mod validate;

pub use catalog::Catalog;
pub use node::{Region, ResourceNode, Skill};

pub mod policy;
pub mod resolver;

pub use policy::{AutoCopyPolicy, select_secondary};
pub use resolver::resolve;

pub mod element;
pub mod node;

pub use element::*;
pub use node::*;

pub mod drag;
pub mod pointer;
pub mod state;

pub use drag::*;
pub use pointer::*;
pub use state::*;

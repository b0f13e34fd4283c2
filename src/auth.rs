//! Token models and the client lifecycle state.

pub mod secret;
pub mod state;
pub mod token;

pub use secret::*;
pub use state::*;
pub use token::*;

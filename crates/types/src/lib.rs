/// Shared types for the GasPad launchpad
/// 
/// This crate provides the token data model, wallet state, constants and the
/// shared error type used by the launch store, wallet session and launch flow.

pub mod constants;
pub mod errors;
pub mod token;
pub mod wallet;

// Re-export all public types
pub use constants::*;
pub use errors::*;
pub use token::*;
pub use wallet::*;

/// Result type alias using the shared error type
pub type GasPadResult<T> = std::result::Result<T, GasPadError>;

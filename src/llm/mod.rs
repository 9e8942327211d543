pub mod prompts;
pub mod response;

#[cfg(feature = "gemini")]
pub mod analyst;
#[cfg(feature = "gemini")]
pub mod client;
#[cfg(feature = "gemini")]
pub mod types;

#[cfg(feature = "gemini")]
pub use analyst::*;
#[cfg(feature = "gemini")]
pub use client::*;
pub use prompts::*;
pub use response::*;

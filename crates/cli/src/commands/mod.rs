pub mod classify;
pub mod clean;
pub mod demo;
pub mod fingerprint;

pub use classify::*;
pub use clean::*;
pub use demo::*;
pub use fingerprint::*;

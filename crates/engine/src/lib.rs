//! # githook engine
//!
//! Everything between the CLI and the filesystem:
//!
//! - **Sources**: resolving install specifiers and materializing hook content
//! - **Fetching**: the network seam used by remote sources
//! - **Store**: installed hooks under `<gitdir>/hooks/installed/<timing>`
//! - **Stubs**: the native hook files git invokes
//! - **Dispatch**: running installed hooks as an AND-chain

pub mod dispatch;
pub mod fetch;
pub mod source;
pub mod store;
pub mod stub;

// Re-export error types from core
pub use githook_core::{Error, HookName, Result, Timing};

// Re-export commonly used types
pub use dispatch::{DispatchOutcome, Dispatcher, HookInput};
pub use fetch::{Fetcher, HttpFetcher};
pub use source::{HookSource, InstallMode};
pub use store::{HookStore, InstallOptions};
pub use stub::{StubState, StubStatus, ensure_stub, inspect_stub, run_stub};

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Apply CLI overrides → Validate → Build server → Bind
//!
//! Shutdown:
//!     SIGTERM/SIGINT (signals.rs) or Shutdown::trigger (shutdown.rs)
//!         → Stop accepting → Drain in-flight requests → Exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;

//! Logger setup.
//!
//! The crate only talks to the `log` facade; this wires `env_logger` behind it
//! for binaries that want the usual `RUST_LOG` behavior.

mod init;

pub use init::{init_logging, LoggingConfig};

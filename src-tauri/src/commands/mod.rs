//! Commands Layer
//!
//! The only IPC surface the webview can reach. Everything else is routed by
//! name through the shell's command registry.

mod dispatch_cmd;

pub use dispatch_cmd::*;

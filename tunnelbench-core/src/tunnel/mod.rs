//! Tunnel lifecycle
//!
//! Only one tunnel may hold the machine's routing table at a time. The
//! [`TunnelController`] owns that single slot and hands it out as a
//! [`TunnelSession`]; [`TunnelController::scoped`] guarantees teardown for
//! every body run inside a session.

pub mod controller;
pub mod guard;
pub mod session;

pub use controller::TunnelController;
pub use guard::{run_guarded, BodyPanic};
pub use session::TunnelSession;

//! Session lifecycle: state, ports, and the manager that drives them

pub mod manager;
pub mod ports;
pub mod state;

pub use manager::SessionManager;
pub use ports::{AccessTokenStore, AuthBackend, Navigator};
pub use state::{SessionPhase, SessionSnapshot, SessionState};

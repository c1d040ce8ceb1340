//! honkview
//!
//! Terminal client for honk feeds. Views are fetched from the server's
//! hydra endpoint, cached while the user is elsewhere, and refreshed
//! incrementally with newly arrived items highlighted.
//!
//! Pure core (`model`, `parser`, `state`) wrapped by an impure shell
//! (`transport`, `view`).

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod state;
pub mod transport;
pub mod view;

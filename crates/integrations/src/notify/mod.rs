//! Email delivery is out of scope; this re-exports the logging stand-in so
//! `boxoffice-api`'s wiring has a single place to reach for a `Notifier`
//! alongside the other external collaborators.

pub use boxoffice_core::notify::LoggingNotifier;

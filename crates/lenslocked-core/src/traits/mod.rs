//! Collaborator traits defined in `lenslocked-core` and implemented by other crates.

pub mod mailer;

pub use mailer::{Mailer, OutgoingEmail};

//! Core type definitions used across the Lenslocked workspace.

pub mod id;

pub use id::*;

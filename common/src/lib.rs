//! # ipmd5 common
//!
//! Domain models and ports shared by the search engine and the command line.
//!
//! * **[`network`]**: IPv4 ranges and their CIDR text form.
//! * **[`models`]**: records flowing out of the search.
//! * **[`sink`]**: the port through which matches leave the engine.
//! * **[`config`]**: the already-parsed run configuration.
//! * **[`error`]**: the error taxonomy used across the workspace.

pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod sink;

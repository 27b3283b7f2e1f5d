//! # ipmd5 core
//!
//! The concurrent search engine. Data flows one way:
//!
//! [`partition`] → job queue → [`pool`] workers
//! ([`enumerate`] → [`hasher`] → [`matcher`]) → result channel → [`sink`].
//!
//! [`targets`] is loaded once before the pool starts and is only ever
//! borrowed immutably by the workers. [`search`] ties the pieces together
//! and owns the shutdown order.

pub mod enumerate;
pub mod hasher;
pub mod matcher;
pub mod partition;
pub mod pool;
pub mod search;
pub mod sink;
pub mod targets;

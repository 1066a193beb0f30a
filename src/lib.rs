//! Contact record store.
//!
//! A small CRUD system in two halves: an HTTP service ([`server`], [`routes`])
//! that maps REST requests onto parameterized SQL against a single `contacts`
//! table, and an interactive terminal client ([`client`], [`menu`]) that
//! drives the service over HTTP.

pub mod client;
pub mod config;
pub mod contact;
pub mod db;
pub mod error;
pub mod menu;
pub mod routes;
pub mod schema;
pub mod server;

pub use client::{ApiClient, ClientError};
pub use config::DbConfig;
pub use contact::{Contact, ContactPatch, Message, NewContact};
pub use error::ApiError;
pub use routes::{app, AppState};

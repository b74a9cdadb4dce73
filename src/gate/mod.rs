//! Chat gateway module
//!
//! HTTP surface that routes provider-agnostic chat requests to the
//! configured adapters.

pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod server;

pub use config::GatewayConfig;
pub use error::{ErrorBody, GatewayError};
pub use gateway::{ChatGateway, ChatRequest, ChatResponse};
pub use server::{router, start_server};

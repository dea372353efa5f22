//! Wallet gateway library: signs transfer requests and relays them to a blockchain node.

pub mod blockchain;
pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use gateway::TransactionGateway;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

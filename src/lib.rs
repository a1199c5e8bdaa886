pub mod arguments;
pub mod endpoints;
pub mod errors;
pub mod logger;
pub mod rpc;
pub mod transactions;

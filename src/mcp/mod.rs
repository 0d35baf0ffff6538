//! Line-delimited JSON-RPC tool server.
//!
//! - `types`: request, response and error envelopes
//! - `server`: `McpServer`, which resolves methods and dispatches tool calls
//! - `transport`: the stdin/stdout loop

pub mod server;
pub mod transport;
pub mod types;

pub use server::McpServer;
pub use types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};

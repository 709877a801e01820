mod connectivity;
mod http_client;

pub use connectivity::ConnectivityMonitor;
pub use http_client::HttpExecutionClient;

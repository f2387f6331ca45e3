pub mod config;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod server;
pub mod types;

// Layered boundaries: capability ports, local model adapters, remote clients,
// and the orchestration that ties them together.
pub mod app;
pub mod infra;
pub mod model;
pub mod pipeline;

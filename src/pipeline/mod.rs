pub mod orchestrator;

pub use self::orchestrator::Orchestrator;

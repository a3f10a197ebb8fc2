pub mod backend;
pub mod charts;
pub mod metrics;
pub mod report;
pub mod state;
pub mod validator;
pub mod watcher;
pub mod workflow;

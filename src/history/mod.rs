pub mod deployment;
pub mod reconciler;
pub mod store;

pub use deployment::DeploymentId;
pub use reconciler::HistoryReconciler;
pub use store::HistoryStore;

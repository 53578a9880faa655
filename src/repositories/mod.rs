//! Repository layer for database operations.
//!
//! Repositories are stateless: every function takes the connection (or an
//! open transaction) it should run against, so callers decide the
//! transactional scope.

pub mod context;
pub mod project;
pub mod task;

pub use context::ContextRepository;
pub use project::ProjectRepository;
pub use task::TaskRepository;

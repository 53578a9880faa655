pub mod context;
pub mod project;
pub mod task;

pub use context::Entity as Context;
pub use project::Entity as Project;
pub use task::Entity as Task;

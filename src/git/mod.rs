pub mod command;
pub mod repository;

pub use command::GitLogCommand;
pub use repository::{validate, GitRepository};

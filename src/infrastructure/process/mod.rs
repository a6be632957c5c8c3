//! Process execution

mod runner;

pub use runner::SystemCommandRunner;

pub mod r#box;
pub mod progress;

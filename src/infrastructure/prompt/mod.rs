//! Operator prompts

mod confirm;

pub use confirm::{summary_lines, InteractiveConfirmer, LineConfirmer, OperatorConfirmer};

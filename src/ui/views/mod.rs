pub mod deploy;
pub mod transfer;

//! Domain Layer
//!
//! Pure deployment rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Validated values (RemoteHost, RemotePath, ShellArg, BackupName)
//! - `policies/` - Business rules (input validation, backup retention)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Policies are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod policies;
pub mod ports;
pub mod value_objects;

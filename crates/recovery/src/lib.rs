pub mod attempter;
pub mod wrapper;

pub use attempter::{AsyncAttempter, RecoveryAttempter, SyncAttempter};
pub use wrapper::{MakeRecoverable, RecoverableError, RecoverableErrorWrapper};

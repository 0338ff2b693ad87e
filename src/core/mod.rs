pub mod poller;
pub mod status;
pub mod validator;

pub use crate::domain::model::{ApiResponse, HomeworkRecord, PollState, TickOutcome, Verdict};
pub use crate::domain::ports::{ConfigProvider, FailurePolicy, HomeworkSource, Notifier};
pub use crate::utils::error::Result;

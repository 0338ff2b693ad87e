pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{practicum::PracticumClient, telegram::TelegramNotifier};
pub use config::NotifierConfig;
pub use core::poller::Poller;
pub use utils::error::{NotifierError, Result};

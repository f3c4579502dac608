//! Mailer implementations

mod log_only;
mod memory;
mod smtp;

pub use log_only::LogMailer;
pub use memory::MemoryMailer;
pub use smtp::SmtpMailer;

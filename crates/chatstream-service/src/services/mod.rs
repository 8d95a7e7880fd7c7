//! Business logic services

mod context;
mod error;
mod message;
mod registration;
mod unit_of_work;

pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_STORE_TIMEOUT};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use registration::{spawn_registration_sweeper, RegistrationService};
pub use unit_of_work::with_deadline;

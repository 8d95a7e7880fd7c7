//! Pending registrations awaiting email verification
//!
//! A registration is parked under a random token until the mailed link is
//! followed; only then is a `User` row committed.

mod mailer;
mod store;

pub use mailer::{LogMailer, MailError, Mailer};
pub use store::{generate_token, PendingRegistration, PendingRegistrationStore};

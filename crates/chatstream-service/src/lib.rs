//! # chatstream-service
//!
//! Application layer containing the message and registration services, DTOs,
//! and the dependency container they share.

pub mod dto;
pub mod registration;
pub mod services;

pub use services::{
    spawn_registration_sweeper, MessageService, RegistrationService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};

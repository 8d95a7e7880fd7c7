//! Service context - dependency container for services
//!
//! Holds the repositories, id generator, registration collaborators and the
//! store deadline shared by all services.

use std::sync::Arc;
use std::time::Duration;

use chatstream_common::RegistrationConfig;
use chatstream_core::traits::{ChatMessageRepository, UserRepository};
use chatstream_core::{MessageId, MessageIdGenerator};
use chatstream_db::{MemoryChatMessageRepository, MemoryUserRepository};

use crate::registration::{LogMailer, Mailer, PendingRegistrationStore};

use super::error::{ServiceError, ServiceResult};

/// Default deadline for a single store unit of work
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    message_repo: Arc<dyn ChatMessageRepository>,
    user_repo: Arc<dyn UserRepository>,

    // Identity
    message_ids: Arc<MessageIdGenerator>,

    // Registration
    pending_registrations: PendingRegistrationStore,
    mailer: Arc<dyn Mailer>,
    registration: RegistrationConfig,

    store_timeout: Duration,
}

impl ServiceContext {
    /// Create a new builder
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the chat message repository
    pub fn message_repo(&self) -> &dyn ChatMessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === Identity ===

    /// Generate a new client-facing message id
    pub fn generate_message_id(&self) -> MessageId {
        self.message_ids.generate()
    }

    // === Registration ===

    pub fn pending_registrations(&self) -> &PendingRegistrationStore {
        &self.pending_registrations
    }

    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }

    pub fn registration_config(&self) -> &RegistrationConfig {
        &self.registration
    }

    /// Deadline applied to every store unit of work
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("pending_registrations", &self.pending_registrations.len())
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    message_repo: Option<Arc<dyn ChatMessageRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    message_ids: Option<Arc<MessageIdGenerator>>,
    pending_registrations: Option<PendingRegistrationStore>,
    mailer: Option<Arc<dyn Mailer>>,
    registration: RegistrationConfig,
    store_timeout: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            message_repo: None,
            user_repo: None,
            message_ids: None,
            pending_registrations: None,
            mailer: None,
            registration: RegistrationConfig::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Builder preloaded with the in-process store
    pub fn in_memory() -> Self {
        let users = MemoryUserRepository::new();
        let messages = MemoryChatMessageRepository::new().with_users(users.clone());
        Self::new()
            .message_repo(Arc::new(messages))
            .user_repo(Arc::new(users))
    }

    pub fn message_repo(mut self, repo: Arc<dyn ChatMessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn message_ids(mut self, generator: Arc<MessageIdGenerator>) -> Self {
        self.message_ids = Some(generator);
        self
    }

    pub fn pending_registrations(mut self, store: PendingRegistrationStore) -> Self {
        self.pending_registrations = Some(store);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn registration(mut self, config: RegistrationConfig) -> Self {
        self.registration = config;
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing or the
    /// store timeout is zero
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.store_timeout.is_zero() {
            return Err(ServiceError::validation("store_timeout must be positive"));
        }

        Ok(ServiceContext {
            message_repo: self
                .message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            message_ids: self
                .message_ids
                .unwrap_or_else(|| Arc::new(MessageIdGenerator::new())),
            pending_registrations: self.pending_registrations.unwrap_or_default(),
            mailer: self.mailer.unwrap_or_else(|| Arc::new(LogMailer)),
            registration: self.registration,
            store_timeout: self.store_timeout,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

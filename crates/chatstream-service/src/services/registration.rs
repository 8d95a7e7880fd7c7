//! Registration service
//!
//! Two-step sign-up: `register` parks a hashed registration under a mailed
//! token, `verify` redeems the token and commits the user.

use std::sync::Arc;
use std::time::Duration;

use chatstream_common::hash_password;
use chatstream_core::entities::NewUser;
use chatstream_core::DomainError;
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::dto::{RegisterRequest, RegistrationPendingResponse, UserResponse, VerifyRequest};
use crate::registration::PendingRegistration;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::unit_of_work::with_deadline;

/// Registration service
pub struct RegistrationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RegistrationService<'a> {
    /// Create a new RegistrationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a registration and mail the verification link
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegistrationPendingResponse> {
        request.validate()?;

        let taken = with_deadline(
            self.ctx.store_timeout(),
            "find_by_username",
            self.ctx.user_repo().find_by_username(&request.username),
        )
        .await?;
        if taken.is_some() {
            warn!(kind = DomainError::UsernameTaken.code(), "Registration rejected");
            return Err(DomainError::UsernameTaken.into());
        }

        let password = request.password;
        let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ServiceError::internal(format!("Hashing task failed: {e}")))??;

        let ttl = chrono::Duration::from_std(self.ctx.registration_config().ttl())
            .map_err(|_| ServiceError::internal("Registration TTL out of range"))?;
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| ServiceError::internal("Registration TTL out of range"))?;

        let token = self.ctx.pending_registrations().issue(PendingRegistration {
            username: request.username.clone(),
            email: request.email.clone(),
            hashed_password,
            expires_at,
        });

        let link = format!("{}?token={}", self.ctx.registration_config().verify_url, token);
        if let Err(e) = self
            .ctx
            .mailer()
            .send_verification(&request.email, &request.username, &link)
            .await
        {
            self.ctx.pending_registrations().discard(&token);
            error!(error = %e, kind = "INTERNAL_ERROR", "Verification mail failed");
            return Err(ServiceError::internal(e.to_string()));
        }

        info!(expires_at = %expires_at, "Registration pending verification");

        Ok(RegistrationPendingResponse {
            status: "pending",
            email: request.email,
            expires_at,
        })
    }

    /// Redeem a verification token and create the user
    #[instrument(skip(self, request))]
    pub async fn verify(&self, request: VerifyRequest) -> ServiceResult<UserResponse> {
        request.validate()?;

        let Some(pending) = self
            .ctx
            .pending_registrations()
            .take(&request.token, Utc::now())
        else {
            warn!(kind = DomainError::RegistrationNotFound.code(), "Verification rejected");
            return Err(DomainError::RegistrationNotFound.into());
        };

        let new_user = NewUser::new(
            pending.username.clone(),
            pending.email.clone(),
            pending.hashed_password.clone(),
        );
        let created = with_deadline(
            self.ctx.store_timeout(),
            "create_user",
            self.ctx.user_repo().create(&new_user),
        )
        .await;

        let user = match created {
            Ok(user) => user,
            Err(e) if e.is_retryable() => {
                // nothing was committed, so the token stays redeemable
                self.ctx.pending_registrations().reinstate(&request.token, pending);
                error!(kind = e.error_code(), error = %e, "User creation failed, registration kept");
                return Err(e);
            }
            Err(e) => {
                if e.status_code() >= 500 {
                    error!(kind = e.error_code(), error = %e, "User creation failed");
                } else {
                    warn!(kind = e.error_code(), error = %e, "User creation rejected");
                }
                return Err(e);
            }
        };

        info!(user_id = user.id, username = %user.username, "User registered");

        Ok(UserResponse::from(user))
    }

    /// Drop expired pending registrations
    pub fn sweep_expired(&self) -> usize {
        let removed = self.ctx.pending_registrations().sweep_expired(Utc::now());
        if removed > 0 {
            debug!(removed, "Expired registrations swept");
        }
        removed
    }
}

/// Spawn a task that sweeps expired registrations every `every`
pub fn spawn_registration_sweeper(ctx: Arc<ServiceContext>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        // interval() panics on a zero period
        let mut ticker = tokio::time::interval(every.max(Duration::from_secs(1)));
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            RegistrationService::new(&ctx).sweep_expired();
        }
    })
}

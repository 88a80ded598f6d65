//! Account registration, login and session handling.
//!
//! Sessions are opaque random tokens stored server-side. The REST layer puts
//! the token in a cookie and resolves it back to a user on every request.

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::commands::auth::{LoginCommand, LoginResult, RegisterCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::user::{NewUser, User};
use crate::domain::password::{hash_password, verify_password};
use crate::storage::{DbConnection, SessionRepository, UserRepository};

pub const EMAIL_TAKEN_MESSAGE: &str = "Email address already registered.";
pub const USERNAME_TAKEN_MESSAGE: &str = "Username already taken.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login Unsuccessful. Please check email and password.";
pub const REGISTRATION_INVALID_MESSAGE: &str = "Registration failed. Please check the fields.";

/// Server-side lifetime of a "remember me" session
pub const REMEMBER_SESSION_DAYS: i64 = 30;
/// Server-side lifetime of a session without "remember me"
pub const DEFAULT_SESSION_HOURS: i64 = 12;

#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    session_repository: SessionRepository,
}

impl AuthService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            user_repository: UserRepository::new(db.clone()),
            session_repository: SessionRepository::new(db),
        }
    }

    /// Create an account. Duplicate email is checked before duplicate username.
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<User> {
        let errors = validate_registration(&command);
        if !errors.is_empty() {
            return Err(DomainError::InvalidForm {
                message: REGISTRATION_INVALID_MESSAGE.to_string(),
                errors,
            });
        }

        let username = command.username.trim().to_string();
        let email = command.email.trim().to_string();

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(EMAIL_TAKEN_MESSAGE.to_string()));
        }
        if self.user_repository.find_by_username(&username).await?.is_some() {
            return Err(DomainError::Conflict(USERNAME_TAKEN_MESSAGE.to_string()));
        }

        let password = command.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| DomainError::Storage(e.into()))??;
        let new_user = NewUser {
            username,
            email,
            password_hash,
        };

        match self.user_repository.create_user(&new_user).await {
            Ok(user) => {
                info!("Registered user {} (id {})", user.username, user.id);
                Ok(user)
            }
            Err(e) => Err(map_duplicate_user(e)),
        }
    }

    /// Check credentials and open a new session
    pub async fn login(&self, command: LoginCommand) -> DomainResult<LoginResult> {
        let user = match self.user_repository.find_by_email(command.email.trim()).await? {
            Some(user) => {
                let password = command.password.clone();
                let stored_hash = user.password_hash.clone();
                let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
                    .await
                    .map_err(|e| DomainError::Storage(e.into()))?;
                verified.then_some(user)
            }
            None => None,
        };

        let Some(user) = user else {
            warn!("Failed login attempt");
            return Err(DomainError::Unauthorized(LOGIN_FAILED_MESSAGE.to_string()));
        };

        let purged = self.session_repository.delete_expired().await?;
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }

        let lifetime = if command.remember {
            Duration::days(REMEMBER_SESSION_DAYS)
        } else {
            Duration::hours(DEFAULT_SESSION_HOURS)
        };
        let session_token = Uuid::new_v4().to_string();
        self.session_repository
            .create_session(&session_token, user.id, Utc::now().naive_utc() + lifetime)
            .await?;
        info!("User {} logged in", user.id);

        Ok(LoginResult {
            user,
            session_token,
            remember: command.remember,
        })
    }

    /// Look up the user behind an unexpired session token
    pub async fn resolve_session(&self, token: &str) -> DomainResult<Option<User>> {
        Ok(self.session_repository.find_user(token).await?)
    }

    /// End a session. Returns false if the token was already gone.
    pub async fn logout(&self, token: &str) -> DomainResult<bool> {
        Ok(self.session_repository.delete_session(token).await?)
    }

    /// Remove a user and everything the user owns
    pub async fn delete_account(&self, user_id: i64) -> DomainResult<()> {
        if self.user_repository.delete_user(user_id).await? {
            info!("Deleted account {}", user_id);
            Ok(())
        } else {
            Err(DomainError::NotFound("Account not found".to_string()))
        }
    }
}

fn validate_registration(command: &RegisterCommand) -> Vec<String> {
    let mut errors = Vec::new();

    let username_len = command.username.trim().chars().count();
    if !(2..=80).contains(&username_len) {
        errors.push("Username must be between 2 and 80 characters.".to_string());
    }

    let email = command.email.trim();
    if email.is_empty() {
        errors.push("Email is required.".to_string());
    } else if email.chars().count() > 120 || !is_valid_email(email) {
        errors.push("Invalid email address.".to_string());
    }

    let password_len = command.password.chars().count();
    if !(8..=60).contains(&password_len) {
        errors.push("Password must be between 8 and 60 characters.".to_string());
    }
    if command.confirm_password != command.password {
        errors.push("Passwords must match.".to_string());
    }

    errors
}

/// `local@domain.tld` with no whitespace
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Two registrations can pass the lookups at the same time; the unique
/// constraints on `users` decide which one wins.
fn map_duplicate_user(error: anyhow::Error) -> DomainError {
    let unique_violation = error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .filter(|db_err| db_err.is_unique_violation())
        .map(|db_err| db_err.message().to_string());

    match unique_violation {
        Some(message) if message.contains("users.email") => {
            DomainError::Conflict(EMAIL_TAKEN_MESSAGE.to_string())
        }
        Some(_) => DomainError::Conflict(USERNAME_TAKEN_MESSAGE.to_string()),
        None => DomainError::Storage(error),
    }
}

//! Player identity from the host context.
//!
//! The host may not have identity ready when the game starts. The resolver
//! retries a bounded number of times with exponential backoff and then gives
//! up, leaving the game playable under the anonymous fallback.

use crate::constants::{
    IDENTITY_BACKOFF_MULTIPLIER, IDENTITY_INITIAL_DELAY_MS, IDENTITY_MAX_ATTEMPTS,
    IDENTITY_MAX_DELAY_MS,
};
use crate::error::IdentityError;
use std::time::{Duration, Instant};

pub const ANONYMOUS_NAME: &str = "Anonymous";
pub const UNKNOWN_HANDLE: &str = "@unknown";

/// Environment variable overriding the displayed name.
pub const DISPLAY_NAME_ENV: &str = "FISHY_FORTUNE_DISPLAY_NAME";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub display_name: Option<String>,
    pub username: Option<String>,
}

impl PlayerIdentity {
    pub fn new(display_name: Option<&str>, username: Option<&str>) -> Self {
        Self {
            display_name: display_name.map(str::to_string),
            username: username.map(str::to_string),
        }
    }

    /// Display name, then username, then "Anonymous".
    pub fn shown_name(&self) -> &str {
        non_empty(&self.display_name)
            .or_else(|| non_empty(&self.username))
            .unwrap_or(ANONYMOUS_NAME)
    }

    /// `@username`, or "@unknown".
    pub fn handle(&self) -> String {
        match non_empty(&self.username) {
            Some(username) => format!("@{}", username),
            None => UNKNOWN_HANDLE.to_string(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Source of the host identity context.
pub trait IdentityProvider {
    /// `Ok(None)` while the context is not ready yet.
    fn fetch(&mut self) -> Result<Option<PlayerIdentity>, IdentityError>;
}

/// Login name of the OS user, if the environment has one.
pub fn os_username() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
}

/// Reads the identity of the OS user running the terminal.
#[derive(Debug, Clone, Default)]
pub struct EnvIdentityProvider;

impl IdentityProvider for EnvIdentityProvider {
    fn fetch(&mut self) -> Result<Option<PlayerIdentity>, IdentityError> {
        let username = os_username();
        let display_name = std::env::var(DISPLAY_NAME_ENV).ok();
        if username.is_none() && display_name.is_none() {
            return Ok(None);
        }
        Ok(Some(PlayerIdentity {
            display_name,
            username,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: u32,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: IDENTITY_MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(IDENTITY_INITIAL_DELAY_MS),
            multiplier: IDENTITY_BACKOFF_MULTIPLIER,
            max_delay: Duration::from_millis(IDENTITY_MAX_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Wait after the `failed_attempts`-th failure (1-based), capped at `max_delay`.
    pub fn delay_after(&self, failed_attempts: u32) -> Duration {
        let exponent = failed_attempts.saturating_sub(1);
        let factor = self.multiplier.saturating_pow(exponent);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityState {
    Pending { attempts: u32 },
    Ready(PlayerIdentity),
    Unavailable(IdentityError),
}

/// Polls an [`IdentityProvider`] until it answers or the retry budget runs out.
pub struct IdentityResolver<P: IdentityProvider> {
    provider: P,
    policy: RetryPolicy,
    state: IdentityState,
    next_attempt: Option<Instant>,
}

impl<P: IdentityProvider> IdentityResolver<P> {
    pub fn new(provider: P, policy: RetryPolicy) -> Self {
        Self {
            provider,
            policy,
            state: IdentityState::Pending { attempts: 0 },
            next_attempt: None,
        }
    }

    pub fn state(&self) -> &IdentityState {
        &self.state
    }

    pub fn identity(&self) -> Option<&PlayerIdentity> {
        match &self.state {
            IdentityState::Ready(identity) => Some(identity),
            _ => None,
        }
    }

    /// Name to show right now, anonymous until resolved.
    pub fn shown_name(&self) -> &str {
        self.identity()
            .map(PlayerIdentity::shown_name)
            .unwrap_or(ANONYMOUS_NAME)
    }

    /// Handle to show right now, "@unknown" until resolved.
    pub fn handle(&self) -> String {
        self.identity()
            .map(PlayerIdentity::handle)
            .unwrap_or_else(|| UNKNOWN_HANDLE.to_string())
    }

    /// Attempts a fetch when one is due. Terminal states are never left by polling.
    pub fn poll(&mut self, now: Instant) -> &IdentityState {
        let attempts = match self.state {
            IdentityState::Pending { attempts } => attempts,
            _ => return &self.state,
        };
        if matches!(self.next_attempt, Some(due) if now < due) {
            return &self.state;
        }

        let attempts = attempts + 1;
        let failure = match self.provider.fetch() {
            Ok(Some(identity)) => {
                log::info!("Identity resolved: {}", identity.shown_name());
                self.state = IdentityState::Ready(identity);
                self.next_attempt = None;
                return &self.state;
            }
            Ok(None) => IdentityError::Unavailable("context not ready".to_string()),
            Err(e) => e,
        };

        if attempts >= self.policy.max_attempts {
            log::warn!("Identity unavailable after {} attempts: {}", attempts, failure);
            self.state = IdentityState::Unavailable(failure);
            self.next_attempt = None;
        } else {
            let delay = self.policy.delay_after(attempts);
            log::debug!(
                "Identity attempt {} failed ({}), retrying in {:?}",
                attempts,
                failure,
                delay
            );
            self.state = IdentityState::Pending { attempts };
            self.next_attempt = Some(now + delay);
        }
        &self.state
    }

    /// Pushed context update from the host. Accepted in any state.
    pub fn notify(&mut self, identity: PlayerIdentity) {
        self.state = IdentityState::Ready(identity);
        self.next_attempt = None;
    }
}

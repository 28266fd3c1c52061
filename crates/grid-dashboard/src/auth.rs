//! Authentication port.
//!
//! The dashboard does not implement accounts itself. It talks to a hosted
//! collaborator through [`AuthProvider`] and turns the collaborator's raw
//! error messages into one of a few [`AuthFailure`] categories, each with a
//! message fit to show the user. [`InMemoryAuth`] implements the port for
//! tests and offline use.

use crate::schedule::Clock;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;

/// Minimum password length accepted by [`InMemoryAuth`].
pub const MIN_PASSWORD_LEN: usize = 6;

const SESSION_TTL_HOURS: i64 = 1;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The signed-in account.
    pub user: User,
    /// Opaque access token.
    pub access_token: String,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Details collected by the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    /// Login email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Change of authentication state pushed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A session started.
    SignedIn(User),
    /// The session ended.
    SignedOut,
}

/// Why an auth call failed, in terms the user can act on.
///
/// None of these are fatal; the caller shows the message and lets the user
/// try again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// Wrong email or password.
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,

    /// The account exists but its email address is unconfirmed.
    #[error("Please confirm your email address before signing in.")]
    EmailNotConfirmed,

    /// Sign-up with an email that already has an account.
    #[error("An account with this email already exists. Try signing in instead.")]
    AlreadyRegistered,

    /// The password does not meet the collaborator's rules.
    #[error("Password is too weak. Use at least 6 characters.")]
    WeakPassword,

    /// Anything else. Holds the collaborator's raw message for logs; it is
    /// never shown to the user.
    #[error("Something went wrong. Please try again.")]
    Other(String),
}

impl AuthFailure {
    /// Maps a raw collaborator error message to a category.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_dashboard::auth::AuthFailure;
    ///
    /// assert_eq!(AuthFailure::classify("Invalid login credentials"), AuthFailure::InvalidCredentials);
    /// assert_eq!(AuthFailure::classify("Email not confirmed"), AuthFailure::EmailNotConfirmed);
    /// ```
    pub fn classify(message: &str) -> Self {
        let m = message.to_lowercase();
        if m.contains("invalid login") || m.contains("invalid credentials") || m.contains("invalid email or password") {
            AuthFailure::InvalidCredentials
        } else if m.contains("not confirmed") || m.contains("confirm your email") {
            AuthFailure::EmailNotConfirmed
        } else if m.contains("already registered") || m.contains("already exists") {
            AuthFailure::AlreadyRegistered
        } else if m.contains("password") && (m.contains("at least") || m.contains("weak") || m.contains("too short")) {
            AuthFailure::WeakPassword
        } else {
            tracing::warn!(message, "unrecognized auth failure");
            AuthFailure::Other(message.to_string())
        }
    }

    /// Message to show the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// The hosted authentication collaborator.
pub trait AuthProvider: Send + Sync {
    /// Creates an account. Depending on the provider, the email may need
    /// confirming before the first sign-in.
    fn sign_up(&self, request: SignUpRequest) -> Result<User, AuthFailure>;

    /// Starts a session.
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthFailure>;

    /// Ends the current session, if any.
    fn sign_out(&self) -> Result<(), AuthFailure>;

    /// The signed-in user.
    fn current_user(&self) -> Option<User>;

    /// The current session, if it has not expired.
    fn current_session(&self) -> Option<Session>;

    /// Receives every subsequent [`AuthEvent`].
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

struct Account {
    user: User,
    password: String,
    confirmed: bool,
}

/// An [`AuthProvider`] keeping accounts in memory.
///
/// Failures are produced as raw messages and classified the same way a
/// hosted provider's messages are.
pub struct InMemoryAuth {
    accounts: Mutex<HashMap<String, Account>>,
    session: Mutex<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
    clock: Arc<dyn Clock>,
    require_confirmation: bool,
}

impl InMemoryAuth {
    /// Creates a provider whose accounts can sign in right away.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (events, _rx) = broadcast::channel(16);
        Self {
            accounts: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
            events,
            clock,
            require_confirmation: false,
        }
    }

    /// Requires [`confirm_email`](Self::confirm_email) before sign-in.
    pub fn requiring_confirmation(mut self) -> Self {
        self.require_confirmation = true;
        self
    }

    /// Marks the account's email as confirmed. Returns `false` if there is
    /// no such account.
    pub fn confirm_email(&self, email: &str) -> bool {
        match self.lock_accounts().get_mut(&normalize(email)) {
            Some(account) => {
                account.confirmed = true;
                true
            }
            None => false,
        }
    }

    fn lock_accounts(&self) -> MutexGuard<'_, HashMap<String, Account>> {
        self.accounts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, event: AuthEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthProvider for InMemoryAuth {
    fn sign_up(&self, request: SignUpRequest) -> Result<User, AuthFailure> {
        let email = normalize(&request.email);
        if !email.contains('@') {
            return Err(AuthFailure::classify("Unable to validate email address: invalid format"));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthFailure::classify(&format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let mut accounts = self.lock_accounts();
        if accounts.contains_key(&email) {
            return Err(AuthFailure::classify("User already registered"));
        }
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.clone(),
            first_name: request.first_name,
            last_name: request.last_name,
        };
        accounts.insert(
            email,
            Account {
                user: user.clone(),
                password: request.password,
                confirmed: !self.require_confirmation,
            },
        );
        tracing::info!(user = %user.id, "account created");
        Ok(user)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthFailure> {
        let user = {
            let accounts = self.lock_accounts();
            let account = accounts
                .get(&normalize(email))
                .filter(|a| a.password == password)
                .ok_or_else(|| AuthFailure::classify("Invalid login credentials"))?;
            if !account.confirmed {
                return Err(AuthFailure::classify("Email not confirmed"));
            }
            account.user.clone()
        };
        let session = Session {
            user: user.clone(),
            access_token: uuid::Uuid::new_v4().simple().to_string(),
            expires_at: self.clock.now() + Duration::hours(SESSION_TTL_HOURS),
        };
        *self.lock_session() = Some(session.clone());
        tracing::info!(user = %user.id, "signed in");
        self.emit(AuthEvent::SignedIn(user));
        Ok(session)
    }

    fn sign_out(&self) -> Result<(), AuthFailure> {
        if self.lock_session().take().is_some() {
            tracing::info!("signed out");
            self.emit(AuthEvent::SignedOut);
        }
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.current_session().map(|s| s.user)
    }

    fn current_session(&self) -> Option<Session> {
        let now = self.clock.now();
        self.lock_session()
            .as_ref()
            .filter(|s| s.expires_at > now)
            .cloned()
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualClock;
    use tokio::sync::broadcast::error::TryRecvError;

    fn request(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    fn provider() -> (Arc<ManualClock>, InMemoryAuth) {
        let clock = Arc::new(ManualClock::default());
        (clock.clone(), InMemoryAuth::new(clock))
    }

    #[test]
    fn test_classify_categories() {
        let cases = [
            ("Invalid login credentials", AuthFailure::InvalidCredentials),
            ("INVALID CREDENTIALS", AuthFailure::InvalidCredentials),
            ("Email not confirmed", AuthFailure::EmailNotConfirmed),
            ("User already registered", AuthFailure::AlreadyRegistered),
            ("A user with this email address already exists", AuthFailure::AlreadyRegistered),
            ("Password should be at least 6 characters", AuthFailure::WeakPassword),
            ("Password is too weak", AuthFailure::WeakPassword),
        ];
        for (message, expected) in cases {
            assert_eq!(AuthFailure::classify(message), expected, "{message}");
        }
    }

    #[test]
    fn test_classify_unknown_shows_generic_message() {
        let failure = AuthFailure::classify("rate limit exceeded");
        assert_eq!(failure, AuthFailure::Other("rate limit exceeded".to_string()));
        assert_eq!(failure.user_message(), "Something went wrong. Please try again.");
        assert!(!failure.user_message().contains("rate limit"));
    }

    #[test]
    fn test_sign_up_then_sign_in() {
        let (_, auth) = provider();
        let user = auth.sign_up(request("Ada@Example.com", "hunter22")).expect("sign up");
        assert_eq!(user.email, "ada@example.com");
        assert!(auth.current_user().is_none());

        let session = auth.sign_in("ada@example.com", "hunter22").expect("sign in");
        assert_eq!(session.user, user);
        assert_eq!(auth.current_user(), Some(user));
    }

    #[test]
    fn test_wrong_password_is_invalid_credentials() {
        let (_, auth) = provider();
        auth.sign_up(request("a@b.c", "hunter22")).expect("sign up");
        assert_eq!(auth.sign_in("a@b.c", "nope"), Err(AuthFailure::InvalidCredentials));
        assert_eq!(auth.sign_in("x@b.c", "hunter22"), Err(AuthFailure::InvalidCredentials));
    }

    #[test]
    fn test_duplicate_and_weak_sign_up() {
        let (_, auth) = provider();
        auth.sign_up(request("a@b.c", "hunter22")).expect("sign up");
        assert_eq!(
            auth.sign_up(request("A@B.C", "hunter22")),
            Err(AuthFailure::AlreadyRegistered)
        );
        assert_eq!(auth.sign_up(request("d@e.f", "abc")), Err(AuthFailure::WeakPassword));
        assert!(matches!(
            auth.sign_up(request("not-an-email", "hunter22")),
            Err(AuthFailure::Other(_))
        ));
    }

    #[test]
    fn test_unconfirmed_email() {
        let clock = Arc::new(ManualClock::default());
        let auth = InMemoryAuth::new(clock).requiring_confirmation();
        auth.sign_up(request("a@b.c", "hunter22")).expect("sign up");
        assert_eq!(auth.sign_in("a@b.c", "hunter22"), Err(AuthFailure::EmailNotConfirmed));
        assert!(auth.confirm_email("a@b.c"));
        assert!(!auth.confirm_email("nobody@b.c"));
        assert!(auth.sign_in("a@b.c", "hunter22").is_ok());
    }

    #[test]
    fn test_session_expires() {
        let (clock, auth) = provider();
        auth.sign_up(request("a@b.c", "hunter22")).expect("sign up");
        auth.sign_in("a@b.c", "hunter22").expect("sign in");
        clock.advance(std::time::Duration::from_secs(59 * 60));
        assert!(auth.current_session().is_some());
        clock.advance(std::time::Duration::from_secs(60));
        assert!(auth.current_session().is_none());
    }

    #[test]
    fn test_subscribers_receive_events() {
        let (_, auth) = provider();
        let mut rx = auth.subscribe();
        let user = auth.sign_up(request("a@b.c", "hunter22")).expect("sign up");
        auth.sign_in("a@b.c", "hunter22").expect("sign in");
        auth.sign_out().expect("sign out");
        auth.sign_out().expect("second sign out is a no-op");

        assert_eq!(rx.try_recv(), Ok(AuthEvent::SignedIn(user)));
        assert_eq!(rx.try_recv(), Ok(AuthEvent::SignedOut));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert!(auth.current_session().is_none());
    }
}

//! Auth Forms
//!
//! Sign-in and sign-up: per-field validation, submission through an
//! [`AuthClient`], and the toast each outcome produces. Validation errors
//! block submission entirely, so an invalid form never reaches the network.
//!
//! Only sign-in touches the [`Session`]. Sign-up leaves the user signed out
//! and sends them to the sign-in page.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::client::{AuthClient, ClientError, Credentials, Registration};
use crate::model::User;
use crate::session::{Session, SessionStore};
use crate::shell::Route;

/// Minimum password length accepted by both forms
pub const MIN_PASSWORD_LEN: usize = 6;

/// How long a toast stays on screen
pub const NOTIFICATION_DURATION_MS: u32 = 5000;

// ============================================
// Notifications
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

/// Transient message shown after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
    pub duration_ms: u32,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Error, title, description)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Level::Info, title, description)
    }

    fn new(level: Level, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
            duration_ms: NOTIFICATION_DURATION_MS,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

// ============================================
// Validation
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

/// First failing rule per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, *msg))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field.label(), msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.insert(Field::Email, "Email é obrigatório");
    } else if !email_pattern().is_some_and(|re| re.is_match(email)) {
        errors.insert(Field::Email, "Email inválido");
    }
}

fn check_password(password: &str, errors: &mut FieldErrors) {
    if password.is_empty() {
        errors.insert(Field::Password, "Senha é obrigatória");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            Field::Password,
            "Senha muito curta - deve ter no mínimo 6 caracteres",
        );
    }
}

/// Sign-in form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);

        errors.into_result(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Sign-up form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.insert(Field::Name, "Nome é obrigatório");
        }
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        if self.confirm_password.is_empty() {
            errors.insert(Field::ConfirmPassword, "Confirmação de senha é obrigatória");
        } else if self.confirm_password != self.password {
            errors.insert(Field::ConfirmPassword, "Senhas devem coincidir");
        }

        errors.into_result(Registration {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

// ============================================
// Submission
// ============================================

/// What a front-end does after a submit
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Validation failed; nothing was sent
    Invalid(FieldErrors),
    /// The request completed, successfully or not
    Done {
        notification: Notification,
        navigate: Option<Route>,
    },
}

impl Submission {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Submission::Done { notification, .. } => Some(notification),
            Submission::Invalid(_) => None,
        }
    }

    pub fn navigate(&self) -> Option<Route> {
        match self {
            Submission::Done { navigate, .. } => *navigate,
            Submission::Invalid(_) => None,
        }
    }
}

fn failure(title: &str, fallback: &str, err: &ClientError) -> Submission {
    let description = err.server_message().unwrap_or(fallback);
    Submission::Done {
        notification: Notification::error(title, description),
        navigate: None,
    }
}

/// Validate and sign in, without touching the session.
///
/// `Err` carries the submission to show when the form is invalid or the
/// request fails.
pub async fn authenticate<C>(form: &SignInForm, client: &C) -> Result<User, Submission>
where
    C: AuthClient + ?Sized,
{
    let credentials = form.validate().map_err(Submission::Invalid)?;

    client.sign_in(&credentials).await.map_err(|e| {
        tracing::warn!(email = %credentials.email, error = %e, "Sign-in failed");
        failure("Erro no login", "Ocorreu um erro ao fazer login.", &e)
    })
}

/// Persist an authenticated user and move to the dashboard
pub fn complete_sign_in<S: SessionStore>(session: &mut Session<S>, user: User) -> Submission {
    if let Err(e) = session.login(user) {
        tracing::error!(error = %e, "Failed to persist session");
        return Submission::Done {
            notification: Notification::error("Erro no login", "Ocorreu um erro ao fazer login."),
            navigate: None,
        };
    }

    Submission::Done {
        notification: Notification::success("Login bem-sucedido", "Você entrou com sucesso."),
        navigate: Some(Route::Dashboard),
    }
}

/// Validate, sign in, and persist the returned user
pub async fn submit_sign_in<C, S>(
    form: &SignInForm,
    client: &C,
    session: &mut Session<S>,
) -> Submission
where
    C: AuthClient + ?Sized,
    S: SessionStore,
{
    match authenticate(form, client).await {
        Ok(user) => complete_sign_in(session, user),
        Err(submission) => submission,
    }
}

/// Validate and register. The new account is not signed in.
pub async fn submit_sign_up<C>(form: &SignUpForm, client: &C) -> Submission
where
    C: AuthClient + ?Sized,
{
    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(errors) => return Submission::Invalid(errors),
    };

    match client.sign_up(&registration).await {
        Ok(()) => {
            tracing::info!(email = %registration.email, "Registered");
            Submission::Done {
                notification: Notification::success(
                    "Cadastro bem-sucedido",
                    "Você se cadastrou com sucesso.",
                ),
                navigate: Some(Route::SignIn),
            }
        }
        Err(e) => {
            tracing::warn!(email = %registration.email, error = %e, "Sign-up failed");
            failure("Erro no cadastro", "Ocorreu um erro durante o cadastro.", &e)
        }
    }
}

/// Clear the session and produce the logout toast
pub fn sign_out<S: SessionStore>(session: &mut Session<S>) -> Submission {
    match session.logout() {
        Ok(route) => Submission::Done {
            notification: Notification::success("Logout bem-sucedido", "Você saiu com sucesso."),
            navigate: Some(route),
        },
        Err(e) => {
            tracing::error!(error = %e, "Failed to clear session");
            Submission::Done {
                notification: Notification::error("Erro no logout", e.to_string()),
                navigate: Some(Route::SignIn),
            }
        }
    }
}

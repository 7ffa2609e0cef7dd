//! Authentication primitives: signup details, login credentials and tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserName, UserValidationError, normalise_profile_field};

/// Domain error returned when signup or login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Name exceeded the maximum length.
    NameTooLong { max: usize },
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email did not look like `local@domain`.
    InvalidEmail,
    /// Password was missing or blank.
    EmptyPassword,
    /// Optional profile field exceeded the maximum length.
    ProfileFieldTooLong { field: &'static str, max: usize },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::ProfileFieldTooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyName => Self::EmptyName,
            UserValidationError::NameTooLong { max } => Self::NameTooLong { max },
            UserValidationError::EmptyEmail => Self::EmptyEmail,
            UserValidationError::InvalidEmail
            | UserValidationError::EmptyId
            | UserValidationError::InvalidId => Self::InvalidEmail,
            UserValidationError::ProfileFieldTooLong { field, max } => {
                Self::ProfileFieldTooLong { field, max }
            }
        }
    }
}

fn validated_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.trim().is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Raw signup fields borrowed from an inbound payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignupInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role_title: Option<&'a str>,
    pub bio: Option<&'a str>,
}

/// Validated account creation request.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `email` is normalised (see [`EmailAddress`]).
/// - `password` is non-blank but otherwise kept exactly as supplied.
/// - Blank optional profile fields are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
    role_title: Option<String>,
    bio: Option<String>,
}

impl SignupDetails {
    /// Validate raw signup fields.
    pub fn try_from_parts(input: SignupInput<'_>) -> Result<Self, CredentialsValidationError> {
        let name = UserName::new(input.name)?;
        let email = EmailAddress::new(input.email)?;
        let password = validated_password(input.password)?;
        let role_title = normalise_profile_field("roleTitle", input.role_title)?;
        let bio = normalise_profile_field("bio", input.bio)?;
        Ok(Self {
            name,
            email,
            password,
            role_title,
            bio,
        })
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role_title(&self) -> Option<&str> {
        self.role_title.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }
}

/// Login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed, lowercased and non-blank. Its shape is not checked:
///   a malformed address is simply an unknown account.
/// - `password` is required to be non-blank but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use taskflow::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        let password = validated_password(password)?;
        Ok(Self { email, password })
    }

    /// Normalised email as typed by the caller.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The account email, when the input is shaped like one.
    pub fn email_address(&self) -> Option<EmailAddress> {
        EmailAddress::new(&self.email).ok()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signed bearer token presented by clients on protected requests.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

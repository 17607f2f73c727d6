//! Session token handling.
//!
//! The token is an opaque bearer string issued by the backend. Its payload is
//! decoded only to show who is signed in; nothing here verifies the signature,
//! so the decoded claims must never drive authorization.

use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;

use crate::config;
use crate::context::SdkContext;
use crate::error::{NutriGuardError, Result};

pub struct Session<'a> {
    ctx: &'a SdkContext,
}

impl<'a> Session<'a> {
    pub fn new(ctx: &'a SdkContext) -> Self {
        Self { ctx }
    }

    pub fn token(&self) -> Option<String> {
        self.ctx.token()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store a token issued by the backend's login or register endpoint.
    pub fn set_token(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(NutriGuardError::InvalidArgument("empty session token".into()));
        }
        self.ctx.store.set(config::KEY_TOKEN, token)?;
        tracing::info!("session token stored");
        Ok(())
    }

    /// Forget the token and the running totals that belong to it.
    pub fn logout(&self) -> Result<()> {
        self.ctx.store.remove(config::KEY_TOKEN)?;
        self.ctx.store.remove(config::KEY_TOTALS)?;
        tracing::info!("logged out; local totals cleared");
        Ok(())
    }

    /// Name to greet the user with, taken from the token payload.
    pub fn display_name(&self) -> Option<String> {
        display_hint(&self.token()?)
    }
}

#[derive(Debug, Default, Deserialize)]
struct DisplayClaims {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Extract a display hint (username, else name, else email) from a JWT-shaped
/// token without verifying it. Any decode failure yields `None`.
pub fn display_hint(token: &str) -> Option<String> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = match jsonwebtoken::decode::<DisplayClaims>(
        token,
        &DecodingKey::from_secret(&[]),
        &validation,
    ) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!(error = %e, "token payload not decodable; no display hint");
            return None;
        }
    };

    let DisplayClaims {
        username,
        name,
        email,
    } = data.claims;
    [username, name, email]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

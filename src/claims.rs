//! Decode-only access token handling.
//!
//! Tokens are issued server-side; the client only unpacks the payload to
//! read its expiry and identity claims. The signature is deliberately NOT
//! verified here (trust-the-issuer), so decoding is a pure function of the
//! token string.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Claims unpacked from an access token payload.
///
/// `exp` is mandatory (seconds since epoch); everything else the issuer
/// put in the payload is kept opaquely in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id), when the issuer provides one.
    pub sub: Option<String>,
    /// Expiry, seconds since epoch.
    pub exp: i64,
    /// Issued-at, seconds since epoch.
    pub iat: Option<i64>,
    /// Remaining payload claims, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Expiry in milliseconds, for comparison against wall-clock millis.
    pub fn exp_millis(&self) -> i64 {
        self.exp.saturating_mul(1000)
    }
}

/// Decodes the payload segment of a compact token without verifying the
/// signature.
///
/// Fails with [`DecodeError`] when the string is not a well-formed token,
/// the payload is not valid JSON, or the `exp` claim is missing or
/// non-numeric.
pub fn decode_token(token: &str) -> Result<Claims, DecodeError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims::<&str>(&[]);

    let token_data = decode::<Map<String, Value>>(
        token,
        &DecodingKey::from_secret(b"ignored"),
        &validation,
    )?;

    claims_from_payload(token_data.claims)
}

fn claims_from_payload(mut payload: Map<String, Value>) -> Result<Claims, DecodeError> {
    let exp = match payload.remove("exp") {
        Some(value) => value.as_i64().ok_or(DecodeError::InvalidClaim("exp"))?,
        None => return Err(DecodeError::MissingClaim("exp")),
    };

    let sub = match payload.remove("sub") {
        Some(Value::String(sub)) => Some(sub),
        Some(_) => return Err(DecodeError::InvalidClaim("sub")),
        None => None,
    };

    let iat = match payload.remove("iat") {
        Some(value) => Some(value.as_i64().ok_or(DecodeError::InvalidClaim("iat"))?),
        None => None,
    };

    Ok(Claims { sub, exp, iat, extra: payload })
}

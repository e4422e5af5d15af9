use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stored credential: the issued access token plus whatever profile
/// fields the login response carried alongside it.
///
/// Serialized as the single `userInfo` storage entry, camelCase to match
/// the wire format the issuer hands out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "accessToken", default)]
    pub access_token: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), profile: Map::new() }
    }

    pub fn with_profile(access_token: impl Into<String>, profile: Map<String, Value>) -> Self {
        Self { access_token: access_token.into(), profile }
    }
}

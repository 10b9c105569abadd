//! API token formatting, parsing, and verifier hashing.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserId;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "tl";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

/// Length of a SHA-256 verifier in bytes.
const VERIFIER_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

/// Lowercase hex of the secret, as it appears in the token.
impl fmt::LowerHex for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bytes
            .iter()
            .try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

/// Render a token as `tl_<version>_<uuid>.<secret hex>`.
#[must_use]
pub fn format_api_token(
    token_uuid: Uuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{secret:x}",
        version.segment(),
        token_uuid.simple(),
    )
}

/// Split a presented bearer token into its parts.
///
/// # Errors
///
/// Returns an error when the prefix, version, uuid or secret segment is malformed.
pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (prefix_and_id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let version = ApiTokenVersion::from_str(version_segment)?;

    let token_uuid =
        Uuid::try_parse(token_uuid_segment).map_err(|_error| ApiTokenError::InvalidFormat)?;

    let secret = decode_hex_32(secret_hex).ok_or(ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid,
        version,
        secret: ApiTokenSecret::from_bytes(secret),
    })
}

/// SHA-256 verifier stored for a token, hex encoded.
///
/// Input: `{token_uuid_hex}:{version_i16_decimal}:{user_id}:{secret_hex}`, which binds
/// the secret to the token row and the user it was issued to.
#[must_use]
pub fn token_verifier(
    token_uuid: &Uuid,
    version: ApiTokenVersion,
    user: UserId,
    secret: &ApiTokenSecret,
) -> String {
    format!("{:x}", verifier_digest(token_uuid, version, user, secret))
}

/// Check a presented secret against the stored hex verifier in constant time.
/// A stored value that is not 64 hex characters never matches.
#[must_use]
pub fn verifier_matches(
    stored: &str,
    token_uuid: &Uuid,
    version: ApiTokenVersion,
    user: UserId,
    secret: &ApiTokenSecret,
) -> bool {
    let Some(expected) = decode_hex_32(stored) else {
        return false;
    };

    let presented = verifier_digest(token_uuid, version, user, secret);

    expected.as_slice().ct_eq(presented.as_slice()).into()
}

fn verifier_digest(
    token_uuid: &Uuid,
    version: ApiTokenVersion,
    user: UserId,
    secret: &ApiTokenSecret,
) -> sha2::digest::Output<Sha256> {
    let input = format!(
        "{}:{}:{}:{secret:x}",
        token_uuid.simple(),
        version.as_i16(),
        user,
    );

    Sha256::digest(input.as_bytes())
}

fn decode_hex_32(hex: &str) -> Option<[u8; VERIFIER_BYTES]> {
    if hex.len() != VERIFIER_BYTES * 2 {
        return None;
    }

    let mut bytes = [0_u8; VERIFIER_BYTES];

    for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
    }

    Some(bytes)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_round_trip() {
        let token_uuid = Uuid::nil();
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(token_uuid, ApiTokenVersion::V1, &secret);
        let parsed = parse_api_token(&token).expect("token should parse");

        assert!(token.starts_with("tl_v1_"));
        assert_eq!(parsed.token_uuid, token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        assert!(parse_api_token("nope_v1_00000000000000000000000000000000.aa").is_err());
    }

    #[test]
    fn parse_rejects_short_secret() {
        let result = parse_api_token("tl_v1_00000000000000000000000000000000.abcd");

        assert!(
            matches!(result, Err(ApiTokenError::InvalidSecretEncoding)),
            "expected InvalidSecretEncoding, got {result:?}"
        );
    }

    #[test]
    fn secret_renders_as_lowercase_hex() {
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);

        assert_eq!(format!("{secret:x}"), "ab".repeat(API_TOKEN_SECRET_BYTES));
    }

    #[test]
    fn verifier_is_deterministic_and_user_bound() {
        let token_uuid = Uuid::nil();
        let secret = ApiTokenSecret::from_bytes([0xCD; API_TOKEN_SECRET_BYTES]);
        let user = UserId::from_i64(1);

        let first = token_verifier(&token_uuid, ApiTokenVersion::V1, user, &secret);
        let again = token_verifier(&token_uuid, ApiTokenVersion::V1, user, &secret);

        assert_eq!(first, again, "verifier must be deterministic");
        assert_eq!(first.len(), 64, "verifier is a hex SHA-256 digest");

        assert!(verifier_matches(
            &first,
            &token_uuid,
            ApiTokenVersion::V1,
            user,
            &secret
        ));
        assert!(!verifier_matches(
            &first,
            &token_uuid,
            ApiTokenVersion::V1,
            UserId::from_i64(2),
            &secret
        ));
    }

    #[test]
    fn verifier_rejects_other_secrets_and_malformed_storage() {
        let token_uuid = Uuid::nil();
        let secret = ApiTokenSecret::from_bytes([0x11; API_TOKEN_SECRET_BYTES]);
        let other = ApiTokenSecret::from_bytes([0x12; API_TOKEN_SECRET_BYTES]);
        let user = UserId::from_i64(1);

        let stored = token_verifier(&token_uuid, ApiTokenVersion::V1, user, &secret);

        assert!(!verifier_matches(
            &stored,
            &token_uuid,
            ApiTokenVersion::V1,
            user,
            &other
        ));
        assert!(!verifier_matches(
            &stored[..62],
            &token_uuid,
            ApiTokenVersion::V1,
            user,
            &secret
        ));
        assert!(!verifier_matches(
            &"zz".repeat(32),
            &token_uuid,
            ApiTokenVersion::V1,
            user,
            &secret
        ));
    }
}

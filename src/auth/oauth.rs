// src/auth/oauth.rs
//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! User-context endpoints need every request signed over its method, URL
//! and parameters. Signing is a pure function of its inputs plus a nonce and
//! a timestamp; both come from a [`SigningEntropy`] so tests can pin them.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::RngCore;
use reqwest::Method;
use url::{Position, Url};

use crate::types::{Credentials, ValidationError};

/// Everything except the RFC 3986 unreserved set: ALPHA / DIGIT / "-" / "." / "_" / "~"
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

type HmacSha1 = Hmac<sha1::Sha1>;

/// Source of the per-request nonce and timestamp.
pub trait SigningEntropy: Send + Sync {
    /// A value unique to this request.
    fn nonce(&self) -> String;
    /// Current Unix time in seconds.
    fn timestamp(&self) -> u64;
}

/// Random 16-byte hex nonce and the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropy;

impl SigningEntropy for SystemEntropy {
    fn nonce(&self) -> String {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn timestamp(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A pinned nonce and timestamp, for reproducible signatures.
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    pub nonce: String,
    pub timestamp: u64,
}

impl SigningEntropy for FixedEntropy {
    fn nonce(&self) -> String {
        self.nonce.clone()
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Percent-encodes a string with the RFC 3986 unreserved set.
///
/// Space becomes `%20`, never `+`.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// Builds the `Authorization` header value for a request.
pub fn sign(
    method: &Method,
    url: &str,
    credentials: &Credentials,
    extra_params: &[(String, String)],
) -> Result<String, ValidationError> {
    sign_with(method, url, credentials, extra_params, &SystemEntropy)
}

/// Like [`sign`], with an explicit nonce and clock.
pub fn sign_with(
    method: &Method,
    url: &str,
    credentials: &Credentials,
    extra_params: &[(String, String)],
    entropy: &dyn SigningEntropy,
) -> Result<String, ValidationError> {
    let parsed = Url::parse(url).map_err(|e| ValidationError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mut oauth_params = vec![
        ("oauth_consumer_key".to_string(), credentials.api_key.clone()),
        ("oauth_nonce".to_string(), entropy.nonce()),
        (
            "oauth_signature_method".to_string(),
            SIGNATURE_METHOD.to_string(),
        ),
        ("oauth_timestamp".to_string(), entropy.timestamp().to_string()),
        ("oauth_token".to_string(), credentials.access_token.clone()),
        ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
    ];

    // Query pairs are signed but stay out of the base URL.
    let mut all_params = oauth_params.clone();
    all_params.extend(extra_params.iter().cloned());
    all_params.extend(
        parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned())),
    );

    let base_string = signature_base_string(method, &parsed, &all_params);
    let signing_key = format!(
        "{}&{}",
        percent_encode(&credentials.api_secret),
        percent_encode(&credentials.access_token_secret)
    );
    let signature = hmac_sha1_base64(&signing_key, &base_string);

    oauth_params.push(("oauth_signature".to_string(), signature));
    oauth_params.sort_by(|a, b| a.0.cmp(&b.0));

    let header = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {header}"))
}

/// `METHOD&enc(base_url)&enc(sorted params)`.
pub(crate) fn signature_base_string(
    method: &Method,
    url: &Url,
    params: &[(String, String)],
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        percent_encode(base_url(url)),
        percent_encode(&param_string)
    )
}

/// Scheme, authority and path; no query, no fragment.
fn base_url(url: &Url) -> &str {
    &url[..Position::AfterPath]
}

fn hmac_sha1_base64(key: &str, data: &str) -> String {
    let mut mac = <HmacSha1 as Mac>::new_from_slice(key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(data.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

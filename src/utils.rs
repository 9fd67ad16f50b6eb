use std::num::IntErrorKind;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_TOP_TRACKS_LIMIT: i64 = 5;
pub const MAX_TOP_TRACKS_LIMIT: i64 = 10;

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Per-login anti-forgery value sent as the OAuth `state` parameter.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

pub fn generate_session_id() -> String {
    random_alphanumeric(64)
}

fn session_mac(id: &str, secret: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(id.as_bytes());
    Some(mac)
}

/// HMAC-SHA256 of the session id under the server's secret, base64url encoded.
pub fn sign_session_id(id: &str, secret: &str) -> String {
    session_mac(id, secret)
        .map(|mac| URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Renders the cookie value `<id>.<signature>`.
pub fn encode_session_cookie(id: &str, secret: &str) -> String {
    format!("{id}.{sig}", sig = sign_session_id(id, secret))
}

/// Returns the session id if the cookie value carries a valid signature.
pub fn decode_session_cookie(value: &str, secret: &str) -> Option<String> {
    let (id, sig) = value.rsplit_once('.')?;
    if id.is_empty() {
        return None;
    }

    let sig = URL_SAFE_NO_PAD.decode(sig).ok()?;
    // verify_slice compares in constant time
    session_mac(id, secret)?.verify_slice(&sig).ok()?;
    Some(id.to_string())
}

/// Parses the raw `limit` query value.
///
/// Integers too large for `i64` saturate, so they still end up capped;
/// anything else that is not an integer falls back to the default.
pub fn parse_limit(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_TOP_TRACKS_LIMIT;
    };

    match raw.trim().parse::<i64>() {
        Ok(limit) => limit,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => MAX_TOP_TRACKS_LIMIT,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => DEFAULT_TOP_TRACKS_LIMIT,
        },
    }
}

/// Caps the limit at [`MAX_TOP_TRACKS_LIMIT`]. Non-positive values pass through.
pub fn clamp_limit(limit: i64) -> i64 {
    limit.min(MAX_TOP_TRACKS_LIMIT)
}

pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

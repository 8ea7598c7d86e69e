use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Issue a signed admin session token.
///
/// The original site gated `/admin/*` with a plain boolean cookie, which is
/// trivially forgeable. Sessions here are self-contained signed tokens instead:
///
/// `token = hex(email) . expiry . hex(HMAC-SHA256(hex(email) . expiry))`
///
/// The email is hex-encoded so the `.` separator can never appear inside a
/// segment. No server-side session state is kept; expiry is embedded in the
/// signed payload.
pub fn issue_session_token(email: &str, secret: &str, ttl_secs: i64) -> String {
    let expiry = chrono::Utc::now().timestamp() + ttl_secs;
    let payload = format!("{}.{}", hex::encode(email.as_bytes()), expiry);
    format!("{}.{}", payload, sign(&payload, secret))
}

/// Verify a session token and return the admin email if it is valid and
/// unexpired.
pub fn verify_session_token(token: &str, secret: &str) -> Option<String> {
    let mut parts = token.splitn(3, '.');
    let email_hex = parts.next()?;
    let expiry_str = parts.next()?;
    let signature = parts.next()?;

    let payload = format!("{}.{}", email_hex, expiry_str);
    if !verify(&payload, signature, secret) {
        tracing::warn!("Admin session token signature mismatch");
        return None;
    }

    let expiry: i64 = expiry_str.parse().ok()?;
    if chrono::Utc::now().timestamp() > expiry {
        tracing::info!("Admin session token expired");
        return None;
    }

    let email_bytes = hex::decode(email_hex).ok()?;
    String::from_utf8(email_bytes).ok()
}

fn sign(payload: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take a key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn verify(payload: &str, signature: &str, secret: &str) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(payload.as_bytes());

    let sig_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid hex signature format");
            return false;
        }
    };

    mac.verify_slice(&sig_bytes).is_ok()
}

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{Error, Result};
use crate::util::percent_encode;

type HmacSha1 = Hmac<Sha1>;

/// Build the signature base string.
///
/// `params` must already be sorted; keys and values are raw and get encoded here.
pub fn signature_base_string(http_method: &str, endpoint: &str, params: &[(String, String)]) -> String {
    let param_str = params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<String>>()
        .join("&");
    // the joined parameters are encoded a second time
    format!(
        "{}&{}&{}",
        percent_encode(&http_method.to_ascii_uppercase()),
        percent_encode(endpoint),
        percent_encode(&param_str)
    )
}

pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// base64(HMAC-SHA1(base_str, sign_key))
pub fn hmac_sha1_signature(base_str: &str, sign_key: &str) -> Result<String> {
    let mut mac = HmacSha1::new_from_slice(sign_key.as_bytes()).map_err(|_| Error::Signing)?;
    mac.update(base_str.as_bytes());
    let hash = mac.finalize().into_bytes();
    Ok(STANDARD.encode(hash))
}

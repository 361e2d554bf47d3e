// ── QR code image URLs ──
//
// QR images are rendered by a third-party service; we only build the URL.

use url::Url;

use crate::error::CoreError;

/// Public QR rendering endpoint used unless a profile overrides it.
pub const DEFAULT_QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";

pub const DEFAULT_QR_SIZE: u32 = 200;
pub const MIN_QR_SIZE: u32 = 50;
pub const MAX_QR_SIZE: u32 = 1000;

/// `<service>?size=<n>x<n>&data=<text>`, with `text` form-encoded and the
/// size clamped to what the renderer accepts.
pub fn qr_code_url(service: &str, text: &str, size: u32) -> Result<Url, CoreError> {
    let mut url = Url::parse(service).map_err(|e| CoreError::Config {
        message: format!("invalid QR service URL {service:?}: {e}"),
    })?;
    let size = size.clamp(MIN_QR_SIZE, MAX_QR_SIZE);
    url.query_pairs_mut()
        .clear()
        .append_pair("size", &format!("{size}x{size}"))
        .append_pair("data", text);
    Ok(url)
}

//! Deployment base path and link helpers for the storefront.
use pharmacy_core::constants::PHARMACY_PHONE;

/// Base path for the router (e.g., `/pharmacy` when hosted under a subdirectory).
///
/// Set through `PUBLIC_URL` at compile time. Returns `None` when no base path
/// is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Root-anchored URL for a bundled static file, honouring `PUBLIC_URL`.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Product and offer images are either absolute URLs or bundled files.
#[must_use]
pub fn image_src(image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") || image.starts_with("data:")
    {
        image.to_string()
    } else {
        asset_path(image)
    }
}

/// `tel:` link for a local phone number.
#[must_use]
pub fn tel_href(phone: &str) -> String {
    format!("tel:{}", phone.trim())
}

/// `tel:` link for the pharmacy hotline.
#[must_use]
pub fn hotline_href() -> String {
    tel_href(PHARMACY_PHONE)
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

/// Percent-decode a route segment such as a category slug (`cold-%26-flu`).
#[must_use]
pub fn decode_segment(segment: &str) -> String {
    if !segment.contains('%') {
        return segment.to_string();
    }
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = (bytes[i] == b'%')
            .then(|| segment.get(i + 1..i + 3))
            .flatten()
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        if let Some(byte) = escaped {
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_base_is_none_by_default() {
        assert_eq!(router_base(), None);
        assert_eq!(router_base_with_base("  "), None);
        assert_eq!(
            router_base_with_base("/pharmacy/"),
            Some(String::from("/pharmacy"))
        );
    }

    #[test]
    fn bundled_images_get_the_public_base() {
        assert_eq!(
            asset_path_with_base("img/hero.jpg", "/pharmacy/"),
            "/pharmacy/img/hero.jpg"
        );
        assert_eq!(image_src("/img/hero.jpg"), "/img/hero.jpg");
        let remote = "https://images.pexels.com/photos/1.jpeg?w=400";
        assert_eq!(image_src(remote), remote);
    }

    #[test]
    fn phone_links_use_tel_scheme() {
        assert_eq!(tel_href(" 01012345678 "), "tel:01012345678");
        assert_eq!(hotline_href(), "tel:01234567890");
    }

    #[test]
    fn encoded_slugs_decode() {
        assert_eq!(decode_segment("cold-%26-flu"), "cold-&-flu");
        assert_eq!(decode_segment("pain-relief"), "pain-relief");
        assert_eq!(decode_segment("bad-%zz"), "bad-%zz");
    }
}

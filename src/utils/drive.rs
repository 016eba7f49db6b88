//! Google Drive link normalization.
//!
//! Sheet cells hold whatever sharing link the shop owner pasted. For
//! embedding we canonicalize the known Drive shapes into the thumbnail
//! endpoint; everything else passes through untouched.

/// Leading run of Drive file-ID characters.
fn take_id(rest: &str) -> Option<String> {
    let id: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    (!id.is_empty()).then_some(id)
}

fn id_after(url: &str, pattern: &str) -> Option<String> {
    url.split_once(pattern).and_then(|(_, rest)| take_id(rest))
}

/// Extract a Drive file ID from any of the sharing-link shapes:
/// `/file/d/{id}`, an `id=` query parameter, or `/uc?...id={id}`.
/// The first shape that matches wins.
pub fn extract_file_id(url: &str) -> Option<String> {
    id_after(url, "/file/d/")
        .or_else(|| id_after(url, "?id=").or_else(|| id_after(url, "&id=")))
        .or_else(|| {
            url.split_once("/uc?")
                .and_then(|(_, rest)| id_after(rest, "id="))
        })
}

/// Prepend https:// when the string carries no protocol prefix.
pub fn ensure_protocol(url: &str) -> String {
    if url.starts_with("http") || url.starts_with("//") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Canonicalize a Drive sharing link into a directly embeddable thumbnail
/// URL. Non-Drive URLs pass through with a protocol ensured; Drive URLs
/// without a recognizable file ID come back trimmed but otherwise
/// unchanged. Blank input is returned as-is.
pub fn direct_drive_link(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return url.to_string();
    }
    if !trimmed.contains("drive.google.com") {
        return ensure_protocol(trimmed);
    }
    match extract_file_id(trimmed) {
        Some(id) => format!("https://drive.google.com/thumbnail?id={}&sz=w1000", id),
        None => trimmed.to_string(),
    }
}

/// Download flavor used by the QR cell. Also accepts a bare file ID, which
/// QR columns sometimes hold instead of a full link.
pub fn drive_download_link(url: &str) -> String {
    let trimmed = url.trim();
    let id = extract_file_id(trimmed)
        .or_else(|| (!trimmed.contains('/') && trimmed.len() > 15).then(|| trimmed.to_string()));
    match id {
        Some(id) => format!("https://drive.google.com/uc?export=download&id={}", id),
        None => direct_drive_link(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THUMB: &str = "https://drive.google.com/thumbnail?id=ABC123&sz=w1000";

    #[test]
    fn equivalent_drive_links_normalize_to_one_thumbnail() {
        assert_eq!(
            direct_drive_link("https://drive.google.com/file/d/ABC123/view"),
            THUMB
        );
        assert_eq!(
            direct_drive_link("https://drive.google.com/open?id=ABC123"),
            THUMB
        );
        assert_eq!(
            direct_drive_link("https://drive.google.com/uc?export=view&id=ABC123"),
            THUMB
        );
    }

    #[test]
    fn non_drive_urls_pass_through() {
        let url = "http://x/logo.png";
        assert_eq!(direct_drive_link(url), url);
        assert_eq!(direct_drive_link("https://i.imgur.com/a.png"), "https://i.imgur.com/a.png");
    }

    #[test]
    fn protocol_is_prepended_for_bare_hosts() {
        assert_eq!(direct_drive_link("imgur.com/a.png"), "https://imgur.com/a.png");
        assert_eq!(direct_drive_link("//cdn.example.com/a.png"), "//cdn.example.com/a.png");
    }

    #[test]
    fn drive_url_without_id_comes_back_trimmed() {
        assert_eq!(
            direct_drive_link("  https://drive.google.com/drive/my-drive  "),
            "https://drive.google.com/drive/my-drive"
        );
    }

    #[test]
    fn blank_input_is_returned_unchanged() {
        assert_eq!(direct_drive_link(""), "");
        assert_eq!(direct_drive_link("   "), "   ");
    }

    #[test]
    fn first_matching_pattern_wins() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/FIRST/view?id=SECOND"),
            Some("FIRST".to_string())
        );
    }

    #[test]
    fn download_link_handles_links_and_bare_ids() {
        assert_eq!(
            drive_download_link("https://drive.google.com/file/d/ABC123/view"),
            "https://drive.google.com/uc?export=download&id=ABC123"
        );
        assert_eq!(
            drive_download_link("1aBcDeFgHiJkLmNoPqR"),
            "https://drive.google.com/uc?export=download&id=1aBcDeFgHiJkLmNoPqR"
        );
        // Too short for a bare ID, not a Drive link: falls back to the
        // display normalization.
        assert_eq!(drive_download_link("x.png"), "https://x.png");
    }
}

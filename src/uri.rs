// src/uri.rs

/// URI identifier codes from the NFC Forum URI Record Type Definition. The first payload byte
/// of a `U` record indexes this table.
pub const URI_PREFIXES: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// Prefix for an identifier code; unknown codes map to `""`.
pub fn uri_prefix_of(index: usize) -> &'static str {
    URI_PREFIXES.get(index).copied().unwrap_or("")
}

/// Longest table prefix starting `uri`, as `(code, remainder)`. `(0, uri)` when nothing matches.
pub fn split_uri_prefix(uri: &str) -> (u8, &str) {
    URI_PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, prefix)| uri.starts_with(**prefix))
        .max_by_key(|(_, prefix)| prefix.len())
        .map_or((0, uri), |(code, prefix)| (code as u8, &uri[prefix.len()..]))
}

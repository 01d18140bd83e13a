//! # Attribute Table Encoding
//!
//! The `.cpg` component names the code page of the `.dbf`. Producers write
//! it in several styles: WHATWG-ish labels (`UTF-8`, `ISO-8859-1`), bare
//! Windows code page numbers (`1252`), or ESRI's `ANSI 1252` and `88591`.
//! Tables without a `.cpg`, or with one we cannot map, are read as UTF-8.

use encoding_rs::Encoding;

/// Map a `.cpg` label to an encoding.
pub fn encoding_for_code_page(label: &str) -> Option<&'static Encoding> {
    let label = label.trim();
    let label = match label.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("ANSI ") => label[5..].trim(),
        _ => label,
    };
    if label.is_empty() {
        return None;
    }

    if label.bytes().all(|b| b.is_ascii_digit()) {
        return match label {
            "65001" => Some(encoding_rs::UTF_8),
            // ESRI writes ISO-8859-n as 8859n; Windows uses 2859n.
            _ if label.len() == 5 && (label.starts_with("8859") || label.starts_with("2859")) => {
                Encoding::for_label(format!("iso-8859-{}", &label[4..]).as_bytes())
            }
            _ => Encoding::for_label(format!("windows-{label}").as_bytes())
                .or_else(|| Encoding::for_label(format!("cp{label}").as_bytes())),
        };
    }

    Encoding::for_label(label.as_bytes())
}

/// The encoding for an optional `.cpg` label, falling back to UTF-8.
pub fn resolve_encoding(code_page: Option<&str>) -> &'static Encoding {
    match code_page {
        None => encoding_rs::UTF_8,
        Some(label) => encoding_for_code_page(label).unwrap_or_else(|| {
            tracing::warn!(code_page = label, "unknown .cpg code page; reading attributes as UTF-8");
            encoding_rs::UTF_8
        }),
    }
}

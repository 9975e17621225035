/// Substrings dropped from the sanitized stem. A `.pdf` extension folded into
/// the body by character substitution shows up as `_pdf`.
const INVALID_SUBSTRINGS: &[&str] = &["_pdf"];

const PDF_EXTENSION: &str = ".pdf";

/// Stem used when nothing survives sanitization.
const FALLBACK_STEM: &str = "document";

/// Converts a remote URL into a deterministic, filesystem-safe PDF file name.
///
/// The name doubles as the dedup key for downloads, so the mapping must stay stable
/// across runs.
///
/// ```text
/// https://host/Label/ABC-123_PDF.pdf -> abc_123.pdf
/// HOST/folder/My File!!.PDF          -> my_file.pdf
/// ```
pub fn url_to_filename(raw_url: &str) -> String {
    let lower = raw_url.to_lowercase();
    let mut safe = replace_non_alphanumeric(last_segment(&lower));

    for invalid in INVALID_SUBSTRINGS {
        safe = safe.replace(invalid, "");
    }

    if safe.is_empty() {
        safe.push_str(FALLBACK_STEM);
    }
    if !safe.ends_with(PDF_EXTENSION) {
        safe.push_str(PDF_EXTENSION);
    }
    safe
}

/// Trailing path segment, ignoring trailing slashes.
fn last_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Maps everything outside `[a-z0-9]` to `_`, collapses runs and trims the ends.
fn replace_non_alphanumeric(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_sep = false;
    for ch in value.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            prev_sep = false;
        } else if !prev_sep {
            out.push('_');
            prev_sep = true;
        }
    }
    out.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(name: &str) -> bool {
        let Some(stem) = name.strip_suffix(".pdf") else {
            return false;
        };
        !stem.is_empty()
            && !stem.starts_with('_')
            && !stem.ends_with('_')
            && stem
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    #[test]
    fn folds_pdf_suffix_into_single_extension() {
        assert_eq!(
            url_to_filename("https://host/Label/ABC-123_PDF.pdf"),
            "abc_123.pdf"
        );
    }

    #[test]
    fn collapses_punctuation_and_spaces() {
        assert_eq!(url_to_filename("HOST/folder/My File!!.PDF"), "my_file.pdf");
    }

    #[test]
    fn keeps_only_last_segment() {
        assert_eq!(
            url_to_filename("https://www.cdms.telusagcg.com/ldat/L123/Roundup_Label.pdf"),
            "roundup_label.pdf"
        );
        assert_eq!(url_to_filename("https://host/docs/sheet/"), "sheet.pdf");
    }

    #[test]
    fn appends_extension_when_missing() {
        assert_eq!(url_to_filename("https://host/download?id=7"), "download_id_7.pdf");
        assert_eq!(url_to_filename("https://host/pdf"), "pdf.pdf");
    }

    #[test]
    fn non_ascii_becomes_separator() {
        assert_eq!(url_to_filename("https://host/étiquette.pdf"), "tiquette.pdf");
    }

    #[test]
    fn empty_stem_uses_fallback() {
        assert_eq!(url_to_filename(""), "document.pdf");
        assert_eq!(url_to_filename("https://host/!!!"), "document.pdf");
    }

    #[test]
    fn output_is_deterministic_and_well_formed() {
        let inputs = [
            "https://host/Label/ABC-123_PDF.pdf",
            "HOST/folder/My File!!.PDF",
            "https://host/a__b--c.PdF",
            "https://host/_leading_and_trailing_.pdf",
            "https://host/x_pdf_pdf_y",
            "///",
        ];
        for input in inputs {
            let first = url_to_filename(input);
            assert_eq!(first, url_to_filename(input));
            assert!(is_well_formed(&first), "{input} -> {first}");
        }
    }
}

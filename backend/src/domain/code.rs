//! Deterministic short codes for lookup rows.
//!
//! Labels and province names are folded to ASCII-ish text (NFD, combining
//! marks removed, `đ`/`Đ` mapped to `d`/`D`, whitespace removed), salted, and
//! sampled down to a four character upper-case code. The same label and salt
//! always yield the same code, which is what lets lookup rows be shared.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Salt used when configuration does not provide one.
pub const DEFAULT_CODE_SALT: &str = "phongtro";

const PROVINCE_PREFIXES: [&str; 2] = ["Thành phố ", "Tỉnh "];

/// Strip the administrative honorific from a province name.
///
/// # Examples
/// ```
/// use phongtro::domain::province_name;
///
/// assert_eq!(province_name("Thành phố Hồ Chí Minh"), "Hồ Chí Minh");
/// assert_eq!(province_name("Tỉnh Bình Dương"), "Bình Dương");
/// assert_eq!(province_name("Đà Nẵng"), "Đà Nẵng");
/// ```
#[must_use]
pub fn province_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    PROVINCE_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .map_or(trimmed, str::trim)
}

fn fold(label: &str) -> Vec<char> {
    label
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(|ch| match ch {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .filter(|ch| !ch.is_whitespace())
        .collect()
}

/// Salted label-to-code generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGenerator {
    salt: String,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_SALT)
    }
}

impl CodeGenerator {
    /// Create a generator using the given salt.
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Derive the code for `label`.
    ///
    /// Returns `None` when the label folds to nothing.
    ///
    /// # Examples
    /// ```
    /// use phongtro::domain::CodeGenerator;
    ///
    /// let codes = CodeGenerator::new("phongtro");
    /// assert_eq!(codes.generate("Hà Nội"), codes.generate("Ha Noi"));
    /// assert_eq!(codes.generate("   "), None);
    /// ```
    #[must_use]
    pub fn generate(&self, label: &str) -> Option<String> {
        let folded = fold(label);
        if folded.is_empty() {
            return None;
        }

        let merged: Vec<char> = folded.iter().copied().chain(self.salt.chars()).collect();
        let merged_len = merged.len();
        let mut length = merged_len;
        let mut sampled = String::with_capacity(3);
        for step in 0..3 {
            let index = if step == 2 {
                (merged_len + length) / 2
            } else {
                length / 2
            };
            if let Some(ch) = merged.get(index) {
                sampled.push(*ch);
            }
            length = index;
        }

        let mut code: String = folded.get(2).into_iter().collect();
        code.push_str(&sampled);
        Some(code.to_uppercase())
    }

    /// Derive the code for a province after stripping its honorific.
    #[must_use]
    pub fn province_code(&self, raw: &str) -> Option<String> {
        self.generate(province_name(raw))
    }
}

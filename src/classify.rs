/// Classification of raw catalog records into a release table
use crate::config::BANNED_WORDS;
use crate::error::Rejection;
use crate::release::{release_key, Platform, RawRelease, ReleaseTable};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

// ASCII digits only; `\d` would also match other scripts' digits
static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+").expect("valid leading integer pattern"));

/// Result of classifying one catalog download
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifyReport {
    pub table: ReleaseTable,
    pub accepted: usize,
    pub rejected: usize,
}

fn first_segment(version: &str) -> &str {
    version.split('.').next().unwrap_or_default()
}

/// True if the first `.`-segment starts with an integer, as `parseInt` sees it
///
/// "10b1" and "123456789012345678901" pass, "abc" does not.
pub fn starts_with_integer(version: &str) -> bool {
    LEADING_INTEGER.is_match(first_segment(version))
}

/// Leading integer of the first `.`-segment; `None` if absent or too large for `u64`
pub fn major_version(version: &str) -> Option<u64> {
    LEADING_INTEGER
        .find(first_segment(version))
        .and_then(|m| m.as_str().parse().ok())
}

/// Validate one record and compute its release key
///
/// Checks run in order:
/// 1. product, channel and version are present
/// 2. version is not empty
/// 3. version starts with an integer
/// 4. product is a supported Firefox product
/// 5. no `_`-delimited word of the key is banned
pub fn validate(release: &RawRelease) -> Result<(String, String), Rejection> {
    let product = present(&release.product).ok_or(Rejection::MissingField("product"))?;
    let channel = present(&release.channel).ok_or(Rejection::MissingField("channel"))?;
    let version = release
        .version
        .as_deref()
        .ok_or(Rejection::MissingField("version"))?;

    if version.is_empty() {
        return Err(Rejection::EmptyVersion(version.to_string()));
    }

    if !starts_with_integer(version) {
        return Err(Rejection::NonNumericVersion(version.to_string()));
    }

    let platform = Platform::from_product(product)
        .ok_or_else(|| Rejection::UnsupportedProduct(product.to_string()))?;

    let key = release_key(platform, channel);
    if uses_banned_words(&key) {
        return Err(Rejection::BannedWord(key));
    }

    Ok((key, version.to_string()))
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// True if any `_`-delimited word of the key is banned
pub fn uses_banned_words(key: &str) -> bool {
    key.split('_').any(|word| {
        BANNED_WORDS
            .iter()
            .any(|banned| word.eq_ignore_ascii_case(banned))
    })
}

/// Classify raw catalog records, dropping invalid ones
///
/// Records that are not objects with string fields are dropped individually;
/// they never fail the whole batch.
pub fn classify(records: &[Value]) -> ClassifyReport {
    records
        .iter()
        .map(|value| {
            serde_json::from_value::<RawRelease>(value.clone())
                .map_err(|_| Rejection::Malformed)
                .and_then(|release| validate(&release))
        })
        .fold(ClassifyReport::default(), |mut report, outcome| {
            match outcome {
                Ok((key, version)) => {
                    report.table.entry(key).or_default().push(version);
                    report.accepted += 1;
                }
                Err(rejection) => {
                    log::debug!("Skipping release record: {}", rejection);
                    report.rejected += 1;
                }
            }
            report
        })
}

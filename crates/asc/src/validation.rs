//! Flag validation and enum normalization.
//!
//! Everything here runs before a request is built, so bad input never
//! reaches the network. Parsers return `String` errors so clap can use them
//! directly as `value_parser`s.

use asc_client::MAX_PAGE_LIMIT;
use asc_client::check_path_segment;
use chrono::NaiveDate;

use crate::error::CliError;

/// Uppercases and maps `-`, spaces and `.` to `_`: `"mac-os"` -> `"MAC_OS"`.
fn canonical(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' | '.' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $api:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value sent to the API.
            pub fn as_api_str(self) -> &'static str {
                match self {
                    $($name::$variant => $api),+
                }
            }

            /// Accepts any case and `-`/`_`/space separators, plus short aliases.
            pub fn parse(raw: &str) -> Result<Self, String> {
                let wanted = canonical(raw);
                $(
                    if wanted == $api $(|| wanted == $alias)* {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!(
                    "invalid {} '{}' (expected one of: {})",
                    $label,
                    raw,
                    Self::ALL
                        .iter()
                        .map(|v| v.as_api_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_api_str())
            }
        }
    };
}

api_enum!(
    /// App platform as used by builds, versions and uploads.
    Platform, "platform" {
        Ios => "IOS",
        MacOs => "MAC_OS" | "MACOS" | "OSX",
        TvOs => "TV_OS" | "TVOS",
        VisionOs => "VISION_OS" | "VISIONOS",
    }
);

api_enum!(
    InAppPurchaseType, "in-app purchase type" {
        Consumable => "CONSUMABLE",
        NonConsumable => "NON_CONSUMABLE" | "NONCONSUMABLE",
        NonRenewingSubscription => "NON_RENEWING_SUBSCRIPTION" | "NON_RENEWING",
    }
);

api_enum!(
    EventBadge, "event badge" {
        LiveEvent => "LIVE_EVENT" | "LIVE",
        Premiere => "PREMIERE",
        Challenge => "CHALLENGE",
        Competition => "COMPETITION",
        NewSeason => "NEW_SEASON",
        MajorUpdate => "MAJOR_UPDATE",
        SpecialEvent => "SPECIAL_EVENT" | "SPECIAL",
    }
);

api_enum!(
    PurchaseRequirement, "purchase requirement" {
        NoCost => "NO_COST_ASSOCIATED" | "NONE" | "FREE",
        InAppPurchase => "IN_APP_PURCHASE" | "IAP",
        Subscription => "SUBSCRIPTION",
        InAppPurchaseAndSubscription => "IN_APP_PURCHASE_AND_SUBSCRIPTION",
        InAppPurchaseOrSubscription => "IN_APP_PURCHASE_OR_SUBSCRIPTION",
    }
);

api_enum!(
    EventPriority, "event priority" {
        High => "HIGH",
        Normal => "NORMAL",
    }
);

api_enum!(
    EventPurpose, "event purpose" {
        AppropriateForAllUsers => "APPROPRIATE_FOR_ALL_USERS" | "ALL_USERS",
        AttractNewUsers => "ATTRACT_NEW_USERS" | "NEW_USERS",
        KeepActiveUsersInformed => "KEEP_ACTIVE_USERS_INFORMED" | "ACTIVE_USERS",
        BringBackLapsedUsers => "BRING_BACK_LAPSED_USERS" | "LAPSED_USERS",
    }
);

api_enum!(
    ProcessingState, "processing state" {
        Processing => "PROCESSING",
        Failed => "FAILED",
        Invalid => "INVALID",
        Valid => "VALID",
    }
);

/// Sort keys accepted by `GET /v1/builds`.
pub const BUILD_SORTS: &[&str] = &[
    "uploadedDate",
    "-uploadedDate",
    "version",
    "-version",
    "preReleaseVersion",
    "-preReleaseVersion",
];

pub fn parse_build_sort(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    BUILD_SORTS
        .iter()
        .find(|s| **s == trimmed)
        .map(|s| s.to_string())
        .ok_or_else(|| {
            format!(
                "invalid sort '{}' (expected one of: {})",
                raw,
                BUILD_SORTS.join(", ")
            )
        })
}

pub fn parse_limit(raw: &str) -> Result<u32, String> {
    let limit: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid limit '{}': not a number", raw))?;
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(format!("limit must be between 1 and {}", MAX_PAGE_LIMIT));
    }
    Ok(limit)
}

pub const MAX_ONE_TIME_CODES: u32 = 10_000;

pub fn parse_code_count(raw: &str) -> Result<u32, String> {
    let count: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid count '{}': not a number", raw))?;
    if !(1..=MAX_ONE_TIME_CODES).contains(&count) {
        return Err(format!("count must be between 1 and {}", MAX_ONE_TIME_CODES));
    }
    Ok(count)
}

/// Absolute `https://` URL with a host.
pub fn parse_https_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    match url::Url::parse(trimmed) {
        Ok(url) if url.scheme() == "https" && url.host_str().is_some() => Ok(trimmed.to_string()),
        Ok(_) => Err(format!("'{}' must be an https:// URL", raw)),
        Err(e) => Err(format!("invalid URL '{}': {}", raw, e)),
    }
}

/// Any absolute URL; custom app schemes are allowed.
pub fn parse_deep_link(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    url::Url::parse(trimmed)
        .map(|_| trimmed.to_string())
        .map_err(|e| format!("invalid deep link '{}': {}", raw, e))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", raw))
}

/// ISO 3166-1 alpha-3 territory code, as App Store Connect uses (`USA`, `GBR`).
pub fn parse_territory(raw: &str) -> Result<String, String> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(code)
    } else {
        Err(format!(
            "invalid territory '{}' (expected a three-letter code such as USA)",
            raw
        ))
    }
}

pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(format!("invalid boolean '{}' (expected true or false)", raw)),
    }
}

/// Non-empty after trimming.
/// An App Store Connect resource ID, which becomes one segment of a URL path.
pub fn parse_resource_id(raw: &str) -> Result<String, String> {
    let id = parse_non_empty(raw)?;
    check_path_segment(&id).map_err(|_| {
        format!("'{}' is not a resource ID (no '/', '?', '#', '%', spaces or dot segments)", id)
    })?;
    Ok(id)
}

pub fn parse_non_empty(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn parse_email(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    match trimmed.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
        {
            Ok(trimmed.to_string())
        }
        _ => Err(format!("invalid email address '{}'", raw)),
    }
}

/// Wallet pass type identifiers are reverse-DNS names starting with `pass.`.
pub fn parse_pass_type_identifier(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let valid = trimmed
        .strip_prefix("pass.")
        .map(|rest| {
            !rest.is_empty()
                && rest
                    .split('.')
                    .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
        })
        .unwrap_or(false);
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(format!(
            "invalid pass type identifier '{}' (expected pass.com.example.name)",
            raw
        ))
    }
}

/// Trims items, drops empty ones and duplicates, keeps first-seen order.
pub fn clean_list(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !out.iter().any(|v| v == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Like [`clean_list`] but at least one item is required.
pub fn require_list(values: &[String], flag: &str) -> Result<Vec<String>, CliError> {
    let cleaned = clean_list(values);
    if cleaned.is_empty() {
        Err(CliError::InvalidInput(format!(
            "{} requires at least one value",
            flag
        )))
    } else {
        Ok(cleaned)
    }
}

/// Destructive commands run only with `--confirm`.
pub fn require_confirm(confirm: bool, action: &str) -> Result<(), CliError> {
    if confirm {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "--confirm is required to {}",
            action
        )))
    }
}

/// Expiration dates must be today or later.
pub fn require_not_past(date: NaiveDate, today: NaiveDate, flag: &str) -> Result<(), CliError> {
    if date < today {
        Err(CliError::InvalidInput(format!(
            "{} {} is in the past",
            flag,
            date.format("%Y-%m-%d")
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_normalization() {
        for raw in ["ios", "IOS", " iOS "] {
            assert_eq!(Platform::parse(raw), Ok(Platform::Ios));
        }
        for raw in ["macos", "mac-os", "MAC_OS", "mac os"] {
            assert_eq!(Platform::parse(raw), Ok(Platform::MacOs));
        }
        assert_eq!(Platform::parse("tvos"), Ok(Platform::TvOs));
        assert_eq!(Platform::parse("vision-os"), Ok(Platform::VisionOs));
        let err = Platform::parse("android").unwrap_err();
        assert!(err.contains("IOS, MAC_OS, TV_OS, VISION_OS"));
    }

    #[test]
    fn test_iap_type_normalization() {
        assert_eq!(
            InAppPurchaseType::parse("non-consumable"),
            Ok(InAppPurchaseType::NonConsumable)
        );
        assert_eq!(
            InAppPurchaseType::parse("consumable").map(|t| t.as_api_str()),
            Ok("CONSUMABLE")
        );
        assert_eq!(
            InAppPurchaseType::parse("non_renewing"),
            Ok(InAppPurchaseType::NonRenewingSubscription)
        );
        assert!(InAppPurchaseType::parse("auto-renewable").is_err());
    }

    #[test]
    fn test_event_enums() {
        assert_eq!(EventBadge::parse("live event"), Ok(EventBadge::LiveEvent));
        assert_eq!(EventBadge::parse("major-update").unwrap().to_string(), "MAJOR_UPDATE");
        assert_eq!(PurchaseRequirement::parse("free"), Ok(PurchaseRequirement::NoCost));
        assert_eq!(EventPriority::parse("high"), Ok(EventPriority::High));
        assert_eq!(
            EventPurpose::parse("new-users"),
            Ok(EventPurpose::AttractNewUsers)
        );
        assert_eq!(ProcessingState::parse("valid"), Ok(ProcessingState::Valid));
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(parse_limit("1"), Ok(1));
        assert_eq!(parse_limit("200"), Ok(200));
        assert!(parse_limit("0").is_err());
        assert!(parse_limit("201").is_err());
        assert!(parse_limit("many").is_err());
    }

    #[test]
    fn test_code_count_bounds() {
        assert_eq!(parse_code_count("500"), Ok(500));
        assert!(parse_code_count("0").is_err());
        assert!(parse_code_count("10001").is_err());
    }

    #[test]
    fn test_https_url() {
        assert!(parse_https_url("https://example.com/hooks/asc").is_ok());
        assert!(parse_https_url("http://example.com/hooks").is_err());
        assert!(parse_https_url("example.com").is_err());
    }

    #[test]
    fn test_build_sort() {
        assert_eq!(parse_build_sort("-uploadedDate").unwrap(), "-uploadedDate");
        assert!(parse_build_sort("uploaded").is_err());
    }

    #[test]
    fn test_territory_and_bool() {
        assert_eq!(parse_territory("usa"), Ok("USA".to_string()));
        assert!(parse_territory("US").is_err());
        assert!(parse_territory("U5A").is_err());
        assert_eq!(parse_bool("Yes"), Ok(true));
        assert_eq!(parse_bool("off"), Ok(false));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_email_and_pass_identifier() {
        assert_eq!(parse_email(" a@b.io "), Ok("a@b.io".to_string()));
        assert!(parse_email("a@b").is_err());
        assert!(parse_email("@b.io").is_err());
        assert!(parse_pass_type_identifier("pass.com.example.loyalty").is_ok());
        assert!(parse_pass_type_identifier("com.example.loyalty").is_err());
        assert!(parse_pass_type_identifier("pass.").is_err());
        assert!(parse_pass_type_identifier("pass.com..x").is_err());
    }

    #[test]
    fn test_resource_id_is_one_path_segment() {
        assert_eq!(parse_resource_id(" 6450000001 ").unwrap(), "6450000001");
        assert!(parse_resource_id("").is_err());
        assert!(parse_resource_id("..").is_err());
        assert!(parse_resource_id("../apps/999").is_err());
        assert!(parse_resource_id("g1?filter[x]=1").is_err());
        assert!(parse_resource_id("g1#top").is_err());
        assert!(parse_resource_id("%2e%2e").is_err());
    }

    #[test]
    fn test_clean_list_trims_and_dedupes() {
        let values = vec![
            " a ".to_string(),
            "".to_string(),
            "b".to_string(),
            "a".to_string(),
        ];
        assert_eq!(clean_list(&values), vec!["a", "b"]);
        assert!(require_list(&["  ".to_string()], "--group").is_err());
    }

    #[test]
    fn test_require_confirm() {
        assert!(require_confirm(true, "delete beta group").is_ok());
        let err = require_confirm(false, "delete beta group").unwrap_err();
        assert_eq!(err.to_string(), "--confirm is required to delete beta group");
    }

    #[test]
    fn test_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let date = parse_date("2026-10-19").unwrap();
        assert!(require_not_past(date, today, "--expiration-date").is_ok());
        let past = parse_date("2026-10-18").unwrap();
        assert!(require_not_past(past, today, "--expiration-date").is_err());
        assert!(parse_date("19/10/2026").is_err());
    }
}

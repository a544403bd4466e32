//! Relationship dispatch table.
//!
//! Maps `(family, relationship)` as typed on the command line to the
//! relationship endpoint and the resource type of its linkages.

use crate::error::ClientError;
use crate::request::check_path_segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linkage {
    pub family: &'static str,
    pub name: &'static str,
    /// Relationship endpoint with an `{id}` placeholder.
    pub path: &'static str,
    /// JSON:API type of the related resources.
    pub resource_type: &'static str,
}

const fn entry(
    family: &'static str,
    name: &'static str,
    path: &'static str,
    resource_type: &'static str,
) -> Linkage {
    Linkage {
        family,
        name,
        path,
        resource_type,
    }
}

pub const LINKAGES: &[Linkage] = &[
    entry("builds", "app", "/v1/builds/{id}/relationships/app", "apps"),
    entry("builds", "pre-release-version", "/v1/builds/{id}/relationships/preReleaseVersion", "preReleaseVersions"),
    entry("builds", "beta-groups", "/v1/builds/{id}/relationships/betaGroups", "betaGroups"),
    entry("builds", "individual-testers", "/v1/builds/{id}/relationships/individualTesters", "betaTesters"),
    entry("builds", "beta-build-localizations", "/v1/builds/{id}/relationships/betaBuildLocalizations", "betaBuildLocalizations"),
    entry("builds", "build-beta-detail", "/v1/builds/{id}/relationships/buildBetaDetail", "buildBetaDetails"),
    entry("builds", "app-encryption-declaration", "/v1/builds/{id}/relationships/appEncryptionDeclaration", "appEncryptionDeclarations"),
    entry("builds", "icons", "/v1/builds/{id}/relationships/icons", "buildIcons"),
    entry("beta-groups", "app", "/v1/betaGroups/{id}/relationships/app", "apps"),
    entry("beta-groups", "builds", "/v1/betaGroups/{id}/relationships/builds", "builds"),
    entry("beta-groups", "beta-testers", "/v1/betaGroups/{id}/relationships/betaTesters", "betaTesters"),
    entry("beta-testers", "apps", "/v1/betaTesters/{id}/relationships/apps", "apps"),
    entry("beta-testers", "beta-groups", "/v1/betaTesters/{id}/relationships/betaGroups", "betaGroups"),
    entry("beta-testers", "builds", "/v1/betaTesters/{id}/relationships/builds", "builds"),
    entry("iap", "localizations", "/v2/inAppPurchases/{id}/relationships/inAppPurchaseLocalizations", "inAppPurchaseLocalizations"),
    entry("iap", "price-points", "/v2/inAppPurchases/{id}/relationships/pricePoints", "inAppPurchasePricePoints"),
    entry("iap", "images", "/v2/inAppPurchases/{id}/relationships/images", "inAppPurchaseImages"),
    entry("offer-codes", "one-time-use-codes", "/v1/subscriptionOfferCodes/{id}/relationships/oneTimeUseCodes", "subscriptionOfferCodeOneTimeUseCodes"),
    entry("offer-codes", "custom-codes", "/v1/subscriptionOfferCodes/{id}/relationships/customCodes", "subscriptionOfferCodeCustomCodes"),
    entry("offer-codes", "prices", "/v1/subscriptionOfferCodes/{id}/relationships/prices", "subscriptionOfferCodePrices"),
    entry("app-events", "localizations", "/v1/appEvents/{id}/relationships/localizations", "appEventLocalizations"),
    entry("pass-type-ids", "certificates", "/v1/passTypeIds/{id}/relationships/certificates", "certificates"),
];

/// Relationship names known for a family, in table order.
pub fn relationships_for(family: &str) -> Vec<&'static str> {
    LINKAGES
        .iter()
        .filter(|l| l.family == family)
        .map(|l| l.name)
        .collect()
}

pub fn find(family: &str, relationship: &str) -> Result<&'static Linkage, ClientError> {
    let wanted = relationship.trim().to_ascii_lowercase().replace('_', "-");
    LINKAGES
        .iter()
        .find(|l| l.family == family && l.name == wanted)
        .ok_or_else(|| ClientError::UnknownRelationship {
            family: family.to_string(),
            relationship: relationship.to_string(),
            valid: relationships_for(family),
        })
}

impl Linkage {
    pub fn path_for(&self, id: &str) -> String {
        self.path.replace("{id}", id)
    }
}

/// Resolves the relationship endpoint for one resource.
pub fn linkage_path(family: &str, relationship: &str, id: &str) -> Result<String, ClientError> {
    check_path_segment(id)?;
    Ok(find(family, relationship)?.path_for(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_relationship_resolves() {
        assert_eq!(
            linkage_path("builds", "beta-groups", "b1").unwrap(),
            "/v1/builds/b1/relationships/betaGroups"
        );
        assert_eq!(
            find("beta-groups", "BETA_TESTERS").unwrap().resource_type,
            "betaTesters"
        );
    }

    #[test]
    fn test_id_must_be_one_segment() {
        let err = linkage_path("builds", "beta-groups", "../../apps/1").unwrap_err();
        assert!(matches!(err, ClientError::InvalidPathSegment(_)));
    }

    #[test]
    fn test_unknown_relationship_lists_valid_names() {
        let err = linkage_path("pass-type-ids", "owners", "p1").unwrap_err();
        let ClientError::UnknownRelationship { valid, .. } = err else {
            panic!("expected UnknownRelationship");
        };
        assert_eq!(valid, vec!["certificates"]);
    }

    #[test]
    fn test_table_has_no_duplicates_and_every_path_has_placeholder() {
        let mut seen = HashSet::new();
        for linkage in LINKAGES {
            assert!(seen.insert((linkage.family, linkage.name)), "{:?}", linkage);
            assert!(linkage.path.contains("/{id}/relationships/"), "{:?}", linkage);
        }
    }
}

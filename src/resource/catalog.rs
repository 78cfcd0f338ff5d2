//! Every Search Ads endpoint, expressed as data.
//!
//! Path parameters use the provider's own names (`campaignId`, `adgroupId`, `keywordId`,
//! `adamId`, `creativeSetId`, `adGroupCreativeSetId`).

// self
use crate::resource::{
	BodyKind::{Array, Object, Report, Selector},
	HttpMethod::{Delete, Get, Post, Put},
	Injection, ResourceDescriptor as R,
};

const ORG_ID: Injection = Injection::OrgId { key: "orgId" };
const CAMPAIGN_ID: Injection = Injection::PathParameter { key: "campaignId", parameter: "campaignId" };

// Access control.

/// Roles and organizations the API user can access.
pub const ACLS: R = R::new("acls", Get, "acls");
/// App search for promotion candidates.
pub const SEARCH_APPS: R = R::new("search_apps", Get, "search/apps").required_query(&["query"]);

// Campaigns.

/// Creates a campaign; `orgId` is injected from the identity.
pub const CREATE_CAMPAIGN: R = R::new("create_campaign", Post, "campaigns").body(Object).inject(&[ORG_ID]);
/// Finds campaigns with a selector.
pub const FIND_CAMPAIGNS: R = R::new("find_campaigns", Post, "campaigns/find").body(Selector);
/// Fetches one campaign.
pub const GET_CAMPAIGN: R = R::new("get_campaign", Get, "campaigns/{campaignId}");
/// Lists campaigns; page with `offset`/`limit` query parameters.
pub const ALL_CAMPAIGNS: R = R::new("all_campaigns", Get, "campaigns");
/// Updates a campaign (`{"campaign": {..}, "clearGeoTargetingOnCountryOrRegionChange": ..}`).
pub const UPDATE_CAMPAIGN: R = R::new("update_campaign", Put, "campaigns/{campaignId}").body(Object);
/// Deletes a campaign.
pub const DELETE_CAMPAIGN: R = R::new("delete_campaign", Delete, "campaigns/{campaignId}");

// Ad groups.

/// Creates an ad group; `campaignId` and `orgId` are injected.
pub const CREATE_ADGROUP: R = R::new("create_adgroup", Post, "campaigns/{campaignId}/adgroups")
	.body(Object)
	.inject(&[CAMPAIGN_ID, ORG_ID]);
/// Finds ad groups within a campaign.
pub const FIND_ADGROUPS: R =
	R::new("find_adgroups", Post, "campaigns/{campaignId}/adgroups/find").body(Selector);
/// Fetches one ad group.
pub const GET_ADGROUP: R = R::new("get_adgroup", Get, "campaigns/{campaignId}/adgroups/{adgroupId}");
/// Lists ad groups of a campaign.
pub const ALL_ADGROUPS: R = R::new("all_adgroups", Get, "campaigns/{campaignId}/adgroups");
/// Updates an ad group.
pub const UPDATE_ADGROUP: R =
	R::new("update_adgroup", Put, "campaigns/{campaignId}/adgroups/{adgroupId}").body(Object);
/// Deletes an ad group.
pub const DELETE_ADGROUP: R =
	R::new("delete_adgroup", Delete, "campaigns/{campaignId}/adgroups/{adgroupId}");

// Targeting keywords.

/// Creates targeting keywords in bulk.
pub const CREATE_TARGETING_KEYWORDS: R = R::new(
	"create_targeting_keywords",
	Post,
	"campaigns/{campaignId}/adgroups/{adgroupId}/targetingkeywords/bulk",
)
.body(Array);
/// Finds targeting keywords across a campaign's ad groups.
pub const FIND_TARGETING_KEYWORDS: R = R::new(
	"find_targeting_keywords",
	Post,
	"campaigns/{campaignId}/adgroups/targetingkeywords/find",
)
.body(Selector);
/// Fetches one targeting keyword.
pub const GET_TARGETING_KEYWORD: R = R::new(
	"get_targeting_keyword",
	Get,
	"campaigns/{campaignId}/adgroups/{adgroupId}/targetingkeywords/{keywordId}",
);
/// Lists targeting keywords of an ad group.
pub const ALL_TARGETING_KEYWORDS: R = R::new(
	"all_targeting_keywords",
	Get,
	"campaigns/{campaignId}/adgroups/{adgroupId}/targetingkeywords",
);
/// Updates targeting keywords in bulk.
pub const UPDATE_TARGETING_KEYWORDS: R = R::new(
	"update_targeting_keywords",
	Put,
	"campaigns/{campaignId}/adgroups/{adgroupId}/targetingkeywords/bulk",
)
.body(Array);

// Campaign negative keywords.

/// Creates campaign negative keywords in bulk.
pub const CREATE_NEGATIVE_KEYWORDS: R =
	R::new("create_negative_keywords", Post, "campaigns/{campaignId}/negativekeywords/bulk")
		.body(Array);
/// Finds campaign negative keywords.
pub const FIND_NEGATIVE_KEYWORDS: R =
	R::new("find_negative_keywords", Post, "campaigns/{campaignId}/negativekeywords/find")
		.body(Selector);
/// Fetches one campaign negative keyword.
pub const GET_NEGATIVE_KEYWORD: R =
	R::new("get_negative_keyword", Get, "campaigns/{campaignId}/negativekeywords/{keywordId}");
/// Lists campaign negative keywords.
pub const ALL_NEGATIVE_KEYWORDS: R =
	R::new("all_negative_keywords", Get, "campaigns/{campaignId}/negativekeywords");
/// Updates campaign negative keywords in bulk.
pub const UPDATE_NEGATIVE_KEYWORDS: R =
	R::new("update_negative_keywords", Put, "campaigns/{campaignId}/negativekeywords/bulk")
		.body(Array);
/// Deletes campaign negative keywords by identifier.
pub const DELETE_NEGATIVE_KEYWORDS: R = R::new(
	"delete_negative_keywords",
	Post,
	"campaigns/{campaignId}/negativekeywords/delete/bulk",
)
.body(Array);

// Ad group negative keywords.

/// Creates ad group negative keywords in bulk.
pub const CREATE_ADGROUP_NEGATIVE_KEYWORDS: R = R::new(
	"create_adgroup_negative_keywords",
	Post,
	"campaigns/{campaignId}/adgroups/{adgroupId}/negativekeywords/bulk",
)
.body(Array);
/// Finds ad group negative keywords across a campaign.
pub const FIND_ADGROUP_NEGATIVE_KEYWORDS: R = R::new(
	"find_adgroup_negative_keywords",
	Post,
	"campaigns/{campaignId}/adgroups/negativekeywords/find",
)
.body(Selector);
/// Fetches one ad group negative keyword.
pub const GET_ADGROUP_NEGATIVE_KEYWORD: R = R::new(
	"get_adgroup_negative_keyword",
	Get,
	"campaigns/{campaignId}/adgroups/{adgroupId}/negativekeywords/{keywordId}",
);
/// Lists ad group negative keywords.
pub const ALL_ADGROUP_NEGATIVE_KEYWORDS: R = R::new(
	"all_adgroup_negative_keywords",
	Get,
	"campaigns/{campaignId}/adgroups/{adgroupId}/negativekeywords",
);
/// Updates ad group negative keywords in bulk.
pub const UPDATE_ADGROUP_NEGATIVE_KEYWORDS: R = R::new(
	"update_adgroup_negative_keywords",
	Put,
	"campaigns/{campaignId}/adgroups/{adgroupId}/negativekeywords/bulk",
)
.body(Array);
/// Deletes ad group negative keywords by identifier.
pub const DELETE_ADGROUP_NEGATIVE_KEYWORDS: R = R::new(
	"delete_adgroup_negative_keywords",
	Post,
	"campaigns/{campaignId}/adgroups/{adgroupId}/negativekeywords/delete/bulk",
)
.body(Array);

// Geolocations.

/// Searches geolocations (`query`, optional `countrycode`, `entity`, `offset`, `limit`).
pub const SEARCH_GEOLOCATIONS: R =
	R::new("search_geolocations", Get, "search/geo").required_query(&["query"]);
/// Resolves geo identifiers; pages through query parameters while sending an array body.
pub const GET_GEOLOCATIONS: R = R::new("get_geolocations", Get, "search/geo").body(Array);

// Creative sets.

/// Fetches an app's creative assets.
pub const GET_CREATIVE_APP_ASSETS: R =
	R::new("get_creative_app_assets", Get, "creativeappassets/{adamId}").body(Object);
/// Lists device sizes and display names for creative sets.
pub const GET_CREATIVE_APP_MAPPINGS_DEVICES: R =
	R::new("get_creative_app_mappings_devices", Get, "creativeappmappings/devices");
/// Creates a creative set and assigns it to an ad group.
pub const CREATE_ADGROUP_CREATIVE_SETS: R = R::new(
	"create_adgroup_creative_sets",
	Post,
	"campaigns/{campaignId}/adgroups/{adgroupId}/adgroupcreativesets/creativesets",
)
.body(Object);
/// Finds ad group creative sets within a campaign.
pub const FIND_ADGROUP_CREATIVE_SETS: R =
	R::new("find_adgroup_creative_sets", Post, "campaigns/{campaignId}/adgroupcreativesets/find")
		.body(Object);
/// Updates an ad group creative set.
pub const UPDATE_ADGROUP_CREATIVE_SET: R = R::new(
	"update_adgroup_creative_set",
	Put,
	"campaigns/{campaignId}/adgroups/{adgroupId}/adgroupcreativesets/{adGroupCreativeSetId}",
)
.body(Object);
/// Deletes ad group creative sets by identifier.
pub const DELETE_ADGROUP_CREATIVE_SETS: R = R::new(
	"delete_adgroup_creative_sets",
	Post,
	"campaigns/{campaignId}/adgroups/{adgroupId}/adgroupcreativesets/delete/bulk",
)
.body(Array);
/// Fetches a creative set and its ad variations (`includeDeletedCreativeSetAssets`).
pub const GET_CREATIVE_SET: R = R::new("get_creative_set", Get, "creativesets/{creativeSetId}");
/// Finds creative sets.
pub const FIND_CREATIVE_SETS: R = R::new("find_creative_sets", Post, "creativesets/find").body(Object);
/// Assigns an existing creative set to an ad group.
pub const ASSIGN_CREATIVE_SET: R = R::new(
	"assign_creative_set",
	Post,
	"campaigns/{campaignId}/adgroups/{adgroupId}/adgroupcreativesets",
)
.body(Object);
/// Updates a creative set.
pub const UPDATE_CREATIVE_SET: R =
	R::new("update_creative_set", Put, "creativesets/{creativeSetId}").body(Object);

// Reports.

/// Campaign-level report.
pub const CAMPAIGN_REPORT: R = R::new("campaign_report", Post, "reports/campaigns").body(Report);
/// Ad group-level report.
pub const ADGROUP_REPORT: R =
	R::new("adgroup_report", Post, "reports/campaigns/{campaignId}/adgroups").body(Report);
/// Keyword-level report.
pub const KEYWORD_REPORT: R =
	R::new("keyword_report", Post, "reports/campaigns/{campaignId}/keywords").body(Report);
/// Search term-level report.
pub const SEARCH_TERM_REPORT: R =
	R::new("search_term_report", Post, "reports/campaigns/{campaignId}/searchterms").body(Report);
/// Creative set-level report.
pub const CREATIVE_SET_REPORT: R =
	R::new("creative_set_report", Post, "reports/campaigns/{campaignId}/creativesets").body(Report);

/// Every descriptor in the catalog.
pub const ALL: &[R] = &[
	ACLS,
	SEARCH_APPS,
	CREATE_CAMPAIGN,
	FIND_CAMPAIGNS,
	GET_CAMPAIGN,
	ALL_CAMPAIGNS,
	UPDATE_CAMPAIGN,
	DELETE_CAMPAIGN,
	CREATE_ADGROUP,
	FIND_ADGROUPS,
	GET_ADGROUP,
	ALL_ADGROUPS,
	UPDATE_ADGROUP,
	DELETE_ADGROUP,
	CREATE_TARGETING_KEYWORDS,
	FIND_TARGETING_KEYWORDS,
	GET_TARGETING_KEYWORD,
	ALL_TARGETING_KEYWORDS,
	UPDATE_TARGETING_KEYWORDS,
	CREATE_NEGATIVE_KEYWORDS,
	FIND_NEGATIVE_KEYWORDS,
	GET_NEGATIVE_KEYWORD,
	ALL_NEGATIVE_KEYWORDS,
	UPDATE_NEGATIVE_KEYWORDS,
	DELETE_NEGATIVE_KEYWORDS,
	CREATE_ADGROUP_NEGATIVE_KEYWORDS,
	FIND_ADGROUP_NEGATIVE_KEYWORDS,
	GET_ADGROUP_NEGATIVE_KEYWORD,
	ALL_ADGROUP_NEGATIVE_KEYWORDS,
	UPDATE_ADGROUP_NEGATIVE_KEYWORDS,
	DELETE_ADGROUP_NEGATIVE_KEYWORDS,
	SEARCH_GEOLOCATIONS,
	GET_GEOLOCATIONS,
	GET_CREATIVE_APP_ASSETS,
	GET_CREATIVE_APP_MAPPINGS_DEVICES,
	CREATE_ADGROUP_CREATIVE_SETS,
	FIND_ADGROUP_CREATIVE_SETS,
	UPDATE_ADGROUP_CREATIVE_SET,
	DELETE_ADGROUP_CREATIVE_SETS,
	GET_CREATIVE_SET,
	FIND_CREATIVE_SETS,
	ASSIGN_CREATIVE_SET,
	UPDATE_CREATIVE_SET,
	CAMPAIGN_REPORT,
	ADGROUP_REPORT,
	KEYWORD_REPORT,
	SEARCH_TERM_REPORT,
	CREATIVE_SET_REPORT,
];

/// Looks up a descriptor by name.
pub fn find(name: &str) -> Option<&'static R> {
	ALL.iter().find(|descriptor| descriptor.name == name)
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashSet;
	// self
	use super::*;

	#[test]
	fn names_are_unique_and_resolvable() {
		let names = ALL.iter().map(|descriptor| descriptor.name).collect::<HashSet<_>>();

		assert_eq!(names.len(), ALL.len());

		for descriptor in ALL {
			assert_eq!(find(descriptor.name), Some(descriptor));
		}

		assert!(find("unknown").is_none());
	}

	#[test]
	fn templates_are_relative_and_well_formed() {
		for descriptor in ALL {
			assert!(!descriptor.path.starts_with('/'), "{descriptor} must be relative.");

			for parameter in descriptor.path_parameters() {
				assert!(!parameter.is_empty() && !parameter.contains(['{', '}']));
			}
		}
	}

	#[test]
	fn find_and_bulk_endpoints_declare_bodies() {
		for descriptor in ALL {
			if descriptor.path.ends_with("/bulk") {
				assert_eq!(descriptor.body, Array, "{descriptor} is a bulk endpoint.");
			}
			if descriptor.path.starts_with("reports/") {
				assert_eq!(descriptor.body, Report, "{descriptor} is a report endpoint.");
			}
		}
	}
}

//! Report streams
//!
//! Every catalog entry is a report: a named set of dimensions and metrics
//! requested together. Premade reports mirror the standard reports of the
//! Analytics UI; custom reports come from the `report_definitions` config.

use crate::api::FilterExpression;
use crate::config::ReportDefinition;

/// A report stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Stable stream id
    pub id: String,
    /// Stream name
    pub name: String,
    /// Shipped with the tap rather than configured
    pub is_premade: bool,
    /// Dimension API names selected by default
    pub dimensions: Vec<String>,
    /// Metric API names selected by default
    pub metrics: Vec<String>,
}

impl Report {
    /// Build the stream for a configured report
    pub fn custom(definition: &ReportDefinition) -> Self {
        Self {
            id: definition.id.clone(),
            name: definition.name.clone(),
            is_premade: false,
            dimensions: definition.dimensions.clone(),
            metrics: definition.metrics.clone(),
        }
    }

    /// Row filter sent with every request for this report
    pub fn row_filter(&self) -> Option<FilterExpression> {
        if self.is_premade {
            premade_filter(&self.id)
        } else {
            None
        }
    }
}

/// All premade reports followed by the configured ones
pub fn all_reports(definitions: &[ReportDefinition]) -> Vec<Report> {
    premade_reports()
        .into_iter()
        .chain(definitions.iter().map(Report::custom))
        .collect()
}

/// The premade reports, in table order
pub fn premade_reports() -> Vec<Report> {
    PREMADE_REPORTS
        .iter()
        .map(|p| Report {
            id: p.id.to_string(),
            name: p.id.to_string(),
            is_premade: true,
            dimensions: p.dimensions.iter().map(|d| (*d).to_string()).collect(),
            metrics: p.metrics.iter().map(|m| (*m).to_string()).collect(),
        })
        .collect()
}

/// Whether `id` names a premade report
pub fn is_premade_id(id: &str) -> bool {
    PREMADE_REPORTS.iter().any(|p| p.id == id)
}

/// Hard-coded row filter of a premade report
pub fn premade_filter(report_id: &str) -> Option<FilterExpression> {
    match report_id {
        "conversions_report" => Some(FilterExpression::string_equals(
            "isConversionEvent",
            "true",
        )),
        "in_app_purchases" => Some(FilterExpression::string_equals(
            "eventName",
            "in_app_purchase",
        )),
        _ => None,
    }
}

// ============================================================================
// Premade report table
// ============================================================================

struct PremadeReport {
    id: &'static str,
    dimensions: &'static [&'static str],
    metrics: &'static [&'static str],
}

const ACQUISITION_METRICS: &[&str] = &[
    "newUsers",
    "engagedSessions",
    "engagementRate",
    "eventCount",
    "conversions",
    "totalRevenue",
    "totalUsers",
    "userEngagementDuration",
];

const TRAFFIC_METRICS: &[&str] = &[
    "totalUsers",
    "sessions",
    "engagedSessions",
    "eventsPerSession",
    "engagementRate",
    "eventCount",
    "conversions",
    "totalRevenue",
    "userEngagementDuration",
];

const AUDIENCE_METRICS: &[&str] = &[
    "totalUsers",
    "newUsers",
    "engagedSessions",
    "engagementRate",
    "conversions",
    "eventCount",
    "totalRevenue",
    "userEngagementDuration",
];

const PAGE_METRICS: &[&str] = &[
    "screenPageViews",
    "totalUsers",
    "newUsers",
    "eventCount",
    "conversions",
    "totalRevenue",
    "userEngagementDuration",
];

const ITEM_METRICS: &[&str] = &[
    "itemsViewed",
    "itemsAddedToCart",
    "itemsPurchased",
    "itemRevenue",
];

const AD_METRICS: &[&str] = &[
    "publisherAdImpressions",
    "adUnitExposure",
    "publisherAdClicks",
    "totalAdRevenue",
];

const PREMADE_REPORTS: &[PremadeReport] = &[
    PremadeReport {
        id: "content_group_report",
        dimensions: &["date", "contentGroup"],
        metrics: PAGE_METRICS,
    },
    PremadeReport {
        id: "conversions_report",
        dimensions: &["date", "eventName"],
        metrics: &["conversions", "totalUsers", "totalRevenue"],
    },
    PremadeReport {
        id: "demographic_age_report",
        dimensions: &["date", "userAgeBracket"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "demographic_country_report",
        dimensions: &["date", "country"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "demographic_city_report",
        dimensions: &["date", "city"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "demographic_gender_report",
        dimensions: &["date", "userGender"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "demographic_interest_report",
        dimensions: &["date", "brandingInterest"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "demographic_language_report",
        dimensions: &["date", "language"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "demographic_region_report",
        dimensions: &["date", "region"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "ecommerce_purchases_item_brand_report",
        dimensions: &["date", "itemBrand"],
        metrics: ITEM_METRICS,
    },
    PremadeReport {
        id: "ecommerce_purchases_item_category_report",
        dimensions: &["date", "itemCategory"],
        metrics: ITEM_METRICS,
    },
    PremadeReport {
        id: "ecommerce_purchases_item_id_report",
        dimensions: &["date", "itemId"],
        metrics: ITEM_METRICS,
    },
    PremadeReport {
        id: "ecommerce_purchases_item_name_report",
        dimensions: &["date", "itemName"],
        metrics: ITEM_METRICS,
    },
    PremadeReport {
        id: "events_report",
        dimensions: &["date", "eventName"],
        metrics: &["eventCount", "totalUsers", "eventCountPerUser", "totalRevenue"],
    },
    PremadeReport {
        id: "in_app_purchases",
        dimensions: &["date", "streamId", "itemId"],
        metrics: &["itemsPurchased", "itemRevenue"],
    },
    PremadeReport {
        id: "landing_page_report",
        dimensions: &["date", "landingPage"],
        metrics: &[
            "sessions",
            "totalUsers",
            "newUsers",
            "userEngagementDuration",
            "conversions",
            "totalRevenue",
        ],
    },
    PremadeReport {
        id: "pages_path_report",
        dimensions: &["date", "pagePath"],
        metrics: PAGE_METRICS,
    },
    PremadeReport {
        id: "pages_title_and_screen_class_report",
        dimensions: &["date", "unifiedScreenClass"],
        metrics: PAGE_METRICS,
    },
    PremadeReport {
        id: "pages_title_and_screen_name_report",
        dimensions: &["date", "unifiedScreenName"],
        metrics: PAGE_METRICS,
    },
    PremadeReport {
        id: "publisher_ads_ad_format_report",
        dimensions: &["date", "adFormat"],
        metrics: AD_METRICS,
    },
    PremadeReport {
        id: "publisher_ads_ad_source_report",
        dimensions: &["date", "adSourceName"],
        metrics: AD_METRICS,
    },
    PremadeReport {
        id: "publisher_ads_ad_unit_report",
        dimensions: &["date", "adUnitName"],
        metrics: AD_METRICS,
    },
    PremadeReport {
        id: "publisher_ads_page_path_report",
        dimensions: &["date", "pagePath"],
        metrics: AD_METRICS,
    },
    PremadeReport {
        id: "tech_app_version_report",
        dimensions: &["date", "appVersion"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "tech_browser_report",
        dimensions: &["date", "browser"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "tech_device_category_report",
        dimensions: &["date", "deviceCategory"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "tech_device_model_report",
        dimensions: &["date", "deviceModel"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "tech_operating_system_report",
        dimensions: &["date", "operatingSystem"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "tech_os_with_version_report",
        dimensions: &["date", "operatingSystemWithVersion"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "tech_platform_report",
        dimensions: &["date", "platform"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "tech_platform_device_category_report",
        dimensions: &["date", "platformDeviceCategory"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "tech_screen_resolution_report",
        dimensions: &["date", "screenResolution"],
        metrics: AUDIENCE_METRICS,
    },
    PremadeReport {
        id: "traffic_acquisition_session_campaign_report",
        dimensions: &["date", "sessionCampaignName"],
        metrics: TRAFFIC_METRICS,
    },
    PremadeReport {
        id: "traffic_acquisition_session_default_channel_grouping_report",
        dimensions: &["date", "sessionDefaultChannelGrouping"],
        metrics: TRAFFIC_METRICS,
    },
    PremadeReport {
        id: "traffic_acquisition_session_medium_report",
        dimensions: &["date", "sessionMedium"],
        metrics: TRAFFIC_METRICS,
    },
    PremadeReport {
        id: "traffic_acquisition_session_source_medium_report",
        dimensions: &["date", "sessionSourceMedium"],
        metrics: TRAFFIC_METRICS,
    },
    PremadeReport {
        id: "traffic_acquisition_session_source_platform_report",
        dimensions: &["date", "sessionSourcePlatform"],
        metrics: TRAFFIC_METRICS,
    },
    PremadeReport {
        id: "traffic_acquisition_session_source_report",
        dimensions: &["date", "sessionSource"],
        metrics: TRAFFIC_METRICS,
    },
    PremadeReport {
        id: "user_acquisition_first_user_campaign_report",
        dimensions: &["date", "firstUserCampaignName"],
        metrics: ACQUISITION_METRICS,
    },
    PremadeReport {
        id: "user_acquisition_first_user_default_channel_grouping_report",
        dimensions: &["date", "firstUserDefaultChannelGrouping"],
        metrics: ACQUISITION_METRICS,
    },
    PremadeReport {
        id: "user_acquisition_first_user_medium_report",
        dimensions: &["date", "firstUserMedium"],
        metrics: ACQUISITION_METRICS,
    },
    PremadeReport {
        id: "user_acquisition_first_user_source_medium_report",
        dimensions: &["date", "firstUserSourceMedium"],
        metrics: ACQUISITION_METRICS,
    },
    PremadeReport {
        id: "user_acquisition_first_user_source_platform_report",
        dimensions: &["date", "firstUserSourcePlatform"],
        metrics: ACQUISITION_METRICS,
    },
    PremadeReport {
        id: "user_acquisition_first_user_source_report",
        dimensions: &["date", "firstUserSource"],
        metrics: ACQUISITION_METRICS,
    },
];

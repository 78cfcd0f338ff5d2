//! Report request bodies (`reports/campaigns`, ad-group, keyword, search-term, and
//! creative-set level reports).

// crates.io
use time::Date;
// self
use crate::{
	_prelude::*,
	selector::{Selector, SelectorError},
};

/// Wire names of the fields [`ReportRequest`] models itself.
const MODELLED_FIELDS: [&str; 9] = [
	"startTime",
	"endTime",
	"selector",
	"groupBy",
	"timeZone",
	"granularity",
	"returnRecordsWithNoMetrics",
	"returnRowTotals",
	"returnGrandTotals",
];

/// Time zone in which report days are bucketed.
pub mod time_zone {
	/// Coordinated Universal Time.
	pub const UTC: &str = "UTC";
	/// The organization's configured time zone.
	pub const ORTZ: &str = "ORTZ";
}

/// Body of a report request.
///
/// Provider fields not modelled here can be added with [`ReportRequest::extra`]; they are
/// flattened into the top-level object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
	/// First day of the report, `YYYY-MM-DD`.
	pub start_time: String,
	/// Last day of the report, `YYYY-MM-DD`.
	pub end_time: String,
	/// Pagination, ordering, and filters applied to report rows.
	pub selector: Selector,
	/// Dimensions to group rows by, e.g. `countryOrRegion`.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub group_by: Vec<String>,
	/// Time zone, `UTC` or `ORTZ`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub time_zone: Option<String>,
	/// Row granularity, e.g. `DAILY`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub granularity: Option<String>,
	/// Include rows without metrics.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub return_records_with_no_metrics: Option<bool>,
	/// Include per-row totals.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub return_row_totals: Option<bool>,
	/// Include grand totals.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub return_grand_totals: Option<bool>,
	#[serde(flatten)]
	extra: serde_json::Map<String, Value>,
}
impl ReportRequest {
	/// Creates a report request over a date range expressed as strings.
	pub fn new(start: impl Into<String>, end: impl Into<String>, selector: Selector) -> Self {
		Self {
			start_time: start.into(),
			end_time: end.into(),
			selector,
			group_by: Vec::new(),
			time_zone: None,
			granularity: None,
			return_records_with_no_metrics: None,
			return_row_totals: None,
			return_grand_totals: None,
			extra: serde_json::Map::new(),
		}
	}

	/// Creates a report request over an inclusive calendar date range.
	pub fn between(start: Date, end: Date, selector: Selector) -> Self {
		Self::new(start.to_string(), end.to_string(), selector)
	}

	/// Adds a grouping dimension.
	pub fn group_by(mut self, dimension: impl Into<String>) -> Self {
		self.group_by.push(dimension.into());

		self
	}

	/// Sets the time zone.
	pub fn time_zone(mut self, zone: impl Into<String>) -> Self {
		self.time_zone = Some(zone.into());

		self
	}

	/// Sets the row granularity.
	pub fn granularity(mut self, granularity: impl Into<String>) -> Self {
		self.granularity = Some(granularity.into());

		self
	}

	/// Requests rows without metrics, row totals, and grand totals.
	pub fn with_totals(mut self, no_metrics: bool, row_totals: bool, grand_totals: bool) -> Self {
		self.return_records_with_no_metrics = Some(no_metrics);
		self.return_row_totals = Some(row_totals);
		self.return_grand_totals = Some(grand_totals);

		self
	}

	/// Adds a provider field not modelled by this type.
	///
	/// Keys naming a modelled field are rejected; set those through their own builder.
	pub fn extra(mut self, key: impl Into<String>, value: Value) -> Result<Self, SelectorError> {
		let key = key.into();

		if MODELLED_FIELDS.contains(&key.as_str()) {
			return Err(SelectorError::ModelledReportField { key });
		}

		self.extra.insert(key, value);

		Ok(self)
	}

	/// Provider fields added with [`ReportRequest::extra`].
	pub fn extras(&self) -> &serde_json::Map<String, Value> {
		&self.extra
	}
}

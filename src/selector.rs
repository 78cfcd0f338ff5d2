//! Selector payloads shared by every `find` and report endpoint.
//!
//! A [`Selector`] combines pagination, sort order, and filter conditions. Field names,
//! sort orders, and operators are provider-defined strings passed through untouched so
//! new provider vocabulary works without a crate release; the constants in [`operator`]
//! and [`sort_order`] are conveniences, not a closed set.

pub mod report;

pub use report::*;

// self
use crate::_prelude::*;

/// Well-known condition operators.
pub mod operator {
	/// Value equals the single supplied value.
	pub const EQUALS: &str = "EQUALS";
	/// Value is one of the supplied values.
	pub const IN: &str = "IN";
	/// Value is less than the supplied value.
	pub const LESS_THAN: &str = "LESS_THAN";
	/// Value is greater than the supplied value.
	pub const GREATER_THAN: &str = "GREATER_THAN";
	/// Value starts with the supplied value.
	pub const STARTSWITH: &str = "STARTSWITH";
	/// Value contains the supplied value.
	pub const CONTAINS: &str = "CONTAINS";
	/// List value contains every supplied value.
	pub const CONTAINS_ALL: &str = "CONTAINS_ALL";
	/// List value contains at least one supplied value.
	pub const CONTAINS_ANY: &str = "CONTAINS_ANY";
	/// Value lies between the two supplied values.
	pub const BETWEEN: &str = "BETWEEN";
	/// Value does not contain the supplied value.
	pub const NOT_CONTAINS: &str = "NOT_CONTAINS";
}

/// Well-known sort orders.
pub mod sort_order {
	/// Ascending order.
	pub const ASCENDING: &str = "ASCENDING";
	/// Descending order.
	pub const DESCENDING: &str = "DESCENDING";
}

/// Errors raised while building selectors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SelectorError {
	/// Page size must be at least one.
	#[error("Selector limit must be a positive integer.")]
	NonPositiveLimit,
	/// Extra report field would duplicate a modelled one.
	#[error("Report field `{key}` is modelled; set it through its own builder.")]
	ModelledReportField {
		/// Offending key.
		key: String,
	},
}

/// Page window of a selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
	/// Zero-based index of the first record.
	pub offset: u32,
	/// Maximum number of records returned.
	pub limit: u32,
}
impl Pagination {
	/// Creates a page window; `limit` must be positive.
	pub fn new(offset: u32, limit: u32) -> Result<Self, SelectorError> {
		if limit == 0 {
			return Err(SelectorError::NonPositiveLimit);
		}

		Ok(Self { offset, limit })
	}
}

/// One sort key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
	/// Field to sort by.
	pub field: String,
	/// Sort direction, e.g. `ASCENDING`.
	pub sort_order: String,
}
impl OrderBy {
	/// Creates a sort key with an arbitrary sort order.
	pub fn new(field: impl Into<String>, sort_order: impl Into<String>) -> Self {
		Self { field: field.into(), sort_order: sort_order.into() }
	}

	/// Ascending sort key.
	pub fn ascending(field: impl Into<String>) -> Self {
		Self::new(field, sort_order::ASCENDING)
	}

	/// Descending sort key.
	pub fn descending(field: impl Into<String>) -> Self {
		Self::new(field, sort_order::DESCENDING)
	}
}

/// One filter condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
	/// Field to filter on.
	pub field: String,
	/// Operator, e.g. `CONTAINS_ANY`.
	pub operator: String,
	/// Operand values.
	pub values: Vec<String>,
}
impl Condition {
	/// Creates a condition.
	pub fn new<I, V>(field: impl Into<String>, operator: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<String>,
	{
		Self {
			field: field.into(),
			operator: operator.into(),
			values: values.into_iter().map(Into::into).collect(),
		}
	}
}

/// Pagination, ordering, and filtering payload of `find` and report endpoints.
///
/// Serializes as `{"pagination":{..},"orderBy":[..],"conditions":[..]}`; both lists are
/// always present, empty when unset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
	/// Page window.
	pub pagination: Pagination,
	/// Sort keys, applied in order.
	#[serde(default)]
	pub order_by: Vec<OrderBy>,
	/// Filter conditions, combined with AND.
	#[serde(default)]
	pub conditions: Vec<Condition>,
}
impl Selector {
	/// Creates a selector for `pagination` with no ordering or conditions.
	pub fn new(pagination: Pagination) -> Self {
		Self { pagination, order_by: Vec::new(), conditions: Vec::new() }
	}

	/// Builds a selector from its four parts.
	///
	/// Each call allocates its own lists, so selectors never share defaults.
	pub fn build<O, C>(
		offset: u32,
		limit: u32,
		order_by: O,
		conditions: C,
	) -> Result<Self, SelectorError>
	where
		O: IntoIterator<Item = OrderBy>,
		C: IntoIterator<Item = Condition>,
	{
		Ok(Self {
			pagination: Pagination::new(offset, limit)?,
			order_by: order_by.into_iter().collect(),
			conditions: conditions.into_iter().collect(),
		})
	}

	/// Appends a sort key.
	pub fn order_by(mut self, order: OrderBy) -> Self {
		self.order_by.push(order);

		self
	}

	/// Appends a condition.
	pub fn condition(mut self, condition: Condition) -> Self {
		self.conditions.push(condition);

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_selector_matches_wire_shape() {
		let selector = Selector::build(0, 100, [], []).expect("Positive limit should build.");

		assert_eq!(
			serde_json::to_string(&selector).expect("Selector should serialize."),
			r#"{"pagination":{"offset":0,"limit":100},"orderBy":[],"conditions":[]}"#
		);
	}

	#[test]
	fn build_is_idempotent_and_unshared() {
		let order = || [OrderBy::ascending("id")];
		let conditions =
			|| [Condition::new("countriesOrRegions", operator::CONTAINS_ALL, ["US", "CA"])];
		let first = Selector::build(5, 20, order(), conditions()).expect("Selector should build.");
		let second = Selector::build(5, 20, order(), conditions()).expect("Selector should build.");

		assert_eq!(first, second);

		let mut third = Selector::build(0, 1, [], []).expect("Selector should build.");
		let fourth = Selector::build(0, 1, [], []).expect("Selector should build.");

		third.order_by.push(OrderBy::descending("name"));

		assert!(fourth.order_by.is_empty());
	}

	#[test]
	fn zero_limit_is_rejected() {
		assert_eq!(Selector::build(0, 0, [], []), Err(SelectorError::NonPositiveLimit));
	}

	#[test]
	fn fluent_builder_serializes_camel_case() {
		let selector = Selector::new(Pagination::new(0, 1000).expect("Limit should be valid."))
			.order_by(OrderBy::ascending("id"))
			.condition(Condition::new("status", operator::EQUALS, ["ENABLED"]));
		let value = serde_json::to_value(&selector).expect("Selector should serialize.");

		assert_eq!(value["orderBy"][0]["sortOrder"], "ASCENDING");
		assert_eq!(value["conditions"][0]["values"][0], "ENABLED");
	}

	#[test]
	fn missing_lists_deserialize_as_empty() {
		let selector: Selector = serde_json::from_str(r#"{"pagination":{"offset":0,"limit":10}}"#)
			.expect("Selector without lists should deserialize.");

		assert!(selector.order_by.is_empty());
		assert!(selector.conditions.is_empty());
	}
}

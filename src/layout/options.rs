use std::collections::HashMap;

/// Pixel distance between consecutive levels.
pub const LEVEL_SPACING: f64 = 250.0;
/// Pixel distance between consecutive rows.
pub const ROW_SPACING: f64 = 150.0;
/// Row distance between siblings sharing a category and level.
pub const ROW_UNIT: f64 = 0.5;
/// Horizontal distance between auto-placed category columns.
pub const CATEGORY_SPAN: f64 = 1000.0;
/// Max absolute jitter applied to each axis.
pub const JITTER: f64 = 20.0;

/// Axis along which categories are separated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LaneAxis {
	/// Categories sit side by side as columns; offsets are in pixels along X
	/// and levels are computed within each category.
	X,
	/// Categories are stacked as horizontal lanes; offsets are row numbers.
	#[default]
	Y,
}

/// What to do with nodes that a cycle keeps from being leveled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CyclePolicy {
	/// Place them at level 0.
	#[default]
	Lenient,
	/// Fail `try_layout_graph` with [`super::LayoutError::Cycle`].
	Reject,
}

/// Knobs for [`super::layout_graph`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
	pub lane_axis: LaneAxis,
	/// Row offset (Y lanes) or pixel offset (X lanes) per category.
	pub category_offsets: HashMap<String, f64>,
	pub level_spacing: f64,
	pub row_spacing: f64,
	pub row_unit: f64,
	pub category_span: f64,
	pub jitter: f64,
	pub cycle_policy: CyclePolicy,
}

impl Default for LayoutOptions {
	fn default() -> Self {
		Self {
			lane_axis: LaneAxis::Y,
			category_offsets: [("Math", 0.0), ("AI", -2.0), ("Music", 2.0)]
				.into_iter()
				.map(|(k, v)| (k.to_string(), v))
				.collect(),
			level_spacing: LEVEL_SPACING,
			row_spacing: ROW_SPACING,
			row_unit: ROW_UNIT,
			category_span: CATEGORY_SPAN,
			jitter: JITTER,
			cycle_policy: CyclePolicy::Lenient,
		}
	}
}

impl LayoutOptions {
	/// Column variant: each category gets its own X band and its own leveling.
	pub fn columns() -> Self {
		Self {
			lane_axis: LaneAxis::X,
			category_offsets: HashMap::new(),
			..Self::default()
		}
	}

	pub fn with_lane_axis(mut self, axis: LaneAxis) -> Self {
		self.lane_axis = axis;
		self
	}

	pub fn with_category_offset(mut self, category: impl Into<String>, offset: f64) -> Self {
		self.category_offsets.insert(category.into(), offset);
		self
	}

	pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
		self.cycle_policy = policy;
		self
	}

	pub fn with_jitter(mut self, jitter: f64) -> Self {
		self.jitter = jitter;
		self
	}

	/// Table offset for a category, 0 when absent.
	pub fn category_offset(&self, category: &str) -> f64 {
		self.category_offsets.get(category).copied().unwrap_or(0.0)
	}
}

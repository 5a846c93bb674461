//! Turns a node/edge set into 2D coordinates for the knowledge graph canvas.
//!
//! Levels run along X (longest prerequisite chain from any source), rows along
//! Y (category lanes, siblings fanned out). Each node also gets a jitter offset
//! and phase for the floating animation; those come from the caller's RNG and
//! are the only non-deterministic part of the result.

mod levels;
mod options;
mod rows;

use std::f64::consts::TAU;

use log::{debug, warn};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::model::{Edge, Node, NodeStatus};

pub use levels::{Levels, calculate_levels, calculate_levels_in, calculate_levels_per_category};
pub use options::{
	CATEGORY_SPAN, CyclePolicy, JITTER, LEVEL_SPACING, LaneAxis, LayoutOptions, ROW_SPACING,
	ROW_UNIT,
};
pub use rows::calculate_rows;

/// Radius used for completed nodes.
pub const COMPLETED_SIZE: f64 = 40.0;
/// Radius used for every other node.
pub const DEFAULT_SIZE: f64 = 30.0;

/// Raised only by [`try_layout_graph`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
	#[error("cycle prevents leveling of {} node(s): {}", .nodes.len(), .nodes.join(", "))]
	Cycle { nodes: Vec<String> },
}

/// A node with its layout attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
	#[serde(flatten)]
	pub node: Node,
	pub level: usize,
	pub row: f64,
	pub base_x: f64,
	pub base_y: f64,
	pub noise_x: f64,
	pub noise_y: f64,
	pub phase: f64,
	pub size: f64,
}

impl PositionedNode {
	pub fn id(&self) -> &str {
		&self.node.id
	}

	/// Where to draw the node at animation time `time` (seconds).
	pub fn float_position(&self, time: f64, amplitude: f64) -> (f64, f64) {
		let t = time + self.phase;
		(
			self.base_x + self.noise_x + t.sin() * amplitude,
			self.base_y + self.noise_y + t.cos() * amplitude,
		)
	}
}

/// Size for a status: completed nodes render larger.
pub fn size_for_status(status: NodeStatus) -> f64 {
	match status {
		NodeStatus::Completed => COMPLETED_SIZE,
		NodeStatus::Locked | NodeStatus::Unlocked => DEFAULT_SIZE,
	}
}

/// Lays out `nodes`, one result per input node in input order.
///
/// Never fails: nodes a cycle keeps from being leveled stay at level 0 and
/// are logged.
pub fn layout_graph<R: Rng + ?Sized>(
	nodes: &[Node],
	edges: &[Edge],
	options: &LayoutOptions,
	rng: &mut R,
) -> Vec<PositionedNode> {
	let levels = compute_levels(nodes, edges, options);
	if !levels.unresolved().is_empty() {
		warn!(
			"{} node(s) caught in a cycle, placed at fallback level: {:?}",
			levels.unresolved().len(),
			levels.unresolved()
		);
	}
	assemble(nodes, &levels, options, rng)
}

/// Like [`layout_graph`], but honours [`CyclePolicy::Reject`].
pub fn try_layout_graph<R: Rng + ?Sized>(
	nodes: &[Node],
	edges: &[Edge],
	options: &LayoutOptions,
	rng: &mut R,
) -> Result<Vec<PositionedNode>, LayoutError> {
	let levels = compute_levels(nodes, edges, options);
	if !levels.unresolved().is_empty() {
		match options.cycle_policy {
			CyclePolicy::Reject => {
				return Err(LayoutError::Cycle {
					nodes: levels.unresolved().to_vec(),
				});
			}
			CyclePolicy::Lenient => warn!(
				"{} node(s) caught in a cycle, placed at fallback level: {:?}",
				levels.unresolved().len(),
				levels.unresolved()
			),
		}
	}
	Ok(assemble(nodes, &levels, options, rng))
}

fn compute_levels(nodes: &[Node], edges: &[Edge], options: &LayoutOptions) -> Levels {
	debug!(
		"laying out {} nodes, {} edges ({:?} lanes)",
		nodes.len(),
		edges.len(),
		options.lane_axis
	);
	match options.lane_axis {
		LaneAxis::Y => calculate_levels(nodes, edges),
		LaneAxis::X => calculate_levels_per_category(nodes, edges),
	}
}

fn assemble<R: Rng + ?Sized>(
	nodes: &[Node],
	levels: &Levels,
	options: &LayoutOptions,
	rng: &mut R,
) -> Vec<PositionedNode> {
	let rows = calculate_rows(nodes, levels, options);
	let column_offsets = column_offsets(nodes, options);

	nodes
		.iter()
		.map(|node| {
			let level = levels.get(&node.id);
			let row = rows.get(&node.id).copied().unwrap_or(0.0);
			let column = match options.lane_axis {
				LaneAxis::X => column_offsets
					.iter()
					.find(|(c, _)| *c == node.category)
					.map(|(_, x)| *x)
					.unwrap_or(0.0),
				LaneAxis::Y => 0.0,
			};

			PositionedNode {
				level,
				row,
				base_x: level as f64 * options.level_spacing + column,
				base_y: row * options.row_spacing,
				noise_x: jitter(rng, options.jitter),
				noise_y: jitter(rng, options.jitter),
				phase: rng.gen_range(0.0..TAU),
				size: size_for_status(node.status),
				node: node.clone(),
			}
		})
		.collect()
}

/// X offset per category for column lanes: table value, else side by side in
/// first-appearance order.
fn column_offsets<'a>(nodes: &'a [Node], options: &LayoutOptions) -> Vec<(&'a str, f64)> {
	let mut out: Vec<(&str, f64)> = Vec::new();
	if options.lane_axis != LaneAxis::X {
		return out;
	}
	for node in nodes {
		if out.iter().any(|(c, _)| *c == node.category) {
			continue;
		}
		let x = options
			.category_offsets
			.get(&node.category)
			.copied()
			.unwrap_or(out.len() as f64 * options.category_span);
		out.push((&node.category, x));
	}
	out
}

/// Uniform in `[-amount, amount)`; 0 for non-positive or non-finite amounts.
fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f64) -> f64 {
	if amount.is_finite() && amount > 0.0 {
		// scale a unit sample so huge amounts cannot overflow the range width
		rng.gen_range(-1.0..1.0) * amount
	} else {
		0.0
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn completed_nodes_are_larger() {
		let nodes = vec![
			Node::new("done", "Math").with_status(NodeStatus::Completed),
			Node::new("open", "Math").with_status(NodeStatus::Unlocked),
		];
		let out = layout_graph(&nodes, &[], &LayoutOptions::default(), &mut StdRng::seed_from_u64(1));
		assert_eq!(out[0].size, COMPLETED_SIZE);
		assert_eq!(out[1].size, DEFAULT_SIZE);
	}

	#[test]
	fn jitter_and_phase_stay_in_range() {
		let nodes: Vec<Node> = (0..50).map(|i| Node::new(i.to_string(), "AI")).collect();
		let out = layout_graph(&nodes, &[], &LayoutOptions::default(), &mut StdRng::seed_from_u64(7));
		for p in &out {
			assert!((-JITTER..JITTER).contains(&p.noise_x));
			assert!((-JITTER..JITTER).contains(&p.noise_y));
			assert!((0.0..TAU).contains(&p.phase));
		}
	}

	#[test]
	fn zero_jitter_pins_nodes_to_base() {
		let nodes = vec![Node::new("a", "Math")];
		let options = LayoutOptions::default().with_jitter(0.0);
		let out = layout_graph(&nodes, &[], &options, &mut StdRng::seed_from_u64(3));
		assert_eq!((out[0].noise_x, out[0].noise_y), (0.0, 0.0));
	}

	#[test]
	fn extreme_jitter_does_not_panic() {
		let nodes = vec![Node::new("a", "Math"), Node::new("b", "Math")];
		for amount in [f64::MAX, f64::INFINITY, f64::NAN, -5.0] {
			let options = LayoutOptions::default().with_jitter(amount);
			let out = layout_graph(&nodes, &[], &options, &mut StdRng::seed_from_u64(11));
			assert_eq!(out.len(), 2);
			for p in &out {
				assert!(p.noise_x.is_finite() && p.noise_y.is_finite(), "{amount}");
				assert_eq!(p.base_x, 0.0);
			}
		}
	}

	#[test]
	fn columns_place_unknown_categories_side_by_side() {
		let nodes = vec![
			Node::new("a", "history"),
			Node::new("b", "science"),
			Node::new("c", "history"),
		];
		let edges = [Edge::new("a", "c")];
		let out = layout_graph(&nodes, &edges, &LayoutOptions::columns(), &mut StdRng::seed_from_u64(0));
		assert_eq!(out[0].base_x, 0.0);
		assert_eq!(out[1].base_x, CATEGORY_SPAN);
		assert_eq!(out[2].base_x, LEVEL_SPACING);
	}

	#[test]
	fn columns_honour_explicit_offsets() {
		let nodes = vec![Node::new("a", "x"), Node::new("b", "y")];
		let options = LayoutOptions::columns().with_category_offset("y", -400.0);
		let out = layout_graph(&nodes, &[], &options, &mut StdRng::seed_from_u64(0));
		assert_eq!(out[1].base_x, -400.0);
	}

	#[test]
	fn float_position_orbits_the_jittered_base() {
		let node = PositionedNode {
			node: Node::new("a", "Math"),
			level: 1,
			row: 0.0,
			base_x: 250.0,
			base_y: 0.0,
			noise_x: 5.0,
			noise_y: -5.0,
			phase: 0.0,
			size: DEFAULT_SIZE,
		};
		let (x, y) = node.float_position(0.0, 10.0);
		assert_eq!(x, 255.0);
		assert_eq!(y, 5.0);
	}

	#[test]
	fn serializes_with_flattened_payload() {
		let nodes = vec![Node::new("a", "Math").with_title("Sets")];
		let out = layout_graph(&nodes, &[], &LayoutOptions::default(), &mut StdRng::seed_from_u64(0));
		let json = serde_json::to_value(&out[0]).unwrap();
		assert_eq!(json["id"], "a");
		assert_eq!(json["title"], "Sets");
		assert_eq!(json["status"], "locked");
		assert_eq!(json["baseX"], 0.0);
		assert!(json.get("noiseX").is_some());
	}
}

//! Lane assignment: fans nodes sharing a category and level out around the
//! category's base row.

use std::collections::HashMap;

use super::levels::Levels;
use super::options::{LaneAxis, LayoutOptions};
use crate::model::Node;

/// Row offset for each node id.
///
/// Groups keep input order, so reordering the input reorders siblings.
/// Rows are keyed by id: duplicate ids take part in the fan-out but share the
/// row of the last duplicate in their group.
pub fn calculate_rows(
	nodes: &[Node],
	levels: &Levels,
	options: &LayoutOptions,
) -> HashMap<String, f64> {
	let mut by_category: Vec<(&str, Vec<&Node>)> = Vec::new();
	for node in nodes {
		match by_category.iter_mut().find(|(c, _)| *c == node.category) {
			Some((_, members)) => members.push(node),
			None => by_category.push((&node.category, vec![node])),
		}
	}

	let mut rows = HashMap::with_capacity(nodes.len());
	for (category, members) in by_category {
		let base = match options.lane_axis {
			LaneAxis::Y => options.category_offset(category),
			LaneAxis::X => 0.0,
		};

		let mut by_level: Vec<(usize, Vec<&Node>)> = Vec::new();
		for node in members {
			let level = levels.get(&node.id);
			match by_level.iter_mut().find(|(l, _)| *l == level) {
				Some((_, group)) => group.push(node),
				None => by_level.push((level, vec![node])),
			}
		}

		for (_, group) in by_level {
			let center = (group.len() as f64 - 1.0) / 2.0;
			for (idx, node) in group.into_iter().enumerate() {
				let offset = (idx as f64 - center) * options.row_unit;
				rows.insert(node.id.clone(), base + offset);
			}
		}
	}
	rows
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::levels::calculate_levels;
	use crate::model::Edge;

	#[test]
	fn siblings_fan_out_symmetrically() {
		let nodes = vec![
			Node::new("root", "AI"),
			Node::new("x", "AI"),
			Node::new("y", "AI"),
			Node::new("z", "AI"),
		];
		let edges = [Edge::new("root", "x"), Edge::new("root", "y"), Edge::new("root", "z")];
		let levels = calculate_levels(&nodes, &edges);
		let rows = calculate_rows(&nodes, &levels, &LayoutOptions::default());

		assert_eq!(rows["root"], -2.0);
		assert_eq!(rows["x"], -2.5);
		assert_eq!(rows["y"], -2.0);
		assert_eq!(rows["z"], -1.5);
	}

	#[test]
	fn unknown_category_sits_on_lane_zero() {
		let nodes = vec![Node::new("a", "Cooking"), Node::new("b", "Cooking")];
		let levels = calculate_levels(&nodes, &[]);
		let rows = calculate_rows(&nodes, &levels, &LayoutOptions::default());
		assert_eq!(rows["a"], -0.25);
		assert_eq!(rows["b"], 0.25);
	}

	#[test]
	fn column_lanes_ignore_row_table() {
		let nodes = vec![Node::new("a", "Music")];
		let levels = calculate_levels(&nodes, &[]);
		let options = LayoutOptions::columns().with_category_offset("Music", 500.0);
		let rows = calculate_rows(&nodes, &levels, &options);
		assert_eq!(rows["a"], 0.0);
	}

	#[test]
	fn duplicate_ids_share_the_last_row() {
		let nodes = vec![Node::new("a", "Math"), Node::new("a", "Math"), Node::new("b", "Math")];
		let levels = calculate_levels(&nodes, &[]);
		let rows = calculate_rows(&nodes, &levels, &LayoutOptions::default());
		assert_eq!(rows.len(), 2);
		assert_eq!(rows["a"], 0.0);
		assert_eq!(rows["b"], 0.5);
	}

	#[test]
	fn input_order_decides_sibling_rows() {
		let forward = vec![Node::new("a", "Math"), Node::new("b", "Math")];
		let reversed = vec![Node::new("b", "Math"), Node::new("a", "Math")];
		let options = LayoutOptions::default();

		let rows_f = calculate_rows(&forward, &calculate_levels(&forward, &[]), &options);
		let rows_r = calculate_rows(&reversed, &calculate_levels(&reversed, &[]), &options);
		assert_eq!(rows_f["a"], rows_r["b"]);
		assert_ne!(rows_f["a"], rows_r["a"]);
	}
}

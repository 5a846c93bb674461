//! Topological leveling: a node's level is the length of the longest path
//! reaching it from any source.

use std::collections::{HashMap, VecDeque};

use crate::model::{Edge, Node};

/// Result of leveling a node set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Levels {
	levels: HashMap<String, usize>,
	unresolved: Vec<String>,
}

impl Levels {
	/// Level of `id`; 0 for unknown ids.
	pub fn get(&self, id: &str) -> usize {
		self.levels.get(id).copied().unwrap_or(0)
	}

	/// Nodes the queue never released (on or downstream of a cycle), in input
	/// order. They keep whatever level a released predecessor gave them, or 0.
	pub fn unresolved(&self) -> &[String] {
		&self.unresolved
	}

	pub fn len(&self) -> usize {
		self.levels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.levels.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.levels.iter().map(|(id, &level)| (id.as_str(), level))
	}

	/// Highest level present, 0 when empty.
	pub fn max_level(&self) -> usize {
		self.levels.values().copied().max().unwrap_or(0)
	}

	fn merge(&mut self, other: Levels) {
		self.levels.extend(other.levels);
		self.unresolved.extend(other.unresolved);
	}
}

/// Levels every node using all edges between known nodes.
pub fn calculate_levels(nodes: &[Node], edges: &[Edge]) -> Levels {
	level_nodes(nodes.iter(), edges)
}

/// Levels only the nodes of `category`, ignoring edges that leave it.
pub fn calculate_levels_in(nodes: &[Node], edges: &[Edge], category: &str) -> Levels {
	level_nodes(nodes.iter().filter(|n| n.category == category), edges)
}

/// Levels each category independently and merges the results.
pub fn calculate_levels_per_category(nodes: &[Node], edges: &[Edge]) -> Levels {
	let mut categories: Vec<&str> = Vec::new();
	for node in nodes {
		if !categories.contains(&node.category.as_str()) {
			categories.push(&node.category);
		}
	}

	let mut out = Levels::default();
	for category in categories {
		out.merge(calculate_levels_in(nodes, edges, category));
	}
	out
}

fn level_nodes<'a>(nodes: impl Iterator<Item = &'a Node>, edges: &[Edge]) -> Levels {
	let order: Vec<&str> = nodes.map(|n| n.id.as_str()).collect();
	let mut in_degree: HashMap<&str, usize> = order.iter().map(|&id| (id, 0)).collect();
	let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::with_capacity(order.len());

	for edge in edges {
		let (from, to) = (edge.from.as_str(), edge.to.as_str());
		if !in_degree.contains_key(from) {
			continue;
		}
		let Some(degree) = in_degree.get_mut(to) else {
			continue;
		};
		*degree += 1;
		adjacency.entry(from).or_default().push(to);
	}

	let mut levels: HashMap<String, usize> = HashMap::with_capacity(order.len());
	let mut queue: VecDeque<&str> = VecDeque::new();
	for &id in &order {
		if in_degree[id] == 0 && !levels.contains_key(id) {
			levels.insert(id.to_string(), 0);
			queue.push_back(id);
		}
	}

	while let Some(current) = queue.pop_front() {
		let next_level = levels.get(current).copied().unwrap_or(0) + 1;
		let Some(targets) = adjacency.get(current) else {
			continue;
		};
		for &target in targets {
			let level = levels.entry(target.to_string()).or_insert(0);
			*level = (*level).max(next_level);

			let Some(degree) = in_degree.get_mut(target) else {
				continue;
			};
			*degree -= 1;
			if *degree == 0 {
				queue.push_back(target);
			}
		}
	}

	// A node still holding in-degree was never released. It keeps any level an
	// upstream node pushed onto it, otherwise it sits at 0.
	let mut unresolved: Vec<String> = Vec::new();
	for &id in &order {
		if in_degree[id] > 0 && !unresolved.iter().any(|u| u == id) {
			unresolved.push(id.to_string());
		}
		levels.entry(id.to_string()).or_insert(0);
	}

	Levels { levels, unresolved }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nodes(ids: &[&str]) -> Vec<Node> {
		ids.iter().map(|id| Node::new(*id, "Math")).collect()
	}

	#[test]
	fn sources_are_level_zero() {
		let levels = calculate_levels(&nodes(&["a", "b"]), &[]);
		assert_eq!(levels.get("a"), 0);
		assert_eq!(levels.get("b"), 0);
		assert!(levels.unresolved().is_empty());
	}

	#[test]
	fn longest_path_wins_over_shortcut() {
		let edges = [Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("a", "c")];
		let levels = calculate_levels(&nodes(&["a", "b", "c"]), &edges);
		assert_eq!(levels.get("c"), 2);
		assert_eq!(levels.max_level(), 2);
	}

	#[test]
	fn self_loop_falls_back_to_zero() {
		let edges = [Edge::new("a", "a"), Edge::new("a", "b")];
		let levels = calculate_levels(&nodes(&["a", "b"]), &edges);
		assert_eq!(levels.get("a"), 0);
		assert_eq!(levels.get("b"), 0);
		assert_eq!(levels.unresolved(), ["a".to_string(), "b".to_string()]);
	}

	#[test]
	fn downstream_of_cycle_is_unresolved() {
		let edges = [
			Edge::new("root", "a"),
			Edge::new("a", "b"),
			Edge::new("b", "a"),
			Edge::new("b", "c"),
		];
		let levels = calculate_levels(&nodes(&["root", "a", "b", "c"]), &edges);
		assert_eq!(levels.get("root"), 0);
		// reached from root before the cycle stalled it
		assert_eq!(levels.get("a"), 1);
		assert_eq!(levels.get("b"), 0);
		assert_eq!(levels.get("c"), 0);
		assert_eq!(levels.unresolved().len(), 3);
	}

	#[test]
	fn parallel_edges_release_target_once() {
		let edges = [Edge::new("a", "b"), Edge::new("a", "b"), Edge::new("b", "c")];
		let levels = calculate_levels(&nodes(&["a", "b", "c"]), &edges);
		assert_eq!(levels.get("b"), 1);
		assert_eq!(levels.get("c"), 2);
	}

	#[test]
	fn dangling_edges_are_ignored() {
		let edges = [Edge::new("ghost", "a"), Edge::new("a", "ghost")];
		let levels = calculate_levels(&nodes(&["a"]), &edges);
		assert_eq!(levels.get("a"), 0);
		assert_eq!(levels.len(), 1);
		assert!(levels.unresolved().is_empty());
	}

	#[test]
	fn category_filter_drops_cross_category_edges() {
		let all = vec![
			Node::new("m1", "Math"),
			Node::new("m2", "Math"),
			Node::new("ai", "AI"),
		];
		let edges = [Edge::new("m1", "ai"), Edge::new("ai", "m2")];

		assert_eq!(calculate_levels(&all, &edges).get("m2"), 2);

		let math = calculate_levels_in(&all, &edges, "Math");
		assert_eq!(math.get("m2"), 0);
		assert_eq!(math.len(), 2);

		let merged = calculate_levels_per_category(&all, &edges);
		assert_eq!(merged.len(), 3);
		assert_eq!(merged.get("ai"), 0);
	}
}

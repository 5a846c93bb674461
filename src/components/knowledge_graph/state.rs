use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::layout::{LayoutOptions, PositionedNode, layout_graph};
use crate::model::GraphData;

const COLORS: &[(&str, &str)] = &[
	("Math", "#d3a84e"),
	("AI", "#64b4ff"),
	("Music", "#e377c2"),
	("math", "#d3a84e"),
	("history", "#ff7f0e"),
	("coding", "#2ca02c"),
	("philosophy", "#9467bd"),
	("science", "#17becf"),
];
const FALLBACK_COLORS: &[&str] = &["#1f77b4", "#d62728", "#8c564b", "#bcbd22", "#7f7f7f"];

/// Pixels a node drifts around its jittered base while floating.
pub const FLOAT_AMPLITUDE: f64 = 6.0;
/// Mouse travel under which a press counts as a click.
const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

/// Everything the canvas needs between frames.
pub struct KnowledgeGraphState {
	pub nodes: Vec<PositionedNode>,
	pub colors: Vec<String>,
	pub edges: Vec<(usize, usize)>,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub time: f64,
}

impl KnowledgeGraphState {
	pub fn new<R: Rng + ?Sized>(
		data: &GraphData,
		options: &LayoutOptions,
		rng: &mut R,
		width: f64,
		height: f64,
	) -> Self {
		let nodes = layout_graph(&data.nodes, &data.edges, options, rng);

		let mut id_to_idx = HashMap::with_capacity(nodes.len());
		for (idx, node) in nodes.iter().enumerate() {
			id_to_idx.entry(node.id().to_string()).or_insert(idx);
		}
		// edges with an endpoint that was never laid out are not drawn
		let edges = data
			.edges
			.iter()
			.filter_map(|e| Some((*id_to_idx.get(&e.from)?, *id_to_idx.get(&e.to)?)))
			.collect();

		let categories = data.categories();
		let colors = nodes
			.iter()
			.map(|n| category_color(&n.node.category, &categories).to_string())
			.collect();

		let mut state = Self {
			nodes,
			colors,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			width,
			height,
			time: 0.0,
		};
		state.fit_to_view();
		state
	}

	/// Centers the laid-out graph and zooms so it fits the canvas.
	pub fn fit_to_view(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for n in &self.nodes {
			min_x = min_x.min(n.base_x);
			max_x = max_x.max(n.base_x);
			min_y = min_y.min(n.base_y);
			max_y = max_y.max(n.base_y);
		}
		let margin = 160.0;
		let k = (self.width / (max_x - min_x + margin))
			.min(self.height / (max_y - min_y + margin))
			.clamp(0.1, 1.5);
		self.transform = ViewTransform {
			x: self.width / 2.0 - (min_x + max_x) / 2.0 * k,
			y: self.height / 2.0 - (min_y + max_y) / 2.0 * k,
			k,
		};
	}

	pub fn position(&self, idx: usize) -> (f64, f64) {
		self.nodes[idx].float_position(self.time, FLOAT_AMPLITUDE)
	}

	pub fn radius(&self, idx: usize) -> f64 {
		self.nodes[idx].size / 2.0
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// topmost (last drawn) node wins
		(0..self.nodes.len()).rev().find(|&idx| {
			let (x, y) = self.position(idx);
			let (dx, dy) = (x - gx, y - gy);
			(dx * dx + dy * dy).sqrt() < self.radius(idx) + 4.0
		})
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn update_pan(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			return;
		}
		let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
		if dx.abs() > CLICK_SLOP || dy.abs() > CLICK_SLOP {
			self.pan.moved = true;
		}
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
	}

	/// Ends a press. A press that did not move selects the node under the
	/// cursor, or clears the selection on empty canvas. Returns the new
	/// selection when it changed.
	pub fn end_pan(&mut self, x: f64, y: f64) -> Option<Option<String>> {
		let was_click = self.pan.active && !self.pan.moved;
		self.pan.active = false;
		if !was_click {
			return None;
		}
		let hit = self.node_at_position(x, y);
		if hit == self.selected {
			return None;
		}
		self.selected = hit;
		Some(hit.map(|idx| self.nodes[idx].id().to_string()))
	}

	pub fn cancel_pan(&mut self) {
		self.pan.active = false;
	}

	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f64) {
		self.time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn category_color(category: &str, categories: &[&str]) -> &'static str {
	if let Some(&(_, color)) = COLORS.iter().find(|(c, _)| *c == category) {
		return color;
	}
	let idx = categories.iter().position(|c| *c == category).unwrap_or(0);
	FALLBACK_COLORS[idx % FALLBACK_COLORS.len()]
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::{Edge, Node};

	fn state() -> KnowledgeGraphState {
		let data = GraphData {
			nodes: vec![Node::new("a", "Math"), Node::new("b", "Math"), Node::new("c", "Poetry")],
			edges: vec![Edge::new("a", "b"), Edge::new("b", "missing")],
		};
		let options = LayoutOptions::default().with_jitter(0.0);
		KnowledgeGraphState::new(&data, &options, &mut StdRng::seed_from_u64(0), 800.0, 600.0)
	}

	fn screen_pos(s: &KnowledgeGraphState, idx: usize) -> (f64, f64) {
		let (x, y) = s.position(idx);
		(x * s.transform.k + s.transform.x, y * s.transform.k + s.transform.y)
	}

	#[test]
	fn drops_edges_to_unknown_nodes() {
		assert_eq!(state().edges, vec![(0, 1)]);
	}

	#[test]
	fn colors_known_and_unknown_categories() {
		let s = state();
		assert_eq!(s.colors[0], "#d3a84e");
		assert_eq!(s.colors[2], FALLBACK_COLORS[1]);
	}

	#[test]
	fn click_selects_and_clears() {
		let mut s = state();
		let (x, y) = screen_pos(&s, 1);
		s.begin_pan(x, y);
		assert_eq!(s.end_pan(x, y), Some(Some("b".to_string())));
		assert_eq!(s.selected, Some(1));

		s.begin_pan(1.0, 1.0);
		assert_eq!(s.end_pan(1.0, 1.0), Some(None));
		assert_eq!(s.selected, None);
	}

	#[test]
	fn drag_pans_without_selecting() {
		let mut s = state();
		let start_x = s.transform.x;
		s.begin_pan(10.0, 10.0);
		s.update_pan(60.0, 10.0);
		assert_eq!(s.end_pan(60.0, 10.0), None);
		assert_eq!(s.transform.x, start_x + 50.0);
	}

	#[test]
	fn hover_collects_neighbors_and_fades() {
		let mut s = state();
		s.set_hover(Some(0));
		assert!(s.is_highlighted(1));
		assert!(!s.is_highlighted(2));

		s.set_hover(None);
		assert!(s.is_hovered(0));
		for _ in 0..600 {
			s.tick(0.016);
		}
		assert!(!s.has_active_highlight());
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..100 {
			s.zoom_at(0.0, 0.0, 1.1);
		}
		assert_eq!(s.transform.k, 10.0);
	}
}

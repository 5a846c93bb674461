//! Knowledge graph data as delivered by demo fixtures or the notes API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while loading graph data.
#[derive(Debug, Error)]
pub enum ModelError {
	/// The payload was not a valid graph document.
	#[error("invalid graph json: {0}")]
	Json(#[from] serde_json::Error),
}

/// Progress state of a knowledge item. Only affects how the node is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
	#[default]
	Locked,
	Unlocked,
	Completed,
}

impl NodeStatus {
	/// Lowercase wire name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Locked => "locked",
			Self::Unlocked => "unlocked",
			Self::Completed => "completed",
		}
	}
}

/// One knowledge item on the graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	#[serde(default)]
	pub category: String,
	#[serde(default)]
	pub status: NodeStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
	#[serde(default)]
	pub topics: Vec<String>,
	/// Any other fields the backend sends, kept verbatim.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Node {
	/// Minimal node with an id and category; everything else defaulted.
	pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			category: category.into(),
			..Default::default()
		}
	}

	/// Sets the status, builder style.
	pub fn with_status(mut self, status: NodeStatus) -> Self {
		self.status = status;
		self
	}

	/// Sets the title, builder style.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Text shown next to the node: the title, or the id when untitled.
	pub fn label(&self) -> &str {
		self.title.as_deref().unwrap_or(&self.id)
	}
}

fn default_relationship() -> String {
	"prerequisite".into()
}

/// Directed relation `from -> to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
	pub from: String,
	pub to: String,
	#[serde(default = "default_relationship")]
	pub relationship: String,
}

impl Edge {
	/// A `prerequisite` edge.
	pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
		Self::with_relationship(from, to, default_relationship())
	}

	/// An edge with an explicit relationship label.
	pub fn with_relationship(
		from: impl Into<String>,
		to: impl Into<String>,
		relationship: impl Into<String>,
	) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			relationship: relationship.into(),
		}
	}
}

/// A whole node/edge set, supplied at once.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl GraphData {
	/// Parses a `{ "nodes": [...], "edges": [...] }` document.
	pub fn from_json(json: &str) -> Result<Self, ModelError> {
		Ok(serde_json::from_str(json)?)
	}

	/// First node with the given id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Ids connected to `id` by an edge in either direction, in edge order.
	pub fn neighbors(&self, id: &str) -> Vec<&str> {
		let mut out: Vec<&str> = Vec::new();
		for edge in &self.edges {
			let other = if edge.from == id {
				edge.to.as_str()
			} else if edge.to == id {
				edge.from.as_str()
			} else {
				continue;
			};
			if other != id && !out.contains(&other) {
				out.push(other);
			}
		}
		out
	}

	/// Distinct categories in order of first appearance.
	pub fn categories(&self) -> Vec<&str> {
		let mut out: Vec<&str> = Vec::new();
		for node in &self.nodes {
			if !out.contains(&node.category.as_str()) {
				out.push(&node.category);
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_nodes_and_keeps_unknown_fields() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [
					{"id": "a", "category": "Math", "status": "completed", "title": "Sets", "difficulty": 3},
					{"id": "b", "category": "AI"}
				],
				"edges": [{"from": "a", "to": "b"}]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].status, NodeStatus::Completed);
		assert_eq!(data.nodes[0].extra.get("difficulty"), Some(&Value::from(3)));
		assert_eq!(data.nodes[1].status, NodeStatus::Locked);
		assert_eq!(data.nodes[1].label(), "b");
		assert_eq!(data.edges[0].relationship, "prerequisite");
	}

	#[test]
	fn rejects_unknown_status() {
		let err = GraphData::from_json(r#"{"nodes":[{"id":"a","status":"mastered"}]}"#)
			.unwrap_err();
		assert!(matches!(err, ModelError::Json(_)));
	}

	#[test]
	fn neighbors_cover_both_directions_once() {
		let data = GraphData {
			nodes: vec![Node::new("a", "x"), Node::new("b", "x"), Node::new("c", "x")],
			edges: vec![Edge::new("a", "b"), Edge::new("c", "a"), Edge::new("b", "a")],
		};
		assert_eq!(data.neighbors("a"), vec!["b", "c"]);
		assert_eq!(data.neighbors("c"), vec!["a"]);
	}

	#[test]
	fn categories_follow_first_appearance() {
		let data = GraphData {
			nodes: vec![Node::new("1", "AI"), Node::new("2", "Math"), Node::new("3", "AI")],
			edges: vec![],
		};
		assert_eq!(data.categories(), vec!["AI", "Math"]);
	}
}

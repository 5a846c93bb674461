//! Sample graphs for the demo pages.

use rand::Rng;
use serde_json::Value;

use crate::model::{Edge, GraphData, ModelError, Node, NodeStatus};

const LEARNING_PATH: &str = include_str!("../data/learning_path.json");

/// The Math / AI / Music prerequisite graph.
pub fn learning_path() -> Result<GraphData, ModelError> {
	GraphData::from_json(LEARNING_PATH)
}

const GROUPS: &[(&str, &[&str])] = &[
	(
		"math",
		&[
			"Linear Algebra Fundamentals",
			"Calculus: Derivatives & Integrals",
			"Probability Theory",
			"Differential Equations",
			"Matrix Operations",
			"Vector Spaces",
			"Fourier Transform",
			"Optimization Techniques",
			"Statistical Inference",
			"Number Theory Basics",
			"Graph Theory",
			"Topology Introduction",
		],
	),
	(
		"history",
		&[
			"The Renaissance Period",
			"World War II: Key Events",
			"Ancient Greek Philosophy",
			"The Industrial Revolution",
			"Medieval Europe",
			"The Cold War",
			"Ancient Rome: Rise & Fall",
			"The French Revolution",
			"Colonial America",
			"The Byzantine Empire",
			"The Enlightenment",
			"The Reformation",
		],
	),
	(
		"coding",
		&[
			"React Hooks Deep Dive",
			"TypeScript Advanced Types",
			"GraphQL Query Optimization",
			"WebGL Shader Programming",
			"System Design Patterns",
			"Database Indexing Strategies",
			"Microservices Architecture",
			"Functional Programming",
			"Async/Await Patterns",
			"State Management Solutions",
			"Performance Optimization",
			"Testing Best Practices",
		],
	),
	(
		"philosophy",
		&[
			"Stoicism: Core Principles",
			"Existentialism Overview",
			"Ethics: Utilitarianism",
			"Metaphysics: Reality & Being",
			"Epistemology: Knowledge Theory",
			"Logic & Reasoning",
			"Eastern Philosophy",
			"Political Philosophy",
			"Aesthetics & Art",
			"Philosophy of Mind",
		],
	),
	(
		"science",
		&[
			"Quantum Mechanics Basics",
			"General Relativity",
			"Evolutionary Biology",
			"Organic Chemistry Reactions",
			"Astrophysics: Black Holes",
			"Molecular Biology",
			"Thermodynamics Laws",
			"Neuroscience: Brain Function",
			"Particle Physics",
			"Climate Science",
			"Genetics & DNA",
			"Electromagnetism",
		],
	),
];

fn status_for_score(score: u32) -> NodeStatus {
	match score {
		80.. => NodeStatus::Completed,
		50..80 => NodeStatus::Unlocked,
		_ => NodeStatus::Locked,
	}
}

/// Generates `count` nodes spread over five subject groups.
///
/// Every node after the first in a group builds on a random earlier node of
/// the same group, so each group forms a tree.
pub fn constellation<R: Rng + ?Sized>(count: usize, rng: &mut R) -> GraphData {
	let per_group = count / GROUPS.len();
	let remainder = count % GROUPS.len();
	let mut data = GraphData::default();

	for (group_idx, (group, titles)) in GROUPS.iter().enumerate() {
		let group_count = per_group + usize::from(group_idx < remainder);
		for i in 0..group_count {
			let mut title = titles[i % titles.len()].to_string();
			if i >= titles.len() {
				title = format!("{} {}", title, i / titles.len() + 1);
			}

			// weighted towards the middle of the range
			let score = (rng.gen_range(0..40u32) + rng.gen_range(0..30u32) + rng.gen_range(0..30u32))
				.clamp(20, 100);

			let mut node = Node::new(format!("{group}-{i}"), *group)
				.with_title(title)
				.with_status(status_for_score(score));
			node.extra
				.insert("comprehensionScore".into(), Value::from(score));
			data.nodes.push(node);

			if i > 0 {
				let parent = rng.gen_range(0..i);
				data.edges.push(Edge::with_relationship(
					format!("{group}-{parent}"),
					format!("{group}-{i}"),
					"builds_on",
				));
			}
		}
	}
	data
}

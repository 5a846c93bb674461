use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::components::knowledge_graph::KnowledgeGraphCanvas;
use crate::demo;
use crate::layout::LayoutOptions;

const NODE_COUNT: usize = 55;

/// Generated constellation, one column per subject.
#[component]
pub fn Constellation() -> impl IntoView {
	let mut rng = StdRng::seed_from_u64(js_sys::Date::now() as u64);
	let data = demo::constellation(NODE_COUNT, &mut rng);
	let graph_data = Signal::derive(move || data.clone());

	view! {
		<div class="fullscreen-graph">
			<KnowledgeGraphCanvas
				data=graph_data
				options=LayoutOptions::columns()
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"The Constellation"</h1>
				<p class="subtitle">"Each column is a subject; depth follows what builds on what."</p>
			</div>
		</div>
	}
}

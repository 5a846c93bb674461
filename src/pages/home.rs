use leptos::prelude::*;

use crate::components::knowledge_graph::KnowledgeGraphCanvas;
use crate::demo;
use crate::model::GraphData;

/// Side panel describing the clicked node.
#[component]
fn NodeDetails(data: GraphData, selected: ReadSignal<Option<String>>) -> impl IntoView {
	move || {
		let id = selected.get()?;
		let node = data.node(&id)?.clone();
		let topics = node.topics.join(", ");
		Some(view! {
			<aside class="node-details">
				<h2>{node.label().to_string()}</h2>
				<p class="meta">{node.category.clone()} " · " {node.status.as_str()}</p>
				<p>{node.description.clone().unwrap_or_default()}</p>
				<p class="topics">{topics}</p>
				{node.url.clone().map(|url| view! { <a href=url target="_blank">"Open source"</a> })}
			</aside>
		})
	}
}

/// Default Home Page: the learning path as stacked category lanes.
#[component]
pub fn Home() -> impl IntoView {
	let (selected, set_selected) = signal(None::<String>);
	let loaded = demo::learning_path();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{loaded
				.map(|data| {
					let graph = data.clone();
					let graph_data = Signal::derive(move || graph.clone());
					view! {
						<div class="fullscreen-graph">
							<KnowledgeGraphCanvas
								data=graph_data
								fullscreen=true
								on_select={move |id: Option<String>| set_selected.set(id)}
							/>
							<div class="graph-overlay">
								<h1>"Knowledge Graph"</h1>
								<p class="subtitle">
									"Click a node for details. Scroll to zoom. Drag to pan."
								</p>
							</div>
							<NodeDetails data=data selected=selected />
						</div>
					}
				})}
		</ErrorBoundary>
	}
}

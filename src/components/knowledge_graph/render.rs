use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::KnowledgeGraphState;
use crate::model::NodeStatus;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#14120f");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	for &(src, tgt) in &state.edges {
		let ((x1, y1), (x2, y2)) = (state.position(src), state.position(tgt));
		let (r1, r2) = (state.radius(src), state.radius(tgt));
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < r1 + r2 + arrow_size {
			continue;
		}

		let is_highlighted = state.is_highlighted(src) && state.is_highlighted(tgt);
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.35 + 0.5 * t, 0.6 + 0.3 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.35 - 0.25 * t, 0.6 - 0.4 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(211, 168, 78, {})", edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba(211, 168, 78, {})", arrow_alpha));
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font_px = 12.0 / k.max(0.5);

	// dimmed pass first, highlighted nodes are drawn on top
	for idx in 0..state.nodes.len() {
		if has_highlight && state.is_highlighted(idx) {
			continue;
		}
		let dim = if has_highlight { 1.0 - 0.7 * t } else { 1.0 };
		draw_node(state, ctx, idx, dim, state.radius(idx), font_px);
	}

	if !has_highlight {
		return;
	}

	for idx in 0..state.nodes.len() {
		if !state.is_highlighted(idx) {
			continue;
		}
		let (x, y) = state.position(idx);
		let base = state.radius(idx);
		let is_hovered = state.is_hovered(idx);
		let (radius, glow_radius) = if is_hovered {
			(base * (1.0 + 0.25 * t), base * (1.6 + 0.8 * t))
		} else {
			(base * (1.0 + 0.1 * t), base * (1.3 + 0.4 * t))
		};

		if t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 245, {})", alpha));
				let _ = gradient.add_color_stop(
					0.6,
					&format!("rgba(211, 168, 78, {})", alpha * 0.3),
				);
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		draw_node(state, ctx, idx, 1.0, radius, font_px);
	}
}

fn draw_node(
	state: &KnowledgeGraphState,
	ctx: &CanvasRenderingContext2d,
	idx: usize,
	dim: f64,
	radius: f64,
	font_px: f64,
) {
	let node = &state.nodes[idx];
	let (x, y) = state.position(idx);
	let k = state.transform.k;
	let status_alpha = match node.node.status {
		NodeStatus::Locked => 0.45,
		NodeStatus::Unlocked => 0.85,
		NodeStatus::Completed => 1.0,
	};

	if node.node.status == NodeStatus::Completed {
		if let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, radius * 1.5) {
			let _ = gradient.add_color_stop(0.0, &format!("rgba(211, 168, 78, {})", 0.3 * dim));
			let _ = gradient.add_color_stop(1.0, "rgba(211, 168, 78, 0)");
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius * 1.5, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}
	}

	ctx.set_global_alpha(status_alpha * dim);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&state.colors[idx]);
	ctx.fill();
	ctx.set_global_alpha(1.0);

	if state.selected == Some(idx) {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + 3.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str("#fffff5");
		ctx.set_line_width(2.0 / k);
		ctx.stroke();
	}

	ctx.set_fill_style_str(&format!("rgba(255, 255, 245, {})", 0.9 * dim));
	ctx.set_font(&format!("{}px sans-serif", font_px));
	ctx.set_text_align("center");
	let _ = ctx.fill_text(node.node.label(), x, y + radius + font_px + 2.0);
}

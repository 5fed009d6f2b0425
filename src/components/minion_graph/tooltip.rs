//! Hover tooltip listing a node's metadata.
//!
//! A single `div.tooltip` attached to the document body serves every graph on
//! the page. A presenter adopts the existing element when one is mounted and
//! creates it otherwise.

use super::config::GraphConfig;
use super::dom::{Document, Namespace};
use super::error::Result;
use super::types::GraphNode;

/// Class identifying the shared tooltip element.
pub const TOOLTIP_CLASS: &str = "tooltip";

/// The fixed rows shown for a node: Id, Role, Cpu, Cores and Ram.
pub fn tooltip_rows(node: &GraphNode) -> [(&'static str, String); 5] {
	[
		("Id", node.id.clone()),
		("Role", node.roles.to_string()),
		("Cpu", node.cpu_model.clone()),
		("Cores", node.num_cpus.to_string()),
		("Ram", format!("{} MB", node.memory)),
	]
}

/// Owns the lifecycle and placement of the tooltip overlay.
pub struct TooltipPresenter<D: Document> {
	doc: D,
	element: Option<D::Element>,
	offset_x: f64,
	offset_y: f64,
	opacity: f64,
}

impl<D: Document> TooltipPresenter<D> {
	pub fn new(doc: D, config: &GraphConfig) -> Self {
		Self {
			doc,
			element: None,
			offset_x: config.tooltip_offset_x,
			offset_y: config.tooltip_offset_y,
			opacity: config.tooltip_opacity,
		}
	}

	/// The mounted overlay, if [`ensure_mounted`](Self::ensure_mounted) ran.
	pub fn element(&self) -> Option<&D::Element> {
		self.element.as_ref()
	}

	/// Adopts an existing `div.tooltip` or creates one. Calling it again returns
	/// the same element.
	pub fn ensure_mounted(&mut self) -> Result<D::Element> {
		if let Some(el) = &self.element {
			return Ok(el.clone());
		}
		let body = self.doc.body()?;
		let existing = self
			.doc
			.find_all(&body, TOOLTIP_CLASS, None)?
			.into_iter()
			.find(|el| self.doc.tag_name(el).eq_ignore_ascii_case("div"));
		let el = match existing {
			Some(el) => el,
			None => {
				let el = self.doc.append_new(&body, Namespace::Html, "div")?;
				self.doc.set_class(&el, TOOLTIP_CLASS, true)?;
				self.doc.set_style(&el, "opacity", "0")?;
				el
			}
		};
		self.element = Some(el.clone());
		Ok(el)
	}

	/// Top-left corner for an overlay `width` wide next to the pointer.
	///
	/// The right edge sits `offset_x` left of the pointer and the top edge
	/// `offset_y` above it.
	pub fn position(&self, width: f64, page_x: f64, page_y: f64) -> (f64, f64) {
		(page_x - width - self.offset_x, page_y - self.offset_y)
	}

	/// Replaces the table with `node`'s rows and moves it next to the pointer.
	pub fn show(&mut self, node: &GraphNode, page_x: f64, page_y: f64) -> Result<()> {
		let el = self.ensure_mounted()?;
		let doc = &self.doc;
		doc.clear(&el)?;

		let table = doc.append_new(&el, Namespace::Html, "table")?;
		for (label, value) in tooltip_rows(node) {
			let row = doc.append_new(&table, Namespace::Html, "tr")?;
			let label_cell = doc.append_new(&row, Namespace::Html, "td")?;
			doc.set_class(&label_cell, "label", true)?;
			doc.set_text(&label_cell, label)?;
			let value_cell = doc.append_new(&row, Namespace::Html, "td")?;
			doc.set_class(&value_cell, "value", true)?;
			doc.set_text(&value_cell, &value)?;
		}

		let (left, top) = self.position(doc.offset_width(&el), page_x, page_y);
		doc.set_style(&el, "opacity", &self.opacity.to_string())?;
		doc.set_style(&el, "left", &format!("{left}px"))?;
		doc.set_style(&el, "top", &format!("{top}px"))?;
		Ok(())
	}

	/// Fades the overlay out and parks it at the origin. Safe to repeat.
	pub fn hide(&mut self) -> Result<()> {
		let Some(el) = &self.element else {
			return Ok(());
		};
		self.doc.set_style(el, "opacity", "0")?;
		self.doc.set_style(el, "top", "0px")?;
		self.doc.set_style(el, "left", "0px")?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::minion_graph::types::Roles;

	#[test]
	fn rows_format_memory_in_megabytes() {
		let node = GraphNode {
			id: "n1".into(),
			roles: Roles::Display("Master Node".into()),
			cpu_model: "X".into(),
			num_cpus: 4,
			memory: 8192,
			os: None,
			cpu_arch: None,
		};
		let rows = tooltip_rows(&node);
		assert_eq!(rows[0], ("Id", "n1".to_string()));
		assert_eq!(rows[1], ("Role", "Master Node".to_string()));
		assert_eq!(rows[3], ("Cores", "4".to_string()));
		assert_eq!(rows[4], ("Ram", "8192 MB".to_string()));
	}
}

mod support;

use pretty_assertions::assert_eq;

use minion_graph::GraphConfig;
use minion_graph::components::minion_graph::dom::{Document, Namespace};
use minion_graph::components::minion_graph::tooltip::{TOOLTIP_CLASS, TooltipPresenter};
use support::{MockDocument, node};

fn presenter(doc: &MockDocument) -> TooltipPresenter<MockDocument> {
	TooltipPresenter::new(doc.clone(), &GraphConfig::default())
}

fn styles(doc: &MockDocument, presenter: &TooltipPresenter<MockDocument>) -> Vec<Option<String>> {
	let el = *presenter.element().unwrap();
	["opacity", "left", "top"]
		.into_iter()
		.map(|p| doc.style(el, p))
		.collect()
}

#[test]
fn mounts_hidden() {
	let doc = MockDocument::new();
	let mut tooltip = presenter(&doc);
	let el = tooltip.ensure_mounted().unwrap();

	assert!(doc.has_class(&el, TOOLTIP_CLASS));
	assert_eq!(doc.style(el, "opacity").as_deref(), Some("0"));
	assert_eq!(doc.children(doc.body().unwrap()), vec![el]);
}

#[test]
fn hide_before_mount_does_nothing() {
	let doc = MockDocument::new();
	let mut tooltip = presenter(&doc);
	tooltip.hide().unwrap();

	assert!(tooltip.element().is_none());
	assert!(doc.children(doc.body().unwrap()).is_empty());
}

#[test]
fn hiding_twice_matches_hiding_once() {
	let doc = MockDocument::new();
	let mut tooltip = presenter(&doc);
	tooltip
		.show(&node("n1", &["master"], "X", 4, 8192), 400.0, 300.0)
		.unwrap();

	tooltip.hide().unwrap();
	let once = styles(&doc, &tooltip);
	tooltip.hide().unwrap();

	assert_eq!(styles(&doc, &tooltip), once);
	assert_eq!(
		once,
		vec![Some("0".to_string()), Some("0px".to_string()), Some("0px".to_string())]
	);
}

#[test]
fn show_replaces_every_row() {
	let doc = MockDocument::new();
	let mut tooltip = presenter(&doc);
	tooltip
		.show(&node("n1", &["master"], "X", 4, 8192), 0.0, 0.0)
		.unwrap();
	tooltip
		.show(&node("n2", &["worker", "web"], "Y", 2, 4096), 0.0, 0.0)
		.unwrap();

	let el = *tooltip.element().unwrap();
	assert_eq!(doc.by_tag(el, "table").len(), 1);
	assert_eq!(doc.by_tag(el, "tr").len(), 5);
	assert_eq!(
		doc.texts_by_class(el, "value"),
		vec!["n2", "worker, web", "Y", "2", "4096 MB"]
	);
}

#[test]
fn sits_left_of_and_above_the_pointer() {
	let doc = MockDocument::new();
	let mut tooltip = presenter(&doc);
	let el = tooltip.ensure_mounted().unwrap();
	doc.set_offset_width(el, 120.0);

	tooltip
		.show(&node("n1", &["master"], "X", 4, 8192), 500.0, 300.0)
		.unwrap();

	assert_eq!(
		styles(&doc, &tooltip),
		vec![
			Some("1".to_string()),
			Some("320px".to_string()),
			Some("270px".to_string())
		]
	);
}

#[test]
fn presenters_share_one_overlay() {
	let doc = MockDocument::new();
	let first = presenter(&doc).ensure_mounted().unwrap();
	let second = presenter(&doc).ensure_mounted().unwrap();

	assert_eq!(first, second);
	assert_eq!(doc.find_all(&doc.body().unwrap(), TOOLTIP_CLASS, None).unwrap().len(), 1);
}

#[test]
fn only_a_tooltip_div_is_reused() {
	let doc = MockDocument::new();
	let body = doc.body().unwrap();
	let badge = doc.append_new(&body, Namespace::Html, "span").unwrap();
	doc.set_class(&badge, TOOLTIP_CLASS, true).unwrap();

	let el = presenter(&doc).ensure_mounted().unwrap();

	assert_ne!(el, badge);
	assert_eq!(doc.tag(el), "div");
	assert_eq!(doc.children(body), vec![badge, el]);
}

//! In-memory host page: the regions, navigation chrome and element state the
//! router and pages read and write.

use crate::charts::{theme, Chart};
use crate::core::animation::NumberAnimation;
use crate::core::context::AppContext;
use crate::utils::error::Result;
use crate::utils::html::esc;
use futures_util::future::BoxFuture;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

/// Viewport width at or below which the sidebar behaves as a drawer.
pub const MOBILE_BREAKPOINT: u32 = 1024;

pub type Handler = Arc<dyn Fn(AppContext) -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    target: String,
    event: &'static str,
    handler: Handler,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub page: String,
    pub label: String,
    pub active: bool,
}

/// Where a click landed, relative to the sidebar chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Sidebar,
    MenuButton,
    Elsewhere,
}

#[derive(Default)]
pub struct Document {
    title: String,
    content: String,
    content_scroll_top: u32,
    panel: String,
    panel_visible: bool,
    nav_items: Vec<NavItem>,
    sidebar_open: bool,
    fragments: HashMap<String, String>,
    classes: HashMap<String, BTreeSet<String>>,
    fields: HashMap<String, String>,
    text: HashMap<String, String>,
    styles: HashMap<String, BTreeMap<String, String>>,
    charts: BTreeMap<String, Chart>,
    animations: Vec<(String, NumberAnimation)>,
    listeners: Vec<Listener>,
    next_listener: u64,
    alerts: Vec<String>,
}

impl Document {
    /// A document whose sidebar lists `(page key, label)` pairs in order.
    pub fn new<I, K, L>(nav: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        Self {
            nav_items: nav
                .into_iter()
                .map(|(page, label)| NavItem {
                    page: page.into(),
                    label: label.into(),
                    active: false,
                })
                .collect(),
            panel_visible: true,
            ..Self::default()
        }
    }

    // ── regions ────────────────────────────────────────────

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the main region. Element state owned by the old markup goes
    /// with it, exactly as an `innerHTML` overwrite would drop those nodes.
    pub fn set_content(&mut self, markup: impl Into<String>) {
        self.content = markup.into();
        self.fragments.clear();
        self.classes.clear();
        self.fields.clear();
        self.text.clear();
        self.styles.clear();
    }

    pub fn content_scroll_top(&self) -> u32 {
        self.content_scroll_top
    }

    pub fn scroll_content_to(&mut self, offset: u32) {
        self.content_scroll_top = offset;
    }

    pub fn panel(&self) -> &str {
        &self.panel
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn show_panel(&mut self) {
        self.panel_visible = true;
    }

    pub fn hide_panel(&mut self) {
        self.panel_visible = false;
    }

    pub fn set_panel(&mut self, markup: impl Into<String>) {
        self.panel = markup.into();
    }

    // ── navigation chrome ──────────────────────────────────

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav_items
    }

    /// Recompute every item's flag from scratch against `page`.
    pub fn highlight_nav(&mut self, page: &str) {
        for item in &mut self.nav_items {
            item.active = item.page == page;
        }
    }

    pub fn active_nav(&self) -> Vec<&str> {
        self.nav_items
            .iter()
            .filter(|i| i.active)
            .map(|i| i.page.as_str())
            .collect()
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Document-level click: on narrow viewports a click outside both the
    /// sidebar and the menu button closes an open drawer.
    pub fn handle_click(&mut self, target: ClickTarget, viewport_width: u32) {
        match target {
            ClickTarget::MenuButton => self.toggle_sidebar(),
            ClickTarget::Sidebar => {}
            ClickTarget::Elsewhere => {
                if viewport_width <= MOBILE_BREAKPOINT && self.sidebar_open {
                    self.sidebar_open = false;
                }
            }
        }
    }

    // ── element state ──────────────────────────────────────

    /// Whether the current main markup declares an element with this id.
    pub fn has_element(&self, id: &str) -> bool {
        self.content.contains(&format!("id=\"{}\"", id))
    }

    pub fn fragment(&self, id: &str) -> Option<&str> {
        self.fragments.get(id).map(String::as_str)
    }

    pub fn set_fragment(&mut self, id: &str, markup: impl Into<String>) {
        self.fragments.insert(id.to_string(), markup.into());
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.classes.get(id).is_some_and(|set| set.contains(class))
    }

    pub fn add_class(&mut self, id: &str, class: &str) {
        self.classes
            .entry(id.to_string())
            .or_default()
            .insert(class.to_string());
    }

    pub fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(set) = self.classes.get_mut(id) {
            set.remove(class);
        }
    }

    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    pub fn set_field(&mut self, id: &str, value: impl Into<String>) {
        self.fields.insert(id.to_string(), value.into());
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.text.get(id).map(String::as_str)
    }

    pub fn set_text(&mut self, id: &str, value: impl Into<String>) {
        self.text.insert(id.to_string(), value.into());
    }

    pub fn style(&self, id: &str, property: &str) -> Option<&str> {
        self.styles
            .get(id)
            .and_then(|props| props.get(property))
            .map(String::as_str)
    }

    pub fn set_style(&mut self, id: &str, property: &str, value: impl Into<String>) {
        self.styles
            .entry(id.to_string())
            .or_default()
            .insert(property.to_string(), value.into());
    }

    // ── charts and animations ──────────────────────────────

    /// Mount `chart` on its canvas, replacing whatever was drawn there.
    pub fn mount_chart(&mut self, chart: Chart) {
        self.charts.insert(chart.canvas().to_string(), chart);
    }

    pub fn destroy_chart(&mut self, canvas: &str) -> Option<Chart> {
        self.charts.remove(canvas)
    }

    pub fn chart(&self, canvas: &str) -> Option<&Chart> {
        self.charts.get(canvas)
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    pub fn start_animation(&mut self, target: &str, animation: NumberAnimation) {
        self.set_text(target, animation.value_at(Duration::ZERO).to_string());
        self.animations.push((target.to_string(), animation));
    }

    pub fn cancel_animation(&mut self, target: &str) {
        self.animations.retain(|(t, _)| t != target);
    }

    /// Advance every running animation to `elapsed` since it started and drop
    /// the ones that have settled.
    pub fn advance_animations(&mut self, elapsed: Duration) {
        let frames: Vec<(String, i64)> = self
            .animations
            .iter()
            .map(|(target, anim)| (target.clone(), anim.value_at(elapsed)))
            .collect();
        for (target, value) in frames {
            self.set_text(&target, value.to_string());
        }
        self.animations.retain(|(_, anim)| !anim.is_finished(elapsed));
    }

    pub fn running_animations(&self) -> usize {
        self.animations.len()
    }

    // ── listeners ──────────────────────────────────────────

    pub fn add_listener(&mut self, target: &str, event: &'static str, handler: Handler) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push(Listener {
            id,
            target: target.to_string(),
            event,
            handler,
        });
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        before != self.listeners.len()
    }

    pub fn listeners_for(&self, target: &str, event: &str) -> Vec<Handler> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.event == event)
            .map(|l| Arc::clone(&l.handler))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── notifications ──────────────────────────────────────

    /// Blocking user notification.
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("alert: {}", message);
        self.alerts.push(message);
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    // ── serialisation ──────────────────────────────────────

    /// The whole shell as a standalone HTML page, charts embedded as JSON.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "<!DOCTYPE html>");
        let _ = writeln!(out, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">");
        let _ = writeln!(out, "<title>{}</title>", esc(&self.title));
        let _ = writeln!(out, "</head>\n<body>");

        let _ = writeln!(
            out,
            "<aside id=\"sidebar\" class=\"sidebar{}\">\n<nav>",
            if self.sidebar_open { " open" } else { "" }
        );
        for item in &self.nav_items {
            let _ = writeln!(
                out,
                "<a class=\"nav-item{}\" data-page=\"{}\" href=\"#{}\">{}</a>",
                if item.active { " active" } else { "" },
                esc(&item.page),
                esc(&item.page),
                esc(&item.label)
            );
        }
        let _ = writeln!(out, "</nav>\n</aside>");

        let _ = writeln!(out, "<main id=\"content\">{}</main>", self.content);
        let _ = writeln!(
            out,
            "<aside id=\"rightPanel\"{}>{}</aside>",
            if self.panel_visible { "" } else { " style=\"display: none\"" },
            self.panel
        );

        let mut fragments: Vec<_> = self.fragments.iter().collect();
        fragments.sort();
        for (id, markup) in fragments {
            let _ = writeln!(out, "<template data-fragment=\"{}\">{}</template>", esc(id), markup);
        }

        let defaults = serde_json::to_string(&theme::chart_defaults())?;
        let _ = writeln!(
            out,
            "<script type=\"application/json\" id=\"chart-defaults\">{}</script>",
            script_safe(&defaults)
        );
        for (canvas, chart) in &self.charts {
            let _ = writeln!(
                out,
                "<script type=\"application/json\" data-chart=\"{}\">{}</script>",
                esc(canvas),
                script_safe(&chart.to_json()?)
            );
        }

        let _ = writeln!(out, "</body>\n</html>");
        Ok(out)
    }
}

fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts;
    use futures_util::FutureExt;

    fn doc() -> Document {
        Document::new([("dashboard", "Overview"), ("risk", "Risk"), ("settings", "Settings")])
    }

    #[test]
    fn test_highlight_is_exclusive() {
        let mut d = doc();
        d.highlight_nav("risk");
        assert_eq!(d.active_nav(), vec!["risk"]);
        d.highlight_nav("dashboard");
        assert_eq!(d.active_nav(), vec!["dashboard"]);
        d.highlight_nav("nowhere");
        assert!(d.active_nav().is_empty());
    }

    #[test]
    fn test_has_element_follows_content() {
        let mut d = doc();
        d.set_content(r#"<div id="analysisResult"></div>"#);
        assert!(d.has_element("analysisResult"));
        assert!(!d.has_element("analysis"));
        d.set_content("<p>risk</p>");
        assert!(!d.has_element("analysisResult"));
    }

    #[test]
    fn test_set_content_drops_element_state() {
        let mut d = doc();
        d.set_content("<form id=\"f\"></form>");
        d.set_field("revenue", "10");
        d.add_class("btn", "btn-loading");
        d.set_fragment("result", "<p>78</p>");
        d.set_content("<p>other</p>");
        assert!(d.field("revenue").is_none());
        assert!(!d.has_class("btn", "btn-loading"));
        assert!(d.fragment("result").is_none());
    }

    #[test]
    fn test_outside_click_closes_drawer_on_mobile_only() {
        let mut d = doc();
        d.handle_click(ClickTarget::MenuButton, 800);
        assert!(d.sidebar_open());
        d.handle_click(ClickTarget::Sidebar, 800);
        assert!(d.sidebar_open());
        d.handle_click(ClickTarget::Elsewhere, 1440);
        assert!(d.sidebar_open());
        d.handle_click(ClickTarget::Elsewhere, 800);
        assert!(!d.sidebar_open());
    }

    #[test]
    fn test_animation_updates_text_until_settled() {
        let mut d = doc();
        d.start_animation("score", NumberAnimation::count_up(78.0, Duration::from_millis(1000)));
        assert_eq!(d.text("score"), Some("0"));
        d.advance_animations(Duration::from_millis(500));
        assert_eq!(d.text("score"), Some("68"));
        assert_eq!(d.running_animations(), 1);
        d.advance_animations(Duration::from_millis(1000));
        assert_eq!(d.text("score"), Some("78"));
        assert_eq!(d.running_animations(), 0);
    }

    #[test]
    fn test_to_html_marks_active_and_hidden_panel() {
        let mut d = doc();
        d.set_title("Risk · CredLens");
        d.set_content("<h1>Risk</h1>");
        d.highlight_nav("risk");
        d.hide_panel();
        d.mount_chart(charts::sparkline("spark", &[1.0, 2.0], None, None));

        let html = d.to_html().unwrap();
        assert!(html.contains("<title>Risk · CredLens</title>"));
        assert!(html.contains("class=\"nav-item active\" data-page=\"risk\""));
        assert!(html.contains("class=\"nav-item\" data-page=\"dashboard\""));
        assert!(html.contains("<main id=\"content\"><h1>Risk</h1></main>"));
        assert!(html.contains("id=\"rightPanel\" style=\"display: none\""));
        assert!(html.contains("data-chart=\"spark\""));
    }

    #[test]
    fn test_listener_registration() {
        let mut d = doc();
        let handler: Handler = Arc::new(|_ctx: AppContext| async {}.boxed());
        let id = d.add_listener("form", "submit", handler);
        assert_eq!(d.listeners_for("form", "submit").len(), 1);
        assert!(d.listeners_for("form", "click").is_empty());
        assert!(d.remove_listener(id));
        assert!(!d.remove_listener(id));
        assert_eq!(d.listener_count(), 0);
    }
}

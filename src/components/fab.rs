use log::debug;

use crate::utils::{edit_href, escape_attr, escape_html};

/// Represents a FAB action button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabAction {
    pub href: String,
    pub title: String,
    pub class: String,
}

/// Component for the floating action bar shown on entry pages
pub struct FabComponent;

impl FabComponent {
    /// Create a new FAB component
    pub fn new() -> Self {
        Self
    }

    /// Actions available while viewing `entry_title`
    pub fn generate_actions(&self, entry_title: &str) -> Vec<FabAction> {
        vec![FabAction {
            href: edit_href(entry_title),
            title: "Edit this page".to_string(),
            class: "fab-action-edit".to_string(),
        }]
    }

    /// Generate complete FAB HTML; empty when there are no actions
    pub fn generate_fab_html(&self, actions: &[FabAction]) -> String {
        if actions.is_empty() {
            return String::new();
        }
        debug!("Generating FAB HTML with {} actions", actions.len());

        let mut html = String::from("<div class=\"fab\" id=\"fab\"><div class=\"fab-actions\">");
        for action in actions {
            html.push_str(&format!(
                "<a href=\"{}\" title=\"{}\" class=\"{}\">{}</a>",
                escape_attr(&action.href),
                escape_attr(&action.title),
                escape_attr(&action.class),
                escape_html(&action.title)
            ));
        }
        html.push_str("</div></div>");
        html
    }
}

impl Default for FabComponent {
    fn default() -> Self {
        Self::new()
    }
}

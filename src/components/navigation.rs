use log::debug;

use crate::utils::escape_attr;

/// Sidebar links, in display order
const LINKS: [(&str, &str); 3] = [
    ("/", "Home"),
    ("/create", "Create New Page"),
    ("/random", "Random Page"),
];

/// Component for handling navigation and sidebar generation
pub struct NavigationComponent;

impl NavigationComponent {
    /// Create a new navigation component
    pub fn new() -> Self {
        Self
    }

    /// Build sidebar HTML; `query` pre-fills the search box
    pub fn build_sidebar_html(&self, current_path: &str, query: &str) -> String {
        debug!("Building sidebar for path: '{}'", current_path);

        let mut html = String::new();
        html.push_str("<nav class=\"sidebar-nav\">");
        html.push_str("<h2 class=\"sidebar-title\">Wiki</h2>");

        html.push_str("<form class=\"search\" action=\"/search\" method=\"get\">");
        html.push_str(&format!(
            "<input type=\"search\" name=\"q\" placeholder=\"Search Encyclopedia\" value=\"{}\">",
            escape_attr(query)
        ));
        html.push_str("</form>");

        html.push_str("<ul class=\"nav-list\">");
        for (href, label) in LINKS {
            if href == current_path {
                html.push_str(&format!("<li class=\"current\"><a href=\"{href}\">{label}</a></li>"));
            } else {
                html.push_str(&format!("<li><a href=\"{href}\">{label}</a></li>"));
            }
        }
        html.push_str("</ul>");
        html.push_str("</nav>");
        html
    }
}

impl Default for NavigationComponent {
    fn default() -> Self {
        Self::new()
    }
}

use crate::types::{FormView, View};
use crate::utils::{edit_href, entry_href, escape_attr, escape_html, last_modified_html};

/// A view turned into HTML, plus what the surrounding page needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub title: String,
    pub body: String,
    /// Sidebar link to highlight
    pub nav_path: &'static str,
    /// Entry whose edit action belongs in the action bar
    pub entry: Option<String>,
    /// Pre-fill for the sidebar search box
    pub query: String,
}

impl RenderedView {
    fn page(title: impl Into<String>, body: String, nav_path: &'static str) -> Self {
        Self {
            title: title.into(),
            body,
            nav_path,
            entry: None,
            query: String::new(),
        }
    }
}

/// Render the body of `view`
pub fn render_view(view: &View) -> RenderedView {
    match view {
        View::Index { entries } => RenderedView::page("All Pages", render_index(entries), "/"),
        View::Entry { title, html, modified } => {
            let body = format!(
                "<article class=\"entry\">{}{}</article>",
                last_modified_html(*modified),
                html
            );
            RenderedView {
                entry: Some(title.clone()),
                ..RenderedView::page(title.as_str(), body, "")
            }
        }
        View::Search { query, matches } => RenderedView {
            query: query.clone(),
            ..RenderedView::page("Search", render_search_results(query, matches), "")
        },
        View::Create(form) => RenderedView::page(
            "Create New Page",
            render_form("Create New Page", "/create", form),
            "/create",
        ),
        View::Edit { target, form } => RenderedView::page(
            format!("Edit {target}"),
            render_form(&format!("Edit {target}"), &edit_href(target), form),
            "",
        ),
        View::Message { heading, message } => RenderedView::page(
            heading.as_str(),
            format!(
                "<div class=\"message\"><h1>{}</h1><p class=\"error-message\">{}</p></div>",
                escape_html(heading),
                escape_html(message)
            ),
            "",
        ),
    }
}

fn render_title_list(html: &mut String, titles: &[String]) {
    html.push_str("<ul class=\"listing\">\n");
    for title in titles {
        html.push_str(&format!(
            "  <li><a href=\"{}\">{}</a></li>\n",
            escape_attr(&entry_href(title)),
            escape_html(title)
        ));
    }
    html.push_str("</ul>\n");
}

fn render_index(entries: &[String]) -> String {
    let mut html = String::from("<h1>All Pages</h1>\n");
    if entries.is_empty() {
        html.push_str("<p class=\"no-results\">There are no pages yet. <a href=\"/create\">Create one</a>.</p>\n");
    } else {
        render_title_list(&mut html, entries);
    }
    html
}

fn render_search_results(query: &str, matches: &[String]) -> String {
    let mut html = String::from("<div class=\"search-results\">");
    html.push_str(&format!(
        "<h1 class=\"search-header\">Search Results for \"{}\"</h1>",
        escape_html(query)
    ));
    html.push_str(&format!(
        "<p class=\"results-count\">Found {} page{}</p>\n",
        matches.len(),
        if matches.len() == 1 { "" } else { "s" }
    ));
    render_title_list(&mut html, matches);
    html.push_str(&format!(
        "<p class=\"search-create\"><a href=\"/create\">Create a new page</a> if \"{}\" is missing.</p>",
        escape_html(query)
    ));
    html.push_str("</div>");
    html
}

fn render_form(heading: &str, action: &str, form: &FormView) -> String {
    let mut html = format!("<h1>{}</h1>", escape_html(heading));
    if let Some(error) = &form.error {
        html.push_str(&format!("<p class=\"form-error\">{}</p>", escape_html(error)));
    }
    html.push_str(&format!(
        "<form class=\"entry-form\" action=\"{}\" method=\"post\">",
        escape_attr(action)
    ));
    html.push_str(&format!(
        "<label for=\"title\">Title</label><input type=\"text\" id=\"title\" name=\"title\" value=\"{}\">",
        escape_attr(&form.title)
    ));
    html.push_str(&format!(
        "<label for=\"content\">Content (Markdown)</label><textarea id=\"content\" name=\"content\" rows=\"20\">{}</textarea>",
        escape_html(&form.content)
    ));
    html.push_str("<button type=\"submit\">Save</button>");
    html.push_str("</form>");
    html
}

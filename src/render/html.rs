//! Standalone HTML page
//!
//! Embeds the plotly figure JSON in a page that loads plotly.js from its CDN.
//! Each page gets a fresh container id so several pages can be concatenated.

use super::figure::to_figure;
use crate::sankey::diagram::Diagram;
use crate::sankey::error::{Result, SankeyError};
use handlebars::Handlebars;
use serde::Serialize;
use uuid::Uuid;

/// plotly.js bundle loaded by the page
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const PAGE_TEMPLATE_NAME: &str = "sankey_page";

/// `{{…}}` values are HTML-escaped; the figure is inserted raw with `{{{…}}}`
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<script src="{{cdn}}" charset="utf-8"></script>
</head>
<body>
<div id="{{id}}" style="width:{{width}}px;height:{{height}}px;"></div>
<script>
var figure = {{{figure}}};
Plotly.newPlot("{{id}}", figure.data, figure.layout);
</script>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    title: &'a str,
    cdn: &'a str,
    id: String,
    width: u32,
    height: u32,
    figure: String,
}

fn page_registry() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars
        .register_template_string(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
        .map_err(|e| SankeyError::Template(format!("Invalid page template: {}", e)))?;
    Ok(handlebars)
}

/// Render the diagram as a complete HTML document
pub fn render_page(diagram: &Diagram) -> Result<String> {
    // "</" would close the script element early
    let figure = serde_json::to_string(&to_figure(diagram))?.replace("</", "<\\/");

    let context = PageContext {
        title: &diagram.title,
        cdn: PLOTLY_CDN,
        id: format!("sankey-{}", Uuid::new_v4()),
        width: diagram.style.width,
        height: diagram.style.height,
        figure,
    };

    page_registry()?
        .render(PAGE_TEMPLATE_NAME, &context)
        .map_err(|e| SankeyError::Template(format!("Failed to render page: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::sankey::diagram::build_diagram;

    #[test]
    fn test_page_template_registers() {
        assert!(page_registry().is_ok());
    }

    #[test]
    fn test_page_embeds_figure() {
        let config = ChartConfig::default().with_title("Scans <by> state");
        let page = render_page(&build_diagram(&[], &config)).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(PLOTLY_CDN));
        assert!(page.contains("<title>Scans &lt;by&gt; state</title>"));
        assert!(page.contains("Plotly.newPlot(\"sankey-"));
        assert!(page.contains("\"type\":\"sankey\""));
        // Hover template markup must not terminate the script block
        assert!(!page.contains("</b>"));
        assert!(page.contains("<\\/b>"));
    }

    #[test]
    fn test_title_quotes_escaped() {
        let config = ChartConfig::default().with_title(r#"A & "B""#);
        let page = render_page(&build_diagram(&[], &config)).unwrap();
        assert!(page.contains("<title>A &amp; &quot;B&quot;</title>"));
    }

    #[test]
    fn test_unique_container_ids() {
        let diagram = build_diagram(&[], &ChartConfig::default());
        let a = render_page(&diagram).unwrap();
        let b = render_page(&diagram).unwrap();
        assert_ne!(a, b);
    }
}

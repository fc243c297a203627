//! # KPI Card
//!
//! HTML fragment for a single metric tile.

/// Render a KPI card.
///
/// `status_class` is appended to the `card` class, e.g. `status-green`.
/// All three inputs are HTML-escaped.
pub fn render_kpi_card(metric: &str, value: impl std::fmt::Display, status_class: &str) -> String {
    format!(
        "<div class='card {}'><span>{}</span><span>{}</span></div>",
        escape_html(status_class),
        escape_html(metric),
        escape_html(&value.to_string())
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_contains_all_fields() {
        let html = render_kpi_card("Inventory", 100, "status-green");
        assert_eq!(
            html,
            "<div class='card status-green'><span>Inventory</span><span>100</span></div>"
        );
    }

    #[test]
    fn card_escapes_markup() {
        let html = render_kpi_card("<b>Fill</b> & 'Rate'", 9.5, "status-red");
        assert!(html.contains("&lt;b&gt;Fill&lt;/b&gt; &amp; &#39;Rate&#39;"));
        assert!(html.contains("<span>9.5</span>"));
    }
}

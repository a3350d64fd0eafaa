//! Browser assets compiled into the binary.

/// Dashboard page.
pub const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Page script: session setup, submit, auto-refresh and hover.
pub const DASHBOARD_JS: &str = include_str!("../assets/dashboard.js");

/// Plotly bundle the page loads.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_has_every_panel() {
        for id in [
            "site-select",
            "start-date",
            "end-date",
            "submit-button",
            "download-link",
            "time-series",
            "wave-polar",
            "wind-polar",
        ] {
            assert!(INDEX_HTML.contains(&format!("id=\"{}\"", id)), "missing #{}", id);
        }
        assert!(INDEX_HTML.contains("Rutgers HFRadar Wave Viewer"));
        assert!(INDEX_HTML.contains(PLOTLY_CDN));
        assert!(INDEX_HTML.contains("/assets/dashboard.js"));
    }

    #[test]
    fn script_talks_to_session_api() {
        for path in ["/api/config", "/api/sites", "/api/sessions", "/refresh", "/hover", "/query"] {
            assert!(DASHBOARD_JS.contains(path), "script never calls {}", path);
        }
        assert!(DASHBOARD_JS.contains("plotly_hover"));
        assert!(DASHBOARD_JS.contains("setInterval"));
    }

    #[test]
    fn date_inputs_follow_server_dates() {
        assert!(DASHBOARD_JS.contains("input.max = config.latest_date"));
        assert!(DASHBOARD_JS.contains("session.view.window.start"));
        assert!(DASHBOARD_JS.contains("session.view.window.end"));
        assert!(!DASHBOARD_JS.contains("toISOString"));
    }
}

//! Static pages and the one rendered result page, embedded at compile time.

pub const INDEX_HTML: &str = include_str!("../templates/index.html");
pub const DASHBOARD_HTML: &str = include_str!("../templates/dashboard.html");

const RESULT_HTML: &str = include_str!("../templates/result.html");

/// Renders the result page for a predicted class (0 = stays, 1 = churns).
pub fn render_result(class: usize) -> String {
    let verdict = if class == 1 {
        "likely to churn"
    } else {
        "likely to stay"
    };
    RESULT_HTML
        .replace("{{prediction}}", &class.to_string())
        .replace("{{verdict}}", verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_page_substitutes_the_prediction() {
        let page = render_result(1);
        assert!(page.contains('1'));
        assert!(page.contains("likely to churn"));
        assert!(!page.contains("{{prediction}}"));
        assert!(!page.contains("{{verdict}}"));
    }

    #[test]
    fn class_zero_renders_the_stay_verdict() {
        assert!(render_result(0).contains("likely to stay"));
    }

    #[test]
    fn static_pages_are_nonempty() {
        assert!(INDEX_HTML.contains("</form>"));
        assert!(DASHBOARD_HTML.contains("</html>"));
    }
}

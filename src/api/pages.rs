//! Server-rendered HTML pages
//!
//! Small enough to build with `format!`; every interpolated string goes
//! through [`escape`].

use std::fmt::Write as _;

use crate::engine::FeatureSchema;
use crate::types::{FertilityClass, PredictionResult};

const TITLE: &str = "Soil Health Analyzer";

/// Minimal HTML escaping for text and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(heading: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{heading} | {TITLE}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header><a href="/" class="brand">{TITLE}</a></header>
<main>
{body}
</main>
<script src="/static/main.js"></script>
</body>
</html>
"#,
        heading = escape(heading),
    )
}

/// The twelve-field measurement form.
pub fn render_index() -> String {
    let mut fields = String::new();
    for spec in FeatureSchema::specs() {
        let unit = if spec.unit.is_empty() {
            String::new()
        } else {
            format!(" <span class=\"unit\">({})</span>", escape(spec.unit))
        };
        let _ = write!(
            fields,
            r#"<div class="field">
<label for="{id}">{label}{unit}</label>
<input type="number" step="any" id="{id}" name="{id}" min="{min}" max="{max}" placeholder="{typical}" required>
</div>
"#,
            id = spec.id.as_str(),
            label = escape(spec.label),
            min = spec.min,
            max = spec.max,
            typical = escape(spec.typical_range),
        );
    }

    let body = format!(
        r#"<section class="card">
<h1>Soil Fertility Analysis</h1>
<p>Enter the laboratory results for your soil sample.</p>
<form id="soil-form" method="post" action="/predict">
<div class="grid">
{fields}</div>
<div class="actions">
<button type="button" id="fill-sample-data" class="secondary">Fill sample data</button>
<button type="submit">Analyze soil</button>
</div>
</form>
</section>"#
    );
    layout("Analyze", &body)
}

fn class_css(class: FertilityClass) -> &'static str {
    match class {
        FertilityClass::LessFertile => "less-fertile",
        FertilityClass::Fertile => "fertile",
        FertilityClass::HighlyFertile => "highly-fertile",
    }
}

/// Result page: class, confidence, remediation plan and the submitted values.
pub fn render_result(result: &PredictionResult) -> String {
    let rec = result.recommendation;

    let mut actions = String::new();
    for action in rec.actions {
        let _ = writeln!(actions, "<li>{}</li>", escape(action));
    }

    let mut rows = String::new();
    for (id, value) in result.input_data.iter() {
        let spec = FeatureSchema::spec(id);
        let _ = writeln!(
            rows,
            "<tr><th>{}</th><td>{}{}</td></tr>",
            escape(spec.label),
            value,
            escape(&spec.unit_suffix()),
        );
    }

    let body = format!(
        r#"<section class="card result {css}">
<h1>{label}</h1>
<p class="meta">Confidence {confidence:.0}% &middot; {timestamp}</p>
<h2>{title}</h2>
<p>{description}</p>
<ol class="plan">
{actions}</ol>
</section>
<section class="card">
<h2>Submitted measurements</h2>
<table class="inputs">
{rows}</table>
<p><a href="/" class="button">Analyze another sample</a></p>
</section>"#,
        css = class_css(result.prediction),
        label = escape(result.fertility_class),
        confidence = result.confidence_score * 100.0,
        timestamp = escape(&result.formatted_timestamp()),
        title = escape(rec.title),
        description = escape(rec.description),
    );
    layout(result.fertility_class, &body)
}

/// Error page with a single message.
pub fn render_error(message: &str) -> String {
    let body = format!(
        r#"<section class="card error">
<h1>Something went wrong</h1>
<p class="message">{}</p>
<p><a href="/" class="button">Back to the form</a></p>
</section>"#,
        escape(message)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Classifier, PredictionService};
    use crate::types::RawMeasurements;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_index_has_every_field_with_bounds() {
        let html = render_index();
        for spec in FeatureSchema::specs() {
            assert!(html.contains(&format!("name=\"{}\"", spec.id.as_str())));
            assert!(html.contains(&format!("max=\"{}\"", spec.max)));
        }
        assert!(html.contains("action=\"/predict\""));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error("Invalid value for Zinc (Zn): <script>");
        assert!(html.contains("Invalid value for Zinc (Zn): &lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_result_page_shows_plan() {
        let raw: RawMeasurements = [
            ("N", "50"), ("P", "20"), ("K", "30"), ("pH", "6.5"), ("EC", "0.5"), ("OC", "1"),
            ("S", "5"), ("Zn", "1"), ("Fe", "5"), ("Cu", "0.5"), ("Mn", "2"), ("B", "0.5"),
        ]
        .into_iter()
        .collect();
        let result = PredictionService::new(Classifier::fallback()).predict(&raw).unwrap();

        let html = render_result(&result);
        assert!(html.contains("<h1>Fertile</h1>"));
        assert!(html.contains("Confidence 70%"));
        assert!(html.contains("Soil Maintenance Plan for Fertile Soil"));
        assert!(html.contains("Potassium (K)"));
        assert_eq!(html.matches("<li>").count(), 8);
    }
}

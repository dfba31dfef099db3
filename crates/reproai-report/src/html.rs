//! Static HTML view of a [`Report`].
//!
//! Rendered only from the report value; every piece of text is escaped.

use std::fmt::Write;

use reproai_core::entities::{ArtifactRef, Assessment, Report};
use reproai_core::enums::Dimension;

use crate::ReportError;

const UNAVAILABLE: &str = r#"<span class="unavailable">unavailable</span>"#;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f5f5f7;color:#1d1d1f}\
main{max-width:960px;margin:0 auto;padding:24px}\
.card{background:#fff;border-radius:8px;padding:16px 24px;margin-bottom:16px;box-shadow:0 1px 3px rgba(0,0,0,.1)}\
table{border-collapse:collapse;width:100%}th,td{text-align:left;padding:4px 8px;border-bottom:1px solid #e5e5e5}\
.badge{display:inline-block;padding:2px 10px;border-radius:12px;background:#1d1d1f;color:#fff;font-weight:600}\
.unavailable{color:#a1a1a6;font-style:italic}footer{color:#6e6e73;font-size:.85em}";

/// Render the report as a standalone HTML document.
///
/// # Errors
///
/// Returns [`ReportError::Render`] if formatting fails.
pub fn render_html(report: &Report) -> Result<String, ReportError> {
    let mut out = String::with_capacity(8 * 1024);
    let info = &report.report;

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, r#"<html lang="en">"#)?;
    writeln!(out, "<head>")?;
    writeln!(out, r#"<meta charset="utf-8">"#)?;
    writeln!(
        out,
        "<title>Reproducibility report: {}</title>",
        escape(&info.github_id)
    )?;
    writeln!(out, "<style>{STYLE}</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<main>")?;
    writeln!(out, "<h1>Reproducibility report</h1>")?;
    writeln!(
        out,
        "<p>{} &middot; {}</p>",
        escape(&info.paper_id),
        escape(&info.github_id)
    )?;

    paper_card(&mut out, report)?;
    repository_card(&mut out, report)?;
    assessment_card(&mut out, &report.reproducibility_assessment)?;
    artifacts_card(&mut out, report)?;
    unavailable_card(&mut out, report)?;

    writeln!(
        out,
        "<footer>Generated {} &middot; JSON: {}</footer>",
        escape(&info.generated_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
        escape(&info.json_path)
    )?;
    writeln!(out, "</main>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

fn paper_card(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, r#"<section class="card" id="paper">"#)?;
    writeln!(out, "<h2>Paper</h2>")?;
    match &report.metadata.paper {
        Some(paper) => {
            writeln!(out, "<h3>{}</h3>", escape(&paper.title))?;
            writeln!(out, "<dl>")?;
            row(out, "Authors", &text_or_unavailable(&paper.authors.join(", ")))?;
            row(
                out,
                "Year",
                &paper
                    .published_year
                    .map_or_else(|| UNAVAILABLE.to_string(), |y| y.to_string()),
            )?;
            row(out, "Venue", &opt_text(paper.venue.as_deref()))?;
            row(out, "DOI", &opt_text(paper.doi.as_deref()))?;
            writeln!(out, "</dl>")?;
        }
        None => writeln!(out, "<p>{UNAVAILABLE}</p>")?,
    }
    match &report.metadata.usage {
        Some(usage) => writeln!(
            out,
            "<p>Citations: {} total, {} in the last two years</p>",
            usage.citation_count, usage.recent_citations
        )?,
        None => writeln!(out, "<p>Citations: {UNAVAILABLE}</p>")?,
    }
    writeln!(out, "</section>")
}

fn repository_card(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, r#"<section class="card" id="repository">"#)?;
    writeln!(out, "<h2>Repository</h2>")?;
    let Some(repo) = &report.metadata.repository else {
        writeln!(out, "<p>{UNAVAILABLE}</p>")?;
        return writeln!(out, "</section>");
    };

    match &repo.html_url {
        Some(url) => writeln!(
            out,
            r#"<h3><a href="{}">{}</a></h3>"#,
            escape(url),
            escape(&repo.github_id)
        )?,
        None => writeln!(out, "<h3>{}</h3>", escape(&repo.github_id))?,
    }
    writeln!(out, "<dl>")?;
    row(out, "Description", &opt_text(repo.description.as_deref()))?;
    row(
        out,
        "Stars / forks / watchers",
        &format!(
            "{} / {} / {}",
            repo.stars,
            repo.forks,
            repo.watchers
                .map_or_else(|| UNAVAILABLE.to_string(), |w| w.to_string())
        ),
    )?;
    row(out, "Open issues", &repo.open_issues.to_string())?;
    row(out, "Language", &opt_text(repo.primary_language.as_deref()))?;
    row(out, "Default branch", &opt_text(repo.default_branch.as_deref()))?;
    row(
        out,
        "Last push",
        &repo.updated_at.map_or_else(
            || UNAVAILABLE.to_string(),
            |t| escape(&t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
        ),
    )?;
    row(
        out,
        "Top-level files",
        &text_or_unavailable(&repo.summary.top_level.join(", ")),
    )?;
    writeln!(out, "</dl>")?;
    writeln!(out, "</section>")
}

fn assessment_card(out: &mut String, assessment: &Assessment) -> std::fmt::Result {
    writeln!(out, r#"<section class="card" id="assessment">"#)?;
    writeln!(out, "<h2>Reproducibility assessment</h2>")?;
    match assessment.class {
        Some(class) => writeln!(out, r#"<p>Class <span class="badge">{class}</span></p>"#)?,
        None => writeln!(out, "<p>Class {UNAVAILABLE}</p>")?,
    }
    writeln!(
        out,
        "<p>{}</p>",
        opt_text(assessment.rationale.as_deref().filter(|r| !r.trim().is_empty()))
    )?;
    writeln!(
        out,
        "<p>Real-world evidence score: <strong>{:.4}</strong> (missing signals: {})</p>",
        assessment.rwe_score, assessment.missing_signal_policy
    )?;

    writeln!(out, "<table>")?;
    writeln!(out, "<tr><th>Dimension</th><th>Weight</th><th>Score</th></tr>")?;
    for dimension in Dimension::ALL {
        let weight = assessment.rwe_weights.get(&dimension).copied().unwrap_or(0.0);
        let score = assessment
            .rwe_dimensions
            .get(&dimension)
            .copied()
            .flatten()
            .map_or_else(|| UNAVAILABLE.to_string(), |s| format!("{s:.4}"));
        writeln!(
            out,
            "<tr><td>{}</td><td>{weight:.2}</td><td>{score}</td></tr>",
            dimension.label()
        )?;
    }
    writeln!(out, "</table>")?;
    writeln!(out, "</section>")
}

fn artifacts_card(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, r#"<section class="card" id="artifacts">"#)?;
    writeln!(out, "<h2>Artifacts</h2>")?;
    for (title, artifacts) in report.artifacts.sections() {
        writeln!(out, "<h3>{title}</h3>")?;
        if artifacts.is_empty() {
            writeln!(out, "<p>None found.</p>")?;
            continue;
        }
        writeln!(out, "<table>")?;
        writeln!(
            out,
            "<tr><th>Name</th><th>Identifier</th><th>Source</th><th>Downloads</th><th>Likes</th><th>Mentioned in</th></tr>"
        )?;
        for artifact in artifacts {
            artifact_row(out, artifact)?;
        }
        writeln!(out, "</table>")?;
    }
    writeln!(out, "</section>")
}

fn artifact_row(out: &mut String, artifact: &ArtifactRef) -> std::fmt::Result {
    let id = match &artifact.url {
        Some(url) => format!(
            r#"<a href="{}">{}</a>"#,
            escape(url),
            escape(&artifact.external_id)
        ),
        None => escape(&artifact.external_id),
    };
    let count = |value: Option<u64>| value.map_or_else(|| UNAVAILABLE.to_string(), |v| v.to_string());
    let origin = match artifact.mentioned_in {
        reproai_core::enums::MentionOrigin::Paper => "paper",
        reproai_core::enums::MentionOrigin::Repository => "repository",
    };
    writeln!(
        out,
        "<tr><td>{}</td><td>{id}</td><td>{}</td><td>{}</td><td>{}</td><td>{origin}</td></tr>",
        escape(&artifact.name),
        artifact.source,
        count(artifact.downloads),
        count(artifact.likes),
    )
}

fn unavailable_card(out: &mut String, report: &Report) -> std::fmt::Result {
    if report.unavailable.is_empty() {
        return Ok(());
    }
    writeln!(out, r#"<section class="card" id="unavailable">"#)?;
    writeln!(out, "<h2>Unavailable sections</h2>")?;
    writeln!(out, "<ul>")?;
    for entry in &report.unavailable {
        writeln!(
            out,
            "<li><strong>{}</strong>: {}</li>",
            entry.section,
            escape(&entry.reason)
        )?;
    }
    writeln!(out, "</ul>")?;
    writeln!(out, "</section>")
}

fn row(out: &mut String, label: &str, value_html: &str) -> std::fmt::Result {
    writeln!(out, "<dt>{label}</dt><dd>{value_html}</dd>")
}

fn opt_text(value: Option<&str>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), text_or_unavailable)
}

fn text_or_unavailable(value: &str) -> String {
    if value.trim().is_empty() {
        UNAVAILABLE.to_string()
    } else {
        escape(value)
    }
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }
}

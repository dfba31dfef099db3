//! Report assembly and writing against a temporary output directory.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use reproai_core::entities::*;
use reproai_core::enums::*;
use reproai_report::{OutputPaths, ReportError, ReportInputs, assemble, render_html, write_report};

fn score() -> EvidenceScore {
    EvidenceScore {
        overall: 0.6123,
        dimensions: BTreeMap::from([
            (Dimension::RepositoryActivity, Some(0.6387)),
            (Dimension::ArtifactDownloads, None),
            (Dimension::Citations, Some(0.7525)),
            (Dimension::CommunityAdoption, Some(0.4407)),
        ]),
        weights: BTreeMap::from([
            (Dimension::RepositoryActivity, 0.35),
            (Dimension::ArtifactDownloads, 0.2),
            (Dimension::Citations, 0.3),
            (Dimension::CommunityAdoption, 0.15),
        ]),
        policy: MissingSignalPolicy::Renormalize,
    }
}

fn inputs() -> ReportInputs {
    ReportInputs {
        paper_id: "W4390875033".into(),
        github_id: "M-3LAB/awesome-industrial-anomaly-detection".into(),
        paper: Some(PaperRecord {
            paper_id: "W4390875033".into(),
            source_id: None,
            title: "Anomaly <Detection> & Friends".into(),
            published_year: Some(2024),
            authors: vec!["Jiaqi Liu".into()],
            venue: None,
            doi: None,
            full_text: "Anomaly detection".into(),
        }),
        repository: Some(RepositoryRecord {
            github_id: "M-3LAB/awesome-industrial-anomaly-detection".into(),
            html_url: Some("https://github.com/M-3LAB/awesome-industrial-anomaly-detection".into()),
            description: Some("Paper list".into()),
            default_branch: Some("main".into()),
            stars: 412,
            forks: 97,
            open_issues: 3,
            watchers: Some(21),
            primary_language: None,
            updated_at: None,
            summary: RepositorySummary::default(),
        }),
        usage: Some(UsageInsights {
            citation_count: 180,
            recent_citations: 95,
        }),
        classification: None,
        score: score(),
        artifacts: vec![ArtifactRef {
            kind: ArtifactKind::Checkpoint,
            name: "best.pth".into(),
            source: ArtifactSource::Repository,
            external_id: "weights/best.pth".into(),
            url: None,
            downloads: None,
            likes: None,
            mentioned_in: MentionOrigin::Repository,
        }],
        unavailable: vec![Unavailable::new(
            ReportSection::Classification,
            "classifier returned 500",
        )],
    }
}

fn generated_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn writes_both_views_and_nothing_else() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("reports");
    let paths = OutputPaths::resolve(&out, "M-3LAB/awesome-industrial-anomaly-detection", None, None);
    let report = assemble(inputs(), &paths, generated_at()).unwrap();

    write_report(&report, &paths).unwrap();

    assert_eq!(
        entries(&out),
        vec![
            "awesome-industrial-anomaly-detection.html",
            "awesome-industrial-anomaly-detection.json",
        ]
    );

    let json = std::fs::read_to_string(&paths.json).unwrap();
    let recovered: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, report);
}

#[test]
fn html_is_escaped_and_marks_unavailable_fields() {
    let dir = tempfile::TempDir::new().unwrap();
    let paths = OutputPaths::resolve(dir.path(), "o/n", None, None);
    let report = assemble(inputs(), &paths, generated_at()).unwrap();
    let html = render_html(&report).unwrap();

    assert!(html.contains("Anomaly &lt;Detection&gt; &amp; Friends"));
    assert!(!html.contains("<Detection>"));
    assert!(html.contains(r#"Class <span class="unavailable">unavailable</span>"#));
    assert!(html.contains("classifier returned 500"));
    assert!(html.contains("0.6123"));
    assert!(html.contains("weights/best.pth"));
    assert!(html.contains("2026-03-04T05:06:07Z"));
}

#[test]
fn overrides_write_to_separate_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let json = dir.path().join("json/out.json");
    let html = dir.path().join("html/view.html");
    let paths = OutputPaths::resolve(dir.path(), "o/n", Some(&json), Some(&html));
    let report = assemble(inputs(), &paths, generated_at()).unwrap();

    write_report(&report, &paths).unwrap();

    assert!(json.exists());
    assert!(html.exists());
    assert_eq!(report.report.json_path, json.display().to_string());
}

#[test]
fn rewrite_replaces_previous_report() {
    let dir = tempfile::TempDir::new().unwrap();
    let paths = OutputPaths::resolve(dir.path(), "o/n", None, None);
    std::fs::write(&paths.json, "stale").unwrap();

    let report = assemble(inputs(), &paths, generated_at()).unwrap();
    write_report(&report, &paths).unwrap();

    let json = std::fs::read_to_string(&paths.json).unwrap();
    assert!(json.starts_with('{'));
    assert_eq!(entries(dir.path()), vec!["n.html", "n.json"]);
}

#[test]
fn failed_write_persists_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let json = dir.path().join("ok.json");
    let html = blocker.join("view.html");
    let paths = OutputPaths::resolve(dir.path(), "o/n", Some(&json), Some(&html));
    let report = assemble(inputs(), &paths, generated_at()).unwrap();

    let err = write_report(&report, &paths).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
    assert!(!json.exists());
    assert_eq!(entries(dir.path()), vec!["blocker"]);
}

#[test]
fn failed_html_rename_removes_new_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let html = dir.path().join("view.html");
    std::fs::create_dir(&html).unwrap();
    std::fs::write(html.join("keep.txt"), "occupied").unwrap();

    let json = dir.path().join("report.json");
    let paths = OutputPaths::resolve(dir.path(), "o/n", Some(&json), Some(&html));
    let report = assemble(inputs(), &paths, generated_at()).unwrap();

    let err = write_report(&report, &paths).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
    assert!(!json.exists());
    assert_eq!(entries(dir.path()), vec!["view.html"]);
}

#[test]
fn failed_html_rename_keeps_previous_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let html = dir.path().join("view.html");
    std::fs::create_dir(&html).unwrap();
    std::fs::write(html.join("keep.txt"), "occupied").unwrap();

    let json = dir.path().join("report.json");
    std::fs::write(&json, "previous run").unwrap();
    let paths = OutputPaths::resolve(dir.path(), "o/n", Some(&json), Some(&html));
    let report = assemble(inputs(), &paths, generated_at()).unwrap();

    assert!(write_report(&report, &paths).is_err());
    assert_eq!(std::fs::read_to_string(&json).unwrap(), "previous run");
    assert_eq!(entries(dir.path()), vec!["report.json", "view.html"]);
}

#[test]
fn empty_identifier_is_incomplete() {
    let mut given = inputs();
    given.github_id = String::new();
    let paths = OutputPaths::resolve(Path::new("unused"), "o/n", None, None);
    let err = assemble(given, &paths, generated_at()).unwrap_err();
    assert_eq!(
        err.as_repro_error(),
        Some(reproai_core::ReproError::IncompleteReport("github_id".into()))
    );
}

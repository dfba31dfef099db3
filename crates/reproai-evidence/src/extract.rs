//! Artifact mention extraction.
//!
//! A fixed set of regular expressions over known Hub URL forms, loader calls
//! and checkpoint file extensions. Results keep the order of first mention:
//! the paper text is scanned before the repository text, and matches within
//! one text are ordered by byte offset.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use reproai_core::entities::ArtifactRef;
use reproai_core::enums::{ArtifactKind, ArtifactSource, MentionOrigin};

const HUB_URL: &str = "https://huggingface.co";

/// First path segments on huggingface.co that are not user or org namespaces.
const RESERVED_HUB_OWNERS: &[&str] = &[
    "api",
    "blog",
    "collections",
    "datasets",
    "docs",
    "join",
    "learn",
    "login",
    "models",
    "new",
    "organizations",
    "papers",
    "posts",
    "pricing",
    "search",
    "settings",
    "spaces",
    "tasks",
];

static HUB_DATASET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)huggingface\.co/datasets/(\w[\w.-]*(?:/\w[\w.-]*)?)")
        .expect("valid hub dataset regex")
});

static HUB_MODEL_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)huggingface\.co/(\w[\w.-]*)/(\w[\w.-]*)").expect("valid hub model regex")
});

static FROM_PRETRAINED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"from_pretrained\(\s*["'](\w[\w.-]*(?:/\w[\w.-]*)?)["']"#)
        .expect("valid from_pretrained regex")
});

static PIPELINE_MODEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"pipeline\([^)]*?\bmodel\s*=\s*["'](\w[\w.-]*(?:/\w[\w.-]*)?)["']"#)
        .expect("valid pipeline regex")
});

static LOAD_DATASET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"load_dataset\(\s*["'](\w[\w.-]*(?:/\w[\w.-]*)?)["']"#)
        .expect("valid load_dataset regex")
});

static CHECKPOINT_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)[^\s"'`<>()\[\]{},;|*]+\.(?:ckpt|pth|pt|safetensors|bin|h5|onnx)\b"#)
        .expect("valid checkpoint regex")
});

/// One match before deduplication.
struct Mention {
    offset: usize,
    kind: ArtifactKind,
    source: ArtifactSource,
    external_id: String,
}

/// Extract artifact references from the paper text and repository text.
///
/// Duplicates by kind and case-insensitive external id collapse to the first
/// mention.
#[must_use]
pub fn extract_artifacts(paper_text: &str, repo_text: &str) -> Vec<ArtifactRef> {
    let mut seen = HashSet::new();
    let mut artifacts = Vec::new();

    for (text, origin) in [
        (paper_text, MentionOrigin::Paper),
        (repo_text, MentionOrigin::Repository),
    ] {
        for mention in scan(text) {
            let artifact = into_artifact(mention, origin);
            if seen.insert(artifact.dedup_key()) {
                artifacts.push(artifact);
            }
        }
    }

    tracing::debug!(count = artifacts.len(), "extracted artifact mentions");
    artifacts
}

/// All mentions in one text, ordered by byte offset.
fn scan(text: &str) -> Vec<Mention> {
    let mut mentions = Vec::new();

    for caps in HUB_DATASET_URL.captures_iter(text) {
        push_hub(&mut mentions, &caps, ArtifactKind::Dataset);
    }
    for caps in HUB_MODEL_URL.captures_iter(text) {
        let owner = &caps[1];
        if RESERVED_HUB_OWNERS
            .iter()
            .any(|reserved| owner.eq_ignore_ascii_case(reserved))
        {
            continue;
        }
        let offset = caps.get(0).map_or(0, |m| m.start());
        let id = format!("{owner}/{}", clean_id(&caps[2]));
        mentions.push(Mention {
            offset,
            kind: ArtifactKind::Model,
            source: ArtifactSource::Huggingface,
            external_id: id,
        });
    }
    for caps in FROM_PRETRAINED.captures_iter(text) {
        push_hub(&mut mentions, &caps, ArtifactKind::Model);
    }
    for caps in PIPELINE_MODEL.captures_iter(text) {
        push_hub(&mut mentions, &caps, ArtifactKind::Model);
    }
    for caps in LOAD_DATASET.captures_iter(text) {
        push_hub(&mut mentions, &caps, ArtifactKind::Dataset);
    }
    for m in CHECKPOINT_FILE.find_iter(text) {
        if is_module_path(&text[m.end()..]) {
            continue;
        }
        mentions.push(Mention {
            offset: m.start(),
            kind: ArtifactKind::Checkpoint,
            source: ArtifactSource::Repository,
            external_id: m.as_str().to_string(),
        });
    }

    // Stable: equal offsets keep rule order.
    mentions.sort_by_key(|m| m.offset);
    mentions
}

fn push_hub(mentions: &mut Vec<Mention>, caps: &regex::Captures<'_>, kind: ArtifactKind) {
    let offset = caps.get(0).map_or(0, |m| m.start());
    let id = clean_id(&caps[1]);
    if id.is_empty() {
        return;
    }
    mentions.push(Mention {
        offset,
        kind,
        source: ArtifactSource::Huggingface,
        external_id: id.to_string(),
    });
}

/// Whether a checkpoint-looking match continues as a dotted attribute or a
/// call (`torch.onnx.export(`, `keras.h5py(`), given the text after it.
fn is_module_path(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some('(') => true,
        Some('.') => chars.next().is_some_and(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// Drop sentence punctuation captured at the end of an id (`org/model.`).
fn clean_id(id: &str) -> &str {
    id.trim_end_matches(['.', '-'])
}

fn into_artifact(mention: Mention, origin: MentionOrigin) -> ArtifactRef {
    let name = mention
        .external_id
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(&mention.external_id)
        .to_string();

    let url = match (mention.source, mention.kind) {
        (ArtifactSource::Huggingface, ArtifactKind::Dataset) => {
            Some(format!("{HUB_URL}/datasets/{}", mention.external_id))
        }
        (ArtifactSource::Huggingface, _) => Some(format!("{HUB_URL}/{}", mention.external_id)),
        (ArtifactSource::Repository, _) => {
            let lowered = mention.external_id.to_ascii_lowercase();
            (lowered.starts_with("http://") || lowered.starts_with("https://"))
                .then(|| mention.external_id.clone())
        }
    };

    ArtifactRef {
        kind: mention.kind,
        name,
        source: mention.source,
        external_id: mention.external_id,
        url,
        downloads: None,
        likes: None,
        mentioned_in: origin,
    }
}

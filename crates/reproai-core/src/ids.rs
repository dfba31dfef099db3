//! Identifier resolution for the two run inputs.
//!
//! Both inputs arrive as free-form strings (URL or bare identifier) and are
//! normalized into canonical forms that are stable under re-parsing:
//!
//! | Input | Canonical |
//! |---|---|
//! | `W4390875033`, `https://openalex.org/w4390875033` | `W4390875033` |
//! | `10.1000/XYZ`, `doi:10.1000/xyz`, `https://doi.org/10.1000/xyz` | `doi:10.1000/xyz` |
//! | `2401.01234v2`, `arXiv:2401.01234`, `https://arxiv.org/abs/2401.01234` | `arxiv:2401.01234` |
//! | `owner/name`, `https://github.com/owner/name.git`, `git@github.com:owner/name` | `owner/name` |
//!
//! Resolution has no side effects and never touches the network.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::errors::ReproError;

const PAPER_FIELD: &str = "paper_id";
const REPO_FIELD: &str = "github_id";

const PAPER_HOSTS: &[&str] = &[
    "openalex.org",
    "api.openalex.org",
    "doi.org",
    "dx.doi.org",
    "arxiv.org",
    "export.arxiv.org",
];

// ---------------------------------------------------------------------------
// PaperId
// ---------------------------------------------------------------------------

/// Canonical paper identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaperId {
    /// OpenAlex work id, upper-case `W` prefix.
    OpenAlex(String),
    /// DOI without resolver prefix, lower-cased.
    Doi(String),
    /// arXiv id without version suffix.
    Arxiv(String),
}

impl PaperId {
    /// Parse and canonicalize a paper identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReproError::InvalidIdentifier`] when the input is empty or
    /// matches none of the supported URL or bare forms.
    pub fn parse(input: &str) -> Result<Self, ReproError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ReproError::invalid(
                PAPER_FIELD,
                input,
                "identifier must not be empty",
            ));
        }

        if let Some(url) = as_url(trimmed, PAPER_HOSTS, PAPER_FIELD)? {
            return Self::from_url(&url, trimmed);
        }

        if let Some(rest) = strip_prefix_ci(trimmed, "doi:") {
            return parse_doi(rest)
                .map(Self::Doi)
                .ok_or_else(|| ReproError::invalid(PAPER_FIELD, trimmed, "malformed DOI"));
        }
        if let Some(rest) = strip_prefix_ci(trimmed, "arxiv:") {
            return parse_arxiv(rest)
                .map(Self::Arxiv)
                .ok_or_else(|| ReproError::invalid(PAPER_FIELD, trimmed, "malformed arXiv id"));
        }
        if let Some(rest) = strip_prefix_ci(trimmed, "openalex:") {
            return parse_openalex(rest).map(Self::OpenAlex).ok_or_else(|| {
                ReproError::invalid(PAPER_FIELD, trimmed, "malformed OpenAlex work id")
            });
        }

        if let Some(work) = parse_openalex(trimmed) {
            return Ok(Self::OpenAlex(work));
        }
        if let Some(doi) = parse_doi(trimmed) {
            return Ok(Self::Doi(doi));
        }
        if let Some(arxiv) = parse_arxiv(trimmed) {
            return Ok(Self::Arxiv(arxiv));
        }

        Err(ReproError::invalid(
            PAPER_FIELD,
            trimmed,
            "expected an OpenAlex work id, DOI, arXiv id, or a URL to one of them",
        ))
    }

    fn from_url(url: &Url, raw: &str) -> Result<Self, ReproError> {
        let host = url_host(url);
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let parsed = match host.as_str() {
            "openalex.org" | "api.openalex.org" => segments
                .last()
                .and_then(|last| parse_openalex(last))
                .map(Self::OpenAlex),
            "doi.org" | "dx.doi.org" => parse_doi(&segments.join("/")).map(Self::Doi),
            "arxiv.org" | "export.arxiv.org" => match segments.split_first() {
                Some((&("abs" | "pdf"), rest)) if !rest.is_empty() => {
                    let joined = rest.join("/");
                    let id = joined.strip_suffix(".pdf").unwrap_or(&joined);
                    parse_arxiv(id).map(Self::Arxiv)
                }
                _ => None,
            },
            _ => {
                return Err(ReproError::invalid(
                    PAPER_FIELD,
                    raw,
                    format!("unsupported host '{host}'"),
                ));
            }
        };

        parsed.ok_or_else(|| {
            ReproError::invalid(PAPER_FIELD, raw, format!("no paper identifier in {host} URL"))
        })
    }

    /// Path segment used to address this work on the OpenAlex `/works` endpoint.
    ///
    /// arXiv papers are addressed through their DataCite DOI (`10.48550/arxiv.<id>`).
    #[must_use]
    pub fn openalex_key(&self) -> String {
        match self {
            Self::OpenAlex(work) => work.clone(),
            Self::Doi(doi) => format!("doi:{doi}"),
            Self::Arxiv(id) => format!("doi:10.48550/arxiv.{id}"),
        }
    }
}

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAlex(work) => f.write_str(work),
            Self::Doi(doi) => write!(f, "doi:{doi}"),
            Self::Arxiv(id) => write!(f, "arxiv:{id}"),
        }
    }
}

impl FromStr for PaperId {
    type Err = ReproError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// RepoId
// ---------------------------------------------------------------------------

/// Canonical GitHub repository identifier (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    /// Parse and canonicalize a repository identifier.
    ///
    /// URL forms may carry extra path segments (`/tree/main/src`), which are
    /// ignored. The bare form must be exactly `owner/name`.
    ///
    /// # Errors
    ///
    /// Returns [`ReproError::InvalidIdentifier`] when the input is empty, points
    /// at a host other than GitHub, or the owner/name segments are invalid.
    pub fn parse(input: &str) -> Result<Self, ReproError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ReproError::invalid(
                REPO_FIELD,
                input,
                "identifier must not be empty",
            ));
        }

        let (path, from_url) = if let Some(url) = as_url(trimmed, &["github.com"], REPO_FIELD)? {
            let host = url_host(&url);
            if host != "github.com" {
                return Err(ReproError::invalid(
                    REPO_FIELD,
                    trimmed,
                    format!("unsupported host '{host}'"),
                ));
            }
            (url.path().to_string(), true)
        } else if let Some(rest) = strip_prefix_ci(trimmed, "git@github.com:") {
            (rest.to_string(), true)
        } else {
            (trimmed.to_string(), false)
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (owner, name) = match segments.as_slice() {
            [owner, name] => (*owner, *name),
            [owner, name, ..] if from_url => (*owner, *name),
            _ => {
                return Err(ReproError::invalid(
                    REPO_FIELD,
                    trimmed,
                    "expected 'owner/name' or a github.com repository URL",
                ));
            }
        };
        let mut name = name;
        while let Some(stripped) = name.strip_suffix(".git") {
            name = stripped;
        }

        if !is_valid_owner(owner) {
            return Err(ReproError::invalid(
                REPO_FIELD,
                trimmed,
                format!("invalid owner '{owner}'"),
            ));
        }
        if !is_valid_repo_name(name) {
            return Err(ReproError::invalid(
                REPO_FIELD,
                trimmed,
                format!("invalid repository name '{name}'"),
            ));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = ReproError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Resolve both run inputs, failing on the first invalid one.
///
/// # Errors
///
/// Returns [`ReproError::InvalidIdentifier`] naming the offending field.
pub fn resolve_inputs(paper_id: &str, github_id: &str) -> Result<(PaperId, RepoId), ReproError> {
    Ok((PaperId::parse(paper_id)?, RepoId::parse(github_id)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Interpret `input` as a URL when it has a scheme or starts with a known host.
fn as_url(input: &str, known_hosts: &[&str], field: &str) -> Result<Option<Url>, ReproError> {
    if input.contains("://") {
        return Url::parse(input)
            .map(Some)
            .map_err(|e| ReproError::invalid(field, input, format!("malformed URL: {e}")));
    }

    let first = input.split('/').next().unwrap_or_default().to_ascii_lowercase();
    let first = first.strip_prefix("www.").unwrap_or(&first);
    if input.contains('/') && known_hosts.contains(&first) {
        return Url::parse(&format!("https://{input}"))
            .map(Some)
            .map_err(|e| ReproError::invalid(field, input, format!("malformed URL: {e}")));
    }

    Ok(None)
}

fn url_host(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    host.strip_prefix("www.").map_or_else(|| host.clone(), str::to_string)
}

fn strip_prefix_ci<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| input[prefix.len()..].trim())
}

fn parse_openalex(input: &str) -> Option<String> {
    let digits = input
        .strip_prefix('W')
        .or_else(|| input.strip_prefix('w'))?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then(|| format!("W{digits}"))
}

/// `10.<registrant>/<suffix>`; registrant is dot-separated digits, at least four.
fn parse_doi(input: &str) -> Option<String> {
    let (prefix, suffix) = input.trim().split_once('/')?;
    let registrant = prefix.strip_prefix("10.")?;
    let registrant_ok = registrant.len() >= 4
        && registrant.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && registrant.bytes().next().is_some_and(|b| b.is_ascii_digit());
    let suffix_ok = !suffix.is_empty() && !suffix.chars().any(char::is_whitespace);
    (registrant_ok && suffix_ok).then(|| format!("{prefix}/{suffix}").to_lowercase())
}

/// New-style `YYMM.NNNNN` or old-style `archive(.XX)/YYMMNNN`, version suffix dropped.
fn parse_arxiv(input: &str) -> Option<String> {
    let id = strip_arxiv_version(input.trim());

    if let Some((yymm, number)) = id.split_once('.')
        && !yymm.contains('/')
        && yymm.len() == 4
        && yymm.bytes().all(|b| b.is_ascii_digit())
        && (4..=5).contains(&number.len())
        && number.bytes().all(|b| b.is_ascii_digit())
    {
        return Some(id.to_string());
    }

    let (archive, number) = id.split_once('/')?;
    let (subject, class) = archive.split_once('.').unwrap_or((archive, ""));
    let subject_ok = !subject.is_empty()
        && subject.bytes().all(|b| b.is_ascii_lowercase() || b == b'-');
    let class_ok = class.is_empty() || (class.len() == 2 && class.bytes().all(|b| b.is_ascii_uppercase()));
    let number_ok = number.len() == 7 && number.bytes().all(|b| b.is_ascii_digit());
    (subject_ok && class_ok && number_ok).then(|| id.to_string())
}

fn strip_arxiv_version(id: &str) -> &str {
    match id.rfind('v') {
        Some(pos)
            if pos > 0
                && pos + 1 < id.len()
                && id[pos + 1..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            &id[..pos]
        }
        _ => id,
    }
}

fn is_valid_owner(owner: &str) -> bool {
    (1..=39).contains(&owner.len())
        && owner.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        && !owner.starts_with('-')
        && !owner.ends_with('-')
}

fn is_valid_repo_name(name: &str) -> bool {
    (1..=100).contains(&name.len())
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        && name != "."
        && name != ".."
}

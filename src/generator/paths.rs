//! Path helpers: `{pk}` coercion, common prefix detection, base URL joining.

use crate::generator::GeneratorError;
use regex::Regex;

/// Rename the `{pk}` path variable to `{id}`.
pub fn coerce_path(path: &str) -> String {
    path.replace("{pk}", "{id}")
}

/// The shared leading path of all endpoints, stripped before keys are derived.
///
/// For each path, the leading components up to the first `{var}` are taken
/// and the last of them is dropped, so at least one named component always
/// remains after stripping. If any path has nothing left, the prefix is `/`.
pub fn determine_path_prefix<S: AsRef<str>>(paths: &[S]) -> String {
    let mut prefixes: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        let initial: Vec<&str> = components(path.as_ref())
            .into_iter()
            .take_while(|c| !c.contains('{'))
            .collect();

        let Some((_, head)) = initial.split_last() else {
            return "/".to_string();
        };
        if head.is_empty() {
            return "/".to_string();
        }
        prefixes.push(format!("/{}/", head.join("/")));
    }
    common_path(&prefixes)
}

/// Longest common component prefix, as `/a/b` (or `/` when nothing is shared).
pub fn common_path<S: AsRef<str>>(paths: &[S]) -> String {
    let split: Vec<Vec<&str>> = paths.iter().map(|p| components(p.as_ref())).collect();
    let (Some(first), Some(last)) = (split.iter().min(), split.iter().max()) else {
        return "/".to_string();
    };

    let shared = first
        .iter()
        .zip(last.iter())
        .take_while(|(a, b)| a == b)
        .count();
    format!("/{}", first[..shared].join("/"))
}

/// Non-empty `/`-separated components of a path.
pub(crate) fn components(path: &str) -> Vec<&str> {
    path.trim_matches('/')
        .split('/')
        .filter(|c| !c.is_empty())
        .collect()
}

/// The base URL a schema is published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub path: String,
}

impl BaseUrl {
    pub fn parse(raw: &str) -> Result<Self, GeneratorError> {
        const URL_RE: &str = r"^(?:([A-Za-z][A-Za-z0-9+.-]*)://([^/?#]+))?(/[^?#]*)?$";
        let re = Regex::new(URL_RE)?;

        let caps = re
            .captures(raw.trim())
            .ok_or_else(|| GeneratorError::InvalidBaseUrl(raw.to_string()))?;

        Ok(Self {
            scheme: caps.get(1).map(|m| m.as_str().to_lowercase()),
            host: caps.get(2).map(|m| m.as_str().to_string()),
            path: caps
                .get(3)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "/".to_string()),
        })
    }

    /// Join an absolute endpoint path onto this base; the path replaces the
    /// base path, scheme and host are kept.
    pub fn join(&self, path: &str) -> String {
        match (&self.scheme, &self.host) {
            (Some(scheme), Some(host)) => format!("{}://{}{}", scheme, host, path),
            _ => path.to_string(),
        }
    }
}

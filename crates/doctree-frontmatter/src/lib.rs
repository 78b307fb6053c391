//! Filename-convention classification and frontmatter parsing.
//!
//! Documentation files are classified by filename alone:
//!
//! - `*.button.md` (or extension-less `*.button`) - navigation button
//! - `dropdown-settings.md` - folder overrides for a dropdown folder
//! - `group-settings.md` - folder overrides for a group folder
//! - anything else - a regular page
//!
//! Frontmatter is a leading YAML block delimited by `---` lines. Parsing is
//! lenient: a missing block yields empty metadata, and malformed YAML degrades
//! to empty metadata with a warning rather than failing the file.

use serde::{Deserialize, Serialize};

/// Kind of a documentation file, derived from its filename.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// Regular content page (`name.md`).
    Page,
    /// Navigation button (`name.button.md`).
    Button,
    /// Folder overrides applying to the containing dropdown folder.
    DropdownSettings,
    /// Folder overrides applying to the containing group folder.
    GroupSettings,
}

impl FileKind {
    /// Classify a file by its path.
    ///
    /// Only the final path segment is inspected; classification is
    /// case-insensitive. Unknown names default to [`FileKind::Page`].
    #[must_use]
    pub fn classify(path: &str) -> Self {
        let file_name = path.rsplit('/').next().unwrap_or(path).to_lowercase();

        if file_name.ends_with(".button.md") || file_name.ends_with(".button") {
            Self::Button
        } else if file_name == "dropdown-settings.md" || file_name == "dropdown-settings" {
            Self::DropdownSettings
        } else if file_name == "group-settings.md" || file_name == "group-settings" {
            Self::GroupSettings
        } else {
            Self::Page
        }
    }
}

/// Button behavior selected by the `variant` frontmatter key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// External or internal link (`url`/`target`/`style` keys).
    #[default]
    Link,
    /// Pointer to another page (`pagePath` key).
    Page,
}

/// Dropdown folder display mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropdownMode {
    /// Always expanded.
    Open,
    /// Collapsible, collapsed by default.
    #[default]
    Collapsible,
}

/// Frontmatter keys recognized across all file kinds.
///
/// Every field is optional; consumers apply kind-specific defaults. Unknown
/// keys are ignored, matching the lenient convention surface.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    /// Display title override.
    pub title: Option<String>,
    /// Sibling sort order (ascending, default 0).
    pub order: Option<i64>,
    /// Icon identifier for the UI.
    pub icon: Option<String>,
    /// Exclude the node (and its subtree) from rendering and search.
    pub hidden: Option<bool>,
    /// Explicit page language, overriding the path-derived language.
    pub lang: Option<String>,
    /// Free-form page tags.
    pub tags: Option<Vec<String>>,
    /// Include in the search index (default true).
    pub searchable: Option<bool>,
    /// Button variant (`link` or `page`).
    pub variant: Option<ButtonVariant>,
    /// Link button target URL.
    pub url: Option<String>,
    /// Link button anchor target (default `_blank`).
    pub target: Option<String>,
    /// Link button visual style.
    pub style: Option<String>,
    /// Page button target page path.
    #[serde(rename = "pagePath")]
    pub page_path: Option<String>,
    /// Dropdown display mode (`open` or `collapsible`).
    pub dropdown: Option<DropdownMode>,
    /// Group description shown under the section label.
    pub description: Option<String>,
}

impl FrontMatter {
    /// Parse frontmatter from a YAML block.
    ///
    /// Empty or whitespace-only input yields the default (empty) instance.
    /// Malformed YAML also yields the default instance, with a warning, so a
    /// single bad file never aborts a whole tree build.
    #[must_use]
    pub fn from_yaml(content: &str) -> Self {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        match serde_yaml::from_str(trimmed) {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!(error = %e, "malformed frontmatter, using empty metadata");
                Self::default()
            }
        }
    }
}

/// A documentation file after classification and frontmatter extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedDoc {
    /// Filename-derived kind.
    pub kind: FileKind,
    /// Parsed frontmatter (empty when absent or malformed).
    pub meta: FrontMatter,
    /// Markdown body with frontmatter removed and surrounding whitespace
    /// trimmed. Always `Some` for pages (possibly empty); `None` for other
    /// kinds when the body is empty.
    pub body: Option<String>,
}

/// Split raw file text into an optional frontmatter block and the body.
///
/// The block must start on the first line with `---` and end at the next line
/// consisting of `---`. Returns `(yaml, body)`; `yaml` is `None` when no block
/// is present (including an unterminated opener, which is treated as body).
#[must_use]
pub fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let rest = match raw.strip_prefix("---") {
        Some(rest) => rest,
        None => return (None, raw),
    };

    // The opener must be a full line: "---\n" or "---\r\n".
    let after_opener = match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
        Some(after) => after,
        None => return (None, raw),
    };

    let mut offset = 0;
    for line in after_opener.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml = &after_opener[..offset];
            let body = &after_opener[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // Unterminated frontmatter: treat the whole file as body.
    (None, raw)
}

/// Parse a documentation file into kind, metadata and body.
///
/// Pages always carry a body (defaulting to the empty string); buttons and
/// settings files carry one only when non-empty after trimming.
#[must_use]
pub fn parse_doc(path: &str, raw: &str) -> ParsedDoc {
    let kind = FileKind::classify(path);
    let (yaml, body) = split_front_matter(raw);
    let meta = yaml.map(FrontMatter::from_yaml).unwrap_or_default();
    let body = body.trim();

    let body = match kind {
        FileKind::Page => Some(body.to_owned()),
        _ if body.is_empty() => None,
        _ => Some(body.to_owned()),
    };

    ParsedDoc { kind, meta, body }
}

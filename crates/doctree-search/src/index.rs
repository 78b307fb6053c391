//! In-memory full-text index over extracted search documents.
//!
//! The index is rebuilt wholesale whenever the tree changes; there is no
//! incremental update path. Matching runs per field (title, content, path)
//! with a weight applied to each field's scores, keeping the best-scoring
//! field per document.

use std::collections::HashMap;

use doctree_tree::DocsTree;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, STORED, STRING, Schema, TEXT, Value};
use tantivy::{Index, IndexReader, TantivyDocument, doc};
use thiserror::Error;

use crate::document::{SearchDocument, extract_documents};

/// Relative field weights; a title hit outranks the same match in the body.
const FIELD_WEIGHTS: [(DocField, f32); 3] = [
    (DocField::Title, 2.0),
    (DocField::Path, 1.5),
    (DocField::Content, 1.0),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DocField {
    Title,
    Content,
    Path,
}

/// Search index construction or query failure.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The underlying index rejected an operation.
    #[error("search index failure: {0}")]
    Index(#[from] tantivy::TantivyError),
}

/// A ranked search match.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
    /// The matched document.
    pub document: SearchDocument,
    /// Best weighted per-field score.
    pub score: f32,
}

struct Fields {
    id: Field,
    title: Field,
    content: Field,
    path: Field,
}

impl Fields {
    fn field(&self, field: DocField) -> Field {
        match field {
            DocField::Title => self.title,
            DocField::Content => self.content,
            DocField::Path => self.path,
        }
    }
}

/// Full-text index over the searchable pages of one built tree.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    fields: Fields,
    documents: HashMap<String, SearchDocument>,
}

impl SearchIndex {
    /// Build an in-memory index from the searchable pages of a tree.
    pub fn build(tree: &DocsTree) -> Result<Self, SearchError> {
        let mut schema_builder = Schema::builder();
        let fields = Fields {
            id: schema_builder.add_text_field("id", STRING | STORED),
            title: schema_builder.add_text_field("title", TEXT),
            content: schema_builder.add_text_field("content", TEXT),
            path: schema_builder.add_text_field("path", TEXT),
        };
        let index = Index::create_in_ram(schema_builder.build());

        let extracted = extract_documents(tree);
        let mut writer = index.writer(50_000_000)?;
        for document in &extracted {
            writer.add_document(doc!(
                fields.id => document.id.clone(),
                fields.title => document.title.clone(),
                fields.content => document.content.clone(),
                fields.path => document.path.clone(),
            ))?;
        }
        writer.commit()?;

        let reader = index.reader()?;
        tracing::debug!(documents = extracted.len(), "search index built");

        Ok(Self {
            index,
            reader,
            fields,
            documents: extracted.into_iter().map(|d| (d.id.clone(), d)).collect(),
        })
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Run a query, returning up to `limit` hits ordered by descending score.
    ///
    /// An empty or whitespace-only query matches nothing. Queries are parsed
    /// leniently: unbalanced syntax degrades to whatever terms remain rather
    /// than erroring.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();
        let mut best: HashMap<String, f32> = HashMap::new();

        for (doc_field, weight) in FIELD_WEIGHTS {
            let parser = QueryParser::for_index(&self.index, vec![self.fields.field(doc_field)]);
            let (parsed, errors) = parser.parse_query_lenient(query);
            if !errors.is_empty() {
                tracing::debug!(?doc_field, ?errors, "query parsed leniently");
            }

            let top = searcher.search(&parsed, &TopDocs::with_limit(limit))?;
            for (score, address) in top {
                let retrieved: TantivyDocument = searcher.doc(address)?;
                let Some(id) = retrieved
                    .get_first(self.fields.id)
                    .and_then(|v| v.as_str())
                else {
                    continue;
                };
                let weighted = score * weight;
                best.entry(id.to_owned())
                    .and_modify(|s| *s = s.max(weighted))
                    .or_insert(weighted);
            }
        }

        let mut hits: Vec<SearchHit> = best
            .into_iter()
            .filter_map(|(id, score)| {
                self.documents.get(&id).map(|document| SearchHit {
                    document: document.clone(),
                    score,
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.document.id.cmp(&b.document.id))
        });
        hits.truncate(limit);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use doctree_tree::build_tree;
    use pretty_assertions::assert_eq;

    use super::*;

    fn index_from(entries: &[(&str, &str)]) -> SearchIndex {
        let files: BTreeMap<String, String> = entries
            .iter()
            .map(|(p, c)| ((*p).to_owned(), (*c).to_owned()))
            .collect();
        SearchIndex::build(&build_tree(&files)).unwrap()
    }

    fn sample_index() -> SearchIndex {
        index_from(&[
            (
                "docs/1.0.0/auth.md",
                "---\ntitle: Authentication\n---\nTokens and sessions.",
            ),
            (
                "docs/1.0.0/intro.md",
                "---\ntitle: Introduction\n---\nGetting started with authentication basics.",
            ),
            (
                "docs/1.0.0/deploy.md",
                "---\ntitle: Deployment\n---\nShipping to production.",
            ),
        ])
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let index = sample_index();
        assert_eq!(index.search("", 10).unwrap(), Vec::new());
        assert_eq!(index.search("   \t", 10).unwrap(), Vec::new());
    }

    #[test]
    fn test_title_match_outranks_content_match() {
        let index = sample_index();
        let hits = index.search("authentication", 10).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].document.title, "Authentication");
        assert_eq!(hits[1].document.title, "Introduction");
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let index = sample_index();
        assert_eq!(index.search("kubernetes", 10).unwrap(), Vec::new());
    }

    #[test]
    fn test_limit_truncates() {
        let index = sample_index();
        let hits = index.search("authentication", 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document.title, "Authentication");
    }

    #[test]
    fn test_path_terms_match() {
        let index = sample_index();
        let hits = index.search("deploy", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document.path, "docs/1.0.0/deploy");
    }

    #[test]
    fn test_unsearchable_pages_never_match() {
        let index = index_from(&[
            (
                "docs/1.0.0/internal.md",
                "---\ntitle: Internal\nsearchable: false\n---\nsecret architecture notes",
            ),
            ("docs/1.0.0/public.md", "---\ntitle: Public\n---\nnothing"),
        ]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.search("secret", 10).unwrap(), Vec::new());
        assert_eq!(index.search("internal", 10).unwrap(), Vec::new());
    }

    #[test]
    fn test_malformed_query_degrades() {
        let index = sample_index();
        // Unbalanced quote parses leniently instead of erroring.
        let hits = index.search("\"authentication", 10).unwrap();
        assert!(!hits.is_empty());
    }

    #[test]
    fn test_empty_tree_builds_empty_index() {
        let index = SearchIndex::build(&Vec::new()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.search("anything", 10).unwrap(), Vec::new());
    }
}

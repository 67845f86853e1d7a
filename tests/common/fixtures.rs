//! Test fixtures for integration tests.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use refcheck::lookup::structured::{
    CAPITAL_PROPERTY, HEAD_OF_GOVERNMENT_PROPERTY, UNITED_STATES_ENTITY,
};
use refcheck::{
    EncyclopedicLookup, FactChecker, KnowledgeResolver, KnowledgeSource, MockEncyclopedia,
    MockKnowledgeGraph, OverrideStore, SimilarityScorer, StructuredFactLookup,
};
use tempfile::TempDir;

pub const OVERRIDES_FILE: &str = "faq.json";

pub const FIXED_MTIME_SECS: u64 = 1_700_000_000;

/// Override file inside its own temporary directory.
pub struct OverrideFile {
    dir: TempDir,
    path: PathBuf,
}

impl OverrideFile {
    /// Directory exists, file does not.
    pub fn absent() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OVERRIDES_FILE);
        Self { dir, path }
    }

    pub fn with_contents(contents: &str) -> Self {
        let file = Self::absent();
        file.write(contents, 0);
        file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` and pins the modification time to `FIXED_MTIME_SECS + tick`.
    pub fn write(&self, contents: &str, tick: u64) {
        fs::write(&self.path, contents).unwrap();
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(FIXED_MTIME_SECS + tick);
        File::options()
            .write(true)
            .open(&self.path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    pub fn remove(&self) {
        fs::remove_file(&self.path).unwrap();
    }

    pub fn store(&self) -> Arc<OverrideStore> {
        Arc::new(OverrideStore::new(&self.path))
    }
}

/// Graph that knows the capitals of Japan and France and the US head of government.
pub fn sample_graph() -> MockKnowledgeGraph {
    MockKnowledgeGraph::new()
        .with_entity("Nhật Bản", "Q17")
        .with_attribute("Q17", CAPITAL_PROPERTY, "Tokyo")
        .with_entity("Pháp", "Q142")
        .with_attribute("Q142", CAPITAL_PROPERTY, "Paris")
        .with_attribute(UNITED_STATES_ENTITY, HEAD_OF_GOVERNMENT_PROPERTY, "Joe Biden")
}

/// Encyclopedia with one Vietnamese and one English article.
pub fn sample_encyclopedia() -> MockEncyclopedia {
    MockEncyclopedia::new()
        .with_search("vi", "Sông Mê Kông", &["Sông Mê Kông", "Đồng bằng sông Cửu Long"])
        .with_summary(
            "vi",
            "Sông Mê Kông",
            "Sông Mê Kông là một trong những con sông lớn nhất thế giới.",
        )
        .with_search("en", "Ada Lovelace", &["Ada Lovelace", "Lovelace (film)"])
        .with_summary(
            "en",
            "Ada Lovelace",
            "Ada Lovelace was an English mathematician and writer.",
        )
}

/// Resolver over the sample graph, `store`, and the sample encyclopedia.
pub fn sample_resolver(store: Arc<OverrideStore>) -> KnowledgeResolver {
    sample_resolver_with(Arc::new(sample_graph()), store, Arc::new(sample_encyclopedia()))
}

pub fn sample_resolver_with(
    graph: Arc<MockKnowledgeGraph>,
    overrides: Arc<dyn KnowledgeSource>,
    encyclopedia: Arc<MockEncyclopedia>,
) -> KnowledgeResolver {
    KnowledgeResolver::new(
        Arc::new(StructuredFactLookup::new(graph)),
        overrides,
        Arc::new(EncyclopedicLookup::new(encyclopedia.clone(), "vi")),
        Arc::new(EncyclopedicLookup::new(encyclopedia, "en")),
    )
}

pub fn sample_checker(store: Arc<OverrideStore>) -> FactChecker {
    FactChecker::new(sample_resolver(store), SimilarityScorer::new())
}

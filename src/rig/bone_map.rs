use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One `target → source` joint-name correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonePair {
    pub target: String,
    pub source: String,
}

/// Target-to-source joint-name correspondence table.
///
/// Produced by an external name-matching heuristic or by hand; this crate only
/// consumes it. Several target joints may map to the same source joint. The
/// reverse lookup then returns the pair inserted first, so results do not
/// depend on hash order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<BonePair>", into = "Vec<BonePair>")]
pub struct BoneMap {
    pairs: Vec<BonePair>,
    by_target: FxHashMap<String, usize>,
    by_source: FxHashMap<String, usize>,
}

impl BoneMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `target` to `source`, replacing any previous mapping of `target`.
    pub fn insert(&mut self, target: impl Into<String>, source: impl Into<String>) {
        let target = target.into();
        let source = source.into();

        if let Some(&index) = self.by_target.get(&target) {
            self.pairs[index].source = source;
            self.rebuild_reverse();
            return;
        }

        let index = self.pairs.len();
        self.by_target.insert(target.clone(), index);
        self.by_source.entry(source.clone()).or_insert(index);
        self.pairs.push(BonePair { target, source });
    }

    fn rebuild_reverse(&mut self) {
        self.by_source.clear();
        for (index, pair) in self.pairs.iter().enumerate() {
            self.by_source.entry(pair.source.clone()).or_insert(index);
        }
    }

    #[must_use]
    pub fn source_of(&self, target: &str) -> Option<&str> {
        self.by_target
            .get(target)
            .map(|&i| self.pairs[i].source.as_str())
    }

    /// Reverse lookup: the first target joint mapped to `source`.
    #[must_use]
    pub fn target_of(&self, source: &str) -> Option<&str> {
        self.by_source
            .get(source)
            .map(|&i| self.pairs[i].target.as_str())
    }

    #[must_use]
    pub fn contains_source(&self, source: &str) -> bool {
        self.by_source.contains_key(source)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BonePair> {
        self.pairs.iter()
    }

    /// Builds the identity correspondence for a list of joint names.
    pub fn identity<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().map(|n| (n, n)).collect()
    }

    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> crate::errors::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<T: Into<String>, S: Into<String>> FromIterator<(T, S)> for BoneMap {
    fn from_iter<I: IntoIterator<Item = (T, S)>>(iter: I) -> Self {
        let mut map = BoneMap::new();
        for (target, source) in iter {
            map.insert(target, source);
        }
        map
    }
}

impl From<Vec<BonePair>> for BoneMap {
    fn from(pairs: Vec<BonePair>) -> Self {
        pairs.into_iter().map(|p| (p.target, p.source)).collect()
    }
}

impl From<BoneMap> for Vec<BonePair> {
    fn from(map: BoneMap) -> Self {
        map.pairs
    }
}

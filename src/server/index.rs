use std::collections::BTreeMap;
use std::ops::Bound;

/// Lowercased words of a name, split on single spaces.
pub fn keywords(name: &str) -> Vec<String> {
    name.split(' ').map(|word| word.to_lowercase()).collect()
}

/// Ordered keyword -> item positions. Ordering turns a prefix lookup into a
/// range scan starting at the prefix itself.
#[derive(Debug, Default)]
pub struct KeywordIndex {
    keywords: BTreeMap<String, Vec<usize>>,
}

impl KeywordIndex {
    pub fn insert(&mut self, keyword: String, position: usize) {
        let positions = self.keywords.entry(keyword).or_default();
        if positions.last() != Some(&position) {
            positions.push(position);
        }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Positions of every item with a keyword starting with `prefix`,
    /// grouped by keyword in ascending order. `prefix` must be lowercase.
    pub fn prefixed<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.keywords
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(keyword, _)| keyword.starts_with(prefix))
            .flat_map(|(_, positions)| positions.iter().copied())
    }
}

//! The normalized prefix table.
//!
//! Configuration lists prefixes in order, each mapping entity types to
//! handler names. Lookups that can match several prefixes resolve ties in
//! favor of the entry configured last.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

use super::schema::{PrefixConfig, TypeHandlers};

/// One prefix and its type-to-handler map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixEntry {
    prefix: String,
    handlers: BTreeMap<String, String>,
}

impl PrefixEntry {
    /// Builds an entry from a prefix and `(type, handler)` pairs.
    pub fn new<I, T, H>(prefix: impl Into<String>, handlers: I) -> Self
    where
        I: IntoIterator<Item = (T, H)>,
        T: Into<String>,
        H: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            handlers: handlers
                .into_iter()
                .map(|(t, h)| (t.into(), h.into()))
                .collect(),
        }
    }

    /// The prefix text.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Type tags served under this prefix.
    #[must_use]
    pub fn types(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// True when `tag` is served under this prefix.
    #[must_use]
    pub fn contains_type(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Handler name for `tag`.
    #[must_use]
    pub fn handler_for(&self, tag: &str) -> Option<&str> {
        self.handlers.get(tag).map(String::as_str)
    }

    /// Handler names used by this entry.
    pub fn handler_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.values().map(String::as_str)
    }

    /// The remainder of `request` after this prefix, if the prefix is its
    /// leading segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathhist::config::PrefixEntry;
    ///
    /// let shop = PrefixEntry::new("shop", [("product", "shop")]);
    /// assert_eq!(shop.strip("shop/boots/black"), Some("boots/black"));
    /// assert_eq!(shop.strip("shop"), Some(""));
    /// assert_eq!(shop.strip("shopping/boots"), None);
    /// ```
    #[must_use]
    pub fn strip<'r>(&self, request: &'r str) -> Option<&'r str> {
        let rest = request.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }
}

/// Ordered prefix entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTable {
    entries: Vec<PrefixEntry>,
}

impl PrefixTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes configured entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when a list-form entry has no
    /// handler or a prefix repeats.
    pub fn from_config(entries: &[PrefixConfig]) -> Result<Self> {
        let mut table = Self::new();
        for entry in entries {
            let handlers: BTreeMap<String, String> = match &entry.types {
                TypeHandlers::Map(map) => map.clone(),
                TypeHandlers::List(types) => {
                    let handler = entry.handler.as_ref().ok_or_else(|| {
                        Error::configuration(format!(
                            "prefix `{}`: `handler` must be present when types are given as a list",
                            entry.prefix
                        ))
                    })?;
                    types
                        .iter()
                        .map(|t| (t.clone(), handler.clone()))
                        .collect()
                }
            };
            table.push(PrefixEntry {
                prefix: entry.prefix.clone(),
                handlers,
            })?;
        }
        Ok(table)
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the prefix is already present.
    pub fn push(&mut self, entry: PrefixEntry) -> Result<&mut Self> {
        if self.entries.iter().any(|e| e.prefix == entry.prefix) {
            return Err(Error::configuration(format!(
                "prefix `{}` is configured more than once",
                entry.prefix
            )));
        }
        self.entries.push(entry);
        Ok(self)
    }

    /// True when no prefix is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in configuration order.
    #[must_use]
    pub fn entries(&self) -> &[PrefixEntry] {
        &self.entries
    }

    /// Entries whose prefix is a leading segment of `request`, in
    /// configuration order.
    #[must_use]
    pub fn matching(&self, request: &str) -> Vec<&PrefixEntry> {
        self.entries
            .iter()
            .filter(|e| e.strip(request).is_some())
            .collect()
    }

    /// Every type tag named by any entry, without duplicates.
    #[must_use]
    pub fn all_types(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.entries.iter().flat_map(|e| e.handlers.keys()).collect();
        set.into_iter().cloned().collect()
    }

    /// The prefix that namespaces `tag`: the last entry containing it.
    #[must_use]
    pub fn prefix_for_type(&self, tag: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.contains_type(tag))
            .map(PrefixEntry::prefix)
    }

    /// Every handler name referenced by the table.
    #[must_use]
    pub fn handler_names(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(PrefixEntry::handler_names)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop_table() -> PrefixTable {
        let mut table = PrefixTable::new();
        table
            .push(PrefixEntry::new(
                "shop",
                [("product", "shop"), ("product_category", "shop")],
            ))
            .unwrap()
            .push(PrefixEntry::new("another", [("product_category", "another")]))
            .unwrap()
            .push(PrefixEntry::new("invalid", [("product", "invalid")]))
            .unwrap();
        table
    }

    #[test]
    fn test_from_config_list_and_map() {
        let yaml = r"
- prefix: shop
  types: [product, product_category]
  handler: shop
- prefix: another
  types:
    product_category: another
";
        let entries: Vec<PrefixConfig> = serde_yaml::from_str(yaml).unwrap();
        let table = PrefixTable::from_config(&entries).unwrap();

        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.entries()[0].handler_for("product"), Some("shop"));
        assert_eq!(table.entries()[1].handler_for("product_category"), Some("another"));
        assert_eq!(table.entries()[1].handler_for("product"), None);
    }

    #[test]
    fn test_list_without_handler_fails() {
        let yaml = "- prefix: shop\n  types: [product]\n";
        let entries: Vec<PrefixConfig> = serde_yaml::from_str(yaml).unwrap();
        let err = PrefixTable::from_config(&entries).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_duplicate_prefix_fails() {
        let mut table = shop_table();
        assert!(table.push(PrefixEntry::new("shop", [("x", "y")])).is_err());
    }

    #[test]
    fn test_matching_is_segment_based() {
        let table = shop_table();
        let matched: Vec<&str> = table
            .matching("shop/boots/black")
            .iter()
            .map(|e| e.prefix())
            .collect();
        assert_eq!(matched, vec!["shop"]);
        assert!(table.matching("shopping/boots").is_empty());
        assert!(table.matching("boots").is_empty());
    }

    #[test]
    fn test_nested_prefixes_match_in_order() {
        let mut table = PrefixTable::new();
        table
            .push(PrefixEntry::new("shop", [("product", "shop")]))
            .unwrap()
            .push(PrefixEntry::new("shop/sale", [("product", "sale")]))
            .unwrap();

        let matched: Vec<&str> = table
            .matching("shop/sale/boots")
            .iter()
            .map(|e| e.prefix())
            .collect();
        assert_eq!(matched, vec!["shop", "shop/sale"]);
    }

    #[test]
    fn test_all_types_and_prefix_for_type() {
        let table = shop_table();
        assert_eq!(
            table.all_types(),
            vec!["product".to_string(), "product_category".to_string()]
        );
        assert_eq!(table.prefix_for_type("product"), Some("invalid"));
        assert_eq!(table.prefix_for_type("product_category"), Some("another"));
        assert_eq!(table.prefix_for_type("news"), None);
    }

    #[test]
    fn test_handler_names() {
        let table = shop_table();
        let names = table.handler_names();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["another", "invalid", "shop"]);
    }
}

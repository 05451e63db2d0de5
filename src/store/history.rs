//! Version ordering, range selection and the phrase overlay.

use std::future::Future;
use std::sync::LazyLock;

use futures::future::try_join_all;
use regex::Regex;

use crate::error::Result;
use crate::models::Phrases;

use super::ProjectStore;

static PREFIXED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+_(.*)$").expect("valid version prefix pattern"));

/// The prefix of `versions` ending at the effective target, inclusive.
///
/// The target matches a version with the same id. When `target` is the package
/// id itself, it also matches a version whose id without its `NN_` prefix equals
/// the full id; no prefixed id satisfies that, so in practice only exact ids
/// hit. No match yields an empty list.
pub fn select_up_to(mut versions: Vec<String>, package_id: &str, target: &str) -> Vec<String> {
    let position = versions
        .iter()
        .position(|v| v == target || (target == package_id && is_package_alias(v)));

    match position {
        Some(index) => {
            versions.truncate(index + 1);
            versions
        }
        None => Vec::new(),
    }
}

fn is_package_alias(version_id: &str) -> bool {
    PREFIXED_ID
        .captures(version_id)
        .and_then(|captures| captures.get(1))
        .is_some_and(|stripped| stripped.as_str() == version_id)
}

/// Fold phrase maps left to right.
///
/// Each key's translations are merged into what earlier maps supplied, later
/// languages winning. Keys and languages are never removed.
pub fn merge_phrases<'a>(history: impl IntoIterator<Item = &'a Phrases>) -> Phrases {
    history
        .into_iter()
        .fold(Phrases::new(), |mut merged, phrases| {
            for (key, translations) in phrases {
                merged.entry(key.clone()).or_default().extend(
                    translations
                        .iter()
                        .map(|(lang, text)| (lang.clone(), text.clone())),
                );
            }
            merged
        })
}

/// Run `load` for every id concurrently, returning results in id order
/// regardless of completion order. The first failure aborts.
async fn gather_in_order<'a, T, F, Fut>(ids: &'a [String], load: F) -> Result<Vec<T>>
where
    F: FnMut(&'a String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    try_join_all(ids.iter().map(load)).await
}

impl ProjectStore {
    /// Ordered version ids from the first version through `target_id`.
    pub async fn versions_up_to(&self, package_id: &str, target_id: &str) -> Result<Vec<String>> {
        let versions = self.list_versions(package_id).await?;
        Ok(select_up_to(versions, package_id, target_id))
    }

    /// Merge the phrases of `version_ids` in the given order.
    ///
    /// Versions are read concurrently but folded in list order. Any read failure
    /// aborts the merge.
    pub async fn merge_phrase_history(
        &self,
        package_id: &str,
        version_ids: &[String],
    ) -> Result<Phrases> {
        let versions = gather_in_order(version_ids, |version_id| {
            self.read_version(package_id, version_id)
        })
        .await?;

        tracing::debug!(
            package = package_id,
            versions = versions.len(),
            "merging phrase history"
        );
        Ok(merge_phrases(versions.iter().map(|v| &v.phrases)))
    }

    /// Merged phrases of every version up to and including `target_id`.
    pub async fn merged_phrases_up_to(&self, package_id: &str, target_id: &str) -> Result<Phrases> {
        let version_ids = self.versions_up_to(package_id, target_id).await?;
        self.merge_phrase_history(package_id, &version_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Translations;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn phrases(entries: &[(&str, &[(&str, &str)])]) -> Phrases {
        entries
            .iter()
            .map(|(key, langs)| {
                let translations: Translations = langs
                    .iter()
                    .map(|(lang, text)| (lang.to_string(), text.to_string()))
                    .collect();
                (key.to_string(), translations)
            })
            .collect()
    }

    #[test]
    fn selects_prefix_through_target() {
        let versions = ids(&["01_a", "02_b", "03_c"]);
        assert_eq!(select_up_to(versions, "pkg", "02_b"), ids(&["01_a", "02_b"]));
    }

    #[test]
    fn unknown_target_selects_nothing() {
        let versions = ids(&["01_a", "02_b"]);
        assert!(select_up_to(versions, "pkg", "nonexistent").is_empty());
    }

    #[test]
    fn package_id_alias_never_matches_prefixed_ids() {
        let versions = ids(&["01_a", "02_b"]);
        assert!(select_up_to(versions, "pkg", "pkg").is_empty());
    }

    #[test]
    fn package_id_still_matches_a_version_with_that_id() {
        let versions = ids(&["01_a", "pkg", "zz"]);
        assert_eq!(select_up_to(versions, "pkg", "pkg"), ids(&["01_a", "pkg"]));
    }

    #[test]
    fn later_version_adds_languages() {
        let v1 = phrases(&[("A", &[("en", "x")])]);
        let v2 = phrases(&[("A", &[("fr", "y")])]);

        let merged = merge_phrases([&v1, &v2]);
        assert_eq!(merged, phrases(&[("A", &[("en", "x"), ("fr", "y")])]));
    }

    #[test]
    fn later_version_overrides_same_language() {
        let v1 = phrases(&[("A", &[("en", "x")])]);
        let v2 = phrases(&[("A", &[("en", "z")])]);

        assert_eq!(merge_phrases([&v1, &v2]), phrases(&[("A", &[("en", "z")])]));
        assert_eq!(merge_phrases([&v2, &v1]), phrases(&[("A", &[("en", "x")])]));
    }

    #[test]
    fn absent_keys_are_kept() {
        let v1 = phrases(&[("A", &[("en", "a")]), ("B", &[("en", "b")])]);
        let v2 = phrases(&[("C", &[("en", "c")])]);

        let merged = merge_phrases([&v1, &v2]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["B"]["en"], "b");
    }

    #[tokio::test]
    async fn gathered_history_follows_list_order_not_completion_order() {
        let order = ids(&["01_slow", "02_fast"]);

        let loaded = gather_in_order(&order, |id| {
            let id = id.clone();
            async move {
                let delay = if id == "01_slow" { 50 } else { 0 };
                tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
                Ok(phrases(&[("A", &[("en", id.as_str())])]))
            }
        })
        .await
        .unwrap();

        let merged = merge_phrases(&loaded);
        assert_eq!(merged["A"]["en"], "02_fast");
    }

    #[tokio::test]
    async fn gather_aborts_on_first_failure() {
        let order = ids(&["01_a", "02_missing"]);

        let result = gather_in_order(&order, |id| {
            let id = id.clone();
            async move {
                if id == "02_missing" {
                    Err(crate::error::Error::VersionNotFound {
                        package_id: "core".into(),
                        version_id: id,
                    })
                } else {
                    Ok(Phrases::new())
                }
            }
        })
        .await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn empty_history_merges_to_nothing() {
        assert!(merge_phrases(std::iter::empty::<&Phrases>()).is_empty());
    }
}

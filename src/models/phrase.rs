use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Open, ordered metadata map attached to projects, packages and versions.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Language code to translated text for a single phrase.
pub type Translations = BTreeMap<String, String>;

/// Phrase key to its translations.
pub type Phrases = BTreeMap<String, Translations>;

/// A scalar written where text is expected, e.g. `en: 404` in a hand-edited file.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarText {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

impl ScalarText {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(n) => n.to_string(),
            Self::Unsigned(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Flag(b) => b.to_string(),
        }
    }
}

type RawPhrases = BTreeMap<String, Option<BTreeMap<String, Option<ScalarText>>>>;

/// Read phrases leniently: numbers and booleans become their text, a `null`
/// translation is treated as absent and a `null` phrase as having none.
pub(crate) fn lenient_phrases<'de, D>(deserializer: D) -> Result<Phrases, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPhrases>::deserialize(deserializer)?.unwrap_or_default();

    Ok(raw
        .into_iter()
        .map(|(key, translations)| {
            let translations = translations
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(lang, text)| Some((lang, text?.into_text())))
                .collect();
            (key, translations)
        })
        .collect())
}

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Deserializer, Serialize};

/// IPMA location identifier (`globalIdLocal`).
///
/// Upstream sends it as a JSON integer, but nothing here depends on that: the
/// value is only ever echoed back into the forecast URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for LocationId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Integer(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Integer(id) => Self(id.to_string()),
            RawId::Text(id) => Self(id),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityEntry {
    pub name: String,
    pub id: LocationId,
}

/// City name to location id lookup, keyed by the title-cased name.
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    entries: HashMap<String, CityEntry>,
}

impl CityIndex {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, LocationId)>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for (name, id) in entries {
            let name = name.into();
            index.entries.insert(title_case(name.trim()), CityEntry { name, id });
        }
        index
    }

    /// Exact lookup after title-casing; no partial or fuzzy matches.
    pub fn resolve(&self, name: &str) -> Option<&LocationId> {
        let key = title_case(name.trim());
        if key.is_empty() {
            return None;
        }
        self.entries.get(&key).map(|entry| &entry.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upstream display names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.values().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<(S, LocationId)> for CityIndex {
    fn from_iter<T: IntoIterator<Item = (S, LocationId)>>(iter: T) -> Self {
        Self::from_entries(iter)
    }
}

/// Upper-cases the first cased character of every word and lower-cases the
/// rest. A word is a run of cased characters, so `"d'ajuda"` becomes
/// `"D'Ajuda"` and `"viana do castelo"` becomes `"Viana Do Castelo"`.
///
/// Word starts use the titlecase form where it differs from uppercase for
/// `ß` and the Latin digraphs (`ǆ` becomes `ǅ`); other characters with a
/// distinct titlecase mapping, such as the `ﬁ` ligature, are upper-cased.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_cased = false;

    for ch in value.chars() {
        if !is_cased(ch) {
            out.push(ch);
            previous_is_cased = false;
        } else if previous_is_cased {
            out.extend(ch.to_lowercase());
        } else {
            push_titlecase(&mut out, ch);
            previous_is_cased = true;
        }
    }

    out
}

fn is_cased(ch: char) -> bool {
    ch.is_uppercase() || ch.is_lowercase() || matches!(ch, 'ǅ' | 'ǈ' | 'ǋ' | 'ǲ')
}

fn push_titlecase(out: &mut String, ch: char) {
    match ch {
        'ß' => out.push_str("Ss"),
        'Ǆ' | 'ǅ' | 'ǆ' => out.push('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => out.push('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => out.push('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => out.push('ǲ'),
        _ => out.extend(ch.to_uppercase()),
    }
}

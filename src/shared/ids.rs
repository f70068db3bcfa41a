use getrandom::getrandom;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const ID_SUFFIX_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Flow,
    Pod,
    Pea,
    Workspace,
}

impl ResourceKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ResourceKind::Flow => "flow",
            ResourceKind::Pod => "pod",
            ResourceKind::Pea => "pea",
            ResourceKind::Workspace => "workspace",
        }
    }

    pub fn from_keyword(raw: &str) -> Option<Self> {
        match raw {
            "flow" => Some(ResourceKind::Flow),
            "pod" => Some(ResourceKind::Pod),
            "pea" => Some(ResourceKind::Pea),
            "workspace" => Some(ResourceKind::Workspace),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.keyword().fmt(f)
    }
}

/// Kind-tagged identity for a created resource, shaped `<kind>-<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId {
    kind: ResourceKind,
    value: String,
}

impl ResourceId {
    pub fn issue(kind: ResourceKind) -> Self {
        Self {
            kind,
            value: format!("{}-{}", kind.keyword(), random_suffix()),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let (keyword, suffix) = raw
            .rsplit_once('-')
            .ok_or_else(|| format!("resource id `{raw}` is missing a kind prefix"))?;
        let kind = ResourceKind::from_keyword(keyword)
            .ok_or_else(|| format!("resource id `{raw}` has unknown kind `{keyword}`"))?;
        if suffix.len() != ID_SUFFIX_LEN
            || !suffix
                .chars()
                .all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase())
        {
            return Err(format!(
                "resource id `{raw}` must end with {ID_SUFFIX_LEN} base36 characters"
            ));
        }
        Ok(Self {
            kind,
            value: raw.to_string(),
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value.fmt(f)
    }
}

impl std::borrow::Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for ResourceId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

fn random_suffix() -> String {
    let mut bytes = [0_u8; ID_SUFFIX_LEN];
    if getrandom(&mut bytes).is_err() {
        // clock-seeded fallback when the OS entropy source is unavailable
        let seed = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        for (index, slot) in bytes.iter_mut().enumerate() {
            *slot = (seed >> (index * 8)) as u8;
        }
    }
    bytes
        .iter()
        .map(|byte| BASE36_ALPHABET[(*byte % 36) as usize] as char)
        .collect()
}

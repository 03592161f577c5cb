//! YAML and JSON map keys are strings, so maps keyed by numbers (chain ids) are (de)serialized
//! through their [`ToString`] and [`FromStr`] implementations.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};

/// Serializes a map with its keys rendered as strings.
pub fn serialize<S, K, V>(map: &BTreeMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: ToString + Ord,
    V: Serialize,
    S: Serializer,
{
    map.iter().map(|(k, v)| (k.to_string(), v)).collect::<BTreeMap<_, _>>().serialize(serializer)
}

/// Deserializes a map whose keys are parsed from strings.
pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    K: FromStr<Err: Display> + Ord,
    V: Deserialize<'de>,
    D: Deserializer<'de>,
{
    BTreeMap::<String, V>::deserialize(deserializer).and_then(|map| {
        map.into_iter()
            .map(|(k, v)| K::from_str(k.trim()).map(|k| (k, v)).map_err(D::Error::custom))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Registry {
        #[serde(with = "super")]
        confirmations: BTreeMap<u64, u64>,
    }

    #[test]
    fn numeric_keys() {
        let registry: Registry =
            serde_json::from_str(r#"{"confirmations":{"146":20,"43114":12}}"#).unwrap();
        assert_eq!(registry.confirmations, BTreeMap::from([(146, 20), (43114, 12)]));

        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(json, r#"{"confirmations":{"146":20,"43114":12}}"#);
    }

    #[test]
    fn rejects_non_numeric_keys() {
        assert!(serde_json::from_str::<Registry>(r#"{"confirmations":{"sonic":20}}"#).is_err());
    }
}

//! List-valued keys given either as a sequence or as one comma separated
//! string, so `CARDEPS_UNITS=CarA,CarB` reads like `--units CarA,CarB`.

use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrCommaSeparated<T> {
    List(Vec<T>),
    CommaSeparated(String),
}

/// `deserialize_with` for list keys. Blank entries are dropped.
pub(crate) fn comma_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match ListOrCommaSeparated::<T>::deserialize(deserializer)? {
        ListOrCommaSeparated::List(values) => Ok(values),
        ListOrCommaSeparated::CommaSeparated(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                let item: StrDeserializer<'_, D::Error> = item.into_deserializer();
                T::deserialize(item)
            })
            .collect(),
    }
}

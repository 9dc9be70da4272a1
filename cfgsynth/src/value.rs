//! Tagged value tree for parsed configuration documents.
//!
//! A document is deserialised into [`Value`] rather than a loosely typed map
//! so that every coercion an adapter performs is explicit. Coercions return
//! `Option`: `None` means "this candidate does not match" and the search moves
//! on to the next candidate.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// Smallest `f64` that still converts to an `i64` (exactly `-2^63`).
const I64_FLOAT_MIN: f64 = f64::from_bits(0xC3E0_0000_0000_0000);
/// First `f64` past the `i64` range (exactly `2^63`).
const I64_FLOAT_END: f64 = f64::from_bits(0x43E0_0000_0000_0000);

/// A node in a parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An explicit null or an empty node.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar that fits in `i64`.
    Integer(i64),
    /// A floating-point scalar, or an integer too large for `i64`.
    Float(f64),
    /// A string scalar.
    String(String),
    /// A sequence of nodes.
    Sequence(Vec<Self>),
    /// A mapping with string keys.
    Mapping(BTreeMap<String, Self>),
}

impl Value {
    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Returns the string contents when the node is a string scalar.
    ///
    /// Numbers and booleans are not stringified.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Coerces the node into an `i64`.
    ///
    /// Integers are accepted directly. Floats are accepted only when they are
    /// finite, have no fractional part, and lie inside the `i64` range, so
    /// `5.0` becomes `5` while `5.5` and `1e20` do not match.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(number) => Some(*number),
            Self::Float(number) => float_to_int(*number),
            _ => None,
        }
    }

    /// Returns the nested mapping when the node is a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items when the node is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Projects the node into a `serde_json::Value`.
    ///
    /// Used by struct-slice codecs to reuse `serde` derives. Non-finite
    /// floats have no JSON form and become `null`. Mapping entries holding
    /// null are left out, so a null field decodes like a missing one and
    /// `#[serde(default)]` applies.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(flag) => serde_json::Value::Bool(*flag),
            Self::Integer(number) => serde_json::Value::from(*number),
            Self::Float(number) => serde_json::Number::from_f64(*number)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::String(text) => serde_json::Value::String(text.clone()),
            Self::Sequence(items) => items.iter().map(Self::to_json).collect(),
            Self::Mapping(map) => serde_json::Value::Object(
                map.iter()
                    .filter(|(_, value)| !matches!(value, Self::Null))
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Renders a scalar node as a mapping key.
    fn into_key(self) -> Option<String> {
        match self {
            Self::String(text) => Some(text),
            Self::Integer(number) => Some(number.to_string()),
            Self::Bool(flag) => Some(flag.to_string()),
            Self::Float(number) => Some(number.to_string()),
            Self::Null | Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is integral and range-checked before the cast"
)]
fn float_to_int(number: f64) -> Option<i64> {
    if !number.is_finite() || number.fract() != 0.0 {
        return None;
    }
    if !(I64_FLOAT_MIN..I64_FLOAT_END).contains(&number) {
        return None;
    }
    Some(number as i64)
}

impl<'de> Deserialize<'de> for Value {
    /// Entering through `deserialize_option` lets the YAML parser report
    /// plain `~`, `null` and empty scalars as null. Through
    /// `deserialize_any` they arrive as strings, indistinguishable from
    /// quoted text.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any configuration value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Integer(value))
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "integers past i64::MAX are kept as floats and never match an integer lookup"
    )]
    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        Ok(i64::try_from(value).map_or(Value::Float(value as f64), Value::Integer))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(Self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();
        while let Some(key) = map.next_key::<Value>()? {
            if let Some(name) = key.into_key() {
                let value = map.next_value::<Value>()?;
                entries.insert(name, value);
            } else {
                // Composite keys cannot be addressed by an adapter.
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(Value::Mapping(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::integer(Value::Integer(42), Some(42))]
    #[case::negative(Value::Integer(-7), Some(-7))]
    #[case::integral_float(Value::Float(5.0), Some(5))]
    #[case::negative_integral_float(Value::Float(-3.0), Some(-3))]
    #[case::fractional_float(Value::Float(5.5), None)]
    #[case::out_of_range_float(Value::Float(1e20), None)]
    #[case::upper_bound_float(Value::Float(I64_FLOAT_END), None)]
    #[case::lower_bound_float(Value::Float(I64_FLOAT_MIN), Some(i64::MIN))]
    #[case::nan(Value::Float(f64::NAN), None)]
    #[case::infinity(Value::Float(f64::INFINITY), None)]
    #[case::numeric_string(Value::String(String::from("5")), None)]
    #[case::boolean(Value::Bool(true), None)]
    fn as_int_follows_coercion_rules(#[case] value: Value, #[case] expected: Option<i64>) {
        assert_eq!(value.as_int(), expected);
    }

    #[rstest]
    #[case::string(Value::String(String::from("db.local")), Some("db.local"))]
    #[case::integer(Value::Integer(5432), None)]
    #[case::null(Value::Null, None)]
    fn as_str_only_accepts_strings(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(value.as_str(), expected);
    }

    #[rstest]
    fn to_json_preserves_structure() {
        let mut realm = BTreeMap::new();
        realm.insert(String::from("id"), Value::String(String::from("eu")));
        realm.insert(String::from("clientPort"), Value::Integer(8085));
        let value = Value::Sequence(vec![Value::Mapping(realm)]);

        let json = value.to_json();
        assert_eq!(json, serde_json::json!([{ "id": "eu", "clientPort": 8085 }]));
    }

    #[rstest]
    fn to_json_omits_null_fields() {
        let mut realm = BTreeMap::new();
        realm.insert(String::from("id"), Value::String(String::from("eu")));
        realm.insert(String::from("regions"), Value::Null);

        let json = Value::Mapping(realm).to_json();
        assert_eq!(json, serde_json::json!({ "id": "eu" }));
    }

    #[rstest]
    #[case::tilde("value: ~\n", Value::Null)]
    #[case::lower("value: null\n", Value::Null)]
    #[case::title("value: Null\n", Value::Null)]
    #[case::upper("value: NULL\n", Value::Null)]
    #[case::empty("value:\n", Value::Null)]
    #[case::double_quoted("value: \"null\"\n", Value::String(String::from("null")))]
    #[case::single_quoted("value: '~'\n", Value::String(String::from("~")))]
    #[case::empty_quoted("value: ''\n", Value::String(String::new()))]
    #[case::plain_word("value: nullable\n", Value::String(String::from("nullable")))]
    fn yaml_null_scalars_become_null(
        #[case] text: &str,
        #[case] expected: Value,
    ) -> anyhow::Result<()> {
        let parsed: Value = serde_saphyr::from_str(text)?;
        let value = parsed
            .as_mapping()
            .and_then(|map| map.get("value"))
            .ok_or_else(|| anyhow::anyhow!("missing `value` in {text:?}"))?;
        anyhow::ensure!(*value == expected, "{text:?} parsed as {value:?}");
        Ok(())
    }

    #[rstest]
    fn yaml_nulls_inside_sequences_are_kept() -> anyhow::Result<()> {
        let parsed: Value = serde_saphyr::from_str("- ~\n- \"~\"\n- 3\n")?;
        let items = parsed
            .as_sequence()
            .ok_or_else(|| anyhow::anyhow!("expected sequence"))?;
        anyhow::ensure!(
            items
                == [
                    Value::Null,
                    Value::String(String::from("~")),
                    Value::Integer(3)
                ],
            "unexpected items {items:?}"
        );
        Ok(())
    }

    #[rstest]
    fn to_json_drops_non_finite_floats() {
        assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[rstest]
    fn deserialises_from_json_with_large_unsigned() -> anyhow::Result<()> {
        let value: Value = serde_json::from_str(r#"{"a": 18446744073709551615, "b": [1, "x"]}"#)?;
        let map = value
            .as_mapping()
            .ok_or_else(|| anyhow::anyhow!("expected mapping"))?;
        anyhow::ensure!(
            matches!(map.get("a"), Some(Value::Float(_))),
            "u64::MAX should be kept as a float"
        );
        anyhow::ensure!(
            map.get("b").and_then(Value::as_sequence).map(<[Value]>::len) == Some(2),
            "sequence should keep both items"
        );
        Ok(())
    }
}

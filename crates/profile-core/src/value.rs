//! Typed configuration values

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use serde::{Serialize, Serializer};

/// A configuration value drawn from a small closed set of primitive kinds.
///
/// Equality and ordering are by `(kind, value)`. Floats compare by their
/// total order, so `NaN` equals itself and equality stays reflexive. Values
/// of one kind order naturally: numbers and durations numerically, strings
/// lexicographically, `false` before `true`.
///
/// Durations serialize as literals such as `"30s"` or `"1500ms"`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Duration(#[serde(serialize_with = "serialize_duration")] Duration),
    Boolean(bool),
}

impl ConfigValue {
    /// Name of the value kind, as used in reports and serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::Duration(_) => "duration",
            ConfigValue::Boolean(_) => "boolean",
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            ConfigValue::String(_) => 0,
            ConfigValue::Integer(_) => 1,
            ConfigValue::Float(_) => 2,
            ConfigValue::Duration(_) => 3,
            ConfigValue::Boolean(_) => 4,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            ConfigValue::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConfigValue::String(a), ConfigValue::String(b)) => a == b,
            (ConfigValue::Integer(a), ConfigValue::Integer(b)) => a == b,
            (ConfigValue::Float(a), ConfigValue::Float(b)) => a.total_cmp(b).is_eq(),
            (ConfigValue::Duration(a), ConfigValue::Duration(b)) => a == b,
            (ConfigValue::Boolean(a), ConfigValue::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ConfigValue {}

impl Ord for ConfigValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ConfigValue::String(a), ConfigValue::String(b)) => a.cmp(b),
            (ConfigValue::Integer(a), ConfigValue::Integer(b)) => a.cmp(b),
            (ConfigValue::Float(a), ConfigValue::Float(b)) => a.total_cmp(b),
            (ConfigValue::Duration(a), ConfigValue::Duration(b)) => a.cmp(b),
            (ConfigValue::Boolean(a), ConfigValue::Boolean(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for ConfigValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for ConfigValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            ConfigValue::String(s) => s.hash(state),
            ConfigValue::Integer(i) => i.hash(state),
            ConfigValue::Float(f) => f.to_bits().hash(state),
            ConfigValue::Duration(d) => d.hash(state),
            ConfigValue::Boolean(b) => b.hash(state),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{s:?}"),
            ConfigValue::Integer(i) => write!(f, "{i}"),
            ConfigValue::Float(v) => write!(f, "{v}"),
            ConfigValue::Duration(d) => write_duration(f, *d),
            ConfigValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

fn serialize_duration<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&DurationLiteral(*duration))
}

struct DurationLiteral(Duration);

impl fmt::Display for DurationLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_duration(f, self.0)
    }
}

/// Render a duration in the largest whole unit that represents it exactly.
fn write_duration(f: &mut fmt::Formatter<'_>, duration: Duration) -> fmt::Result {
    if duration.subsec_nanos() % 1_000_000 != 0 {
        return write!(f, "{duration:?}");
    }
    if duration.subsec_millis() != 0 {
        return write!(f, "{}ms", duration.as_millis());
    }

    let secs = duration.as_secs();
    match secs {
        0 => write!(f, "0s"),
        s if s % 86_400 == 0 => write!(f, "{}d", s / 86_400),
        s if s % 3_600 == 0 => write!(f, "{}h", s / 3_600),
        s if s % 60 == 0 => write!(f, "{}m", s / 60),
        s => write!(f, "{s}s"),
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<Duration> for ConfigValue {
    fn from(value: Duration) -> Self {
        ConfigValue::Duration(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_requires_same_kind() {
        assert_ne!(ConfigValue::Integer(1), ConfigValue::Float(1.0));
        assert_ne!(ConfigValue::from("true"), ConfigValue::Boolean(true));
        assert_eq!(ConfigValue::from(30_i64), ConfigValue::Integer(30));
    }

    #[test]
    fn test_float_equality_is_reflexive() {
        let nan = ConfigValue::Float(f64::NAN);
        assert_eq!(nan, nan.clone());
    }

    #[test]
    fn test_duration_display() {
        let cases = [
            (Duration::from_secs(30), "30s"),
            (Duration::from_secs(120), "2m"),
            (Duration::from_secs(7_200), "2h"),
            (Duration::from_secs(172_800), "2d"),
            (Duration::from_millis(1_500), "1500ms"),
            (Duration::ZERO, "0s"),
        ];
        for (duration, expected) in cases {
            assert_eq!(ConfigValue::Duration(duration).to_string(), expected);
        }
    }

    #[test]
    fn test_ordering_is_by_value_not_rendering() {
        let mut durations = vec![
            ConfigValue::Duration(Duration::from_secs(60)),
            ConfigValue::Duration(Duration::from_secs(30)),
            ConfigValue::Duration(Duration::from_millis(1_500)),
        ];
        durations.sort();
        let rendered: Vec<String> = durations.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["1500ms", "30s", "1m"]);

        assert!(ConfigValue::Integer(9) < ConfigValue::Integer(10));
        assert!(ConfigValue::Float(-0.5) < ConfigValue::Float(0.25));
        assert!(ConfigValue::Boolean(false) < ConfigValue::Boolean(true));
        assert!(ConfigValue::from("b") > ConfigValue::from("a"));
    }

    #[test]
    fn test_ordering_across_kinds_follows_kind() {
        assert!(ConfigValue::from("zzz") < ConfigValue::Integer(0));
        assert!(ConfigValue::Integer(i64::MAX) < ConfigValue::Float(f64::MIN));
        assert_eq!(
            ConfigValue::Float(f64::NAN).cmp(&ConfigValue::Float(f64::NAN)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_duration_serializes_as_literal() {
        let json = serde_json::to_value(ConfigValue::Duration(Duration::from_secs(90))).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "duration", "value": "90s"}));
    }

    #[test]
    fn test_string_display_is_quoted() {
        assert_eq!(ConfigValue::from("strict").to_string(), "\"strict\"");
    }

    #[test]
    fn test_accessors() {
        let value = ConfigValue::Duration(Duration::from_secs(5));
        assert_eq!(value.as_duration(), Some(Duration::from_secs(5)));
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.kind(), "duration");
    }
}

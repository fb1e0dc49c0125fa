//! Lenient field codecs for the records wire format

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
    Flag(bool),
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(n)) if n.fract() == 0.0 && n.abs() <= f64::from(i32::MAX) => {
            Some(n as i32)
        }
        Some(Loose::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
pub(crate) fn serialize_year<S>(year: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match year {
        Some(year) => serializer.serialize_i32(*year),
        None => serializer.serialize_str(""),
    }
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(s)) => s,
        Some(Loose::Number(n)) => n.to_string(),
        Some(Loose::Flag(_)) | None => String::new(),
    })
}

pub(crate) fn measure<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(n)) => Some(n),
        Some(Loose::Text(s)) => s.trim().parse().ok(),
        Some(Loose::Flag(_)) | None => None,
    }
    .filter(|n: &f64| n.is_finite())
    .unwrap_or(0.0))
}

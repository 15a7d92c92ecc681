//! Deserializers for the geometric types.

use std::fmt;

use serde::de::{self, Deserialize, Unexpected, Visitor};

use super::super::{Dimensions, Point};


const DIMENSIONS_FIELDS: &'static [&'static str] = &["width", "height"];
const DIMENSIONS_EXPECTING_MSG: &'static str =
    "dimensions as a `WxH` string, or an array/map of two pixel sizes";

const POINT_FIELDS: &'static [&'static str] = &["x", "y"];
const POINT_EXPECTING_MSG: &'static str = "point as an array/map of two pixel coordinates";


impl<'de> Deserialize<'de> for Dimensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_any(DimensionsVisitor)
    }
}

struct DimensionsVisitor;
impl<'de> Visitor<'de> for DimensionsVisitor {
    type Value = Dimensions;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", DIMENSIONS_EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let mut parts = v.trim().splitn(2, |c| c == 'x' || c == 'X');
        let width = parts.next()
            .and_then(|p| p.trim().parse::<u32>().ok());
        let height = parts.next()
            .and_then(|p| p.trim().parse::<u32>().ok());
        match (width, height) {
            (Some(w), Some(h)) => Ok(Dimensions::new(w, h)),
            _ => {
                warn!("Failed to parse dimensions `{}`", v);
                Err(E::invalid_value(Unexpected::Str(v), &self))
            }
        }
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where A: de::SeqAccess<'de>
    {
        let (width, height) = two_u32(&mut seq, DIMENSIONS_FIELDS)?;
        Ok(Dimensions::new(width, height))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where A: de::MapAccess<'de>
    {
        let (mut width, mut height) = (None, None);
        while let Some(key) = map.next_key::<String>()? {
            match key.trim().to_lowercase().as_str() {
                "width" | "w" => {
                    if width.is_some() {
                        return Err(de::Error::duplicate_field("width"));
                    }
                    width = Some(map.next_value()?);
                }
                "height" | "h" => {
                    if height.is_some() {
                        return Err(de::Error::duplicate_field("height"));
                    }
                    height = Some(map.next_value()?);
                }
                key => return Err(de::Error::unknown_field(key, DIMENSIONS_FIELDS)),
            }
        }
        let width = width.ok_or_else(|| de::Error::missing_field("width"))?;
        let height = height.ok_or_else(|| de::Error::missing_field("height"))?;
        Ok(Dimensions::new(width, height))
    }
}


impl<'de> Deserialize<'de> for Point {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_any(PointVisitor)
    }
}

struct PointVisitor;
impl<'de> Visitor<'de> for PointVisitor {
    type Value = Point;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", POINT_EXPECTING_MSG)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where A: de::SeqAccess<'de>
    {
        let (x, y) = two_u32(&mut seq, POINT_FIELDS)?;
        Ok(Point::new(x, y))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where A: de::MapAccess<'de>
    {
        let (mut x, mut y) = (None, None);
        while let Some(key) = map.next_key::<String>()? {
            match key.trim().to_lowercase().as_str() {
                "x" => {
                    if x.is_some() {
                        return Err(de::Error::duplicate_field("x"));
                    }
                    x = Some(map.next_value()?);
                }
                "y" => {
                    if y.is_some() {
                        return Err(de::Error::duplicate_field("y"));
                    }
                    y = Some(map.next_value()?);
                }
                key => return Err(de::Error::unknown_field(key, POINT_FIELDS)),
            }
        }
        let x = x.ok_or_else(|| de::Error::missing_field("x"))?;
        let y = y.ok_or_else(|| de::Error::missing_field("y"))?;
        Ok(Point::new(x, y))
    }
}


/// Read exactly two u32 elements out of a sequence.
fn two_u32<'de, A>(seq: &mut A, fields: &'static [&'static str]) -> Result<(u32, u32), A::Error>
    where A: de::SeqAccess<'de>
{
    let first: u32 = seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(0, &"2"))?;
    let second: u32 = seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(1, &"2"))?;
    if seq.next_element::<u32>()?.is_some() {
        return Err(de::Error::invalid_length(fields.len() + 1, &"2"));
    }
    Ok((first, second))
}

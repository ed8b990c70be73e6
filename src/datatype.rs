// used when override values are serialized to and from the backing store
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// used when parsing a hex string into a Color
use std::str::FromStr;
// used to print out readable forms of a value
use std::fmt;

use crate::error::TinkerError;

/// The closed set of types a tweak value can take on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TweakValueType {
    Boolean,
    Integer,
    Float,
    Double,
    Color,
    Text,
}

impl fmt::Display for TweakValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TweakValueType::Boolean => "Boolean",
            TweakValueType::Integer => "Integer",
            TweakValueType::Float => "Float",
            TweakValueType::Double => "Double",
            TweakValueType::Color => "Color",
            TweakValueType::Text => "Text",
        };
        write!(f, "{}", name)
    }
}

/// How a numeric tweak prefers to be edited. Purely advisory: the store never
/// interprets it, an editing layer reads it back through the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericEditStyle {
    Stepper,
    Slider,
}

pub trait NumericMetadata: Sized {
    // static stuff which needs to be implemented downstream
    const DEFAULT_STEP: Self;
    const DEFAULT_MIN: Self;
    const DEFAULT_MAX: Self;
    fn format(&self) -> String;
}

// ------------- Numeric Metadata --------------
impl NumericMetadata for i64 {
    const DEFAULT_STEP: i64 = 1;
    const DEFAULT_MIN: i64 = i64::MIN;
    const DEFAULT_MAX: i64 = i64::MAX;
    fn format(&self) -> String {
        self.to_string()
    }
}
impl NumericMetadata for f32 {
    // percentage-style defaults, suitable for opacity-like tweaks
    const DEFAULT_STEP: f32 = 0.01;
    const DEFAULT_MIN: f32 = 0.0;
    const DEFAULT_MAX: f32 = 1.0;
    fn format(&self) -> String {
        format!("{:.2}", self)
    }
}
impl NumericMetadata for f64 {
    const DEFAULT_STEP: f64 = 0.01;
    const DEFAULT_MIN: f64 = 0.0;
    const DEFAULT_MAX: f64 = 1.0;
    fn format(&self) -> String {
        format!("{:.2}", self)
    }
}

// ------------- Color --------------
/// An sRGB color with alpha, persisted as a hex string (`#RRGGBB` or
/// `#RRGGBBAA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }
    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
    pub fn hex(&self) -> String {
        if self.alpha == 255 {
            format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }
}

impl FromStr for Color {
    type Err = TinkerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let invalid = || TinkerError::ColorParse(format!("'{}' is not a hex color", s));
        match digits.len() {
            6 => {
                let v = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Color::from_rgb(
                    (v >> 16) as u8,
                    (v >> 8) as u8,
                    v as u8,
                ))
            }
            8 => {
                let v = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Color::from_rgba(
                    (v >> 24) as u8,
                    (v >> 16) as u8,
                    (v >> 8) as u8,
                    v as u8,
                ))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ------------- TweakValue --------------
/// A current or default value of a tweak, one variant per [`TweakValueType`],
/// so heterogeneous tweaks can flow through one collection and one override
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum TweakValue {
    Boolean(bool),
    Integer(i64),
    Float(f32),
    Double(f64),
    Color(Color),
    Text(String),
}

impl TweakValue {
    pub fn value_type(&self) -> TweakValueType {
        match self {
            TweakValue::Boolean(_) => TweakValueType::Boolean,
            TweakValue::Integer(_) => TweakValueType::Integer,
            TweakValue::Float(_) => TweakValueType::Float,
            TweakValue::Double(_) => TweakValueType::Double,
            TweakValue::Color(_) => TweakValueType::Color,
            TweakValue::Text(_) => TweakValueType::Text,
        }
    }
}

impl fmt::Display for TweakValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TweakValue::Boolean(v) => write!(f, "{}", v),
            TweakValue::Integer(v) => write!(f, "{}", v.format()),
            TweakValue::Float(v) => write!(f, "{}", v.format()),
            TweakValue::Double(v) => write!(f, "{}", v.format()),
            TweakValue::Color(v) => write!(f, "{}", v),
            TweakValue::Text(v) => write!(f, "{}", v),
        }
    }
}

pub trait TweakData: Sized {
    // static stuff which needs to be implemented downstream
    const VALUE_TYPE: TweakValueType;
    fn erase(self) -> TweakValue;
    fn convert(value: &TweakValue) -> Option<Self>;
    // instance callable with pre-made implementation
    fn value_type(&self) -> TweakValueType {
        Self::VALUE_TYPE
    }
}

// ------------- Data Types --------------
impl TweakData for bool {
    const VALUE_TYPE: TweakValueType = TweakValueType::Boolean;
    fn erase(self) -> TweakValue {
        TweakValue::Boolean(self)
    }
    fn convert(value: &TweakValue) -> Option<bool> {
        match value {
            TweakValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}
impl TweakData for i64 {
    const VALUE_TYPE: TweakValueType = TweakValueType::Integer;
    fn erase(self) -> TweakValue {
        TweakValue::Integer(self)
    }
    fn convert(value: &TweakValue) -> Option<i64> {
        match value {
            TweakValue::Integer(v) => Some(*v),
            _ => None,
        }
    }
}
impl TweakData for f32 {
    const VALUE_TYPE: TweakValueType = TweakValueType::Float;
    fn erase(self) -> TweakValue {
        TweakValue::Float(self)
    }
    fn convert(value: &TweakValue) -> Option<f32> {
        match value {
            TweakValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}
impl TweakData for f64 {
    const VALUE_TYPE: TweakValueType = TweakValueType::Double;
    fn erase(self) -> TweakValue {
        TweakValue::Double(self)
    }
    fn convert(value: &TweakValue) -> Option<f64> {
        match value {
            TweakValue::Double(v) => Some(*v),
            _ => None,
        }
    }
}
impl TweakData for Color {
    const VALUE_TYPE: TweakValueType = TweakValueType::Color;
    fn erase(self) -> TweakValue {
        TweakValue::Color(self)
    }
    fn convert(value: &TweakValue) -> Option<Color> {
        match value {
            TweakValue::Color(v) => Some(*v),
            _ => None,
        }
    }
}
impl TweakData for String {
    const VALUE_TYPE: TweakValueType = TweakValueType::Text;
    fn erase(self) -> TweakValue {
        TweakValue::Text(self)
    }
    fn convert(value: &TweakValue) -> Option<String> {
        match value {
            TweakValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

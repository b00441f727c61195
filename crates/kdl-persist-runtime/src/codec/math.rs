//! Small math types written as separator-joined component lists.

use super::{ParseOptions, ParseValue, WriteOptions, WriteValue};

fn parse_components<const N: usize>(text: &str, options: &ParseOptions) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    let mut parts = text.split(options.value_separator());
    for slot in out.iter_mut() {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    match parts.next() {
        Some(_) => None,
        None => Some(out),
    }
}

fn write_components(components: &[f32], options: &WriteOptions) -> String {
    let separator = options.value_separator().to_string();
    components
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(&separator)
}

macro_rules! float_vector {
    ($name:ident { $($field:ident),+ }, $len:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        pub struct $name {
            $(pub $field: f32,)+
        }

        impl $name {
            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl ParseValue for $name {
            fn parse_value(text: &str, options: &ParseOptions) -> Option<Self> {
                let [$($field),+] = parse_components::<$len>(text, options)?;
                Some(Self { $($field),+ })
            }
        }

        impl WriteValue for $name {
            fn write_value(&self, options: &WriteOptions) -> String {
                write_components(&[$(self.$field),+], options)
            }
        }
    };
}

float_vector!(Vec2 { x, y }, 2);
float_vector!(Vec3 { x, y, z }, 3);
float_vector!(Vec4 { x, y, z, w }, 4);

/// 2D affine transform, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matrix3x2(pub [f32; 6]);

/// 4x4 transform, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matrix4x4(pub [f32; 16]);

impl ParseValue for Matrix3x2 {
    fn parse_value(text: &str, options: &ParseOptions) -> Option<Self> {
        parse_components(text, options).map(Matrix3x2)
    }
}

impl WriteValue for Matrix3x2 {
    fn write_value(&self, options: &WriteOptions) -> String {
        write_components(&self.0, options)
    }
}

impl ParseValue for Matrix4x4 {
    fn parse_value(text: &str, options: &ParseOptions) -> Option<Self> {
        parse_components(text, options).map(Matrix4x4)
    }
}

impl WriteValue for Matrix4x4 {
    fn write_value(&self, options: &WriteOptions) -> String {
        write_components(&self.0, options)
    }
}

/// RGBA color with 8-bit channels.
///
/// Accepts `#RRGGBB`, `#RRGGBBAA`, or `r,g,b[,a]` using the value separator.
/// Always written as `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgba(0, 0, 0, 255)
    }
}

impl ParseValue for Color {
    fn parse_value(text: &str, options: &ParseOptions) -> Option<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            let a = if hex.len() == 8 { channel(6)? } else { 255 };
            return Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a));
        }

        let channels = text
            .split(options.value_separator())
            .map(|part| part.trim().parse::<u8>().ok())
            .collect::<Option<Vec<_>>>()?;
        match channels[..] {
            [r, g, b] => Some(Self::rgb(r, g, b)),
            [r, g, b, a] => Some(Self::rgba(r, g, b, a)),
            _ => None,
        }
    }
}

impl WriteValue for Color {
    fn write_value(&self, _options: &WriteOptions) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use super::{ParseOptions, ParseValue, WriteOptions, WriteValue};

impl ParseValue for String {
    fn parse_value(text: &str, _options: &ParseOptions) -> Option<Self> {
        Some(text.to_string())
    }
}

impl WriteValue for String {
    fn write_value(&self, _options: &WriteOptions) -> String {
        self.clone()
    }
}

impl WriteValue for str {
    fn write_value(&self, _options: &WriteOptions) -> String {
        self.to_string()
    }
}

impl ParseValue for bool {
    fn parse_value(text: &str, _options: &ParseOptions) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl ParseValue for char {
    fn parse_value(text: &str, _options: &ParseOptions) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

macro_rules! display_write {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WriteValue for $ty {
                fn write_value(&self, _options: &WriteOptions) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

macro_rules! from_str_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParseValue for $ty {
                fn parse_value(text: &str, _options: &ParseOptions) -> Option<Self> {
                    text.trim().parse().ok()
                }
            }
        )*
    };
}

from_str_parse!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, IpAddr, Ipv4Addr,
    Ipv6Addr, SocketAddr,
);

display_write!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, IpAddr,
    Ipv4Addr, Ipv6Addr, SocketAddr,
);

impl ParseValue for PathBuf {
    fn parse_value(text: &str, _options: &ParseOptions) -> Option<Self> {
        Some(PathBuf::from(text))
    }
}

impl WriteValue for PathBuf {
    fn write_value(&self, _options: &WriteOptions) -> String {
        self.to_string_lossy().into_owned()
    }
}

/// Durations are written as decimal seconds with up to nine fractional
/// digits, so every value round-trips exactly.
impl ParseValue for Duration {
    fn parse_value(text: &str, _options: &ParseOptions) -> Option<Self> {
        let text = text.trim();
        let (secs, fraction) = text.split_once('.').unwrap_or((text, ""));
        if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let secs: u64 = secs.parse().ok()?;
        let nanos = if fraction.is_empty() {
            0
        } else {
            let scale = 10u32.pow(9 - fraction.len() as u32);
            fraction.parse::<u32>().ok()? * scale
        };
        Some(Duration::new(secs, nanos))
    }
}

impl WriteValue for Duration {
    fn write_value(&self, _options: &WriteOptions) -> String {
        let nanos = self.subsec_nanos();
        if nanos == 0 {
            return self.as_secs().to_string();
        }
        let fraction = format!("{nanos:09}");
        format!("{}.{}", self.as_secs(), fraction.trim_end_matches('0'))
    }
}

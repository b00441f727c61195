use super::{EnumMode, ParseOptions, WriteOptions};

/// A unit-only enum with a fixed table of variant names and discriminants.
///
/// Usually implemented with `#[derive(PersistEnum)]`, which also wires up
/// [`ParseValue`](super::ParseValue) and [`WriteValue`](super::WriteValue)
/// through [`parse_enum`] and [`write_enum`].
pub trait PersistEnum: Sized + 'static {
    /// `(name, discriminant)` for every variant, in declaration order.
    const VARIANTS: &'static [(&'static str, i64)];

    fn from_variant_index(index: usize) -> Option<Self>;

    fn variant_index(&self) -> usize;
}

pub fn parse_enum<E: PersistEnum>(text: &str, options: &ParseOptions) -> Option<E> {
    let text = text.trim();
    let index = match options.enum_mode {
        EnumMode::Name => E::VARIANTS.iter().position(|(name, _)| *name == text),
        EnumMode::NameIgnoreCase => E::VARIANTS
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(text)),
        EnumMode::Value => {
            let value: i64 = text.parse().ok()?;
            E::VARIANTS.iter().position(|(_, v)| *v == value)
        }
    }?;
    E::from_variant_index(index)
}

pub fn write_enum<E: PersistEnum>(value: &E, options: &WriteOptions) -> String {
    let Some((name, discriminant)) = E::VARIANTS.get(value.variant_index()) else {
        return String::new();
    };
    match options.enum_mode {
        EnumMode::Name | EnumMode::NameIgnoreCase => (*name).to_string(),
        EnumMode::Value => discriminant.to_string(),
    }
}

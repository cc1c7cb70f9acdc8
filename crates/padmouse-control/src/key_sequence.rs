use std::fmt;

use serde::de::value::Error as DeError;
use serde::de::{IntoDeserializer, Visitor};
use serde::{Deserialize, Deserializer};
use smallvec::SmallVec;

use crate::key::{parse_key, Key};
use crate::{Modifier, Modifiers};

/// A `+`-separated key sequence such as `Super+Control+h`.
///
/// Pressing holds every modifier and then every key in the order written.
/// Releasing lets go of the keys in reverse order and then the modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySequence {
    pub modifiers: Modifiers,
    pub keys: SmallVec<[Key; 4]>,
}

impl KeySequence {
    pub fn new(modifiers: &[Modifier], keys: &[Key]) -> Self {
        Self {
            modifiers: Modifiers::from_values(modifiers),
            keys: keys.iter().copied().collect(),
        }
    }

    pub fn from_key(key: Key) -> Self {
        let mut sequence = Self {
            modifiers: Modifiers::empty(),
            keys: SmallVec::new(),
        };
        match Modifier::try_from(key) {
            Ok(modifier) => sequence.modifiers.add(modifier),
            Err(key) => sequence.keys.push(key),
        }
        sequence
    }

    /// Keys in the order they are pressed.
    pub fn press_order(&self) -> impl Iterator<Item = Key> + '_ {
        self.modifiers
            .iter()
            .map(|m| m.key())
            .chain(self.keys.iter().copied())
    }

    /// Keys in the order they are released.
    pub fn release_order(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys
            .iter()
            .rev()
            .copied()
            .chain(self.modifiers.iter().rev().map(|m| m.key()))
    }
}

impl<'de> Deserialize<'de> for KeySequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeySequenceVisitor;

        impl Visitor<'_> for KeySequenceVisitor {
            type Value = KeySequence;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("key sequence string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let mut modifiers = Modifiers::empty();
                let mut keys: SmallVec<[Key; 4]> = SmallVec::new();
                for part in v.split('+') {
                    let part = part.trim();
                    let Some(key) = parse_key(part) else {
                        return Err(E::custom(format!("Invalid key: {part}")));
                    };
                    match Modifier::try_from(key) {
                        Ok(modifier) => modifiers.add(modifier),
                        Err(key) => keys.push(key),
                    }
                }

                Ok(KeySequence { modifiers, keys })
            }
        }

        deserializer.deserialize_str(KeySequenceVisitor)
    }
}

impl std::str::FromStr for KeySequence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeySequence::deserialize(s.into_deserializer()).map_err(|e: DeError| e.to_string())
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: SmallVec<[String; 8]> = self
            .modifiers
            .iter()
            .map(|m| format!("{m:?}"))
            .collect();
        parts.extend(self.keys.iter().map(|key| match key {
            Key::Unicode(ch) => ch.to_string(),
            other => format!("{other:?}"),
        }));
        f.write_str(&parts.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<KeySequence, String> {
        input.parse()
    }

    #[test]
    fn test_single_key() {
        let seq = parse("Escape").unwrap();
        assert!(seq.modifiers.is_empty());
        assert_eq!(seq.keys.as_slice(), &[Key::Escape]);
    }

    #[test]
    fn test_modifier_only() {
        let seq = parse("Shift").unwrap();
        assert!(seq.modifiers.contains(Modifier::Shift));
        assert!(seq.keys.is_empty());
        assert_eq!(seq, KeySequence::from_key(Key::Shift));
    }

    #[test]
    fn test_modifiers_and_key() {
        let seq = parse("Super+Control+h").unwrap();
        assert!(seq.modifiers.contains(Modifier::Super));
        assert!(seq.modifiers.contains(Modifier::Ctrl));
        assert_eq!(seq.keys.as_slice(), &[Key::Unicode('h')]);
    }

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(parse("super + Q").unwrap(), parse("Super+q").unwrap());
    }

    #[test]
    fn test_invalid_key() {
        let err = parse("Super+foo").unwrap_err();
        assert!(err.contains("Invalid key: foo"), "{err}");
    }

    #[test]
    fn test_empty_parts() {
        assert!(parse("").is_err());
        assert!(parse("Super+").is_err());
    }

    #[test]
    fn test_press_and_release_order() {
        let seq = parse("Control+Super+a+b").unwrap();
        let press: Vec<_> = seq.press_order().collect();
        assert_eq!(
            press,
            vec![Key::Meta, Key::Control, Key::Unicode('a'), Key::Unicode('b')]
        );
        let release: Vec<_> = seq.release_order().collect();
        assert_eq!(
            release,
            vec![Key::Unicode('b'), Key::Unicode('a'), Key::Control, Key::Meta]
        );
    }

    #[test]
    fn test_new_matches_parsed() {
        assert_eq!(
            KeySequence::new(&[Modifier::Super, Modifier::Ctrl], &[Key::Unicode('h')]),
            parse("Super+Control+h").unwrap()
        );
        assert_eq!(KeySequence::from_key(Key::Escape), parse("Escape").unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(parse("Super+Control+h").unwrap().to_string(), "Super+Ctrl+h");
    }
}

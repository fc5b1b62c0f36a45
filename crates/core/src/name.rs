//! The chain-native account/action name: a short string over the alphabet
//! `.12345a-z`, packed into a `u64` and serialized little-endian.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::ser::{Ser, SerResult};

/// Errors raised when a string cannot be represented as a chain name.
/// Names are never silently truncated or remapped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidNameError {
    /// The string contains a character outside `.12345a-z` (or outside
    /// `.12345a-j` in the 13th position).
    #[error("Invalid character {character:?} in name {name:?}")]
    BadCharacter {
        /// The offending input.
        name: String,
        /// The first character that cannot be encoded.
        character: char,
    },

    /// The string exceeds the 13-character packing limit.
    #[error("Name {0:?} is longer than 13 characters")]
    TooLong(String),
}

fn char_to_symbol(c: char) -> Option<u64> {
    match c {
        'a'..='z' => Some(c as u64 - 'a' as u64 + 6),
        '1'..='5' => Some(c as u64 - '1' as u64 + 1),
        '.' => Some(0),
        _ => None,
    }
}

const NAME_CHARS: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// A chain-native name. The first 12 characters pack at 5 bits each from the
/// high end of the word; an optional 13th character occupies the low 4 bits
/// and is therefore restricted to the first 16 symbols of the alphabet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(pub u64);

impl Name {
    /// The packed integer value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for Name {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad_char = |c| InvalidNameError::BadCharacter {
            name: s.to_owned(),
            character: c,
        };

        if s.chars().count() > 13 {
            return Err(InvalidNameError::TooLong(s.to_owned()));
        }

        let mut value = 0u64;
        for (i, c) in s.chars().enumerate() {
            let sym = char_to_symbol(c).ok_or_else(|| bad_char(c))?;
            if i < 12 {
                value |= (sym & 0x1f) << (64 - 5 * (i + 1));
            } else {
                if sym > 0x0f {
                    return Err(bad_char(c));
                }
                value |= sym;
            }
        }
        Ok(Name(value))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = [b'.'; 13];
        let mut tmp = self.0;
        for i in (0..13).rev() {
            let mask = if i == 12 { 0x0f } else { 0x1f };
            chars[i] = NAME_CHARS[(tmp & mask) as usize];
            tmp >>= if i == 12 { 4 } else { 5 };
        }
        let s = std::str::from_utf8(&chars).expect("alphabet is ascii");
        f.write_str(s.trim_end_matches('.'))
    }
}

impl Ser for Name {
    fn serialized_length(&self) -> usize {
        8
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        Ser::serialize(&self.0, writer)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ser::Ser;

    #[test]
    fn it_packs_known_names() {
        let cases: &[(&str, &str)] = &[
            ("fio.address", "003056372503a85b"),
            ("regaddress", "0000c6eaa66498ba"),
            ("addaddress", "0000c6eaa6645232"),
            ("active", "00000000a8ed3232"),
            ("qdfejz2a5wpl", "102b2f46fca756b2"),
        ];
        for (s, le_hex) in cases {
            let name: Name = s.parse().unwrap();
            assert_eq!(name.serialize_hex().unwrap(), *le_hex, "name {}", s);
        }
    }

    #[test]
    fn it_round_trips_display() {
        for s in ["fio.address", "regaddress", "active", "qdfejz2a5wpl", "a"] {
            let name: Name = s.parse().unwrap();
            assert_eq!(name.to_string(), s);
        }
        assert_eq!(Name(0).to_string(), "");
    }

    #[test]
    fn it_rejects_bad_names() {
        assert_eq!(
            "rewards@wallet".parse::<Name>(),
            Err(InvalidNameError::BadCharacter {
                name: "rewards@wallet".to_owned(),
                character: '@',
            })
        );
        assert_eq!(
            "Active".parse::<Name>(),
            Err(InvalidNameError::BadCharacter {
                name: "Active".to_owned(),
                character: 'A',
            })
        );
        assert_eq!(
            "abcdefghijklmn".parse::<Name>(),
            Err(InvalidNameError::TooLong("abcdefghijklmn".to_owned()))
        );
        // the 13th character only has 4 bits of room
        assert!("aaaaaaaaaaaaz".parse::<Name>().is_err());
        assert!("aaaaaaaaaaaaj".parse::<Name>().is_ok());
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BookError;

// Phone is a phone number made of exactly ten ASCII digits, e.g. "0501234567".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub const LEN: usize = 10;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Phone {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BookError::InvalidFormat(format!(
                "{s} should be numeric and {} chars long",
                Self::LEN
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Phone {
    type Error = BookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0
    }
}

impl PartialEq<str> for Phone {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[test]
fn test_parse_phone() {
    let parse = |s: &str| s.parse::<Phone>();
    assert_eq!(parse("0501234567").unwrap().as_str(), "0501234567");
    assert!(parse("050123456").is_err());
    assert!(parse("05012345678").is_err());
    assert!(parse("05012345a7").is_err());
    assert!(parse("+380501234").is_err());
    assert!(parse(" 050123456").is_err());
    assert!(parse("").is_err());
    // Non-ASCII digits are not phone digits.
    assert!(parse("０５０１２３４５６７").is_err());
    assert!(matches!(parse("123"), Err(BookError::InvalidFormat(_))));
}

#[test]
fn test_phone_serde() {
    let phone: Phone = serde_json::from_str("\"0501234567\"").unwrap();
    assert_eq!(serde_json::to_string(&phone).unwrap(), "\"0501234567\"");
    assert!(serde_json::from_str::<Phone>("\"12345\"").is_err());
}

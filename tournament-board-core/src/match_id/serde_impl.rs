//! serde impls for src/match_id.rs
use std::fmt::{self, Formatter};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::MatchId;

impl Serialize for MatchId {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MatchId {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(MatchIdVisitor)
    }
}

struct MatchIdVisitor;

impl<'de> Visitor<'de> for MatchIdVisitor {
    type Value = MatchId;

    #[inline]
    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a match id like \"A1\", \"L10\" or \"GF\"")
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    use super::MatchId;

    #[test]
    fn test_match_id_serde() {
        assert_tokens(&MatchId::A1, &[Token::Str("A1")]);
        assert_tokens(&MatchId::L10, &[Token::Str("L10")]);
        assert_tokens(&MatchId::GF, &[Token::Str("GF")]);

        assert_de_tokens_error::<MatchId>(&[Token::Str("Z1")], "unknown match: Z1");
    }
}

use std::fmt;

use base64::{prelude::BASE64_URL_SAFE_NO_PAD, Engine};
use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize, Serializer};

use super::PaginationErrorCode;
use crate::error::{Error, Result};

/// Opaque cursor pointing at the zero-based offset of a row in an ordered result set.
///
/// On the wire it's the url-safe base64 encoding of the decimal offset, clients must not build them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor(u64);

impl Cursor {
    /// Builds the cursor of the row at the given offset
    pub fn new(offset: u64) -> Self {
        Self(offset)
    }

    /// The offset of the row this cursor points at
    pub fn offset(&self) -> u64 {
        self.0
    }

    /// The offset of the row right after the one this cursor points at
    pub fn next_offset(&self) -> Result<u64> {
        self.0.checked_add(1).ok_or_else(|| {
            Error::from((PaginationErrorCode::PageInvalidCursor, "The cursor points past the last offset"))
                .with_property("cursor", self.encode())
                .boxed()
        })
    }

    /// Encodes this [Cursor] into its opaque string form
    pub fn encode(&self) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(self.0.to_string())
    }

    /// Decodes a [Cursor] previously returned by [encode](Cursor::encode).
    ///
    /// Only the exact form produced by [encode](Cursor::encode) is accepted, like `"Mw"` for offset 3 but not the
    /// encodings of `"03"` or `"+3"`.
    pub fn decode(cursor: impl AsRef<str>) -> Result<Self> {
        let cursor = cursor.as_ref();
        let invalid = |reason: &str| {
            Error::from((PaginationErrorCode::PageInvalidCursor, reason))
                .with_property("cursor", cursor)
                .boxed()
        };

        let data = BASE64_URL_SAFE_NO_PAD
            .decode(cursor)
            .map_err(|_| invalid("Couldn't decode the cursor as base64"))?;
        let text = std::str::from_utf8(&data).map_err(|_| invalid("The cursor isn't valid utf-8"))?;
        let offset = text
            .parse::<i128>()
            .map_err(|_| invalid("The cursor doesn't contain an integer offset"))?;
        if offset < 0 {
            return Err(invalid("The cursor contains a negative offset"));
        }
        let offset = u64::try_from(offset).map_err(|_| invalid("The cursor offset is out of range"))?;

        let decoded = Self(offset);
        if decoded.encode() != cursor {
            return Err(invalid("The cursor isn't in its canonical form"));
        }
        Ok(decoded)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Computes the offset the next slice starts at, given the optional `after` cursor.
///
/// Without a cursor the slice starts at the beginning, otherwise right after the row the cursor points at. Empty
/// cursors are considered missing.
pub fn decode_offset(after: Option<impl AsRef<str>>) -> Result<u64> {
    match after.as_ref().map(|c| c.as_ref()) {
        None | Some("") => Ok(0),
        Some(after) => Cursor::decode(after)?.next_offset(),
    }
}

impl Serialize for Cursor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}
impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cursor: String = Deserialize::deserialize(deserializer)?;
        Self::decode(cursor).map_err(|err| D::Error::custom(err.info().message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_encoding() {
        assert_eq!(Cursor::new(3).encode(), "Mw");
        assert_eq!(Cursor::new(1).encode(), "MQ");

        for offset in [0, 1, 9, 10, 4096, u64::MAX] {
            let decoded = Cursor::decode(Cursor::new(offset).encode()).unwrap();
            assert_eq!(decoded.offset(), offset);
        }
    }

    #[test]
    fn test_decode_offset() {
        assert_eq!(decode_offset(None::<&str>).unwrap(), 0);
        assert_eq!(decode_offset(Some("")).unwrap(), 0);
        assert_eq!(decode_offset(Some(Cursor::new(2).encode())).unwrap(), 3);
        assert_eq!(decode_offset(Some(Cursor::new(0).encode())).unwrap(), 1);
    }

    #[test]
    fn test_invalid_cursors() {
        let negative = BASE64_URL_SAFE_NO_PAD.encode("-1");
        let fractional = BASE64_URL_SAFE_NO_PAD.encode("2.5");
        let text = BASE64_URL_SAFE_NO_PAD.encode("vehicle");

        for cursor in [negative.as_str(), fractional.as_str(), text.as_str(), "not base64!"] {
            let err = decode_offset(Some(cursor)).unwrap_err();
            assert_eq!(err.info().code(), "PageInvalidCursor");
            assert!(!err.is_unexpected());
            assert_eq!(
                err.properties().and_then(|p| p.get("cursor")),
                Some(&serde_json::Value::from(cursor))
            );
        }

        for alias in ["+3", "003"] {
            let cursor = BASE64_URL_SAFE_NO_PAD.encode(alias);
            let err = Cursor::decode(&cursor).unwrap_err();
            assert_eq!(err.info().code(), "PageInvalidCursor");
            assert_eq!(err.reason(), Some("The cursor isn't in its canonical form"));
        }
        assert!(Cursor::decode("Mw==").is_err());

        let last = Cursor::new(u64::MAX).encode();
        let err = decode_offset(Some(last)).unwrap_err();
        assert_eq!(err.info().code(), "PageInvalidCursor");
    }

    #[test]
    fn test_cursor_serde() {
        let json = serde_json::to_string(&Cursor::new(3)).unwrap();
        assert_eq!(json, "\"Mw\"");
        assert_eq!(serde_json::from_str::<Cursor>(&json).unwrap(), Cursor::new(3));
        assert!(serde_json::from_str::<Cursor>(&format!("\"{}\"", BASE64_URL_SAFE_NO_PAD.encode("-1"))).is_err());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw string-encoding identifier attached to decoding failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringEncoding(pub u64);

impl StringEncoding {
    pub const ASCII: Self = Self(1);
    pub const NEXTSTEP: Self = Self(2);
    pub const JAPANESE_EUC: Self = Self(3);
    pub const UTF8: Self = Self(4);
    pub const ISO_LATIN1: Self = Self(5);
    pub const NON_LOSSY_ASCII: Self = Self(7);
    pub const SHIFT_JIS: Self = Self(8);
    pub const UTF16: Self = Self(10);
    pub const WINDOWS_CP1252: Self = Self(12);
    pub const MACOS_ROMAN: Self = Self(30);
    pub const UTF16_BE: Self = Self(0x9000_0100);
    pub const UTF16_LE: Self = Self(0x9400_0100);
    pub const UTF32: Self = Self(0x8c00_0100);

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::ASCII => "ASCII",
            Self::NEXTSTEP => "NEXTSTEP",
            Self::JAPANESE_EUC => "Japanese EUC",
            Self::UTF8 => "UTF-8",
            Self::ISO_LATIN1 => "ISO Latin 1",
            Self::NON_LOSSY_ASCII => "Non-lossy ASCII",
            Self::SHIFT_JIS => "Shift JIS",
            Self::UTF16 => "UTF-16",
            Self::WINDOWS_CP1252 => "Windows CP1252",
            Self::MACOS_ROMAN => "Mac OS Roman",
            Self::UTF16_BE => "UTF-16 BE",
            Self::UTF16_LE => "UTF-16 LE",
            Self::UTF32 => "UTF-32",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for StringEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "encoding {}", self.0),
        }
    }
}

impl From<u64> for StringEncoding {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(StringEncoding::UTF8.to_string(), "UTF-8");
        assert_eq!(StringEncoding(999).to_string(), "encoding 999");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&StringEncoding::UTF16_LE).unwrap();
        assert_eq!(json, "2483028224");
        let back: StringEncoding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StringEncoding::UTF16_LE);
    }
}

use crate::constants::{
    DB_MONGO, DB_POSTGRES, ENABLE_DB_MONGO, ENABLE_DB_POSTGRES, ENABLE_OCR, ENABLE_STORAGE, OCR,
    STORAGE,
};
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Represents a set of optional subsystems.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FeatureSet: u32 {
        const POSTGRES = 1 << 0;
        const MONGO = 1 << 1;
        const OCR = 1 << 2;
        const STORAGE = 1 << 3;

        const ALL = Self::POSTGRES.bits()
            | Self::MONGO.bits()
            | Self::OCR.bits()
            | Self::STORAGE.bits();
    }
}

impl FeatureSet {
    /// Canonical name of a single feature, `None` for combined or empty sets.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::POSTGRES => Some(DB_POSTGRES),
            Self::MONGO => Some(DB_MONGO),
            Self::OCR => Some(OCR),
            Self::STORAGE => Some(STORAGE),
            _ => None,
        }
    }

    /// Environment variable governing a single feature.
    #[must_use]
    pub fn env_var(self) -> Option<&'static str> {
        match self {
            Self::POSTGRES => Some(ENABLE_DB_POSTGRES),
            Self::MONGO => Some(ENABLE_DB_MONGO),
            Self::OCR => Some(ENABLE_OCR),
            Self::STORAGE => Some(ENABLE_STORAGE),
            _ => None,
        }
    }

    /// Canonical names of every feature in the set, in declaration order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        self.iter().filter_map(Self::name)
    }
}

impl From<&str> for FeatureSet {
    fn from(s: &str) -> Self {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            DB_POSTGRES | "postgres" => Self::POSTGRES,
            DB_MONGO | "mongo" => Self::MONGO,
            OCR => Self::OCR,
            STORAGE => Self::STORAGE,
            "all" | "*" => Self::ALL,
            other => Self::from_env_var(other),
        }
    }
}

impl FeatureSet {
    fn from_env_var(lowered: &str) -> Self {
        Self::ALL
            .iter()
            .find(|flag| flag.env_var().is_some_and(|var| var.eq_ignore_ascii_case(lowered)))
            .unwrap_or_else(Self::empty)
    }
}

impl From<u32> for FeatureSet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

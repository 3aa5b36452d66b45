//! References to the things a ledger can hold.
//!
//! Two families exist on the external ledger:
//! - **Assets**: fungible assets identified by a runtime value ([`AssetId`]).
//!   The governance token is always one of these.
//! - **Currencies**: native currencies identified by a compile-time type.
//!   At rest they are recorded by their canonical name ([`CurrencyName`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a fungible asset (its metadata address on the ledger).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Canonical name of a native currency type, stored as an opaque byte string.
///
/// Names are compared verbatim; no normalisation is ever applied.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurrencyName(Vec<u8>);

impl CurrencyName {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The canonical name of currency `C`.
    pub fn of<C: Currency>() -> Self {
        Self::new(C::NAME)
    }
}

impl fmt::Display for CurrencyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{s}"),
            Err(_) => write!(f, "0x{}", hex::encode(&self.0)),
        }
    }
}

/// A native currency type.
///
/// Settling a currency transfer needs the currency as a type parameter; this
/// trait is what binds that type to the name recorded in the proposal.
///
/// `NAME` is persisted with every currency-transfer proposal and compared
/// byte-for-byte at settlement, so it must never change once proposals
/// naming it exist.
pub trait Currency: 'static {
    const NAME: &'static [u8];
}

/// Anything a ledger balance can be held in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Asset {
    Token(AssetId),
    Currency(CurrencyName),
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(id) => write!(f, "token:{id}"),
            Self::Currency(name) => write!(f, "currency:{name}"),
        }
    }
}

impl From<AssetId> for Asset {
    fn from(id: AssetId) -> Self {
        Self::Token(id)
    }
}

impl From<CurrencyName> for Asset {
    fn from(name: CurrencyName) -> Self {
        Self::Currency(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gold;
    impl Currency for Gold {
        const NAME: &'static [u8] = b"gold";
    }

    struct Silver;
    impl Currency for Silver {
        const NAME: &'static [u8] = b"0x1::silver::Silver";
    }

    mod relocated {
        pub struct Gold;
        impl super::Currency for Gold {
            const NAME: &'static [u8] = b"gold";
        }
    }

    #[test]
    fn canonical_name_is_the_declared_bytes() {
        assert_eq!(CurrencyName::of::<Gold>().as_bytes(), b"gold");
        assert_eq!(
            CurrencyName::of::<Silver>().as_bytes(),
            b"0x1::silver::Silver"
        );
        assert_ne!(CurrencyName::of::<Gold>(), CurrencyName::of::<Silver>());
    }

    #[test]
    fn canonical_name_does_not_depend_on_type_path() {
        assert_eq!(
            CurrencyName::of::<Gold>(),
            CurrencyName::of::<relocated::Gold>()
        );
    }

    #[test]
    fn non_utf8_names_display_as_hex() {
        let name = CurrencyName::new(vec![0xff, 0x00]);
        assert_eq!(name.to_string(), "0xff00");
    }
}

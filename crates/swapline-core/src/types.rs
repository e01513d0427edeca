//! Core type definitions for Swapline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{AssetError, Error};

/// Token amount in base units (1 whole unit = [`constants::ONE`])
pub type Amount = u128;

/// Block height of the replicated chain
pub type BlockHeight = i64;

/// Chain identifier (e.g., "BTC", "ETH", "MAYA")
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain(String);

impl Chain {
    /// Chain identifiers are stored upper-cased
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_ascii_uppercase())
    }

    /// The network's own chain, home of the base asset and of synthetics
    pub fn base() -> Self {
        Self(constants::BASE_CHAIN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_base(&self) -> bool {
        self.0 == constants::BASE_CHAIN
    }

    /// EVM chains share the 0x-prefixed hex address format
    pub fn is_evm(&self) -> bool {
        matches!(self.0.as_str(), "ETH" | "ARB" | "AVAX" | "BSC")
    }

    /// The asset used to pay gas on this chain
    pub fn gas_asset(&self) -> Asset {
        let symbol = match self.0.as_str() {
            constants::BASE_CHAIN => constants::BASE_SYMBOL,
            "ARB" => "ETH",
            "THOR" => "RUNE",
            "BSC" => "BNB",
            other => other,
        };
        Asset {
            chain: self.clone(),
            symbol: symbol.to_string(),
            ticker: symbol.to_string(),
            synth: false,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Asset identifier.
///
/// Layer-1 assets are written `CHAIN.SYMBOL`, synthetic assets `CHAIN/SYMBOL`.
/// The symbol may carry a contract suffix (`TCAN-014`); the part before the
/// dash is the ticker.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    pub chain: Chain,
    pub symbol: String,
    pub ticker: String,
    pub synth: bool,
}

impl Asset {
    /// Parse an asset string such as `BNB.BNB`, `ETH.USDT-0XDAC1`, or `BTC/BTC`
    pub fn new(input: &str) -> Result<Self, AssetError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AssetError::Empty);
        }

        let (chain, symbol, synth) = if let Some((c, s)) = input.split_once('/') {
            (c, s, true)
        } else if let Some((c, s)) = input.split_once('.') {
            (c, s, false)
        } else {
            return Err(AssetError::InvalidFormat(input.to_string()));
        };

        if chain.is_empty() || !chain.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AssetError::InvalidChain(chain.to_string()));
        }
        if symbol.is_empty() || symbol.contains(['.', '/', ':']) {
            return Err(AssetError::InvalidFormat(input.to_string()));
        }

        let symbol = symbol.to_ascii_uppercase();
        let ticker = symbol.split('-').next().unwrap_or_default().to_string();
        let asset = Self {
            chain: Chain::new(chain),
            symbol,
            ticker,
            synth,
        };
        if asset.synth && asset.chain.is_base() {
            return Err(AssetError::InvalidFormat(input.to_string()));
        }
        Ok(asset)
    }

    /// The network's base asset, the pricing leg of every pool
    pub fn base() -> Self {
        Chain::base().gas_asset()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty() || self.symbol.is_empty()
    }

    pub fn is_base(&self) -> bool {
        !self.synth && self.chain.is_base() && self.symbol == constants::BASE_SYMBOL
    }

    pub fn is_synthetic(&self) -> bool {
        self.synth
    }

    /// Synthetic assets resolve to the layer-1 asset whose pool backs them
    pub fn layer1(&self) -> Asset {
        Asset {
            synth: false,
            ..self.clone()
        }
    }

    pub fn synthetic(&self) -> Asset {
        Asset {
            synth: true,
            ..self.clone()
        }
    }

    pub fn is_gas_asset(&self) -> bool {
        !self.synth && *self == self.chain.gas_asset()
    }

    /// Chain on which this asset is delivered to a user.
    ///
    /// Synthetics live on the base chain regardless of the chain they track.
    pub fn delivery_chain(&self) -> Chain {
        if self.synth {
            Chain::base()
        } else {
            self.chain.clone()
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let sep = if self.synth { '/' } else { '.' };
        write!(f, "{}{}{}", self.chain, sep, self.symbol)
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Asset {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self::default());
        }
        Self::new(&value)
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}

/// Transaction ID (32 bytes, hex-encoded)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl TxId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a 32-byte hex transaction hash, normalised to upper case
    pub fn parse(id: &str) -> Result<Self, Error> {
        let bytes = hex::decode(id).map_err(|_| Error::InvalidTxId { id: id.to_string() })?;
        if bytes.len() != 32 {
            return Err(Error::InvalidTxId { id: id.to_string() });
        }
        Ok(Self(id.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address on the base chain or an external chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Basic format check that the address belongs to `chain`.
    ///
    /// Prefix and length only, no checksum validation.
    pub fn is_chain(&self, chain: &Chain) -> bool {
        let addr = self.0.as_str();
        if addr.is_empty() {
            return false;
        }

        if chain.is_evm() {
            return addr.len() == 42
                && addr.starts_with("0x")
                && addr[2..].chars().all(|c| c.is_ascii_hexdigit());
        }

        match chain.as_str() {
            constants::BASE_CHAIN => {
                addr.starts_with("maya1") || addr.starts_with("smaya1") || addr.starts_with("tmaya1")
            }
            "BNB" => addr.starts_with("bnb1") || addr.starts_with("tbnb1"),
            "THOR" => addr.starts_with("thor1") || addr.starts_with("sthor1"),
            "BTC" => {
                let segwit = addr.starts_with("bc1") || addr.starts_with("tb1") || addr.starts_with("bcrt1");
                let legacy = addr.starts_with(['1', '3', 'm', 'n', '2']);
                (segwit || legacy) && (26..=90).contains(&addr.len())
            }
            "DASH" => addr.starts_with(['X', '7', 'y', '8']),
            "KUJI" => addr.starts_with("kujira1"),
            _ => addr.chars().all(|c| c.is_ascii_alphanumeric()),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount of a specific asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub asset: Asset,
    pub amount: Amount,
}

impl Coin {
    pub fn new(asset: Asset, amount: Amount) -> Self {
        Self { asset, amount }
    }

    pub fn is_empty(&self) -> bool {
        self.asset.is_empty() || self.amount == 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.asset)
    }
}

/// An observed inbound transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub id: TxId,
    pub chain: Chain,
    pub from_address: Address,
    pub to_address: Address,
    pub coins: Vec<Coin>,
    #[serde(default)]
    pub gas: Vec<Coin>,
    #[serde(default)]
    pub memo: String,
}

impl Tx {
    pub fn new(
        id: TxId,
        chain: Chain,
        from_address: Address,
        to_address: Address,
        coins: Vec<Coin>,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            id,
            chain,
            from_address,
            to_address,
            coins,
            gas: Vec::new(),
            memo: memo.into(),
        }
    }
}

impl fmt::Display for Tx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coins: Vec<String> = self.coins.iter().map(|c| c.to_string()).collect();
        write!(
            f,
            "{}: {} ==> {} ({}) {}",
            self.id,
            self.from_address,
            self.to_address,
            coins.join(", "),
            self.memo
        )
    }
}

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Stagenet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Stagenet => "stagenet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constants
pub mod constants {
    use super::Amount;

    /// Base units per whole token
    pub const ONE: Amount = 100_000_000;

    /// Basis points representing 100%
    pub const MAX_BASIS_POINTS: Amount = 10_000;

    /// Chain hosting the base asset
    pub const BASE_CHAIN: &str = "MAYA";

    /// Symbol of the base asset
    pub const BASE_SYMBOL: &str = "CACAO";
}

//! Outbound and refund memos

use std::fmt;
use std::str::FromStr;

use swapline_core::TxId;

use crate::constants::{OUTBOUND_MEMO_PREFIX, REFUND_MEMO_PREFIX};
use crate::OutboundError;

/// Memo attached to a transaction leaving the network, referencing the inbound tx
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMemo {
    Out(TxId),
    Refund(TxId),
}

impl OutboundMemo {
    pub fn in_hash(&self) -> &TxId {
        match self {
            Self::Out(id) | Self::Refund(id) => id,
        }
    }
}

impl fmt::Display for OutboundMemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Out(id) => write!(f, "{}:{}", OUTBOUND_MEMO_PREFIX, id),
            Self::Refund(id) => write!(f, "{}:{}", REFUND_MEMO_PREFIX, id),
        }
    }
}

impl FromStr for OutboundMemo {
    type Err = OutboundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, id) = s
            .split_once(':')
            .ok_or_else(|| OutboundError::InvalidMemo(s.to_string()))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(OutboundError::InvalidMemo(s.to_string()));
        }
        match prefix.trim().to_ascii_uppercase().as_str() {
            OUTBOUND_MEMO_PREFIX => Ok(Self::Out(TxId::new(id))),
            REFUND_MEMO_PREFIX => Ok(Self::Refund(TxId::new(id))),
            _ => Err(OutboundError::InvalidMemo(s.to_string())),
        }
    }
}

//! # Chain Identifiers
//!
//! The closed set of chains the orchestrator knows about, with the address
//! format each one accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const C32_ALPHABET: &str = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Supported blockchain identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    /// Solana mainnet.
    Solana,
    /// NEAR protocol.
    Near,
    /// Stacks (Bitcoin L2).
    Stacks,
    /// Ethereum mainnet.
    Ethereum,
    /// Avalanche C-Chain.
    Avalanche,
    /// Base (purchase destination).
    Base,
}

impl ChainId {
    /// All known chains.
    pub const ALL: [ChainId; 6] = [
        ChainId::Solana,
        ChainId::Near,
        ChainId::Stacks,
        ChainId::Ethereum,
        ChainId::Avalanche,
        ChainId::Base,
    ];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Solana => "solana",
            ChainId::Near => "near",
            ChainId::Stacks => "stacks",
            ChainId::Ethereum => "ethereum",
            ChainId::Avalanche => "avalanche",
            ChainId::Base => "base",
        }
    }

    /// EVM-compatible chains share the `0x` + 20-byte hex address format.
    pub fn is_evm(&self) -> bool {
        matches!(self, ChainId::Ethereum | ChainId::Avalanche | ChainId::Base)
    }

    /// Check an address string against this chain's format.
    pub fn is_valid_address(&self, address: &str) -> bool {
        match self {
            ChainId::Ethereum | ChainId::Avalanche | ChainId::Base => is_evm_address(address),
            ChainId::Solana => is_solana_address(address),
            ChainId::Near => is_near_account(address),
            ChainId::Stacks => is_stacks_principal(address),
        }
    }

    /// Validate an address, returning a typed error on mismatch.
    pub fn validate_address(&self, address: &str) -> Result<(), ValidationError> {
        if self.is_valid_address(address) {
            Ok(())
        } else {
            Err(ValidationError::InvalidAddress {
                chain: *self,
                address: address.to_string(),
            })
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana" | "sol" => Ok(ChainId::Solana),
            "near" => Ok(ChainId::Near),
            "stacks" | "stx" => Ok(ChainId::Stacks),
            "ethereum" | "eth" => Ok(ChainId::Ethereum),
            "avalanche" | "avax" => Ok(ChainId::Avalanche),
            "base" => Ok(ChainId::Base),
            other => Err(ValidationError::UnknownChain(other.to_string())),
        }
    }
}

fn is_evm_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn is_solana_address(address: &str) -> bool {
    (32..=44).contains(&address.len()) && address.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// NEAR named accounts or 64-hex implicit accounts.
fn is_near_account(address: &str) -> bool {
    if address.len() == 64 && address.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
        return true;
    }
    if !(2..=64).contains(&address.len()) {
        return false;
    }

    let mut prev_separator = true;
    for c in address.chars() {
        match c {
            'a'..='z' | '0'..='9' => prev_separator = false,
            '-' | '_' | '.' => {
                if prev_separator {
                    return false;
                }
                prev_separator = true;
            }
            _ => return false,
        }
    }
    !prev_separator
}

/// Standard (`SP`/`SM` mainnet, `ST`/`SN` testnet) or contract principals.
fn is_stacks_principal(address: &str) -> bool {
    let (principal, contract) = match address.split_once('.') {
        Some((p, c)) => (p, Some(c)),
        None => (address, None),
    };

    let prefix_ok = ["SP", "SM", "ST", "SN"]
        .iter()
        .any(|prefix| principal.starts_with(prefix));
    if !prefix_ok || !(28..=41).contains(&principal.len()) {
        return false;
    }
    if !principal[1..].chars().all(|c| C32_ALPHABET.contains(c)) {
        return false;
    }

    match contract {
        None => true,
        Some(name) => {
            !name.is_empty()
                && name.len() <= 128
                && name.starts_with(|c: char| c.is_ascii_alphabetic())
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }
    }
}

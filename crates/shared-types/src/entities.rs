//! # Domain Entities
//!
//! The purchase `Intent`, its state machine, and the request that creates it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::{parse_amount, Amount};
use crate::chain::ChainId;
use crate::errors::{BridgeErrorCode, IntentError, ValidationError};

/// Bridging mechanisms the orchestrator can dispatch to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolKind {
    /// Native burn on source, attestation, mint on destination.
    Attestation,
    /// Liquidity-network swap that settles natively on the destination.
    LiquiditySwap,
    /// Source contract emits an event that a relayer settles on the destination.
    ContractEvent,
}

impl ProtocolKind {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Attestation => "attestation",
            ProtocolKind::LiquiditySwap => "liquidity_swap",
            ProtocolKind::ContractEvent => "contract_event",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProtocolKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "attestation" => Ok(ProtocolKind::Attestation),
            "liquidity_swap" => Ok(ProtocolKind::LiquiditySwap),
            "contract_event" => Ok(ProtocolKind::ContractEvent),
            other => Err(ValidationError::UnknownProtocol(other.to_string())),
        }
    }
}

/// Purchase intent state machine.
///
/// ```text
/// pending → signing → broadcasting → bridging → (awaiting_mint →) purchasing → executed
///                                       ↺ retry
/// any non-terminal ──────────────────────────────────────────────────────────→ failed
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    /// Created, no network action yet.
    #[default]
    Pending,
    /// Source transaction being authorized by the caller.
    Signing,
    /// Source transaction being submitted by the caller.
    Broadcasting,
    /// Bridge operation dispatched to an adapter.
    Bridging,
    /// Attestation received, destination claim outstanding.
    AwaitingMint,
    /// Destination purchase submitted.
    Purchasing,
    /// Terminal success.
    Executed,
    /// Terminal failure.
    Failed,
}

impl IntentStatus {
    /// Statuses a poller keeps observing.
    pub const IN_FLIGHT: [IntentStatus; 6] = [
        IntentStatus::Pending,
        IntentStatus::Signing,
        IntentStatus::Broadcasting,
        IntentStatus::Bridging,
        IntentStatus::AwaitingMint,
        IntentStatus::Purchasing,
    ];

    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: IntentStatus) -> bool {
        use IntentStatus::*;
        match (self, next) {
            (Executed, _) | (Failed, _) => false,
            (_, Failed) => true,
            (Pending, Signing | Broadcasting | Bridging) => true,
            (Signing, Broadcasting | Bridging) => true,
            (Broadcasting, Bridging) => true,
            // retry self-loop
            (Bridging, Bridging) => true,
            (Bridging, AwaitingMint | Purchasing) => true,
            (AwaitingMint, Purchasing) => true,
            (Purchasing, Executed) => true,
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Executed | Self::Failed)
    }

    /// Check if a poller should keep observing.
    pub fn is_in_flight(&self) -> bool {
        !self.is_terminal()
    }

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Signing => "signing",
            Self::Broadcasting => "broadcasting",
            Self::Bridging => "bridging",
            Self::AwaitingMint => "awaiting_mint",
            Self::Purchasing => "purchasing",
            Self::Executed => "executed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to create an intent (direct API or webhook).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    /// Caller-chosen id (webhook path uses the source transaction hash).
    #[serde(default)]
    pub id: Option<String>,
    pub source_chain: ChainId,
    pub destination_chain: ChainId,
    /// Decimal string in source-asset units.
    pub amount: String,
    pub source_address: String,
    pub destination_address: String,
    pub token: String,
    /// Purchase units requested on the destination.
    #[serde(default)]
    pub units: Option<u64>,
}

impl IntentRequest {
    /// Validate chains, amount, addresses and token; returns the parsed amount.
    pub fn validate(&self) -> Result<Amount, ValidationError> {
        if self.source_chain == self.destination_chain {
            return Err(ValidationError::SameChain(self.source_chain));
        }
        let amount = parse_amount(&self.amount)?;
        self.source_chain.validate_address(&self.source_address)?;
        self.destination_chain
            .validate_address(&self.destination_address)?;
        if self.token.trim().is_empty() {
            return Err(ValidationError::MissingField("token"));
        }
        Ok(amount)
    }
}

/// One dispatch of a bridge operation to one protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeAttempt {
    /// 1-based attempt number.
    pub attempt: u32,
    pub protocol: ProtocolKind,
    pub started_at: u64,
    pub finished_at: Option<u64>,
    pub success: bool,
    pub error_code: Option<BridgeErrorCode>,
    pub error_message: Option<String>,
    /// Source-chain transaction submitted during this attempt, even if it failed.
    #[serde(default)]
    pub source_tx_hash: Option<String>,
}

/// Append-only error history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub code: BridgeErrorCode,
    pub message: String,
    pub at: u64,
}

/// One cross-chain purchase attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub id: String,
    pub source_chain: ChainId,
    pub destination_chain: ChainId,
    pub amount: String,
    pub token: String,
    pub units: Option<u64>,
    pub source_address: String,
    pub destination_address: String,
    pub status: IntentStatus,
    /// First protocol committed to; write-once.
    pub protocol: Option<ProtocolKind>,
    pub attempts: Vec<BridgeAttempt>,
    pub source_tx_hash: Option<String>,
    pub mint_tx_hash: Option<String>,
    pub purchase_tx_hash: Option<String>,
    pub error_code: Option<BridgeErrorCode>,
    pub error_message: Option<String>,
    pub error_history: Vec<ErrorRecord>,
    pub failure_count: u32,
    /// Store-managed optimistic concurrency version.
    pub version: u64,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Intent {
    /// Create a pending intent from a (validated) request.
    pub fn new(id: impl Into<String>, request: &IntentRequest, now: u64) -> Self {
        Self {
            id: id.into(),
            source_chain: request.source_chain,
            destination_chain: request.destination_chain,
            amount: request.amount.trim().to_string(),
            token: request.token.trim().to_string(),
            units: request.units,
            source_address: request.source_address.clone(),
            destination_address: request.destination_address.clone(),
            status: IntentStatus::Pending,
            protocol: None,
            attempts: Vec::new(),
            source_tx_hash: None,
            mint_tx_hash: None,
            purchase_tx_hash: None,
            error_code: None,
            error_message: None,
            error_history: Vec::new(),
            failure_count: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at`, strictly forward even when the clock stalls.
    pub fn touch(&mut self, now: u64) {
        self.updated_at = now.max(self.updated_at.saturating_add(1));
    }

    /// Check if terminal.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Transition to new state.
    pub fn transition_to(&mut self, next: IntentStatus, now: u64) -> Result<(), IntentError> {
        if self.status.is_terminal() {
            return Err(IntentError::Terminal(self.status));
        }
        if !self.status.can_transition_to(next) {
            return Err(IntentError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.touch(now);
        Ok(())
    }

    /// Record a failure: increments `failure_count` and appends to the history.
    pub fn record_failure(&mut self, code: BridgeErrorCode, message: impl Into<String>, now: u64) {
        let message = message.into();
        self.failure_count = self.failure_count.saturating_add(1);
        self.set_error(code, message, now);
    }

    /// Move to `failed` with an error, without counting another failure.
    pub fn fail(
        &mut self,
        code: BridgeErrorCode,
        message: impl Into<String>,
        now: u64,
    ) -> Result<(), IntentError> {
        self.transition_to(IntentStatus::Failed, now)?;
        let message = message.into();
        let already_recorded = self.error_code == Some(code)
            && self.error_message.as_deref() == Some(message.as_str());
        if !already_recorded {
            self.set_error(code, message, now);
        }
        Ok(())
    }

    /// Clear the current error after a successful retry; history stays.
    pub fn clear_error(&mut self, now: u64) {
        if self.error_code.is_some() || self.error_message.is_some() {
            self.error_code = None;
            self.error_message = None;
            self.touch(now);
        }
    }

    fn set_error(&mut self, code: BridgeErrorCode, message: String, now: u64) {
        self.error_history.push(ErrorRecord {
            code,
            message: message.clone(),
            at: now,
        });
        self.error_code = Some(code);
        self.error_message = Some(message);
        self.touch(now);
    }

    /// Open a new bridge attempt; commits `protocol` if not yet set.
    pub fn begin_attempt(&mut self, protocol: ProtocolKind, now: u64) -> u32 {
        if self.protocol.is_none() {
            self.protocol = Some(protocol);
        }
        let attempt = self.attempts.len() as u32 + 1;
        self.attempts.push(BridgeAttempt {
            attempt,
            protocol,
            started_at: now,
            finished_at: None,
            success: false,
            error_code: None,
            error_message: None,
            source_tx_hash: None,
        });
        self.touch(now);
        attempt
    }

    /// Record a source transaction against the latest attempt. The intent's
    /// `source_tx_hash` keeps the first one seen.
    pub fn record_source_tx(&mut self, hash: &str, now: u64) -> Result<(), IntentError> {
        let attempt = self.attempts.last_mut().ok_or(IntentError::NoOpenAttempt)?;
        if attempt.source_tx_hash.is_none() {
            attempt.source_tx_hash = Some(hash.to_string());
        }
        if self.source_tx_hash.is_none() {
            self.set_source_tx_hash(hash, now)?;
        }
        self.touch(now);
        Ok(())
    }

    /// Close the open bridge attempt.
    pub fn finish_attempt(
        &mut self,
        success: bool,
        error: Option<(BridgeErrorCode, String)>,
        now: u64,
    ) -> Result<(), IntentError> {
        let attempt = self
            .attempts
            .last_mut()
            .filter(|a| a.finished_at.is_none())
            .ok_or(IntentError::NoOpenAttempt)?;
        attempt.finished_at = Some(now);
        attempt.success = success;
        if let Some((code, message)) = error {
            attempt.error_code = Some(code);
            attempt.error_message = Some(message);
        }
        self.touch(now);
        Ok(())
    }

    /// Attempt still in flight, if any.
    pub fn open_attempt(&self) -> Option<&BridgeAttempt> {
        self.attempts.last().filter(|a| a.finished_at.is_none())
    }

    /// Protocols tried so far, in first-use order.
    pub fn tried_protocols(&self) -> Vec<ProtocolKind> {
        let mut tried = Vec::new();
        for attempt in &self.attempts {
            if !tried.contains(&attempt.protocol) {
                tried.push(attempt.protocol);
            }
        }
        tried
    }

    /// Protocol of the latest attempt, falling back to the committed one.
    pub fn active_protocol(&self) -> Option<ProtocolKind> {
        self.attempts.last().map(|a| a.protocol).or(self.protocol)
    }

    /// Record the source transaction hash (set-once).
    pub fn set_source_tx_hash(&mut self, hash: &str, now: u64) -> Result<(), IntentError> {
        if set_once(&mut self.source_tx_hash, "sourceTxHash", hash)? {
            self.touch(now);
        }
        Ok(())
    }

    /// Record the destination mint/claim transaction hash (set-once).
    pub fn set_mint_tx_hash(&mut self, hash: &str, now: u64) -> Result<(), IntentError> {
        if set_once(&mut self.mint_tx_hash, "mintTxHash", hash)? {
            self.touch(now);
        }
        Ok(())
    }

    /// Record the destination purchase transaction hash (set-once).
    pub fn set_purchase_tx_hash(&mut self, hash: &str, now: u64) -> Result<(), IntentError> {
        if set_once(&mut self.purchase_tx_hash, "purchaseTxHash", hash)? {
            self.touch(now);
        }
        Ok(())
    }

    /// Whether `address` is the source or destination participant.
    pub fn involves(&self, address: &str) -> bool {
        let matches = |candidate: &str| {
            if address.starts_with("0x") {
                candidate.eq_ignore_ascii_case(address)
            } else {
                candidate == address
            }
        };
        matches(&self.source_address) || matches(&self.destination_address)
    }
}

/// Returns `Ok(true)` when the slot was newly filled.
fn set_once(
    slot: &mut Option<String>,
    field: &'static str,
    value: &str,
) -> Result<bool, IntentError> {
    match slot {
        None => {
            *slot = Some(value.to_string());
            Ok(true)
        }
        Some(existing) if existing == value => Ok(false),
        Some(existing) => Err(IntentError::HashAlreadySet {
            field,
            existing: existing.clone(),
        }),
    }
}

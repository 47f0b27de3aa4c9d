//! Simulated outbound ports.
//!
//! Deterministic stand-ins for chain RPC, the attestation API and the swap
//! router. Failures can be scripted per call for tests and local runs.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{parse_amount, ChainId};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::domain::{AdapterError, BridgeParams};
use crate::ports::outbound::{
    AttestationService, ChainClientProvider, Confirmation, SourceChainClient, SwapQuote,
    SwapRouter, SwapSettlement, TransferRequest,
};

/// Deterministic hex hash for simulated transactions.
fn simulated_hash(tag: &str, n: u64) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(tag.as_bytes());
    hasher.update(n.to_le_bytes());
    hex::encode(hasher.finalize())
}

/// Scripted one-shot failures, consumed in order.
#[derive(Debug, Default)]
struct FailureScript(Mutex<VecDeque<AdapterError>>);

impl FailureScript {
    fn push(&self, error: AdapterError) {
        self.0.lock().push_back(error);
    }

    fn next(&self) -> Option<AdapterError> {
        self.0.lock().pop_front()
    }
}

/// Simulated source chain.
#[derive(Debug)]
pub struct SimulatedChainClient {
    chain: ChainId,
    latency: Duration,
    submitted: AtomicU64,
    submit_failures: FailureScript,
    confirm_failures: FailureScript,
}

impl SimulatedChainClient {
    /// Create a client with no latency.
    pub fn new(chain: ChainId) -> Self {
        Self {
            chain,
            latency: Duration::ZERO,
            submitted: AtomicU64::new(0),
            submit_failures: FailureScript::default(),
            confirm_failures: FailureScript::default(),
        }
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail the next `submit_transfer` with `error`.
    pub fn fail_next_submit(&self, error: AdapterError) {
        self.submit_failures.push(error);
    }

    /// Fail the next `confirm` with `error`.
    pub fn fail_next_confirm(&self, error: AdapterError) {
        self.confirm_failures.push(error);
    }

    /// Number of transactions accepted.
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl SourceChainClient for SimulatedChainClient {
    fn chain(&self) -> ChainId {
        self.chain
    }

    async fn submit_transfer(&self, request: &TransferRequest) -> Result<String, AdapterError> {
        self.pause().await;
        if let Some(error) = self.submit_failures.next() {
            return Err(error);
        }
        let n = self.submitted.fetch_add(1, Ordering::SeqCst) + 1;
        let hash = simulated_hash(self.chain.as_str(), n);
        let tx_hash = if self.chain.is_evm() {
            format!("0x{}", hash)
        } else {
            hash
        };
        debug!(
            chain = %self.chain,
            kind = ?request.kind,
            tx_hash = %tx_hash,
            "[xp-01] Simulated transfer submitted"
        );
        Ok(tx_hash)
    }

    async fn confirm(&self, tx_hash: &str) -> Result<Confirmation, AdapterError> {
        self.pause().await;
        if let Some(error) = self.confirm_failures.next() {
            return Err(error);
        }
        Ok(Confirmation {
            tx_hash: tx_hash.to_string(),
            confirmations: 12,
            success: true,
            message_hash: Some(format!("0x{}", simulated_hash(tx_hash, 0))),
        })
    }
}

/// Simulated attestation API.
#[derive(Debug, Default)]
pub struct SimulatedAttestationService {
    /// Polls answered "pending" before the attestation appears.
    pending_polls: u32,
    never_ready: bool,
    polls: Mutex<HashMap<String, u32>>,
    failures: FailureScript,
}

impl SimulatedAttestationService {
    /// Attestation is available on the first poll.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer "pending" for the first `polls` polls of each message.
    pub fn with_pending_polls(mut self, polls: u32) -> Self {
        self.pending_polls = polls;
        self
    }

    /// Never produce an attestation.
    pub fn never_ready() -> Self {
        Self {
            never_ready: true,
            ..Self::default()
        }
    }

    /// Fail the next fetch with `error`.
    pub fn fail_next(&self, error: AdapterError) {
        self.failures.push(error);
    }
}

#[async_trait]
impl AttestationService for SimulatedAttestationService {
    async fn fetch_attestation(&self, message_hash: &str) -> Result<Option<String>, AdapterError> {
        if let Some(error) = self.failures.next() {
            return Err(error);
        }
        if self.never_ready {
            return Ok(None);
        }
        let mut polls = self.polls.lock();
        let count = polls.entry(message_hash.to_string()).or_insert(0);
        *count += 1;
        if *count > self.pending_polls {
            Ok(Some(format!("0x{}", simulated_hash(message_hash, 1))))
        } else {
            Ok(None)
        }
    }
}

/// Simulated liquidity router.
#[derive(Debug)]
pub struct SimulatedSwapRouter {
    routes: HashSet<(ChainId, ChainId)>,
    fee_bps: u32,
    executed: AtomicU64,
    failures: FailureScript,
}

impl SimulatedSwapRouter {
    /// Router with the given routes and fee.
    pub fn new(routes: impl IntoIterator<Item = (ChainId, ChainId)>, fee_bps: u32) -> Self {
        Self {
            routes: routes.into_iter().collect(),
            fee_bps,
            executed: AtomicU64::new(0),
            failures: FailureScript::default(),
        }
    }

    /// Fail the next quote or execute with `error`.
    pub fn fail_next(&self, error: AdapterError) {
        self.failures.push(error);
    }
}

#[async_trait]
impl SwapRouter for SimulatedSwapRouter {
    async fn quote(&self, params: &BridgeParams) -> Result<SwapQuote, AdapterError> {
        if let Some(error) = self.failures.next() {
            return Err(error);
        }
        if !self
            .routes
            .contains(&(params.source_chain, params.destination_chain))
        {
            return Err(AdapterError::RouteUnavailable {
                source_chain: params.source_chain,
                destination: params.destination_chain,
            });
        }
        let amount = parse_amount(&params.amount)?;
        let fee = amount.bps(self.fee_bps);
        Ok(SwapQuote {
            quote_id: simulated_hash(&params.intent_id, 0)[..16].to_string(),
            deposit_address: format!("deposit-{}", &simulated_hash(&params.intent_id, 1)[..12]),
            amount_in: amount.to_string(),
            amount_out: (amount.value() - fee).normalize().to_string(),
            fee: fee.normalize().to_string(),
        })
    }

    async fn execute(
        &self,
        quote: &SwapQuote,
        deposit_tx_hash: &str,
    ) -> Result<SwapSettlement, AdapterError> {
        if let Some(error) = self.failures.next() {
            return Err(error);
        }
        let n = self.executed.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(SwapSettlement {
            destination_tx_hash: format!(
                "0x{}",
                simulated_hash(&format!("{}:{}", quote.quote_id, deposit_tx_hash), n)
            ),
        })
    }
}

/// Fixed chain-to-client map.
#[derive(Default, Clone)]
pub struct StaticClientProvider {
    clients: HashMap<ChainId, Arc<dyn SourceChainClient>>,
}

impl StaticClientProvider {
    /// Empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client under its own chain.
    pub fn with_client(mut self, client: Arc<dyn SourceChainClient>) -> Self {
        self.clients.insert(client.chain(), client);
        self
    }
}

impl ChainClientProvider for StaticClientProvider {
    fn client(&self, chain: ChainId) -> Option<Arc<dyn SourceChainClient>> {
        self.clients.get(&chain).cloned()
    }
}

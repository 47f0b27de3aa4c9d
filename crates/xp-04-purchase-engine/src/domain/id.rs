//! Intent id generation.

/// `<unix-millis>-<8 hex>`.
pub fn generate_intent_id(now_ms: u64) -> String {
    let suffix: [u8; 4] = rand::random();
    format!("{}-{}", now_ms, hex::encode(suffix))
}

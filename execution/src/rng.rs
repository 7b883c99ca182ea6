//! Hash-derived entropy for game draws.
//!
//! Every draw is derived from material that is fixed once the enclosing
//! transaction is fixed: a transaction-unique digest, a coarse timestamp and
//! a nonce taken from the game's monotonic play counter. Identical inputs
//! always produce identical draws, which is what makes settlements
//! replayable and the "no retry" failure policy safe.
//!
//! The output is uniform enough for modulo reduction, but it is NOT
//! unpredictable against an adversary who can observe the transaction before
//! it is finalized. Production deployments that need that property should
//! substitute a verifiable-random implementation of [`EntropySource`]; the
//! resolvers and settlement logic do not care where the bytes come from.

use commonware_cryptography::{sha256::Sha256, Hasher};

/// Transaction-scoped draw material supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawContext {
    /// Opaque transaction-unique digest, unpredictable to the caller before
    /// submission and deterministic once the transaction is fixed.
    pub tx_unique: [u8; 32],
    /// Coarse wall-clock timestamp (seconds).
    pub timestamp: u64,
}

/// Source of per-draw entropy.
///
/// The hash-derived [`TxEntropy`] is the baseline contract; implementations
/// backed by a verifiable-random primitive can be swapped in behind this
/// trait without touching resolvers or settlement.
pub trait EntropySource {
    /// Derive a 64-bit scalar for draw `nonce`.
    fn next_scalar(&self, nonce: u64) -> u64;

    /// Derive a full digest for one ball of a path-simulation game; callers
    /// consume one raw byte per step. `asset_tag` distinguishes draws made
    /// for different wagering assets.
    fn path_digest(&self, asset_tag: &[u8], counter: u64) -> [u8; 32];
}

/// Hash-based entropy over a [`DrawContext`].
#[derive(Clone, Debug)]
pub struct TxEntropy {
    context: DrawContext,
}

impl TxEntropy {
    pub fn new(context: DrawContext) -> Self {
        Self { context }
    }
}

impl EntropySource for TxEntropy {
    fn next_scalar(&self, nonce: u64) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(&self.context.tx_unique);
        hasher.update(&self.context.timestamp.to_be_bytes());
        hasher.update(&nonce.to_be_bytes());
        hasher.update(b"scalar"); // Domain separator
        let digest = hasher.finalize();

        // First 8 digest bytes, big-endian.
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest.0[..8]);
        u64::from_be_bytes(bytes)
    }

    fn path_digest(&self, asset_tag: &[u8], counter: u64) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(&self.context.tx_unique);
        hasher.update(&self.context.timestamp.to_be_bytes());
        hasher.update(asset_tag);
        hasher.update(&counter.to_be_bytes());
        hasher.update(b"path"); // Domain separator
        hasher.finalize().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> DrawContext {
        DrawContext {
            tx_unique: [7u8; 32],
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn scalar_is_deterministic() {
        let a = TxEntropy::new(context());
        let b = TxEntropy::new(context());
        for nonce in 0..32 {
            assert_eq!(a.next_scalar(nonce), b.next_scalar(nonce));
        }
    }

    #[test]
    fn scalar_varies_with_each_input() {
        let base = TxEntropy::new(context());
        let reference = base.next_scalar(0);

        assert_ne!(reference, base.next_scalar(1));

        let mut shifted = context();
        shifted.timestamp += 1;
        assert_ne!(reference, TxEntropy::new(shifted).next_scalar(0));

        let mut other_tx = context();
        other_tx.tx_unique[0] ^= 0xff;
        assert_ne!(reference, TxEntropy::new(other_tx).next_scalar(0));
    }

    #[test]
    fn path_digest_is_deterministic_and_tagged() {
        let entropy = TxEntropy::new(context());
        let a = entropy.path_digest(&[0, 0, 0, 1], 5);
        let b = entropy.path_digest(&[0, 0, 0, 1], 5);
        assert_eq!(a, b);

        assert_ne!(a, entropy.path_digest(&[0, 0, 0, 2], 5));
        assert_ne!(a, entropy.path_digest(&[0, 0, 0, 1], 6));
    }

    #[test]
    fn scalar_and_path_domains_are_separated() {
        let entropy = TxEntropy::new(context());
        let digest = entropy.path_digest(&[], 3);

        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        assert_ne!(entropy.next_scalar(3), u64::from_be_bytes(bytes));
    }
}

//! Salted, iterated SHA-256 credential digests.
//!
//! Digests are self-describing: `sha256$<rounds>$<salt hex>$<digest hex>`.
//! Verification recomputes with the stored salt and rounds and compares in
//! constant time.

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::ports::{CredentialHasher, CredentialHasherError};

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;
const DEFAULT_ROUNDS: u32 = 10_000;

/// Credential hasher producing `sha256$` digests.
#[derive(Debug, Clone, Copy)]
pub struct Sha256CredentialHasher {
    rounds: u32,
}

impl Default for Sha256CredentialHasher {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl Sha256CredentialHasher {
    /// Hasher applying `rounds` iterations to new digests; zero is raised
    /// to one.
    #[must_use]
    pub fn with_rounds(rounds: u32) -> Self {
        Self {
            rounds: rounds.max(1),
        }
    }
}

fn derive(salt: &[u8], plaintext: &str, rounds: u32) -> [u8; 32] {
    let mut digest: [u8; 32] = Sha256::new()
        .chain_update(salt)
        .chain_update(plaintext.as_bytes())
        .finalize()
        .into();
    for _ in 1..rounds {
        digest = Sha256::new()
            .chain_update(digest)
            .chain_update(plaintext.as_bytes())
            .finalize()
            .into();
    }
    digest
}

struct StoredDigest {
    rounds: u32,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

fn parse(stored: &str) -> Option<StoredDigest> {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(rounds_text), Some(salt), Some(digest), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return None;
    };
    if scheme != SCHEME {
        return None;
    }
    let rounds = rounds_text.parse::<u32>().ok().filter(|value| *value > 0)?;
    Some(StoredDigest {
        rounds,
        salt: hex::decode(salt).ok()?,
        digest: hex::decode(digest).ok()?,
    })
}

impl CredentialHasher for Sha256CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialHasherError> {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng()
            .try_fill_bytes(&mut salt)
            .map_err(|err| CredentialHasherError::hashing(err.to_string()))?;
        let digest = derive(&salt, plaintext, self.rounds);
        Ok(format!(
            "{SCHEME}${}${}${}",
            self.rounds,
            hex::encode(salt),
            hex::encode(digest)
        ))
    }

    fn verify(&self, digest: &str, plaintext: &str) -> bool {
        let Some(stored) = parse(digest) else {
            return false;
        };
        let candidate = derive(&stored.salt, plaintext, stored.rounds);
        candidate.as_slice().ct_eq(stored.digest.as_slice()).into()
    }
}

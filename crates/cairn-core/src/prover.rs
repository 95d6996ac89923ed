//! Prover configuration and the proving capability
//!
//! [`ProverBuilder`] normalizes heterogeneous secret sources into a
//! [`SecretSet`]; [`Prover`] freezes that set and delegates proof
//! generation to an external [`ProofInterpreter`]. The interpreter is
//! the sigma-protocol engine itself and is not reimplemented here.

use std::sync::Arc;

use crate::error::Result;
use crate::group::{GroupElement, SecretExponent};
use crate::mnemonic::{Mnemonic, SecretString};
use crate::secret::{DhTupleSecret, DlogSecret, SecretEntry, SecretSet};
use crate::storage::SecretStorage;

/// A public statement a proof can be requested for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigmaStatement {
    /// Knowledge of x with `element = g^x`
    Dlog(GroupElement),
    /// Knowledge of x (or, symmetrically, y) for the tuple
    /// h = g^y, u = g^x, v = g^(xy)
    DhTuple {
        g: GroupElement,
        h: GroupElement,
        u: GroupElement,
        v: GroupElement,
    },
}

/// An opaque zero-knowledge proof produced by the interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigmaProof(Vec<u8>);

impl SigmaProof {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// The external sigma-protocol proving capability
///
/// Implementations compute the actual proof responses from the secrets
/// the prover owns. Failures surface as [`crate::ProverError::Proof`].
pub trait ProofInterpreter: Send + Sync {
    fn prove(
        &self,
        secrets: &SecretSet,
        statement: &SigmaStatement,
        message: &[u8],
    ) -> Result<SigmaProof>;
}

/// Accumulates secret sources and builds a [`Prover`]
///
/// Each `with_*` call appends to the pending secret list in call order.
/// Fallible calls fail fast and leave the builder usable; a failed call
/// appends nothing.
pub struct ProverBuilder {
    interpreter: Arc<dyn ProofInterpreter>,
    entries: Vec<SecretEntry>,
}

impl ProverBuilder {
    pub fn new(interpreter: Arc<dyn ProofInterpreter>) -> Self {
        Self {
            interpreter,
            entries: Vec::new(),
        }
    }

    /// Derive secrets from a seed phrase and password
    pub fn with_mnemonic_phrase(
        &mut self,
        phrase: SecretString,
        password: SecretString,
    ) -> Result<&mut Self> {
        let mnemonic = Mnemonic::new(phrase, password)?;
        self.with_mnemonic(&mnemonic)
    }

    /// Derive secrets from a pre-built mnemonic
    pub fn with_mnemonic(&mut self, mnemonic: &Mnemonic) -> Result<&mut Self> {
        let secrets = mnemonic.to_secrets()?;
        self.entries.extend(secrets);
        Ok(self)
    }

    /// Take the secrets held by unlocked storage
    ///
    /// The storage must already be unlocked; a locked handle fails with
    /// [`crate::ProverError::Decryption`].
    pub fn with_secret_storage(&mut self, storage: &SecretStorage) -> Result<&mut Self> {
        let secrets = storage.secrets()?;
        self.entries.extend_from_slice(secrets);
        Ok(self)
    }

    /// Append a Diffie-Hellman tuple secret
    ///
    /// The elements were validated against the curve when constructed;
    /// the algebraic relation between them is deliberately not checked
    /// here and is the interpreter's concern at proof time.
    pub fn with_dht_data(
        &mut self,
        g: GroupElement,
        h: GroupElement,
        u: GroupElement,
        v: GroupElement,
        x: SecretExponent,
    ) -> &mut Self {
        self.entries
            .push(SecretEntry::DhTuple(DhTupleSecret::new(g, h, u, v, x)));
        self
    }

    /// Append a raw discrete-log secret
    pub fn with_dlog_secret(&mut self, x: SecretExponent) -> &mut Self {
        self.entries.push(SecretEntry::Dlog(DlogSecret::new(x)));
        self
    }

    /// Freeze the accumulated secrets into a new prover
    ///
    /// Does not consume the configuration: building twice yields two
    /// provers with equal, independently owned secret sets.
    pub fn build(&self) -> Prover {
        let mut secrets = SecretSet::new();
        for entry in &self.entries {
            secrets.push(entry.clone());
        }
        Prover {
            secrets,
            interpreter: Arc::clone(&self.interpreter),
        }
    }
}

/// Proving capability over a frozen secret set
///
/// The secret set is immutable for the prover's lifetime, so a prover
/// may be shared for concurrent read-only proof requests.
pub struct Prover {
    secrets: SecretSet,
    interpreter: Arc<dyn ProofInterpreter>,
}

impl Prover {
    /// Generate a proof for the statement, bound to the given message
    pub fn prove(&self, statement: &SigmaStatement, message: &[u8]) -> Result<SigmaProof> {
        self.interpreter.prove(&self.secrets, statement, message)
    }

    /// The frozen secret set this prover owns
    pub fn secrets(&self) -> &SecretSet {
        &self.secrets
    }
}

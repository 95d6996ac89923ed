//! Cairn Core - Secret model, group algebra, and prover construction
//!
//! This crate normalizes heterogeneous secret sources (seed phrases,
//! encrypted storage, raw exponents, Diffie-Hellman tuples) into a
//! frozen secret set and wraps it in a prover capability that delegates
//! proof generation to an external sigma-protocol interpreter.

pub mod error;
pub mod group;
pub mod mnemonic;
pub mod prover;
pub mod secret;
pub mod storage;

pub use error::{ProverError, Result};
pub use group::{GroupElement, SecretExponent, GROUP_ELEMENT_SIZE, SECRET_EXPONENT_SIZE};
pub use mnemonic::{Mnemonic, SecretString, MNEMONIC_WORD_COUNTS};
pub use prover::{ProofInterpreter, Prover, ProverBuilder, SigmaProof, SigmaStatement};
pub use secret::{DhTupleSecret, DlogSecret, SecretEntry, SecretSet};
pub use storage::SecretStorage;

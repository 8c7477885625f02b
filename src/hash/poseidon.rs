use std::{cell::RefCell, thread::LocalKey};

use ark_bn254::Fr;
pub use light_poseidon::PoseidonError;
use light_poseidon::{Poseidon, PoseidonHasher};

use super::MerkleHasher;

// POSEIDON OVER BN254
// ================================================================================================

thread_local! {
    static POSEIDON_1: RefCell<Poseidon<Fr>> = RefCell::new(circom_hasher(1));
    static POSEIDON_2: RefCell<Poseidon<Fr>> = RefCell::new(circom_hasher(2));
}

/// Maximum number of inputs accepted by [Poseidon254::hash_elements].
pub const POSEIDON_MAX_INPUTS: usize = 12;

/// Poseidon over the BN254 scalar field, using the circom parameter set.
///
/// Digests are compatible with circomlib's `Poseidon(n)` template, so roots and paths produced
/// with this hasher can be checked inside circom circuits and by other circom-compatible
/// implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Poseidon254;

impl Poseidon254 {
    /// Hashes up to [POSEIDON_MAX_INPUTS] field elements with the circom parameters for that many
    /// inputs.
    ///
    /// # Errors
    /// Returns an error if `inputs` is empty or holds more than [POSEIDON_MAX_INPUTS] elements.
    pub fn hash_elements(inputs: &[Fr]) -> Result<Fr, PoseidonError> {
        match inputs.len() {
            0 => Err(PoseidonError::EmptyInput),
            1 => Ok(hash_with(&POSEIDON_1, inputs)),
            2 => Ok(hash_with(&POSEIDON_2, inputs)),
            n => Poseidon::<Fr>::new_circom(n)?.hash(inputs),
        }
    }
}

impl MerkleHasher for Poseidon254 {
    type Digest = Fr;

    fn compress(left: Fr, right: Fr) -> Fr {
        hash_with(&POSEIDON_2, &[left, right])
    }

    fn embed(value: u64) -> Fr {
        Fr::from(value)
    }

    fn hash_element(value: u64) -> Fr {
        hash_with(&POSEIDON_1, &[Fr::from(value)])
    }
}

// HELPERS
// ================================================================================================

fn circom_hasher(nr_inputs: usize) -> Poseidon<Fr> {
    Poseidon::<Fr>::new_circom(nr_inputs).expect("circom parameters exist for 1 and 2 inputs")
}

/// Hashes `inputs` with a cached hasher whose width matches `inputs.len()`.
fn hash_with(hasher: &'static LocalKey<RefCell<Poseidon<Fr>>>, inputs: &[Fr]) -> Fr {
    hasher.with_borrow_mut(|hasher| {
        hasher.hash(inputs).expect("input count matches the hasher width")
    })
}

// TESTS
// ================================================================================================

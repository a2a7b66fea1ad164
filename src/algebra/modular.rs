//! Prime fields Z/pZ.

use std::cmp::Ordering;
use std::sync::Arc;

use super::field::{Field, OrderedField};
use crate::error::{Error, Result};

/// Largest modulus whose inverses are tabulated at construction. Larger primes
/// are accepted and invert by exponentiation on demand.
pub const INVERSE_TABLE_LIMIT: u32 = 1 << 16;

/// The field of integers modulo a prime `p`, with canonical residues in `[0, p)`.
///
/// Any prime representable as `u32` is accepted; products of two residues are
/// taken in `u64`. For `p <= INVERSE_TABLE_LIMIT` inverses are tabulated once,
/// so `invert` and `divide` are table lookups during reduction.
#[derive(Debug, Clone)]
pub struct ModularField {
    modulus: u32,
    inverses: Arc<[u32]>,
}

impl ModularField {
    /// Creates Z/pZ. Rejects `p` that is not prime.
    pub fn new(p: u32) -> Result<Self> {
        if !is_prime(p) {
            return Err(Error::InvalidCharacteristic(u64::from(p)));
        }

        let inverses = if p <= INVERSE_TABLE_LIMIT {
            let mut table = vec![0u32; p as usize];
            for a in 1..p {
                if table[a as usize] != 0 {
                    continue;
                }
                // a^(p-2) by Fermat
                let inv = pow_mod(a, p - 2, p);
                table[a as usize] = inv;
                table[inv as usize] = a;
            }
            table
        } else {
            Vec::new()
        };

        Ok(Self {
            modulus: p,
            inverses: inverses.into(),
        })
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    fn reduce(&self, n: i64) -> u32 {
        n.rem_euclid(i64::from(self.modulus)) as u32
    }
}

impl Field for ModularField {
    type Element = u32;

    fn zero(&self) -> u32 {
        0
    }

    fn one(&self) -> u32 {
        1 % self.modulus
    }

    fn add(&self, a: &u32, b: &u32) -> u32 {
        ((u64::from(*a) + u64::from(*b)) % u64::from(self.modulus)) as u32
    }

    fn negate(&self, a: &u32) -> u32 {
        if *a == 0 {
            0
        } else {
            self.modulus - a % self.modulus
        }
    }

    fn multiply(&self, a: &u32, b: &u32) -> u32 {
        ((u64::from(*a) * u64::from(*b)) % u64::from(self.modulus)) as u32
    }

    fn invert(&self, a: &u32) -> Result<u32> {
        let a = a % self.modulus;
        if a == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(match self.inverses.get(a as usize) {
            Some(&inv) => inv,
            None => pow_mod(a, self.modulus - 2, self.modulus),
        })
    }

    fn value_of(&self, n: i64) -> u32 {
        self.reduce(n)
    }

    fn characteristic(&self) -> u64 {
        u64::from(self.modulus)
    }
}

impl OrderedField for ModularField {
    fn compare(&self, a: &u32, b: &u32) -> Ordering {
        (a % self.modulus).cmp(&(b % self.modulus))
    }
}

fn pow_mod(base: u32, mut exp: u32, modulus: u32) -> u32 {
    let m = u64::from(modulus);
    let mut base = u64::from(base) % m;
    let mut acc = 1u64 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    acc as u32
}

fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let n = u64::from(n);
    let mut d = 2u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

use super::*;
use num_bigint::RandBigInt;

/// The integers mod a prime `p`. Each element is stored as a [`BigUint`] in
/// `[0, p)`.
///
/// Primality is not checked. With a composite modulus everything still works
/// except that some non-zero elements have no inverse, which the solver
/// reports as a singular pivot.
#[derive(Clone, PartialEq, Eq)]
pub struct PrimeField {
    p: BigUint,
}

impl PrimeField {
    /// Create a new field.
    ///
    /// Panics if the modulus is smaller than 2.
    pub fn new(p: BigUint) -> Self {
        assert!(p > One::one(), "modulus must be greater than 1");
        Self { p }
    }

    /// Returns the modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Returns a uniformly random element.
    pub fn random<R: rand::Rng>(&self, rng: &mut R) -> BigUint {
        rng.random_biguint_below(&self.p)
    }
}

impl Ring for PrimeField {
    type Element = BigUint;

    fn neg_assign(&self, e: &mut Self::Element) {
        neg_assign_mod(e, &self.p);
    }

    fn add_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l += r;
        reduce_simple(l, &self.p);
    }

    fn sub_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        if r > l {
            *l += &self.p;
        }
        *l -= r
    }

    fn mul_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l *= r;
        *l %= &self.p;
    }

    fn is_unit(&self, e: &Self::Element) -> bool {
        use num_integer::Integer as _;
        RingElement::is_one(&e.gcd(&self.p))
    }

    fn inverse(&self, e: &Self::Element) -> Option<Self::Element> {
        e.modinv(&self.p)
    }

    fn element_from_biguint(&self, n: &BigUint) -> Self::Element {
        n % &self.p
    }
}

impl std::fmt::Debug for PrimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrimeField({})", self.p)
    }
}

#[cfg(test)]
mod test_prime_field {
    use rand::{SeedableRng, rngs::StdRng};

    use super::{test::*, *};

    fn mersenne_61() -> PrimeField {
        PrimeField::new((BigUint::from(1u8) << 61u32) - 1u8)
    }

    #[test]
    fn inverse_mod_p() {
        let rng = &mut StdRng::seed_from_u64(0);
        let f = mersenne_61();
        let elements: Vec<_> = (0..100).map(|_| f.random(rng)).collect();
        test_inverse(&f, elements.into_iter());
        assert_eq!(f.inverse(&BigUint::from(0u8)), None);
    }

    #[test]
    fn arithmetic_stays_in_range() {
        let f = PrimeField::new(97u32.into());
        assert_eq!(f.sub(3u32.into(), &5u32.into()), BigUint::from(95u32));
        assert_eq!(f.add(90u32.into(), &10u32.into()), BigUint::from(3u32));
        assert_eq!(f.neg(BigUint::from(0u32)), BigUint::from(0u32));
        assert_eq!(f.neg(BigUint::from(1u32)), BigUint::from(96u32));
        assert_eq!(f.element_from_i64(-1), BigUint::from(96u32));
        assert_eq!(f.mul(50u32.into(), &2u32.into()), BigUint::from(3u32));
    }

    #[test]
    #[should_panic]
    fn modulus_one_is_rejected() {
        PrimeField::new(1u32.into());
    }
}

use super::*;

/// The rationals. LLL can keep its Gram-Schmidt data in here, which makes
/// the reduction exact but slow for large entries.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Q;

impl Ring for Q {
    type Element = BigRational;

    fn neg_assign(&self, e: &mut Self::Element) {
        neg_assign(e)
    }

    fn add_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l += r;
    }

    fn sub_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l -= r;
    }

    fn mul_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l *= r;
    }

    fn is_unit(&self, e: &Self::Element) -> bool {
        !RingElement::is_zero(e.numer())
    }

    fn inverse(&self, e: &Self::Element) -> Option<Self::Element> {
        self.is_unit(e).then(|| e.recip())
    }

    fn element_from_biguint(&self, n: &BigUint) -> Self::Element {
        BigInt::from(n.clone()).into()
    }

    fn element_from_bigint(&self, n: &BigInt) -> Self::Element {
        BigRational::from_integer(n.clone())
    }
}

impl Field for Q {
    fn div_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l /= r;
    }
}

impl Q {
    /// Rounds to the nearest integer, half away from zero.
    pub fn round_to_integer(e: &BigRational) -> BigInt {
        e.round().to_integer()
    }
}

#[cfg(test)]
mod test_rationals {
    use super::*;

    #[test]
    fn rounding_is_half_away_from_zero() {
        let half = BigRational::new(1.into(), 2.into());
        assert_eq!(Q::round_to_integer(&half), BigInt::from(1));
        assert_eq!(Q::round_to_integer(&-half), BigInt::from(-1));
        let r = BigRational::new(7.into(), 3.into());
        assert_eq!(Q::round_to_integer(&r), BigInt::from(2));
    }

    #[test]
    fn division() {
        let a = Q.element_from_i64(3);
        let b = Q.element_from_i64(4);
        assert_eq!(Q.div(a, &b), BigRational::new(3.into(), 4.into()));
    }
}

use super::*;

/// The integers. Lattice bases and recovered errors live here.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Z;

impl Ring for Z {
    type Element = BigInt;

    fn neg_assign(&self, e: &mut Self::Element) {
        neg_assign(e);
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
        RingElement::is_one(e.magnitude())
    }

    fn inverse(&self, e: &Self::Element) -> Option<Self::Element> {
        self.is_unit(e).then(|| e.clone())
    }

    fn element_from_biguint(&self, n: &BigUint) -> Self::Element {
        n.clone().into()
    }

    fn element_from_bigint(&self, n: &BigInt) -> Self::Element {
        n.clone()
    }
}

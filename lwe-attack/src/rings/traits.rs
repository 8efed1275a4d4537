use num_bigint::{BigInt, BigUint, Sign};

/// An element of a ring.
/// This exists mostly for convenience, so we can call `e.is_zero` on ring
/// elements, but this should really all be implemented on the `Ring` itself,
/// so we'd have to call `r.is_zero(e)`.
pub trait RingElement: 'static + Clone + PartialEq + std::fmt::Debug + std::fmt::Display {
    /// Returns the "zero" element of the ring.
    fn zero() -> Self;

    /// Is the given element "zero"?
    fn is_zero(&self) -> bool;

    /// Returns the "one" element of the ring.
    /// Mod 1 this would be 0, which is why [`crate::rings::PrimeField`]
    /// refuses moduli smaller than 2.
    fn one() -> Self;

    /// Is the given element "one"?
    fn is_one(&self) -> bool;
}

macro_rules! impl_ring_element {
    ($t:ident) => {
        impl RingElement for $t {
            fn zero() -> Self {
                Zero::zero()
            }

            fn is_zero(&self) -> bool {
                Zero::is_zero(self)
            }

            fn one() -> Self {
                One::one()
            }

            fn is_one(&self) -> bool {
                One::is_one(self)
            }
        }
    };
}

pub(crate) use impl_ring_element;

/// A ring.
///
/// `Clone` is here for convenience. All implementations have cheap clones,
/// and it lets us derive `Clone` for the vectors and matrices.
pub trait Ring: 'static + Clone + PartialEq + Eq + std::fmt::Debug {
    /// The type of the elements of the ring.
    type Element: RingElement;

    /// Returns the "zero" element of the ring.
    fn zero() -> Self::Element {
        Self::Element::zero()
    }

    /// Returns the "one" element of the ring.
    fn one() -> Self::Element {
        Self::Element::one()
    }

    /// Negates the element in place.
    fn neg_assign(&self, e: &mut Self::Element);

    /// Negates the element, i.e. computes `0 - e`.
    fn neg(&self, mut e: Self::Element) -> Self::Element {
        self.neg_assign(&mut e);
        e
    }

    /// Add an element to another element.
    fn add_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Add two elements.
    fn add(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.add_assign(&mut l, r);
        l
    }

    /// Subtract one element from another.
    fn sub_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Subtract one element from another.
    fn sub(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.sub_assign(&mut l, r);
        l
    }

    /// Multiply two elements.
    fn mul_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Multiply two elements.
    fn mul(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.mul_assign(&mut l, r);
        l
    }

    /// Multiply two elements and add the result to another element.
    ///
    /// The default implementation allocates a new element for the product.
    fn mul_add_assign(
        &self,
        acc: &mut Self::Element,
        a: &Self::Element,
        b: &Self::Element,
    ) {
        self.add_assign(acc, &self.mul(a.clone(), b))
    }

    /// [`Ring::mul_add_assign`] but with [`Ring::sub`].
    fn mul_sub_assign(
        &self,
        acc: &mut Self::Element,
        a: &Self::Element,
        b: &Self::Element,
    ) {
        self.sub_assign(acc, &self.mul(a.clone(), b));
    }

    /// Square a number.
    fn square(&self, a: Self::Element) -> Self::Element {
        self.mul(a.clone(), &a)
    }

    /// Check if an element is a unit.
    /// This can be faster than trying to compute the inverse, so if
    /// you don't need the inverse, you should call this.
    fn is_unit(&self, e: &Self::Element) -> bool;

    /// Compute the multiplicative inverse of an element if it is a unit.
    fn inverse(&self, e: &Self::Element) -> Option<Self::Element>;

    /// Converts the [`BigUint`] `n` into an element.
    /// The element is the result of adding `1` `n`-times to itself.
    fn element_from_biguint(&self, n: &BigUint) -> Self::Element;

    /// Converts the [`BigInt`] `n` into an element.
    ///
    /// - If `n` is non-negative, this is the result of adding `1` `n`-times to
    ///   itself.
    ///
    /// - If `n` is negative, this is the result of adding `-1` `-n`-times to
    ///   itself.
    fn element_from_bigint(&self, n: &BigInt) -> Self::Element {
        match n.sign() {
            Sign::NoSign => Self::zero(),
            Sign::Plus => self.element_from_biguint(n.magnitude()),
            Sign::Minus => self.neg(self.element_from_biguint(n.magnitude())),
        }
    }

    /// Converts an `i64` into an element. Handy for writing down small
    /// matrices in tests.
    fn element_from_i64(&self, n: i64) -> Self::Element {
        self.element_from_bigint(&BigInt::from(n))
    }
}

/// A field.
pub trait Field: Ring {
    /// Divide an element by another element.
    fn div_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Divide an element by another element.
    fn div(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.div_assign(&mut l, r);
        l
    }
}

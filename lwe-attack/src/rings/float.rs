use num_traits::ToPrimitive as _;

use super::*;

/// A floating point number with an `f64` mantissa and a separate `i64`
/// exponent, i.e. `mantissa * 2^exponent`.
///
/// It has the precision of an `f64` but (practically) no limit on the
/// magnitude, so it can approximate the squared norms of vectors with
/// entries of thousands of bits.
///
/// The mantissa is either zero (and then the exponent is zero) or its
/// absolute value is in `[1/2, 1)`. Equal values therefore have equal
/// representations.
#[derive(Clone, Copy, PartialEq)]
pub struct ExpFloat {
    mantissa: f64,
    exponent: i64,
}

impl ExpFloat {
    pub const ZERO: Self = Self { mantissa: 0., exponent: 0 };

    /// Returns `m * 2^e`. `m` has to be finite.
    pub fn new(m: f64, e: i64) -> Self {
        if m == 0. {
            return Self::ZERO;
        }
        debug_assert!(m.is_finite(), "mantissa must be finite");

        let bits = m.to_bits();
        let biased = ((bits >> 52) & 0x7ff) as i64;
        if biased == 0 {
            // Subnormal.
            return Self::new(m * pow2(64), e - 64);
        }

        // Replace the exponent bits so that the mantissa lands in [1/2, 1).
        let mantissa = f64::from_bits((bits & !(0x7ff << 52)) | (1022 << 52));
        Self { mantissa, exponent: e + biased - 1022 }
    }

    /// Approximates an integer.
    pub fn from_bigint(n: &BigInt) -> Self {
        let shift = (n.bits() as i64 - 64).max(0);
        let top = n >> shift as usize;
        top.to_f64().map_or(Self::ZERO, |m| Self::new(m, shift))
    }

    /// Approximates a fraction.
    pub fn from_rational(q: &BigRational) -> Self {
        Self::from_bigint(q.numer()).div(Self::from_bigint(q.denom()))
    }

    /// The nearest integer, rounding half away from zero.
    pub fn round(self) -> BigInt {
        if self.exponent <= 0 {
            // |self| < 1
            return if self.exponent == 0 && self.mantissa != 0. {
                BigInt::from(self.mantissa.signum() as i64)
            } else {
                BigInt::from(0)
            };
        }

        if self.exponent <= 53 {
            return BigInt::from((self.mantissa * pow2(self.exponent)).round() as i64);
        }

        // Already an integer. The mantissa has 53 significant bits.
        let m = (self.mantissa * pow2(53)) as i64;
        BigInt::from(m) << (self.exponent - 53) as usize
    }

    pub fn abs(self) -> Self {
        Self { mantissa: self.mantissa.abs(), exponent: self.exponent }
    }

    pub fn is_negative(self) -> bool {
        self.mantissa < 0.
    }

    pub fn add(self, rhs: Self) -> Self {
        if self.mantissa == 0. {
            return rhs;
        }
        if rhs.mantissa == 0. {
            return self;
        }

        let (big, small) = if self.exponent >= rhs.exponent {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let d = big.exponent - small.exponent;
        if d > 64 {
            return big;
        }

        Self::new(big.mantissa + small.mantissa * pow2(-d), big.exponent)
    }

    pub fn neg(self) -> Self {
        Self { mantissa: -self.mantissa, exponent: self.exponent }
    }

    pub fn sub(self, rhs: Self) -> Self {
        self.add(rhs.neg())
    }

    pub fn mul(self, rhs: Self) -> Self {
        Self::new(self.mantissa * rhs.mantissa, self.exponent + rhs.exponent)
    }

    /// Panics if `rhs` is zero.
    pub fn div(self, rhs: Self) -> Self {
        assert!(rhs.mantissa != 0., "division by zero");
        Self::new(self.mantissa / rhs.mantissa, self.exponent - rhs.exponent)
    }

    pub fn is_lt(self, rhs: Self) -> bool {
        self.sub(rhs).is_negative()
    }
}

/// `2^e` for small `e`.
fn pow2(e: i64) -> f64 {
    2f64.powi(e as i32)
}

impl RingElement for ExpFloat {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.mantissa == 0.
    }

    fn one() -> Self {
        Self::new(1., 0)
    }

    fn is_one(&self) -> bool {
        *self == Self::one()
    }
}

impl std::fmt::Display for ExpFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if (-1000..1000).contains(&self.exponent) {
            write!(f, "{}", self.mantissa * 2f64.powi(self.exponent as i32))
        } else {
            write!(f, "{}*2^{}", self.mantissa, self.exponent)
        }
    }
}

impl std::fmt::Debug for ExpFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// Floating point numbers aren't actually a field: addition and
/// multiplication are not associative and there is rounding everywhere.
/// But we act like it so we can store them in vectors and matrices.
/// LLL uses this for the approximate Gram-Schmidt data.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Float;

impl Ring for Float {
    type Element = ExpFloat;

    fn neg_assign(&self, e: &mut Self::Element) {
        *e = e.neg();
    }

    fn add_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l = l.add(*r);
    }

    fn sub_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l = l.sub(*r);
    }

    fn mul_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l = l.mul(*r);
    }

    fn is_unit(&self, e: &Self::Element) -> bool {
        !RingElement::is_zero(e)
    }

    fn inverse(&self, e: &Self::Element) -> Option<Self::Element> {
        self.is_unit(e).then(|| ExpFloat::one().div(*e))
    }

    fn element_from_biguint(&self, n: &BigUint) -> Self::Element {
        ExpFloat::from_bigint(&BigInt::from(n.clone()))
    }

    fn element_from_bigint(&self, n: &BigInt) -> Self::Element {
        ExpFloat::from_bigint(n)
    }
}

impl Field for Float {
    fn div_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l = l.div(*r);
    }
}

#[cfg(test)]
mod test_float {
    use super::*;

    fn f(x: f64) -> ExpFloat {
        ExpFloat::new(x, 0)
    }

    #[test]
    fn normalized_representation() {
        assert_eq!(f(1.5), ExpFloat::new(0.75, 1));
        assert_eq!(f(-3.), ExpFloat::new(-0.375, 3));
        assert_eq!(f(0.), ExpFloat::ZERO);
        assert_eq!(ExpFloat::new(5e-320, 0), ExpFloat::new(5e-320 * 2f64.powi(64), -64));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(f(1.5).add(f(2.25)), f(3.75));
        assert_eq!(f(1.5).sub(f(2.25)), f(-0.75));
        assert_eq!(f(1.5).mul(f(-4.)), f(-6.));
        assert_eq!(f(1.).div(f(8.)), f(0.125));
        assert_eq!(f(2.).sub(f(2.)), ExpFloat::ZERO);
        assert!(f(-1.).is_lt(f(0.5)));
        assert!(!f(3.).is_lt(f(3.)));

        // Far below the precision.
        let big = ExpFloat::new(0.5, 200);
        assert_eq!(big.add(f(1.)), big);
    }

    #[test]
    fn rounding() {
        assert_eq!(f(0.5).round(), BigInt::from(1));
        assert_eq!(f(-0.5).round(), BigInt::from(-1));
        assert_eq!(f(0.49).round(), BigInt::from(0));
        assert_eq!(f(2.5).round(), BigInt::from(3));
        assert_eq!(f(-7.4).round(), BigInt::from(-7));
        assert_eq!(ExpFloat::ZERO.round(), BigInt::from(0));
    }

    #[test]
    fn huge_integers() {
        let n = (BigInt::from(3) << 2000usize) + 12345;
        let x = ExpFloat::from_bigint(&n);
        assert_eq!(x, ExpFloat::new(0.75, 2002));
        assert_eq!(x.round(), BigInt::from(3) << 2000usize);

        let neg = ExpFloat::from_bigint(&-(BigInt::from(1) << 700usize));
        assert_eq!(neg, ExpFloat::new(-0.5, 701));
        assert_eq!(neg.round(), -(BigInt::from(1) << 700usize));
        assert_eq!(x.mul(neg).div(neg), x);
    }

    #[test]
    fn rationals() {
        let q = BigRational::new(1.into(), 3.into());
        assert_eq!(ExpFloat::from_rational(&q), f(1. / 3.));
    }
}

//! Registry of standard curves.
//!
//! Parameters are kept as immutable hex literals and parsed on demand, so
//! instantiating a curve never touches shared state.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use ellcurve_field::{BigInt, BigUint, Coeff, Field, Fp, Fp2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{CurveError, EllCurve, Group, Model, Point};

/// Identifier of a registered curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveId {
    Secp256k1,
    /// NIST P-256
    Secp256r1,
    /// The STARK curve used by Starknet.
    Starknet,
    Ed25519,
    /// The twisted Edwards curve over the BLS12-381 scalar field.
    Jubjub,
    /// Twisted Edwards curve over `GF((2^127 - 1)^2)`.
    FourQ,
}

/// A literal coefficient or coordinate; `Pair` only for degree-2 fields.
enum Literal {
    Int(&'static str),
    Pair(&'static str, &'static str),
}

struct Params {
    model: Model,
    p: &'static str,
    degree: usize,
    a: Literal,
    b: Literal,
    r: &'static str,
    h: u32,
    x: Literal,
    y: Literal,
}

static SECP256K1: Params = Params {
    model: Model::Weierstrass,
    p: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
    degree: 1,
    a: Literal::Int("0"),
    b: Literal::Int("7"),
    r: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
    h: 1,
    x: Literal::Int("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
    y: Literal::Int("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"),
};

static SECP256R1: Params = Params {
    model: Model::Weierstrass,
    p: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    degree: 1,
    a: Literal::Int("-3"),
    b: Literal::Int("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
    r: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
    h: 1,
    x: Literal::Int("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
    y: Literal::Int("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
};

static STARKNET: Params = Params {
    model: Model::Weierstrass,
    p: "0800000000000011000000000000000000000000000000000000000000000001",
    degree: 1,
    a: Literal::Int("1"),
    b: Literal::Int("06f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89"),
    r: "0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f",
    h: 1,
    x: Literal::Int("01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca"),
    y: Literal::Int("005668060aa49730b7be4801df46ec62de53ecd11abe43a32873000c36e8dc1f"),
};

static ED25519: Params = Params {
    model: Model::TwistedEdwards,
    p: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
    degree: 1,
    a: Literal::Int("-1"),
    b: Literal::Int("52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3"),
    r: "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed",
    h: 8,
    x: Literal::Int("216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a"),
    y: Literal::Int("6666666666666666666666666666666666666666666666666666666666666658"),
};

static JUBJUB: Params = Params {
    model: Model::TwistedEdwards,
    p: "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
    degree: 1,
    a: Literal::Int("-1"),
    b: Literal::Int("2a9318e74bfa2b48f5fd9207e6bd7fd4292d7f6d37579d2601065fd6d6343eb1"),
    r: "0e7db4ea6533afa906673b0101343b00a6682093ccc81082d0970e5ed6f72cb7",
    h: 8,
    x: Literal::Int("11dafe5d23e1218086a365b99fbf3d3be72f6afd7d1f72623e6b071492d1122b"),
    y: Literal::Int("1d523cf1ddab1a1793132e78c866c0c33e26ba5cc220fed7cc3f870e59d292aa"),
};

static FOURQ: Params = Params {
    model: Model::TwistedEdwards,
    p: "7fffffffffffffffffffffffffffffff",
    degree: 2,
    a: Literal::Pair("-1", "0"),
    b: Literal::Pair("e40000000000000142", "5e472f846657e0fcb3821488f1fc0c8d"),
    r: "0029cbc14e5e0a72f05397829cbc14e5dfbd004dfe0f79992fb2540ec7768ce7",
    h: 392,
    x: Literal::Pair("1A3472237C2FB305286592AD7B3833AA", "1E1F553F2878AA9C96869FB360AC77F6"),
    y: Literal::Pair("0E3FEE9BA120785AB924A2462BCBB287", "6E1C4AF8630E024249A7C344844C8B5C"),
};

impl CurveId {
    pub const ALL: [CurveId; 6] = [
        CurveId::Secp256k1,
        CurveId::Secp256r1,
        CurveId::Starknet,
        CurveId::Ed25519,
        CurveId::Jubjub,
        CurveId::FourQ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CurveId::Secp256k1 => "secp256k1",
            CurveId::Secp256r1 => "secp256r1",
            CurveId::Starknet => "starknet",
            CurveId::Ed25519 => "ed25519",
            CurveId::Jubjub => "jubjub",
            CurveId::FourQ => "fourQ",
        }
    }

    fn params(self) -> &'static Params {
        match self {
            CurveId::Secp256k1 => &SECP256K1,
            CurveId::Secp256r1 => &SECP256R1,
            CurveId::Starknet => &STARKNET,
            CurveId::Ed25519 => &ED25519,
            CurveId::Jubjub => &JUBJUB,
            CurveId::FourQ => &FOURQ,
        }
    }

    pub fn model(self) -> Model {
        self.params().model
    }

    /// Degree of the field the curve is defined over.
    pub fn degree(self) -> usize {
        self.params().degree
    }

    /// Instantiates the field, the curve and its generator.
    pub fn instantiate(self) -> Result<StdCurve, CurveError> {
        let params = self.params();
        let p = uint(params.p)?;
        let curve = match params.degree {
            1 => StdCurve::Prime(build(self, params, Fp::new(self.name(), p)?)?),
            _ => StdCurve::Quadratic(build(self, params, Fp2::new(self.name(), p)?)?),
        };
        debug!(
            curve = self.name(),
            model = %params.model,
            degree = params.degree,
            "instantiated standard curve"
        );
        Ok(curve)
    }

    /// Instantiates a curve defined over a prime field.
    pub fn prime(self) -> Result<Standard<Fp>, CurveError> {
        self.instantiate()?.into_prime()
    }

    /// Instantiates a curve defined over a quadratic extension.
    pub fn quadratic(self) -> Result<Standard<Fp2>, CurveError> {
        self.instantiate()?.into_quadratic()
    }
}

impl Display for CurveId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveId {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurveId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                warn!(curve = s, "unsupported curve requested");
                CurveError::UnsupportedCurve(s.to_string())
            })
    }
}

/// Looks up a curve by name and instantiates it.
pub fn new_curve(name: &str) -> Result<StdCurve, CurveError> {
    name.parse::<CurveId>()?.instantiate()
}

/// A registered curve together with its generator.
#[derive(Clone, Debug)]
pub struct Standard<F: Field> {
    id: CurveId,
    curve: EllCurve<F>,
    generator: Point<F::Elt>,
}

impl<F: Field> Standard<F> {
    pub fn id(&self) -> CurveId {
        self.id
    }

    pub fn curve(&self) -> &EllCurve<F> {
        &self.curve
    }

    pub fn generator(&self) -> &Point<F::Elt> {
        &self.generator
    }

    pub fn into_parts(self) -> (EllCurve<F>, Point<F::Elt>) {
        (self.curve, self.generator)
    }
}

/// A standard curve, typed by the degree of its field.
#[derive(Clone, Debug)]
pub enum StdCurve {
    Prime(Standard<Fp>),
    Quadratic(Standard<Fp2>),
}

impl StdCurve {
    pub fn id(&self) -> CurveId {
        match self {
            StdCurve::Prime(c) => c.id(),
            StdCurve::Quadratic(c) => c.id(),
        }
    }

    pub fn into_prime(self) -> Result<Standard<Fp>, CurveError> {
        match self {
            StdCurve::Prime(c) => Ok(c),
            StdCurve::Quadratic(c) => Err(CurveError::MismatchedCurves(format!(
                "{} is defined over a quadratic extension",
                c.id()
            ))),
        }
    }

    pub fn into_quadratic(self) -> Result<Standard<Fp2>, CurveError> {
        match self {
            StdCurve::Quadratic(c) => Ok(c),
            StdCurve::Prime(c) => Err(CurveError::MismatchedCurves(format!(
                "{} is defined over a prime field",
                c.id()
            ))),
        }
    }
}

fn int(s: &'static str) -> Result<BigInt, CurveError> {
    BigInt::parse_bytes(s.as_bytes(), 16).ok_or(CurveError::Parameter(s))
}

fn uint(s: &'static str) -> Result<BigUint, CurveError> {
    BigUint::parse_bytes(s.as_bytes(), 16).ok_or(CurveError::Parameter(s))
}

fn coeff(l: &Literal) -> Result<Coeff, CurveError> {
    Ok(match *l {
        Literal::Int(v) => Coeff::Scalar(int(v)?),
        Literal::Pair(re, im) => Coeff::Pair(int(re)?, int(im)?),
    })
}

fn build<F: Field>(id: CurveId, params: &Params, field: F) -> Result<Standard<F>, CurveError> {
    let a = field.elt(&coeff(&params.a)?)?;
    let b = field.elt(&coeff(&params.b)?)?;
    let x = field.elt(&coeff(&params.x)?)?;
    let y = field.elt(&coeff(&params.y)?)?;

    let curve = params
        .model
        .curve(id.name(), field, a, b, uint(params.r)?, BigUint::from(params.h));
    let generator = curve.new_point(x, y);
    if !curve.is_valid() || !curve.is_on_curve(&generator) {
        return Err(CurveError::InvalidCurve(id.name().to_string()));
    }

    Ok(Standard {
        id,
        curve,
        generator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ellcurve_field::{from_hex, to_hex};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::RandomPoint;

    /// `[0x1000]G`, then `[0x1000]` of that point decoded from its hex form.
    fn check_golden<F: Field>(std: &Standard<F>, first: [&str; 2], second: [&str; 2]) {
        let c = std.curve();
        let f = c.field();
        let k = BigInt::from(0x1000);

        let p = c.scalar_mult(std.generator(), &k);
        let (x, y) = p.coordinates().unwrap();
        let (px, py) = (to_hex(f, x), to_hex(f, y));
        assert_eq!([px.as_str(), py.as_str()], first, "{}", std.id());

        let decoded = c.new_point(from_hex(f, &px).unwrap(), from_hex(f, &py).unwrap());
        assert!(c.is_on_curve(&decoded));
        assert_eq!(decoded, p);

        let q = c.scalar_mult(&decoded, &k);
        let (x, y) = q.coordinates().unwrap();
        assert_eq!([to_hex(f, x), to_hex(f, y)], second, "{}", std.id());
    }

    #[test]
    fn test_golden_secp256k1() {
        check_golden(
            &CurveId::Secp256k1.prime().unwrap(),
            [
                "175e159f728b865a72f99cc6c6fc846de0b93833fd2222ed73fce5b551e5b739",
                "d3506e0d9e3c79eba4ef97a51ff71f5eacb5955add24345c6efa6ffee9fed695",
            ],
            [
                "723cbaa6e5db996d6bf771c00bd548c7b700dbffa6c0e77bcb6115925232fcda",
                "96e867b5595cc498a921137488824d6e2660a0653779494801dc069d9eb39f5f",
            ],
        );
    }

    #[test]
    fn test_golden_secp256r1() {
        check_golden(
            &CurveId::Secp256r1.prime().unwrap(),
            [
                "e716aed2cf069e4d997789672e6d6bd2508676f2f4fd0a64f077e8daa245573f",
                "353663e694fc72ab5912b06687b9a851d13d0df2fa07c9b3505fc26b469218d1",
            ],
            [
                "f8f5dccf4c6a93d7a4a54daafaa3449aa87a8069875405d43725c5dce392d805",
                "e58176cf66d63054389d3e336461327351f3da64a52143ba026619516cda02fa",
            ],
        );
    }

    #[test]
    fn test_golden_starknet() {
        check_golden(
            &CurveId::Starknet.prime().unwrap(),
            [
                "029f26828c9f9616373509c0ab067a1bbe3e4ca7440e0a238bb3f1c7e396286e",
                "01ed0925b1705cbfc9c7ba9aa0b6950721e330b4ca6a06e08b3134f3c9ff31a2",
            ],
            [
                "0314c8986b9a3fca1998ab928443205e5e1d387f373c55e67b18fef00f647e90",
                "06772826cd306607f55f25bea21e93fc8438fbe216887bbe89a12135a768b924",
            ],
        );
    }

    #[test]
    fn test_golden_ed25519() {
        check_golden(
            &CurveId::Ed25519.prime().unwrap(),
            [
                "7d13c0248b891b47eb524f2692008e2f97b199bac426cb5902b9003a29ded6ea",
                "59a976ab2c01a81a91f1a56c75ccc77a9e1e9e878e9fe9c3952080a6805b20d5",
            ],
            [
                "0af367956af630266b1cc760154256ed79da960dddca9d72a1e8cf27d8d43a77",
                "21108d900134d3b3708dd28ace96b0b23dda9100e4b6a62a8131bd2f2ba408c5",
            ],
        );
    }

    #[test]
    fn test_golden_fourq() {
        check_golden(
            &CurveId::FourQ.quadratic().unwrap(),
            [
                "55d47d46b8b0c7e2b450d3a4dafbad78 + 1d38c62c6fca0341f98ebff17b2f8276 * i",
                "6e88f539f648cee4f6a8775b6f8724e0 + 7508ec836aa7da83571c3c087bf147f6 * i",
            ],
            [
                "65c57caf132541229e5e64c02965241a + 6f303fa0001f7711194a0e062a2d2d5c * i",
                "73ff9338ad602fad8d4bfd84fd7c4890 + 6bfa2793735c57c82845e035abae6309 * i",
            ],
        );
    }

    #[test]
    fn test_all_curves_instantiate() {
        for id in CurveId::ALL {
            let curve = id.instantiate().unwrap();
            assert_eq!(curve.id(), id);
            match curve {
                StdCurve::Prime(c) => {
                    assert_eq!(id.degree(), 1);
                    assert_eq!(c.curve().model(), id.model());
                    assert!(c.curve().is_valid());
                }
                StdCurve::Quadratic(c) => {
                    assert_eq!(id.degree(), 2);
                    assert_eq!(c.curve().field().ext(), 2);
                    assert!(c.curve().is_valid());
                }
            }
        }
    }

    #[test]
    fn test_generators_have_prime_order() {
        for id in [CurveId::Secp256k1, CurveId::Ed25519, CurveId::Jubjub] {
            let (c, g) = id.prime().unwrap().into_parts();
            assert!(!g.is_identity());
            assert!(c.mul_unsigned(&g, c.order()).is_identity(), "{id}");
        }
        let (c, g) = CurveId::FourQ.quadratic().unwrap().into_parts();
        assert!(c.mul_unsigned(&g, c.order()).is_identity());
    }

    #[test]
    fn test_lookup_by_name() {
        for id in CurveId::ALL {
            assert_eq!(id.to_string().parse::<CurveId>().unwrap(), id);
        }
        assert_eq!("FOURQ".parse::<CurveId>().unwrap(), CurveId::FourQ);
        assert_eq!(new_curve("jubjub").unwrap().id(), CurveId::Jubjub);
        assert_eq!(
            new_curve("curve448").unwrap_err(),
            CurveError::UnsupportedCurve("curve448".into())
        );
    }

    #[test]
    fn test_degree_mismatch() {
        assert!(matches!(
            CurveId::FourQ.prime(),
            Err(CurveError::MismatchedCurves(_))
        ));
        assert!(matches!(
            CurveId::Ed25519.quadratic(),
            Err(CurveError::MismatchedCurves(_))
        ));
    }

    #[test]
    fn test_clear_cofactor_ed25519() {
        let (c, _) = CurveId::Ed25519.prime().unwrap().into_parts();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..3 {
            let p = c.random_point(&mut rng);
            assert!(c.is_on_curve(&p));
            let q = c.clear_cofactor(&p);
            assert!(c.is_on_curve(&q));
            assert!(c.mul_unsigned(&q, c.order()).is_identity());
        }
    }

    #[test]
    fn test_recovery_on_standard_curves() {
        let (c, g) = CurveId::Secp256k1.prime().unwrap().into_parts();
        let (x, y) = g.coordinates().unwrap();
        let root = c.point_x2y(x).unwrap();
        assert!(&root == y || root == c.field().neg(y));

        let (e, h) = CurveId::FourQ.quadratic().unwrap().into_parts();
        let (x, y) = h.coordinates().unwrap();
        let root = e.point_y2x(y).unwrap();
        assert!(&root == x || root == e.field().neg(x));
    }
}

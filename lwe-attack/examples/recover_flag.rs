use std::io::Write as _;

use lwe_attack::encoding::{from_chunks, write_fragments};
use lwe_attack::instance::Instance;
use lwe_attack::recovery::{RecoveryParams, recover_secret};
use lwe_attack::rings::PrimeField;
use lwe_attack::vector::Vector;
use num_bigint::BigUint;
use rand::{SeedableRng, rngs::StdRng};

// Hide a flag in a noisy system over 2^521 - 1 and get it back.
fn main() -> lwe_attack::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let params = RecoveryParams::default();
    let field = PrimeField::new((BigUint::from(1u8) << 521u32) - 1u8);

    let flag = b"snakeCTF{th3_3rr0r_w4s_sm4ll_3n0ugh_f0r_LLL_t0_f1nd_1t}";
    let mut secret: Vector<PrimeField> =
        from_chunks(flag, params.byte_width).into_iter().collect();
    while secret.dim() < 5 {
        secret.append(BigUint::from(0u8));
    }

    let rng = &mut StdRng::seed_from_u64(0x5eed);
    let (instance, _) = Instance::random(field, 16, &secret, 2, rng)?;

    let recovery = recover_secret(&instance, &params)?;
    let fragments = recovery.fragments(params.byte_width)?;

    let mut stdout = std::io::stdout().lock();
    write_fragments(&mut stdout, &fragments)?;
    stdout.flush()?;
    Ok(())
}

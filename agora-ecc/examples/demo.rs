use agora_ecc::parse::WeierstrassConfig;
use agora_ecc::rng::random_below;
use agora_ecc::{CurveGroup, Ecdsa, MontgomeryCurve, WeierstrassCurve};
use num_bigint::BigUint;
use rand_core::OsRng;
use structopt::StructOpt;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(StructOpt)]
struct Opt {
    #[structopt(long, default_value = "1024", help = "iterations of each property check")]
    rounds: usize,
    #[structopt(long, default_value = "This message is to be signed")]
    message: String,
    #[structopt(long, help = "json file with custom weierstrass curve parameters")]
    curve: Option<PathBuf>,
}

fn check(name: &str, passed: bool) -> Result<(), Box<dyn Error>> {
    if passed {
        log::info!("{} ... ok", name);
        Ok(())
    } else {
        Err(format!("{} failed", name).into())
    }
}

fn check_group<G: CurveGroup>(
    name: &str,
    curve: &G,
    rounds: usize,
    rng: &mut OsRng,
) -> Result<(), Box<dyn Error>> {
    let g = curve.generator().ok_or("curve has no base point")?;
    let n = curve.order().ok_or("curve has no base point")?;
    check(
        &format!("{} order", name),
        curve.points_equal(&curve.mul(g, n), &curve.identity()),
    )?;
    for _ in 0..rounds {
        let p = curve.mul(g, &random_below(rng, n)?);
        let q = curve.mul(g, &random_below(rng, n)?);
        if !curve.points_equal(&curve.add(&p, &q), &curve.add(&q, &p)) {
            return check(&format!("{} commutativity", name), false);
        }
    }
    check(&format!("{} commutativity", name), true)?;
    for _ in 0..rounds {
        let p = curve.random_point(rng)?;
        for compressed in [true, false] {
            let decoded = curve.decode(&curve.encode(&p, compressed)?)?;
            if !curve.points_equal(&decoded, &p) {
                return check(&format!("{} encoding roundtrip", name), false);
            }
        }
    }
    check(&format!("{} encoding roundtrip", name), true)
}

fn check_distributivity(
    curve: &WeierstrassCurve,
    rounds: usize,
    rng: &mut OsRng,
) -> Result<(), Box<dyn Error>> {
    let g = curve.generator().ok_or("curve has no base point")?;
    let n = curve.order().ok_or("curve has no base point")?;
    for _ in 0..rounds {
        let a = random_below(rng, n)?;
        let b = random_below(rng, n)?;
        let sum: BigUint = &a + &b;
        if curve.mul(g, &sum) != curve.add(&curve.mul(g, &a), &curve.mul(g, &b)) {
            return check("weierstrass distributivity", false);
        }
    }
    check("weierstrass distributivity", true)
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::try_init();
    let opt = Opt::from_args();
    let mut rng = OsRng;

    let curve = match opt.curve {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            let config: WeierstrassConfig = serde_json::from_reader(reader)?;
            WeierstrassCurve::try_from(config)?
        }
        None => WeierstrassCurve::secp256k1(),
    };
    let ecdsa: Ecdsa = Ecdsa::new(curve.clone())?;

    let keypair = ecdsa.generate_keypair(&mut rng)?;
    let other = ecdsa.generate_keypair(&mut rng)?;
    println!("private key: {:x}", keypair.privkey());
    println!(
        "public key:  {}",
        hex::encode(curve.encode(keypair.pubkey(), true)?)
    );

    let message = opt.message.as_bytes();
    let signature = ecdsa.sign(message, keypair.privkey(), &mut rng)?;
    println!(
        "signature:   {}",
        hex::encode(signature.to_bytes(ecdsa.scalar_len())?)
    );
    check(
        "signature verifies",
        ecdsa.verify(message, &signature, keypair.pubkey()),
    )?;
    check(
        "signature rejected under an unrelated key",
        !ecdsa.verify(message, &signature, other.pubkey()),
    )?;

    check_group("weierstrass", &curve, opt.rounds, &mut rng)?;
    check_distributivity(&curve, opt.rounds, &mut rng)?;
    check_group(
        "curve25519",
        &MontgomeryCurve::curve25519(),
        opt.rounds,
        &mut rng,
    )?;

    println!("all checks passed");
    Ok(())
}

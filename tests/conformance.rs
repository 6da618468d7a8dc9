use gf2e_prng::poly::{add, xor_fold, MASK35};
use gf2e_prng::vectors::{golden_vectors, verify_vectors};
use gf2e_prng::{affine, reduce, step, Generator, PrngError};

const SEED: u32 = 478_163_327;

#[test]
fn xor_of_three_wide_values() {
    let sum = add(add(7_041_284_509u64, 14_066_143_831), 9_548_617_438) & MASK35;
    assert_eq!(sum, 3_707_600_148);
}

#[test]
fn xor_of_five_state_values() {
    let terms = [SEED, 107_420_369, 1_181_241_943, 1_051_802_512, 958_682_846];
    assert_eq!(xor_fold(&terms), 1_528_435_895);
}

#[test]
fn affine_transform() {
    assert_eq!(affine(SEED), 7_860_332_174);
}

#[test]
fn modular_reduction() {
    assert_eq!(reduce(7_041_284_509), 598_809_222);
}

#[test]
fn full_recurrence_step() {
    assert_eq!(reduce(affine(SEED)), 1_417_889_173);
    assert_eq!(step(SEED), 1_417_889_173);
}

#[test]
fn hundred_sequential_advances() {
    let mut prng = Generator::new(SEED).unwrap();
    let last = (0..100).map(|_| prng.advance()).last().unwrap();
    assert_eq!(last, 2_137_196_284);
}

#[test]
fn zero_advances_peek_returns_seed() {
    let mut prng = Generator::new(1).unwrap();
    prng.advance();
    prng.reset(SEED).unwrap();
    assert_eq!(prng.peek(), SEED);
}

#[test]
fn oversized_seed_rejected() {
    let err = Generator::new(1 << 31).unwrap_err();
    assert!(matches!(err, PrngError::InvalidSeed { seed } if seed == 1 << 31));
    assert_eq!(
        err.to_string(),
        "seed 2147483648 is not a field element (must be < 2^31)"
    );
}

#[test]
fn golden_table_reproduces() {
    let report = verify_vectors(&golden_vectors()).unwrap();
    assert!(report.passed());
}

use gf2e_prng::{format_poly, Generator, PolyFormat};

fn main() {
    let mut prng = match Generator::new(478_163_327) {
        Ok(prng) => prng,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    for i in 0..5 {
        let value = prng.advance();
        println!("x_{} = {}", i + 1, format_poly(u64::from(value), PolyFormat::Alg));
    }
    let mut fast = prng.clone();
    let ahead = fast.jump(95);
    if ahead == 2_137_196_284 {
        println!("Jump-ahead reproduced x_100 = {ahead}.");
    } else {
        eprintln!("Jump-ahead mismatch: {ahead}");
        std::process::exit(1);
    }
}

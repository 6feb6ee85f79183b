use once_cell::sync::Lazy;

// GF(256) arithmetic
//------------------------------------------------------------------------------

// Log and antilog tables over the primitive polynomial 0x11D, built by
// walking the powers of the generator element 2. The antilog entry 255
// doubles the cycle start so summed logs up to 255 map straight back.
static GF_TABLES: Lazy<([u8; 256], [u8; 256])> = Lazy::new(|| {
    let mut log = [0u8; 256];
    let mut exp = [0u8; 256];
    let mut v: usize = 1;
    for e in 1..256 {
        v = if v > 127 { (v << 1) ^ 0x11D } else { v << 1 };
        log[v] = (e % 255) as u8;
        exp[e % 255] = v as u8;
    }
    exp[255] = 1;
    (log, exp)
});

pub(crate) fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let (log, exp) = &*GF_TABLES;
    exp[(log[a as usize] as usize + log[b as usize] as usize) % 255]
}

pub(crate) fn gf_div(a: u8, b: u8) -> u8 {
    debug_assert!(b != 0, "Zero divisor in GF(256)");
    if a == 0 {
        return 0;
    }
    let (log, exp) = &*GF_TABLES;
    exp[(255 + log[a as usize] as usize - log[b as usize] as usize) % 255]
}

// Polynomial arithmetic
//------------------------------------------------------------------------------

// Coefficient arrays ordered highest degree first.

pub(crate) fn poly_mul(p: &[u8], q: &[u8]) -> Vec<u8> {
    let mut res = vec![0u8; p.len() + q.len() - 1];
    for (i, &a) in p.iter().enumerate() {
        for (j, &b) in q.iter().enumerate() {
            res[i + j] ^= gf_mul(a, b);
        }
    }
    res
}

// Long division remainder; works for any nonzero leading divisor
// coefficient, not just monic generators.
pub(crate) fn poly_rem(dividend: &[u8], divisor: &[u8]) -> Vec<u8> {
    debug_assert!(divisor[0] != 0, "Zero leading coefficient in divisor");
    debug_assert!(dividend.len() + 1 >= divisor.len(), "Dividend shorter than divisor");

    let quotient_len = dividend.len() + 1 - divisor.len();
    let mut rem = dividend.to_vec();
    for i in 0..quotient_len {
        if rem[i] == 0 {
            continue;
        }
        let factor = gf_div(rem[i], divisor[0]);
        for (r, &d) in rem[i..].iter_mut().zip(divisor.iter()) {
            *r ^= gf_mul(d, factor);
        }
    }
    rem.split_off(quotient_len)
}

// Generator polynomial (x - a^0)(x - a^1)..(x - a^(degree - 1)).
pub(crate) fn generator_poly(degree: usize) -> Vec<u8> {
    let (_, exp) = &*GF_TABLES;
    let mut poly = vec![1];
    for i in 0..degree {
        poly = poly_mul(&poly, &[1, exp[i]]);
    }
    poly
}

// ECC: Error correction codewords for one block, the remainder of the data
// polynomial padded with ec_len zeros divided by the degree ec_len generator.
pub(crate) fn ecc(block: &[u8], ec_len: usize) -> Vec<u8> {
    let mut msg = block.to_vec();
    msg.resize(block.len() + ec_len, 0);
    poly_rem(&msg, &generator_poly(ec_len))
}

//! Arithmetic in GF(2^8) modulo the AES polynomial x^8 + x^4 + x^3 + x + 1.
//!
//! Every function here is `const` so the S-box tables can be built at compile
//! time from the same primitives the round functions use at runtime.

/// Low byte of the reduction polynomial (`0x11b` without the x^8 term).
const REDUCTION: u8 = 0x1b;

/// Multiplies `byte` by `x` (i.e. `0x02`).
#[inline]
pub const fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ REDUCTION
    } else {
        shifted
    }
}

/// Multiplies two field elements.
pub const fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

/// Multiplicative inverse, computed as `a^254`. Maps `0` to `0`.
pub const fn ginv(a: u8) -> u8 {
    // 254 = 0b1111_1110, square-and-multiply from the top bit.
    let mut result = 1u8;
    let mut bit = 7;
    loop {
        result = gmul(result, result);
        if (254u8 >> bit) & 1 != 0 {
            result = gmul(result, a);
        }
        if bit == 0 {
            break;
        }
        bit -= 1;
    }
    result
}

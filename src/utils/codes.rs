use rand::Rng;

/// Unambiguous uppercase alphanumerics (no 0/O, 1/I/L).
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Generate a random promo/referral code, e.g. `SAVE-7XK2M9QD`.
pub fn generate_code(prefix: &str, len: usize) -> String {
    let mut rng = rand::thread_rng();
    let body: String = (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect();

    if prefix.is_empty() {
        body
    } else {
        format!("{}-{}", prefix.to_uppercase(), body)
    }
}

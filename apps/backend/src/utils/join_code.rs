//! Join code generation for rooms.
//!
//! Codes are 10-character strings over Crockford's Base32 alphabet. The
//! `games.join_code` unique index catches the rare collision; callers retry.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const JOIN_CODE_LEN: usize = 10;

pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    let mut s = String::with_capacity(JOIN_CODE_LEN);
    for _ in 0..JOIN_CODE_LEN {
        let idx = rng.random_range(0..CROCKFORD.len());
        s.push(CROCKFORD[idx] as char);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_codes_differ() {
        let code1 = generate_join_code();
        let code2 = generate_join_code();
        assert_ne!(code1, code2);
    }

    #[test]
    fn join_code_has_correct_length_and_alphabet() {
        let code = generate_join_code();
        assert_eq!(code.len(), JOIN_CODE_LEN);
        assert!(code.bytes().all(|b| CROCKFORD.contains(&b)));
    }
}

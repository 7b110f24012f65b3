//! Thread-local randomness for identifier suffixes and auth codes.

use rand::Rng;

use crate::domain::ports::RandomSource;
use crate::domain::{
    AUTH_CODE_ALPHABET, AUTH_CODE_LEN, AuthCode, STUDENT_SUFFIX_MAX, STUDENT_SUFFIX_MIN,
};

/// [`RandomSource`] backed by `rand::thread_rng`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn student_suffix(&self) -> u32 {
        rand::thread_rng().gen_range(STUDENT_SUFFIX_MIN..=STUDENT_SUFFIX_MAX)
    }

    fn auth_code(&self) -> AuthCode {
        let mut rng = rand::thread_rng();
        let picks: [usize; AUTH_CODE_LEN] =
            std::array::from_fn(|_| rng.gen_range(0..AUTH_CODE_ALPHABET.len()));
        AuthCode::from_picks(picks)
    }
}

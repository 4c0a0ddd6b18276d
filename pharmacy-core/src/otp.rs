//! One-time signup codes and the resend countdown.
use crate::constants::{OTP_LEN, OTP_MAX, OTP_MIN, OTP_TTL_SECS};
use crate::error::PharmacyError;
use rand::Rng;

/// Six-digit code drawn uniformly from `100000..=999999`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(OTP_MIN..=OTP_MAX).to_string()
}

/// Keep only digits, at most six of them.
#[must_use]
pub fn sanitize_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(OTP_LEN)
        .collect()
}

/// # Errors
///
/// Returns [`PharmacyError::OtpTooShort`] unless `entered` has six digits.
pub fn check_length(entered: &str) -> Result<(), PharmacyError> {
    if entered.len() == OTP_LEN && entered.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PharmacyError::OtpTooShort)
    }
}

/// # Errors
///
/// Returns [`PharmacyError::OtpTooShort`] for malformed input and
/// [`PharmacyError::OtpMismatch`] when the codes differ.
pub fn verify(entered: &str, stored: &str) -> Result<(), PharmacyError> {
    check_length(entered)?;
    if entered == stored {
        Ok(())
    } else {
        Err(PharmacyError::OtpMismatch)
    }
}

/// Seconds until a new code may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpCountdown {
    remaining: u32,
}

impl Default for OtpCountdown {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpCountdown {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            remaining: OTP_TTL_SECS,
        }
    }

    #[must_use]
    pub const fn remaining(self) -> u32 {
        self.remaining
    }

    /// One second elapsed; stops at zero.
    #[must_use]
    pub const fn tick(self) -> Self {
        Self {
            remaining: self.remaining.saturating_sub(1),
        }
    }

    #[must_use]
    pub const fn can_resend(self) -> bool {
        self.remaining == 0
    }

    /// # Errors
    ///
    /// Returns [`PharmacyError::ResendTooEarly`] while time remains.
    pub fn ensure_resend(self) -> Result<(), PharmacyError> {
        if self.can_resend() {
            Ok(())
        } else {
            Err(PharmacyError::ResendTooEarly {
                remaining_secs: self.remaining,
            })
        }
    }

    pub const fn reset(&mut self) {
        self.remaining = OTP_TTL_SECS;
    }

    /// `m:ss`
    #[must_use]
    pub fn format(self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generated_codes_are_six_digits() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let code = generate(&mut rng);
            assert_eq!(code.len(), OTP_LEN);
            let value: u32 = code.parse().unwrap();
            assert!((OTP_MIN..=OTP_MAX).contains(&value));
        }
    }

    #[test]
    fn input_keeps_six_digits() {
        assert_eq!(sanitize_input("12a3-45 678"), "123456");
        assert_eq!(sanitize_input("٤٥"), "");
        assert_eq!(sanitize_input("12"), "12");
    }

    #[test]
    fn verify_checks_length_before_value() {
        assert!(matches!(verify("123", "123456"), Err(PharmacyError::OtpTooShort)));
        assert!(matches!(verify("654321", "123456"), Err(PharmacyError::OtpMismatch)));
        assert!(verify("123456", "123456").is_ok());
    }

    #[test]
    fn countdown_formats_and_gates_resend() {
        let mut countdown = OtpCountdown::new();
        assert_eq!(countdown.format(), "5:00");
        assert!(countdown.ensure_resend().is_err());
        countdown = countdown.tick();
        assert_eq!(countdown.format(), "4:59");
        for _ in 0..400 {
            countdown = countdown.tick();
        }
        assert_eq!(countdown.remaining(), 0);
        assert_eq!(countdown.format(), "0:00");
        assert!(countdown.can_resend());
        countdown.reset();
        assert_eq!(countdown.remaining(), OTP_TTL_SECS);
    }
}

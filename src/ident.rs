//! Identifier generation and validation for widget instances.
//!
//! Every widget carries an identifier that distinguishes its markup from
//! other timers in the same document. Callers may supply their own (it is
//! validated here) or let the builder draw one at random.
//!
//! Generated identifiers come from a freshly seeded [`StdRng`], never from
//! a shared generator: a caller running a reproducible simulation next to
//! widget creation must see the exact same draw sequence whether or not a
//! widget was built in between.

use crate::error::CountdownError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;

/// Prefix for generated identifiers, so they always start with a letter.
pub const ID_PREFIX: &str = "timer_";

/// Generate an identifier from the given random source.
///
/// Draws 4 uniform bytes, renders each as two lowercase hex digits and
/// prefixes the result with [`ID_PREFIX`]. Seeding the source makes the
/// output deterministic, which the tests rely on.
///
/// # Examples
///
/// ```rust
/// use countdown_widget::ident;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let a = ident::generate(&mut rng);
/// let mut rng = StdRng::seed_from_u64(7);
/// let b = ident::generate(&mut rng);
/// assert_eq!(a, b);
/// assert!(a.starts_with("timer_"));
/// assert_eq!(a.len(), "timer_".len() + 8);
/// ```
pub fn generate<R: Rng>(rng: &mut R) -> String {
    let bytes: [u8; 4] = rng.gen();
    let mut id = String::with_capacity(ID_PREFIX.len() + 8);
    id.push_str(ID_PREFIX);
    for byte in bytes {
        // Writing to a String cannot fail.
        let _ = write!(id, "{byte:02x}");
    }
    id
}

/// Generate an identifier from an isolated, entropy-seeded source.
///
/// The `StdRng` is constructed and discarded inside this call, so no
/// ambient random stream the host application relies on is disturbed.
pub fn generate_default() -> String {
    generate(&mut StdRng::from_entropy())
}

/// Validate a caller-supplied identifier.
///
/// An identifier must start with an ASCII letter and may otherwise contain
/// only letters, digits, `_`, `:`, `.` and `-`. On failure the error
/// message names every disallowed character once, in encounter order, with
/// a space rendered as `' '` for readability.
///
/// # Examples
///
/// ```rust
/// use countdown_widget::ident;
///
/// assert!(ident::validate("timer_1:a.b-c").is_ok());
/// assert!(ident::validate("42timer").is_err());
/// assert!(ident::validate("timer one").is_err());
/// ```
pub fn validate(id: &str) -> Result<(), CountdownError> {
    let mut chars = id.chars();
    match chars.next() {
        None => {
            return Err(CountdownError::InvalidIdentifier {
                id: id.to_string(),
                reason: "identifier is empty".to_string(),
            })
        }
        Some(first) if !first.is_ascii_alphabetic() => {
            return Err(CountdownError::InvalidIdentifier {
                id: id.to_string(),
                reason: format!("must start with a letter, not `{first}`"),
            })
        }
        Some(_) => {}
    }

    let mut offending: Vec<char> = Vec::new();
    for c in chars {
        if !is_allowed(c) && !offending.contains(&c) {
            offending.push(c);
        }
    }

    if offending.is_empty() {
        return Ok(());
    }

    let listed = offending
        .iter()
        .map(|&c| if c == ' ' { "' '".to_string() } else { c.to_string() })
        .collect::<Vec<_>>()
        .join(", ");
    Err(CountdownError::InvalidIdentifier {
        id: id.to_string(),
        reason: format!("contains disallowed characters: {listed}"),
    })
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_match_expected_shape() {
        let id = generate_default();
        let hex = id.strip_prefix(ID_PREFIX).expect("prefix missing");
        assert_eq!(hex.len(), 8);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        validate(&id).expect("generated ids must validate");
    }

    #[test]
    fn generated_ids_do_not_collide() {
        // 4 random bytes make collisions negligible over 1000 draws.
        let ids: HashSet<String> = (0..1000).map(|_| generate_default()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);
        for _ in 0..16 {
            assert_eq!(generate(&mut a), generate(&mut b));
        }
    }

    #[test]
    fn generation_leaves_caller_rng_untouched() {
        // A caller's own seeded sequence must be identical with and
        // without interleaved identifier generation.
        let mut reference = StdRng::seed_from_u64(99);
        let expected: Vec<u64> = (0..8).map(|_| reference.gen()).collect();

        let mut observed_rng = StdRng::seed_from_u64(99);
        let mut observed = Vec::new();
        for _ in 0..8 {
            let _ = generate_default();
            observed.push(observed_rng.gen::<u64>());
        }
        assert_eq!(observed, expected);
    }

    #[test]
    fn accepts_full_allowed_alphabet() {
        validate("timer_1:a.b-c").unwrap();
        validate("a").unwrap();
        validate("Z9").unwrap();
    }

    #[test]
    fn rejects_leading_digit() {
        let err = validate("42timer").unwrap_err();
        assert!(err.to_string().contains("must start with a letter"));
    }

    #[test]
    fn rejects_empty() {
        assert!(validate("").is_err());
    }

    #[test]
    fn names_offending_characters_once_in_order() {
        let err = validate("timer one@two@ three").unwrap_err();
        let msg = err.to_string();
        // Space first (quoted), then `@`, each listed exactly once.
        assert!(
            msg.ends_with("contains disallowed characters: ' ', @"),
            "unexpected message: {msg}"
        );
    }

    #[test]
    fn space_is_rendered_quoted() {
        let err = validate("timer one").unwrap_err();
        assert!(err.to_string().contains("' '"));
    }
}

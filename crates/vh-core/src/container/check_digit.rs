use thiserror::Error;

/// Letter values of ISO 6346; multiples of 11 are skipped.
const LETTER_VALUES: [u32; 26] = [
    10, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 34, 35, 36,
    37, 38,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerNoError {
    #[error("コンテナNoの入力が正しくありません")]
    InvalidParts,
}

/// Computes the ISO 6346 check digit of an owner code + serial.
///
/// Input is trimmed and upper-cased. Returns `None` for empty input or a
/// character that is neither an ASCII letter nor a digit.
pub fn calc_check_digit(value: &str) -> Option<u8> {
    let normalized = value.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return None;
    }

    // Position weights are powers of two; both sum and weight stay mod 11.
    let mut sum: u32 = 0;
    let mut weight: u32 = 1;
    for c in normalized.chars() {
        let code = match c {
            'A'..='Z' => LETTER_VALUES[(c as u8 - b'A') as usize],
            '0'..='9' => c as u32 - '0' as u32,
            _ => return None,
        };
        sum = (sum + code * weight) % 11;
        weight = (weight * 2) % 11;
    }

    // Remainder 10 is written as 0.
    Some((sum % 10) as u8)
}

/// Builds a full container number: owner code (3) + `U` + serial (6) + check digit.
///
/// An empty owner code means "no container number" and yields `Ok(None)`.
pub fn build_container_no(owner: &str, serial: &str) -> Result<Option<String>, ContainerNoError> {
    let owner = owner.trim();
    let serial = serial.trim();

    if owner.is_empty() && serial.is_empty() {
        return Ok(None);
    }
    if owner.chars().count() != 3 || serial.chars().count() != 6 {
        return Err(ContainerNoError::InvalidParts);
    }

    let base = format!("{}U{}", owner.to_ascii_uppercase(), serial);
    let digit = calc_check_digit(&base).ok_or(ContainerNoError::InvalidParts)?;
    Ok(Some(format!("{base}{digit}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_container_numbers() {
        assert_eq!(calc_check_digit("CSQU305438"), Some(3));
        assert_eq!(calc_check_digit(" msku907032 "), Some(3));
        assert_eq!(calc_check_digit("TCLU123456"), Some(8));
    }

    #[test]
    fn remainder_ten_becomes_zero() {
        // 10 * 1 + 0 = 10 -> 10 % 11 = 10 -> 0
        assert_eq!(calc_check_digit("A"), Some(0));
    }

    #[test]
    fn long_input_keeps_the_weighted_sum_in_range() {
        // 2^i mod 11 repeats every 10 positions, and the ten weights sum to 0 mod 11.
        assert_eq!(calc_check_digit(&"A".repeat(70)), Some(0));
        assert_eq!(calc_check_digit(&format!("{}CSQU305438", "0".repeat(100))), Some(3));
        assert!(calc_check_digit(&"Z9".repeat(500)).is_some());
    }

    #[test]
    fn invalid_input_has_no_digit() {
        assert_eq!(calc_check_digit(""), None);
        assert_eq!(calc_check_digit("   "), None);
        assert_eq!(calc_check_digit("CSQU-305438"), None);
    }

    #[test]
    fn builds_full_number_from_parts() {
        assert_eq!(
            build_container_no("csq", "305438"),
            Ok(Some("CSQU3054383".to_string()))
        );
        assert_eq!(build_container_no("", ""), Ok(None));
        assert_eq!(build_container_no("CSQ", "3054"), Err(ContainerNoError::InvalidParts));
        assert_eq!(build_container_no("", "305438"), Err(ContainerNoError::InvalidParts));
    }
}

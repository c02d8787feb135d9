use thiserror::Error;

/// Fields carried by a bundle tag (現品票) barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genpin {
    pub heat_no: String,
    pub sokuban: String,
    /// Only the 18-character tag carries a bundle number.
    pub bundle_no: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenpinError {
    #[error("現品番号は13桁か14桁か18桁で入力してください")]
    InvalidLength(usize),
}

/// Splits a scanned bundle tag.
///
/// Layout (0-based character positions):
/// - 13 chars: heat `1..7`, sokuban `7..13`
/// - 14 chars: heat `1..7`, sokuban `7..14`
/// - 18 chars: heat `1..7`, sokuban `7..14` (trimmed), bundle no `14..18`
pub fn parse_genpin(input: &str) -> Result<Genpin, GenpinError> {
    let chars: Vec<char> = input.trim().chars().collect();
    let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

    match chars.len() {
        13 => Ok(Genpin {
            heat_no: slice(1, 7),
            sokuban: slice(7, 13),
            bundle_no: None,
        }),
        14 => Ok(Genpin {
            heat_no: slice(1, 7),
            sokuban: slice(7, 14),
            bundle_no: None,
        }),
        18 => Ok(Genpin {
            heat_no: slice(1, 7),
            sokuban: slice(7, 14).trim().to_string(),
            bundle_no: Some(slice(14, 18)),
        }),
        other => Err(GenpinError::InvalidLength(other)),
    }
}

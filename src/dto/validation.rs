//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest decimal rendering of a `u32` game identifier.
const MAX_GAME_ID_DIGITS: usize = 10;

/// Validates that a game ID is a plain decimal number that fits the catalogue's key type.
///
/// # Examples
///
/// ```ignore
/// validate_game_id("13")          // Ok
/// validate_game_id("13%")         // Err - not a digit
/// validate_game_id("99999999999") // Err - too long
/// ```
pub fn validate_game_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() || id.len() > MAX_GAME_ID_DIGITS {
        let mut err = ValidationError::new("game_id_length");
        err.message = Some(
            format!(
                "Game ID must have between 1 and {MAX_GAME_ID_DIGITS} digits (got {})",
                id.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !id.chars().all(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("game_id_format");
        err.message = Some("Game ID must contain only decimal digits".into());
        return Err(err);
    }

    if id.parse::<u32>().is_err() {
        let mut err = ValidationError::new("game_id_range");
        err.message = Some(format!("Game ID must not exceed {}", u32::MAX).into());
        return Err(err);
    }

    Ok(())
}

use crate::error::ValidationError;

/// Parse a comma-separated list of whole hours such as `"8, 12,16"`.
///
/// Blank entries are skipped. Every remaining entry must be an integer in
/// `0..=23`, and at least one hour is required.
pub fn parse_hours(input: &str) -> Result<Vec<u8>, ValidationError> {
    let hours = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u8>() {
            Ok(hour) if hour <= 23 => Ok(hour),
            _ => Err(ValidationError::InvalidHour {
                input: s.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if hours.is_empty() {
        return Err(ValidationError::NoHours);
    }
    Ok(hours)
}

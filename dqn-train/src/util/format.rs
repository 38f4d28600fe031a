use num_format::{CustomFormat, Grouping, ToFormattedString};

pub fn number_format() -> CustomFormat {
    CustomFormat::builder()
        .grouping(Grouping::Standard)
        .minus_sign("-")
        .separator("_")
        .build()
        .unwrap_or_default()
}

/// `1234567` -> `1_234_567`
pub fn grouped(value: usize) -> String { value.to_formatted_string(&number_format()) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(250_000), "250_000");
        assert_eq!(grouped(50_000_000), "50_000_000");
    }
}

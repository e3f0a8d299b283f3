use chrono::{DateTime, Local, Utc};
use rand::Rng;

/// Generate a post id of the form `post_YYYYMMDDHHMMSS`
pub fn generate_post_id(now: DateTime<Utc>) -> String {
    format!("post_{}", now.format("%Y%m%d%H%M%S"))
}

/// Today's date as shown in the editor, e.g. `2024.05.01`
pub fn default_post_date() -> String {
    Local::now().format("%Y.%m.%d").to_string()
}

/// Unique asset filename: `<epoch-ms>-<random-int><ext>`, `ext` includes the dot
pub fn generate_asset_name(ext: &str) -> String {
    let mut rng = rand::rng();
    let suffix: u32 = rng.random_range(0..1_000_000_000);
    format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, ext)
}

/// Format a byte count with 1024-based units, two decimals, trailing zeros trimmed
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn post_id_uses_compact_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(generate_post_id(now), "post_20240309070501");
    }

    #[test]
    fn asset_name_keeps_extension() {
        let name = generate_asset_name(".png");
        assert!(name.ends_with(".png"));
        let stem = name.trim_end_matches(".png");
        let (millis, random) = stem.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert!(random.parse::<u32>().unwrap() < 1_000_000_000);
    }

    #[test]
    fn default_date_is_dotted() {
        let date = default_post_date();
        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('.').count(), 2);
    }

    #[test]
    fn format_size_uses_binary_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(1_288_490_189), "1.2 GB");
        assert_eq!(format_size(1100), "1.07 KB");
    }
}

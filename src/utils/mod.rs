use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use chrono::{Local, Utc};
use sha2::{Digest, Sha256};

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

pub fn today_iso() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

// Display formats match the dashboard cards: whole-dollar currency,
// one-decimal percent and hours, two-decimal minutes per document.

pub fn format_usd(value: f64) -> String {
    format!("${:.0}", value)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_hours(value: f64) -> String {
    format!("{:.1}h", value)
}

pub fn format_seconds(value: f64) -> String {
    format!("{:.1}s", value)
}

pub fn format_minutes_per_doc(value: f64) -> String {
    format!("{:.2} min/doc", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_rounds_to_whole_dollars() {
        assert_eq!(format_usd(187.5), "$188");
        assert_eq!(format_usd(18680.0), "$18680");
    }

    #[test]
    fn percent_keeps_one_decimal() {
        assert_eq!(format_percent(22316.0), "22316.0%");
    }
}

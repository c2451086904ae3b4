use super::model::NOT_AVAILABLE;
use chrono::NaiveDate;
use rand::Rng;
use std::string::FromUtf8Error;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Formats a byte count as megabytes with two decimals, `"N/A"` when unknown or zero.
pub fn bytes_to_megabytes(bytes: Option<f64>) -> String {
    match bytes {
        Some(bytes) if bytes != 0.0 && !bytes.is_nan() => {
            format!("{:.2}", bytes / BYTES_PER_MEGABYTE)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Epoch seconds of an upload date in `YYYYMMDD` form, taken at midnight UTC.
pub fn published_timestamp(upload_date: Option<&str>) -> Option<i64> {
    let date = NaiveDate::parse_from_str(upload_date?.trim(), "%Y%m%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

/// First value of `name` in a raw query string, percent-decoded strictly.
///
/// `+` decodes to a space. Bytes that are not valid UTF-8 are an error rather
/// than being replaced.
pub fn query_param(query: Option<&str>, name: &str) -> Option<Result<String, FromUtf8Error>> {
    query?
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            urlencoding::decode(&value.replace('+', " ")).map(|value| value.into_owned())
        })
}

pub fn process_token() -> String {
    format!("{:.4}", rand::thread_rng().gen::<f64>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_megabytes() {
        assert_eq!(bytes_to_megabytes(Some(2097152.0)), "2.00");
        assert_eq!(bytes_to_megabytes(Some(10485760.0)), "10.00");
        assert_eq!(bytes_to_megabytes(Some(1572864.0)), "1.50");
        assert_eq!(bytes_to_megabytes(Some(1.0)), "0.00");
    }

    #[test]
    fn unknown_size_is_not_available() {
        assert_eq!(bytes_to_megabytes(None), "N/A");
        assert_eq!(bytes_to_megabytes(Some(0.0)), "N/A");
        assert_eq!(bytes_to_megabytes(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn upload_date_to_epoch() {
        assert_eq!(published_timestamp(Some("20240115")), Some(1705276800));
        assert_eq!(published_timestamp(Some("19700101")), Some(0));
        assert_eq!(published_timestamp(Some("2024-01-15")), None);
        assert_eq!(published_timestamp(Some("")), None);
        assert_eq!(published_timestamp(None), None);
    }

    #[test]
    fn reads_query_param() {
        let query = Some("a=1&url=https%3A%2F%2Fx%2Fv%3Fa%3D1%26b%3D2&url=second");
        assert_eq!(
            query_param(query, "url").unwrap().unwrap(),
            "https://x/v?a=1&b=2"
        );
        assert_eq!(query_param(Some("url=a+b%2B"), "url").unwrap().unwrap(), "a b+");
        assert_eq!(query_param(Some("url"), "url").unwrap().unwrap(), "");
        assert!(query_param(Some("other=1"), "url").is_none());
        assert!(query_param(None, "url").is_none());
    }

    #[test]
    fn rejects_invalid_utf8_query_param() {
        assert!(query_param(Some("url=%FF"), "url").unwrap().is_err());
        assert!(query_param(Some("url=%C3%28"), "url").unwrap().is_err());
    }

    #[test]
    fn process_token_has_four_decimals() {
        for _ in 0..32 {
            let token = process_token();
            let (whole, fraction) = token.split_once('.').unwrap();
            assert!(whole == "0" || whole == "1");
            assert_eq!(fraction.len(), 4);
            assert!(fraction.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

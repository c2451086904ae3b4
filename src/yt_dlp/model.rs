use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

pub const NOT_AVAILABLE: &str = "N/A";

/// Subset of the `--dump-json` document the service reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoMetadata {
    pub id: Option<String>,
    pub title: Option<String>,
    pub duration: Option<Number>,
    pub view_count: Option<Number>,
    pub like_count: Option<Number>,
    pub comment_count: Option<Number>,
    pub download_count: Option<Number>,
    pub availability: Option<String>,
    pub uploader: Option<String>,
    pub uploader_id: Option<String>,
    pub uploader_url: Option<String>,
    pub track: Option<String>,
    pub artist: Option<String>,
    /// `YYYYMMDD`
    pub upload_date: Option<String>,
    pub formats: Vec<FormatEntry>,
}

/// One candidate stream reported by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatEntry {
    /// Quality tag such as `720p` or `audio`
    pub format_note: Option<String>,
    pub url: Option<String>,
    pub filesize: Option<f64>,
}

/// A value that serializes as `"N/A"` when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct OrNa<T>(pub Option<T>);

impl OrNa<String> {
    /// Empty strings count as missing.
    pub fn text(value: Option<String>) -> Self {
        OrNa(value.filter(|v| !v.is_empty()))
    }
}

impl<T: Serialize> Serialize for OrNa<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkEntry {
    pub url: Option<String>,
    pub size_mb: String,
}

impl LinkEntry {
    pub fn missing() -> Self {
        LinkEntry {
            url: None,
            size_mb: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Always six resolution tiers plus the audio track, in tier order.
#[derive(Debug, Clone, PartialEq)]
pub struct Links {
    pub tiers: [LinkEntry; super::RESOLUTION_TIERS.len()],
    pub music: LinkEntry,
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.tiers.len() + 1))?;
        for (tier, entry) in super::RESOLUTION_TIERS.iter().zip(&self.tiers) {
            map.serialize_entry(tier, entry)?;
        }
        map.serialize_entry("music", &self.music)?;
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseDocument {
    pub creator: &'static str,
    pub status: bool,
    pub process: String,
    pub data: VideoData,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoData {
    pub id: OrNa<String>,
    pub region: OrNa<String>,
    pub title: OrNa<String>,
    pub duration: OrNa<Number>,
    pub repro: OrNa<Number>,
    pub like: OrNa<Number>,
    pub share: OrNa<Number>,
    pub comment: OrNa<Number>,
    pub download: Number,
    pub published: OrNa<i64>,
    pub author: Author,
    pub music: Music,
    pub media: Media,
}

#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub id: OrNa<String>,
    pub username: OrNa<String>,
    pub nickname: OrNa<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Music {
    pub title: OrNa<String>,
    pub author: OrNa<String>,
    pub duration: OrNa<Number>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub links: Links,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_extractor_output() {
        let raw = r#"{
            "id": "abc",
            "title": "T",
            "duration": 10,
            "view_count": 120,
            "like_count": null,
            "upload_date": "20240115",
            "formats": [
                {"format_note": "720p", "url": "http://x/720.mp4", "filesize": 10485760},
                {"format_note": null, "url": "http://x/storyboard", "filesize": null},
                {"format_id": "sb0"}
            ],
            "thumbnails": [{"url": "http://x/t.jpg"}]
        }"#;
        let metadata: VideoMetadata = serde_json::from_str(raw).unwrap();

        assert_eq!(metadata.id.as_deref(), Some("abc"));
        assert_eq!(metadata.view_count, Some(Number::from(120)));
        assert_eq!(metadata.like_count, None);
        assert_eq!(metadata.formats.len(), 3);
        assert_eq!(metadata.formats[0].filesize, Some(10485760.0));
        assert!(metadata.formats[2].format_note.is_none());
    }

    #[test]
    fn counters_accept_any_number() {
        let metadata: VideoMetadata = serde_json::from_str(
            r#"{"view_count": 1000.0, "like_count": 12, "comment_count": -1, "formats": []}"#,
        )
        .unwrap();

        assert_eq!(serde_json::to_value(&metadata.view_count).unwrap(), json!(1000.0));
        assert_eq!(serde_json::to_value(&metadata.like_count).unwrap(), json!(12));
        assert_eq!(serde_json::to_value(&metadata.comment_count).unwrap(), json!(-1));
    }

    #[test]
    fn formats_are_required() {
        let result = serde_json::from_str::<VideoMetadata>(r#"{"id": "abc", "title": "T"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn or_na_serializes_sentinel() {
        assert_eq!(serde_json::to_value(OrNa::<u64>(None)).unwrap(), json!("N/A"));
        assert_eq!(serde_json::to_value(OrNa(Some(7u64))).unwrap(), json!(7));
        assert_eq!(
            serde_json::to_value(OrNa::text(Some(String::new()))).unwrap(),
            json!("N/A")
        );
    }

    #[test]
    fn links_keep_tier_order() {
        let links = Links {
            tiers: std::array::from_fn(|_| LinkEntry::missing()),
            music: LinkEntry::missing(),
        };

        let text = serde_json::to_string(&links).unwrap();
        let positions: Vec<usize> = ["144p", "240p", "360p", "480p", "720p", "1080p", "music"]
            .iter()
            .map(|key| text.find(&format!("\"{}\"", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

use super::{
    model::{
        Author, FormatEntry, LinkEntry, Links, Media, Music, OrNa, ResponseDocument, VideoData,
        VideoMetadata,
    },
    utils::{bytes_to_megabytes, process_token, published_timestamp},
    AUDIO_TAG, CREATOR, RESOLUTION_TIERS,
};
use crate::shortener::LinkShortener;
use serde_json::Number;

fn find_format<'a>(formats: &'a [FormatEntry], tag: &str) -> Option<&'a FormatEntry> {
    formats
        .iter()
        .find(|format| format.format_note.as_deref() == Some(tag))
}

async fn link_for(format: Option<&FormatEntry>, shortener: &dyn LinkShortener) -> LinkEntry {
    let Some(format) = format else {
        return LinkEntry::missing();
    };
    let url = match &format.url {
        Some(url) => Some(shortener.shorten(url).await),
        None => None,
    };
    LinkEntry {
        url,
        size_mb: bytes_to_megabytes(format.filesize),
    }
}

/// Resolves one link per tier and one for the audio track.
///
/// Shortening runs tier by tier, one request at a time.
pub async fn resolve_links(formats: &[FormatEntry], shortener: &dyn LinkShortener) -> Links {
    let mut tiers: [LinkEntry; RESOLUTION_TIERS.len()] =
        std::array::from_fn(|_| LinkEntry::missing());
    for (slot, tier) in tiers.iter_mut().zip(RESOLUTION_TIERS) {
        *slot = link_for(find_format(formats, tier), shortener).await;
    }
    let music = link_for(find_format(formats, AUDIO_TAG), shortener).await;

    Links { tiers, music }
}

pub async fn assemble(metadata: VideoMetadata, shortener: &dyn LinkShortener) -> ResponseDocument {
    let links = resolve_links(&metadata.formats, shortener).await;
    let published = published_timestamp(metadata.upload_date.as_deref());

    let music_duration = metadata
        .duration
        .clone()
        .filter(|duration| duration.as_f64() != Some(0.0));

    ResponseDocument {
        creator: CREATOR,
        status: true,
        process: process_token(),
        data: VideoData {
            id: OrNa::text(metadata.id),
            region: OrNa::text(metadata.availability),
            title: OrNa::text(metadata.title),
            duration: OrNa(metadata.duration),
            repro: OrNa(metadata.view_count),
            like: OrNa(metadata.like_count),
            share: OrNa(metadata.comment_count.clone()),
            comment: OrNa(metadata.comment_count),
            download: metadata.download_count.unwrap_or_else(|| Number::from(0)),
            published: OrNa(published),
            author: Author {
                id: OrNa::text(metadata.uploader_id),
                username: OrNa::text(metadata.uploader_url),
                nickname: OrNa::text(metadata.uploader),
            },
            music: Music {
                title: OrNa::text(metadata.track),
                author: OrNa::text(metadata.artist),
                duration: OrNa(music_duration),
            },
            media: Media {
                kind: "video",
                links,
            },
        },
    }
}

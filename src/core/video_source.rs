//! Video source selection: YouTube links or local files.

use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::constants::{MSG_EMPTY_VIDEO_URL, MSG_UNSUPPORTED_VIDEO_FILE, MSG_UNSUPPORTED_VIDEO_URL};
use crate::error::{Result, ScoutError};

const SHORT_LINK_HOST: &str = "youtu.be";
const WATCH_HOSTS: [&str; 2] = ["youtube.com", "m.youtube.com"];

/// Extract the video id from a YouTube watch, embed, shorts or short link.
pub fn parse_youtube_id(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());
    let id = if host == SHORT_LINK_HOST {
        segments.next().map(str::to_string)
    } else if WATCH_HOSTS.contains(&host) {
        match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("embed") | Some("shorts") => segments.next().map(str::to_string),
            _ => None,
        }
    } else {
        None
    };
    id.filter(|id| !id.is_empty())
}

/// A loadable video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    YouTube { video_id: String, url: String },
    LocalFile { path: PathBuf },
}

impl VideoSource {
    pub fn from_url(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ScoutError::Validation(MSG_EMPTY_VIDEO_URL.to_string()));
        }
        let video_id = parse_youtube_id(trimmed)
            .ok_or_else(|| ScoutError::Validation(MSG_UNSUPPORTED_VIDEO_URL.to_string()))?;
        Ok(VideoSource::YouTube {
            video_id,
            url: trimmed.to_string(),
        })
    }

    /// Accept an existing file whose extension maps to a `video/*` type.
    pub fn local(path: &Path) -> Result<Self> {
        if !path.is_file() || !is_video_file(path) {
            return Err(ScoutError::Validation(MSG_UNSUPPORTED_VIDEO_FILE.to_string()));
        }
        Ok(VideoSource::LocalFile {
            path: path.to_path_buf(),
        })
    }

    /// Reference stored with saved metadata.
    pub fn display_url(&self) -> String {
        match self {
            VideoSource::YouTube { url, .. } => url.clone(),
            VideoSource::LocalFile { path } => path.display().to_string(),
        }
    }
}

fn is_video_file(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::VIDEO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_youtube_id_shapes() {
        let cases = [
            ("https://youtu.be/abc123", Some("abc123")),
            ("https://youtu.be/abc123/extra?t=30", Some("abc123")),
            ("https://www.youtube.com/watch?v=xyz789", Some("xyz789")),
            ("https://youtube.com/watch?feature=share&v=xyz789", Some("xyz789")),
            ("https://m.youtube.com/watch?v=mob1", Some("mob1")),
            ("https://www.youtube.com/embed/emb42", Some("emb42")),
            ("https://youtube.com/shorts/sh0rt", Some("sh0rt")),
            ("https://example.com/watch?v=xyz789", None),
            ("https://www.youtube.com/watch", None),
            ("https://www.youtube.com/channel/abc", None),
            ("not a url", None),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_youtube_id(input).as_deref(), expected, "{}", input);
        }
    }

    #[test]
    fn test_from_url_messages() {
        match VideoSource::from_url("   ") {
            Err(ScoutError::Validation(message)) => assert_eq!(message, MSG_EMPTY_VIDEO_URL),
            other => panic!("unexpected {:?}", other),
        }
        match VideoSource::from_url("https://vimeo.com/123") {
            Err(ScoutError::Validation(message)) => assert_eq!(message, MSG_UNSUPPORTED_VIDEO_URL),
            other => panic!("unexpected {:?}", other),
        }
        let source = VideoSource::from_url(" https://youtu.be/abc123 ").unwrap();
        assert_eq!(
            source,
            VideoSource::YouTube {
                video_id: "abc123".to_string(),
                url: "https://youtu.be/abc123".to_string(),
            }
        );
    }

    #[test]
    fn test_local_requires_video_file() {
        let dir = TempDir::new().unwrap();
        let video = dir.path().join("match.mp4");
        let notes = dir.path().join("notes.txt");
        std::fs::write(&video, b"").unwrap();
        std::fs::write(&notes, b"").unwrap();

        assert!(VideoSource::local(&video).is_ok());
        assert!(VideoSource::local(&notes).is_err());
        assert!(VideoSource::local(&dir.path().join("missing.mp4")).is_err());
    }
}

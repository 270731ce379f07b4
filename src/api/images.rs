//! TMDB image and YouTube URL helpers

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";
pub const YOUTUBE_EMBED_URL: &str = "https://www.youtube.com/embed/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
    Original,
}

impl ImageKind {
    /// TMDB size segment for this kind of image
    pub fn size_segment(&self, size: ImageSize) -> &'static str {
        match (self, size) {
            (_, ImageSize::Original) => "original",
            (ImageKind::Poster, ImageSize::Small) => "w185",
            (ImageKind::Poster, ImageSize::Medium) => "w342",
            (ImageKind::Poster, ImageSize::Large) => "w500",
            (ImageKind::Backdrop, ImageSize::Small) => "w300",
            (ImageKind::Backdrop, ImageSize::Medium) => "w780",
            (ImageKind::Backdrop, ImageSize::Large) => "w1280",
            (ImageKind::Profile, ImageSize::Small) => "w45",
            (ImageKind::Profile, ImageSize::Medium) => "w185",
            (ImageKind::Profile, ImageSize::Large) => "h632",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            ImageKind::Poster => "/placeholder-poster.svg",
            ImageKind::Backdrop => "/placeholder-backdrop.svg",
            ImageKind::Profile => "/placeholder-avatar.svg",
        }
    }
}

/// Full image URL for a TMDB path, or the placeholder when there is none
pub fn image_url(path: Option<&str>, kind: ImageKind, size: ImageSize) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}{}", IMAGE_BASE_URL, kind.size_segment(size), path),
        None => kind.placeholder().to_string(),
    }
}

pub fn youtube_watch_url(key: &str) -> String {
    format!("{}{}", YOUTUBE_WATCH_URL, key)
}

/// Embed URL with autoplay and hidden chrome
pub fn youtube_embed_url(key: &str, muted: bool) -> String {
    format!(
        "{}{}?autoplay=1&mute={}&controls=0&rel=0&modestbranding=1&playsinline=1",
        YOUTUBE_EMBED_URL,
        key,
        if muted { 1 } else { 0 }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_sizes() {
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageKind::Poster, ImageSize::Medium),
            "https://image.tmdb.org/t/p/w342/abc.jpg"
        );
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageKind::Backdrop, ImageSize::Large),
            "https://image.tmdb.org/t/p/w1280/abc.jpg"
        );
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageKind::Profile, ImageSize::Large),
            "https://image.tmdb.org/t/p/h632/abc.jpg"
        );
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageKind::Profile, ImageSize::Original),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }

    #[test]
    fn test_image_url_placeholder() {
        assert_eq!(
            image_url(None, ImageKind::Poster, ImageSize::Small),
            "/placeholder-poster.svg"
        );
        assert_eq!(
            image_url(Some(""), ImageKind::Backdrop, ImageSize::Small),
            "/placeholder-backdrop.svg"
        );
        assert_eq!(
            image_url(None, ImageKind::Profile, ImageSize::Small),
            "/placeholder-avatar.svg"
        );
    }

    #[test]
    fn test_youtube_urls() {
        assert_eq!(youtube_watch_url("xyz"), "https://www.youtube.com/watch?v=xyz");
        let embed = youtube_embed_url("xyz", true);
        assert!(embed.starts_with("https://www.youtube.com/embed/xyz?autoplay=1&mute=1"));
        assert!(youtube_embed_url("xyz", false).contains("mute=0"));
    }
}

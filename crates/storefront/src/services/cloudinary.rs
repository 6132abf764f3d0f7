//! Cloudinary delivery URL optimization.
//!
//! Cloudinary applies transformations encoded in the path segment after
//! `/upload/`. Images stored elsewhere pass through untouched.

const CLOUDINARY_HOST: &str = "res.cloudinary.com";
const UPLOAD_SEGMENT: &str = "/upload/";

/// Transformation parameters for a delivered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    pub width: u32,
    pub quality: String,
    pub crop: String,
    pub format: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: 800,
            quality: "auto:good".to_owned(),
            crop: "scale".to_owned(),
            format: "auto".to_owned(),
        }
    }
}

impl ImageOptions {
    /// Default options with a different width.
    #[must_use]
    pub fn width(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    fn transformation(&self) -> String {
        format!(
            "q_{},f_{},w_{},c_{}",
            self.quality, self.format, self.width, self.crop
        )
    }
}

/// Insert quality, format, width and crop transformations into a Cloudinary URL.
///
/// Returns the URL unchanged when it is not a Cloudinary delivery URL or has
/// nothing after `/upload/`.
#[must_use]
pub fn optimize_image_url(url: &str, options: &ImageOptions) -> String {
    if !url.contains(CLOUDINARY_HOST) {
        return url.to_owned();
    }
    match url.split_once(UPLOAD_SEGMENT) {
        Some((prefix, rest)) if !rest.is_empty() => {
            format!(
                "{prefix}{UPLOAD_SEGMENT}{}/{rest}",
                options.transformation()
            )
        }
        _ => url.to_owned(),
    }
}

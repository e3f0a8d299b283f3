/// Represents an image received from the editor
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

impl FileUpload {
    pub fn new(file_name: String, data: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            file_name,
            data,
            content_type,
        }
    }

    /// Get file size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Lowercased extension without the dot, if the name has one
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

/// File validation configuration
#[derive(Debug, Clone)]
pub struct FileValidator {
    /// Allowed file extensions (e.g., ["jpg", "png", "gif"])
    pub allowed_extensions: Vec<String>,
    /// Allowed MIME types, checked only when the client sends one
    pub allowed_content_types: Vec<String>,
    /// Maximum file size in bytes
    pub max_file_size: usize,
}

impl FileValidator {
    /// Validator for editor images: jpg/jpeg/png/gif/webp, max 5MB
    pub fn images() -> Self {
        Self {
            allowed_extensions: ["jpg", "jpeg", "png", "gif", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_content_types: [
                "image/jpeg",
                "image/jpg",
                "image/png",
                "image/gif",
                "image/webp",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_file_size: 5 * 1024 * 1024,
        }
    }

    /// Reject as soon as a streamed upload grows past the limit
    pub fn check_size(&self, size: usize) -> Result<(), String> {
        if size > self.max_file_size {
            return Err(format!(
                "File too large. Maximum size: {} MB",
                self.max_file_size / (1024 * 1024)
            ));
        }
        Ok(())
    }

    /// Validate a file
    pub fn validate(&self, file: &FileUpload) -> Result<(), String> {
        let extension = file.extension().ok_or("File has no extension")?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(format!(
                "Invalid file type '{}'. Allowed types: {}",
                extension,
                self.allowed_extensions.join(", ")
            ));
        }

        if let Some(ref content_type) = file.content_type {
            let content_type = content_type.to_lowercase();
            if !self.allowed_content_types.contains(&content_type) {
                return Err(format!("Invalid content type '{}'", content_type));
            }
        }

        if file.data.is_empty() {
            return Err("File is empty".to_string());
        }

        self.check_size(file.size())
    }
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::images()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, size: usize, content_type: Option<&str>) -> FileUpload {
        FileUpload::new(
            name.to_string(),
            vec![0u8; size],
            content_type.map(|c| c.to_string()),
        )
    }

    #[test]
    fn accepts_supported_images() {
        let validator = FileValidator::images();
        for name in ["a.jpg", "b.JPEG", "c.png", "d.gif", "e.webp"] {
            assert!(validator.validate(&image(name, 10, None)).is_ok(), "{name}");
        }
        assert!(
            validator
                .validate(&image("f.png", 10, Some("image/png")))
                .is_ok()
        );
    }

    #[test]
    fn rejects_other_types() {
        let validator = FileValidator::images();
        assert!(validator.validate(&image("notes.txt", 10, None)).is_err());
        assert!(validator.validate(&image("vector.svg", 10, None)).is_err());
        assert!(validator.validate(&image("noext", 10, None)).is_err());
        assert!(validator.validate(&image(".png", 10, None)).is_err());
        assert!(
            validator
                .validate(&image("fake.png", 10, Some("text/html")))
                .is_err()
        );
    }

    #[test]
    fn enforces_size_limits() {
        let validator = FileValidator::images();
        let limit = 5 * 1024 * 1024;
        assert!(validator.validate(&image("max.png", limit, None)).is_ok());
        let err = validator
            .validate(&image("big.png", limit + 1, None))
            .unwrap_err();
        assert!(err.contains("5 MB"));
        assert_eq!(
            validator.validate(&image("empty.png", 0, None)).unwrap_err(),
            "File is empty"
        );
    }
}

use crate::Result;
use std::path::Path;

/// Shown under the file input when the selected receipt is not an accepted image.
pub const FILE_FORMAT_ERROR: &str = "Seuls les formats de fichiers (jpg, jpeg, png) sont autorisés";

/// The receipt image formats a bill may carry.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ReceiptFormat {
    Jpeg,
    Jpg,
    Png,
}

impl ReceiptFormat {
    fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/jpg" => Some(Self::Jpg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    fn from_extension(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name).extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "jpeg" => Some(Self::Jpeg),
            "jpg" => Some(Self::Jpg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// A file picked in the file input: its name, its declared MIME type and its content.
#[derive(Clone, Eq, PartialEq)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    content: Vec<u8>,
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.content.len())
            .finish()
    }
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Reads the file at `path`. When `mime_type` is `None` it is guessed from the extension.
    pub async fn load(path: &Path, mime_type: Option<&str>) -> Result<Self> {
        let content = crate::utils::read_bytes(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = match mime_type {
            Some(m) => m.to_string(),
            None => mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };
        Ok(Self::new(name, mime_type, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The receipt format of this file, if it is one we accept. A declared MIME type decides;
    /// the extension is only consulted when the browser or caller declared no type.
    pub fn receipt_format(&self) -> Option<ReceiptFormat> {
        if self.mime_type.trim().is_empty() {
            ReceiptFormat::from_extension(&self.name)
        } else {
            ReceiptFormat::from_mime_type(&self.mime_type)
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.receipt_format().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_mime_types() {
        for (name, mime_type) in [
            ("testImage.jpeg", "image/jpeg"),
            ("testImage.jpg", "image/jpg"),
            ("testImage.png", "image/png"),
            ("UPPER.PNG", "IMAGE/PNG"),
        ] {
            let file = SelectedFile::new(name, mime_type, b"newFile".to_vec());
            assert!(file.is_accepted(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_rejected_mime_types() {
        let file = SelectedFile::new("textFile.txt", "text/txt", b"newFile".to_vec());
        assert!(!file.is_accepted());
        let file = SelectedFile::new("facture.pdf", "application/pdf", Vec::new());
        assert!(file.receipt_format().is_none());
    }

    #[test]
    fn test_extension_used_without_declared_type() {
        let file = SelectedFile::new("receipt.jpg", "", Vec::new());
        assert_eq!(file.receipt_format(), Some(ReceiptFormat::Jpg));
        let file = SelectedFile::new("receipt.gif", "", Vec::new());
        assert!(!file.is_accepted());
        let file = SelectedFile::new("receipt", "", Vec::new());
        assert!(!file.is_accepted());
    }

    #[tokio::test]
    async fn test_load_guesses_mime_type() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("receipt.png");
        crate::utils::write(&path, b"png bytes").await.unwrap();

        let file = SelectedFile::load(&path, None).await.unwrap();
        assert_eq!(file.name(), "receipt.png");
        assert_eq!(file.mime_type(), "image/png");
        assert_eq!(file.content(), b"png bytes");

        let file = SelectedFile::load(&path, Some("text/plain")).await.unwrap();
        assert!(!file.is_accepted());
    }
}

use super::Entry;

#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub image: Option<String>,
}

impl Notification {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            image: entry.image.clone(),
        }
    }

    /// Format: "{title} {image (if any)}"
    pub fn format(&self) -> String {
        let mut message = self.title.clone();

        if let Some(image) = &self.image {
            message.push(' ');
            message.push_str(image);
        }

        message
    }
}

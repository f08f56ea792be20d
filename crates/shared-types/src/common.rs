use serde::{Deserialize, Serialize};

/// A link to another record. The API returns either the bare id or a
/// populated summary object, depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Id(String),
    Populated(RecordSummary),
}

/// Populated form of a [`Reference`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, alias = "nome", alias = "title", alias = "titulo")]
    pub label: Option<String>,
}

impl Reference {
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Populated(summary) => &summary.id,
        }
    }

    /// Human label, falling back to the id.
    pub fn label(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Populated(summary) => summary.label.as_deref().unwrap_or(&summary.id),
        }
    }
}

impl From<&str> for Reference {
    fn from(id: &str) -> Self {
        Reference::Id(id.to_string())
    }
}

/// Paginated list envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// Wrap an unpaginated list as a single page.
    pub fn single(data: Vec<T>) -> Self {
        let total = data.len() as u64;
        Self {
            data,
            total,
            page: 1,
            total_pages: 1,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Collection responses: some endpoints paginate, others return a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_page(self) -> Page<T> {
        match self {
            Listing::Paged(page) => page,
            Listing::Bare(items) => Page::single(items),
        }
    }
}

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, 100),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        let status = status.into();
        self.status = if status.is_empty() { None } else { Some(status) };
        self
    }
}

/// Clamp a requested page into `1..=total_pages`. An empty listing still
/// has page 1.
pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    requested.clamp(1, total_pages.max(1))
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

/// A file picked in a form, sent as one multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn is_audio(&self) -> bool {
        self.content_type.starts_with("audio/")
    }
}

/// Best-effort MIME type from a file name, for browsers that omit it.
pub fn mime_from_filename(name: &str) -> String {
    let ext = name.rsplit('.').next().unwrap_or_default().to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// True when the value is empty after trimming whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Lowercase and strip Portuguese diacritics, for comparisons that must not
/// depend on how a user typed a word ("Vítima" == "vitima").
pub fn normalize_text(value: &str) -> String {
    value
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_accepts_bare_id_and_populated_object() {
        let bare: Reference = serde_json::from_str(r#""abc123""#).unwrap();
        assert_eq!(bare.id(), "abc123");
        assert_eq!(bare.label(), "abc123");

        let populated: Reference =
            serde_json::from_str(r#"{"_id":"u1","nome":"Dra. Lima"}"#).unwrap();
        assert_eq!(populated.id(), "u1");
        assert_eq!(populated.label(), "Dra. Lima");

        let titled: Reference = serde_json::from_str(r#"{"id":"c9","title":"Caso Ponte"}"#).unwrap();
        assert_eq!(titled.id(), "c9");
        assert_eq!(titled.label(), "Caso Ponte");
    }

    #[test]
    fn listing_accepts_page_or_bare_array() {
        let paged: Listing<u32> =
            serde_json::from_str(r#"{"data":[1,2],"total":12,"page":2,"totalPages":6}"#).unwrap();
        let page = paged.into_page();
        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.total, 12);
        assert!(page.has_next());
        assert!(page.has_prev());

        let bare: Listing<u32> = serde_json::from_str("[4,5,6]").unwrap();
        let page = bare.into_page();
        assert_eq!(page.total, 3);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn page_query_clamps_and_drops_empty_status() {
        let q = PageQuery::new(0, 500).with_status("");
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 100);
        assert!(q.status.is_none());
        let json = serde_json::to_value(&q).unwrap();
        assert!(json.get("status").is_none());
    }

    #[test]
    fn clamp_page_follows_a_shrinking_listing() {
        assert_eq!(clamp_page(3, 1), 1);
        assert_eq!(clamp_page(3, 0), 1);
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(clamp_page(2, 4), 2);
    }

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize_text("  Vítima IDENTIFICADA "), "vitima identificada");
        assert_eq!(normalize_text("Perícia"), "pericia");
        assert_eq!(normalize_text("São João"), "sao joao");
    }

    #[test]
    fn mime_guess() {
        assert_eq!(mime_from_filename("foto.JPG"), "image/jpeg");
        assert_eq!(mime_from_filename("depoimento.mp3"), "audio/mpeg");
        assert_eq!(mime_from_filename("sem_extensao"), "application/octet-stream");
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("  \n"));
        assert!(!is_blank(" x "));
    }
}

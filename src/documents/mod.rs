//! Study documents: upload validation, upload progress rows and the
//! dashboard summary.

use crate::api::ApiResult;
use crate::models::Document;
use crate::util::format_bytes;
use std::future::Future;

pub(crate) const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

pub(crate) const ALLOWED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// `accept` attribute for the file picker.
pub(crate) const ACCEPT_ATTR: &str = ".pdf,.txt,.doc,.docx";

pub(crate) const UPLOAD_SUCCESS: &str = "Document uploaded successfully!";
pub(crate) const UPLOAD_FAILURE: &str = "Failed to upload document. Please try again.";
pub(crate) const DELETE_SUCCESS: &str = "Document deleted successfully";
pub(crate) const DELETE_FAILURE: &str = "Failed to delete document";
pub(crate) const LOAD_FAILURE: &str = "Failed to load documents";

/// How long a finished upload row stays visible.
pub(crate) const FINISHED_ROW_MS: i32 = 2000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum UploadRejection {
    Empty,
    TooLarge,
    UnsupportedType,
}

impl UploadRejection {
    pub fn message(&self) -> &'static str {
        match self {
            UploadRejection::Empty => "File is empty",
            UploadRejection::TooLarge => "File size must be less than 5MB",
            UploadRejection::UnsupportedType => {
                "Only PDF, TXT, DOC, and DOCX files are supported"
            }
        }
    }
}

impl std::fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Checked before any request is made.
pub(crate) fn validate_upload(name: &str, size: u64, mime: &str) -> Result<(), UploadRejection> {
    if size == 0 || name.trim().is_empty() {
        return Err(UploadRejection::Empty);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge);
    }
    if !ALLOWED_MIME_TYPES.contains(&mime.trim()) {
        return Err(UploadRejection::UnsupportedType);
    }
    Ok(())
}

/// Object name in the document bucket: `<millis>-<file name>`.
pub(crate) fn storage_object_name(now_ms: i64, file_name: &str) -> String {
    format!("{}-{}", now_ms, file_name)
}

/// Short label for the file type column.
pub(crate) fn file_type_label(mime: &str) -> &'static str {
    match mime {
        "application/pdf" => "PDF",
        "text/plain" => "TXT",
        "application/msword" => "DOC",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "DOCX",
        _ => "FILE",
    }
}

/// Removes a stored document: the object first, then its record. A failed
/// object removal stops there so the record keeps pointing at the file.
pub(crate) async fn remove_stored_document<O, R>(
    delete_object: impl FnOnce() -> O,
    delete_record: impl FnOnce() -> R,
) -> ApiResult<()>
where
    O: Future<Output = ApiResult<()>>,
    R: Future<Output = ApiResult<()>>,
{
    delete_object().await?;
    delete_record().await
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum UploadStatus {
    Uploading,
    Done,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UploadRow {
    pub id: u64,
    pub name: String,
    pub size: u64,
    pub status: UploadStatus,
}

/// Per-file upload progress shown under the drop zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct UploadRows {
    next_id: u64,
    rows: Vec<UploadRow>,
}

impl UploadRows {
    pub fn start(&mut self, name: &str, size: u64) -> u64 {
        self.next_id += 1;
        self.rows.push(UploadRow {
            id: self.next_id,
            name: name.to_string(),
            size,
            status: UploadStatus::Uploading,
        });
        self.next_id
    }

    pub fn finish(&mut self, id: u64, status: UploadStatus) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.status = status;
        }
    }

    pub fn remove(&mut self, id: u64) {
        self.rows.retain(|r| r.id != id);
    }

    pub fn rows(&self) -> &[UploadRow] {
        &self.rows
    }

    pub fn in_flight(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == UploadStatus::Uploading)
            .count()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct DashboardStats {
    pub folder_count: usize,
    pub document_count: usize,
    pub storage_used: u64,
    pub recent: Vec<Document>,
}

impl DashboardStats {
    pub const RECENT_LIMIT: usize = 5;

    pub fn compute(folder_count: usize, documents: &[Document]) -> Self {
        let mut recent = documents.to_vec();
        // ISO-8601 timestamps order lexicographically.
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(Self::RECENT_LIMIT);

        Self {
            folder_count,
            document_count: documents.len(),
            storage_used: documents.iter().map(|d| d.size).sum(),
            recent,
        }
    }

    pub fn storage_label(&self) -> String {
        format_bytes(self.storage_used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::cell::RefCell;
    use std::sync::Arc;
    use std::task::{Context, Poll, Wake, Waker};

    /// Drives a future whose inner futures are all immediately ready.
    fn block_on<F: Future>(fut: F) -> F::Output {
        struct Noop;
        impl Wake for Noop {
            fn wake(self: Arc<Self>) {}
        }
        let waker = Waker::from(Arc::new(Noop));
        let mut cx = Context::from_waker(&waker);
        let mut fut = std::pin::pin!(fut);
        loop {
            if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
                return out;
            }
        }
    }

    fn doc(id: &str, size: u64, created_at: &str) -> Document {
        Document {
            id: id.into(),
            title: format!("{id}.pdf"),
            file_path: format!("1700000000000-{id}.pdf"),
            file_type: "application/pdf".into(),
            size,
            created_at: created_at.into(),
        }
    }

    #[test]
    fn test_validate_accepts_allowed_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert_eq!(validate_upload("notes", 1024, mime), Ok(()));
        }
    }

    #[test]
    fn test_validate_rejects_large_files() {
        assert_eq!(
            validate_upload("big.pdf", MAX_UPLOAD_BYTES + 1, "application/pdf"),
            Err(UploadRejection::TooLarge)
        );
        assert_eq!(
            validate_upload("edge.pdf", MAX_UPLOAD_BYTES, "application/pdf"),
            Ok(())
        );
    }

    #[test]
    fn test_validate_rejects_other_types() {
        let err = validate_upload("photo.png", 10, "image/png").unwrap_err();
        assert_eq!(err, UploadRejection::UnsupportedType);
        assert_eq!(
            err.to_string(),
            "Only PDF, TXT, DOC, and DOCX files are supported"
        );
        assert_eq!(
            validate_upload("x", 10, ""),
            Err(UploadRejection::UnsupportedType)
        );
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_eq!(
            validate_upload("a.txt", 0, "text/plain"),
            Err(UploadRejection::Empty)
        );
    }

    #[test]
    fn test_storage_object_name() {
        assert_eq!(
            storage_object_name(1700000000000, "My Notes.pdf"),
            "1700000000000-My Notes.pdf"
        );
    }

    #[test]
    fn test_upload_rows_lifecycle() {
        let mut rows = UploadRows::default();
        let a = rows.start("a.pdf", 10);
        let b = rows.start("b.txt", 20);
        assert_eq!(rows.in_flight(), 2);

        rows.finish(a, UploadStatus::Done);
        rows.finish(b, UploadStatus::Failed("offline".into()));
        assert_eq!(rows.in_flight(), 0);

        rows.remove(a);
        assert_eq!(rows.rows().len(), 1);
        assert_eq!(rows.rows()[0].status, UploadStatus::Failed("offline".into()));
    }

    #[test]
    fn test_dashboard_stats() {
        let docs: Vec<Document> = (0..7)
            .map(|i| doc(&format!("d{i}"), 1024 * 1024, &format!("2024-01-0{}T00:00:00Z", i + 1)))
            .collect();
        let stats = DashboardStats::compute(3, &docs);

        assert_eq!(stats.folder_count, 3);
        assert_eq!(stats.document_count, 7);
        assert_eq!(stats.storage_label(), "7.0 MB");
        assert_eq!(stats.recent.len(), DashboardStats::RECENT_LIMIT);
        assert_eq!(stats.recent[0].id, "d6");
    }

    #[test]
    fn test_dashboard_stats_empty() {
        let stats = DashboardStats::compute(0, &[]);
        assert_eq!(stats.document_count, 0);
        assert_eq!(stats.storage_label(), "0 B");
        assert!(stats.recent.is_empty());
    }

    #[test]
    fn test_file_type_label() {
        assert_eq!(file_type_label("application/pdf"), "PDF");
        assert_eq!(file_type_label("image/png"), "FILE");
    }

    #[test]
    fn test_failed_object_removal_keeps_record() {
        let log = RefCell::new(Vec::new());
        let calls = &log;
        let result = block_on(remove_stored_document(
            move || async move {
                calls.borrow_mut().push("object");
                Err(ApiError::fetch(500, "", "Failed to remove stored file"))
            },
            move || async move {
                calls.borrow_mut().push("record");
                Ok(())
            },
        ));
        assert!(result.is_err());
        assert_eq!(*log.borrow(), vec!["object"]);
    }

    #[test]
    fn test_removal_deletes_object_then_record() {
        let log = RefCell::new(Vec::new());
        let calls = &log;
        let result = block_on(remove_stored_document(
            move || async move {
                calls.borrow_mut().push("object");
                Ok(())
            },
            move || async move {
                calls.borrow_mut().push("record");
                Ok(())
            },
        ));
        assert!(result.is_ok());
        assert_eq!(*log.borrow(), vec!["object", "record"]);
    }
}

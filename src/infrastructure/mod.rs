pub mod memory_index;
pub mod search_index;

pub use memory_index::MemoryIndex;
pub use search_index::{fetch_document_by_id, fetch_documents_by_id, DocumentStore, SearchIndex};

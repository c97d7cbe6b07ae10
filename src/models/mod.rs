pub mod fields;
pub mod index_row;
pub mod member;
pub mod query;
pub mod solr_document;

pub use index_row::IndexRow;
pub use member::{ordered_difference, ordered_intersection, MemberKind};
pub use query::{is_queryable_value, is_terms_value, Filter, SolrQuery};
pub use solr_document::SolrDocument;

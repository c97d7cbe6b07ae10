pub mod solr_client;

pub use solr_client::SolrClient;

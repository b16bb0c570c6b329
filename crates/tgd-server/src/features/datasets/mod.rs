//! Datasets: line collections with filtered views, statistics and tags

pub mod commands;
pub mod queries;
pub mod routes;
pub mod sql;
pub mod types;

pub use commands::{
    AddDatasetTagCommand, AddLinesCommand, CreateDatasetCommand, DeleteDatasetCommand,
    RemoveDatasetTagCommand, UpdateDatasetCommand,
};

pub use queries::{
    DatasetDetailQuery, DatasetListItem, DownloadDatasetQuery, GetDatasetQuery, ListDatasetsQuery,
    ListDatasetsResponse, SearchDatasetsQuery, SubsetViewQuery,
};

pub use routes::{datasets_routes, search_routes, tags_routes};

pub use types::{DatasetRecord, DatasetStats, FilterParams, LineRecord, TagRecord};

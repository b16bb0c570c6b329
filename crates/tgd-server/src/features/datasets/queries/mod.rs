pub mod count;
pub mod dataset_tags;
pub mod detail;
pub mod download;
pub mod filtered;
pub mod get;
pub mod lines;
pub mod list;
pub mod search;
pub mod stats;
pub mod subset;
pub mod tags;

pub use count::{CountDatasetsError, CountDatasetsQuery, CountDatasetsResponse};
pub use dataset_tags::{DatasetTagsError, DatasetTagsQuery};
pub use detail::{DatasetDetailError, DatasetDetailQuery, DatasetDetailResponse};
pub use download::{DownloadDatasetError, DownloadDatasetQuery, DownloadDatasetResponse};
pub use filtered::{FilteredLinesError, FilteredLinesQuery};
pub use get::{GetDatasetError, GetDatasetQuery, GetDatasetResponse};
pub use lines::{ListLinesError, ListLinesQuery};
pub use list::{DatasetListItem, ListDatasetsError, ListDatasetsQuery, ListDatasetsResponse};
pub use search::{SearchDatasetsError, SearchDatasetsQuery};
pub use stats::{DatasetStatsError, DatasetStatsQuery};
pub use subset::{SubsetViewError, SubsetViewQuery, SubsetViewResponse, DEFAULT_SUBSET_LIMIT};
pub use tags::{ListTagsError, ListTagsQuery};

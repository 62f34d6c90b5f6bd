// src/config/consts.rs

// Remote source
pub const BASE_URL: &str = "https://pbcpao.gov/Property/Details";
pub const ID_PARAM: &str = "parcelId";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("papa_scrape/", env!("CARGO_PKG_VERSION"));

// Input table
pub const ID_COLUMN: usize = 5; // parcel control number in the owner export

// Document store
pub const DOC_EXT: &str = "html";

// Parsing
pub const PLACEHOLDER: &str = "N/A";
pub const OWNERS_LABEL: &str = "Owner(s)";
pub const HEADER_ROW_CLASS: &str = "table_header";

// Element ids of the single-value fields, in output column order
pub const ID_LOCATION: &str = "MainContent_lblLocation";
pub const ID_MUNICIPALITY: &str = "MainContent_lblMunicipality";
pub const ID_PCN: &str = "MainContent_lblPCN";
pub const ID_SUBDIVISION: &str = "MainContent_lblSubdiv";
pub const ID_SALE_DATE: &str = "MainContent_lblSaleDate";
pub const ID_LEGAL_DESC: &str = "MainContent_lblLegalDesc";

// Output table
pub const OUTPUT_HEADERS: [&str; 7] = [
    "Owner(s)",
    "Property Address",
    "Municipality",
    "Parcel Control Number",
    "Subdivision",
    "Sale Date",
    "Legal Description",
];

// Defaults
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_HTML_SUBDIR: &str = "html";
pub const DEFAULT_OUTPUT_FILE: &str = "updated_owners";

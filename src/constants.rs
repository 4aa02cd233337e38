/// Default base URL of the Moscow Exchange ISS API
pub const DEFAULT_ISS_BASE_URL: &str = "https://iss.moex.com/iss";
/// Default timeout in seconds for ISS requests
pub const DEFAULT_ISS_TIMEOUT_SECS: u64 = 30;
/// User agent string used in HTTP requests to identify this client to the ISS API
pub const USER_AGENT: &str = "moex-coupons/0.1.0";
/// Sentinel used for string attributes the upstream data left empty
pub const NOT_AVAILABLE: &str = "N/A";
/// Default number of retries on throttled or failed ISS requests
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default delay in seconds between retries
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
/// Number of monthly buckets in a report row
pub const MONTHS_IN_YEAR: usize = 12;
/// Bond identifiers reported when no explicit list is configured
pub const DEFAULT_ISINS: [&str; 24] = [
    "SU26238RMFS4",
    "SU26233RMFS5",
    "SU26240RMFS0",
    "SU26218RMFS6",
    "SU26230RMFS1",
    "SU26225RMFS1",
    "RU000A106HB4",
    "RU000A104JQ3",
    "RU000A107MM9",
    "RU000A102T63",
    "RU000A103PX8",
    "SU26207RMFS9",
    "SU26219RMFS4",
    "SU26226RMFS9",
    "SU26229RMFS3",
    "SU26232RMFS7",
    "SU26243RMFS4",
    "SU29014RMFS6",
    "SU29016RMFS1",
    "SU29022RMFS9",
    "SU29025RMFS2",
    "RU000A106K43",
    "RU000A103D37",
    "RU000A106516",
];

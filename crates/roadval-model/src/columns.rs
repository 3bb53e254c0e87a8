//! Column names the cross-table and sequence rules depend on.

/// Table supplying the shared Link reference.
pub const REFERENCE_TABLE: &str = "Link";

pub const LINK_NO: &str = "Link_No";
pub const PROVINCE_CODE: &str = "Province_Code";
pub const KABUPATEN_CODE: &str = "Kabupaten_Code";
pub const YEAR: &str = "Year";

pub const CHAINAGE_FROM: &str = "ChainageFrom";
pub const CHAINAGE_TO: &str = "ChainageTo";
pub const CHAINAGE_RB: &str = "Chainage_RB";

pub const LINK_LENGTH_OFFICIAL: &str = "Link_Length_Official";
pub const LINK_LENGTH_ACTUAL: &str = "Link_Length_Actual";

pub const GPS_NORTH: [&str; 3] = [
    "GPSPoint_North_Deg",
    "GPSPoint_North_Min",
    "GPSPoint_North_Sec",
];
pub const GPS_EAST: [&str; 3] = [
    "GPSPoint_East_Deg",
    "GPSPoint_East_Min",
    "GPSPoint_East_Sec",
];

/// Grouping key for chainage continuity.
pub const CONTINUITY_GROUP: [&str; 3] = [PROVINCE_CODE, KABUPATEN_CODE, YEAR];

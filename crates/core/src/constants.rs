/// Number of track IDs returned in one ticker window unless configured otherwise.
pub const DEFAULT_TICKER_CAP: usize = 5;

/// Trigger threshold used when a subscription does not specify one.
pub const DEFAULT_MIN_TRIGGER_VALUE: i32 = 1;

/// Track sources must point at a file with this extension.
pub const IGC_FILE_EXTENSION: &str = ".igc";

/// Mean Earth radius in kilometres, used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

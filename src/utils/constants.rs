/// Missing-observation sentinel as transmitted by the subset service.
/// Must be masked out before any unit conversion.
pub const MISSING_SENTINEL: f64 = -9999.0;

/// Celsius to Fahrenheit conversion
pub const FAHRENHEIT_SCALE: f64 = 1.8;
pub const FAHRENHEIT_OFFSET: f64 = 32.0;

/// NetCDF Subset Service defaults
pub const DEFAULT_NCSS_URL: &str =
    "https://thredds.ucar.edu/thredds/ncss/nc/metar/ncdecoded/Metar_Station_Data_fc.cdmr";
pub const DEFAULT_VARIABLE: &str = "air_temperature";

/// CSV column names in the subset service response
pub const COL_STATION: &str = "station";
pub const COL_TIME: &str = "time";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";

/// Default temperature threshold schedule (degrees Fahrenheit)
pub const DEFAULT_LEVELS: [f64; 8] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0];
pub const DEFAULT_COLORS: [&str; 8] = [
    "purple", "blue", "cyan", "green", "yellow", "orange", "red", "magenta",
];

/// Continental US bounds (west, east, south, north)
pub const CONUS_WEST: f64 = -125.0;
pub const CONUS_EAST: f64 = -65.0;
pub const CONUS_SOUTH: f64 = 23.0;
pub const CONUS_NORTH: f64 = 52.0;

/// Render defaults
pub const DEFAULT_PLOT_WIDTH: u32 = 1600;
pub const DEFAULT_PLOT_HEIGHT: u32 = 900;
pub const DEFAULT_FONT_SIZE: u32 = 14;

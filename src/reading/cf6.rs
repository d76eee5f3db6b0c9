//! CF6 monthly climate report parsing.
//!
//! A CF6 report is a plain-text product with one fixed-column line per day
//! of the month. The product body begins after a `000` line; everything
//! before it (and any header or summary line after it) is ignored.

use std::sync::OnceLock;

use anyhow::Result;
use regex::{Captures, Regex};
use reqwest::Url;

use super::date_key::last_day_of_month;

pub const CF6_URL: &str = "http://www.nws.noaa.gov/climate/getclimate.php";

const BODY_SENTINEL: &str = "000";

// A number, or one of the report's placeholder codes (missing, trace, ...).
const VALUE: &str = r"(?:-?\d+(?:\.\d+)?|[MTX-])";

const COLUMNS: [&str; 15] = [
    "max",
    "min",
    "avg",
    "departure",
    "heating",
    "cooling",
    "precip",
    "snowfall",
    "snow_depth",
    "avg_wind",
    "max_wind",
    "max_wind_dir",
    "sun_minutes",
    "sun_percent",
    "sky_cover",
];

#[derive(Debug, Clone)]
/// The weather office and station a CF6 report is requested for.
pub struct Station {
    pub wfo: String,
    pub sid: String,
}

impl Station {
    pub fn new(wfo: &str, sid: &str) -> Self {
        Station {
            wfo: wfo.to_string(),
            sid: sid.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// One day of a CF6 report. Values are kept exactly as printed.
pub struct Cf6Day {
    pub day: u32,
    pub max: String,
    pub min: String,
    pub avg: String,
    pub departure: String,
    pub heating: String,
    pub cooling: String,
    pub precip: String,
    pub snowfall: String,
    pub snow_depth: String,
    pub avg_wind: String,
    pub max_wind: String,
    pub max_wind_dir: String,
    pub sun_minutes: String,
    pub sun_percent: String,
    pub sky_cover: String,
    pub weather: String,
    pub peak_wind: String,
    pub peak_wind_dir: String,
}

impl Cf6Day {
    /// Matches a single report line, `None` if it isn't a day line.
    ///
    /// Every column through peak wind direction must be present; a line cut
    /// off earlier is not a day line.
    pub fn from_line(line: &str) -> Option<Self> {
        let caps = day_pattern().captures(line)?;
        let day = caps["day"].parse().ok()?;
        let field = |name: &str| caps.name(name).map_or("", |m| m.as_str()).to_string();

        Some(Cf6Day {
            day,
            max: field("max"),
            min: field("min"),
            avg: field("avg"),
            departure: field("departure"),
            heating: field("heating"),
            cooling: field("cooling"),
            precip: field("precip"),
            snowfall: field("snowfall"),
            snow_depth: field("snow_depth"),
            avg_wind: field("avg_wind"),
            max_wind: field("max_wind"),
            max_wind_dir: field("max_wind_dir"),
            sun_minutes: field("sun_minutes"),
            sun_percent: field("sun_percent"),
            sky_cover: field("sky_cover"),
            weather: weather_codes(&caps),
            peak_wind: field("peak_wind"),
            peak_wind_dir: field("peak_wind_dir"),
        })
    }
}

fn weather_codes(caps: &Captures) -> String {
    caps.name("weather")
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn day_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();

    PATTERN.get_or_init(|| {
        let columns = COLUMNS
            .iter()
            .map(|name| format!(r"(?P<{}>{})", name, VALUE))
            .collect::<Vec<_>>()
            .join(r"\s+");
        let pattern = format!(
            r"^\s*(?P<day>\d{{1,2}})\s+{columns}(?:\s+(?P<weather>[0-9X]+(?:\s[0-9X]+)*))?\s+(?P<peak_wind>{value})\s+(?P<peak_wind_dir>{value})\s*$",
            columns = columns,
            value = VALUE,
        );

        Regex::new(&pattern).expect("CF6 day pattern is valid")
    })
}

/// Parses every day line that follows the `000` body marker.
pub fn parse_report<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Cf6Day> {
    lines
        .into_iter()
        .skip_while(|line| line.trim() != BODY_SENTINEL)
        .skip(1)
        .filter_map(Cf6Day::from_line)
        .collect()
}

/// Builds the report query for a month, stamped with the month's last day.
pub fn cf6_url(base: &str, station: &Station, year: i32, month: u32) -> Result<Url> {
    let specdate = last_day_of_month(year, month)?
        .and_hms_opt(0, 0, 0)
        .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();

    let url = Url::parse_with_params(
        base,
        &[
            ("date", ""),
            ("wfo", station.wfo.as_str()),
            ("sid", station.sid.as_str()),
            ("pil", "CF6"),
            ("recent", "no"),
            ("specdate", specdate.as_str()),
        ],
    )?;

    Ok(url)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    const REPORT: &str = "\
 1  47  33  40   2  25   0 0.00  0.0    0 10.2 21 270   M    M   3        28 270
000
CXUS51 KBOX 011200
CF6BOS
PRELIMINARY LOCAL CLIMATOLOGICAL DATA (WS FORM: F-6)

                                          STATION:   BOSTON MA
                                          MONTH:     MARCH
                                          YEAR:      2012

  TEMPERATURE IN F:   :PCPN:    SNOW:  WIND   :SUNSHINE: SKY   :PK WND
================================================================================
1   2   3   4   5  6A  6B    7    8   9  10   11  12  13  14  15   16   17  18
                                          AVG MX 2MIN
DY MAX MIN AVG DEP HDD CDD  WTR  SNW DPTH SPD SPD DIR MIN PSBL S-S WX    SPD DR
================================================================================
 1  47  33  40   2  25   0 0.00  0.0    0 10.2 21 270   M    M   3        28 270
 2  52  35  44   5  21   0 0.31  0.0    0 12.0 26 240   M    M   8 1      35 250
 3  44  30  37  -2  28   0    T    T    0 14.1 28 300   M    M   6 18     39 300
 4   M  29   M   M   M   M    M    M    M  9.5 17 310   M    M   2 1 8    24 320
================================================================================
SM 1544  985        ...
";

    #[test]
    fn should_parse_day_line() {
        let line = " 2  52  35  44   5  21   0 0.31  0.0    0 12.0 26 240   M    M   8 1      35 250";
        let day = Cf6Day::from_line(line).unwrap();

        assert_eq!(day.day, 2);
        assert_eq!(day.max, "52");
        assert_eq!(day.min, "35");
        assert_eq!(day.avg, "44");
        assert_eq!(day.departure, "5");
        assert_eq!(day.precip, "0.31");
        assert_eq!(day.sun_minutes, "M");
        assert_eq!(day.sky_cover, "8");
        assert_eq!(day.weather, "1");
        assert_eq!(day.peak_wind, "35");
        assert_eq!(day.peak_wind_dir, "250");
    }

    #[test]
    fn should_parse_line_without_weather_codes() {
        let line = " 1  47  33  40   2  25   0 0.00  0.0    0 10.2 21 270   M    M   3        28 270";
        let day = Cf6Day::from_line(line).unwrap();

        assert_eq!(day.weather, "");
        assert_eq!(day.peak_wind, "28");
        assert_eq!(day.peak_wind_dir, "270");
    }

    #[test]
    fn should_pass_placeholders_through() {
        let line = " 3  44  30  37  -2  28   0    T    T    0 14.1 28 300   M    M   6 18     39 300";
        let day = Cf6Day::from_line(line).unwrap();

        assert_eq!(day.departure, "-2");
        assert_eq!(day.precip, "T");
        assert_eq!(day.snowfall, "T");
        assert_eq!(day.weather, "18");
    }

    #[test]
    fn should_skip_lines_with_bad_columns() {
        let letters = " 5  4x  30  37  -2  28   0 0.00  0.0    0 14.1 28 300   M    M   6        39 300";
        let header = "1   2   3   4   5  6A  6B    7    8   9  10   11  12  13  14  15   16   17  18";

        assert!(Cf6Day::from_line(letters).is_none());
        assert!(Cf6Day::from_line(header).is_none());
        assert!(Cf6Day::from_line("").is_none());
    }

    #[test]
    fn should_skip_truncated_day_line() {
        let line = "30  45  33  39   1  26   0 0.00  0.0    0  7.5 17 280   M    M   6";

        assert!(Cf6Day::from_line(line).is_none());
    }

    #[test]
    fn should_parse_days_after_sentinel() {
        let days = parse_report(REPORT.lines());

        assert_eq!(days.len(), 4);
        for (idx, day) in days.iter().enumerate() {
            assert_eq!(day.day as usize, idx + 1);
        }
        assert_eq!(days[3].max, "M");
        assert_eq!(days[3].weather, "1 8");
    }

    #[test]
    fn should_ignore_everything_without_sentinel() {
        let report = " 1  47  33  40   2  25   0 0.00  0.0    0 10.2 21 270   M    M   3        28 270";

        assert!(parse_report(report.lines()).is_empty());
    }

    #[test]
    fn should_make_cf6_url() {
        let station = Station::new("BOX", "BOS");
        let url = cf6_url(CF6_URL, &station, 2012, 2).unwrap();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.path(), "/climate/getclimate.php");
        assert!(query.contains(&("wfo".to_string(), "BOX".to_string())));
        assert!(query.contains(&("sid".to_string(), "BOS".to_string())));
        assert!(query.contains(&("pil".to_string(), "CF6".to_string())));
        assert!(query.contains(&("specdate".to_string(), "2012-02-29 00:00:00".to_string())));
    }
}

//! Minimal IGC flight-recorder parser.
//!
//! Only the records the track store needs are read: the `H` header records
//! for date, pilot and glider, and the `B` fix records for track geometry.
//! Everything else (`A`, `I`, `L`, `G`, ...) is skipped.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::constants::EARTH_RADIUS_KM;
use crate::errors::{Error, Result};

/// Shortest B record we can read a position from:
/// `B` + HHMMSS + DDMMmmm(N|S) + DDDMMmmm(E|W) + validity.
const MIN_B_RECORD_LEN: usize = 25;

/// A single GPS fix, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
}

impl Fix {
    /// Great-circle distance to `other` in kilometres (haversine).
    pub fn distance_km(&self, other: &Fix) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// Parsed content of an IGC file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IgcFlight {
    pub date: Option<NaiveDate>,
    pub pilot: String,
    pub glider_type: String,
    pub glider_id: String,
    pub fixes: Vec<Fix>,
}

impl IgcFlight {
    /// Sum of the distances between consecutive fixes, in kilometres.
    pub fn track_length(&self) -> f64 {
        self.fixes
            .windows(2)
            .map(|pair| pair[0].distance_km(&pair[1]))
            .sum()
    }

    /// Flight date rendered as an RFC 3339 timestamp at midnight UTC.
    pub fn header_date(&self) -> Option<String> {
        self.date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt).to_rfc3339())
    }
}

pub fn parse_igc(content: &str) -> Result<IgcFlight> {
    let mut flight = IgcFlight::default();
    let mut recognised_records = 0usize;

    for raw_line in content.lines() {
        let line = raw_line.trim_end();
        match line.chars().next() {
            Some('A') => recognised_records += 1,
            Some('H') => {
                recognised_records += 1;
                parse_header(line, &mut flight);
            }
            Some('B') => {
                recognised_records += 1;
                if let Some(fix) = parse_fix(line) {
                    flight.fixes.push(fix);
                }
            }
            _ => {}
        }
    }

    if recognised_records == 0 {
        return Err(Error::Extraction(
            "content does not contain any IGC records".to_string(),
        ));
    }
    if flight.date.is_none() {
        return Err(Error::Extraction(
            "IGC file has no HFDTE date record".to_string(),
        ));
    }

    Ok(flight)
}

fn parse_header(line: &str, flight: &mut IgcFlight) {
    // H + source (F/O/P) + three letter code, e.g. "HFPLTPILOTINCHARGE:Jane"
    let Some(code) = line.get(2..5) else {
        return;
    };
    let value = match line.find(':') {
        Some(idx) => line[idx + 1..].trim(),
        None => line.get(5..).unwrap_or_default().trim(),
    };

    match code {
        "DTE" => flight.date = parse_header_date(value),
        "PLT" => flight.pilot = value.to_string(),
        "GTY" => flight.glider_type = value.to_string(),
        "GID" => flight.glider_id = value.to_string(),
        _ => {}
    }
}

/// Accepts both `HFDTE280709` and `HFDTEDATE:280709,01`.
fn parse_header_date(value: &str) -> Option<NaiveDate> {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    let ddmmyy = digits.get(..6)?;
    NaiveDate::parse_from_str(ddmmyy, "%d%m%y").ok()
}

fn parse_fix(line: &str) -> Option<Fix> {
    if line.len() < MIN_B_RECORD_LEN || !line.is_ascii() {
        return None;
    }
    let latitude = parse_coordinate(&line[7..9], &line[9..14], &line[14..15], 'S')?;
    let longitude = parse_coordinate(&line[15..18], &line[18..23], &line[23..24], 'W')?;
    Some(Fix {
        latitude,
        longitude,
    })
}

/// `degrees` + `minutes` given as MMmmm (thousandths of a minute).
fn parse_coordinate(degrees: &str, minutes: &str, hemisphere: &str, negative: char) -> Option<f64> {
    let deg: f64 = degrees.parse().ok()?;
    let min: f64 = minutes.parse::<f64>().ok()? / 1000.0;
    let value = deg + min / 60.0;
    if hemisphere.starts_with(negative) {
        Some(-value)
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "AXGD Flymaster\r\n\
HFDTE190216\r\n\
HFPLTPILOTINCHARGE: Miguel Angel Gordillo\r\n\
HFGTYGLIDERTYPE:RV8\r\n\
HFGIDGLIDERID:EC-XLL\r\n\
B1101355206343N00006198WA0058700558\r\n\
B1101455206259N00006295WA0059300556\r\n\
B1101555206300N00006061WA0060300576\r\n";

    #[test]
    fn test_parse_headers() {
        let flight = parse_igc(SAMPLE).unwrap();
        assert_eq!(flight.pilot, "Miguel Angel Gordillo");
        assert_eq!(flight.glider_type, "RV8");
        assert_eq!(flight.glider_id, "EC-XLL");
        assert_eq!(flight.date, NaiveDate::from_ymd_opt(2016, 2, 19));
        assert_eq!(
            flight.header_date().as_deref(),
            Some("2016-02-19T00:00:00+00:00")
        );
    }

    #[test]
    fn test_parse_fixes_and_length() {
        let flight = parse_igc(SAMPLE).unwrap();
        assert_eq!(flight.fixes.len(), 3);
        assert!((flight.fixes[0].latitude - 52.10571).abs() < 1e-4);
        assert!((flight.fixes[0].longitude + 0.10330).abs() < 1e-4);

        let length = flight.track_length();
        assert!(length > 0.1 && length < 1.0, "unexpected length {}", length);
    }

    #[test]
    fn test_long_form_date_header() {
        let flight = parse_igc("HFDTEDATE:280709,01\nB1101355206343N00006198WA0058700558\n").unwrap();
        assert_eq!(flight.date, NaiveDate::from_ymd_opt(2009, 7, 28));
    }

    #[test]
    fn test_rejects_non_igc_content() {
        let err = parse_igc("<html><body>Not found</body></html>").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_rejects_missing_date() {
        let err = parse_igc("AXGD\nHFPLTPILOT:Someone\n").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_distance_one_degree_of_latitude() {
        let a = Fix {
            latitude: 0.0,
            longitude: 0.0,
        };
        let b = Fix {
            latitude: 1.0,
            longitude: 0.0,
        };
        assert!((a.distance_km(&b) - 111.19).abs() < 0.01);
    }
}

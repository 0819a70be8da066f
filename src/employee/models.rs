//! Employee record types

use serde::{Deserialize, Serialize};

/// Area code of every generated company phone number
pub const COMPANY_AREA_CODE: u16 = 312;

/// Domain of every generated email address
pub const COMPANY_EMAIL_DOMAIN: &str = "company.com";

/// Smallest 9-digit employee ID
pub const EMPLOYEE_ID_MIN: i32 = 100_000_000;
/// Largest 9-digit employee ID
pub const EMPLOYEE_ID_MAX: i32 = 999_999_999;

pub const AGE_MIN: i32 = 18;
pub const AGE_MAX: i32 = 65;

/// Ratings are drawn from `[RATING_MIN, RATING_MAX)`
pub const RATING_MIN: f32 = 0.0;
pub const RATING_MAX: f32 = 5.0;

/// Latitude/longitude box around Chicago, where employees live
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

pub const CHICAGO_BOUNDS: GeoBounds = GeoBounds {
    lat_min: 41.6445,
    lat_max: 42.023,
    lon_min: -87.9401,
    lon_max: -87.524,
};

impl GeoBounds {
    /// Finite, with each minimum at or below its maximum.
    pub fn is_valid(&self) -> bool {
        [self.lat_min, self.lat_max, self.lon_min, self.lon_max]
            .iter()
            .all(|v| v.is_finite())
            && self.lat_min <= self.lat_max
            && self.lon_min <= self.lon_max
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.lon_min..=self.lon_max).contains(&lon) && (self.lat_min..=self.lat_max).contains(&lat)
    }
}

/// Contact payload stored in both the `json` and `jsonb` columns.
///
/// Field order is the serialized key order: `email` first, then `phone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

/// Geographic point rendered as well-known text for the geometry column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// `POINT(<lon> <lat>)` with six decimals per coordinate
    pub fn to_wkt(&self) -> String {
        format!("POINT({:.6} {:.6})", self.lon, self.lat)
    }

    /// Parse the form produced by [`GeoPoint::to_wkt`].
    pub fn parse_wkt(wkt: &str) -> Option<Self> {
        let inner = wkt.strip_prefix("POINT(")?.strip_suffix(')')?;
        let mut parts = inner.split(' ');
        let lon = parts.next()?.parse().ok()?;
        let lat = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { lon, lat })
    }
}

/// One row of the `employees` table, already in bind-ready form.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub rating: f32,
    pub json_contact_info: String,
    pub bjson_contact_info: String,
    /// Well-known text, e.g. `POINT(-87.700000 41.900000)`
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wkt_format() {
        let point = GeoPoint {
            lon: -87.7,
            lat: 41.9,
        };
        assert_eq!(point.to_wkt(), "POINT(-87.700000 41.900000)");
    }

    #[test]
    fn test_parse_wkt() {
        let point = GeoPoint::parse_wkt("POINT(-87.612345 41.987654)").unwrap();
        assert_eq!(point.lon, -87.612345);
        assert_eq!(point.lat, 41.987654);

        assert!(GeoPoint::parse_wkt("POINT(1 2 3)").is_none());
        assert!(GeoPoint::parse_wkt("POINT(1)").is_none());
        assert!(GeoPoint::parse_wkt("LINESTRING(1 2)").is_none());
        assert!(GeoPoint::parse_wkt("POINT(a b)").is_none());
    }

    #[test]
    fn test_bounds_contains_edges() {
        let b = CHICAGO_BOUNDS;
        assert!(b.contains(b.lon_min, b.lat_min));
        assert!(b.contains(b.lon_max, b.lat_max));
        assert!(!b.contains(-88.0, 41.8));
        assert!(!b.contains(-87.7, 42.1));
    }

    #[test]
    fn test_contact_info_key_order() {
        let info = ContactInfo {
            email: "Ada.Lovelace@company.com".into(),
            phone: "312-555-0042".into(),
        };
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"email":"Ada.Lovelace@company.com","phone":"312-555-0042"}"#
        );
    }
}

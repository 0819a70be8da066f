//! Synthetic employee generator
//!
//! Every field is drawn independently. The PRNG is owned by the generator and
//! passed in by the caller, so a fixed seed reproduces the whole run.

use rand::Rng;
use rand::seq::SliceRandom;

use super::models::{
    AGE_MAX, AGE_MIN, CHICAGO_BOUNDS, COMPANY_AREA_CODE, COMPANY_EMAIL_DOMAIN, ContactInfo,
    EMPLOYEE_ID_MAX, EMPLOYEE_ID_MIN, EmployeeRecord, GeoBounds, GeoPoint, RATING_MAX, RATING_MIN,
};
use super::names::{FIRST_NAMES, LAST_NAMES};
use crate::error::BenchError;

pub struct EmployeeGenerator<R: Rng> {
    rng: R,
    bounds: GeoBounds,
}

impl<R: Rng> EmployeeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            bounds: CHICAGO_BOUNDS,
        }
    }

    /// Draw addresses from a different box.
    pub fn with_bounds(mut self, bounds: GeoBounds) -> Result<Self, BenchError> {
        if !bounds.is_valid() {
            return Err(BenchError::InvalidParameters(format!(
                "inverted or non-finite address bounds: {:?}",
                bounds
            )));
        }
        self.bounds = bounds;
        Ok(self)
    }

    pub fn generate(&mut self) -> EmployeeRecord {
        let employee_id = self.rng.gen_range(EMPLOYEE_ID_MIN..=EMPLOYEE_ID_MAX);
        let first_name = self.pick(FIRST_NAMES).to_string();
        let last_name = self.pick(LAST_NAMES).to_string();
        let age = self.rng.gen_range(AGE_MIN..=AGE_MAX);
        let rating = self.rng.gen_range(RATING_MIN..RATING_MAX);

        let contact = ContactInfo {
            email: format!("{}.{}@{}", first_name, last_name, COMPANY_EMAIL_DOMAIN),
            phone: format!(
                "{}-555-{:04}",
                COMPANY_AREA_CODE,
                self.rng.gen_range(0..10_000u32)
            ),
        };
        // Serializing a struct of two strings has no failure path.
        let json_contact_info = serde_json::to_string(&contact).unwrap_or_default();
        let bjson_contact_info = json_contact_info.clone();

        let point = GeoPoint {
            lat: self
                .rng
                .gen_range(self.bounds.lat_min..=self.bounds.lat_max),
            lon: self
                .rng
                .gen_range(self.bounds.lon_min..=self.bounds.lon_max),
        };

        EmployeeRecord {
            employee_id,
            first_name,
            last_name,
            age,
            rating,
            json_contact_info,
            bjson_contact_info,
            address: point.to_wkt(),
        }
    }

    /// Generate `n` independent records.
    pub fn generate_batch(&mut self, n: usize) -> Vec<EmployeeRecord> {
        (0..n).map(|_| self.generate()).collect()
    }

    /// Uniformly pick one record; `None` for an empty batch.
    pub fn sample<'a>(&mut self, batch: &'a [EmployeeRecord]) -> Option<&'a EmployeeRecord> {
        batch.choose(&mut self.rng)
    }

    /// Pick `k` records without replacement. Returns fewer if the batch is smaller.
    pub fn sample_distinct<'a>(
        &mut self,
        batch: &'a [EmployeeRecord],
        k: usize,
    ) -> Vec<&'a EmployeeRecord> {
        batch.choose_multiple(&mut self.rng, k).collect()
    }

    fn pick(&mut self, table: &'static [&'static str]) -> &'static str {
        table[self.rng.gen_range(0..table.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generator(seed: u64) -> EmployeeGenerator<StdRng> {
        EmployeeGenerator::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_field_ranges() {
        let mut employee_gen = generator(7);
        for record in employee_gen.generate_batch(2000) {
            assert!((AGE_MIN..=AGE_MAX).contains(&record.age), "age {}", record.age);
            assert!(
                record.rating >= RATING_MIN && record.rating < RATING_MAX,
                "rating {}",
                record.rating
            );
            assert_eq!(record.employee_id.to_string().len(), 9);
            assert!(!record.first_name.is_empty());
            assert!(!record.last_name.is_empty());
        }
    }

    #[test]
    fn test_contact_columns_identical() {
        let mut employee_gen = generator(11);
        for record in employee_gen.generate_batch(200) {
            assert_eq!(
                record.json_contact_info.as_bytes(),
                record.bjson_contact_info.as_bytes()
            );
        }
    }

    #[test]
    fn test_contact_info_content() {
        let mut employee_gen = generator(3);
        let record = employee_gen.generate();
        let info: ContactInfo = serde_json::from_str(&record.json_contact_info).unwrap();

        assert_eq!(
            info.email,
            format!("{}.{}@company.com", record.first_name, record.last_name)
        );
        let (prefix, suffix) = info.phone.split_at(8);
        assert_eq!(prefix, "312-555-");
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_address_inside_chicago() {
        let mut employee_gen = generator(19);
        for record in employee_gen.generate_batch(1000) {
            assert!(record.address.starts_with("POINT("));
            let point = GeoPoint::parse_wkt(&record.address)
                .unwrap_or_else(|| panic!("bad wkt {}", record.address));
            assert!(
                CHICAGO_BOUNDS.contains(point.lon, point.lat),
                "{} outside bounds",
                record.address
            );
        }
    }

    #[test]
    fn test_custom_bounds() {
        let bounds = GeoBounds {
            lat_min: 10.0,
            lat_max: 10.5,
            lon_min: 20.0,
            lon_max: 20.5,
        };
        let mut employee_gen = generator(5).with_bounds(bounds).unwrap();
        let point = GeoPoint::parse_wkt(&employee_gen.generate().address).unwrap();
        assert!(bounds.contains(point.lon, point.lat));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let inverted = GeoBounds {
            lat_min: 42.0,
            lat_max: 41.0,
            ..CHICAGO_BOUNDS
        };
        let err = generator(5).with_bounds(inverted).err().unwrap();
        assert!(matches!(err, BenchError::InvalidParameters(_)));

        let nan = GeoBounds {
            lon_min: f64::NAN,
            ..CHICAGO_BOUNDS
        };
        assert!(generator(5).with_bounds(nan).is_err());

        // a degenerate single point is fine
        let point = GeoBounds {
            lat_min: 41.8,
            lat_max: 41.8,
            lon_min: -87.6,
            lon_max: -87.6,
        };
        assert!(generator(5).with_bounds(point).is_ok());
    }

    #[test]
    fn test_same_seed_same_records() {
        let a = generator(42).generate_batch(50);
        let b = generator(42).generate_batch(50);
        assert_eq!(a, b);

        let c = generator(43).generate_batch(50);
        assert_ne!(a, c);
    }

    #[test]
    fn test_batch_size() {
        let mut employee_gen = generator(1);
        assert!(employee_gen.generate_batch(0).is_empty());
        assert_eq!(employee_gen.generate_batch(17).len(), 17);
    }

    #[test]
    fn test_sample() {
        let mut employee_gen = generator(9);
        assert!(employee_gen.sample(&[]).is_none());

        let batch = employee_gen.generate_batch(10);
        let picked = employee_gen.sample(&batch).unwrap();
        assert!(batch.iter().any(|r| std::ptr::eq(r, picked)));
    }

    #[test]
    fn test_sample_distinct_without_replacement() {
        let mut employee_gen = generator(13);
        let batch = employee_gen.generate_batch(30);

        let picked = employee_gen.sample_distinct(&batch, 30);
        assert_eq!(picked.len(), 30);
        for (i, a) in picked.iter().enumerate() {
            for b in &picked[i + 1..] {
                assert!(!std::ptr::eq(*a, *b), "record sampled twice");
            }
        }

        assert_eq!(employee_gen.sample_distinct(&batch, 100).len(), 30);
    }
}

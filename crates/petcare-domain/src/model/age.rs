//! PetAge - Years and months as entered at the UI boundary
//!
//! The aggregate stores age as fractional years (`years + months / 12`).
//! `PetAge` converts in both directions and renders the short display
//! form ("2 yrs 6 mos").

/// Age split into whole years and remaining months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PetAge {
    years: u32,
    months: u32,
}

impl PetAge {
    /// Create an age; `months` must be in `0..=11`
    pub fn new(years: u32, months: u32) -> Result<Self, AgeError> {
        if months > 11 {
            return Err(AgeError::MonthsOutOfRange { months });
        }
        Ok(Self { years, months })
    }

    /// Recover years and months from a stored fractional age
    ///
    /// Months are rounded to the nearest whole month; a fraction that rounds
    /// up to 12 carries into the next year. Negative, non-finite or
    /// out-of-range input yields `None`.
    pub fn from_years(age: f64) -> Option<Self> {
        if !age.is_finite() || age < 0.0 || age.floor() > f64::from(u32::MAX) {
            return None;
        }
        let mut years = age.floor() as u32;
        let mut months = ((age - age.floor()) * 12.0).round() as u32;
        if months >= 12 {
            years = years.checked_add(1)?;
            months = 0;
        }
        Some(Self { years, months })
    }

    /// Fractional years, the stored representation
    pub fn as_years(&self) -> f64 {
        f64::from(self.years) + f64::from(self.months) / 12.0
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn months(&self) -> u32 {
        self.months
    }
}

impl core::fmt::Display for PetAge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut parts = Vec::with_capacity(2);
        if self.years > 0 {
            let unit = if self.years > 1 { "yrs" } else { "yr" };
            parts.push(format!("{} {}", self.years, unit));
        }
        if self.months > 0 {
            let unit = if self.months > 1 { "mos" } else { "mo" };
            parts.push(format!("{} {}", self.months, unit));
        }
        if parts.is_empty() {
            return write!(f, "0 mos");
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Errors raised when constructing a `PetAge`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeError {
    MonthsOutOfRange { months: u32 },
}

impl core::fmt::Display for AgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AgeError::MonthsOutOfRange { months } => {
                write!(f, "Months must be between 0 and 11, got {}", months)
            }
        }
    }
}

impl std::error::Error for AgeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_derivation() {
        let age = PetAge::new(2, 6).unwrap();
        assert_eq!(age.as_years(), 2.5);

        let back = PetAge::from_years(age.as_years()).unwrap();
        assert_eq!(back, age);
        assert_eq!(back.to_string(), "2 yrs 6 mos");
    }

    #[test]
    fn test_display_singular_and_zero() {
        assert_eq!(PetAge::new(1, 0).unwrap().to_string(), "1 yr");
        assert_eq!(PetAge::new(0, 1).unwrap().to_string(), "1 mo");
        assert_eq!(PetAge::new(0, 0).unwrap().to_string(), "0 mos");
        assert_eq!(PetAge::new(3, 11).unwrap().to_string(), "3 yrs 11 mos");
    }

    #[test]
    fn test_months_out_of_range() {
        assert_eq!(
            PetAge::new(1, 12),
            Err(AgeError::MonthsOutOfRange { months: 12 })
        );
    }

    #[test]
    fn test_rounding_carries_into_years() {
        // 1.99 years is 11.88 months past the first birthday
        let age = PetAge::from_years(1.99).unwrap();
        assert_eq!(age, PetAge::new(2, 0).unwrap());
    }

    #[test]
    fn test_from_years_rejects_invalid() {
        assert!(PetAge::from_years(-1.0).is_none());
        assert!(PetAge::from_years(f64::NAN).is_none());
        assert!(PetAge::from_years(f64::INFINITY).is_none());
        assert!(PetAge::from_years(f64::from(u32::MAX) + 1.0).is_none());
        assert!(PetAge::from_years(f64::from(u32::MAX) + 0.99).is_none());
        assert_eq!(
            PetAge::from_years(f64::from(u32::MAX) + 0.5).map(|a| a.years()),
            Some(u32::MAX)
        );
    }

    #[test]
    fn test_every_month_survives_round_trip() {
        for months in 0..12 {
            let age = PetAge::new(4, months).unwrap();
            assert_eq!(PetAge::from_years(age.as_years()), Some(age));
        }
    }
}

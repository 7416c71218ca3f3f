//! Static delivery-order and vehicle-tier catalogs.
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown catalog key `{key}`")]
pub struct ParseKeyError {
    key: String,
}

impl ParseKeyError {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

/// Economic profile of a delivery-order archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeliveryProfile {
    /// Base reward in whole dollars.
    pub reward: i64,
    /// Seconds allowed before the time bonus decays to zero.
    pub time_limit: f64,
    /// Reputation staked on the run: gained on success, lost on failure.
    pub reputation_gain: f32,
}

/// The four delivery-order archetypes.
///
/// Higher-paying types carry shorter or comparable time limits; the tension
/// between risk and payout lives in the catalog data, not in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    #[default]
    Standard,
    Urgent,
    Fragile,
    Heavy,
}

impl DeliveryKind {
    pub const ALL: [Self; 4] = [Self::Standard, Self::Urgent, Self::Fragile, Self::Heavy];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Urgent => "urgent",
            Self::Fragile => "fragile",
            Self::Heavy => "heavy",
        }
    }

    /// Economic profile for this order type.
    #[must_use]
    pub const fn profile(self) -> DeliveryProfile {
        match self {
            Self::Standard => DeliveryProfile {
                reward: 25,
                time_limit: 300.0,
                reputation_gain: 1.0,
            },
            Self::Urgent => DeliveryProfile {
                reward: 50,
                time_limit: 180.0,
                reputation_gain: 2.0,
            },
            Self::Fragile => DeliveryProfile {
                reward: 75,
                time_limit: 240.0,
                reputation_gain: 3.0,
            },
            Self::Heavy => DeliveryProfile {
                reward: 100,
                time_limit: 360.0,
                reputation_gain: 2.0,
            },
        }
    }
}

impl fmt::Display for DeliveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryKind {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "urgent" => Ok(Self::Urgent),
            "fragile" => Ok(Self::Fragile),
            "heavy" => Ok(Self::Heavy),
            other => Err(ParseKeyError::new(other)),
        }
    }
}

/// The fixed set of named delivery destinations on the city map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    #[default]
    DowntownOffice,
    CityMall,
    IndustrialPark,
    ResidentialArea,
}

impl Destination {
    pub const ALL: [Self; 4] = [
        Self::DowntownOffice,
        Self::CityMall,
        Self::IndustrialPark,
        Self::ResidentialArea,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DowntownOffice => "downtown_office",
            Self::CityMall => "city_mall",
            Self::IndustrialPark => "industrial_park",
            Self::ResidentialArea => "residential_area",
        }
    }

    /// Human-readable place name as shown on the map and in toasts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DowntownOffice => "Downtown Office",
            Self::CityMall => "City Mall",
            Self::IndustrialPark => "Industrial Park",
            Self::ResidentialArea => "Residential Area",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Destination {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "downtown_office" => Ok(Self::DowntownOffice),
            "city_mall" => Ok(Self::CityMall),
            "industrial_park" => Ok(Self::IndustrialPark),
            "residential_area" => Ok(Self::ResidentialArea),
            other => Err(ParseKeyError::new(other)),
        }
    }
}

/// Capability profile of a vehicle tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleTier {
    pub speed_multiplier: f32,
    pub capacity: u32,
    /// Purchase price in whole dollars. Zero for the starting tier.
    pub cost: i64,
}

/// Vehicle tiers in ascending-cost order.
///
/// Strictly increasing cost is what defines the upgrade order; the scan in
/// [`crate::upgrades`] relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleId {
    #[default]
    Bike,
    Scooter,
    Van,
    Truck,
}

impl VehicleId {
    pub const ALL: [Self; 4] = [Self::Bike, Self::Scooter, Self::Van, Self::Truck];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bike => "bike",
            Self::Scooter => "scooter",
            Self::Van => "van",
            Self::Truck => "truck",
        }
    }

    #[must_use]
    pub const fn tier(self) -> VehicleTier {
        match self {
            Self::Bike => VehicleTier {
                speed_multiplier: 1.0,
                capacity: 1,
                cost: 0,
            },
            Self::Scooter => VehicleTier {
                speed_multiplier: 1.2,
                capacity: 2,
                cost: 500,
            },
            Self::Van => VehicleTier {
                speed_multiplier: 1.5,
                capacity: 5,
                cost: 2_000,
            },
            Self::Truck => VehicleTier {
                speed_multiplier: 1.8,
                capacity: 10,
                cost: 5_000,
            },
        }
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleId {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bike" => Ok(Self::Bike),
            "scooter" => Ok(Self::Scooter),
            "van" => Ok(Self::Van),
            "truck" => Ok(Self::Truck),
            other => Err(ParseKeyError::new(other)),
        }
    }
}

/// Uniform random selection from a catalog slice.
pub fn uniform_pick<T, R>(options: &[T], rng: &mut R) -> Option<T>
where
    R: Rng,
    T: Copy,
{
    if options.is_empty() {
        return None;
    }
    Some(options[rng.gen_range(0..options.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn vehicle_costs_strictly_increase() {
        let costs: Vec<i64> = VehicleId::ALL.iter().map(|v| v.tier().cost).collect();
        for pair in costs.windows(2) {
            assert!(pair[0] < pair[1], "catalog order broken: {costs:?}");
        }
    }

    #[test]
    fn delivery_profiles_match_balance_sheet() {
        let standard = DeliveryKind::Standard.profile();
        assert_eq!(standard.reward, 25);
        assert!((standard.time_limit - 300.0).abs() < f64::EPSILON);

        let fragile = DeliveryKind::Fragile.profile();
        assert_eq!(fragile.reward, 75);
        assert!((fragile.reputation_gain - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn keys_roundtrip_through_from_str() {
        for kind in DeliveryKind::ALL {
            assert_eq!(kind.as_str().parse::<DeliveryKind>(), Ok(kind));
        }
        for dest in Destination::ALL {
            assert_eq!(dest.as_str().parse::<Destination>(), Ok(dest));
        }
        for vehicle in VehicleId::ALL {
            assert_eq!(vehicle.as_str().parse::<VehicleId>(), Ok(vehicle));
        }
        assert!("jetpack".parse::<VehicleId>().is_err());
    }

    #[test]
    fn uniform_pick_stays_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let kind = uniform_pick(&DeliveryKind::ALL, &mut rng).unwrap();
            assert!(DeliveryKind::ALL.contains(&kind));
        }
        let empty: [DeliveryKind; 0] = [];
        assert!(uniform_pick(&empty, &mut rng).is_none());
    }

    #[test]
    fn destination_labels_are_display_names() {
        assert_eq!(Destination::CityMall.to_string(), "City Mall");
        assert_eq!(DeliveryKind::Urgent.to_string(), "urgent");
        assert_eq!(VehicleId::Van.to_string(), "van");
    }
}

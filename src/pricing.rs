//! Price estimation for a move
//!
//! The estimate is a flat formula: base fee, a per-kilometre rate, and fixed
//! surcharges for property type, item volume and helpers. The wizard maps its
//! answers onto these inputs with [`PriceInputs::from_answers`].

use crate::state::MoveType;

/// Fixed fee charged for every move
pub const BASE_FEE: f64 = 250.0;
/// Rate per kilometre travelled
pub const PER_KM_RATE: f64 = 3.5;
/// Flat surcharge for moving out of a house
pub const HOUSE_SURCHARGE: f64 = 80.0;
/// Surcharge for a medium amount of items
pub const MEDIUM_VOLUME_SURCHARGE: f64 = 120.0;
/// Surcharge for many items
pub const MANY_VOLUME_SURCHARGE: f64 = 250.0;
/// Flat surcharge when extra helpers are requested
pub const HELPERS_SURCHARGE: f64 = 150.0;

/// Description length above which the move counts as "many items"
pub const MANY_ITEMS_DESCRIPTION_CHARS: usize = 80;

/// Kind of property being moved out of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Apartment,
    House,
}

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
        }
    }
}

/// Coarse bucket for how much is being moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemVolume {
    Few,
    Medium,
    Many,
}

impl ItemVolume {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Few => "Few items",
            Self::Medium => "Medium",
            Self::Many => "Many items",
        }
    }

    fn surcharge(self) -> f64 {
        match self {
            Self::Few => 0.0,
            Self::Medium => MEDIUM_VOLUME_SURCHARGE,
            Self::Many => MANY_VOLUME_SURCHARGE,
        }
    }
}

/// Everything the estimator needs, besides the distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceInputs {
    pub property_type: PropertyType,
    pub item_volume: ItemVolume,
    pub has_helpers: bool,
}

impl PriceInputs {
    /// Derive pricing inputs from the wizard's answers.
    ///
    /// The wizard never asks about property type, volume or helpers directly:
    /// property type comes from the move type, volume from the description
    /// length, and helpers are always included.
    pub fn from_answers(move_type: Option<MoveType>, description: &str) -> Self {
        Self {
            property_type: property_type_for(move_type),
            item_volume: item_volume_for(description),
            has_helpers: true,
        }
    }
}

/// Map a move type to the property type used for pricing.
///
/// Only commercial moves have an explicit rule. Office and unselected fall
/// through to the same apartment pricing, so house pricing is never chosen here.
#[allow(clippy::match_same_arms)]
pub fn property_type_for(move_type: Option<MoveType>) -> PropertyType {
    match move_type {
        Some(MoveType::Commercial) => PropertyType::Apartment,
        _ => PropertyType::Apartment,
    }
}

/// Long descriptions count as many items; everything else is medium.
pub fn item_volume_for(description: &str) -> ItemVolume {
    if description.chars().count() > MANY_ITEMS_DESCRIPTION_CHARS {
        ItemVolume::Many
    } else {
        ItemVolume::Medium
    }
}

/// Estimate the price of a move, rounded to the nearest whole currency unit
pub fn estimate(
    distance_km: f64,
    property_type: PropertyType,
    item_volume: ItemVolume,
    has_helpers: bool,
) -> u64 {
    let mut price = BASE_FEE;

    price += distance_km * PER_KM_RATE;

    if property_type == PropertyType::House {
        price += HOUSE_SURCHARGE;
    }

    price += item_volume.surcharge();

    if has_helpers {
        price += HELPERS_SURCHARGE;
    }

    price.round() as u64
}

/// Estimate using pre-built inputs
pub fn estimate_with(distance_km: f64, inputs: PriceInputs) -> u64 {
    estimate(
        distance_km,
        inputs.property_type,
        inputs.item_volume,
        inputs.has_helpers,
    )
}

/// Format a price in reais for display
pub fn format_price(price: u64) -> String {
    format!("R$ {price}.00")
}

//! Identities of the arrays the reference components exchange.
//!
//! Centralised so suppliers and requesters agree on category and name.
//! All temperatures are Kelvin, salinities psu, thicknesses metres.

use floe_core::ArrayId;

/// Sea surface temperature, supplied by the ocean.
pub fn sst() -> ArrayId {
    ArrayId::protected("sst")
}

/// Sea surface salinity, supplied by the ocean.
pub fn sss() -> ArrayId {
    ArrayId::protected("sss")
}

/// Freezing temperature of the surface water, from the configured
/// freezing-point law.
pub fn freezing_temp() -> ArrayId {
    ArrayId::shared("freezingTemp")
}

/// Ice thickness.
pub fn ice_thickness() -> ArrayId {
    ArrayId::shared("iceThickness")
}

/// Ice areal concentration in [0, 1].
pub fn ice_concentration() -> ArrayId {
    ArrayId::shared("iceConcentration")
}

/// Near-surface air temperature, supplied on request.
pub fn air_temp() -> ArrayId {
    ArrayId::shared("airTemp")
}

/// Surface heat budget, supplied under the wait discipline.
pub fn heat_budget() -> ArrayId {
    ArrayId::shared("heatBudget")
}

//! # Catalog Commands
//!
//! Home list and detail lookup.

use planeta_core::catalog::{find_planet, planets};
use planeta_core::Planet;
use tracing::debug;

use crate::error::ApiError;

/// Every planet, Sun outward.
pub fn list_planets() -> Vec<Planet> {
    debug!("list_planets command");
    planets()
}

/// One planet by name, case-insensitive.
pub fn get_planet(name: &str) -> Result<Planet, ApiError> {
    debug!(name = %name, "get_planet command");
    Ok(find_planet(name)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_list_and_get() {
        assert_eq!(list_planets().len(), 9);
        assert_eq!(get_planet("saturno").unwrap().name, "Saturno");
        assert_eq!(get_planet("Plutão").unwrap_err().code, ErrorCode::NotFound);
    }
}

//! # Catalog
//!
//! The solar-system catalog the home list and the detail screen render.
//!
//! Each entry is also sellable: [`Planet::to_product`] turns it into the
//! [`Product`] shape the cart accepts, so the detail screen's "add to bag"
//! button goes through the exact same path as any other product.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;

/// Image used by every catalog entry until per-planet artwork ships.
pub const DEFAULT_IMAGE: &str = "sol.jpeg";

/// (id, name, price, description) in home-list order, Sun outward.
const ENTRIES: [(u32, &str, &str, &str); 9] = [
    (
        1,
        "Sol",
        "R$ 25,00",
        "O Sol é a estrela central do nosso sistema solar, responsável por fornecer luz e calor à Terra. Composto principalmente por hidrogênio e hélio, ele é uma gigantesca esfera de plasma em constante fusão nuclear.",
    ),
    (
        2,
        "Mercúrio",
        "R$ 12,00",
        "Mercúrio é o planeta mais próximo do Sol e o menor do nosso sistema solar. Sua superfície é rochosa e cheia de crateras, com temperaturas extremas que variam drasticamente entre o dia e a noite.",
    ),
    (
        3,
        "Vênus",
        "R$ 18,00",
        "Vênus é conhecido como o planeta mais quente do sistema solar, devido ao seu efeito estufa descontrolado. Sua atmosfera densa de dióxido de carbono e nuvens de ácido sulfúrico tornam a vida impossível.",
    ),
    (
        4,
        "Terra",
        "R$ 30,00",
        "A Terra é o único planeta conhecido por abrigar vida. Com sua atmosfera rica em oxigênio e a presença de água líquida, oferece as condições ideais para sustentar uma vasta diversidade de ecossistemas.",
    ),
    (
        5,
        "Marte",
        "R$ 22,50",
        "Marte, o \"Planeta Vermelho\", é um dos mais estudados. Com suas calotas polares de gelo e a possibilidade de água líquida no passado, é o principal candidato para futura colonização humana.",
    ),
    (
        6,
        "Júpiter",
        "R$ 40,00",
        "Júpiter é o maior planeta do nosso sistema solar. É um gigante gasoso conhecido por sua Grande Mancha Vermelha, uma tempestade gigantesca que existe há séculos. Sua gravidade protege a Terra de muitos asteroides.",
    ),
    (
        7,
        "Saturno",
        "R$ 35,00",
        "Saturno é famoso por seus anéis impressionantes, que são formados por milhões de partículas de gelo e rocha. É o segundo maior planeta gasoso e tem um sistema de luas vasto e complexo.",
    ),
    (
        8,
        "Urano",
        "R$ 20,00",
        "Urano é um gigante de gelo com uma característica única: ele gira de lado, com seu eixo de rotação quase paralelo ao plano de sua órbita. Sua cor azul-esverdeada vem do gás metano em sua atmosfera.",
    ),
    (
        9,
        "Netuno",
        "R$ 19,90",
        "Netuno é o planeta mais distante do Sol. É um gigante de gelo com ventos super velozes e tempestades violentas. Sua atmosfera é composta por hidrogênio, hélio e metano.",
    ),
];

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Planet {
    pub id: u32,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
}

impl Planet {
    /// The cart-facing view of this entry.
    pub fn to_product(&self) -> Product {
        Product::new(self.id, &self.name, &self.price, &self.image)
    }
}

/// The full catalog in display order.
pub fn planets() -> Vec<Planet> {
    ENTRIES
        .iter()
        .map(|&(id, name, price, description)| Planet {
            id,
            name: name.to_string(),
            price: price.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Finds a planet by name, ignoring case and surrounding whitespace.
///
/// ## Example
/// ```rust
/// use planeta_core::catalog::find_planet;
///
/// assert_eq!(find_planet("júpiter").unwrap().id, 6);
/// assert!(find_planet("Plutão").is_err());
/// ```
pub fn find_planet(name: &str) -> CoreResult<Planet> {
    let wanted = name.trim().to_lowercase();
    planets()
        .into_iter()
        .find(|p| p.name.to_lowercase() == wanted)
        .ok_or_else(|| CoreError::PlanetNotFound(name.trim().to_string()))
}

/// Finds a planet by its product id.
pub fn find_planet_by_id(id: u32) -> CoreResult<Planet> {
    planets()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CoreError::PlanetNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order_and_ids() {
        let all = planets();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0].name, "Sol");
        assert_eq!(all[8].name, "Netuno");

        let ids: HashSet<u32> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_every_price_parses() {
        for planet in planets() {
            assert!(planet.to_product().price().is_positive(), "{}", planet.name);
        }
    }

    #[test]
    fn test_find_planet_is_case_insensitive() {
        assert_eq!(find_planet("TERRA").unwrap().name, "Terra");
        assert_eq!(find_planet("  vênus ").unwrap().id, 3);
    }

    #[test]
    fn test_find_planet_unknown() {
        let err = find_planet("Plutão").unwrap_err();
        assert_eq!(err.to_string(), "Planet not found: Plutão");
        assert!(find_planet_by_id(42).is_err());
        assert_eq!(find_planet_by_id(5).unwrap().name, "Marte");
    }
}

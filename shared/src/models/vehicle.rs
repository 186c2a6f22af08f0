//! Vehicle Model

use serde::{Deserialize, Serialize};

/// Vehicle entity. Many vehicles belong to exactly one client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    #[serde(alias = "cliente_id")]
    pub client_id: i64,
    #[serde(alias = "brand", alias = "marca")]
    pub make: String,
    #[serde(alias = "modelo")]
    pub model: String,
    #[serde(alias = "placa")]
    pub plate: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_from_backend_keys() {
        let json = r#"{"id":10,"cliente_id":1,"placa":"1234-ABC","marca":"Nissan","modelo":"Sentra","anio":2015,"activo":true}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.client_id, 1);
        assert_eq!(vehicle.make, "Nissan");
        assert_eq!(vehicle.plate, "1234-ABC");
    }
}

//! Client → vehicle selection cascade
//!
//! A vehicle is only selectable once its owning client is selected, and
//! switching the client always drops the vehicle.

use shared::models::Vehicle;

use crate::error::{OrderError, OrderResult};

/// Where the cascade currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeState {
    NoClient,
    ClientNoVehicle,
    ClientAndVehicle,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionCascade {
    /// Every vehicle known to the session, across clients
    vehicles: Vec<Vehicle>,
    client_id: Option<i64>,
    vehicle_id: Option<i64>,
}

impl SelectionCascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a preloaded vehicle list
    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles,
            ..Self::default()
        }
    }

    /// Replace the known vehicles of one client with a fresh list
    ///
    /// Entries owned by another client are dropped. If the currently
    /// selected vehicle disappeared, the selection falls back to
    /// ClientNoVehicle.
    pub fn load_vehicles(&mut self, client_id: i64, vehicles: Vec<Vehicle>) {
        self.vehicles.retain(|v| v.client_id != client_id);

        let before = vehicles.len();
        self.vehicles
            .extend(vehicles.into_iter().filter(|v| v.client_id == client_id));
        let kept = self.vehicles.iter().filter(|v| v.client_id == client_id).count();
        if kept != before {
            tracing::warn!(
                client_id,
                dropped = before - kept,
                "Ignoring vehicles owned by another client"
            );
        }

        if self.client_id == Some(client_id)
            && let Some(vehicle_id) = self.vehicle_id
            && !self.is_eligible(vehicle_id)
        {
            tracing::info!(client_id, vehicle_id, "Selected vehicle no longer listed, clearing");
            self.vehicle_id = None;
        }
    }

    /// Select a client; any vehicle selection is cleared
    pub fn select_client(&mut self, client_id: i64) {
        if let Some(previous) = self.vehicle_id.take() {
            tracing::debug!(client_id, previous_vehicle = previous, "Vehicle cleared by client change");
        }
        self.client_id = Some(client_id);
        tracing::debug!(client_id, eligible = self.eligible_vehicles().count(), "Client selected");
    }

    /// Back to NoClient
    pub fn clear_client(&mut self) {
        self.client_id = None;
        self.vehicle_id = None;
    }

    /// Vehicles owned by the selected client; empty without a client
    pub fn eligible_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        let client_id = self.client_id;
        self.vehicles
            .iter()
            .filter(move |v| Some(v.client_id) == client_id)
    }

    /// Select a vehicle from the eligible list
    ///
    /// Fails with `InvalidSelection` when no client is selected or the
    /// vehicle belongs to someone else (stale UI after a client switch).
    pub fn select_vehicle(&mut self, vehicle_id: i64) -> OrderResult<()> {
        let Some(client_id) = self.client_id else {
            return Err(OrderError::InvalidSelection(
                "select a client before choosing a vehicle".to_string(),
            ));
        };
        if !self.is_eligible(vehicle_id) {
            return Err(OrderError::InvalidSelection(format!(
                "vehicle {} does not belong to client {}",
                vehicle_id, client_id
            )));
        }
        self.vehicle_id = Some(vehicle_id);
        tracing::debug!(client_id, vehicle_id, "Vehicle selected");
        Ok(())
    }

    pub fn client_id(&self) -> Option<i64> {
        self.client_id
    }

    pub fn vehicle_id(&self) -> Option<i64> {
        self.vehicle_id
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        let id = self.vehicle_id?;
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Vehicle picker is disabled until a client is chosen
    pub fn is_vehicle_selection_enabled(&self) -> bool {
        self.client_id.is_some()
    }

    pub fn state(&self) -> CascadeState {
        match (self.client_id, self.vehicle_id) {
            (None, _) => CascadeState::NoClient,
            (Some(_), None) => CascadeState::ClientNoVehicle,
            (Some(_), Some(_)) => CascadeState::ClientAndVehicle,
        }
    }

    fn is_eligible(&self, vehicle_id: i64) -> bool {
        self.eligible_vehicles().any(|v| v.id == vehicle_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: i64, client_id: i64) -> Vehicle {
        Vehicle {
            id,
            client_id,
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            plate: format!("ABC-{}", id),
        }
    }

    fn cascade() -> SelectionCascade {
        SelectionCascade::with_vehicles(vec![vehicle(10, 1), vehicle(11, 1), vehicle(20, 2)])
    }

    #[test]
    fn test_no_client_means_no_vehicles() {
        let mut c = cascade();
        assert_eq!(c.state(), CascadeState::NoClient);
        assert_eq!(c.eligible_vehicles().count(), 0);
        assert!(!c.is_vehicle_selection_enabled());
        assert!(matches!(
            c.select_vehicle(10),
            Err(OrderError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_select_client_filters_vehicles() {
        let mut c = cascade();
        c.select_client(1);

        let ids: Vec<i64> = c.eligible_vehicles().map(|v| v.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(c.state(), CascadeState::ClientNoVehicle);

        c.select_vehicle(11).unwrap();
        assert_eq!(c.state(), CascadeState::ClientAndVehicle);
        assert_eq!(c.selected_vehicle().unwrap().plate, "ABC-11");
    }

    #[test]
    fn test_client_switch_clears_vehicle_and_rejects_stale_pick() {
        let mut c = cascade();
        c.select_client(1);
        c.select_vehicle(10).unwrap();

        c.select_client(2);
        assert_eq!(c.vehicle_id(), None);
        assert_eq!(c.state(), CascadeState::ClientNoVehicle);

        let err = c.select_vehicle(10).unwrap_err();
        assert!(matches!(err, OrderError::InvalidSelection(_)));
        assert_eq!(c.vehicle_id(), None);
    }

    #[test]
    fn test_reselecting_same_client_still_clears_vehicle() {
        let mut c = cascade();
        c.select_client(1);
        c.select_vehicle(10).unwrap();
        c.select_client(1);
        assert_eq!(c.state(), CascadeState::ClientNoVehicle);
    }

    #[test]
    fn test_load_vehicles_drops_foreign_entries() {
        let mut c = SelectionCascade::new();
        c.load_vehicles(3, vec![vehicle(30, 3), vehicle(40, 4)]);
        c.select_client(3);

        let ids: Vec<i64> = c.eligible_vehicles().map(|v| v.id).collect();
        assert_eq!(ids, vec![30]);
        assert!(c.select_vehicle(40).is_err());
    }

    #[test]
    fn test_reload_without_selected_vehicle_clears_it() {
        let mut c = cascade();
        c.select_client(1);
        c.select_vehicle(10).unwrap();

        c.load_vehicles(1, vec![vehicle(11, 1)]);
        assert_eq!(c.vehicle_id(), None);
        assert_eq!(c.eligible_vehicles().count(), 1);

        // Other clients' vehicles are untouched
        c.select_client(2);
        assert_eq!(c.eligible_vehicles().count(), 1);
    }

    #[test]
    fn test_clear_client() {
        let mut c = cascade();
        c.select_client(2);
        c.select_vehicle(20).unwrap();
        c.clear_client();
        assert_eq!(c.state(), CascadeState::NoClient);
        assert_eq!(c.eligible_vehicles().count(), 0);
    }
}

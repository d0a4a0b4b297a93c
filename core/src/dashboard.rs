//! Dashboard state and the controller that keeps it in sync with the API.
//!
//! # Design
//! `DashboardState` only changes through `apply`, which consumes the old state
//! and a `DashboardEvent` and returns the new one. `Dashboard` performs the
//! API round-trip first and emits an event only after it succeeds; a failed
//! call leaves the state exactly as it was. There is no re-fetch after a
//! mutation: the server's response is folded into the cached list directly.
//!
//! Ids stay unique within the list, and the edit dialog is only ever open
//! while a record is targeted.

use log::{debug, error, warn};

use crate::client::FoodClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CreateFood, Food, FoodId, FoodPatch, NewFood};

/// Everything the dashboard screen renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// `None` until the initial load succeeds.
    foods: Option<Vec<Food>>,
    editing_food: Option<Food>,
    modal_open: bool,
    edit_modal_open: bool,
}

/// A single state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// The full list arrived from `GET /foods`.
    FoodsLoaded(Vec<Food>),
    /// `POST /foods` returned the created record.
    FoodAdded(Food),
    /// `PUT /foods/{id}` returned the updated record.
    FoodUpdated(Food),
    /// `DELETE /foods/{id}` succeeded.
    FoodDeleted(FoodId),
    ToggleModal,
    ToggleEditModal,
    /// Target a record for editing and open the edit dialog.
    EditFood(Food),
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition: old state + event -> new state.
    pub fn apply(mut self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::FoodsLoaded(foods) => {
                self.foods = Some(foods);
            }
            DashboardEvent::FoodAdded(food) => {
                let foods = self.foods.get_or_insert_with(Vec::new);
                match foods.iter().position(|existing| existing.id == food.id) {
                    Some(index) => foods[index] = food,
                    None => foods.push(food),
                }
            }
            DashboardEvent::FoodUpdated(food) => {
                if let Some(slot) = self
                    .foods
                    .iter_mut()
                    .flatten()
                    .find(|existing| existing.id == food.id)
                {
                    *slot = food;
                }
            }
            DashboardEvent::FoodDeleted(id) => {
                if let Some(foods) = self.foods.as_mut() {
                    foods.retain(|food| food.id != id);
                }
            }
            DashboardEvent::ToggleModal => {
                self.modal_open = !self.modal_open;
            }
            DashboardEvent::ToggleEditModal => {
                // Opening needs a target; closing never does.
                self.edit_modal_open = !self.edit_modal_open && self.editing_food.is_some();
            }
            DashboardEvent::EditFood(food) => {
                self.editing_food = Some(food);
                self.edit_modal_open = true;
            }
        }
        self
    }

    /// The list as the view renders it; empty until loaded.
    pub fn visible_foods(&self) -> &[Food] {
        self.foods.as_deref().unwrap_or(&[])
    }

    pub fn is_loaded(&self) -> bool {
        self.foods.is_some()
    }

    pub fn editing_food(&self) -> Option<&Food> {
        self.editing_food.as_ref()
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn edit_modal_open(&self) -> bool {
        self.edit_modal_open
    }
}

/// Owns the cached food list and drives it through a host-supplied transport.
pub struct Dashboard<T> {
    client: FoodClient,
    transport: T,
    state: DashboardState,
}

impl<T: Transport> Dashboard<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: FoodClient::new(base_url),
            transport,
            state: DashboardState::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn foods(&self) -> &[Food] {
        self.state.visible_foods()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the full list and replace the cache with it.
    ///
    /// Unlike the mutating operations, failures here are returned to the
    /// caller untouched and the list stays unset.
    pub fn load(&mut self) -> Result<(), ApiError> {
        let request = self.client.build_list_foods();
        let response = self.transport.execute(request)?;
        let foods = self.client.parse_list_foods(response)?;
        debug!("loaded {} foods", foods.len());
        self.dispatch(DashboardEvent::FoodsLoaded(foods));
        Ok(())
    }

    /// Create a record (always available) and append the server's copy.
    ///
    /// Returns whether the list changed. Failures are logged only.
    pub fn add_food(&mut self, food: NewFood) -> bool {
        match self.create(CreateFood::from_new(food)) {
            Ok(created) => {
                debug!("added food {}", created.id);
                self.dispatch(DashboardEvent::FoodAdded(created));
                true
            }
            Err(e) => {
                error!("failed to add food: {e}");
                false
            }
        }
    }

    /// Merge `patch` onto the record being edited, `PUT` it, and swap the
    /// server's copy into the list.
    ///
    /// Returns whether the list changed. Failures are logged only.
    pub fn update_food(&mut self, patch: &FoodPatch) -> bool {
        let Some(editing) = self.state.editing_food() else {
            warn!("update requested with no food selected for editing");
            return false;
        };
        let id = editing.id;
        let merged = patch.merge_onto(editing);

        match self.update(id, &merged) {
            Ok(updated) => {
                debug!("updated food {}", updated.id);
                self.dispatch(DashboardEvent::FoodUpdated(updated));
                true
            }
            Err(e) => {
                error!("failed to update food {id}: {e}");
                false
            }
        }
    }

    /// Delete a record and drop it from the list.
    ///
    /// Returns whether the list changed. Failures are logged only.
    pub fn delete_food(&mut self, id: FoodId) -> bool {
        match self.delete(id) {
            Ok(()) => {
                debug!("deleted food {id}");
                self.dispatch(DashboardEvent::FoodDeleted(id));
                true
            }
            Err(e) => {
                error!("failed to delete food {id}: {e}");
                false
            }
        }
    }

    pub fn toggle_modal(&mut self) {
        self.dispatch(DashboardEvent::ToggleModal);
    }

    pub fn toggle_edit_modal(&mut self) {
        self.dispatch(DashboardEvent::ToggleEditModal);
    }

    pub fn edit_food(&mut self, food: Food) {
        self.dispatch(DashboardEvent::EditFood(food));
    }

    fn dispatch(&mut self, event: DashboardEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }

    fn create(&mut self, input: CreateFood) -> Result<Food, ApiError> {
        let request = self.client.build_create_food(&input)?;
        let response = self.transport.execute(request)?;
        self.client.parse_create_food(response)
    }

    fn update(&mut self, id: FoodId, food: &Food) -> Result<Food, ApiError> {
        let request = self.client.build_update_food(id, food)?;
        let response = self.transport.execute(request)?;
        self.client.parse_update_food(response)
    }

    fn delete(&mut self, id: FoodId) -> Result<(), ApiError> {
        let request = self.client.build_delete_food(id);
        let response = self.transport.execute(request)?;
        self.client.parse_delete_food(response)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays canned responses in order and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: VecDeque<Result<HttpResponse, ApiError>>,
        requests: Vec<HttpRequest>,
    }

    impl ScriptedTransport {
        fn reply(mut self, status: u16, body: &str) -> Self {
            self.responses.push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        fn fail(mut self, msg: &str) -> Self {
            self.responses.push_back(Err(ApiError::Transport(msg.to_string())));
            self
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.push(request);
            self.responses
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
        }
    }

    fn food(id: FoodId, name: &str) -> Food {
        Food {
            id,
            name: name.to_string(),
            description: format!("{name} description"),
            price: "10.00".to_string(),
            available: true,
            image: format!("https://img.example/{id}.png"),
        }
    }

    fn loaded(foods: Vec<Food>) -> DashboardState {
        DashboardState::new().apply(DashboardEvent::FoodsLoaded(foods))
    }

    fn dashboard_with(
        foods: &[Food],
        transport: ScriptedTransport,
    ) -> Dashboard<ScriptedTransport> {
        let body = serde_json::to_string(foods).unwrap();
        let transport = ScriptedTransport {
            responses: std::iter::once(Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body,
            }))
            .chain(transport.responses)
            .collect(),
            requests: Vec::new(),
        };
        let mut dashboard = Dashboard::new("http://api.test", transport);
        dashboard.load().unwrap();
        dashboard
    }

    // --- pure transitions ---

    #[test]
    fn new_state_is_unloaded_and_closed() {
        let state = DashboardState::new();
        assert!(!state.is_loaded());
        assert!(state.visible_foods().is_empty());
        assert!(state.editing_food().is_none());
        assert!(!state.modal_open());
        assert!(!state.edit_modal_open());
    }

    #[test]
    fn loaded_list_keeps_returned_order() {
        let state = loaded(vec![food(3, "C"), food(1, "A"), food(2, "B")]);
        let ids: Vec<FoodId> = state.visible_foods().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(state.is_loaded());
    }

    #[test]
    fn added_food_is_appended() {
        let state = loaded(vec![food(1, "A")]).apply(DashboardEvent::FoodAdded(food(2, "B")));
        assert_eq!(state.visible_foods(), &[food(1, "A"), food(2, "B")]);
    }

    #[test]
    fn added_food_with_known_id_replaces_instead_of_duplicating() {
        let mut repeated = food(1, "A2");
        repeated.price = "11.00".to_string();

        let state = loaded(vec![food(1, "A"), food(2, "B")])
            .apply(DashboardEvent::FoodAdded(repeated.clone()));

        assert_eq!(state.visible_foods(), &[repeated, food(2, "B")]);
    }

    #[test]
    fn added_food_before_load_starts_a_list() {
        let state = DashboardState::new().apply(DashboardEvent::FoodAdded(food(2, "B")));
        assert_eq!(state.visible_foods(), &[food(2, "B")]);
    }

    #[test]
    fn update_replaces_only_matching_id() {
        let before = vec![food(1, "A"), food(2, "B"), food(3, "C")];
        let mut changed = food(2, "B2");
        changed.available = false;

        let state = loaded(before.clone()).apply(DashboardEvent::FoodUpdated(changed.clone()));
        let after = state.visible_foods();

        assert_eq!(after[1], changed);
        for i in [0, 2] {
            assert_eq!(
                serde_json::to_string(&after[i]).unwrap(),
                serde_json::to_string(&before[i]).unwrap()
            );
        }
    }

    #[test]
    fn update_of_unknown_id_is_ignored() {
        let before = loaded(vec![food(1, "A")]);
        let after = before.clone().apply(DashboardEvent::FoodUpdated(food(9, "Z")));
        assert_eq!(after, before);
    }

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let state = loaded(vec![food(1, "A"), food(2, "B"), food(3, "C"), food(4, "D")])
            .apply(DashboardEvent::FoodDeleted(2));
        let ids: Vec<FoodId> = state.visible_foods().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn delete_last_food_leaves_empty_list() {
        let state = loaded(vec![food(1, "A")]).apply(DashboardEvent::FoodDeleted(1));
        assert!(state.visible_foods().is_empty());
        assert!(state.is_loaded());
    }

    #[test]
    fn toggles_flip_independently() {
        let state = DashboardState::new()
            .apply(DashboardEvent::EditFood(food(1, "A")))
            .apply(DashboardEvent::ToggleEditModal)
            .apply(DashboardEvent::ToggleModal);
        assert!(state.modal_open());
        assert!(!state.edit_modal_open());

        let state = state
            .apply(DashboardEvent::ToggleEditModal)
            .apply(DashboardEvent::ToggleModal);
        assert!(!state.modal_open());
        assert!(state.edit_modal_open());
    }

    #[test]
    fn edit_modal_does_not_open_without_target() {
        let state = DashboardState::new().apply(DashboardEvent::ToggleEditModal);
        assert!(!state.edit_modal_open());
        assert!(state.editing_food().is_none());
    }

    #[test]
    fn edit_modal_closes_and_reopens_for_existing_target() {
        let state = DashboardState::new()
            .apply(DashboardEvent::EditFood(food(4, "D")))
            .apply(DashboardEvent::ToggleEditModal);
        assert!(!state.edit_modal_open());

        let state = state.apply(DashboardEvent::ToggleEditModal);
        assert!(state.edit_modal_open());
        assert_eq!(state.editing_food(), Some(&food(4, "D")));
    }

    #[test]
    fn toggle_edit_modal_without_target_keeps_dialog_closed() {
        let mut dashboard = dashboard_with(&[food(1, "A")], ScriptedTransport::default());
        dashboard.toggle_edit_modal();
        assert!(!dashboard.state().edit_modal_open());

        dashboard.toggle_modal();
        assert!(dashboard.state().modal_open());
    }

    #[test]
    fn edit_food_targets_record_and_opens_dialog() {
        let state = DashboardState::new().apply(DashboardEvent::EditFood(food(4, "D")));
        assert_eq!(state.editing_food(), Some(&food(4, "D")));
        assert!(state.edit_modal_open());
    }

    // --- controller ---

    #[test]
    fn load_issues_get_and_stores_list() {
        let dashboard = dashboard_with(&[food(1, "A"), food(2, "B")], ScriptedTransport::default());
        assert_eq!(dashboard.foods(), &[food(1, "A"), food(2, "B")]);

        let req = &dashboard.transport().requests[0];
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://api.test/foods");
    }

    #[test]
    fn load_failure_propagates_and_leaves_list_unset() {
        let transport = ScriptedTransport::default().reply(500, "boom");
        let mut dashboard = Dashboard::new("http://api.test", transport);
        let err = dashboard.load().unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
        assert!(!dashboard.state().is_loaded());
        assert!(dashboard.foods().is_empty());
    }

    #[test]
    fn add_food_posts_available_and_appends_server_record() {
        let transport = ScriptedTransport::default()
            .reply(201, r#"{"id":2,"name":"B","price":"3.50","available":true}"#);
        let mut dashboard = dashboard_with(&[food(1, "A")], transport);

        let applied = dashboard.add_food(NewFood {
            name: "B".to_string(),
            price: "3.50".to_string(),
            ..NewFood::default()
        });

        assert!(applied);
        let expected = Food {
            id: 2,
            name: "B".to_string(),
            description: String::new(),
            price: "3.50".to_string(),
            available: true,
            image: String::new(),
        };
        assert_eq!(dashboard.foods(), &[food(1, "A"), expected]);

        let req = &dashboard.transport().requests[1];
        assert_eq!(req.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["available"], true);
    }

    #[test]
    fn add_food_failure_leaves_list_unchanged() {
        let transport = ScriptedTransport::default().fail("offline");
        let mut dashboard = dashboard_with(&[food(1, "A")], transport);
        let before = dashboard.state().clone();

        assert!(!dashboard.add_food(NewFood::default()));
        assert_eq!(dashboard.state(), &before);
    }

    #[test]
    fn update_food_merges_onto_editing_food() {
        let mut updated = food(2, "B");
        updated.price = "99.00".to_string();
        let transport =
            ScriptedTransport::default().reply(200, &serde_json::to_string(&updated).unwrap());
        let mut dashboard = dashboard_with(&[food(1, "A"), food(2, "B")], transport);
        dashboard.edit_food(food(2, "B"));

        let applied = dashboard.update_food(&FoodPatch {
            price: Some("99.00".to_string()),
            ..FoodPatch::default()
        });

        assert!(applied);
        assert_eq!(dashboard.foods()[0], food(1, "A"));
        assert_eq!(dashboard.foods()[1].price, "99.00");

        let req = &dashboard.transport().requests[1];
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://api.test/foods/2");
        let body: Food = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body.name, "B");
        assert_eq!(body.price, "99.00");
    }

    #[test]
    fn update_food_without_target_sends_nothing() {
        let mut dashboard = dashboard_with(&[food(1, "A")], ScriptedTransport::default());
        assert!(!dashboard.update_food(&FoodPatch::default()));
        assert_eq!(dashboard.transport().requests.len(), 1);
    }

    #[test]
    fn update_food_failure_leaves_list_unchanged() {
        let transport = ScriptedTransport::default().reply(404, "");
        let mut dashboard = dashboard_with(&[food(1, "A")], transport);
        dashboard.edit_food(food(1, "A"));
        let before = dashboard.foods().to_vec();

        assert!(!dashboard.update_food(&FoodPatch {
            name: Some("Renamed".to_string()),
            ..FoodPatch::default()
        }));
        assert_eq!(dashboard.foods(), before.as_slice());
    }

    #[test]
    fn delete_food_removes_record() {
        let transport = ScriptedTransport::default().reply(200, "{}");
        let mut dashboard = dashboard_with(&[food(1, "A")], transport);

        assert!(dashboard.delete_food(1));
        assert!(dashboard.foods().is_empty());

        let req = &dashboard.transport().requests[1];
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://api.test/foods/1");
    }

    #[test]
    fn delete_food_failure_leaves_list_unchanged() {
        let transport = ScriptedTransport::default().reply(500, "nope");
        let mut dashboard = dashboard_with(&[food(1, "A"), food(2, "B")], transport);

        assert!(!dashboard.delete_food(1));
        assert_eq!(dashboard.foods(), &[food(1, "A"), food(2, "B")]);
    }
}

//! The food review CRUD steps
//!
//! Each step issues one request and asserts on its status and body.
//! Steps that need the created food's id read it from the
//! [`ScenarioContext`] and fail with a precondition error when it is absent.

use reqwest::Method;
use serde::Serialize;

use crate::api::auth::extract_field;
use crate::api::types::{FoodInput, PatchOperation};
use crate::api::{ApiClient, ApiResponse};
use crate::common::config::MissingFieldPolicy;
use crate::common::{Error, Result};

pub const CREATE_PATH: &str = "/api/Food/Create";
pub const EDIT_PATH: &str = "/api/Food/Edit";
pub const ALL_PATH: &str = "/api/Food/All";
pub const DELETE_PATH: &str = "/api/Food/Delete";

/// Id the service never assigns, used by the negative-path steps
pub const MISSING_FOOD_ID: &str = "123";

pub const EDIT_SUCCESS_MSG: &str = "Successfully edited";
pub const DELETE_SUCCESS_MSG: &str = "Deleted successfully!";
pub const EDIT_NOT_FOUND_MSG: &str = "No food revues...";
pub const DELETE_FAILED_MSG: &str = "Unable to delete this food revue!";

/// State handed from earlier steps to later ones
#[derive(Debug, Default)]
pub struct ScenarioContext {
    food_id: Option<String>,
    policy: MissingFieldPolicy,
}

impl ScenarioContext {
    pub fn new(policy: MissingFieldPolicy) -> Self {
        Self {
            food_id: None,
            policy,
        }
    }

    /// Id captured by the create step, if it succeeded
    pub fn food_id(&self) -> Option<&str> {
        self.food_id.as_deref()
    }

    /// Record the created food's id; empty ids are never stored
    pub fn set_food_id(&mut self, id: String) {
        if !id.is_empty() {
            self.food_id = Some(id);
        }
    }

    /// The created food's id, or a precondition error naming `step`
    pub fn require_food_id(&self, step: FoodStep) -> Result<&str> {
        self.food_id()
            .ok_or_else(|| Error::missing_precondition(step.name(), "the id of a created food"))
    }
}

/// One step of the food review scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodStep {
    CreateFood,
    EditFoodTitle,
    ListFoods,
    DeleteFood,
    CreateWithoutRequiredFields,
    EditMissingFood,
    DeleteMissingFood,
}

/// The full scenario, in execution order
///
/// The last three steps share no state with the others or each other and
/// could run in any order; they keep this position for stable reports.
pub const FOOD_SCENARIO: [FoodStep; 7] = [
    FoodStep::CreateFood,
    FoodStep::EditFoodTitle,
    FoodStep::ListFoods,
    FoodStep::DeleteFood,
    FoodStep::CreateWithoutRequiredFields,
    FoodStep::EditMissingFood,
    FoodStep::DeleteMissingFood,
];

impl FoodStep {
    /// Human readable step name
    pub fn name(self) -> &'static str {
        match self {
            FoodStep::CreateFood => "Create food",
            FoodStep::EditFoodTitle => "Edit food title",
            FoodStep::ListFoods => "List all foods",
            FoodStep::DeleteFood => "Delete food",
            FoodStep::CreateWithoutRequiredFields => "Create food without required fields",
            FoodStep::EditMissingFood => "Edit non-existing food",
            FoodStep::DeleteMissingFood => "Delete non-existing food",
        }
    }

    /// HTTP method the step issues
    pub fn method(self) -> Method {
        match self {
            FoodStep::CreateFood | FoodStep::CreateWithoutRequiredFields => Method::POST,
            FoodStep::EditFoodTitle | FoodStep::EditMissingFood => Method::PATCH,
            FoodStep::ListFoods => Method::GET,
            FoodStep::DeleteFood | FoodStep::DeleteMissingFood => Method::DELETE,
        }
    }

    /// Request path, with `{id}` standing for the created food's id
    pub fn path_template(self) -> String {
        match self {
            FoodStep::CreateFood | FoodStep::CreateWithoutRequiredFields => CREATE_PATH.to_string(),
            FoodStep::EditFoodTitle => format!("{EDIT_PATH}/{{id}}"),
            FoodStep::EditMissingFood => format!("{EDIT_PATH}/{MISSING_FOOD_ID}"),
            FoodStep::ListFoods => ALL_PATH.to_string(),
            FoodStep::DeleteFood => format!("{DELETE_PATH}/{{id}}"),
            FoodStep::DeleteMissingFood => format!("{DELETE_PATH}/{MISSING_FOOD_ID}"),
        }
    }

    /// Status code the step asserts
    pub fn expected_status(self) -> u16 {
        match self {
            FoodStep::CreateFood => 201,
            FoodStep::EditFoodTitle | FoodStep::ListFoods | FoodStep::DeleteFood => 200,
            FoodStep::CreateWithoutRequiredFields | FoodStep::DeleteMissingFood => 400,
            FoodStep::EditMissingFood => 404,
        }
    }

    /// Issue the step's request and check the response
    pub async fn execute(self, client: &ApiClient, ctx: &mut ScenarioContext) -> Result<()> {
        match self {
            FoodStep::CreateFood => create_food(client, ctx).await,
            FoodStep::EditFoodTitle => {
                let id = ctx.require_food_id(self)?.to_string();
                edit_food_title(client, &id).await
            }
            FoodStep::ListFoods => list_foods(client).await,
            FoodStep::DeleteFood => {
                let id = ctx.require_food_id(self)?.to_string();
                delete_food(client, &id).await
            }
            FoodStep::CreateWithoutRequiredFields => create_without_required_fields(client).await,
            FoodStep::EditMissingFood => edit_missing_food(client).await,
            FoodStep::DeleteMissingFood => delete_missing_food(client).await,
        }
    }
}

async fn create_food(client: &ApiClient, ctx: &mut ScenarioContext) -> Result<()> {
    let food = FoodInput {
        name: "New Food".to_string(),
        description: "Delicious new food item".to_string(),
        url: Some(String::new()),
    };

    let response = client.post(CREATE_PATH, &food).await?;
    response.expect_status(FoodStep::CreateFood.expected_status())?;

    let id = extract_field(&response.json()?, "foodId", ctx.policy)?;
    if id.is_empty() {
        return Err(Error::TestAssertion(
            "Food ID should not be null or empty".to_string(),
        ));
    }

    tracing::debug!(food_id = %id, "Created food");
    ctx.set_food_id(id);
    Ok(())
}

async fn edit_food_title(client: &ApiClient, id: &str) -> Result<()> {
    let changes = [PatchOperation::replace("/name", "Updated Food Name")];

    let response = client.patch(&format!("{EDIT_PATH}/{id}"), &changes).await?;
    response.expect_status(FoodStep::EditFoodTitle.expected_status())?;

    let msg = response
        .json()?
        .get("msg")
        .and_then(|m| m.as_str())
        .map(str::to_string);
    if msg.as_deref() != Some(EDIT_SUCCESS_MSG) {
        return Err(Error::TestAssertion(format!(
            "Expected msg '{}', got {:?}",
            EDIT_SUCCESS_MSG, msg
        )));
    }
    Ok(())
}

async fn list_foods(client: &ApiClient) -> Result<()> {
    let response = client.get(ALL_PATH).await?;
    response.expect_status(FoodStep::ListFoods.expected_status())?;

    match response.json()? {
        serde_json::Value::Array(foods) if !foods.is_empty() => {
            tracing::debug!(count = foods.len(), "Listed foods");
            Ok(())
        }
        serde_json::Value::Array(_) => Err(Error::TestAssertion(
            "Expected a non-empty list of foods".to_string(),
        )),
        other => Err(Error::TestAssertion(format!(
            "Expected a JSON array of foods, got {}",
            json_kind(&other)
        ))),
    }
}

async fn delete_food(client: &ApiClient, id: &str) -> Result<()> {
    let response = client.delete(&format!("{DELETE_PATH}/{id}")).await?;
    response.expect_status(FoodStep::DeleteFood.expected_status())?;
    expect_body_contains(&response, DELETE_SUCCESS_MSG)
}

async fn create_without_required_fields(client: &ApiClient) -> Result<()> {
    let food = FoodInput {
        name: String::new(),
        description: "This food item has no name".to_string(),
        url: None,
    };

    let response = client.post(CREATE_PATH, &food).await?;
    response.expect_status(FoodStep::CreateWithoutRequiredFields.expected_status())
}

async fn edit_missing_food(client: &ApiClient) -> Result<()> {
    let changes = [PatchOperation::replace("/name", "New Title")];

    let response = client
        .patch(&format!("{EDIT_PATH}/{MISSING_FOOD_ID}"), &changes)
        .await?;
    response.expect_status(FoodStep::EditMissingFood.expected_status())?;
    expect_body_contains(&response, EDIT_NOT_FOUND_MSG)
}

async fn delete_missing_food(client: &ApiClient) -> Result<()> {
    let response = client
        .delete(&format!("{DELETE_PATH}/{MISSING_FOOD_ID}"))
        .await?;
    response.expect_status(FoodStep::DeleteMissingFood.expected_status())?;
    expect_body_contains(&response, DELETE_FAILED_MSG)
}

fn expect_body_contains(response: &ApiResponse, text: &str) -> Result<()> {
    if response.contains(text) {
        Ok(())
    } else {
        Err(Error::TestAssertion(format!(
            "Expected body to contain '{}', got '{}'",
            text, response.body
        )))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_order() {
        let names: Vec<_> = FOOD_SCENARIO.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            [
                "Create food",
                "Edit food title",
                "List all foods",
                "Delete food",
                "Create food without required fields",
                "Edit non-existing food",
                "Delete non-existing food",
            ]
        );
    }

    #[test]
    fn test_step_contracts() {
        assert_eq!(FoodStep::CreateFood.method(), Method::POST);
        assert_eq!(FoodStep::CreateFood.expected_status(), 201);
        assert_eq!(FoodStep::EditFoodTitle.path_template(), "/api/Food/Edit/{id}");
        assert_eq!(FoodStep::EditMissingFood.path_template(), "/api/Food/Edit/123");
        assert_eq!(FoodStep::EditMissingFood.expected_status(), 404);
        assert_eq!(FoodStep::DeleteMissingFood.method(), Method::DELETE);
        assert_eq!(FoodStep::DeleteMissingFood.expected_status(), 400);
    }

    #[test]
    fn test_context_requires_food_id() {
        let mut ctx = ScenarioContext::default();
        let err = ctx.require_food_id(FoodStep::DeleteFood).unwrap_err();
        assert!(matches!(err, Error::MissingPrecondition { ref step, .. } if step == "Delete food"));

        ctx.set_food_id(String::new());
        assert!(ctx.food_id().is_none());

        ctx.set_food_id("42".to_string());
        assert_eq!(ctx.require_food_id(FoodStep::EditFoodTitle).unwrap(), "42");
    }

    #[test]
    fn test_expect_body_contains() {
        let response = ApiResponse {
            status: 400,
            body: "\"Unable to delete this food revue!\"".to_string(),
        };
        assert!(expect_body_contains(&response, DELETE_FAILED_MSG).is_ok());
        assert!(matches!(
            expect_body_contains(&response, DELETE_SUCCESS_MSG),
            Err(Error::TestAssertion(_))
        ));
    }
}

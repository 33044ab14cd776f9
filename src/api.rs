//! HTTP client for the planner backend
//!
//! Four endpoints are consumed: plan generation, workout creation, profile
//! lookup and the scheduled-workout listing. Request and response shapes are
//! owned by the server; the types here mirror them.

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::plan::GeneratedPlan;
use crate::models::preferences::{is_female, PreferenceInput};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("API responded with status: {0}")]
  Status(StatusCode),

  #[error("Failed to parse response: {0}")]
  Parse(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Not authenticated")]
  NotAuthenticated,
}

impl Serialize for ApiError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Wire Types
/// ---------------------------------------------------------------------------

/// Body for the plan generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
  pub preferred_exercise_types: Vec<String>,
  pub session_duration: String,
  pub menstrual_cycle_phase: Option<String>,
  pub fitness_level: String,
  pub workout_days: Vec<String>,
  pub use_equipment: bool,
}

impl GenerationRequest {
  pub fn from_preferences(prefs: &PreferenceInput, gender: Option<&str>) -> Self {
    let female = is_female(gender);
    let mut preferred_exercise_types = prefs.focus_labels();

    if let (true, Some(phase)) = (female, prefs.cycle_phase()) {
      preferred_exercise_types.push(format!("Menstrual Cycle: {}", phase));
    }

    Self {
      preferred_exercise_types,
      session_duration: prefs.session_duration.clone(),
      menstrual_cycle_phase: if female {
        Some(prefs.cycle_phase.clone().unwrap_or_default())
      } else {
        None
      },
      fitness_level: prefs
        .fitness_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_default(),
      workout_days: prefs.workout_days.clone(),
      use_equipment: prefs.use_equipment,
    }
  }
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
  plan: GeneratedPlan,
}

/// One workout to put on the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRequest {
  pub user_id: i64,
  pub title: String,
  /// YYYY-MM-DD
  pub date: String,
  /// HH:MM
  pub time: String,
  pub duration: u32,
  pub workout_type: String,
  pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkoutResponse {
  #[serde(default)]
  pub success: bool,
  #[serde(default)]
  pub error: Option<String>,
  #[serde(default)]
  pub workout_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
  #[serde(default)]
  pub id: Option<i64>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub gender: Option<String>,
  #[serde(default)]
  pub fitness_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
  #[serde(default)]
  success: bool,
  user: Option<Profile>,
  error: Option<String>,
}

/// A workout as stored by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledWorkout {
  pub id: i64,
  pub title: String,
  pub date: NaiveDate,
  pub time: String,
  pub duration: u32,
  pub workout_type: String,
  #[serde(default)]
  pub partner_name: Option<String>,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub notes: Option<String>,
  #[serde(default)]
  pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkoutsResponse {
  #[serde(default)]
  success: bool,
  #[serde(default)]
  workouts: Vec<ScheduledWorkout>,
  error: Option<String>,
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

pub struct PlannerApi {
  client: Client,
  api_base: String,
  generation_url: String,
  token: Option<String>,
}

impl PlannerApi {
  /// Every request carries the configured timeout
  pub fn new(config: &PlannerConfig, token: Option<String>) -> Result<Self, ApiError> {
    let client = Client::builder().timeout(config.request_timeout).build()?;

    Ok(Self {
      client,
      api_base: config.api_base.clone(),
      generation_url: config.generation_url.clone(),
      token,
    })
  }

  fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
    match &self.token {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }

  /// Ask the server to generate a plan. Any non-2xx status is an error.
  pub async fn generate_plan(&self, request: &GenerationRequest) -> Result<GeneratedPlan, ApiError> {
    let response = self
      .client
      .post(&self.generation_url)
      .json(request)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(ApiError::Status(status));
    }

    let body = response.text().await?;
    let parsed: GenerationResponse =
      serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;

    Ok(parsed.plan)
  }

  /// Create one scheduled workout.
  ///
  /// The server reports rejections as `{"success": false, "error": ...}`
  /// with a 4xx/5xx status, so the body is read regardless of status.
  pub async fn create_workout(
    &self,
    workout: &WorkoutRequest,
  ) -> Result<CreateWorkoutResponse, ApiError> {
    let url = format!("{}/api/workouts", self.api_base);
    let response = self
      .authorized(self.client.post(&url))
      .json(workout)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
      if status.is_success() {
        ApiError::Parse(e.to_string())
      } else {
        ApiError::Status(status)
      }
    })
  }

  pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
    if self.token.is_none() {
      return Err(ApiError::NotAuthenticated);
    }

    let url = format!("{}/api/profile", self.api_base);
    let response = self.authorized(self.client.get(&url)).send().await?;

    if response.status() == StatusCode::UNAUTHORIZED {
      return Err(ApiError::NotAuthenticated);
    }

    let body = response.text().await?;
    let parsed: ProfileResponse =
      serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;

    match parsed {
      ProfileResponse { success: true, user: Some(user), .. } => Ok(user),
      ProfileResponse { error, .. } => Err(ApiError::Api(
        error.unwrap_or_else(|| "Profile unavailable".to_string()),
      )),
    }
  }

  pub async fn list_workouts(&self, user_id: i64) -> Result<Vec<ScheduledWorkout>, ApiError> {
    let url = url::Url::parse_with_params(
      &format!("{}/api/workouts", self.api_base),
      &[("user_id", user_id.to_string())],
    )
    .map_err(|e| ApiError::Parse(e.to_string()))?;

    let response = self.authorized(self.client.get(url)).send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(ApiError::Status(status));
    }

    let parsed: WorkoutsResponse = response.json().await?;
    if !parsed.success {
      return Err(ApiError::Api(
        parsed.error.unwrap_or_else(|| "Failed to fetch workouts".to_string()),
      ));
    }

    Ok(parsed.workouts)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

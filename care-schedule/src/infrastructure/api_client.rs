use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::dto::{CreatedDto, DayScheduleDto, TaskCreate, TaskInstanceUpdate};
use crate::application::time::date_key;
use crate::config::ScheduleConfig;
use crate::domain::models::{Person, Unit};
use crate::error::ScheduleError;

/// Backend the task store talks to. Injected so tests and other transports
/// can stand in for HTTP.
#[async_trait(?Send)]
pub trait ScheduleApi {
    /// `GET /schedule/day?unitId=&date=`
    async fn fetch_day_schedule(&self, unit_id: &str, date: NaiveDate) -> Result<DayScheduleDto, ScheduleError>;

    /// `PATCH /task-instances/{id}`
    async fn update_task_status(&self, task_id: &str, update: &TaskInstanceUpdate) -> Result<(), ScheduleError>;

    /// `POST /tasks`
    async fn create_task(&self, task: &TaskCreate) -> Result<CreatedDto, ScheduleError>;

    /// `DELETE /tasks/{id}`
    async fn delete_task(&self, task_id: &str) -> Result<(), ScheduleError>;

    /// `GET /staff`
    async fn fetch_staff(&self) -> Result<Vec<Person>, ScheduleError>;

    /// `GET /units`
    async fn fetch_units(&self) -> Result<Vec<Unit>, ScheduleError>;
}

pub struct HttpScheduleApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpScheduleApi {
    pub fn new(client: Client, base_url: Url, token: Option<String>) -> Self {
        Self { client, base_url, token }
    }

    pub fn from_config(config: &ScheduleConfig) -> Result<Self, ScheduleError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ScheduleError::InvalidUrl(format!("{}: {}", config.api_url, e)))?;

        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self::new(client, base_url, config.api_token.clone()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base url, escaping each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ScheduleError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ScheduleError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, ScheduleError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(path, status = status.as_u16(), "api response");

        if status.is_success() {
            Ok(response)
        } else {
            Err(ScheduleError::Api {
                status: status.as_u16(),
                path: path.to_string(),
            })
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ScheduleError> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait(?Send)]
impl ScheduleApi for HttpScheduleApi {
    async fn fetch_day_schedule(&self, unit_id: &str, date: NaiveDate) -> Result<DayScheduleDto, ScheduleError> {
        let mut url = self.endpoint(&["schedule", "day"])?;
        url.query_pairs_mut()
            .append_pair("unitId", unit_id)
            .append_pair("date", &date_key(date));

        let response = self.send(self.request(Method::GET, url), "/schedule/day").await?;
        Self::decode(response).await
    }

    async fn update_task_status(&self, task_id: &str, update: &TaskInstanceUpdate) -> Result<(), ScheduleError> {
        let url = self.endpoint(&["task-instances", task_id])?;
        let builder = self.request(Method::PATCH, url).json(update);

        self.send(builder, "/task-instances").await?;
        Ok(())
    }

    async fn create_task(&self, task: &TaskCreate) -> Result<CreatedDto, ScheduleError> {
        let url = self.endpoint(&["tasks"])?;
        let builder = self.request(Method::POST, url).json(task);

        let response = self.send(builder, "/tasks").await?;
        Self::decode(response).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), ScheduleError> {
        let url = self.endpoint(&["tasks", task_id])?;

        self.send(self.request(Method::DELETE, url), "/tasks").await?;
        Ok(())
    }

    async fn fetch_staff(&self) -> Result<Vec<Person>, ScheduleError> {
        let url = self.endpoint(&["staff"])?;

        let response = self.send(self.request(Method::GET, url), "/staff").await?;
        Self::decode(response).await
    }

    async fn fetch_units(&self) -> Result<Vec<Unit>, ScheduleError> {
        let url = self.endpoint(&["units"])?;

        let response = self.send(self.request(Method::GET, url), "/units").await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod api_client_tests {
    use super::*;

    fn api(base: &str) -> HttpScheduleApi {
        let config = ScheduleConfig {
            api_url: base.to_string(),
            ..ScheduleConfig::default()
        };
        HttpScheduleApi::from_config(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = api("http://localhost:8000");
        assert_eq!(
            api.endpoint(&["schedule", "day"]).unwrap().as_str(),
            "http://localhost:8000/schedule/day"
        );

        // a trailing slash on the base does not double up
        let api = self::api("https://example.org/api/");
        assert_eq!(
            api.endpoint(&["tasks", "a b"]).unwrap().as_str(),
            "https://example.org/api/tasks/a%20b"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let config = ScheduleConfig {
            api_url: "not a url".to_string(),
            ..ScheduleConfig::default()
        };
        assert!(matches!(
            HttpScheduleApi::from_config(&config),
            Err(ScheduleError::InvalidUrl(_))
        ));

        let api = api("mailto:ops@example.org");
        assert!(matches!(api.endpoint(&["units"]), Err(ScheduleError::InvalidUrl(_))));
    }
}

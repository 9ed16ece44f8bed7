use super::result::{APIError, APIResult};
use crate::{
    notify::Notifier,
    proto::{TriggerEvent, TriggerResponse},
    record::{StudentRecord, ValidationError, STUDENT_ID},
    status::Status,
    store::SharedStore,
};

/// Registers and looks up students.
///
/// Built once at startup with its collaborators and shared by every
/// invocation; it keeps no per-request state.
pub struct RegistrationHandler {
    store: SharedStore,
    notifier: Notifier,
}

impl RegistrationHandler {
    pub fn new(store: SharedStore, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    pub async fn handle(&self, event: TriggerEvent) -> TriggerResponse {
        let result = match event.http_method.as_str() {
            "POST" => self.register(event.body.as_deref()).await,
            "GET" => self.lookup(event.path_parameter(STUDENT_ID)).await,
            other => Err(APIError::UnsupportedMethod(other.to_owned())),
        };
        let status = result.unwrap_or_else(|e| {
            match &e {
                APIError::RegisterFailed(source) | APIError::LookupFailed(source) => {
                    tracing::error!("{e}: {source}")
                }
                APIError::UnsupportedMethod(method) => {
                    tracing::debug!("Rejecting method {method:?}")
                }
                _ => tracing::debug!("Rejecting request: {e}"),
            }
            e.into()
        });
        status.into()
    }

    async fn register(&self, body: Option<&str>) -> APIResult {
        let body = body.ok_or(ValidationError::MissingBody)?;
        let record = StudentRecord::from_json(body)?;
        tracing::info!("Registering student: {}", record.student_id());
        self.store
            .put(&record)
            .await
            .map_err(APIError::RegisterFailed)?;
        self.notifier.student_registered(&record).await;
        Ok(Status::ok("Student registered successfully"))
    }

    async fn lookup(&self, student_id: Option<&str>) -> APIResult {
        let student_id = student_id.ok_or(APIError::MissingParameter)?;
        tracing::debug!("Looking up student: {student_id}");
        let record = self
            .store
            .get(student_id)
            .await
            .map_err(APIError::LookupFailed)?
            .ok_or(APIError::NotFound)?;
        Ok(Status::ok_payload(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{
        ChatWebhook, DeliveryStats, MemoryPublisher, NotificationError, Publisher,
    };
    use crate::store::{MemoryStore, StoreError, StudentStore};
    use axum::async_trait;
    use serde_json::{json, Value as JsValue};
    use std::sync::Arc;

    struct StubWebhook {
        status: Option<u16>,
    }

    #[async_trait]
    impl ChatWebhook for StubWebhook {
        async fn post(&self, _text: &str) -> Result<(), NotificationError> {
            match self.status {
                Some(200) => Ok(()),
                Some(code) => Err(NotificationError::UnexpectedStatus(code)),
                None => Err(NotificationError::Publish("connection refused".into())),
            }
        }
    }

    struct FailingPublisher;

    #[async_trait]
    impl Publisher for FailingPublisher {
        async fn publish(&self, _: &str, _: &str, _: &str) -> Result<String, NotificationError> {
            Err(NotificationError::Publish("topic does not exist".into()))
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl StudentStore for BrokenStore {
        async fn put(&self, _: &StudentRecord) -> Result<(), StoreError> {
            Err(StoreError::Backend("table is read-only".into()))
        }

        async fn get(&self, _: &str) -> Result<Option<StudentRecord>, StoreError> {
            Err(StoreError::Backend("table is unavailable".into()))
        }
    }

    const ADA: &str = r#"{"studentID":"S1","firstName":"Ada","lastName":"Lovelace"}"#;

    fn handler_with(
        store: SharedStore,
        webhook_status: Option<u16>,
        publisher: Arc<dyn Publisher + Send + Sync>,
    ) -> (RegistrationHandler, Arc<DeliveryStats>) {
        let stats = Arc::new(DeliveryStats::new());
        let notifier = Notifier::new(
            Arc::new(StubWebhook {
                status: webhook_status,
            }),
            publisher,
            "registrations",
            stats.clone(),
        );
        (RegistrationHandler::new(store, notifier), stats)
    }

    fn handler() -> RegistrationHandler {
        handler_with(
            Arc::new(MemoryStore::new("students")),
            Some(200),
            Arc::new(MemoryPublisher::new()),
        )
        .0
    }

    fn get(id: &str) -> TriggerEvent {
        TriggerEvent::new("GET").with_path_parameter(STUDENT_ID, id)
    }

    #[tokio::test]
    async fn registered_student_can_be_fetched() {
        let handler = handler();

        let response = handler.handle(TriggerEvent::new("POST").with_body(ADA)).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "\"Student registered successfully\"");

        let response = handler.handle(get("S1")).await;
        assert_eq!(response.status_code, 200);
        let body: JsValue = serde_json::from_str(&response.body).unwrap();
        assert_eq!(
            body,
            json!({"studentID": "S1", "firstName": "Ada", "lastName": "Lovelace"})
        );
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let response = handler().handle(get("S404")).await;
        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, "\"Student not found\"");
    }

    #[tokio::test]
    async fn get_without_id_is_bad_request() {
        let handler = handler();
        let response = handler.handle(TriggerEvent::new("GET")).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, "\"Missing studentID in path\"");

        let response = handler.handle(get("")).await;
        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn invalid_bodies_are_bad_requests() {
        let handler = handler();
        for body in [
            None,
            Some("{not json"),
            Some(r#"{"firstName":"Ada","lastName":"Lovelace"}"#),
            Some(r#"["S1"]"#),
        ] {
            let mut event = TriggerEvent::new("POST");
            event.body = body.map(str::to_owned);
            let response = handler.handle(event).await;
            assert_eq!(response.status_code, 400, "body: {body:?}");
            let message: String = serde_json::from_str(&response.body).unwrap();
            assert!(message.starts_with("Invalid student record"));
        }
    }

    #[tokio::test]
    async fn other_methods_are_unsupported() {
        let handler = handler();
        for method in ["PUT", "DELETE", "OPTIONS", "get"] {
            let response = handler.handle(TriggerEvent::new(method).with_body(ADA)).await;
            assert_eq!(response.status_code, 400);
            assert_eq!(response.body, "\"Unsupported method\"");
            assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        }
    }

    #[tokio::test]
    async fn notification_failures_do_not_change_the_response() {
        let store = Arc::new(MemoryStore::new("students"));
        for webhook_status in [Some(500), None] {
            let (handler, stats) =
                handler_with(store.clone(), webhook_status, Arc::new(FailingPublisher));

            let response = handler.handle(TriggerEvent::new("POST").with_body(ADA)).await;
            assert_eq!(response.status_code, 200);
            assert_eq!(response.body, "\"Student registered successfully\"");
            assert_eq!(stats.webhook().failed(), 1);
            assert_eq!(stats.pubsub().failed(), 1);
        }
        assert!(store.get("S1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn store_failures_are_internal_errors() {
        let (handler, stats) = handler_with(
            Arc::new(BrokenStore),
            Some(200),
            Arc::new(MemoryPublisher::new()),
        );

        let response = handler.handle(TriggerEvent::new("POST").with_body(ADA)).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "\"Failed to register student\"");
        // Nothing is announced for a record that was not stored.
        assert_eq!(stats.webhook().delivered() + stats.webhook().failed(), 0);

        let response = handler.handle(get("S1")).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "\"Error retrieving student data\"");
    }
}

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use formrelay::config::{Config, SmtpConfig, SmtpTls};
use formrelay::db::SubmissionStore;
use formrelay::email::templates::EmailLayout;
use formrelay::email::{Mailer, OutgoingEmail};
use formrelay::error::{DeliveryError, PersistenceError};
use formrelay::forms::NewSubmission;
use formrelay::state::AppState;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const FROM_EMAIL: &str = "forms@example.com";
pub const HEADER: &str = "<html><body><!-- header -->";
pub const FOOTER: &str = "<!-- footer --></body></html>";

/// In-memory submission log. Fails every save when `failing` is set.
#[derive(Default)]
pub struct MemoryStore {
    pub saved: Mutex<Vec<(Uuid, NewSubmission)>>,
    pub failing: bool,
}

impl MemoryStore {
    pub fn saved(&self) -> Vec<(Uuid, NewSubmission)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn save(&self, submission: &NewSubmission) -> Result<Uuid, PersistenceError> {
        if self.failing {
            return Err(PersistenceError::Database(sqlx::Error::PoolTimedOut));
        }
        let id = Uuid::now_v7();
        self.saved.lock().unwrap().push((id, submission.clone()));
        Ok(id)
    }
}

/// Records every send attempt. The attempt numbered `fail_on` (1-based) fails.
#[derive(Default)]
pub struct RecordingMailer {
    pub attempts: Mutex<Vec<OutgoingEmail>>,
    pub fail_on: Option<usize>,
}

impl RecordingMailer {
    pub fn attempts(&self) -> Vec<OutgoingEmail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), DeliveryError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(message.clone());
            attempts.len()
        };
        if self.fail_on == Some(attempt) {
            return Err(DeliveryError::Transport("535 authentication rejected".to_string()));
        }
        Ok(())
    }
}

/// A running test server with injected store and mailer doubles.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body, return (status, text).
    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, String) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post json failed");
        let status = resp.status();
        (status, resp.text().await.unwrap_or_default())
    }

    /// POST form-urlencoded data, return (status, text).
    pub async fn post_form(&self, path: &str, data: &[(&str, &str)]) -> (StatusCode, String) {
        let resp = self
            .client
            .post(self.url(path))
            .form(data)
            .send()
            .await
            .expect("post form failed");
        let status = resp.status();
        (status, resp.text().await.unwrap_or_default())
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        admin_email: ADMIN_EMAIL.to_string(),
        template_dir: "templates".into(),
        max_body_size: 64 * 1024,
        log_level: "warn".to_string(),
        smtp: SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            user: FROM_EMAIL.to_string(),
            pass: "secret".to_string(),
            from: FROM_EMAIL.to_string(),
            tls: SmtpTls::None,
        },
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(MemoryStore::default(), RecordingMailer::default()).await
}

pub async fn spawn_app_with(store: MemoryStore, mailer: RecordingMailer) -> TestApp {
    let store = Arc::new(store);
    let mailer = Arc::new(mailer);

    let app = formrelay::build_app(AppState {
        config: test_config(),
        store: store.clone(),
        mailer: mailer.clone(),
        layout: EmailLayout::new(HEADER, FOOTER),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
        mailer,
    }
}
